//! Command-line interface definitions.

use clap::Parser;

/// Startup configuration, from flags or the environment.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// NewsAPI.org access key
    #[arg(long, env = "NEWS_API_KEY")]
    pub api_key: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["newsstand", "--api-key", "secret"]);
        assert_eq!(cli.api_key, "secret");
    }

    #[test]
    fn test_port_override() {
        let cli = Cli::parse_from(["newsstand", "--api-key", "secret", "--port", "8080"]);
        assert_eq!(cli.port, 8080);
    }
}
