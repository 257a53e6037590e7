mod cli;
mod error;
mod fetcher;
mod handlers;
mod models;
mod search;
mod state;

use std::sync::Arc;

use anyhow::Context as _;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use tera::Tera;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::fetcher::NewsApiClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    anyhow::ensure!(!cli.api_key.is_empty(), "api key must be set");

    let mut tera = Tera::new("templates/**/*.html").context("failed to parse templates")?;
    tera.register_filter("published_date", handlers::published_date);

    let state = Arc::new(AppState::new(tera, NewsApiClient::new(cli.api_key)));

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search))
        .nest_service("/assets", ServeDir::new("assets"))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
