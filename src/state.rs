use tera::Tera;

use crate::fetcher::NewsApiClient;

/// Shared application state passed to all request handlers.
///
/// Built once at startup and read-only afterwards, so handlers share it
/// through a plain `Arc` with no locking. Everything else in the search
/// flow is request-local.
#[derive(Debug)]
pub struct AppState {
    /// Template engine for rendering HTML pages.
    pub tera: Tera,
    /// Client for the upstream news search API.
    pub client: NewsApiClient,
}

impl AppState {
    pub fn new(tera: Tera, client: NewsApiClient) -> Self {
        Self { tera, client }
    }
}
