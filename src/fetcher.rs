//! Client for the upstream news search API.

use reqwest::{Client, RequestBuilder, StatusCode};

use crate::error::NewsError;
use crate::models::{NewsApiError, Results};
use crate::search::PAGE_SIZE;

/// Production search endpoint.
const EVERYTHING_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Thin client over the news search REST endpoint.
///
/// Holds the configured API key and a reusable HTTP client; issues
/// exactly one outbound call per invocation with no retries and no
/// explicit timeout beyond the transport default.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, EVERYTHING_ENDPOINT.to_string())
    }

    /// Points the client at a different endpoint URL. Used by tests to
    /// target a local stand-in server.
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            endpoint,
        }
    }

    /// Builds the GET request for one page of results. Query values are
    /// URL-escaped by the query serializer; sort order and language are
    /// fixed.
    fn request(&self, query: &str, page: i64) -> RequestBuilder {
        let page_size = PAGE_SIZE.to_string();
        let page = page.to_string();
        let params = [
            ("q", query),
            ("pageSize", page_size.as_str()),
            ("page", page.as_str()),
            ("apiKey", self.api_key.as_str()),
            ("sortBy", "publishedAt"),
            ("language", "en"),
        ];
        self.http.get(&self.endpoint).query(&params)
    }

    /// Fetches one page of search results for `query`.
    ///
    /// On a non-success status the body is read as the upstream error
    /// envelope so its message can be shown to the user; an envelope
    /// that does not decode degrades to a protocol error.
    pub async fn everything(&self, query: &str, page: i64) -> Result<Results, NewsError> {
        let response = self
            .request(query, page)
            .send()
            .await
            .map_err(NewsError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(match response.json::<NewsApiError>().await {
                Ok(envelope) => NewsError::Rejection {
                    status,
                    code: envelope.code,
                    message: envelope.message,
                },
                Err(_) => NewsError::Protocol { status },
            });
        }

        response.json::<Results>().await.map_err(NewsError::Decode)
    }
}
