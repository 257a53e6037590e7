use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::DateTime;
use serde::Deserialize;
use tera::Context;
use tracing::error;

use crate::error::NewsError;
use crate::search::Search;
use crate::state::AppState;

/// Query parameters for the search endpoint.
///
/// `page` stays a raw string here and is parsed in the handler, so a
/// malformed value surfaces as the same server error as any other
/// failure instead of a deserialization-time 400.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub page: Option<String>,
}

fn render_template(
    tera: &tera::Tera,
    template: &str,
    context: &Context,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    tera.render(template, context).map(Html).map_err(|e| {
        error!("Template render error for '{}': {}", template, e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Render error")
    })
}

/// Tera filter rendering an RFC 3339 timestamp as a human-readable
/// date, e.g. "March 5, 2021".
pub fn published_date(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let raw = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("published_date expects a timestamp string"))?;
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| tera::Error::msg(format!("published_date: {e}")))?;
    Ok(tera::Value::String(parsed.format("%B %-d, %Y").to_string()))
}

/// GET / - Search landing page.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let context = Context::new();
    render_template(&state.tera, "index.html", &context)
}

/// GET /search - Fetch one page of results for `q` and render it.
///
/// One request moves through parse, fetch, render; any parse or fetch
/// failure ends the request immediately with no retries.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let page = match params.page.as_deref() {
        None | Some("") => "1",
        Some(p) => p,
    };
    let next_page = match page.parse::<i64>() {
        Ok(n) => n,
        Err(_) => return NewsError::InvalidPage(page.to_string()).into_response(),
    };

    let mut search = Search::new(params.q, next_page);
    let results = match state
        .client
        .everything(&search.search_key, search.next_page)
        .await
    {
        Ok(results) => results,
        Err(err) => return err.into_response(),
    };
    search.record_results(results);

    let mut context = Context::new();
    context.insert("search", &search);
    context.insert("current_page", &search.current_page());
    context.insert("previous_page", &search.previous_page());
    context.insert("is_last_page", &search.is_last_page());

    match render_template(&state.tera, "search.html", &context) {
        Ok(html) => html.into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::NewsApiClient;
    use axum::routing::get;
    use axum::Router;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SUCCESS_BODY: &str = r#"{
        "status": "ok",
        "totalResults": 45,
        "articles": [
            {
                "source": {"id": null, "name": "Example Wire"},
                "author": null,
                "title": "Bitcoin hits a new high",
                "description": "Markets react.",
                "url": "https://example.com/bitcoin-high",
                "urlToImage": null,
                "publishedAt": "2021-03-05T00:00:00Z",
                "content": null
            }
        ]
    }"#;

    const REJECTION_BODY: &str =
        r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#;

    /// Serves a canned upstream response on an ephemeral port, counting
    /// how often it is hit.
    async fn spawn_upstream(
        status: StatusCode,
        body: &'static str,
    ) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let recorded = hits.clone();
        let router = Router::new().route(
            "/v2/everything",
            get(move || {
                let recorded = recorded.clone();
                async move {
                    recorded.fetch_add(1, Ordering::SeqCst);
                    (status, body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{addr}/v2/everything"), hits)
    }

    fn test_state(endpoint: String) -> Arc<AppState> {
        let mut tera = tera::Tera::default();
        tera.add_raw_template("index.html", "landing").unwrap();
        tera.add_raw_template(
            "search.html",
            "{{ search.search_key }}:{{ current_page }}:{{ search.next_page }}:\
             {{ search.results.articles.0.publishedAt | published_date }}",
        )
        .unwrap();
        tera.register_filter("published_date", published_date);
        Arc::new(AppState::new(
            tera,
            NewsApiClient::with_endpoint("test-key".into(), endpoint),
        ))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn published_date_is_human_readable() {
        let value = tera::Value::String("2021-03-05T00:00:00Z".into());
        let formatted = published_date(&value, &HashMap::new()).unwrap();
        assert_eq!(formatted, tera::Value::String("March 5, 2021".into()));
    }

    #[test]
    fn published_date_rejects_garbage() {
        let value = tera::Value::String("yesterday".into());
        assert!(published_date(&value, &HashMap::new()).is_err());
    }

    #[tokio::test]
    async fn non_integer_page_fails_without_contacting_upstream() {
        let (endpoint, hits) = spawn_upstream(StatusCode::OK, SUCCESS_BODY).await;
        let state = test_state(endpoint);

        let params = SearchParams {
            q: "bitcoin".into(),
            page: Some("abc".into()),
        };
        let response = search(State(state), Query(params)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Unexpected server error");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_rejection_message_reaches_the_caller() {
        let (endpoint, _hits) = spawn_upstream(StatusCode::UNAUTHORIZED, REJECTION_BODY).await;
        let state = test_state(endpoint);

        let params = SearchParams {
            q: "bitcoin".into(),
            page: None,
        };
        let response = search(State(state), Query(params)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("Your API key is invalid"));
    }

    #[tokio::test]
    async fn successful_search_renders_with_advanced_cursor() {
        let (endpoint, hits) = spawn_upstream(StatusCode::OK, SUCCESS_BODY).await;
        let state = test_state(endpoint);

        let params = SearchParams {
            q: "bitcoin".into(),
            page: None,
        };
        let response = search(State(state), Query(params)).await;

        assert_eq!(response.status(), StatusCode::OK);
        // 45 results truncate to 2 pages; page 1 is not the last, so
        // the cursor advances to 2 while the current page stays 1.
        assert_eq!(body_text(response).await, "bitcoin:1:2:March 5, 2021");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_page_parameter_defaults_to_first_page() {
        let (endpoint, hits) = spawn_upstream(StatusCode::OK, SUCCESS_BODY).await;
        let state = test_state(endpoint);

        let params = SearchParams {
            q: "bitcoin".into(),
            page: Some(String::new()),
        };
        let response = search(State(state), Query(params)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
