//! Data models for the upstream news search API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publisher identity attached to an article.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Source {
    /// Upstream source identifier. Depending on the publisher this is a
    /// string slug, a numeric id, or null.
    pub id: Option<SourceId>,
    pub name: String,
}

/// The loosely-typed `source.id` field on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum SourceId {
    Text(String),
    Number(i64),
}

/// A single search result as returned by the upstream API.
///
/// Fields the API is known to null out are optional; the rest follow
/// the documented response schema. Field names match the camelCase
/// wire format.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Source,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub content: Option<String>,
}

/// Upstream success envelope. Article order is relevance/recency as
/// returned by the API and is preserved through to rendering.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    pub status: String,
    pub total_results: i64,
    pub articles: Vec<Article>,
}

/// Error envelope returned by the upstream API on non-success statuses.
#[derive(Debug, Deserialize, Clone)]
pub struct NewsApiError {
    pub status: String,
    pub code: String,
    pub message: String,
}
