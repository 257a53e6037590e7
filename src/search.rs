//! Pagination state for one search request.

use serde::Serialize;

use crate::models::Results;

/// Articles requested per upstream page.
pub const PAGE_SIZE: i64 = 20;

/// Per-request search state: the query term plus pagination bookkeeping.
///
/// Built fresh for every request and discarded once the response is
/// rendered; nothing here outlives a single request.
#[derive(Debug, Serialize)]
pub struct Search {
    /// The raw query term as typed by the user.
    pub search_key: String,
    /// 1-based number of the page to fetch on the next forward
    /// pagination action.
    pub next_page: i64,
    pub total_pages: i64,
    /// Results for the current page.
    pub results: Results,
}

impl Search {
    pub fn new(search_key: String, next_page: i64) -> Self {
        Self {
            search_key,
            next_page,
            total_pages: 0,
            results: Results::default(),
        }
    }

    /// True when no pages remain beyond the one most recently fetched.
    pub fn is_last_page(&self) -> bool {
        self.next_page >= self.total_pages
    }

    /// The page most recently fetched, or 1 before any page completed.
    pub fn current_page(&self) -> i64 {
        if self.next_page == 1 {
            1
        } else {
            self.next_page - 1
        }
    }

    /// One before the current page. Not clamped: callers hide the
    /// previous-page link once this drops below 1.
    pub fn previous_page(&self) -> i64 {
        self.current_page() - 1
    }

    /// Records a fetched page of results, derives the page count, and
    /// advances the cursor unless this was the last page.
    ///
    /// Total pages use truncating division, so a trailing partial page
    /// is not counted.
    pub fn record_results(&mut self, results: Results) {
        self.total_pages = results.total_results / PAGE_SIZE;
        self.results = results;
        if !self.is_last_page() {
            self.next_page += 1;
        }
    }
}
