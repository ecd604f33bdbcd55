//! GA4GH API client abstraction.
//!
//! The report only needs three searches, each yielding a lazy, single-pass
//! sequence of records. [`Ga4ghClient`] captures that contract so the report can
//! run against the HTTP implementation or an in-memory stub.
//!
//! # Implementations
//!
//! - [`HttpClient`] - GA4GH reference server over HTTP
//!
//! # Example
//!
//! ```no_run
//! use ga4gh_report::client::{Ga4ghClient, HttpClient};
//!
//! let client = HttpClient::new("http://localhost:8000/ga4gh/")?;
//! for dataset in client.search_datasets() {
//!     println!("{}", dataset?.id);
//! }
//! # Ok::<(), ga4gh_report::Error>(())
//! ```

mod http;

pub use http::HttpClient;

use crate::{
    Result,
    types::{Dataset, Page, Variant, VariantSet},
};
use std::fmt;

/// Search operations of a GA4GH API server
pub trait Ga4ghClient {
    /// All datasets, unfiltered
    fn search_datasets(&self) -> SearchResults<'_, Dataset>;

    /// Variant sets belonging to one dataset
    fn search_variant_sets(&self, dataset_id: &str) -> SearchResults<'_, VariantSet>;

    /// Variants of a variant set overlapping `reference_name:start-end`
    fn search_variants(
        &self,
        variant_set_id: &str,
        start: u64,
        end: u64,
        reference_name: &str,
    ) -> SearchResults<'_, Variant>;
}

type FetchPage<'a, T> = Box<dyn FnMut(Option<&str>) -> Result<Page<T>> + 'a>;

enum Cursor {
    Start,
    Token(String),
    Done,
}

/// Lazy sequence of search results.
///
/// Pages are requested on demand as the iterator is drained; the first page is
/// fetched on the first call to `next`. A missing or empty page token ends the
/// sequence, as does the first error.
pub struct SearchResults<'a, T> {
    query: String,
    fetch: FetchPage<'a, T>,
    buffered: std::vec::IntoIter<T>,
    cursor: Cursor,
    pages_fetched: usize,
}

impl<'a, T> SearchResults<'a, T> {
    /// Build a sequence from a page fetcher. The fetcher receives the token of the
    /// page to load, `None` for the first page.
    pub fn new<F>(query: impl Into<String>, fetch: F) -> Self
    where
        F: FnMut(Option<&str>) -> Result<Page<T>> + 'a,
    {
        Self {
            query: query.into(),
            fetch: Box::new(fetch),
            buffered: Vec::new().into_iter(),
            cursor: Cursor::Start,
            pages_fetched: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl<T> Iterator for SearchResults<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.next() {
                return Some(Ok(item));
            }

            let token = match std::mem::replace(&mut self.cursor, Cursor::Done) {
                Cursor::Done => return None,
                Cursor::Start => None,
                Cursor::Token(token) => Some(token),
            };

            match (self.fetch)(token.as_deref()) {
                Ok(page) => {
                    self.pages_fetched += 1;
                    self.cursor = match page.next_page_token {
                        Some(t) if !t.is_empty() => Cursor::Token(t),
                        _ => Cursor::Done,
                    };
                    self.buffered = page.items.into_iter();
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<T> fmt::Debug for SearchResults<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchResults")
            .field("query", &self.query)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
