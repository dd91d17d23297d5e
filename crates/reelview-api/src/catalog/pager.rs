//! Incremental list loading for paginated catalog listings.
//!
//! A [`PagedFetcher`] accumulates pages for one query key (e.g. a genre id).
//! Requests are issued as [`PageTicket`]s; a completion is applied only if
//! its ticket still matches the fetcher's current key, generation and page,
//! so responses that arrive after a [`PagedFetcher::reset`] or out of order
//! never touch the new state.

use std::collections::HashSet;
use std::fmt;

use tracing::instrument;

use super::api::LocalCatalogApi;
use super::error::{CatalogError, Result};
use super::types::{MoviePage, MovieSummary};

/// Number of results TMDB returns per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Highest page TMDB serves; later pages are rejected with HTTP 400.
pub const MAX_PAGE: u32 = 500;

/// Loading state of a [`PagedFetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// No fetch pending.
    Idle,
    /// A request for the current page is in flight.
    Fetching,
    /// Terminal; further load requests are no-ops.
    Exhausted,
}

/// Handle for one outstanding page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTicket<K> {
    key: K,
    page: u32,
    generation: u64,
}

impl<K> PageTicket<K> {
    /// Query key the request was issued for.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Page number to request (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }
}

/// Result of applying a response to a [`PagedFetcher`].
#[derive(Debug)]
pub enum Completion {
    /// The page was merged.
    Applied {
        /// Items appended after deduplication.
        added: usize,
        /// Whether the listing is now exhausted.
        exhausted: bool,
    },
    /// The response no longer matches the current request and was dropped.
    Stale,
    /// The request failed; the fetcher is `Idle` again and may be retried.
    Failed(CatalogError),
}

/// Accumulating page loader for a single query key.
#[derive(Debug)]
pub struct PagedFetcher<K> {
    key: K,
    /// Next page to request.
    page: u32,
    state: PageState,
    items: Vec<MovieSummary>,
    seen: HashSet<u64>,
    page_size: usize,
    /// Bumped on every reset; invalidates outstanding tickets.
    generation: u64,
}

/// Fetcher keyed by genre id.
pub type GenreFetcher = PagedFetcher<u32>;

impl<K: Clone + PartialEq + fmt::Debug> PagedFetcher<K> {
    /// Creates a fetcher for `key` with the default page size.
    pub fn new(key: K) -> Self {
        Self::with_page_size(key, DEFAULT_PAGE_SIZE)
    }

    /// Creates a fetcher for `key` expecting `page_size` items per full page.
    pub fn with_page_size(key: K, page_size: usize) -> Self {
        Self {
            key,
            page: 1,
            state: PageState::Idle,
            items: Vec::new(),
            seen: HashSet::new(),
            page_size,
            generation: 0,
        }
    }

    /// Starts a fresh session for `key`.
    ///
    /// Clears accumulated results and invalidates any outstanding ticket.
    pub fn reset(&mut self, key: K) {
        tracing::debug!(previous = ?self.key, next = ?key, "pager reset");
        self.key = key;
        self.page = 1;
        self.state = PageState::Idle;
        self.items.clear();
        self.seen.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Requests the next page.
    ///
    /// Returns `None` (and does nothing) unless the fetcher is `Idle`.
    pub fn load_next(&mut self) -> Option<PageTicket<K>> {
        if self.state != PageState::Idle {
            return None;
        }
        self.state = PageState::Fetching;
        Some(PageTicket {
            key: self.key.clone(),
            page: self.page,
            generation: self.generation,
        })
    }

    /// Applies the outcome of the request identified by `ticket`.
    pub fn complete(&mut self, ticket: &PageTicket<K>, result: Result<MoviePage>) -> Completion {
        if !self.is_current(ticket) {
            tracing::debug!(
                key = ?ticket.key,
                page = ticket.page,
                "dropping response for superseded request"
            );
            return Completion::Stale;
        }

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(key = ?self.key, page = self.page, error = %err, "page fetch failed");
                self.state = PageState::Idle;
                return Completion::Failed(err);
            }
        };

        if response.page != ticket.page {
            tracing::warn!(
                requested = ticket.page,
                echoed = response.page,
                "dropping response with mismatched page"
            );
            self.state = PageState::Idle;
            return Completion::Stale;
        }

        let fetched = response.results.len();
        let before = self.items.len();
        for movie in response.results {
            if self.seen.insert(movie.id) {
                self.items.push(movie);
            }
        }
        let added = self.items.len().saturating_sub(before);

        let last_page = response.total_pages.min(MAX_PAGE);
        let exhausted = fetched == 0 || fetched < self.page_size || ticket.page >= last_page;

        tracing::info!(
            key = ?self.key,
            page = ticket.page,
            fetched = fetched,
            added = added,
            total = self.items.len(),
            "page applied"
        );

        if exhausted {
            tracing::debug!(key = ?self.key, page = ticket.page, "listing exhausted");
            self.state = PageState::Exhausted;
        } else {
            self.page = self.page.saturating_add(1);
            self.state = PageState::Idle;
        }

        Completion::Applied { added, exhausted }
    }

    fn is_current(&self, ticket: &PageTicket<K>) -> bool {
        self.state == PageState::Fetching
            && ticket.generation == self.generation
            && ticket.page == self.page
            && ticket.key == self.key
    }

    /// Current query key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Next page number to request.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Current loading state.
    #[must_use]
    pub const fn state(&self) -> PageState {
        self.state
    }

    /// Accumulated results in load order.
    #[must_use]
    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    /// Number of accumulated results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` while a request is in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.state == PageState::Fetching
    }

    /// Returns `true` once the listing has no more pages.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state == PageState::Exhausted
    }
}

impl GenreFetcher {
    /// Loads the next page of the current genre through `api`.
    ///
    /// Returns `None` when the fetcher is not `Idle`.
    #[instrument(skip_all, fields(genre_id = self.key, page = self.page))]
    pub async fn fetch_next(&mut self, api: &(impl LocalCatalogApi + Sync)) -> Option<Completion> {
        let ticket = self.load_next()?;
        let result = api.fetch_movies_by_genre(ticket.key, ticket.page).await;
        Some(self.complete(&ticket, result))
    }
}
