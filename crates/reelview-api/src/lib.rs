//! Movie catalog client library for reelview.
//!
//! Provides an authenticated client for the TMDB movie catalog and the
//! client-side paging protocol used by listing screens.

/// TMDB movie catalog client.
pub mod catalog;
