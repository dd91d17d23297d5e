//! Typed catalog endpoint descriptors.

use std::fmt;
use std::num::NonZeroU64;

use super::error::{CatalogError, Result};

/// TMDB movie identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovieId(NonZeroU64);

impl MovieId {
    /// Creates a movie id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidMovieId`] if `id` is zero.
    pub fn new(id: u64) -> Result<Self> {
        NonZeroU64::new(id)
            .map(Self)
            .ok_or(CatalogError::InvalidMovieId)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for MovieId {
    type Error = CatalogError;

    fn try_from(id: u64) -> Result<Self> {
        Self::new(id)
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog resource.
///
/// Paths are relative so they join onto a base URL ending in `/3/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `movie/now_playing`
    NowPlaying,
    /// `movie/upcoming`
    Upcoming,
    /// `movie/top_rated`
    TopRated,
    /// `genre/movie/list`
    GenreList,
    /// `discover/movie` filtered by `with_genres`.
    DiscoverByGenre {
        /// Genre to filter by.
        genre_id: u32,
    },
    /// `movie/{id}`
    MovieDetail(MovieId),
    /// `movie/{id}/recommendations`
    Recommendations(MovieId),
    /// `movie/{id}/videos`
    Videos(MovieId),
}

impl Endpoint {
    /// Returns the request path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::NowPlaying => String::from("movie/now_playing"),
            Self::Upcoming => String::from("movie/upcoming"),
            Self::TopRated => String::from("movie/top_rated"),
            Self::GenreList => String::from("genre/movie/list"),
            Self::DiscoverByGenre { .. } => String::from("discover/movie"),
            Self::MovieDetail(id) => format!("movie/{id}"),
            Self::Recommendations(id) => format!("movie/{id}/recommendations"),
            Self::Videos(id) => format!("movie/{id}/videos"),
        }
    }

    /// Returns query parameters implied by the endpoint itself.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::DiscoverByGenre { genre_id } => vec![("with_genres", genre_id.to_string())],
            _ => Vec::new(),
        }
    }

    /// Returns `true` if the endpoint accepts a `page` parameter.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        matches!(
            self,
            Self::NowPlaying
                | Self::Upcoming
                | Self::TopRated
                | Self::DiscoverByGenre { .. }
                | Self::Recommendations(_)
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
