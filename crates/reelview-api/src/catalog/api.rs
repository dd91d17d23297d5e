//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use std::collections::BTreeMap;

use super::endpoint::MovieId;
use super::error::Result;
use super::types::{MovieDetail, MoviePage, MovieSummary, Video};

/// Movie catalog API trait.
///
/// Abstracts the network-backed operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches movies currently in theaters.
    ///
    /// # Errors
    ///
    /// Returns `RemoteUnavailable`, `RemoteError` or `Decode`.
    async fn fetch_now_playing(&self, page: u32) -> Result<MoviePage>;

    /// Fetches upcoming movies.
    ///
    /// # Errors
    ///
    /// Returns `RemoteUnavailable`, `RemoteError` or `Decode`.
    async fn fetch_upcoming(&self, page: u32) -> Result<MoviePage>;

    /// Fetches top-rated movies.
    ///
    /// # Errors
    ///
    /// Returns `RemoteUnavailable`, `RemoteError` or `Decode`.
    async fn fetch_top_rated(&self, page: u32) -> Result<MoviePage>;

    /// Fetches the genre id to name mapping.
    ///
    /// # Errors
    ///
    /// Returns `RemoteUnavailable`, `RemoteError` or `Decode`.
    async fn fetch_genres(&self) -> Result<BTreeMap<u32, String>>;

    /// Fetches one page of movies in a genre. The returned page number is
    /// the one echoed by the remote.
    ///
    /// # Errors
    ///
    /// Returns `RemoteUnavailable`, `RemoteError` or `Decode`.
    async fn fetch_movies_by_genre(&self, genre_id: u32, page: u32) -> Result<MoviePage>;

    /// Fetches full movie details.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the remote has no such movie, otherwise
    /// `RemoteUnavailable`, `RemoteError` or `Decode`.
    async fn fetch_movie_detail(&self, movie_id: MovieId) -> Result<MovieDetail>;

    /// Fetches recommendations for a movie. An empty list is valid.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `RemoteUnavailable`, `RemoteError` or `Decode`.
    async fn fetch_recommendations(&self, movie_id: MovieId) -> Result<Vec<MovieSummary>>;

    /// Fetches video metadata (trailers etc.) for a movie. An empty list is valid.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `RemoteUnavailable`, `RemoteError` or `Decode`.
    async fn fetch_videos(&self, movie_id: MovieId) -> Result<Vec<Video>>;
}
