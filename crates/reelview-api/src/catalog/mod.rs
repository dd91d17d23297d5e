//! TMDB movie catalog module.
//!
//! Builds authenticated requests against the TMDB API v3 movie endpoints,
//! decodes listings, genres, details and videos, and provides the paging
//! protocol used by incremental listings.

mod api;
mod client;
mod endpoint;
mod error;
mod image;
mod likes;
mod pager;
mod types;
mod view;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder};
pub use endpoint::{Endpoint, MovieId};
#[allow(clippy::module_name_repetitions)]
pub use error::{CatalogError, Result};
pub use image::{DEFAULT_IMAGE_BASE_URL, ImageSize, poster_url};
pub use likes::LikedMovies;
pub use pager::{
    Completion, DEFAULT_PAGE_SIZE, GenreFetcher, MAX_PAGE, PageState, PageTicket, PagedFetcher,
};
pub use types::{
    Genre, GenreList, MovieDetail, MoviePage, MovieSummary, ProductionCompany, ProductionCountry,
    SpokenLanguage, Video, VideoList,
};
pub use view::MovieView;
