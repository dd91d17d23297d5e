//! TMDB catalog response types.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

// --- Listings ---

/// One page of a paginated movie listing.
///
/// Returned by `movie/now_playing`, `movie/upcoming`, `movie/top_rated`,
/// `discover/movie` and `movie/{id}/recommendations`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    /// Page number echoed by the remote (1-based).
    pub page: u32,
    /// Movies on this page, in remote order.
    pub results: Vec<MovieSummary>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl MoviePage {
    /// Returns `true` if no page follows this one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// A movie as it appears in listings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path (e.g. `/abc.jpg`).
    pub poster_path: Option<String>,
    /// Vote average (0.0-10.0).
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl MovieSummary {
    /// Returns the release year, if the release date is a valid date.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        parse_year(self.release_date.as_deref())
    }
}

// --- Genres ---

/// Response from `genre/movie/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    /// All movie genres.
    pub genres: Vec<Genre>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Movie Details ---

/// Response from `movie/{movie_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    pub original_title: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Release date.
    pub release_date: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Genres.
    pub genres: Vec<Genre>,
    /// Spoken languages.
    pub spoken_languages: Vec<SpokenLanguage>,
    /// Production companies.
    pub production_companies: Vec<ProductionCompany>,
    /// Production countries.
    pub production_countries: Vec<ProductionCountry>,
    /// Box office revenue in USD (0 when unknown).
    pub revenue: u64,
    /// Budget in USD (0 when unknown).
    #[serde(default)]
    pub budget: u64,
    /// Release status (e.g. "Released").
    pub status: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
}

impl MovieDetail {
    /// Projects the detail onto the listing shape.
    #[must_use]
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            original_language: self.original_language.clone(),
            overview: self.overview.clone(),
            release_date: self.release_date.clone(),
            backdrop_path: self.backdrop_path.clone(),
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }

    /// Returns the release year, if known.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        parse_year(self.release_date.as_deref())
    }

    /// Returns genre names joined with `", "`.
    #[must_use]
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Spoken language entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpokenLanguage {
    /// ISO 639-1 code.
    pub iso_639_1: String,
    /// English name.
    #[serde(default)]
    pub english_name: Option<String>,
    /// Native name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionCompany {
    /// TMDB company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path.
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1, may be empty).
    #[serde(default)]
    pub origin_country: Option<String>,
}

/// Production country entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionCountry {
    /// ISO 3166-1 code.
    pub iso_3166_1: String,
    /// Country name.
    pub name: String,
}

// --- Videos ---

/// Response from `movie/{movie_id}/videos`.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoList {
    /// Movie ID.
    pub id: u64,
    /// Videos attached to the movie.
    pub results: Vec<Video>,
}

/// Video metadata (trailers, teasers, clips).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    /// TMDB video ID.
    pub id: String,
    /// Site-specific key (e.g. YouTube video id).
    pub key: String,
    /// Video title.
    pub name: String,
    /// Hosting site (e.g. "YouTube", "Vimeo").
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser", "Clip").
    #[serde(rename = "type")]
    pub video_type: String,
    /// Official flag.
    #[serde(default)]
    pub official: bool,
    /// Language (ISO 639-1).
    #[serde(default)]
    pub iso_639_1: Option<String>,
}

impl Video {
    /// Returns `true` if the video is a trailer.
    #[must_use]
    pub fn is_trailer(&self) -> bool {
        self.video_type.eq_ignore_ascii_case("trailer")
    }

    /// Returns a playable URL for supported hosting sites.
    #[must_use]
    pub fn watch_url(&self) -> Option<String> {
        if self.key.is_empty() {
            return None;
        }
        match self.site.as_str() {
            "YouTube" => Some(format!("https://www.youtube.com/watch?v={}", self.key)),
            "Vimeo" => Some(format!("https://vimeo.com/{}", self.key)),
            _ => None,
        }
    }
}

// --- Error Response ---

/// TMDB error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorBody {
    /// TMDB error code (e.g. 34 = resource not found).
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

fn parse_year(date: Option<&str>) -> Option<i32> {
    let date = date?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}
