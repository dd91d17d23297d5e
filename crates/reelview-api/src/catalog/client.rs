//! `CatalogClient` - TMDB movie catalog client implementation.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::endpoint::{Endpoint, MovieId};
use super::error::{CatalogError, Result};
use super::image::{self, DEFAULT_IMAGE_BASE_URL, ImageSize};
use super::types::{
    GenreList, MovieDetail, MoviePage, MovieSummary, TmdbErrorBody, Video, VideoList,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Query parameter carrying the API key.
const API_KEY_PARAM: &str = "api_key";

/// TMDB movie catalog client.
///
/// Every network-backed operation goes through one private request
/// primitive, the only place the API key is attached to a request.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Base URL for image requests.
    image_base_url: String,
    /// Static API key.
    api_key: String,
    /// Response language (e.g. "en-US"); remote default when `None`.
    language: Option<String>,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    image_base_url: Option<String>,
    api_key: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    timeout: Option<Duration>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            image_base_url: None,
            api_key: None,
            user_agent: None,
            language: None,
            timeout: None,
        }
    }

    /// Overrides the API base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the image base URL.
    #[must_use]
    pub fn image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = Some(url.into());
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets a whole-request timeout. Expiry surfaces as `RemoteUnavailable`.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `ConfigMissing("api_key")` if the key is unset or blank.
    /// - `ConfigMissing("user_agent")` if the User-Agent is unset.
    /// - `ConfigMissing("base_url")` if the default base URL cannot be parsed.
    /// - `ConfigMissing("http_client")` if the `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(CatalogError::ConfigMissing("api_key"))?;
        let user_agent = self
            .user_agent
            .ok_or(CatalogError::ConfigMissing("user_agent"))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|_| CatalogError::ConfigMissing("base_url"))?,
        };

        let image_base_url = self
            .image_base_url
            .unwrap_or_else(|| String::from(DEFAULT_IMAGE_BASE_URL));

        let mut http_builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            http_builder = http_builder.timeout(timeout);
        }
        let http_client = http_builder.build().map_err(|e| {
            tracing::error!(error = %e, "failed to build HTTP client");
            CatalogError::ConfigMissing("http_client")
        })?;

        Ok(CatalogClient {
            http_client,
            base_url,
            image_base_url,
            api_key,
            language: self.language,
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an image URL for `path`. Pure; never touches the network.
    #[must_use]
    pub fn poster_url(&self, path: Option<&str>, size: ImageSize) -> Option<String> {
        image::poster_url(&self.image_base_url, path, size)
    }

    /// Sends an authenticated GET and decodes the JSON body.
    ///
    /// The API key travels as a query parameter and is never logged.
    /// Transport errors are stored without their URL, which carries the key.
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        page: Option<u32>,
    ) -> Result<T> {
        let path = endpoint.path();
        let url = self
            .base_url
            .join(&path)
            .map_err(|source| CatalogError::InvalidUrl {
                path: path.clone(),
                source,
            })?;

        let mut query = endpoint.query();
        if let Some(page) = page {
            query.push(("page", page.max(1).to_string()));
        }
        if let Some(ref language) = self.language {
            query.push(("language", language.clone()));
        }

        tracing::debug!(path = %path, query = ?query, "catalog request");

        let response = self
            .http_client
            .get(url)
            .query(&[(API_KEY_PARAM, self.api_key.as_str())])
            .query(&query)
            .send()
            .await
            .map_err(|source| CatalogError::RemoteUnavailable {
                path: path.clone(),
                source: source.without_url(),
            })?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(path = %path, "catalog resource not found");
            return Err(CatalogError::NotFound { resource: path });
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorBody>(&body).map_or(body, |e| {
                format!("code={}, message={}", e.status_code, e.status_message)
            });
            tracing::warn!(path = %path, status = status.as_u16(), "catalog returned error status");
            return Err(CatalogError::RemoteError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| CatalogError::RemoteUnavailable {
                path: path.clone(),
                source: source.without_url(),
            })?;

        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| {
            let field = e.path().to_string();
            tracing::warn!(path = %path, field = %field, "failed to decode catalog response");
            CatalogError::Decode {
                path,
                field,
                source: e.into_inner(),
            }
        })
    }
}

impl LocalCatalogApi for CatalogClient {
    #[instrument(skip_all)]
    async fn fetch_now_playing(&self, page: u32) -> Result<MoviePage> {
        self.get_json(Endpoint::NowPlaying, Some(page)).await
    }

    #[instrument(skip_all)]
    async fn fetch_upcoming(&self, page: u32) -> Result<MoviePage> {
        self.get_json(Endpoint::Upcoming, Some(page)).await
    }

    #[instrument(skip_all)]
    async fn fetch_top_rated(&self, page: u32) -> Result<MoviePage> {
        self.get_json(Endpoint::TopRated, Some(page)).await
    }

    #[instrument(skip_all)]
    async fn fetch_genres(&self) -> Result<BTreeMap<u32, String>> {
        let list: GenreList = self.get_json(Endpoint::GenreList, None).await?;
        Ok(list.genres.into_iter().map(|g| (g.id, g.name)).collect())
    }

    #[instrument(skip_all, fields(genre_id = genre_id, page = page))]
    async fn fetch_movies_by_genre(&self, genre_id: u32, page: u32) -> Result<MoviePage> {
        self.get_json(Endpoint::DiscoverByGenre { genre_id }, Some(page))
            .await
    }

    #[instrument(skip_all, fields(movie_id = %movie_id))]
    async fn fetch_movie_detail(&self, movie_id: MovieId) -> Result<MovieDetail> {
        self.get_json(Endpoint::MovieDetail(movie_id), None).await
    }

    #[instrument(skip_all, fields(movie_id = %movie_id))]
    async fn fetch_recommendations(&self, movie_id: MovieId) -> Result<Vec<MovieSummary>> {
        let page: MoviePage = self
            .get_json(Endpoint::Recommendations(movie_id), Some(1))
            .await?;
        Ok(page.results)
    }

    #[instrument(skip_all, fields(movie_id = %movie_id))]
    async fn fetch_videos(&self, movie_id: MovieId) -> Result<Vec<Video>> {
        let list: VideoList = self.get_json(Endpoint::Videos(movie_id), None).await?;
        Ok(list.results)
    }
}
