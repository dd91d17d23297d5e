//! Movie detail screen data.

use tracing::instrument;

use super::api::LocalCatalogApi;
use super::endpoint::MovieId;
use super::error::Result;
use super::types::{MovieDetail, MovieSummary, Video};

/// Everything a movie detail screen shows, loaded together.
///
/// Owned by the screen for the duration of one visit.
#[derive(Debug, Clone)]
pub struct MovieView {
    /// Full movie details.
    pub detail: MovieDetail,
    /// Recommended movies (empty when unavailable).
    pub recommendations: Vec<MovieSummary>,
    /// Attached videos (empty when unavailable).
    pub videos: Vec<Video>,
}

impl MovieView {
    /// Loads detail, recommendations and videos concurrently.
    ///
    /// Only the detail request is mandatory. A failed recommendations or
    /// videos request is logged and leaves that section empty.
    ///
    /// # Errors
    ///
    /// Returns the detail request's error, including `NotFound`.
    #[instrument(skip_all, fields(movie_id = %movie_id))]
    pub async fn load(api: &(impl LocalCatalogApi + Sync), movie_id: MovieId) -> Result<Self> {
        let (detail, recommendations, videos) = tokio::join!(
            api.fetch_movie_detail(movie_id),
            api.fetch_recommendations(movie_id),
            api.fetch_videos(movie_id),
        );

        let detail = detail?;

        let recommendations = recommendations.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "recommendations unavailable");
            Vec::new()
        });
        let videos = videos.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "videos unavailable");
            Vec::new()
        });

        Ok(Self {
            detail,
            recommendations,
            videos,
        })
    }

    /// Picks the video to play from the trailer button.
    ///
    /// Preference: official trailer, any trailer, any playable video.
    #[must_use]
    pub fn trailer(&self) -> Option<&Video> {
        let playable = || self.videos.iter().filter(|v| v.watch_url().is_some());
        playable()
            .find(|v| v.is_trailer() && v.official)
            .or_else(|| playable().find(|v| v.is_trailer()))
            .or_else(|| playable().next())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::catalog::error::CatalogError;
    use crate::catalog::types::{MoviePage, VideoList};

    fn fixture_detail() -> MovieDetail {
        serde_json::from_str(include_str!("../../../../fixtures/tmdb/movie_550.json")).unwrap()
    }

    fn fixture_videos() -> Vec<Video> {
        let list: VideoList =
            serde_json::from_str(include_str!("../../../../fixtures/tmdb/videos_550.json"))
                .unwrap();
        list.results
    }

    fn fixture_recommendations() -> Vec<MovieSummary> {
        let page: MoviePage = serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/recommendations_550.json"
        ))
        .unwrap();
        page.results
    }

    /// Mock API with switchable detail/section availability.
    struct MockCatalogApi {
        detail_found: bool,
        sections_fail: bool,
        call_count: AtomicU32,
    }

    impl MockCatalogApi {
        const fn new(detail_found: bool, sections_fail: bool) -> Self {
            Self {
                detail_found,
                sections_fail,
                call_count: AtomicU32::new(0),
            }
        }

        fn section_error() -> CatalogError {
            CatalogError::RemoteError {
                status: 500,
                message: String::from("Internal error"),
            }
        }
    }

    impl LocalCatalogApi for MockCatalogApi {
        async fn fetch_now_playing(&self, _page: u32) -> Result<MoviePage> {
            Err(Self::section_error())
        }

        async fn fetch_upcoming(&self, _page: u32) -> Result<MoviePage> {
            Err(Self::section_error())
        }

        async fn fetch_top_rated(&self, _page: u32) -> Result<MoviePage> {
            Err(Self::section_error())
        }

        async fn fetch_genres(&self) -> Result<BTreeMap<u32, String>> {
            Ok(BTreeMap::new())
        }

        async fn fetch_movies_by_genre(&self, _genre_id: u32, _page: u32) -> Result<MoviePage> {
            Err(Self::section_error())
        }

        async fn fetch_movie_detail(&self, movie_id: MovieId) -> Result<MovieDetail> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.detail_found {
                Ok(fixture_detail())
            } else {
                Err(CatalogError::NotFound {
                    resource: format!("movie/{movie_id}"),
                })
            }
        }

        async fn fetch_recommendations(&self, _movie_id: MovieId) -> Result<Vec<MovieSummary>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.sections_fail {
                Err(Self::section_error())
            } else {
                Ok(fixture_recommendations())
            }
        }

        async fn fetch_videos(&self, _movie_id: MovieId) -> Result<Vec<Video>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.sections_fail {
                Err(Self::section_error())
            } else {
                Ok(fixture_videos())
            }
        }
    }

    #[tokio::test]
    async fn test_load_collects_all_sections() {
        // Arrange
        let mock = MockCatalogApi::new(true, false);

        // Act
        let view = MovieView::load(&mock, MovieId::new(550).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(view.detail.id, 550);
        assert_eq!(view.recommendations.len(), 2);
        assert_eq!(view.videos.len(), 3);
        assert_eq!(mock.call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_load_not_found_is_reported() {
        // Arrange
        let mock = MockCatalogApi::new(false, false);

        // Act
        let result = MovieView::load(&mock, MovieId::new(999_999).unwrap()).await;

        // Assert
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_failed_sections_degrade_to_empty() {
        // Arrange
        let mock = MockCatalogApi::new(true, true);

        // Act
        let view = MovieView::load(&mock, MovieId::new(550).unwrap())
            .await
            .unwrap();

        // Assert
        assert!(view.recommendations.is_empty());
        assert!(view.videos.is_empty());
        assert_eq!(view.trailer(), None);
    }

    #[test]
    fn test_trailer_prefers_official() {
        // Arrange
        let view = MovieView {
            detail: fixture_detail(),
            recommendations: vec![],
            videos: fixture_videos(),
        };

        // Act
        let trailer = view.trailer().unwrap();

        // Assert
        assert_eq!(trailer.key, "6JnN1DmbqoU");
    }

    #[test]
    fn test_trailer_falls_back_to_any_playable() {
        // Arrange
        let mut videos = fixture_videos();
        for video in &mut videos {
            video.video_type = String::from("Clip");
        }
        let view = MovieView {
            detail: fixture_detail(),
            recommendations: vec![],
            videos,
        };

        // Act
        let trailer = view.trailer().unwrap();

        // Assert
        assert_eq!(trailer.key, "BdJKm16Co6M");
    }
}
