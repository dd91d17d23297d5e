//! Image URL construction. No I/O.

use std::fmt;

/// Default base URL for TMDB images.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Requested image rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageSize {
    /// Grid/card rendition (`w500`).
    #[default]
    Thumbnail,
    /// Full-resolution rendition.
    Original,
}

impl ImageSize {
    /// Returns the size segment used in image URLs.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Thumbnail => "w500",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Builds a fully qualified image URL.
///
/// Returns `None` when `path` is `None` or empty. A missing leading `/` on
/// `path` and a trailing `/` on `base` are both tolerated.
#[must_use]
pub fn poster_url(base: &str, path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path?.trim();
    if path.is_empty() {
        return None;
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Some(format!("{base}/{}/{path}", size.segment()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_path_yields_none() {
        // Arrange & Act & Assert
        assert_eq!(
            poster_url(DEFAULT_IMAGE_BASE_URL, None, ImageSize::Thumbnail),
            None
        );
        assert_eq!(
            poster_url(DEFAULT_IMAGE_BASE_URL, None, ImageSize::Original),
            None
        );
    }

    #[test]
    fn test_empty_path_yields_none() {
        // Arrange & Act
        let url = poster_url(DEFAULT_IMAGE_BASE_URL, Some(""), ImageSize::Original);

        // Assert
        assert_eq!(url, None);
    }

    #[test]
    fn test_thumbnail_url() {
        // Arrange & Act
        let url = poster_url(DEFAULT_IMAGE_BASE_URL, Some("/abc.jpg"), ImageSize::Thumbnail);

        // Assert
        assert_eq!(
            url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
    }

    #[test]
    fn test_original_url() {
        // Arrange & Act
        let url = poster_url(DEFAULT_IMAGE_BASE_URL, Some("/abc.jpg"), ImageSize::Original);

        // Assert
        assert_eq!(
            url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/abc.jpg")
        );
    }

    #[test]
    fn test_slashes_are_normalized() {
        // Arrange & Act
        let with_slashes = poster_url("https://img.test/t/p/", Some("/x.png"), ImageSize::Thumbnail);
        let without = poster_url("https://img.test/t/p", Some("x.png"), ImageSize::Thumbnail);

        // Assert
        assert_eq!(with_slashes, without);
        assert_eq!(with_slashes.as_deref(), Some("https://img.test/t/p/w500/x.png"));
    }

    #[test]
    fn test_deterministic() {
        // Arrange & Act
        let first = poster_url(DEFAULT_IMAGE_BASE_URL, Some("/abc.jpg"), ImageSize::Thumbnail);
        let second = poster_url(DEFAULT_IMAGE_BASE_URL, Some("/abc.jpg"), ImageSize::Thumbnail);

        // Assert
        assert_eq!(first, second);
    }
}
