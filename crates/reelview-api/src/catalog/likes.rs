//! Liked-movies list.

use super::types::MovieSummary;

/// Movies the user has liked, in the order they were liked.
///
/// Owned by whichever screen shows like toggles and lent to the views
/// that render it. There is no shared instance.
#[derive(Debug, Clone, Default)]
pub struct LikedMovies {
    movies: Vec<MovieSummary>,
}

impl LikedMovies {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { movies: Vec::new() }
    }

    /// Flips the like state of `movie`.
    ///
    /// Returns `true` if the movie is liked afterwards.
    pub fn toggle(&mut self, movie: &MovieSummary) -> bool {
        if let Some(pos) = self.movies.iter().position(|m| m.id == movie.id) {
            self.movies.remove(pos);
            tracing::debug!(movie_id = movie.id, "movie unliked");
            false
        } else {
            self.movies.push(movie.clone());
            tracing::debug!(movie_id = movie.id, "movie liked");
            true
        }
    }

    /// Returns `true` if the movie with `id` is liked.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    /// Liked movies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MovieSummary> {
        self.movies.iter()
    }

    /// Number of liked movies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Returns `true` if nothing is liked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: String::from(title),
            poster_path: None,
            vote_average: 7.5,
            vote_count: 10,
            original_language: String::from("en"),
            overview: None,
            release_date: None,
            backdrop_path: None,
            genre_ids: vec![],
        }
    }

    #[test]
    fn test_new_is_empty() {
        // Arrange & Act
        let liked = LikedMovies::new();

        // Assert
        assert!(liked.is_empty());
        assert_eq!(liked.iter().count(), 0);
    }

    #[test]
    fn test_toggle_likes_then_unlikes() {
        // Arrange
        let mut liked = LikedMovies::new();
        let movie = make_movie(550, "Fight Club");

        // Act & Assert
        assert!(liked.toggle(&movie));
        assert!(liked.contains(550));
        assert!(!liked.toggle(&movie));
        assert!(!liked.contains(550));
        assert!(liked.is_empty());
    }

    #[test]
    fn test_iter_keeps_insertion_order() {
        // Arrange
        let mut liked = LikedMovies::new();
        liked.toggle(&make_movie(3, "C"));
        liked.toggle(&make_movie(1, "A"));
        liked.toggle(&make_movie(2, "B"));

        // Act
        liked.toggle(&make_movie(1, "A"));
        liked.toggle(&make_movie(1, "A"));
        let ids: Vec<u64> = liked.iter().map(|m| m.id).collect();

        // Assert
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(liked.len(), 3);
    }

    #[test]
    fn test_separate_lists_are_independent() {
        // Arrange
        let mut first = LikedMovies::new();
        let second = LikedMovies::new();

        // Act
        first.toggle(&make_movie(807, "Se7en"));

        // Assert
        assert!(first.contains(807));
        assert!(!second.contains(807));
    }
}
