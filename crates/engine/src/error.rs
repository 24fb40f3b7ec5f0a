//! Error types for the recommendation engine.

use data_loader::{MovieId, UserId};
use thiserror::Error;

/// Errors produced by matrix building and recommendation queries.
///
/// `MovieNotFound` is deliberately distinct from an empty result set so
/// callers can render "unknown movie" and "no similar movies" differently.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A rating references a movie id that is not in the catalog.
    ///
    /// This is a hard input error at build time; skipping the row silently
    /// would corrupt the matrix unnoticed.
    #[error("rating by user {user_id} references unknown movie {movie_id}")]
    UnknownMovie { movie_id: MovieId, user_id: UserId },

    /// The query movie is absent from the similarity index
    #[error("movie {0} not found in the similarity index")]
    MovieNotFound(MovieId),

    /// The requested recommendation count must be at least 1
    #[error("invalid recommendation count {0}, must be at least 1")]
    InvalidLimit(usize),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
