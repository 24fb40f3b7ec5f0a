//! Dataset loading.
//!
//! Builds a [`Dataset`](crate::Dataset) snapshot from a MovieLens 100K
//! directory containing `u.data` and `u.item`.

use crate::error::Result;
use crate::parser;
use crate::types::Dataset;
use std::path::Path;
use tracing::info;

impl Dataset {
    /// Load one dataset snapshot from a directory.
    ///
    /// Steps:
    /// 1. Parse `u.item` (catalog) and `u.data` (ratings) in parallel
    /// 2. Assemble the Dataset container
    ///
    /// Any parse failure aborts the load; a partially-read snapshot is
    /// never returned.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let movies_path = data_dir.join("u.item");
        let ratings_path = data_dir.join("u.data");

        // The two files are independent, so parse them in parallel.
        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_ratings(&ratings_path),
        );

        let movies = movies?;
        let ratings = ratings?;

        info!(
            "Loaded {} movies and {} ratings from {:?}",
            movies.len(),
            ratings.len(),
            data_dir
        );

        Ok(Dataset::from_parts(movies, ratings))
    }
}
