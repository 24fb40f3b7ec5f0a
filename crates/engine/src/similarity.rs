//! The similarity engine.
//!
//! Computes cosine similarity between every pair of movie columns of a
//! [`RatingMatrix`]. The result is a dense, symmetric movie × movie matrix
//! answered through [`SimilarityMatrix::score`].
//!
//! ## Algorithm
//! For columns i and j: `dot(col_i, col_j) / (‖col_i‖ · ‖col_j‖)`.
//! Only the upper triangle is computed; the lower triangle is mirrored.
//! The cost is O(movies² × users), which is the dominant scaling limit of
//! this engine — fine for thousands of movies, not for millions.

use crate::matrix::RatingMatrix;
use data_loader::MovieId;
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// Symmetric movie × movie cosine similarity matrix.
///
/// Immutable once computed; concurrent readers need no coordination.
/// Scores lie in [0, 1] because the zero-filled rating matrix has no
/// negative components.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    /// Row-major scores, `num_movies × num_movies`
    scores: Vec<f64>,
    movie_ids: Vec<MovieId>,
    index: HashMap<MovieId, usize>,
}

impl SimilarityMatrix {
    /// Compute the similarity matrix for one rating matrix snapshot.
    ///
    /// A column whose norm is zero (a movie whose kept ratings are all
    /// zero) scores 0.0 against everything, itself included. The guard is
    /// explicit so no NaN or infinity can ever reach a caller. Diagonal
    /// entries of non-degenerate columns are pinned at exactly 1.0.
    ///
    /// Rows are computed in parallel; each (i, j) cell depends only on the
    /// input matrix, so the output is deterministic.
    pub fn compute(matrix: &RatingMatrix) -> Self {
        let start = Instant::now();
        let num_movies = matrix.num_movies();
        let num_users = matrix.num_users();

        let norms: Vec<f64> = (0..num_movies)
            .map(|col| {
                let sum_sq: f64 = (0..num_users)
                    .map(|row| {
                        let v = matrix.value(row, col);
                        v * v
                    })
                    .sum();
                sum_sq.sqrt()
            })
            .collect();

        // Upper triangle, one row per movie, in parallel.
        let triangle: Vec<Vec<f64>> = (0..num_movies)
            .into_par_iter()
            .map(|i| {
                (i..num_movies)
                    .map(|j| {
                        if norms[i] == 0.0 || norms[j] == 0.0 {
                            0.0
                        } else if i == j {
                            1.0
                        } else {
                            let dot: f64 = (0..num_users)
                                .map(|row| matrix.value(row, i) * matrix.value(row, j))
                                .sum();
                            dot / (norms[i] * norms[j])
                        }
                    })
                    .collect()
            })
            .collect();

        // Mirror into the full symmetric matrix.
        let mut scores = vec![0.0f64; num_movies * num_movies];
        for (i, row) in triangle.iter().enumerate() {
            for (offset, &score) in row.iter().enumerate() {
                let j = i + offset;
                scores[i * num_movies + j] = score;
                scores[j * num_movies + i] = score;
            }
        }

        let movie_ids = matrix.movie_ids().to_vec();
        let index = movie_ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        debug!(
            "Computed {}x{} similarity matrix over {} users in {:?}",
            num_movies,
            num_movies,
            num_users,
            start.elapsed()
        );

        Self {
            scores,
            movie_ids,
            index,
        }
    }

    /// Similarity of two movies, identical for either argument order.
    ///
    /// Returns `None` if either id is absent from the index.
    pub fn score(&self, a: MovieId, b: MovieId) -> Option<f64> {
        let i = *self.index.get(&a)?;
        let j = *self.index.get(&b)?;
        Some(self.scores[i * self.movie_ids.len() + j])
    }

    /// Whether a movie id is present in the index
    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.index.contains_key(&movie_id)
    }

    /// The indexed movie ids, ascending
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    /// Number of indexed movies
    pub fn num_movies(&self) -> usize {
        self.movie_ids.len()
    }

    /// Full similarity row for a movie, in movie-id index order
    pub(crate) fn row(&self, movie_id: MovieId) -> Option<&[f64]> {
        let i = *self.index.get(&movie_id)?;
        let n = self.movie_ids.len();
        Some(&self.scores[i * n..(i + 1) * n])
    }
}
