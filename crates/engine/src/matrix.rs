//! The rating matrix builder.
//!
//! Turns raw (user, movie, rating) observations into a dense user × movie
//! matrix, the input of the similarity pass. The build is a pure
//! transformation: identical input always produces an identical matrix, and
//! a snapshot is rebuilt from scratch rather than mutated when the source
//! data changes.

use crate::error::{EngineError, Result};
use data_loader::{Movie, MovieId, Rating, UserId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Dense user × movie rating matrix for one dataset snapshot.
///
/// Rows are the distinct users of the observation set, columns the distinct
/// rated movies, both sorted by ascending id so the layout is reproducible.
/// Pairs with no observation hold 0.0.
///
/// ## Design Note
/// Zero-filling makes "not rated" indistinguishable from "rated zero"
/// downstream. That is a documented approximation carried over from the
/// data model, not a bug: it skews cosine similarity toward movies rated by
/// overlapping user sets. Values are widened to f64 here so the similarity
/// pass runs entirely in double precision.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    /// Row-major values, `num_users × num_movies`
    values: Vec<f64>,
    user_ids: Vec<UserId>,
    movie_ids: Vec<MovieId>,
}

impl RatingMatrix {
    /// Build the matrix from raw observations.
    ///
    /// # Arguments
    /// * `ratings` - The observations; may be empty, which yields a 0 × 0
    ///   matrix
    /// * `movies` - The catalog; every observation must reference a known
    ///   movie id
    ///
    /// # Errors
    /// `EngineError::UnknownMovie` if an observation references a movie id
    /// absent from the catalog.
    ///
    /// Duplicate (user, movie) observations resolve to the mean of their
    /// rating values.
    pub fn build(ratings: &[Rating], movies: &BTreeMap<MovieId, Movie>) -> Result<Self> {
        for rating in ratings {
            if !movies.contains_key(&rating.movie_id) {
                return Err(EngineError::UnknownMovie {
                    movie_id: rating.movie_id,
                    user_id: rating.user_id,
                });
            }
        }

        // Sorted id sets give a stable row/column layout across rebuilds.
        let user_ids: Vec<UserId> = ratings
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let movie_ids: Vec<MovieId> = ratings
            .iter()
            .map(|r| r.movie_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index: HashMap<UserId, usize> = user_ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();
        let movie_index: HashMap<MovieId, usize> = movie_ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let num_movies = movie_ids.len();
        let mut sums = vec![0.0f64; user_ids.len() * num_movies];
        let mut counts = vec![0u32; user_ids.len() * num_movies];

        for rating in ratings {
            let row = user_index[&rating.user_id];
            let col = movie_index[&rating.movie_id];
            sums[row * num_movies + col] += f64::from(rating.rating);
            counts[row * num_movies + col] += 1;
        }

        let values = sums
            .into_iter()
            .zip(counts)
            .map(|(sum, count)| if count > 0 { sum / f64::from(count) } else { 0.0 })
            .collect();

        Ok(Self {
            values,
            user_ids,
            movie_ids,
        })
    }

    /// Number of distinct users (rows)
    pub fn num_users(&self) -> usize {
        self.user_ids.len()
    }

    /// Number of distinct rated movies (columns)
    pub fn num_movies(&self) -> usize {
        self.movie_ids.len()
    }

    /// The column movie ids, ascending
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    /// The row user ids, ascending
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    /// Rating value at (row, column) position
    pub fn value(&self, user_idx: usize, movie_idx: usize) -> f64 {
        self.values[user_idx * self.movie_ids.len() + movie_idx]
    }
}
