//! Core domain types for the MovieLens 100K dataset.
//!
//! This module defines the fundamental data structures used throughout the
//! system:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - Rating and Movie records as they appear in `u.data` / `u.item`
//! - Dataset, the in-memory container handed to the engine

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user (1-943 in MovieLens 100K)
pub type UserId = u32;

/// Unique identifier for a movie (1-1682 in MovieLens 100K)
pub type MovieId = u32;

// =============================================================================
// Record Types
// =============================================================================

/// A single rating observation from `u.data`.
///
/// Small, copyable struct; ratings are stored at f32 and widened to f64
/// inside the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value from 1.0 to 5.0
    pub rating: f32,
    /// Unix timestamp when the rating was made
    pub timestamp: i64,
}

/// A movie from `u.item`.
///
/// Only id and title are kept; the remaining `u.item` columns (release
/// dates, genre flags) are unused by the similarity engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

/// Aggregate statistics for a single movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovieStats {
    pub avg_rating: f32,
    pub rating_count: usize,
}

/// Dataset-wide counts for display purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Number of distinct users appearing in the observations
    pub users: usize,
    /// Number of movies in the catalog
    pub movies: usize,
    /// Total number of rating observations
    pub ratings: usize,
}

// =============================================================================
// Dataset - The In-Memory Rating Store
// =============================================================================

/// Owns one snapshot of the MovieLens data: the movie catalog and the raw
/// rating observations.
///
/// Movies live in a `BTreeMap` so iteration order is stable across loads;
/// everything downstream (matrix layout, test comparisons) relies on that.
/// Methods hand out references; the engine never takes ownership of the data.
#[derive(Debug, Default)]
pub struct Dataset {
    pub(crate) movies: BTreeMap<MovieId, Movie>,
    pub(crate) ratings: Vec<Rating>,
}

impl Dataset {
    /// Creates a new, empty Dataset
    pub fn new() -> Self {
        Self {
            movies: BTreeMap::new(),
            ratings: Vec::new(),
        }
    }

    /// Assemble a dataset from already-parsed parts
    pub fn from_parts(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        let movies = movies.into_iter().map(|m| (m.id, m)).collect();
        Self { movies, ratings }
    }

    /// The movie catalog, keyed and iterated by ascending id
    pub fn movies(&self) -> &BTreeMap<MovieId, Movie> {
        &self.movies
    }

    /// All rating observations in file order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Resolve a title to a movie, case-insensitively.
    ///
    /// MovieLens 100K contains a handful of duplicate titles under distinct
    /// ids; the `BTreeMap` iteration order makes this resolve to the lowest
    /// id deterministically.
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.movies
            .values()
            .find(|m| m.title.eq_ignore_ascii_case(title))
    }

    /// Case-insensitive substring search over titles, ascending by id
    pub fn search_titles(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        self.movies
            .values()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Average rating and rating count for a movie.
    ///
    /// Returns `None` for a movie with no ratings (average undefined).
    pub fn movie_stats(&self, movie_id: MovieId) -> Option<MovieStats> {
        let mut sum = 0.0f32;
        let mut count = 0usize;
        for rating in &self.ratings {
            if rating.movie_id == movie_id {
                sum += rating.rating;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        Some(MovieStats {
            avg_rating: sum / count as f32,
            rating_count: count,
        })
    }

    /// Counts for the stats display: distinct users, catalog size, total
    /// observations
    pub fn stats(&self) -> DatasetStats {
        let users: HashSet<UserId> = self.ratings.iter().map(|r| r.user_id).collect();
        DatasetStats {
            users: users.len(),
            movies: self.movies.len(),
            ratings: self.ratings.len(),
        }
    }
}
