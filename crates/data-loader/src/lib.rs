//! # Data Loader Crate
//!
//! This crate handles loading the MovieLens 100K dataset and serving it to
//! the recommendation engine.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Rating, Movie, Dataset)
//! - **parser**: Parse `u.data` / `u.item` into Rust structs
//! - **index**: Assemble a Dataset snapshot from a data directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! // Load one dataset snapshot
//! let dataset = Dataset::load_from_files(Path::new("data/ml-100k"))?;
//!
//! // Query data
//! let movie = dataset.find_by_title("Toy Story (1995)").unwrap();
//! let stats = dataset.stats();
//!
//! println!("{} users rated {} movies", stats.users, stats.movies);
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Dataset, DatasetStats, Movie, MovieId, MovieStats, Rating, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> Dataset {
        let movies = vec![
            Movie {
                id: 1,
                title: "Toy Story (1995)".to_string(),
            },
            Movie {
                id: 2,
                title: "GoldenEye (1995)".to_string(),
            },
            Movie {
                id: 3,
                title: "Four Rooms (1995)".to_string(),
            },
        ];
        let ratings = vec![
            Rating {
                user_id: 1,
                movie_id: 1,
                rating: 5.0,
                timestamp: 881250949,
            },
            Rating {
                user_id: 1,
                movie_id: 2,
                rating: 3.0,
                timestamp: 881250950,
            },
            Rating {
                user_id: 2,
                movie_id: 1,
                rating: 4.0,
                timestamp: 881250951,
            },
        ];
        Dataset::from_parts(movies, ratings)
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new();
        let stats = dataset.stats();

        assert_eq!(stats.users, 0);
        assert_eq!(stats.movies, 0);
        assert_eq!(stats.ratings, 0);
    }

    #[test]
    fn test_stats_counts_distinct_users() {
        let dataset = sample_dataset();
        let stats = dataset.stats();

        assert_eq!(stats.users, 2);
        assert_eq!(stats.movies, 3);
        assert_eq!(stats.ratings, 3);
    }

    #[test]
    fn test_find_by_title_is_case_insensitive() {
        let dataset = sample_dataset();

        let movie = dataset.find_by_title("toy story (1995)").unwrap();
        assert_eq!(movie.id, 1);

        assert!(dataset.find_by_title("No Such Movie").is_none());
    }

    #[test]
    fn test_find_by_title_prefers_lowest_id_on_duplicates() {
        let movies = vec![
            Movie {
                id: 9,
                title: "Sliding Doors (1998)".to_string(),
            },
            Movie {
                id: 4,
                title: "Sliding Doors (1998)".to_string(),
            },
        ];
        let dataset = Dataset::from_parts(movies, Vec::new());

        let movie = dataset.find_by_title("Sliding Doors (1998)").unwrap();
        assert_eq!(movie.id, 4);
    }

    #[test]
    fn test_search_titles() {
        let dataset = sample_dataset();

        let hits = dataset.search_titles("1995");
        assert_eq!(hits.len(), 3);

        let hits = dataset.search_titles("golden");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_movie_stats() {
        let dataset = sample_dataset();

        let stats = dataset.movie_stats(1).unwrap();
        assert_eq!(stats.rating_count, 2);
        assert!((stats.avg_rating - 4.5).abs() < 1e-6);

        assert!(dataset.movie_stats(3).is_none());
    }
}
