//! # Engine Crate
//!
//! Item-based collaborative filtering over MovieLens ratings.
//!
//! ## Main Components
//!
//! - **matrix**: Build the dense user × movie rating matrix
//! - **similarity**: Compute the symmetric cosine similarity matrix
//! - **recommend**: Answer top-N similar-movie queries deterministically
//! - **cache**: Memoize Builder + Engine output per dataset snapshot
//! - **error**: Error types for the engine
//!
//! ## Data Flow
//!
//! ratings + catalog → `RatingMatrix::build` → `SimilarityMatrix::compute`
//! → (cached in `SimilarityCache`) → `Recommender::recommend`
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::{Recommender, SimilarityCache};
//!
//! let cache = SimilarityCache::new();
//! let similarity = cache.get_or_build("ml-100k", dataset.ratings(), dataset.movies())?;
//!
//! let recommender = Recommender::new(similarity);
//! for rec in recommender.recommend(movie_id, 5)? {
//!     println!("{} ({:.3})", rec.movie_id, rec.score);
//! }
//! ```

// Public modules
pub mod cache;
pub mod error;
pub mod matrix;
pub mod recommend;
pub mod similarity;

// Re-export commonly used types for convenience
pub use cache::SimilarityCache;
pub use error::{EngineError, Result};
pub use matrix::RatingMatrix;
pub use recommend::{Recommendation, Recommender};
pub use similarity::SimilarityMatrix;
