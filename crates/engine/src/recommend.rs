//! The recommendation query service.
//!
//! Answers "top-N most similar movies" against a computed
//! [`SimilarityMatrix`]. Queries are pure reads over the immutable matrix,
//! so a `Recommender` can be shared across threads freely.

use crate::error::{EngineError, Result};
use crate::similarity::SimilarityMatrix;
use data_loader::MovieId;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// One recommended movie with its similarity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub score: f64,
}

/// Read-only query service over one similarity matrix snapshot
#[derive(Debug, Clone)]
pub struct Recommender {
    similarity: Arc<SimilarityMatrix>,
}

impl Recommender {
    pub fn new(similarity: Arc<SimilarityMatrix>) -> Self {
        Self { similarity }
    }

    /// Top `limit` movies most similar to `movie_id`, best first.
    ///
    /// ## Algorithm
    /// 1. Read the similarity row for the query movie
    /// 2. Drop the self entry
    /// 3. Sort by score descending, ties broken by ascending movie id
    /// 4. Truncate to `limit`
    ///
    /// The tie-break makes the ordering a total order, so two identical
    /// queries always return identically ordered results. Fewer than
    /// `limit` entries come back when fewer other movies exist; that is
    /// not an error.
    ///
    /// # Errors
    /// * `EngineError::InvalidLimit` if `limit` is 0
    /// * `EngineError::MovieNotFound` if the movie is not in the index
    pub fn recommend(&self, movie_id: MovieId, limit: usize) -> Result<Vec<Recommendation>> {
        if limit == 0 {
            return Err(EngineError::InvalidLimit(limit));
        }
        let row = self
            .similarity
            .row(movie_id)
            .ok_or(EngineError::MovieNotFound(movie_id))?;

        let mut scored: Vec<Recommendation> = self
            .similarity
            .movie_ids()
            .iter()
            .zip(row)
            .filter(|&(&other, _)| other != movie_id)
            .map(|(&other, &score)| Recommendation {
                movie_id: other,
                score,
            })
            .collect();

        // Scores are guarded against NaN upstream, so total_cmp only has to
        // provide the total order for the tie-break.
        scored.sort_unstable_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.movie_id.cmp(&b.movie_id))
        });
        scored.truncate(limit);

        debug!(
            "Query for movie {} returned {} of up to {} recommendations",
            movie_id,
            scored.len(),
            limit
        );
        Ok(scored)
    }

    /// The similarity matrix this service reads from
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::RatingMatrix;
    use data_loader::{Movie, Rating};
    use std::collections::BTreeMap;

    fn recommender(ratings: &[(u32, u32, f32)]) -> Recommender {
        let movies: BTreeMap<u32, Movie> = ratings
            .iter()
            .map(|&(_, id, _)| {
                (
                    id,
                    Movie {
                        id,
                        title: format!("Movie {id}"),
                    },
                )
            })
            .collect();
        let ratings: Vec<Rating> = ratings
            .iter()
            .map(|&(user_id, movie_id, rating)| Rating {
                user_id,
                movie_id,
                rating,
                timestamp: 0,
            })
            .collect();
        let matrix = RatingMatrix::build(&ratings, &movies).unwrap();
        Recommender::new(Arc::new(SimilarityMatrix::compute(&matrix)))
    }

    // Movies 1 (A), 2 (B), 3 (C): A and B overlap through user 1, A and C
    // share no positive co-ratings.
    fn abc_fixture() -> Recommender {
        recommender(&[
            (1, 1, 5.0),
            (1, 2, 3.0),
            (1, 3, 0.0),
            (2, 1, 4.0),
            (2, 2, 0.0),
            (2, 3, 0.0),
            (3, 1, 0.0),
            (3, 2, 0.0),
            (3, 3, 5.0),
        ])
    }

    #[test]
    fn test_overlapping_movie_ranks_first() {
        let recs = abc_fixture().recommend(1, 2).unwrap();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].movie_id, 2);
        assert_eq!(recs[1].movie_id, 3);
        assert!(recs[0].score > recs[1].score);
    }

    #[test]
    fn test_never_recommends_the_query_movie() {
        let recs = abc_fixture().recommend(1, 10).unwrap();

        assert!(recs.iter().all(|r| r.movie_id != 1));
    }

    #[test]
    fn test_truncates_to_limit() {
        let recs = abc_fixture().recommend(1, 1).unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_returns_fewer_when_fewer_exist() {
        let recs = abc_fixture().recommend(1, 50).unwrap();
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_ties_break_by_ascending_movie_id() {
        // Movies 20 and 30 have identical columns, so identical similarity
        // to movie 10.
        let service = recommender(&[
            (1, 10, 5.0),
            (1, 20, 4.0),
            (1, 30, 4.0),
            (2, 20, 2.0),
            (2, 30, 2.0),
        ]);
        let recs = service.recommend(10, 2).unwrap();

        assert_eq!(recs[0].score, recs[1].score);
        assert_eq!(recs[0].movie_id, 20);
        assert_eq!(recs[1].movie_id, 30);
    }

    #[test]
    fn test_identical_queries_return_identical_output() {
        let service = abc_fixture();

        let first = service.recommend(1, 2).unwrap();
        let second = service.recommend(1, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_movie_is_not_found() {
        let err = abc_fixture().recommend(99, 5).unwrap_err();
        assert!(matches!(err, EngineError::MovieNotFound(99)));
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let err = abc_fixture().recommend(1, 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidLimit(0)));
    }

    #[test]
    fn test_degenerate_movie_never_outranks_real_overlap() {
        // Movie 3's only rating is 0.0: degenerate column.
        let service = recommender(&[(1, 1, 5.0), (1, 2, 4.0), (1, 3, 0.0), (2, 3, 0.0)]);
        let recs = service.recommend(1, 2).unwrap();

        assert_eq!(recs[0].movie_id, 2);
        assert_eq!(recs[1].movie_id, 3);
        assert_eq!(recs[1].score, 0.0);
    }
}
