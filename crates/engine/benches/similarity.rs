//! Benchmarks for the similarity engine.
//!
//! Run with: cargo bench --package engine
//!
//! Uses a synthetic rating set so the bench has no data files to load. The
//! similarity pass is quadratic in movies, so the movie count dominates.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Movie, Rating};
use engine::{RatingMatrix, SimilarityMatrix};
use std::collections::BTreeMap;

/// Deterministic synthetic observations: every user rates roughly a third
/// of the movies, values cycling through 1.0..=5.0.
fn synthetic_data(num_users: u32, num_movies: u32) -> (Vec<Rating>, BTreeMap<u32, Movie>) {
    let movies: BTreeMap<u32, Movie> = (1..=num_movies)
        .map(|id| {
            (
                id,
                Movie {
                    id,
                    title: format!("Movie {id}"),
                },
            )
        })
        .collect();

    let mut ratings = Vec::new();
    for user_id in 1..=num_users {
        for movie_id in 1..=num_movies {
            if (user_id + movie_id) % 3 == 0 {
                ratings.push(Rating {
                    user_id,
                    movie_id,
                    rating: ((user_id * movie_id) % 5 + 1) as f32,
                    timestamp: 0,
                });
            }
        }
    }
    (ratings, movies)
}

fn bench_matrix_build(c: &mut Criterion) {
    let (ratings, movies) = synthetic_data(500, 200);

    c.bench_function("rating_matrix_build_500x200", |b| {
        b.iter(|| {
            let matrix = RatingMatrix::build(black_box(&ratings), black_box(&movies)).unwrap();
            black_box(matrix)
        })
    });
}

fn bench_similarity_compute(c: &mut Criterion) {
    let (ratings, movies) = synthetic_data(500, 200);
    let matrix = RatingMatrix::build(&ratings, &movies).unwrap();

    c.bench_function("similarity_compute_500x200", |b| {
        b.iter(|| {
            let similarity = SimilarityMatrix::compute(black_box(&matrix));
            black_box(similarity)
        })
    });
}

criterion_group!(benches, bench_matrix_build, bench_similarity_compute);
criterion_main!(benches);
