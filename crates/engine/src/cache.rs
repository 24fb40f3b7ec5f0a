//! The similarity result cache.
//!
//! Building a similarity matrix is the expensive step of the engine, so the
//! cache memoizes Builder + Engine output per dataset snapshot. The cache is
//! an explicit object owned by the composing application; there is no
//! process-wide state.
//!
//! ## Concurrency
//! The cache guarantees at-most-one concurrent build per snapshot key: each
//! key owns a slot protected by its own mutex, and a build runs while the
//! slot lock is held. Callers racing on the same uncomputed key queue on the
//! slot lock and find the published matrix when they acquire it. The outer
//! map lock is only held long enough to fetch or insert a slot, so builds
//! for different keys proceed in parallel.

use crate::error::Result;
use crate::matrix::RatingMatrix;
use crate::similarity::SimilarityMatrix;
use data_loader::{Movie, MovieId, Rating};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

type Slot = Arc<Mutex<Option<Arc<SimilarityMatrix>>>>;

/// Snapshot-keyed cache of computed similarity matrices.
///
/// Keys identify one fixed view of the source data (for example a
/// fingerprint of the data directory). A new key always forces a fresh
/// build; a stale matrix is never reused across different underlying data.
#[derive(Debug, Default)]
pub struct SimilarityCache {
    entries: Mutex<HashMap<String, Slot>>,
    builds: AtomicU64,
}

impl SimilarityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the similarity matrix for `snapshot_key`, building it on the
    /// first call.
    ///
    /// A failed build is not stored: the error propagates to the caller and
    /// the next call for the same key retries from scratch.
    pub fn get_or_build(
        &self,
        snapshot_key: &str,
        ratings: &[Rating],
        movies: &BTreeMap<MovieId, Movie>,
    ) -> Result<Arc<SimilarityMatrix>> {
        let slot = {
            let mut entries = self.entries.lock().unwrap();
            entries.entry(snapshot_key.to_string()).or_default().clone()
        };

        // Holding the slot lock across the build is the single-flight
        // guarantee: racing callers block here and see the published matrix.
        let mut guard = slot.lock().unwrap();
        if let Some(matrix) = guard.as_ref() {
            debug!("Similarity cache hit for snapshot {snapshot_key}");
            return Ok(Arc::clone(matrix));
        }

        info!("Similarity cache miss for snapshot {snapshot_key}, building");
        self.builds.fetch_add(1, Ordering::Relaxed);

        let matrix = RatingMatrix::build(ratings, movies)?;
        let similarity = Arc::new(SimilarityMatrix::compute(&matrix));
        *guard = Some(Arc::clone(&similarity));
        Ok(similarity)
    }

    /// Drop one snapshot's cached matrix. Returns whether an entry existed.
    pub fn invalidate(&self, snapshot_key: &str) -> bool {
        self.entries.lock().unwrap().remove(snapshot_key).is_some()
    }

    /// Drop every cached matrix
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of builds actually executed, for tests and diagnostics
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }
}
