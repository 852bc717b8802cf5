//! Deterministic offline results.
//!
//! Used for the random baseline, when local mode is forced, and as the
//! fallback whenever the scoring service cannot be reached. The output is a
//! pure function of (query text, algorithm, k): the three inputs are hashed
//! into the seed of the generator.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::metrics::{coverage_at_k, pop_at_k};
use super::models::{Metrics, ResultOrigin, RetrievalAlgorithm, SearchResult, Track};
use super::reference;

const SIMILARITY_STD_DEV: f64 = 0.12;
const METRIC_STD_DEV: f64 = 0.04;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Cannot synthesize results for k = 0")]
    ZeroK,

    #[error("Invalid score distribution: {0}")]
    Distribution(#[from] NormalError),
}

/// Typical similarity level each algorithm reaches on the demo dataset.
fn quality_level(algorithm: RetrievalAlgorithm) -> f64 {
    match algorithm {
        RetrievalAlgorithm::Random => 0.2,
        RetrievalAlgorithm::Video => 0.5,
        RetrievalAlgorithm::Lyrics => 0.55,
        RetrievalAlgorithm::Audio => 0.6,
        RetrievalAlgorithm::EarlyFusion => 0.65,
        RetrievalAlgorithm::LateFusion => 0.68,
        RetrievalAlgorithm::NeuralNetwork => 0.75,
    }
}

fn seeded_rng(query: &str, algorithm: RetrievalAlgorithm, k: usize) -> StdRng {
    let mut hasher = Sha256::new();
    hasher.update(query.trim().to_lowercase().as_bytes());
    hasher.update([0u8]);
    hasher.update(algorithm.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update((k as u64).to_le_bytes());
    let seed: [u8; 32] = hasher.finalize().into();
    StdRng::from_seed(seed)
}

fn draw_similarities(
    algorithm: RetrievalAlgorithm,
    count: usize,
    rng: &mut StdRng,
) -> Result<Vec<f64>, SynthesisError> {
    let mut scores: Vec<f64> = if algorithm == RetrievalAlgorithm::Random {
        (0..count).map(|_| rng.random::<f64>()).collect()
    } else {
        let normal = Normal::new(quality_level(algorithm), SIMILARITY_STD_DEV)?;
        (0..count)
            .map(|_| normal.sample(rng).clamp(0.0, 1.0))
            .collect()
    };
    scores.sort_by(|a, b| b.total_cmp(a));
    Ok(scores)
}

fn draw_metrics(
    algorithm: RetrievalAlgorithm,
    k: usize,
    rng: &mut StdRng,
) -> Result<Metrics, SynthesisError> {
    let quality = quality_level(algorithm);
    let mut around = |center: f64| -> Result<f64, SynthesisError> {
        let normal = Normal::new(center, METRIC_STD_DEV)?;
        Ok(normal.sample(rng).clamp(0.0, 1.0))
    };
    let precision_at_k = around(quality * 0.9)?;
    let recall_at_k = around(quality * 0.7)?;
    let mrr_at_k = around(quality * 1.1)?;
    let ndcg_at_k = around(quality)?;

    Ok(Metrics {
        precision_at_k,
        recall_at_k,
        mrr_at_k,
        ndcg_at_k,
        coverage_at_k: coverage_at_k(k),
        pop_at_k: pop_at_k(rng),
    })
}

/// Fills `k` slots from the reference catalog, skipping the query track.
/// When `k` is larger than the pool, further reshuffled passes are appended
/// with a `-r{pass}` id suffix.
fn pick_tracks(exclude_id: &str, k: usize, rng: &mut StdRng) -> Vec<Track> {
    let pool: Vec<Track> = reference::tracks()
        .into_iter()
        .filter(|t| t.id != exclude_id)
        .collect();
    if pool.is_empty() {
        return Vec::new();
    }

    let mut picked = Vec::with_capacity(k);
    let mut pass = 0usize;
    while picked.len() < k {
        let mut round = pool.clone();
        round.shuffle(rng);
        for mut track in round.into_iter().take(k - picked.len()) {
            if pass > 0 {
                track.id = format!("{}-r{}", track.id, pass);
            }
            picked.push(track);
        }
        pass += 1;
    }
    picked
}

/// Builds a plausible result without contacting the scoring service.
pub fn synthesize(
    query: &str,
    algorithm: RetrievalAlgorithm,
    k: usize,
    origin: ResultOrigin,
) -> Result<SearchResult, SynthesisError> {
    if k == 0 {
        return Err(SynthesisError::ZeroK);
    }
    let mut rng = seeded_rng(query, algorithm, k);

    let query_track = match reference::find_match(query) {
        Some(track) => track,
        None => {
            let catalog = reference::tracks();
            let index = rng.random_range(0..catalog.len());
            catalog[index].clone()
        }
    };

    let mut retrieved_tracks = pick_tracks(&query_track.id, k, &mut rng);
    let scores = draw_similarities(algorithm, retrieved_tracks.len(), &mut rng)?;
    for (track, score) in retrieved_tracks.iter_mut().zip(scores) {
        track.similarity = Some(score);
    }

    let metrics = draw_metrics(algorithm, k, &mut rng)?;

    Ok(SearchResult {
        query_track: Some(query_track),
        retrieved_tracks,
        algorithm,
        k,
        metrics: Some(metrics),
        origin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::models::K_OPTIONS;
    use std::collections::HashSet;

    #[test]
    fn test_random_coldplay_example() {
        let result = synthesize(
            "coldplay",
            RetrievalAlgorithm::Random,
            10,
            ResultOrigin::LocalSynthesis,
        )
        .unwrap();

        assert_eq!(result.retrieved_tracks.len(), 10);
        assert!(result.retrieved_tracks.iter().all(|t| t.similarity.is_some()));
        assert_eq!(result.query_track.as_ref().unwrap().artist, "Coldplay");
        let metrics = result.metrics.unwrap();
        for value in [
            metrics.precision_at_k,
            metrics.recall_at_k,
            metrics.mrr_at_k,
            metrics.ndcg_at_k,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert!((60.0..90.0).contains(&metrics.pop_at_k));
    }

    #[test]
    fn test_exactly_k_tracks_for_every_option() {
        for algorithm in RetrievalAlgorithm::ALL {
            for k in K_OPTIONS {
                let result =
                    synthesize("radiohead", algorithm, k, ResultOrigin::Fallback).unwrap();
                assert_eq!(result.retrieved_tracks.len(), k);
                assert_eq!(result.k, k);

                let ids: HashSet<&str> =
                    result.retrieved_tracks.iter().map(|t| t.id.as_str()).collect();
                assert_eq!(ids.len(), k, "duplicate ids for k = {}", k);

                let query_id = &result.query_track.as_ref().unwrap().id;
                assert!(result.retrieved_tracks.iter().all(|t| &t.id != query_id));
            }
        }
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let first = synthesize("blue", RetrievalAlgorithm::Audio, 20, ResultOrigin::Fallback);
        let second = synthesize("blue", RetrievalAlgorithm::Audio, 20, ResultOrigin::Fallback);
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn test_different_algorithms_produce_different_results() {
        let lyrics = synthesize("blue", RetrievalAlgorithm::Lyrics, 10, ResultOrigin::Fallback)
            .unwrap();
        let audio =
            synthesize("blue", RetrievalAlgorithm::Audio, 10, ResultOrigin::Fallback).unwrap();
        assert_ne!(lyrics.retrieved_tracks, audio.retrieved_tracks);
    }

    #[test]
    fn test_similarities_are_relevance_ordered() {
        let result = synthesize(
            "night",
            RetrievalAlgorithm::NeuralNetwork,
            50,
            ResultOrigin::LocalSynthesis,
        )
        .unwrap();
        let scores: Vec<f64> = result
            .retrieved_tracks
            .iter()
            .map(|t| t.similarity.unwrap())
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_zero_k_is_rejected() {
        let result = synthesize("x", RetrievalAlgorithm::Lyrics, 0, ResultOrigin::Fallback);
        assert!(matches!(result, Err(SynthesisError::ZeroK)));
    }
}
