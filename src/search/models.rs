//! Core types shared by the dispatcher, the session controller and the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Result counts offered by the client, the first selectable values of k.
pub const K_OPTIONS: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_K: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Unknown retrieval algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("k must be a positive number of results")]
    ZeroK,
}

// =============================================================================
// Retrieval Algorithm
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum RetrievalAlgorithm {
    Random,
    Lyrics,
    Audio,
    Video,
    EarlyFusion,
    LateFusion,
    NeuralNetwork,
}

impl RetrievalAlgorithm {
    pub const ALL: [RetrievalAlgorithm; 7] = [
        RetrievalAlgorithm::Random,
        RetrievalAlgorithm::Lyrics,
        RetrievalAlgorithm::Audio,
        RetrievalAlgorithm::Video,
        RetrievalAlgorithm::EarlyFusion,
        RetrievalAlgorithm::LateFusion,
        RetrievalAlgorithm::NeuralNetwork,
    ];

    /// The wire tag, as used in JSON and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalAlgorithm::Random => "random",
            RetrievalAlgorithm::Lyrics => "lyrics",
            RetrievalAlgorithm::Audio => "audio",
            RetrievalAlgorithm::Video => "video",
            RetrievalAlgorithm::EarlyFusion => "early_fusion",
            RetrievalAlgorithm::LateFusion => "late_fusion",
            RetrievalAlgorithm::NeuralNetwork => "neural_network",
        }
    }

    /// Human readable name shown in result panel headers.
    pub fn label(&self) -> &'static str {
        match self {
            RetrievalAlgorithm::Random => "Random Baseline",
            RetrievalAlgorithm::Lyrics => "Lyrics-based",
            RetrievalAlgorithm::Audio => "Audio-based",
            RetrievalAlgorithm::Video => "Video-based",
            RetrievalAlgorithm::EarlyFusion => "Early Fusion",
            RetrievalAlgorithm::LateFusion => "Late Fusion",
            RetrievalAlgorithm::NeuralNetwork => "Neural Network",
        }
    }
}

impl fmt::Display for RetrievalAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalAlgorithm {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        RetrievalAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownAlgorithm(s.to_string()))
    }
}

// =============================================================================
// Query and Results
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub algorithm: RetrievalAlgorithm,
    pub k: usize,
}

impl SearchQuery {
    pub fn new(
        query: impl Into<String>,
        algorithm: RetrievalAlgorithm,
        k: usize,
    ) -> Result<Self, ModelError> {
        if k == 0 {
            return Err(ModelError::ZeroK);
        }
        Ok(Self {
            query: query.into(),
            algorithm,
            k,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub artist: String,
    pub track: String,
    pub album: String,
    pub youtube_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub precision_at_k: f64,
    pub recall_at_k: f64,
    pub mrr_at_k: f64,
    pub ndcg_at_k: f64,
    pub coverage_at_k: f64,
    pub pop_at_k: f64,
}

/// Which path produced a [`SearchResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrigin {
    /// Tracks came from the scoring service, metrics are derived estimates.
    Remote,
    /// Synthesized locally by policy (random baseline or forced local mode).
    LocalSynthesis,
    /// Synthesized locally because the scoring service call failed.
    Fallback,
}

impl ResultOrigin {
    pub fn is_synthesized(&self) -> bool {
        !matches!(self, ResultOrigin::Remote)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_track: Option<Track>,
    pub retrieved_tracks: Vec<Track>,
    pub algorithm: RetrievalAlgorithm,
    pub k: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    pub origin: ResultOrigin,
}
