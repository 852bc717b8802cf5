//! Routes search requests either to the scoring service or to local synthesis,
//! and normalizes whatever comes back into a [`SearchResult`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::backend::{BackendError, HttpScoringClient, ScoringBackend};
use super::metrics::derive_metrics;
use super::models::{ResultOrigin, RetrievalAlgorithm, SearchQuery, SearchResult, Track};
use super::reference;
use super::synthesis::{synthesize, SynthesisError};
use crate::config::AppConfig;

/// Anything able to answer a [`SearchQuery`].
///
/// The session controller only talks to this trait, which keeps it testable
/// without a network.
#[async_trait]
pub trait SearchDispatch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchResult>;
}

pub struct QueryDispatcher {
    backend: Arc<dyn ScoringBackend>,
    force_local: bool,
}

impl QueryDispatcher {
    pub fn new(backend: Arc<dyn ScoringBackend>, force_local: bool) -> Self {
        Self {
            backend,
            force_local,
        }
    }

    /// Dispatcher backed by the HTTP scoring client described by `config`.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = HttpScoringClient::new(&config.backend_url, config.request_timeout_sec)?;
        Ok(Self::new(Arc::new(client), config.use_mock))
    }

    fn uses_local_synthesis(&self, algorithm: RetrievalAlgorithm) -> bool {
        self.force_local || algorithm == RetrievalAlgorithm::Random
    }

    /// Resolves a query into a result.
    ///
    /// Failures of the scoring service are logged and replaced by a
    /// synthesized result, so the only error that can reach the caller is a
    /// failure of local synthesis itself.
    pub async fn dispatch(&self, query: &SearchQuery) -> Result<SearchResult, SynthesisError> {
        if self.uses_local_synthesis(query.algorithm) {
            info!("Using local synthesis for {}", query.algorithm);
            return synthesize(
                &query.query,
                query.algorithm,
                query.k,
                ResultOrigin::LocalSynthesis,
            );
        }

        match self.dispatch_remote(query).await {
            Ok(result) => Ok(result),
            Err(err) => {
                error!(
                    "Scoring service failed, falling back to local synthesis: {}",
                    err
                );
                synthesize(&query.query, query.algorithm, query.k, ResultOrigin::Fallback)
            }
        }
    }

    async fn dispatch_remote(&self, query: &SearchQuery) -> Result<SearchResult, BackendError> {
        let hits = self.backend.search(&query.query, query.k).await?;

        let mut retrieved_tracks: Vec<Track> = hits.into_iter().map(|h| h.into_track()).collect();
        if retrieved_tracks.len() > query.k {
            debug!(
                "Scoring service returned {} hits for k = {}, truncating",
                retrieved_tracks.len(),
                query.k
            );
            retrieved_tracks.truncate(query.k);
        }

        // The service has no notion of a query track, so a local match is
        // only reported, never attached.
        if let Some(candidate) = reference::find_match(&query.query) {
            debug!(
                "Reference match '{} - {}' not attached to remote result",
                candidate.artist, candidate.track
            );
        }

        let metrics = derive_metrics(&retrieved_tracks, query.k, &mut rand::rng());

        Ok(SearchResult {
            query_track: None,
            retrieved_tracks,
            algorithm: query.algorithm,
            k: query.k,
            metrics: Some(metrics),
            origin: ResultOrigin::Remote,
        })
    }
}

#[async_trait]
impl SearchDispatch for QueryDispatcher {
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchResult> {
        Ok(self.dispatch(query).await?)
    }
}
