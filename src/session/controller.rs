//! Session controller: owns the UI state and turns user actions into
//! dispatches. Rendering reads snapshots of the state and never mutates it.

use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;
use tracing::error;

use super::state::{SessionState, SEARCH_FAILED_MESSAGE};
use crate::search::{RetrievalAlgorithm, SearchDispatch, SearchQuery, SearchResult, K_OPTIONS};

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("k must be one of 5, 10, 20 or 50, got {0}")]
    InvalidK(usize),
}

pub struct SessionController {
    dispatcher: Arc<dyn SearchDispatch>,
    state: SessionState,
}

impl SessionController {
    pub fn new(dispatcher: Arc<dyn SearchDispatch>) -> Self {
        Self::with_state(dispatcher, SessionState::default())
    }

    pub fn with_state(dispatcher: Arc<dyn SearchDispatch>, state: SessionState) -> Self {
        Self { dispatcher, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn set_algorithm1(&mut self, algorithm: RetrievalAlgorithm) {
        self.state.algorithm1 = algorithm;
    }

    pub fn set_algorithm2(&mut self, algorithm: RetrievalAlgorithm) {
        self.state.algorithm2 = algorithm;
    }

    /// The same k applies to both algorithms.
    pub fn set_k(&mut self, k: usize) -> Result<(), SessionError> {
        if !K_OPTIONS.contains(&k) {
            return Err(SessionError::InvalidK(k));
        }
        self.state.k = k;
        Ok(())
    }

    /// Runs a search for the current selection.
    ///
    /// Blank input is ignored. In comparison mode both algorithms run
    /// concurrently and their results are applied together or not at all.
    pub async fn submit_search(&mut self, raw_query: &str) {
        let query = raw_query.trim();
        if query.is_empty() {
            return;
        }

        self.state.is_loading = true;
        self.state.error = None;
        self.state.last_query = query.to_string();

        let outcome = self.run_search(query).await;
        match outcome {
            Ok((result1, result2)) => {
                self.state.result1 = Some(result1);
                self.state.result2 = result2;
            }
            Err(err) => {
                error!("Search for '{}' failed: {:#}", query, err);
                self.state.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
        }

        self.state.is_loading = false;
    }

    async fn run_search(&self, query: &str) -> Result<(SearchResult, Option<SearchResult>)> {
        let k = self.state.k;
        let first = SearchQuery::new(query, self.state.algorithm1, k)?;

        if !self.state.comparison_mode {
            let result = self.dispatcher.search(&first).await?;
            return Ok((result, None));
        }

        let second = SearchQuery::new(query, self.state.algorithm2, k)?;
        let (result1, result2) = futures::try_join!(
            self.dispatcher.search(&first),
            self.dispatcher.search(&second)
        )?;
        Ok((result1, Some(result2)))
    }

    /// Switches between single and comparison view.
    ///
    /// Entering comparison mode after a search with no second result yet
    /// loads the second algorithm for the last query. A failure there is only
    /// logged, the error banner is left alone.
    pub async fn toggle_comparison(&mut self) {
        self.state.comparison_mode = !self.state.comparison_mode;

        if !self.state.comparison_mode
            || self.state.last_query.is_empty()
            || self.state.result2.is_some()
        {
            return;
        }

        self.state.is_loading = true;
        match self.load_second_result().await {
            Ok(result) => self.state.result2 = Some(result),
            Err(err) => error!("Failed to load second algorithm results: {:#}", err),
        }
        self.state.is_loading = false;
    }

    async fn load_second_result(&self) -> Result<SearchResult> {
        let query = SearchQuery::new(
            self.state.last_query.as_str(),
            self.state.algorithm2,
            self.state.k,
        )?;
        self.dispatcher.search(&query).await
    }
}
