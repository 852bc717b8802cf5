use crate::search::{RetrievalAlgorithm, SearchResult, DEFAULT_K};

/// Message shown when a search cannot produce results. Error details only go
/// to the log.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

/// Snapshot of everything the renderer needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub comparison_mode: bool,
    pub algorithm1: RetrievalAlgorithm,
    pub algorithm2: RetrievalAlgorithm,
    pub k: usize,
    pub is_loading: bool,
    pub result1: Option<SearchResult>,
    pub result2: Option<SearchResult>,
    pub error: Option<String>,
    pub last_query: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            comparison_mode: false,
            algorithm1: RetrievalAlgorithm::Lyrics,
            algorithm2: RetrievalAlgorithm::Random,
            k: DEFAULT_K,
            is_loading: false,
            result1: None,
            result2: None,
            error: None,
            last_query: String::new(),
        }
    }
}

impl SessionState {
    pub fn has_results(&self) -> bool {
        self.result1.is_some() || self.result2.is_some()
    }
}
