//! Music Retrieval Client Library
//!
//! Terminal front-end for the music retrieval demo: dispatches queries to the
//! remote scoring service (or synthesizes results offline), keeps the session
//! state and renders result panels.

pub mod cli_style;
pub mod config;
pub mod render;
pub mod search;
pub mod session;
pub mod shell;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig};
pub use search::{
    HttpScoringClient, QueryDispatcher, RetrievalAlgorithm, SearchDispatch, SearchQuery,
    SearchResult,
};
pub use session::{SessionController, SessionState};
