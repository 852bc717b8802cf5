pub mod backend;
pub mod dispatcher;
pub mod embed;
pub mod metrics;
pub mod models;
pub mod reference;
pub mod synthesis;

pub use backend::{BackendError, HttpScoringClient, RemoteHit, ScoringBackend};
pub use dispatcher::{QueryDispatcher, SearchDispatch};
pub use embed::youtube_embed_url;
pub use models::{
    Metrics, ModelError, ResultOrigin, RetrievalAlgorithm, SearchQuery, SearchResult, Track,
    DEFAULT_K, K_OPTIONS,
};
pub use synthesis::SynthesisError;
