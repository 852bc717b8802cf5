//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{complete_hits, Behavior, TestScoringServer};
//!
//! #[tokio::test]
//! async fn test_remote_search() {
//!     let server = TestScoringServer::spawn(Behavior::Hits(complete_hits(10))).await;
//!     // point an HttpScoringClient at server.base_url
//! }
//! ```

mod constants;
mod server;

#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use server::{unreachable_base_url, Behavior, TestScoringServer};
