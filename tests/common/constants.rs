//! Shared constants for end-to-end tests

use serde_json::{json, Value};

/// Maximum time to wait for the fake scoring service to answer `/health`.
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness polls.
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Query matching the reference catalog ("Coldplay - Yellow").
pub const MATCHING_QUERY: &str = "coldplay";

/// Query matching nothing in the reference catalog.
pub const UNMATCHED_QUERY: &str = "xyznonexistent123";

/// `count` complete hits with decreasing similarity starting at 0.9.
pub fn complete_hits(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": format!("hit-{}", i),
                "artist": "The Test Band",
                "song": format!("Track {}", i),
                "album_name": "First Album",
                "url": format!("https://www.youtube.com/watch?v=vid{}", i),
                "similarity": 0.9 - (i as f64) * 0.01,
            })
        })
        .collect()
}
