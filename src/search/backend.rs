//! Client for the remote scoring service.
//!
//! The service exposes a single `POST /search` endpoint taking
//! `{"query_text": ..., "top_k": ...}` and answering with a JSON array of
//! loosely-typed hits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::models::Track;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_TRACK: &str = "Unknown Track";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend error: {0}")]
    Status(StatusCode),

    #[error("Failed to reach scoring service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to parse scoring service response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Request body of `POST /search`.
#[derive(Debug, Serialize)]
pub struct RemoteSearchRequest {
    pub query_text: String,
    pub top_k: usize,
}

/// One hit as returned by the scoring service. Every field may be missing or
/// carry an unexpected type, which never fails the whole response.
#[derive(Clone, Debug, Deserialize)]
pub struct RemoteHit {
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub song: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub album_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_f64")]
    pub similarity: Option<f64>,
}

/// Strings are kept, numbers are stringified, anything else is dropped.
fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers and numeric strings are kept, anything else is dropped.
fn deserialize_loose_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

fn non_empty_or(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

impl RemoteHit {
    pub fn into_track(self) -> Track {
        Track {
            id: self.id.unwrap_or_default(),
            artist: non_empty_or(self.artist, UNKNOWN_ARTIST),
            track: non_empty_or(self.song, UNKNOWN_TRACK),
            album: non_empty_or(self.album_name, UNKNOWN_ALBUM),
            youtube_url: self.url.unwrap_or_default(),
            similarity: self.similarity,
        }
    }
}

/// Seam between the dispatcher and whatever answers search requests.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    async fn search(&self, query_text: &str, top_k: usize) -> Result<Vec<RemoteHit>, BackendError>;
}

/// HTTP implementation of [`ScoringBackend`].
#[derive(Clone)]
pub struct HttpScoringClient {
    client: Client,
    base_url: String,
}

impl HttpScoringClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the scoring service (e.g., "http://localhost:8000")
    /// * `timeout_sec` - Optional request timeout, reqwest's default otherwise
    pub fn new(base_url: &str, timeout_sec: Option<u64>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_sec {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl ScoringBackend for HttpScoringClient {
    async fn search(&self, query_text: &str, top_k: usize) -> Result<Vec<RemoteHit>, BackendError> {
        let body = RemoteSearchRequest {
            query_text: query_text.to_string(),
            top_k,
        };
        let response = self
            .client
            .post(self.search_url())
            .json(&body)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }

        response.json().await.map_err(BackendError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_trims_trailing_slash() {
        let client = HttpScoringClient::new("http://localhost:8000/", None).unwrap();
        assert_eq!(client.search_url(), "http://localhost:8000/search");
    }

    #[test]
    fn test_hit_with_all_fields() {
        let hit: RemoteHit = serde_json::from_str(
            r#"{"id":"abc","artist":"Queen","song":"Bohemian Rhapsody",
                "album_name":"A Night at the Opera","url":"https://y/watch?v=1","similarity":0.83}"#,
        )
        .unwrap();
        let track = hit.into_track();
        assert_eq!(track.id, "abc");
        assert_eq!(track.artist, "Queen");
        assert_eq!(track.track, "Bohemian Rhapsody");
        assert_eq!(track.album, "A Night at the Opera");
        assert_eq!(track.youtube_url, "https://y/watch?v=1");
        assert_eq!(track.similarity, Some(0.83));
    }

    #[test]
    fn test_hit_with_missing_fields_gets_placeholders() {
        let hit: RemoteHit = serde_json::from_str(r#"{"id": 42, "artist": null, "song": ""}"#).unwrap();
        let track = hit.into_track();
        assert_eq!(track.id, "42");
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert_eq!(track.track, UNKNOWN_TRACK);
        assert_eq!(track.album, UNKNOWN_ALBUM);
        assert_eq!(track.youtube_url, "");
        assert_eq!(track.similarity, None);
    }

    #[test]
    fn test_hit_with_mistyped_fields_is_kept() {
        let hit: RemoteHit = serde_json::from_str(
            r#"{"id": true, "artist": 1975, "song": ["a"], "album_name": {"x": 1},
                "url": false, "similarity": "high"}"#,
        )
        .unwrap();
        let track = hit.into_track();
        assert_eq!(track.id, "");
        assert_eq!(track.artist, "1975");
        assert_eq!(track.track, UNKNOWN_TRACK);
        assert_eq!(track.album, UNKNOWN_ALBUM);
        assert_eq!(track.youtube_url, "");
        assert_eq!(track.similarity, None);
    }

    #[test]
    fn test_hit_accepts_numeric_string_similarity() {
        let hit: RemoteHit = serde_json::from_str(r#"{"similarity": "0.75"}"#).unwrap();
        assert_eq!(hit.similarity, Some(0.75));
    }

    #[test]
    fn test_hit_ignores_unknown_fields() {
        let hit: RemoteHit =
            serde_json::from_str(r#"{"song": "Numb", "genre": "rock", "rank": 1}"#).unwrap();
        assert_eq!(hit.into_track().track, "Numb");
    }

    #[test]
    fn test_request_body_shape() {
        let body = RemoteSearchRequest {
            query_text: "coldplay".to_string(),
            top_k: 10,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({"query_text": "coldplay", "top_k": 10}));
    }
}
