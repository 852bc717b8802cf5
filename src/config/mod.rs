mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Context, Result};

use crate::search::{RetrievalAlgorithm, DEFAULT_K, K_OPTIONS};

pub const DEFAULT_BACKEND_URL: &str = "http://164.90.222.13:8000";

/// CLI arguments that can be used for config resolution.
/// Environment fallbacks (`BACKEND_URL`, `USE_MOCK`) are applied by clap
/// before this struct is built.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub backend_url: Option<String>,
    pub use_mock: bool,
    pub request_timeout_sec: Option<u64>,
    pub k: Option<usize>,
    pub algorithm: Option<RetrievalAlgorithm>,
    pub algorithm2: Option<RetrievalAlgorithm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend_url: String,
    pub use_mock: bool,
    pub request_timeout_sec: Option<u64>,
    pub k: usize,
    pub algorithm: RetrievalAlgorithm,
    pub algorithm2: RetrievalAlgorithm,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let backend_url = file
            .backend_url
            .or_else(|| cli.backend_url.clone())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = backend_url.trim().trim_end_matches('/').to_string();
        if backend_url.is_empty() {
            bail!("backend_url must not be empty");
        }

        let use_mock = file.use_mock.unwrap_or(cli.use_mock);
        let request_timeout_sec = file.request_timeout_sec.or(cli.request_timeout_sec);

        let k = file.k.or(cli.k).unwrap_or(DEFAULT_K);
        if !K_OPTIONS.contains(&k) {
            bail!("k must be one of {:?}, got {}", K_OPTIONS, k);
        }

        let algorithm = resolve_algorithm(file.algorithm, cli.algorithm, RetrievalAlgorithm::Lyrics)?;
        let algorithm2 =
            resolve_algorithm(file.algorithm2, cli.algorithm2, RetrievalAlgorithm::Random)?;

        Ok(Self {
            backend_url,
            use_mock,
            request_timeout_sec,
            k,
            algorithm,
            algorithm2,
        })
    }
}

fn resolve_algorithm(
    from_file: Option<String>,
    from_cli: Option<RetrievalAlgorithm>,
    default: RetrievalAlgorithm,
) -> Result<RetrievalAlgorithm> {
    match from_file {
        Some(name) => name
            .parse::<RetrievalAlgorithm>()
            .with_context(|| format!("Invalid algorithm in config file: {}", name)),
        None => Ok(from_cli.unwrap_or(default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), None).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert!(!config.use_mock);
        assert_eq!(config.request_timeout_sec, None);
        assert_eq!(config.k, 10);
        assert_eq!(config.algorithm, RetrievalAlgorithm::Lyrics);
        assert_eq!(config.algorithm2, RetrievalAlgorithm::Random);
    }

    #[test]
    fn test_file_overrides_cli() {
        let cli = CliConfig {
            backend_url: Some("http://cli:8000".to_string()),
            use_mock: false,
            k: Some(5),
            algorithm: Some(RetrievalAlgorithm::Audio),
            ..CliConfig::default()
        };
        let file = FileConfig {
            backend_url: Some("http://file:8000/".to_string()),
            use_mock: Some(true),
            algorithm: Some("late_fusion".to_string()),
            ..FileConfig::default()
        };

        let config = AppConfig::resolve(&cli, Some(file)).unwrap();
        assert_eq!(config.backend_url, "http://file:8000");
        assert!(config.use_mock);
        assert_eq!(config.k, 5);
        assert_eq!(config.algorithm, RetrievalAlgorithm::LateFusion);
    }

    #[test]
    fn test_invalid_k_rejected() {
        let cli = CliConfig {
            k: Some(7),
            ..CliConfig::default()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_invalid_algorithm_in_file_rejected() {
        let file = FileConfig {
            algorithm2: Some("bm25".to_string()),
            ..FileConfig::default()
        };
        assert!(AppConfig::resolve(&CliConfig::default(), Some(file)).is_err());
    }
}
