pub type Result<T> = core::result::Result<T, WorkloadError>;

#[derive(thiserror::Error, Debug)]
pub enum WorkloadError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidSetting {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: std::path::PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub mod config {
    use serde::Deserialize;
    use std::env;
    use std::path::{Path, PathBuf};
    use std::str::FromStr;
    use std::time::Duration;

    use crate::{Result, WorkloadError};

    pub const DEFAULT_ENDPOINT: &str =
        "http://nemo-embedder-nvidia-nim-llama-32-nv-embedqa-1b-v2.embedding-nim.svc.cluster.local:8000";

    pub const ENV_CONFIG_FILE: &str = "WORKLOAD_CONFIG";
    pub const ENV_ENDPOINT: &str = "NIM_ENDPOINT";
    pub const ENV_REQUEST_INTERVAL: &str = "REQUEST_INTERVAL";
    pub const ENV_BATCH_SIZE: &str = "BATCH_SIZE";
    pub const ENV_MAX_TEXT_LENGTH: &str = "MAX_TEXT_LENGTH";
    pub const ENV_SEED: &str = "WORKLOAD_SEED";

    /// Process-wide settings, read once at startup.
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    pub struct WorkloadConfig {
        /// Base URL of the embedding service, without a trailing slash.
        pub endpoint: String,
        pub request_interval_secs: u64,
        pub batch_size: usize,
        /// Upper bound on generated text length, in characters.
        pub max_text_length: usize,
        /// Seeds the text generator; `None` draws from OS entropy.
        pub seed: Option<u64>,
    }

    impl Default for WorkloadConfig {
        fn default() -> Self {
            Self {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                request_interval_secs: 10,
                batch_size: 3,
                max_text_length: 200,
                seed: None,
            }
        }
    }

    impl WorkloadConfig {
        /// Reads the process environment.
        pub fn load() -> Result<Self> {
            Self::from_lookup(|key| env::var(key).ok())
        }

        /// Builds a config from an arbitrary key lookup. When `WORKLOAD_CONFIG`
        /// names a YAML file it forms the base layer and individual variables
        /// override it.
        pub fn from_lookup<F>(lookup: F) -> Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let mut cfg = match lookup(ENV_CONFIG_FILE) {
                Some(path) => Self::from_file(PathBuf::from(path))?,
                None => Self::default(),
            };
            if let Some(v) = lookup(ENV_ENDPOINT) { cfg.endpoint = v; }
            if let Some(v) = lookup(ENV_REQUEST_INTERVAL) { cfg.request_interval_secs = parse_setting(ENV_REQUEST_INTERVAL, &v)?; }
            if let Some(v) = lookup(ENV_BATCH_SIZE) { cfg.batch_size = parse_setting(ENV_BATCH_SIZE, &v)?; }
            if let Some(v) = lookup(ENV_MAX_TEXT_LENGTH) { cfg.max_text_length = parse_setting(ENV_MAX_TEXT_LENGTH, &v)?; }
            if let Some(v) = lookup(ENV_SEED) { cfg.seed = Some(parse_setting(ENV_SEED, &v)?); }
            cfg.validate()
        }

        pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path).map_err(|source| WorkloadError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_yaml_str(&text).map_err(|source| WorkloadError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })
        }

        pub fn from_yaml_str(text: &str) -> core::result::Result<Self, serde_yaml::Error> {
            serde_yaml::from_str(text)
        }

        pub fn request_interval(&self) -> Duration {
            Duration::from_secs(self.request_interval_secs)
        }

        fn validate(mut self) -> Result<Self> {
            let endpoint = self.endpoint.trim().trim_end_matches('/').to_string();
            if endpoint.is_empty() {
                return Err(invalid(ENV_ENDPOINT, &self.endpoint, "must not be empty"));
            }
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(invalid(ENV_ENDPOINT, &self.endpoint, "must start with http:// or https://"));
            }
            if self.batch_size == 0 {
                return Err(invalid(ENV_BATCH_SIZE, "0", "must be at least 1"));
            }
            if self.max_text_length == 0 {
                return Err(invalid(ENV_MAX_TEXT_LENGTH, "0", "must be at least 1"));
            }
            self.endpoint = endpoint;
            Ok(self)
        }
    }

    fn parse_setting<T>(key: &'static str, raw: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        raw.trim().parse::<T>().map_err(|e| invalid(key, raw, &e.to_string()))
    }

    fn invalid(key: &'static str, value: &str, reason: &str) -> WorkloadError {
        WorkloadError::InvalidSetting { key, value: value.to_string(), reason: reason.to_string() }
    }
}
