use coco_annotate_core::{CoreError, TaskMode};

/// Default per-request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without a trailing `/`.
    pub api_endpoint: String,
    /// Host prefix stripped from image URLs; `None` disables stripping.
    pub image_host_prefix: Option<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Task modes to load, in order (default: all five).
    pub tasks: Vec<TaskMode>,
}

/// Errors from reading [`ClientConfig`] out of the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("TASKS contains an unknown task mode: {0}")]
    UnknownTask(#[from] CoreError),
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default          |
    /// |------------------------|------------------|
    /// | `API_ENDPOINT`         | -- (required)    |
    /// | `IMAGE_HOST_PREFIX`    | unset            |
    /// | `REQUEST_TIMEOUT_SECS` | `30`             |
    /// | `TASKS`                | all five modes   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_endpoint = lookup("API_ENDPOINT")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("API_ENDPOINT"))?;

        let image_host_prefix = lookup("IMAGE_HOST_PREFIX")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let request_timeout_secs: u64 = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                expected: "a valid u64",
                value,
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let tasks = match lookup("TASKS") {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(TaskMode::from_str)
                .collect::<Result<Vec<_>, _>>()?,
            None => TaskMode::ALL.to_vec(),
        };

        Ok(Self {
            api_endpoint,
            image_host_prefix,
            request_timeout_secs,
            tasks,
        })
    }
}
