//! Startup configuration for the data client.
//!
//! The backend publishes an outputs document once it is provisioned; the
//! client reads it at startup and passes the result into `TodoClient::new`.
//! Only `data.url` is required.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    data_url: String,
}

#[derive(Deserialize)]
struct Outputs {
    #[serde(default)]
    data: Option<DataOutputs>,
}

#[derive(Deserialize)]
struct DataOutputs {
    #[serde(default)]
    url: Option<String>,
}

impl BackendConfig {
    pub fn new(data_url: &str) -> Self {
        Self {
            data_url: data_url.trim_end_matches('/').to_string(),
        }
    }

    /// Parse an outputs document such as
    /// `{"version":"1","data":{"url":"http://127.0.0.1:3000"}}`.
    pub fn from_outputs_json(raw: &str) -> Result<Self, ConfigError> {
        let outputs: Outputs = serde_json::from_str(raw)?;
        let url = outputs
            .data
            .and_then(|data| data.url)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingUrl)?;
        Ok(Self::new(url.trim()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_outputs_json(&raw)?;
        tracing::debug!(path = %path.display(), url = %config.data_url, "loaded backend outputs");
        Ok(config)
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}
