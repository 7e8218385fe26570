//! Where the app finds its backend at startup.
//!
//! `TODO_API_URL` wins when set; otherwise the outputs document named by
//! `TODO_OUTPUTS` (default `todo_outputs.json`) is read.

use todo_core::{BackendConfig, ConfigError};

pub const API_URL_VAR: &str = "TODO_API_URL";
pub const OUTPUTS_VAR: &str = "TODO_OUTPUTS";
pub const DEFAULT_OUTPUTS: &str = "todo_outputs.json";

pub fn from_env() -> Result<BackendConfig, ConfigError> {
    resolve(std::env::var(API_URL_VAR).ok(), std::env::var(OUTPUTS_VAR).ok())
}

pub fn resolve(api_url: Option<String>, outputs: Option<String>) -> Result<BackendConfig, ConfigError> {
    if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
        return Ok(BackendConfig::new(url.trim()));
    }
    let path = outputs.unwrap_or_else(|| DEFAULT_OUTPUTS.to_string());
    BackendConfig::load(path)
}
