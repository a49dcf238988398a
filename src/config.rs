//! Process configuration, read from the environment once at startup

use std::fmt;

use crate::error::{McpError, Result};
use crate::hcloud::DEFAULT_ENDPOINT;

/// API token variable (required)
pub const TOKEN_VAR: &str = "HCLOUD_TOKEN";

/// API base URL override (optional)
pub const ENDPOINT_VAR: &str = "HCLOUD_ENDPOINT";

#[derive(Clone, PartialEq)]
pub struct Config {
    pub token: String,
    pub endpoint: String,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup. A blank token counts as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| McpError::Config(format!("{} environment variable is required", TOKEN_VAR)))?;

        let endpoint = lookup(ENDPOINT_VAR)
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self { token, endpoint })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
