//! Configuration management for the agent service.
//!
//! Configuration can be set via environment variables:
//! - `OPENAI_API_KEY` - Optional. Credential for the OpenAI provider; requests
//!   that invoke an OpenAI agent fail without it.
//! - `OPENAI_BASE_URL` - Optional. Overrides the OpenAI API base URL.
//! - `TRELLIS_API_KEY` - Optional. Credential for the file staging service;
//!   requests that upload files fail without it.
//! - `TRELLIS_BASE_URL` - Optional. Overrides the staging service base URL.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `MAX_TOOL_ITERATIONS` - Optional. Tool-resolution loop budget per agent
//!   invocation. Defaults to `5`.

use thiserror::Error;

use crate::agent::DEFAULT_MAX_ITERATIONS;

/// Default OpenAI API endpoint.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default endpoint of the asset service that mints presigned URLs.
pub const DEFAULT_STAGING_BASE_URL: &str = "https://enterprise.prod.api.runtrellis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key, if configured
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL
    pub openai_base_url: String,

    /// File staging API key, if configured
    pub staging_api_key: Option<String>,

    /// File staging base URL
    pub staging_base_url: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Tool-resolution loop budget per agent invocation
    pub max_tool_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing credentials are not an error here: the server can start
    /// without them, and the request paths that need them fail per-request.
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

        let openai_base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());

        let staging_api_key = std::env::var("TRELLIS_API_KEY").ok();

        let staging_base_url = std::env::var("TRELLIS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_STAGING_BASE_URL.to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_tool_iterations = std::env::var("MAX_TOOL_ITERATIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_ITERATIONS.to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("MAX_TOOL_ITERATIONS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            openai_api_key,
            openai_base_url,
            staging_api_key,
            staging_base_url,
            host,
            port,
            max_tool_iterations,
        })
    }

    /// Create a config with custom credentials (useful for testing).
    pub fn new(openai_api_key: Option<String>) -> Self {
        Self {
            openai_api_key,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            staging_api_key: None,
            staging_base_url: DEFAULT_STAGING_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_tool_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
