//! Staging client for request file uploads.
//!
//! Files attached to an agent request are not sent to the model provider
//! directly. They are pushed to the asset staging service first, and the
//! presigned URLs that come back are what the agent sees.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};

const API_VERSION: &str = "2025-03";

/// One file lifted out of the incoming multipart request.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct StagingClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct PresignedReply {
    #[serde(default)]
    presigned_urls: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl StagingClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Credential is only required once there is something to stage, so
    /// construction is deferred until the request actually carries files.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .staging_api_key
            .clone()
            .ok_or(Error::MissingCredential("TRELLIS_API_KEY"))?;
        Ok(Self::new(api_key, config.staging_base_url.clone()))
    }

    /// Stage `files` and return their presigned URLs, in upload order.
    /// An empty batch never touches the network.
    pub async fn presign(&self, files: Vec<StagedUpload>) -> Result<Vec<String>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let count = files.len();
        let mut form = Form::new();
        for (index, file) in files.into_iter().enumerate() {
            let mut part = Part::bytes(file.data).file_name(file.filename);
            if let Some(content_type) = &file.content_type {
                part = part.mime_str(content_type).map_err(Error::Staging)?;
            }
            form = form.part("files", part);
            form = form.text("ids", format!("file_{index}"));
        }

        let url = format!("{}/v1/assets/presigned", self.base_url);
        tracing::debug!(files = count, %url, "staging request files");

        let reply: PresignedReply = self
            .http
            .post(&url)
            .header("Authorization", &self.api_key)
            .header("API-Version", API_VERSION)
            .header("accept", "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(Error::Staging)?
            .error_for_status()
            .map_err(Error::Staging)?
            .json()
            .await
            .map_err(Error::Staging)?;

        Ok(flatten_presigned(reply))
    }
}

/// The reply pairs upload ids with URLs, one map per file. Only the URLs
/// matter downstream; list order is upload order.
fn flatten_presigned(reply: PresignedReply) -> Vec<String> {
    reply
        .presigned_urls
        .into_iter()
        .flat_map(|entry| entry.into_iter())
        .filter_map(|(_, value)| match value {
            serde_json::Value::String(url) => Some(url),
            _ => None,
        })
        .collect()
}
