// Chainstore - Cached Query Client for Ethermint Nodes
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! REST gateway transport
//!
//! The query client only needs "GET this path with these query parameters and
//! give me the JSON body". [`Transport`] is that seam; [`RestTransport`] is the
//! reqwest implementation used against a node's gRPC gateway.

use crate::error::TransportError;
use async_trait::async_trait;
use chainstore_common::EndpointConfig;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest response body kept in a [`TransportError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Scratch URL the gateway paths are assembled on; only its path is kept
const PATH_BASE: &str = "http://gateway.invalid/";

/// Build a gateway path from a fixed `prefix` and caller-supplied `segments`
///
/// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside an
/// identifier stay part of that segment.
pub fn gateway_path(prefix: &str, segments: &[&str]) -> Result<String, TransportError> {
    let invalid = |reason: String| TransportError::InvalidUrl { url: prefix.to_string(), reason };
    let mut url = reqwest::Url::parse(PATH_BASE).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("cannot hold a path".to_string()))?
        .clear()
        .extend(prefix.split('/').filter(|part| !part.is_empty()))
        .extend(segments);
    Ok(url.path().to_string())
}

/// Performs GET requests against the node's REST gateway
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` (starting with `/`) with the given query parameters and return the JSON body
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, TransportError>;
}

/// [`Transport`] over HTTP
#[derive(Debug, Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl RestTransport {
    /// Create a transport for the gateway at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Create a transport for the configured REST endpoint
    pub fn from_config(config: &EndpointConfig) -> Result<Self, TransportError> {
        Self::new(config.api_url.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `path` must already be percent-encoded, see [`gateway_path`]
    fn url(&self, path: &str, query: &[(String, String)]) -> Result<reqwest::Url, TransportError> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = reqwest::Url::parse(&raw)
            .map_err(|e| TransportError::InvalidUrl { url: raw.clone(), reason: e.to_string() })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, TransportError> {
        let url = self.url(path, query)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            TransportError::InvalidResponse(format!(
                "{e} (body: {})",
                text.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>()
            ))
        })
    }
}
