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

//! Tendermint JSON-RPC client used for broadcasting

use crate::error::TransportError;
use chainstore_common::EndpointConfig;
use serde_json::{json, Value};
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use tracing::debug;

/// JSON-RPC over HTTP POST to a Tendermint node
#[derive(Debug)]
pub struct TendermintRpc {
    client: reqwest::Client,
    url: String,
    request_id: AtomicU64,
}

impl TendermintRpc {
    /// Create a client for the RPC endpoint at `url`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: url.into(), request_id: AtomicU64::new(1) })
    }

    /// Create a client for the configured RPC endpoint
    pub fn from_config(config: &EndpointConfig) -> Result<Self, TransportError> {
        Self::new(config.rpc_url.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// RPC endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call `method` and return its `result`
    ///
    /// Tendermint reports some errors with a non-2xx status and a JSON-RPC error
    /// body, so the body is inspected before the status.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params});
        debug!("Calling {} on {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body: text.chars().take(200).collect(),
                })
            }
            Err(e) => return Err(TransportError::InvalidResponse(e.to_string())),
        };

        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            return Err(json_rpc_error(error));
        }

        match body.get("result") {
            Some(result) => Ok(result.clone()),
            None if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            }),
            None => Err(TransportError::InvalidResponse(format!("no result in response to {method}"))),
        }
    }
}

fn json_rpc_error(error: &Value) -> TransportError {
    let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
    let mut message =
        error.get("message").and_then(Value::as_str).unwrap_or("unknown error").to_string();
    if let Some(data) = error.get("data").and_then(Value::as_str).filter(|d| !d.is_empty()) {
        message = format!("{message}: {data}");
    }
    TransportError::JsonRpc { code, message }
}
