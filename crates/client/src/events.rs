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

//! New-block events from the Tendermint WebSocket endpoint
//!
//! [`NewBlockListener`] subscribes to `tm.event='NewBlock'` and forwards one
//! [`ChainEvent::NewBlock`] per committed block through an mpsc channel. Lost
//! connections are retried with exponential backoff.

use eyre::{Result, WrapErr};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

/// Query selecting new-block events
pub const NEW_BLOCK_QUERY: &str = "tm.event='NewBlock'";

/// Maximum consecutive reconnection attempts before giving up
const MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// Base delay between reconnection attempts, doubled per attempt
const RECONNECT_BASE_DELAY_SECS: u64 = 2;

/// Maximum delay between reconnection attempts
const MAX_RECONNECT_DELAY_SECS: u64 = 60;

/// Something that happened on the chain connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    /// Subscribed to block events
    Connected,
    /// A block was committed
    NewBlock {
        /// Height of the block, 0 when the notification did not carry it
        height: u64,
    },
    /// Connection lost
    Disconnected,
    /// Error reported by the node or the connection
    Error(String),
}

/// JSON-RPC request sent over the WebSocket
#[derive(Debug, Serialize)]
struct WsRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    id: u64,
    params: WsParams<'a>,
}

#[derive(Debug, Serialize)]
struct WsParams<'a> {
    query: &'a str,
}

/// Listens for new blocks on `<rpc>/websocket`
pub struct NewBlockListener {
    ws_url: String,
    event_tx: mpsc::Sender<ChainEvent>,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl NewBlockListener {
    /// Create a listener sending events to `event_tx`
    pub fn new(ws_url: impl Into<String>, event_tx: mpsc::Sender<ChainEvent>) -> Self {
        Self { ws_url: ws_url.into(), event_tx, shutdown_tx: None }
    }

    /// WebSocket URL listened on
    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Start listening in a background task
    pub fn start(&mut self) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        self.shutdown_tx = Some(shutdown_tx);

        let ws_url = self.ws_url.clone();
        let event_tx = self.event_tx.clone();
        let request_id = Arc::new(AtomicU64::new(1));

        tokio::spawn(Self::connection_loop(ws_url, event_tx, request_id, shutdown_rx));
    }

    /// Stop listening
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
    }

    async fn connection_loop(
        ws_url: String,
        event_tx: mpsc::Sender<ChainEvent>,
        request_id: Arc<AtomicU64>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut reconnect_attempts = 0u32;

        loop {
            let result = tokio::select! {
                result = Self::run_connection(&ws_url, &event_tx, &request_id, &mut reconnect_attempts) => result,
                _ = shutdown_rx.recv() => break,
            };

            if event_tx.is_closed() {
                break;
            }

            reconnect_attempts += 1;
            let reason = match result {
                Ok(()) => "connection closed by node".to_string(),
                Err(e) => format!("{e:#}"),
            };
            warn!("Block event connection to {} lost: {}", ws_url, reason);
            let _ = event_tx.send(ChainEvent::Error(reason)).await;
            let _ = event_tx.send(ChainEvent::Disconnected).await;

            if reconnect_attempts >= MAX_RECONNECT_ATTEMPTS {
                let message =
                    format!("WebSocket reconnection failed after {MAX_RECONNECT_ATTEMPTS} attempts");
                let _ = event_tx.send(ChainEvent::Error(message)).await;
                break;
            }

            let delay_secs = calculate_backoff_delay(reconnect_attempts);
            debug!("Reconnecting in {}s (attempt {})", delay_secs, reconnect_attempts);
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(delay_secs)) => {}
                _ = shutdown_rx.recv() => break,
            }
        }
    }

    async fn run_connection(
        ws_url: &str,
        event_tx: &mpsc::Sender<ChainEvent>,
        request_id: &AtomicU64,
        reconnect_attempts: &mut u32,
    ) -> Result<()> {
        let (ws_stream, _) =
            connect_async(ws_url).await.wrap_err_with(|| format!("failed to connect to {ws_url}"))?;
        let (mut write, mut read) = ws_stream.split();

        let subscribe = WsRequest {
            jsonrpc: "2.0",
            method: "subscribe",
            id: request_id.fetch_add(1, Ordering::SeqCst),
            params: WsParams { query: NEW_BLOCK_QUERY },
        };
        let msg = Message::Text(serde_json::to_string(&subscribe)?.into());
        write.send(msg).await.wrap_err("failed to send subscription")?;

        info!("Subscribed to new blocks on {}", ws_url);
        *reconnect_attempts = 0;
        let _ = event_tx.send(ChainEvent::Connected).await;

        while let Some(msg) = read.next().await {
            match msg.wrap_err("WebSocket read failed")? {
                Message::Text(text) => {
                    if let Some(event) = parse_message(text.as_str()) {
                        if event_tx.send(event).await.is_err() {
                            return Ok(());
                        }
                    }
                }
                Message::Ping(data) => {
                    let _ = write.send(Message::Pong(data)).await;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }

        Ok(())
    }
}

/// Exponential backoff: the base delay before the first retry, doubling per attempt, capped
fn calculate_backoff_delay(attempts: u32) -> u64 {
    std::cmp::min(
        RECONNECT_BASE_DELAY_SECS.saturating_mul(1 << attempts.saturating_sub(1).min(6)),
        MAX_RECONNECT_DELAY_SECS,
    )
}

/// Turn one WebSocket text frame into an event
///
/// The subscription confirmation (`"result": {}`) yields nothing.
fn parse_message(text: &str) -> Option<ChainEvent> {
    let message: Value = serde_json::from_str(text).ok()?;

    if let Some(error) = message.get("error").filter(|e| !e.is_null()) {
        let text = error
            .get("data")
            .or_else(|| error.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Some(ChainEvent::Error(text.to_string()));
    }

    let data = message.get("result")?.get("data")?;
    if data.get("type").and_then(Value::as_str) != Some("tendermint/event/NewBlock") {
        return None;
    }

    let height = data
        .pointer("/value/block/header/height")
        .and_then(|h| match h {
            Value::String(s) => s.parse().ok(),
            other => other.as_u64(),
        })
        .unwrap_or_default();
    Some(ChainEvent::NewBlock { height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_block_notification() {
        let text = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "query": "tm.event='NewBlock'",
                "data": {
                    "type": "tendermint/event/NewBlock",
                    "value": {"block": {"header": {"chain_id": "ethermint_9000-1", "height": "1234"}}}
                },
                "events": {}
            }
        })
        .to_string();
        assert_eq!(parse_message(&text), Some(ChainEvent::NewBlock { height: 1234 }));
    }

    #[test]
    fn test_confirmation_and_noise_are_ignored() {
        assert_eq!(parse_message(r#"{"jsonrpc":"2.0","id":1,"result":{}}"#), None);
        assert_eq!(parse_message("not json"), None);
        let tx = json!({"result": {"data": {"type": "tendermint/event/Tx", "value": {}}}});
        assert_eq!(parse_message(&tx.to_string()), None);
    }

    #[test]
    fn test_error_message() {
        let text = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32603,"message":"Internal error","data":"already subscribed"}}"#;
        assert_eq!(parse_message(text), Some(ChainEvent::Error("already subscribed".to_string())));
    }

    #[test]
    fn test_backoff_starts_at_base_and_is_capped() {
        assert_eq!(calculate_backoff_delay(1), RECONNECT_BASE_DELAY_SECS);
        assert_eq!(calculate_backoff_delay(2), 4);
        assert_eq!(calculate_backoff_delay(3), 8);
        assert_eq!(calculate_backoff_delay(5), 32);
        assert_eq!(calculate_backoff_delay(6), MAX_RECONNECT_DELAY_SECS);
        assert_eq!(calculate_backoff_delay(10), MAX_RECONNECT_DELAY_SECS);
    }
}
