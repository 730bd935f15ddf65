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

//! Error kinds of the client layer
//!
//! Transport errors never reach callers of the store: the query client folds
//! them into [`QueryError::NodeUnavailable`], and the store logs that and hands
//! out the zero value instead. Transaction errors are always propagated.

use crate::operation::Operation;
use thiserror::Error;

/// Failure talking to the REST gateway or the Tendermint RPC
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint or the request path does not form a valid URL
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// Connection, timeout or body read failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a non-2xx status
    #[error("node returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// The JSON-RPC response carried an `error` object
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message, with `data` appended when present
        message: String,
    },

    /// The response is not the JSON shape the call expects
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Failure of a query operation
#[derive(Debug, Error)]
pub enum QueryError {
    /// The node could not be reached or its answer could not be decoded
    #[error("API node unavailable, could not perform {operation}: {reason}")]
    NodeUnavailable {
        /// Operation that failed
        operation: Operation,
        /// Underlying transport or decode error
        reason: String,
    },

    /// The parameters do not fit the operation
    #[error("invalid parameters for {operation}: {reason}")]
    InvalidParams {
        /// Operation the parameters were meant for
        operation: Operation,
        /// What is wrong with them
        reason: String,
    },
}

impl QueryError {
    /// Operation the error belongs to
    pub fn operation(&self) -> Operation {
        match self {
            Self::NodeUnavailable { operation, .. } | Self::InvalidParams { operation, .. } => {
                *operation
            }
        }
    }
}

/// Failure building, signing or broadcasting a transaction
#[derive(Debug, Error)]
pub enum TxError {
    /// No signer is configured, nothing was attempted
    #[error("a signer is required to sign and broadcast transactions")]
    SignerRequired,

    /// The message data does not fit the message type
    #[error("invalid {kind} message: {reason}")]
    InvalidMessage {
        /// Message kind, e.g. `gov/MsgVote`
        kind: String,
        /// Decode error
        reason: String,
    },

    /// The signer refused or failed to sign
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// The transaction was attempted but the node or the chain rejected it
    #[error("could not broadcast tx: {reason}")]
    BroadcastFailed {
        /// Transport error or the chain's log
        reason: String,
        /// ABCI result code, when the chain answered
        code: Option<u32>,
        /// Transaction hash, when the chain answered
        hash: Option<String>,
    },
}

impl TxError {
    pub(crate) fn broadcast(reason: impl ToString) -> Self {
        Self::BroadcastFailed { reason: reason.to_string(), code: None, hash: None }
    }
}

/// An operation name that does not resolve
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseOperationError {
    /// No operation has this name
    #[error("unknown operation {0}")]
    Unknown(String),

    /// A short name that exists in more than one module
    #[error("ambiguous operation {name}, candidates: {candidates:?}")]
    Ambiguous {
        /// The name that was parsed
        name: String,
        /// Qualified names that match it
        candidates: Vec<&'static str>,
    },
}
