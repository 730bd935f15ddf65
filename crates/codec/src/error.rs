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

use thiserror::Error;

/// Errors raised while converting messages between their binary, JSON and typed forms
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a valid protobuf encoding of the expected message
    #[error("failed to decode {type_name}: {source}")]
    Decode {
        /// Fully qualified protobuf name of the message being decoded
        type_name: &'static str,
        /// Underlying protobuf error
        #[source]
        source: prost::DecodeError,
    },

    /// The JSON value does not match the message's JSON mapping
    #[error("invalid JSON for {type_name}: {source}")]
    Json {
        /// Fully qualified protobuf name of the message being converted
        type_name: &'static str,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// An `Any` or a lookup named a type URL that is not registered
    #[error("unknown message type: {0}")]
    UnknownType(String),

    /// A short type name matched more than one registered type
    #[error("ambiguous message type {name}, candidates: {candidates:?}")]
    AmbiguousType {
        /// The name that was looked up
        name: String,
        /// Fully qualified names that match it
        candidates: Vec<&'static str>,
    },
}
