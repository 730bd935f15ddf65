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

//! Chainstore Codec - Protobuf and JSON mapping for node messages
//!
//! Each message type is a `prost` struct with a serde JSON mirror matching the
//! node's REST gateway, plus a static [`MessageDescriptor`]. The [`Message`] trait
//! is the contract the query and transaction clients are written against:
//!
//! - `encode_to_bytes` / `decode_bytes` for the protobuf wire format
//! - `from_json` / `to_json` for the gateway JSON, zero-filling missing fields
//! - `from_partial` to build a message from any serializable partial shape
//!
//! # JSON zero values
//!
//! Scalars follow proto3 semantics: a field set to its zero value and an absent
//! field are the same message. `to_json` therefore always renders scalars (zero
//! values included), and `from_json` fills absent ones with zero. Only nested
//! messages have presence; they are `None` when absent and omitted from JSON.

pub mod any;
pub mod cosmos;
pub mod descriptor;
pub mod error;
pub mod ethermint;
pub mod message;
pub mod pagination;
pub mod registry;
pub mod serde_helpers;

pub use any::Any;
pub use descriptor::{Cardinality, FieldDescriptor, FieldKind, MessageDescriptor};
pub use error::CodecError;
pub use message::{Message, ProtoEnum};
pub use pagination::{PageRequest, PageResponse, Paginated};
pub use registry::{type_structure, TypeEntry};
