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

//! Static schema descriptors
//!
//! Every message type carries a [`MessageDescriptor`] written next to its
//! definition. Descriptors replace runtime introspection of field names: tooling
//! that needs to render or validate a message shape reads them instead.

use serde::Serialize;

/// Scalar or composite type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// Raw bytes (base64 in JSON)
    Bytes,
    /// Boolean
    Bool,
    /// Unsigned 64-bit integer (decimal string in JSON)
    Uint64,
    /// Signed 64-bit integer (decimal string in JSON)
    Int64,
    /// Enumeration, by fully qualified enum name
    Enum(&'static str),
    /// Nested message, by fully qualified message name
    Message(&'static str),
}

/// How many values a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Exactly one value, zero-valued when absent
    Singular,
    /// Nested message that may be absent
    Optional,
    /// Sequence of values, concatenated when pages are merged
    Repeated,
}

/// One field of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name as it appears in JSON
    pub name: &'static str,
    /// Protobuf field number
    pub number: u32,
    /// Field type
    pub kind: FieldKind,
    /// Field cardinality
    pub cardinality: Cardinality,
}

impl FieldDescriptor {
    /// Field holding exactly one scalar
    pub const fn singular(name: &'static str, number: u32, kind: FieldKind) -> Self {
        Self { name, number, kind, cardinality: Cardinality::Singular }
    }

    /// Field holding an optional nested message
    pub const fn optional(name: &'static str, number: u32, message: &'static str) -> Self {
        Self { name, number, kind: FieldKind::Message(message), cardinality: Cardinality::Optional }
    }

    /// Field holding a sequence
    pub const fn repeated(name: &'static str, number: u32, kind: FieldKind) -> Self {
        Self { name, number, kind, cardinality: Cardinality::Repeated }
    }

    /// Whether the field is a sequence
    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }
}

/// Shape of one message type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageDescriptor {
    /// Fully qualified protobuf name, e.g. `cosmos.gov.v1beta1.Vote`
    pub full_name: &'static str,
    /// Fields in declaration order
    pub fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    /// The short name, without package
    pub fn name(&self) -> &'static str {
        self.full_name.rsplit('.').next().unwrap_or(self.full_name)
    }

    /// The type URL used in `Any`
    pub fn type_url(&self) -> String {
        format!("/{}", self.full_name)
    }

    /// Look up a field by its JSON name
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the repeated fields
    pub fn repeated_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().filter(|f| f.is_repeated()).map(|f| f.name)
    }
}
