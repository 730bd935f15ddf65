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

//! `google.protobuf.Any` with gateway-style JSON
//!
//! Registered types render as `{"@type": url, ...fields}`. Anything else renders as
//! `{"@type": url, "value": base64}` so unknown payloads still round-trip.

use crate::{impl_message, registry, CodecError, Message};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const TYPE_KEY: &str = "@type";
const VALUE_KEY: &str = "value";

/// A packed message and its type URL
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Any {
    /// Type URL, e.g. `/cosmos.gov.v1beta1.TextProposal`
    #[prost(string, tag = "1")]
    pub type_url: String,
    /// Binary encoding of the packed message
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

impl_message! {
    Any = "google.protobuf.Any" {
        type_url = 1: string,
        value = 2: bytes,
    }
}

impl Any {
    /// Pack a message
    pub fn pack<M: Message>(message: &M) -> Self {
        Self { type_url: M::type_url(), value: message.encode_to_bytes() }
    }

    /// Unpack into a concrete message type, checking the type URL
    pub fn unpack<M: Message>(&self) -> Result<M, CodecError> {
        if self.type_url != M::type_url() {
            return Err(CodecError::UnknownType(self.type_url.clone()));
        }
        M::decode_bytes(&self.value)
    }

    /// Whether the packed type is `M`
    pub fn is<M: Message>(&self) -> bool {
        self.type_url == M::type_url()
    }

    fn to_json_object(&self) -> Map<String, Value> {
        let mut object = match registry::lookup(&self.type_url) {
            Some(entry) => match entry.bytes_to_json(&self.value) {
                Ok(Value::Object(fields)) => fields,
                _ => raw_object(&self.value),
            },
            None => raw_object(&self.value),
        };
        object.insert(TYPE_KEY.to_string(), Value::String(self.type_url.clone()));
        object
    }

    fn from_json_object(mut object: Map<String, Value>) -> Result<Self, String> {
        let type_url = match object.remove(TYPE_KEY) {
            Some(Value::String(url)) => url,
            Some(Value::Null) | None => return Ok(Self::default()),
            Some(other) => return Err(format!("`{TYPE_KEY}` must be a string, got {other}")),
        };

        let value = match registry::lookup(&type_url) {
            Some(entry) => {
                entry.json_to_bytes(&Value::Object(object)).map_err(|e| e.to_string())?
            }
            None => match object.remove(VALUE_KEY) {
                Some(Value::String(encoded)) => {
                    STANDARD.decode(encoded.as_bytes()).map_err(|e| e.to_string())?
                }
                Some(Value::Null) | None => Vec::new(),
                Some(other) => return Err(format!("`{VALUE_KEY}` must be base64, got {other}")),
            },
        };

        Ok(Self { type_url, value })
    }
}

fn raw_object(value: &[u8]) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert(VALUE_KEY.to_string(), Value::String(STANDARD.encode(value)));
    object
}

impl Serialize for Any {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.type_url.is_empty() && !self.value.is_empty() {
            return Err(ser::Error::custom("Any has a payload but no type URL"));
        }
        Value::Object(self.to_json_object()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Any {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(object) => Self::from_json_object(object).map_err(de::Error::custom),
            Value::Null => Ok(Self::default()),
            other => Err(de::Error::custom(format!("expected an object for Any, got {other}"))),
        }
    }
}
