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

//! The codec contract shared by every message type
//!
//! A message is a `prost` struct (binary wire format) that also derives serde
//! (JSON mirror) and carries a static [`MessageDescriptor`]. The [`Message`]
//! trait ties the three together; [`impl_message!`](crate::impl_message) writes
//! the descriptor and [`proto_enum!`](crate::proto_enum) declares enumerations.

use crate::{CodecError, MessageDescriptor};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Encode, decode and JSON-map a message type
pub trait Message:
    prost::Message + Default + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Static schema of this message
    fn descriptor() -> &'static MessageDescriptor;

    /// Type URL used when the message is packed into an `Any`
    fn type_url() -> String {
        Self::descriptor().type_url()
    }

    /// Binary protobuf encoding
    fn encode_to_bytes(&self) -> Vec<u8> {
        prost::Message::encode_to_vec(self)
    }

    /// Decode from binary protobuf
    fn decode_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        <Self as prost::Message>::decode(bytes)
            .map_err(|source| CodecError::Decode { type_name: Self::descriptor().full_name, source })
    }

    /// Build from JSON, zero-filling every field that is missing or `null`
    fn from_json(value: &Value) -> Result<Self, CodecError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize_json(value.clone())
    }

    /// Render as JSON
    ///
    /// Scalar fields are always present, zero values included. Nested messages that
    /// are not set are omitted.
    fn to_json(&self) -> Result<Value, CodecError> {
        serde_json::to_value(self)
            .map_err(|source| CodecError::Json { type_name: Self::descriptor().full_name, source })
    }

    /// Build from any serializable partial shape, zero-filling what it leaves out
    fn from_partial<P: Serialize + ?Sized>(partial: &P) -> Result<Self, CodecError> {
        let value = serde_json::to_value(partial)
            .map_err(|source| CodecError::Json { type_name: Self::descriptor().full_name, source })?;
        Self::from_json(&value)
    }

    #[doc(hidden)]
    fn deserialize_json(value: Value) -> Result<Self, CodecError> {
        serde_json::from_value(value)
            .map_err(|source| CodecError::Json { type_name: Self::descriptor().full_name, source })
    }
}

/// Protobuf enumeration with its canonical names
pub trait ProtoEnum: Copy + Into<i32> + Sized + 'static {
    /// Fully qualified enum name
    const FULL_NAME: &'static str;

    /// Every variant, in declaration order
    const VARIANTS: &'static [Self];

    /// Canonical name, e.g. `VOTE_OPTION_YES`
    fn as_str_name(&self) -> &'static str;

    /// Variant for a canonical name
    fn from_str_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str_name() == name)
    }

    /// Variant for a wire number
    fn from_number(number: i32) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| (*v).into() == number)
    }
}

/// Implement [`Message`] for a prost struct and write its descriptor
///
/// ```ignore
/// impl_message! {
///     Vote = "cosmos.gov.v1beta1.Vote" {
///         proposal_id = 1: uint64,
///         voter = 2: string,
///         option = 3: (enum "cosmos.gov.v1beta1.VoteOption"),
///         options = 4: (repeated (message "cosmos.gov.v1beta1.WeightedVoteOption")),
///     }
/// }
/// ```
#[macro_export]
macro_rules! impl_message {
    ($($ty:ident = $full_name:literal { $($field:ident = $number:literal : $kind:tt),* $(,)? })+) => {
        $(
            impl $crate::Message for $ty {
                fn descriptor() -> &'static $crate::MessageDescriptor {
                    static DESCRIPTOR: $crate::MessageDescriptor = $crate::MessageDescriptor {
                        full_name: $full_name,
                        fields: &[$($crate::__field!($field, $number, $kind)),*],
                    };
                    &DESCRIPTOR
                }
            }
        )+
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field {
    ($name:ident, $number:literal, (optional $message:literal)) => {
        $crate::FieldDescriptor::optional(stringify!($name), $number, $message)
    };
    ($name:ident, $number:literal, (repeated $kind:tt)) => {
        $crate::FieldDescriptor::repeated(stringify!($name), $number, $crate::__kind!($kind))
    };
    ($name:ident, $number:literal, $kind:tt) => {
        $crate::FieldDescriptor::singular(stringify!($name), $number, $crate::__kind!($kind))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __kind {
    (string) => {
        $crate::FieldKind::String
    };
    (bytes) => {
        $crate::FieldKind::Bytes
    };
    (bool) => {
        $crate::FieldKind::Bool
    };
    (uint64) => {
        $crate::FieldKind::Uint64
    };
    (int64) => {
        $crate::FieldKind::Int64
    };
    ((enum $name:literal)) => {
        $crate::FieldKind::Enum($name)
    };
    ((message $name:literal)) => {
        $crate::FieldKind::Message($name)
    };
}

/// Declare a protobuf enumeration
///
/// Generates the `prost::Enumeration` enum and its [`ProtoEnum`] implementation.
#[macro_export]
macro_rules! proto_enum {
    (
        $(#[$meta:meta])*
        $name:ident = $full_name:literal {
            $($(#[$vmeta:meta])* $variant:ident = $number:literal => $str_name:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $number),+
        }

        impl $crate::ProtoEnum for $name {
            const FULL_NAME: &'static str = $full_name;
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn as_str_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str_name),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::ProtoEnum::as_str_name(self))
            }
        }
    };
}
