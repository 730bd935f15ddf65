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

//! `cosmos.crypto.secp256k1`

use crate::impl_message;
use serde::{Deserialize, Serialize};

/// Compressed secp256k1 public key
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct PubKey {
    /// 33-byte compressed key
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "crate::serde_helpers::base64_bytes")]
    pub key: Vec<u8>,
}

impl_message! {
    PubKey = "cosmos.crypto.secp256k1.PubKey" {
        key = 1: bytes,
    }
}
