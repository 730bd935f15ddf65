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

//! `cosmos.base.v1beta1`

use crate::impl_message;
use serde::{Deserialize, Serialize};

/// An amount of one denomination
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Coin {
    /// Denomination, e.g. `aphoton`
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub denom: String,
    /// Integer amount as a decimal string
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub amount: String,
}

impl_message! {
    Coin = "cosmos.base.v1beta1.Coin" {
        denom = 1: string,
        amount = 2: string,
    }
}

impl Coin {
    /// Build a coin from an amount and a denomination
    pub fn new(amount: impl ToString, denom: impl Into<String>) -> Self {
        Self { denom: denom.into(), amount: amount.to_string() }
    }
}
