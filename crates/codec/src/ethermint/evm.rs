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

//! `ethermint.evm.v1alpha1`: EVM account state as seen through the Cosmos gateway

use crate::impl_message;
use serde::{Deserialize, Serialize};

/// EVM module parameters
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Denomination used for gas and value transfers
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub evm_denom: String,
    #[prost(bool, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub enable_create: bool,
    #[prost(bool, tag = "3")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub enable_call: bool,
    /// Extra EIPs activated on top of the chain config
    #[prost(int64, repeated, tag = "4")]
    #[serde(with = "crate::serde_helpers::i64_string_vec")]
    pub extra_eips: Vec<i64>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryAccountRequest {
    /// Hex address
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub address: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryAccountResponse {
    /// Balance in the EVM denomination, as an integer string
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub balance: String,
    #[prost(bytes = "vec", tag = "2")]
    #[serde(with = "crate::serde_helpers::base64_bytes")]
    pub code_hash: Vec<u8>,
    #[prost(uint64, tag = "3")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub nonce: u64,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCosmosAccountRequest {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub address: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCosmosAccountResponse {
    /// Bech32 address of the same account
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub cosmos_address: String,
    #[prost(uint64, tag = "2")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub sequence: u64,
    #[prost(uint64, tag = "3")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub account_number: u64,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryBalanceRequest {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub address: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryBalanceResponse {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub balance: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryStorageRequest {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub address: String,
    /// Hex storage slot
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub key: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryStorageResponse {
    /// Hex storage value
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCodeRequest {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub address: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCodeResponse {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "crate::serde_helpers::base64_bytes")]
    pub code: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParamsRequest {}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParamsResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl_message! {
    Params = "ethermint.evm.v1alpha1.Params" {
        evm_denom = 1: string,
        enable_create = 2: bool,
        enable_call = 3: bool,
        extra_eips = 4: (repeated int64),
    }
    QueryAccountRequest = "ethermint.evm.v1alpha1.QueryAccountRequest" {
        address = 1: string,
    }
    QueryAccountResponse = "ethermint.evm.v1alpha1.QueryAccountResponse" {
        balance = 1: string,
        code_hash = 2: bytes,
        nonce = 3: uint64,
    }
    QueryCosmosAccountRequest = "ethermint.evm.v1alpha1.QueryCosmosAccountRequest" {
        address = 1: string,
    }
    QueryCosmosAccountResponse = "ethermint.evm.v1alpha1.QueryCosmosAccountResponse" {
        cosmos_address = 1: string,
        sequence = 2: uint64,
        account_number = 3: uint64,
    }
    QueryBalanceRequest = "ethermint.evm.v1alpha1.QueryBalanceRequest" {
        address = 1: string,
    }
    QueryBalanceResponse = "ethermint.evm.v1alpha1.QueryBalanceResponse" {
        balance = 1: string,
    }
    QueryStorageRequest = "ethermint.evm.v1alpha1.QueryStorageRequest" {
        address = 1: string,
        key = 2: string,
    }
    QueryStorageResponse = "ethermint.evm.v1alpha1.QueryStorageResponse" {
        value = 1: string,
    }
    QueryCodeRequest = "ethermint.evm.v1alpha1.QueryCodeRequest" {
        address = 1: string,
    }
    QueryCodeResponse = "ethermint.evm.v1alpha1.QueryCodeResponse" {
        code = 1: bytes,
    }
    QueryParamsRequest = "ethermint.evm.v1alpha1.QueryParamsRequest" {}
    QueryParamsResponse = "ethermint.evm.v1alpha1.QueryParamsResponse" {
        params = 1: (optional "ethermint.evm.v1alpha1.Params"),
    }
}
