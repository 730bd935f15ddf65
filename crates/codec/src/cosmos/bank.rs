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

//! `cosmos.bank.v1beta1`: balances, supply and transfers

use crate::{cosmos::base::Coin, impl_message, impl_paginated, PageRequest, PageResponse};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryBalanceRequest {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub address: String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub denom: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryBalanceResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Coin>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryAllBalancesRequest {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub address: String,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryAllBalancesResponse {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub balances: Vec<Coin>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryTotalSupplyRequest {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageRequest>,
}

/// Total supply of every denomination
///
/// Older nodes return the whole list at once; newer ones paginate it.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryTotalSupplyResponse {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub supply: Vec<Coin>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySupplyOfRequest {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub denom: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySupplyOfResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Coin>,
}

/// Transfer coins between accounts
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgSend {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub from_address: String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub to_address: String,
    #[prost(message, repeated, tag = "3")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub amount: Vec<Coin>,
}

impl_message! {
    QueryBalanceRequest = "cosmos.bank.v1beta1.QueryBalanceRequest" {
        address = 1: string,
        denom = 2: string,
    }
    QueryBalanceResponse = "cosmos.bank.v1beta1.QueryBalanceResponse" {
        balance = 1: (optional "cosmos.base.v1beta1.Coin"),
    }
    QueryAllBalancesRequest = "cosmos.bank.v1beta1.QueryAllBalancesRequest" {
        address = 1: string,
        pagination = 2: (optional "cosmos.base.query.v1beta1.PageRequest"),
    }
    QueryAllBalancesResponse = "cosmos.bank.v1beta1.QueryAllBalancesResponse" {
        balances = 1: (repeated (message "cosmos.base.v1beta1.Coin")),
        pagination = 2: (optional "cosmos.base.query.v1beta1.PageResponse"),
    }
    QueryTotalSupplyRequest = "cosmos.bank.v1beta1.QueryTotalSupplyRequest" {
        pagination = 1: (optional "cosmos.base.query.v1beta1.PageRequest"),
    }
    QueryTotalSupplyResponse = "cosmos.bank.v1beta1.QueryTotalSupplyResponse" {
        supply = 1: (repeated (message "cosmos.base.v1beta1.Coin")),
        pagination = 2: (optional "cosmos.base.query.v1beta1.PageResponse"),
    }
    QuerySupplyOfRequest = "cosmos.bank.v1beta1.QuerySupplyOfRequest" {
        denom = 1: string,
    }
    QuerySupplyOfResponse = "cosmos.bank.v1beta1.QuerySupplyOfResponse" {
        amount = 1: (optional "cosmos.base.v1beta1.Coin"),
    }
    MsgSend = "cosmos.bank.v1beta1.MsgSend" {
        from_address = 1: string,
        to_address = 2: string,
        amount = 3: (repeated (message "cosmos.base.v1beta1.Coin")),
    }
}

impl_paginated! {
    QueryAllBalancesResponse { balances }
    QueryTotalSupplyResponse { supply }
}
