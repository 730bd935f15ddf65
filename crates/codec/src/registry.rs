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

//! Closed registry of the message types this crate knows
//!
//! Used by [`Any`](crate::Any) for its JSON mapping and by tooling that looks up a
//! type's structure by name.

use crate::{
    cosmos::{bank, base, crypto, gov, tx},
    ethermint::evm,
    Any, CodecError, FieldDescriptor, Message, MessageDescriptor, PageRequest, PageResponse,
};
use serde_json::Value;
use std::sync::LazyLock;

/// Type-erased handle to one registered message type
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
    /// Static schema of the type
    pub descriptor: &'static MessageDescriptor,
    json_to_bytes: fn(&Value) -> Result<Vec<u8>, CodecError>,
    bytes_to_json: fn(&[u8]) -> Result<Value, CodecError>,
}

impl TypeEntry {
    fn of<M: Message>() -> Self {
        Self {
            descriptor: M::descriptor(),
            json_to_bytes: |value| Ok(M::from_json(value)?.encode_to_bytes()),
            bytes_to_json: |bytes| M::decode_bytes(bytes)?.to_json(),
        }
    }

    /// Convert the JSON form of this type to its binary encoding
    pub fn json_to_bytes(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        (self.json_to_bytes)(value)
    }

    /// Convert the binary encoding of this type to its JSON form
    pub fn bytes_to_json(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        (self.bytes_to_json)(bytes)
    }
}

macro_rules! registry {
    ($($ty:ty),+ $(,)?) => {
        vec![$(TypeEntry::of::<$ty>()),+]
    };
}

static REGISTRY: LazyLock<Vec<TypeEntry>> = LazyLock::new(|| {
    registry![
        Any,
        PageRequest,
        PageResponse,
        base::Coin,
        crypto::PubKey,
        // gov
        gov::Proposal,
        gov::TextProposal,
        gov::TallyResult,
        gov::Vote,
        gov::WeightedVoteOption,
        gov::Deposit,
        gov::DepositParams,
        gov::VotingParams,
        gov::TallyParams,
        gov::QueryProposalRequest,
        gov::QueryProposalResponse,
        gov::QueryProposalsRequest,
        gov::QueryProposalsResponse,
        gov::QueryVoteRequest,
        gov::QueryVoteResponse,
        gov::QueryVotesRequest,
        gov::QueryVotesResponse,
        gov::QueryParamsRequest,
        gov::QueryParamsResponse,
        gov::QueryDepositRequest,
        gov::QueryDepositResponse,
        gov::QueryDepositsRequest,
        gov::QueryDepositsResponse,
        gov::QueryTallyResultRequest,
        gov::QueryTallyResultResponse,
        gov::MsgSubmitProposal,
        gov::MsgVote,
        gov::MsgDeposit,
        // bank
        bank::QueryBalanceRequest,
        bank::QueryBalanceResponse,
        bank::QueryAllBalancesRequest,
        bank::QueryAllBalancesResponse,
        bank::QueryTotalSupplyRequest,
        bank::QueryTotalSupplyResponse,
        bank::QuerySupplyOfRequest,
        bank::QuerySupplyOfResponse,
        bank::MsgSend,
        // evm
        evm::Params,
        evm::QueryAccountRequest,
        evm::QueryAccountResponse,
        evm::QueryCosmosAccountRequest,
        evm::QueryCosmosAccountResponse,
        evm::QueryBalanceRequest,
        evm::QueryBalanceResponse,
        evm::QueryStorageRequest,
        evm::QueryStorageResponse,
        evm::QueryCodeRequest,
        evm::QueryCodeResponse,
        evm::QueryParamsRequest,
        evm::QueryParamsResponse,
        // tx
        tx::TxBody,
        tx::AuthInfo,
        tx::SignerInfo,
        tx::ModeInfo,
        tx::mode_info::Single,
        tx::Fee,
        tx::SignDoc,
        tx::TxRaw,
    ]
});

/// Every registered type
pub fn entries() -> &'static [TypeEntry] {
    &REGISTRY
}

/// Find a type by type URL (`/pkg.Name`) or fully qualified name
pub fn lookup(name: &str) -> Option<&'static TypeEntry> {
    let full_name = name.strip_prefix('/').unwrap_or(name);
    REGISTRY.iter().find(|entry| entry.descriptor.full_name == full_name)
}

/// Find a type by type URL, fully qualified name, or short name when that is unique
pub fn resolve(name: &str) -> Result<&'static TypeEntry, CodecError> {
    if let Some(entry) = lookup(name) {
        return Ok(entry);
    }

    let candidates: Vec<&'static TypeEntry> =
        REGISTRY.iter().filter(|entry| entry.descriptor.name() == name).collect();
    match candidates.as_slice() {
        [entry] => Ok(*entry),
        [] => Err(CodecError::UnknownType(name.to_string())),
        _ => Err(CodecError::AmbiguousType {
            name: name.to_string(),
            candidates: candidates.iter().map(|e| e.descriptor.full_name).collect(),
        }),
    }
}

/// Field layout of a registered type
pub fn type_structure(name: &str) -> Result<&'static [FieldDescriptor], CodecError> {
    Ok(resolve(name)?.descriptor.fields)
}
