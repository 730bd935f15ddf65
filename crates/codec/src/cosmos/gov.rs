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

//! `cosmos.gov.v1beta1`: proposals, votes, deposits and their queries

use crate::{cosmos::base::Coin, impl_message, impl_paginated, proto_enum, Any, PageRequest, PageResponse};
use prost_types::{Duration, Timestamp};
use serde::{Deserialize, Serialize};

proto_enum! {
    /// Lifecycle stage of a proposal
    ProposalStatus = "cosmos.gov.v1beta1.ProposalStatus" {
        /// No status given
        Unspecified = 0 => "PROPOSAL_STATUS_UNSPECIFIED",
        /// Collecting deposits
        DepositPeriod = 1 => "PROPOSAL_STATUS_DEPOSIT_PERIOD",
        /// Collecting votes
        VotingPeriod = 2 => "PROPOSAL_STATUS_VOTING_PERIOD",
        /// Accepted
        Passed = 3 => "PROPOSAL_STATUS_PASSED",
        /// Rejected by vote
        Rejected = 4 => "PROPOSAL_STATUS_REJECTED",
        /// Accepted, but execution failed
        Failed = 5 => "PROPOSAL_STATUS_FAILED",
    }
}

proto_enum! {
    /// A voter's choice
    VoteOption = "cosmos.gov.v1beta1.VoteOption" {
        /// No option given
        Unspecified = 0 => "VOTE_OPTION_UNSPECIFIED",
        /// Yes
        Yes = 1 => "VOTE_OPTION_YES",
        /// Abstain
        Abstain = 2 => "VOTE_OPTION_ABSTAIN",
        /// No
        No = 3 => "VOTE_OPTION_NO",
        /// No, and burn the deposit
        NoWithVeto = 4 => "VOTE_OPTION_NO_WITH_VETO",
    }
}

/// A governance proposal
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Proposal {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
    /// Packed proposal content, e.g. a [`TextProposal`]
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Any>,
    /// A [`ProposalStatus`] number
    #[prost(enumeration = "ProposalStatus", tag = "3")]
    #[serde(
        serialize_with = "crate::serde_helpers::enumeration::serialize::<ProposalStatus, _>",
        deserialize_with = "crate::serde_helpers::enumeration::deserialize::<ProposalStatus, _>"
    )]
    pub status: i32,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_tally_result: Option<TallyResult>,
    #[prost(message, optional, tag = "5")]
    #[serde(with = "crate::serde_helpers::timestamp", skip_serializing_if = "Option::is_none")]
    pub submit_time: Option<Timestamp>,
    #[prost(message, optional, tag = "6")]
    #[serde(with = "crate::serde_helpers::timestamp", skip_serializing_if = "Option::is_none")]
    pub deposit_end_time: Option<Timestamp>,
    #[prost(message, repeated, tag = "7")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub total_deposit: Vec<Coin>,
    #[prost(message, optional, tag = "8")]
    #[serde(with = "crate::serde_helpers::timestamp", skip_serializing_if = "Option::is_none")]
    pub voting_start_time: Option<Timestamp>,
    #[prost(message, optional, tag = "9")]
    #[serde(with = "crate::serde_helpers::timestamp", skip_serializing_if = "Option::is_none")]
    pub voting_end_time: Option<Timestamp>,
}

/// Plain-text proposal content
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct TextProposal {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub title: String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub description: String,
}

/// Vote totals, as integer strings
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyResult {
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub yes: String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub abstain: String,
    #[prost(string, tag = "3")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub no: String,
    #[prost(string, tag = "4")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub no_with_veto: String,
}

/// One option of a weighted vote
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightedVoteOption {
    #[prost(enumeration = "VoteOption", tag = "1")]
    #[serde(
        serialize_with = "crate::serde_helpers::enumeration::serialize::<VoteOption, _>",
        deserialize_with = "crate::serde_helpers::enumeration::deserialize::<VoteOption, _>"
    )]
    pub option: i32,
    /// Decimal weight
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub weight: String,
}

/// A vote cast on a proposal
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Vote {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub voter: String,
    /// A [`VoteOption`] number
    #[prost(enumeration = "VoteOption", tag = "3")]
    #[serde(
        serialize_with = "crate::serde_helpers::enumeration::serialize::<VoteOption, _>",
        deserialize_with = "crate::serde_helpers::enumeration::deserialize::<VoteOption, _>"
    )]
    pub option: i32,
    #[prost(message, repeated, tag = "4")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub options: Vec<WeightedVoteOption>,
}

/// A deposit made towards a proposal
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Deposit {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub depositor: String,
    #[prost(message, repeated, tag = "3")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub amount: Vec<Coin>,
}

/// Deposit rules
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositParams {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub min_deposit: Vec<Coin>,
    #[prost(message, optional, tag = "2")]
    #[serde(with = "crate::serde_helpers::duration", skip_serializing_if = "Option::is_none")]
    pub max_deposit_period: Option<Duration>,
}

/// Voting rules
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct VotingParams {
    #[prost(message, optional, tag = "1")]
    #[serde(with = "crate::serde_helpers::duration", skip_serializing_if = "Option::is_none")]
    pub voting_period: Option<Duration>,
}

/// Tally rules; the thresholds are decimals carried as text
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyParams {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "crate::serde_helpers::utf8_bytes")]
    pub quorum: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    #[serde(with = "crate::serde_helpers::utf8_bytes")]
    pub threshold: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    #[serde(with = "crate::serde_helpers::utf8_bytes")]
    pub veto_threshold: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryProposalRequest {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryProposalResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<Proposal>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryProposalsRequest {
    /// Only proposals in this [`ProposalStatus`]
    #[prost(enumeration = "ProposalStatus", tag = "1")]
    #[serde(
        serialize_with = "crate::serde_helpers::enumeration::serialize::<ProposalStatus, _>",
        deserialize_with = "crate::serde_helpers::enumeration::deserialize::<ProposalStatus, _>"
    )]
    pub proposal_status: i32,
    /// Only proposals this address voted on
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub voter: String,
    /// Only proposals this address deposited on
    #[prost(string, tag = "3")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub depositor: String,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryProposalsResponse {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub proposals: Vec<Proposal>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryVoteRequest {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub voter: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryVoteResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<Vote>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryVotesRequest {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryVotesResponse {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub votes: Vec<Vote>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParamsRequest {
    /// One of `voting`, `tallying` or `deposit`
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub params_type: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParamsResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_params: Option<VotingParams>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_params: Option<DepositParams>,
    #[prost(message, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tally_params: Option<TallyParams>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDepositRequest {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub depositor: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDepositResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit: Option<Deposit>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDepositsRequest {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDepositsResponse {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub deposits: Vec<Deposit>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryTallyResultRequest {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryTallyResultResponse {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tally: Option<TallyResult>,
}

/// Submit a new proposal with an initial deposit
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgSubmitProposal {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Any>,
    #[prost(message, repeated, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub initial_deposit: Vec<Coin>,
    #[prost(string, tag = "3")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub proposer: String,
}

/// Cast a vote
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgVote {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub voter: String,
    #[prost(enumeration = "VoteOption", tag = "3")]
    #[serde(
        serialize_with = "crate::serde_helpers::enumeration::serialize::<VoteOption, _>",
        deserialize_with = "crate::serde_helpers::enumeration::deserialize::<VoteOption, _>"
    )]
    pub option: i32,
}

/// Add to a proposal's deposit
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MsgDeposit {
    #[prost(uint64, tag = "1")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub proposal_id: u64,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub depositor: String,
    #[prost(message, repeated, tag = "3")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub amount: Vec<Coin>,
}

impl_message! {
    Proposal = "cosmos.gov.v1beta1.Proposal" {
        proposal_id = 1: uint64,
        content = 2: (optional "google.protobuf.Any"),
        status = 3: (enum "cosmos.gov.v1beta1.ProposalStatus"),
        final_tally_result = 4: (optional "cosmos.gov.v1beta1.TallyResult"),
        submit_time = 5: (optional "google.protobuf.Timestamp"),
        deposit_end_time = 6: (optional "google.protobuf.Timestamp"),
        total_deposit = 7: (repeated (message "cosmos.base.v1beta1.Coin")),
        voting_start_time = 8: (optional "google.protobuf.Timestamp"),
        voting_end_time = 9: (optional "google.protobuf.Timestamp"),
    }
    TextProposal = "cosmos.gov.v1beta1.TextProposal" {
        title = 1: string,
        description = 2: string,
    }
    TallyResult = "cosmos.gov.v1beta1.TallyResult" {
        yes = 1: string,
        abstain = 2: string,
        no = 3: string,
        no_with_veto = 4: string,
    }
    WeightedVoteOption = "cosmos.gov.v1beta1.WeightedVoteOption" {
        option = 1: (enum "cosmos.gov.v1beta1.VoteOption"),
        weight = 2: string,
    }
    Vote = "cosmos.gov.v1beta1.Vote" {
        proposal_id = 1: uint64,
        voter = 2: string,
        option = 3: (enum "cosmos.gov.v1beta1.VoteOption"),
        options = 4: (repeated (message "cosmos.gov.v1beta1.WeightedVoteOption")),
    }
    Deposit = "cosmos.gov.v1beta1.Deposit" {
        proposal_id = 1: uint64,
        depositor = 2: string,
        amount = 3: (repeated (message "cosmos.base.v1beta1.Coin")),
    }
    DepositParams = "cosmos.gov.v1beta1.DepositParams" {
        min_deposit = 1: (repeated (message "cosmos.base.v1beta1.Coin")),
        max_deposit_period = 2: (optional "google.protobuf.Duration"),
    }
    VotingParams = "cosmos.gov.v1beta1.VotingParams" {
        voting_period = 1: (optional "google.protobuf.Duration"),
    }
    TallyParams = "cosmos.gov.v1beta1.TallyParams" {
        quorum = 1: bytes,
        threshold = 2: bytes,
        veto_threshold = 3: bytes,
    }
    QueryProposalRequest = "cosmos.gov.v1beta1.QueryProposalRequest" {
        proposal_id = 1: uint64,
    }
    QueryProposalResponse = "cosmos.gov.v1beta1.QueryProposalResponse" {
        proposal = 1: (optional "cosmos.gov.v1beta1.Proposal"),
    }
    QueryProposalsRequest = "cosmos.gov.v1beta1.QueryProposalsRequest" {
        proposal_status = 1: (enum "cosmos.gov.v1beta1.ProposalStatus"),
        voter = 2: string,
        depositor = 3: string,
        pagination = 4: (optional "cosmos.base.query.v1beta1.PageRequest"),
    }
    QueryProposalsResponse = "cosmos.gov.v1beta1.QueryProposalsResponse" {
        proposals = 1: (repeated (message "cosmos.gov.v1beta1.Proposal")),
        pagination = 2: (optional "cosmos.base.query.v1beta1.PageResponse"),
    }
    QueryVoteRequest = "cosmos.gov.v1beta1.QueryVoteRequest" {
        proposal_id = 1: uint64,
        voter = 2: string,
    }
    QueryVoteResponse = "cosmos.gov.v1beta1.QueryVoteResponse" {
        vote = 1: (optional "cosmos.gov.v1beta1.Vote"),
    }
    QueryVotesRequest = "cosmos.gov.v1beta1.QueryVotesRequest" {
        proposal_id = 1: uint64,
        pagination = 2: (optional "cosmos.base.query.v1beta1.PageRequest"),
    }
    QueryVotesResponse = "cosmos.gov.v1beta1.QueryVotesResponse" {
        votes = 1: (repeated (message "cosmos.gov.v1beta1.Vote")),
        pagination = 2: (optional "cosmos.base.query.v1beta1.PageResponse"),
    }
    QueryParamsRequest = "cosmos.gov.v1beta1.QueryParamsRequest" {
        params_type = 1: string,
    }
    QueryParamsResponse = "cosmos.gov.v1beta1.QueryParamsResponse" {
        voting_params = 1: (optional "cosmos.gov.v1beta1.VotingParams"),
        deposit_params = 2: (optional "cosmos.gov.v1beta1.DepositParams"),
        tally_params = 3: (optional "cosmos.gov.v1beta1.TallyParams"),
    }
    QueryDepositRequest = "cosmos.gov.v1beta1.QueryDepositRequest" {
        proposal_id = 1: uint64,
        depositor = 2: string,
    }
    QueryDepositResponse = "cosmos.gov.v1beta1.QueryDepositResponse" {
        deposit = 1: (optional "cosmos.gov.v1beta1.Deposit"),
    }
    QueryDepositsRequest = "cosmos.gov.v1beta1.QueryDepositsRequest" {
        proposal_id = 1: uint64,
        pagination = 2: (optional "cosmos.base.query.v1beta1.PageRequest"),
    }
    QueryDepositsResponse = "cosmos.gov.v1beta1.QueryDepositsResponse" {
        deposits = 1: (repeated (message "cosmos.gov.v1beta1.Deposit")),
        pagination = 2: (optional "cosmos.base.query.v1beta1.PageResponse"),
    }
    QueryTallyResultRequest = "cosmos.gov.v1beta1.QueryTallyResultRequest" {
        proposal_id = 1: uint64,
    }
    QueryTallyResultResponse = "cosmos.gov.v1beta1.QueryTallyResultResponse" {
        tally = 1: (optional "cosmos.gov.v1beta1.TallyResult"),
    }
    MsgSubmitProposal = "cosmos.gov.v1beta1.MsgSubmitProposal" {
        content = 1: (optional "google.protobuf.Any"),
        initial_deposit = 2: (repeated (message "cosmos.base.v1beta1.Coin")),
        proposer = 3: string,
    }
    MsgVote = "cosmos.gov.v1beta1.MsgVote" {
        proposal_id = 1: uint64,
        voter = 2: string,
        option = 3: (enum "cosmos.gov.v1beta1.VoteOption"),
    }
    MsgDeposit = "cosmos.gov.v1beta1.MsgDeposit" {
        proposal_id = 1: uint64,
        depositor = 2: string,
        amount = 3: (repeated (message "cosmos.base.v1beta1.Coin")),
    }
}

impl_paginated! {
    QueryProposalsResponse { proposals }
    QueryVotesResponse { votes }
    QueryDepositsResponse { deposits }
}
