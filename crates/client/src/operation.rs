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

//! The closed set of query operations
//!
//! Every operation pairs a request message with a response message from the
//! codec crate. [`operations!`] generates three enums from one table so that
//! they can never disagree:
//!
//! - [`Operation`]: the fieldless name of an operation (`gov/Vote`)
//! - [`Request`]: an operation together with its parameters
//! - [`Response`]: an operation's decoded result
//!
//! Dispatch on any of them is an exhaustive `match`.

use crate::{
    error::{ParseOperationError, TransportError},
    transport::gateway_path,
};
use chainstore_codec::{
    cosmos::{bank, gov},
    ethermint::evm,
    CodecError, Message, MessageDescriptor,
};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::{fmt, str::FromStr};

const GOV: &str = "/cosmos/gov/v1beta1";
const BANK: &str = "/cosmos/bank/v1beta1";
const EVM: &str = "/ethermint/evm/v1alpha1";

/// Key of a request message's pagination field; pages are driven by the query filter instead
const PAGINATION_FIELD: &str = "pagination";

/// A response type that belongs to exactly one operation
pub trait OperationOutput: Message {
    /// The operation producing this type
    const OPERATION: Operation;

    /// Wrap into a [`Response`]
    fn into_response(self) -> Response;

    /// Unwrap from a [`Response`], `None` if it belongs to another operation
    fn from_response(response: Response) -> Option<Self>;
}

macro_rules! operations {
    ($(
        $(#[$doc:meta])*
        $variant:ident = $name:literal { $request:ty => $response:ty, paginated: $paginated:literal }
    )+) => {
        /// Name of a query operation
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Operation {
            $($(#[$doc])* $variant,)+
        }

        impl Operation {
            /// Every operation, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Module-qualified name, e.g. `gov/Vote`
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Whether the response comes in pages
            pub fn is_paginated(&self) -> bool {
                match self {
                    $(Self::$variant => $paginated,)+
                }
            }

            /// Schema of the request message
            pub fn request_descriptor(&self) -> &'static MessageDescriptor {
                match self {
                    $(Self::$variant => <$request as Message>::descriptor(),)+
                }
            }

            /// Schema of the response message
            pub fn response_descriptor(&self) -> &'static MessageDescriptor {
                match self {
                    $(Self::$variant => <$response as Message>::descriptor(),)+
                }
            }
        }

        /// An operation and its parameters
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum Request {
            $($(#[$doc])* $variant($request),)+
        }

        impl Request {
            /// Operation this request is for
            pub fn operation(&self) -> Operation {
                match self {
                    $(Self::$variant(_) => Operation::$variant,)+
                }
            }

            /// Build a request from JSON parameters, zero-filling what is missing
            pub fn from_params(operation: Operation, params: &Value) -> Result<Self, CodecError> {
                match operation {
                    $(Operation::$variant => Ok(Self::$variant(<$request as Message>::from_json(params)?)),)+
                }
            }

            /// Parameters as JSON, without the pagination field
            pub fn params(&self) -> Result<Value, CodecError> {
                let mut params = match self {
                    $(Self::$variant(request) => request.to_json()?,)+
                };
                if let Value::Object(fields) = &mut params {
                    fields.remove(PAGINATION_FIELD);
                }
                Ok(params)
            }
        }

        $(
            impl From<$request> for Request {
                fn from(request: $request) -> Self {
                    Self::$variant(request)
                }
            }
        )+

        /// Decoded result of an operation
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum Response {
            $($(#[$doc])* $variant($response),)+
        }

        impl Response {
            /// Operation this response belongs to
            pub fn operation(&self) -> Operation {
                match self {
                    $(Self::$variant(_) => Operation::$variant,)+
                }
            }

            /// The zero value of an operation's response
            pub fn empty(operation: Operation) -> Self {
                match operation {
                    $(Operation::$variant => Self::$variant(<$response>::default()),)+
                }
            }

            /// Decode an operation's response from gateway JSON
            pub fn from_json(operation: Operation, value: &Value) -> Result<Self, CodecError> {
                match operation {
                    $(Operation::$variant => Ok(Self::$variant(<$response as Message>::from_json(value)?)),)+
                }
            }

            /// Render as gateway JSON
            pub fn to_json(&self) -> Result<Value, CodecError> {
                match self {
                    $(Self::$variant(response) => response.to_json(),)+
                }
            }
        }

        $(
            impl OperationOutput for $response {
                const OPERATION: Operation = Operation::$variant;

                fn into_response(self) -> Response {
                    Response::$variant(self)
                }

                fn from_response(response: Response) -> Option<Self> {
                    match response {
                        Response::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )+
    };
}

operations! {
    /// One proposal by id
    GovProposal = "gov/Proposal" { gov::QueryProposalRequest => gov::QueryProposalResponse, paginated: false }
    /// All proposals, filterable by status, voter and depositor
    GovProposals = "gov/Proposals" { gov::QueryProposalsRequest => gov::QueryProposalsResponse, paginated: true }
    /// One voter's vote on a proposal
    GovVote = "gov/Vote" { gov::QueryVoteRequest => gov::QueryVoteResponse, paginated: false }
    /// All votes on a proposal
    GovVotes = "gov/Votes" { gov::QueryVotesRequest => gov::QueryVotesResponse, paginated: true }
    /// One depositor's deposit on a proposal
    GovDeposit = "gov/Deposit" { gov::QueryDepositRequest => gov::QueryDepositResponse, paginated: false }
    /// All deposits on a proposal
    GovDeposits = "gov/Deposits" { gov::QueryDepositsRequest => gov::QueryDepositsResponse, paginated: true }
    /// Current tally of a proposal
    GovTallyResult = "gov/TallyResult" { gov::QueryTallyResultRequest => gov::QueryTallyResultResponse, paginated: false }
    /// Governance parameters of one kind (`voting`, `tallying` or `deposit`)
    GovParams = "gov/Params" { gov::QueryParamsRequest => gov::QueryParamsResponse, paginated: false }
    /// Balance of one denomination
    BankBalance = "bank/Balance" { bank::QueryBalanceRequest => bank::QueryBalanceResponse, paginated: false }
    /// Balances of every denomination
    BankAllBalances = "bank/AllBalances" { bank::QueryAllBalancesRequest => bank::QueryAllBalancesResponse, paginated: true }
    /// Supply of every denomination
    BankTotalSupply = "bank/TotalSupply" { bank::QueryTotalSupplyRequest => bank::QueryTotalSupplyResponse, paginated: true }
    /// Supply of one denomination
    BankSupplyOf = "bank/SupplyOf" { bank::QuerySupplyOfRequest => bank::QuerySupplyOfResponse, paginated: false }
    /// EVM balance, code hash and nonce of a hex address
    EvmAccount = "evm/Account" { evm::QueryAccountRequest => evm::QueryAccountResponse, paginated: false }
    /// Cosmos address, sequence and account number of a hex address
    EvmCosmosAccount = "evm/CosmosAccount" { evm::QueryCosmosAccountRequest => evm::QueryCosmosAccountResponse, paginated: false }
    /// EVM balance of a hex address
    EvmBalance = "evm/Balance" { evm::QueryBalanceRequest => evm::QueryBalanceResponse, paginated: false }
    /// One storage slot of a contract
    EvmStorage = "evm/Storage" { evm::QueryStorageRequest => evm::QueryStorageResponse, paginated: false }
    /// Contract bytecode
    EvmCode = "evm/Code" { evm::QueryCodeRequest => evm::QueryCodeResponse, paginated: false }
    /// EVM module parameters
    EvmParams = "evm/Params" { evm::QueryParamsRequest => evm::QueryParamsResponse, paginated: false }
}

impl Operation {
    /// Module part of the name, e.g. `gov`
    pub fn module(&self) -> &'static str {
        self.as_str().split_once('/').map_or("", |(module, _)| module)
    }

    /// Name without the module, e.g. `Vote`
    pub fn short_name(&self) -> &'static str {
        self.as_str().split_once('/').map_or(self.as_str(), |(_, name)| name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    /// Accepts the qualified name, or the short name when only one module has it
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if let Some(operation) = Self::ALL.iter().find(|op| op.as_str().eq_ignore_ascii_case(name)) {
            return Ok(*operation);
        }

        let candidates: Vec<Self> =
            Self::ALL.iter().copied().filter(|op| op.short_name().eq_ignore_ascii_case(name)).collect();
        match candidates.as_slice() {
            [operation] => Ok(*operation),
            [] => Err(ParseOperationError::Unknown(name.to_string())),
            _ => Err(ParseOperationError::Ambiguous {
                name: name.to_string(),
                candidates: candidates.iter().map(Self::as_str).collect(),
            }),
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

impl Request {
    /// REST gateway path of the request, with every identifier percent-encoded
    pub fn route(&self) -> Result<String, TransportError> {
        match self {
            Self::GovProposal(r) => gateway_path(GOV, &["proposals", &r.proposal_id.to_string()]),
            Self::GovProposals(_) => gateway_path(GOV, &["proposals"]),
            Self::GovVote(r) => {
                gateway_path(GOV, &["proposals", &r.proposal_id.to_string(), "votes", &r.voter])
            }
            Self::GovVotes(r) => gateway_path(GOV, &["proposals", &r.proposal_id.to_string(), "votes"]),
            Self::GovDeposit(r) => gateway_path(
                GOV,
                &["proposals", &r.proposal_id.to_string(), "deposits", &r.depositor],
            ),
            Self::GovDeposits(r) => {
                gateway_path(GOV, &["proposals", &r.proposal_id.to_string(), "deposits"])
            }
            Self::GovTallyResult(r) => {
                gateway_path(GOV, &["proposals", &r.proposal_id.to_string(), "tally"])
            }
            Self::GovParams(r) => gateway_path(GOV, &["params", &r.params_type]),
            Self::BankBalance(r) => gateway_path(BANK, &["balances", &r.address, &r.denom]),
            Self::BankAllBalances(r) => gateway_path(BANK, &["balances", &r.address]),
            Self::BankTotalSupply(_) => gateway_path(BANK, &["supply"]),
            Self::BankSupplyOf(r) => gateway_path(BANK, &["supply", &r.denom]),
            Self::EvmAccount(r) => gateway_path(EVM, &["account", &r.address]),
            Self::EvmCosmosAccount(r) => gateway_path(EVM, &["cosmos_account", &r.address]),
            Self::EvmBalance(r) => gateway_path(EVM, &["balances", &r.address]),
            Self::EvmStorage(r) => gateway_path(EVM, &["storage", &r.address, &r.key]),
            Self::EvmCode(r) => gateway_path(EVM, &["codes", &r.address]),
            Self::EvmParams(_) => gateway_path(EVM, &["params"]),
        }
    }

    /// Query string parameters carried by the request message itself
    ///
    /// Only the proposal list has filters that are not path segments. Zero values
    /// mean "no filter" and are left out.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Self::GovProposals(r) = self else {
            return Vec::new();
        };

        let mut pairs = Vec::new();
        if r.proposal_status != 0 {
            pairs.push(("proposal_status".to_string(), r.proposal_status.to_string()));
        }
        if !r.voter.is_empty() {
            pairs.push(("voter".to_string(), r.voter.clone()));
        }
        if !r.depositor.is_empty() {
            pairs.push(("depositor".to_string(), r.depositor.clone()));
        }
        pairs
    }

    /// Check that every path identifier is set
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::GovVote(r) => require("voter", &r.voter),
            Self::GovDeposit(r) => require("depositor", &r.depositor),
            Self::GovParams(r) => require("params_type", &r.params_type),
            Self::BankBalance(r) => {
                require("address", &r.address)?;
                require("denom", &r.denom)
            }
            Self::BankAllBalances(r) => require("address", &r.address),
            Self::BankSupplyOf(r) => require("denom", &r.denom),
            Self::EvmAccount(r) => require("address", &r.address),
            Self::EvmCosmosAccount(r) => require("address", &r.address),
            Self::EvmBalance(r) => require("address", &r.address),
            Self::EvmStorage(r) => {
                require("address", &r.address)?;
                require("key", &r.key)
            }
            Self::EvmCode(r) => require("address", &r.address),
            Self::GovProposal(_)
            | Self::GovProposals(_)
            | Self::GovVotes(_)
            | Self::GovDeposits(_)
            | Self::GovTallyResult(_)
            | Self::BankTotalSupply(_)
            | Self::EvmParams(_) => Ok(()),
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        Err(format!("`{field}` is required"))
    } else {
        Ok(())
    }
}

/// Serialized shape of a [`Request`]: `{"operation": "gov/Vote", "params": {...}}`
#[derive(Serialize, Deserialize)]
struct RequestRepr {
    operation: Operation,
    #[serde(default)]
    params: Value,
}

impl Serialize for Request {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let params = self.params().map_err(ser::Error::custom)?;
        RequestRepr { operation: self.operation(), params }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Request {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RequestRepr::deserialize(deserializer)?;
        Self::from_params(repr.operation, &repr.params).map_err(de::Error::custom)
    }
}

impl Response {
    /// Whether this is the zero value of its operation
    pub fn is_empty(&self) -> bool {
        *self == Self::empty(self.operation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_names_are_unique_and_parse_back() {
        for operation in Operation::ALL {
            assert_eq!(operation.as_str().parse::<Operation>().unwrap(), *operation);
            assert_eq!(Operation::ALL.iter().filter(|op| op.as_str() == operation.as_str()).count(), 1);
        }
    }

    #[test]
    fn test_short_names() {
        assert_eq!("Vote".parse::<Operation>().unwrap(), Operation::GovVote);
        assert_eq!("allbalances".parse::<Operation>().unwrap(), Operation::BankAllBalances);
        assert!(matches!(
            "Params".parse::<Operation>(),
            Err(ParseOperationError::Ambiguous { candidates, .. }) if candidates == ["gov/Params", "evm/Params"]
        ));
        assert!(matches!("Validators".parse::<Operation>(), Err(ParseOperationError::Unknown(_))));
    }

    #[test]
    fn test_paginated_operations() {
        let paginated: Vec<_> =
            Operation::ALL.iter().filter(|op| op.is_paginated()).map(Operation::as_str).collect();
        assert_eq!(
            paginated,
            ["gov/Proposals", "gov/Votes", "gov/Deposits", "bank/AllBalances", "bank/TotalSupply"]
        );
        for operation in Operation::ALL {
            let has_pagination = operation.response_descriptor().field("pagination").is_some();
            assert_eq!(operation.is_paginated(), has_pagination, "{operation}");
        }
    }

    #[test]
    fn test_routes() {
        let vote = Request::from_params(Operation::GovVote, &json!({"proposal_id": "1", "voter": "addr1"}))
            .unwrap();
        assert_eq!(vote.route().unwrap(), "/cosmos/gov/v1beta1/proposals/1/votes/addr1");

        let storage = Request::from_params(
            Operation::EvmStorage,
            &json!({"address": "0xabc", "key": "0x01"}),
        )
        .unwrap();
        assert_eq!(storage.route().unwrap(), "/ethermint/evm/v1alpha1/storage/0xabc/0x01");

        let supply = Request::from_params(Operation::BankTotalSupply, &Value::Null).unwrap();
        assert_eq!(supply.route().unwrap(), "/cosmos/bank/v1beta1/supply");
    }

    #[test]
    fn test_route_escapes_identifiers() {
        let vote = Request::from_params(
            Operation::GovVote,
            &json!({"proposal_id": "1", "voter": "addr?x=1#frag"}),
        )
        .unwrap();
        assert_eq!(vote.route().unwrap(), "/cosmos/gov/v1beta1/proposals/1/votes/addr%3Fx=1%23frag");

        let supply = Request::from_params(Operation::BankSupplyOf, &json!({"denom": "ibc/ABC"})).unwrap();
        assert_eq!(supply.route().unwrap(), "/cosmos/bank/v1beta1/supply/ibc%2FABC");
    }

    #[test]
    fn test_validate_requires_path_identifiers() {
        let vote = Request::from_params(Operation::GovVote, &json!({"proposal_id": 1})).unwrap();
        assert_eq!(vote.validate(), Err("`voter` is required".to_string()));

        let proposals = Request::from_params(Operation::GovProposals, &json!({})).unwrap();
        assert_eq!(proposals.validate(), Ok(()));
    }

    #[test]
    fn test_proposal_filters_become_query_pairs() {
        let request = Request::from_params(
            Operation::GovProposals,
            &json!({"proposal_status": "PROPOSAL_STATUS_VOTING_PERIOD", "voter": "addr1"}),
        )
        .unwrap();
        assert_eq!(
            request.query_pairs(),
            vec![
                ("proposal_status".to_string(), "2".to_string()),
                ("voter".to_string(), "addr1".to_string())
            ]
        );
        assert!(Request::from(gov::QueryProposalsRequest::default()).query_pairs().is_empty());
    }

    #[test]
    fn test_request_serde_shape() {
        let request = Request::from(gov::QueryVotesRequest { proposal_id: 4, pagination: None });
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, json!({"operation": "gov/Votes", "params": {"proposal_id": "4"}}));
        assert_eq!(serde_json::from_value::<Request>(json).unwrap(), request);

        let bare: Request = serde_json::from_value(json!({"operation": "evm/Params"})).unwrap();
        assert_eq!(bare, Request::EvmParams(evm::QueryParamsRequest::default()));
    }

    #[test]
    fn test_response_wrapping() {
        let response = Response::empty(Operation::GovVote);
        assert!(response.is_empty());
        assert_eq!(response.to_json().unwrap(), json!({}));

        let decoded = Response::from_json(
            Operation::BankSupplyOf,
            &json!({"amount": {"denom": "aphoton", "amount": "10"}}),
        )
        .unwrap();
        assert_eq!(decoded.operation(), Operation::BankSupplyOf);
        assert!(!decoded.is_empty());

        let supply = bank::QuerySupplyOfResponse::from_response(decoded).unwrap();
        assert_eq!(supply.amount.unwrap().amount, "10");
        assert!(gov::QueryVoteResponse::from_response(Response::empty(Operation::GovVotes)).is_none());
    }
}
