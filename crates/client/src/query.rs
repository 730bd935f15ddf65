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

//! Query client: request routing, response decoding and page accumulation

use crate::{
    error::{QueryError, TransportError},
    filter::QueryFilter,
    operation::{Operation, OperationOutput, Request, Response},
    transport::{RestTransport, Transport},
};
use chainstore_codec::{
    cosmos::{bank, gov},
    ethermint::evm,
    Paginated,
};
use chainstore_common::EndpointConfig;
use std::sync::Arc;
use tracing::debug;

/// Runs query operations against the REST gateway
///
/// Every failure, whether transport or decoding, is reported as
/// [`QueryError::NodeUnavailable`]; raw network errors never escape.
#[derive(Clone)]
pub struct QueryClient {
    transport: Arc<dyn Transport>,
}

impl QueryClient {
    /// Create a client over any transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client for the configured REST endpoint
    pub fn from_config(config: &EndpointConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(RestTransport::from_config(config)?)))
    }

    /// The underlying transport
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Fetch one page of `R`
    pub async fn fetch<R: OperationOutput>(
        &self,
        request: &Request,
        filter: &QueryFilter,
    ) -> Result<R, QueryError> {
        let route = self.prepare::<R>(request)?;
        self.fetch_page(R::OPERATION, &route, request, filter).await
    }

    /// Fetch every page of `R`, following `pagination.next_key` until it is empty
    ///
    /// Pages are requested one after another. Repeated fields are concatenated in
    /// page order; every other field ends up with the last page's value.
    pub async fn fetch_all<R: OperationOutput + Paginated>(
        &self,
        request: &Request,
        filter: &QueryFilter,
    ) -> Result<R, QueryError> {
        let route = self.prepare::<R>(request)?;
        let mut accumulated: R = self.fetch_page(R::OPERATION, &route, request, filter).await?;
        let mut pages = 1usize;

        while let Some(next_key) = accumulated.next_key_param() {
            let page: R =
                self.fetch_page(R::OPERATION, &route, request, &filter.with_page_key(next_key)).await?;
            accumulated.merge_page(page);
            pages += 1;
        }

        debug!("Fetched {} page(s) of {}", pages, R::OPERATION);
        Ok(accumulated)
    }

    /// Run any request, accumulating all pages when `all` is set and the operation paginates
    pub async fn execute(
        &self,
        request: &Request,
        filter: &QueryFilter,
        all: bool,
    ) -> Result<Response, QueryError> {
        match request.operation() {
            Operation::GovProposal => self.one::<gov::QueryProposalResponse>(request, filter).await,
            Operation::GovProposals => {
                self.paged::<gov::QueryProposalsResponse>(request, filter, all).await
            }
            Operation::GovVote => self.one::<gov::QueryVoteResponse>(request, filter).await,
            Operation::GovVotes => self.paged::<gov::QueryVotesResponse>(request, filter, all).await,
            Operation::GovDeposit => self.one::<gov::QueryDepositResponse>(request, filter).await,
            Operation::GovDeposits => {
                self.paged::<gov::QueryDepositsResponse>(request, filter, all).await
            }
            Operation::GovTallyResult => {
                self.one::<gov::QueryTallyResultResponse>(request, filter).await
            }
            Operation::GovParams => self.one::<gov::QueryParamsResponse>(request, filter).await,
            Operation::BankBalance => self.one::<bank::QueryBalanceResponse>(request, filter).await,
            Operation::BankAllBalances => {
                self.paged::<bank::QueryAllBalancesResponse>(request, filter, all).await
            }
            Operation::BankTotalSupply => {
                self.paged::<bank::QueryTotalSupplyResponse>(request, filter, all).await
            }
            Operation::BankSupplyOf => self.one::<bank::QuerySupplyOfResponse>(request, filter).await,
            Operation::EvmAccount => self.one::<evm::QueryAccountResponse>(request, filter).await,
            Operation::EvmCosmosAccount => {
                self.one::<evm::QueryCosmosAccountResponse>(request, filter).await
            }
            Operation::EvmBalance => self.one::<evm::QueryBalanceResponse>(request, filter).await,
            Operation::EvmStorage => self.one::<evm::QueryStorageResponse>(request, filter).await,
            Operation::EvmCode => self.one::<evm::QueryCodeResponse>(request, filter).await,
            Operation::EvmParams => self.one::<evm::QueryParamsResponse>(request, filter).await,
        }
    }

    async fn one<R: OperationOutput>(
        &self,
        request: &Request,
        filter: &QueryFilter,
    ) -> Result<Response, QueryError> {
        self.fetch::<R>(request, filter).await.map(R::into_response)
    }

    async fn paged<R: OperationOutput + Paginated>(
        &self,
        request: &Request,
        filter: &QueryFilter,
        all: bool,
    ) -> Result<Response, QueryError> {
        if all {
            self.fetch_all::<R>(request, filter).await.map(R::into_response)
        } else {
            self.one::<R>(request, filter).await
        }
    }

    fn prepare<R: OperationOutput>(&self, request: &Request) -> Result<String, QueryError> {
        let operation = R::OPERATION;
        if request.operation() != operation {
            return Err(QueryError::InvalidParams {
                operation,
                reason: format!("got a {} request", request.operation()),
            });
        }
        request.validate().map_err(|reason| QueryError::InvalidParams { operation, reason })?;
        request
            .route()
            .map_err(|e| QueryError::InvalidParams { operation, reason: e.to_string() })
    }

    async fn fetch_page<R: OperationOutput>(
        &self,
        operation: Operation,
        route: &str,
        request: &Request,
        filter: &QueryFilter,
    ) -> Result<R, QueryError> {
        let mut query = request.query_pairs();
        query.extend(filter.to_query_pairs());

        let value = self
            .transport
            .get(route, &query)
            .await
            .map_err(|e| QueryError::NodeUnavailable { operation, reason: e.to_string() })?;
        R::from_json(&value)
            .map_err(|e| QueryError::NodeUnavailable { operation, reason: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Serves canned pages keyed by `pagination.key` and records every call
    #[derive(Default)]
    struct PagedTransport {
        pages: Vec<(Option<&'static str>, Value)>,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    #[async_trait]
    impl Transport for PagedTransport {
        async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, TransportError> {
            self.calls.lock().unwrap().push((path.to_string(), query.to_vec()));
            let key = query.iter().find(|(k, _)| k == "pagination.key").map(|(_, v)| v.as_str());
            self.pages
                .iter()
                .find(|(page_key, _)| *page_key == key)
                .map(|(_, body)| body.clone())
                .ok_or_else(|| TransportError::Status { status: 404, body: "no page".into() })
        }
    }

    fn proposal(id: u64) -> Value {
        json!({"proposal_id": id.to_string(), "status": "PROPOSAL_STATUS_PASSED"})
    }

    fn three_pages() -> PagedTransport {
        PagedTransport {
            pages: vec![
                (None, json!({"proposals": [proposal(1), proposal(2)], "pagination": {"next_key": "azE="}})),
                (Some("azE="), json!({"proposals": [proposal(3)], "pagination": {"next_key": "azI="}})),
                (Some("azI="), json!({"proposals": [proposal(4)], "pagination": {"next_key": null, "total": "4"}})),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_all_concatenates_pages_in_order() {
        let transport = Arc::new(three_pages());
        let client = QueryClient::new(transport.clone());
        let request = Request::from(gov::QueryProposalsRequest::default());

        let all: gov::QueryProposalsResponse =
            client.fetch_all(&request, &QueryFilter::new().limit(2)).await.unwrap();
        let ids: Vec<u64> = all.proposals.iter().map(|p| p.proposal_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(all.pagination.as_ref().map(|p| p.total), Some(4));
        assert!(all.next_key_param().is_none());

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(path, _)| path == "/cosmos/gov/v1beta1/proposals"));
        assert!(calls.iter().all(|(_, query)| query.contains(&("pagination.limit".into(), "2".into()))));
    }

    #[tokio::test]
    async fn test_execute_without_all_fetches_one_page() {
        let transport = Arc::new(three_pages());
        let client = QueryClient::new(transport.clone());
        let request = Request::from(gov::QueryProposalsRequest::default());

        let response = client.execute(&request, &QueryFilter::new(), false).await.unwrap();
        let Response::GovProposals(page) = response else { panic!("wrong response") };
        assert_eq!(page.proposals.len(), 2);
        assert_eq!(transport.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_mid_pagination_is_node_unavailable() {
        let mut transport = three_pages();
        transport.pages.pop();
        let client = QueryClient::new(Arc::new(transport));
        let request = Request::from(gov::QueryProposalsRequest::default());

        let err = client.execute(&request, &QueryFilter::new(), true).await.unwrap_err();
        assert!(matches!(err, QueryError::NodeUnavailable { operation: Operation::GovProposals, .. }));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_node_unavailable() {
        let transport = PagedTransport {
            pages: vec![(None, json!({"vote": {"proposal_id": "not a number"}}))],
            ..Default::default()
        };
        let client = QueryClient::new(Arc::new(transport));
        let request =
            Request::from(gov::QueryVoteRequest { proposal_id: 1, voter: "addr1".into() });

        let err = client.execute(&request, &QueryFilter::new(), false).await.unwrap_err();
        assert!(matches!(err, QueryError::NodeUnavailable { .. }));
        assert!(err.to_string().starts_with("API node unavailable, could not perform gov/Vote"));
    }

    #[tokio::test]
    async fn test_missing_path_identifier_is_rejected_before_io() {
        let transport = Arc::new(PagedTransport::default());
        let client = QueryClient::new(transport.clone());
        let request = Request::from(gov::QueryVoteRequest { proposal_id: 1, voter: String::new() });

        let err = client.execute(&request, &QueryFilter::new(), false).await.unwrap_err();
        assert!(matches!(err, QueryError::InvalidParams { .. }));
        assert!(transport.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_checks_response_type() {
        let client = QueryClient::new(Arc::new(PagedTransport::default()));
        let request = Request::from(evm::QueryParamsRequest {});
        let result = client.fetch::<gov::QueryParamsResponse>(&request, &QueryFilter::new()).await;
        assert!(matches!(result, Err(QueryError::InvalidParams { operation: Operation::GovParams, .. })));
    }
}
