//! End-to-end tests of the store against a mock REST gateway

use chainstore_client::{
    CacheKey, Dispatcher, Operation, QueryClient, QueryFilter, QueryOptions, Request, Response,
    RestTransport, Store, Subscription,
};
use chainstore_codec::{cosmos::gov, Message};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use tracing::info;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn store_for(url: &str) -> Store {
    let transport = RestTransport::new(url, Duration::from_secs(2)).unwrap();
    Store::new(QueryClient::new(Arc::new(transport)))
}

fn proposal(id: u64, title: &str) -> Value {
    json!({
        "proposal_id": id.to_string(),
        "content": {
            "@type": "/cosmos.gov.v1beta1.TextProposal",
            "title": title,
            "description": ""
        },
        "status": "PROPOSAL_STATUS_VOTING_PERIOD",
        "final_tally_result": {"yes": "0", "abstain": "0", "no": "0", "no_with_veto": "0"},
        "submit_time": "2021-06-01T00:00:00Z",
        "total_deposit": [{"denom": "aphoton", "amount": "10000000"}]
    })
}

#[tokio::test]
async fn test_all_pages_accumulate_in_order() {
    chainstore_common::logging::ensure_test_logging(None);
    info!("Testing all-pages accumulation");

    let server = MockServer::start().await;
    // Second page, requested with the first page's key ("X")
    Mock::given(method("GET"))
        .and(path("/cosmos/gov/v1beta1/proposals"))
        .and(query_param("pagination.key", "WA=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "proposals": [proposal(3, "C")],
            "pagination": {"next_key": null, "total": "0"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cosmos/gov/v1beta1/proposals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "proposals": [proposal(1, "A"), proposal(2, "B")],
            "pagination": {"next_key": "WA==", "total": "0"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server.uri());
    let request = Request::from_params(Operation::GovProposals, &Value::Null).unwrap();
    let response = store
        .query(&request, &QueryFilter::new(), QueryOptions { subscribe: false, all: true })
        .await;

    let Response::GovProposals(all) = response else { panic!("wrong response kind") };
    let titles: Vec<String> = all
        .proposals
        .iter()
        .filter_map(|p| p.content.as_ref())
        .map(|c| c.unpack::<gov::TextProposal>().unwrap().title)
        .collect();
    assert_eq!(titles, ["A", "B", "C"]);
    assert!(all.pagination.unwrap().next_key.is_empty());

    let cached: gov::QueryProposalsResponse = store.get(&request, &QueryFilter::new()).await;
    assert_eq!(cached.proposals.len(), 3);
}

#[tokio::test]
async fn test_unreachable_node_yields_empty_vote() {
    let store = store_for("http://127.0.0.1:9");
    let request = Request::from_params(
        Operation::GovVote,
        &json!({"proposal_id": 1, "voter": "addr1"}),
    )
    .unwrap();

    let response = store.query(&request, &QueryFilter::new(), QueryOptions::default()).await;
    assert!(response.is_empty());
    assert_eq!(response.to_json().unwrap(), json!({}));
    assert_eq!(store.stats().await.total_entries, 0);
}

#[tokio::test]
async fn test_equal_params_share_a_cache_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cosmos/gov/v1beta1/proposals/1/votes/addr1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vote": {"proposal_id": "1", "voter": "addr1", "option": "VOTE_OPTION_NO"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server.uri());
    let first: Value = serde_json::from_str(r#"{"proposal_id": "1", "voter": "addr1"}"#).unwrap();
    let second: Value = serde_json::from_str(r#"{"voter": "addr1", "proposal_id": 1}"#).unwrap();
    let first = Request::from_params(Operation::GovVote, &first).unwrap();
    let second = Request::from_params(Operation::GovVote, &second).unwrap();

    store.query(&first, &QueryFilter::new(), QueryOptions::default()).await;
    let key = CacheKey::for_request(&second, &QueryFilter::new());
    let Response::GovVote(cached) = store.read(Operation::GovVote, &key).await else {
        panic!("wrong response kind")
    };
    assert_eq!(cached.vote.unwrap().option(), gov::VoteOption::No);
}

#[tokio::test]
async fn test_block_refreshes_subscribed_queries() {
    chainstore_common::logging::ensure_test_logging(None);
    info!("Testing subscription refresh on new blocks");

    let server = MockServer::start().await;
    let tally = |yes: &str| {
        ResponseTemplate::new(200).set_body_json(json!({
            "tally": {"yes": yes, "abstain": "0", "no": "0", "no_with_veto": "0"}
        }))
    };
    Mock::given(method("GET"))
        .and(path("/cosmos/gov/v1beta1/proposals/2/tally"))
        .respond_with(tally("100"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cosmos/gov/v1beta1/proposals/2/tally"))
        .respond_with(tally("250"))
        .mount(&server)
        .await;

    let store = store_for(&server.uri());
    let request = Request::from(gov::QueryTallyResultRequest { proposal_id: 2 });
    let filter = QueryFilter::new();
    store.query(&request, &filter, QueryOptions { subscribe: true, all: false }).await;

    let before: gov::QueryTallyResultResponse = store.get(&request, &filter).await;
    assert_eq!(before.tally.unwrap().yes, "100");

    let dispatcher = Dispatcher::new(store.clone());
    let report = dispatcher.on_new_block().await;
    assert_eq!(report.refreshed, vec![Subscription::new(request.clone(), filter.clone(), false)]);

    let after: gov::QueryTallyResultResponse = store.get(&request, &filter).await;
    assert_eq!(after.tally.unwrap().yes, "250");

    store.reset().await;
    assert!(dispatcher.on_new_block().await.refreshed.is_empty());
    let reset: gov::QueryTallyResultResponse = store.get(&request, &filter).await;
    assert_eq!(reset.to_json().unwrap(), json!({}));
}

#[tokio::test]
async fn test_ibc_denom_stays_one_path_segment() {
    chainstore_common::logging::ensure_test_logging(None);
    info!("Testing identifier escaping in gateway paths");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cosmos/bank/v1beta1/supply/ibc%2FABC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "amount": {"denom": "ibc/ABC", "amount": "42"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server.uri());
    let request = Request::from_params(Operation::BankSupplyOf, &json!({"denom": "ibc/ABC"})).unwrap();
    let response = store.try_query(&request, &QueryFilter::new(), QueryOptions::default()).await.unwrap();

    let Response::BankSupplyOf(supply) = response else { panic!("wrong response kind") };
    assert_eq!(supply.amount.unwrap().amount, "42");
}
