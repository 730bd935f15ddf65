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

//! Cache store: decoded query results per operation, plus the set of active subscriptions
//!
//! The store is an explicit instance. It starts from an injected [`StoreState`]
//! (empty by default), returns to the empty state on [`Store::reset`], and can
//! be persisted to and restored from a JSON file.

use crate::{
    cache_key::CacheKey,
    error::QueryError,
    filter::QueryFilter,
    operation::{Operation, OperationOutput, Request, Response},
    query::QueryClient,
};
use chainstore_codec::CodecError;
use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fs,
    hash::{Hash, Hasher},
    path::Path,
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// A query to replay on every new block
///
/// Identity is the cache entry it refreshes: pagination set on the request
/// message itself is ignored, as it is by the cache key and the saved form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Operation and parameters
    pub request: Request,
    /// Query-string filter
    #[serde(default)]
    pub filter: QueryFilter,
    /// Accumulate every page on refresh
    #[serde(default)]
    pub all: bool,
}

impl Subscription {
    /// Create a subscription
    pub fn new(request: impl Into<Request>, filter: QueryFilter, all: bool) -> Self {
        Self { request: request.into(), filter, all }
    }

    /// Operation the subscription refreshes
    pub fn operation(&self) -> Operation {
        self.request.operation()
    }

    /// Cache key the subscription refreshes
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::for_request(&self.request, &self.filter)
    }

    fn identity(&self) -> (Operation, CacheKey, bool) {
        (self.operation(), self.cache_key(), self.all)
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Subscription {}

impl Hash for Subscription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// Options of a store query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Register a subscription after a successful fetch
    #[serde(default)]
    pub subscribe: bool,
    /// Accumulate every page
    #[serde(default)]
    pub all: bool,
}

/// Contents of a [`Store`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    entries: HashMap<Operation, HashMap<CacheKey, Response>>,
    subscriptions: HashSet<Subscription>,
}

impl StoreState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached response, if any
    pub fn entry(&self, operation: Operation, key: &CacheKey) -> Option<&Response> {
        self.entries.get(&operation).and_then(|entries| entries.get(key))
    }

    /// Store a response, replacing whatever was cached under the key
    pub fn insert(&mut self, key: CacheKey, response: Response) {
        self.entries.entry(response.operation()).or_default().insert(key, response);
    }

    /// Add a subscription, returning whether it was new
    pub fn add_subscription(&mut self, subscription: Subscription) -> bool {
        self.subscriptions.insert(subscription)
    }

    /// Active subscriptions, in no particular order
    pub fn subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.subscriptions.iter()
    }

    /// Number of cached entries over every operation
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether nothing is cached and nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.subscriptions.is_empty()
    }

    /// Serializable form of the state
    pub fn to_snapshot(&self) -> Result<StoreSnapshot, CodecError> {
        let mut entries: BTreeMap<Operation, BTreeMap<CacheKey, Value>> = BTreeMap::new();
        for (operation, cached) in &self.entries {
            let rendered = entries.entry(*operation).or_default();
            for (key, response) in cached {
                rendered.insert(key.clone(), response.to_json()?);
            }
        }

        let mut subscriptions: Vec<Subscription> = self.subscriptions.iter().cloned().collect();
        subscriptions.sort_by_key(|s| (s.operation(), s.cache_key(), s.all));

        Ok(StoreSnapshot { entries, subscriptions })
    }

    /// Rebuild a state from its serializable form
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, CodecError> {
        let mut state = Self::default();
        for (operation, cached) in snapshot.entries {
            for (key, value) in cached {
                state.insert(key, Response::from_json(operation, &value)?);
            }
        }
        state.subscriptions.extend(snapshot.subscriptions);
        Ok(state)
    }

    /// Load a state saved by [`StoreState::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot: StoreSnapshot = serde_json::from_str(&content)?;
        let state = Self::from_snapshot(snapshot)?;
        info!(
            "Loaded {} cache entries and {} subscriptions from {}",
            state.len(),
            state.subscriptions.len(),
            path.display()
        );
        Ok(state)
    }

    /// Save the state as JSON, atomically replacing `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.to_snapshot()?)?;
        let temp_file = path.with_extension("tmp");
        fs::write(&temp_file, &content)?;
        fs::rename(&temp_file, path)?;

        info!(
            "Saved {} cache entries and {} subscriptions to {}",
            self.len(),
            self.subscriptions.len(),
            path.display()
        );
        Ok(())
    }
}

/// Serializable form of a [`StoreState`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Cached gateway JSON per operation and cache key
    #[serde(default)]
    pub entries: BTreeMap<Operation, BTreeMap<CacheKey, Value>>,
    /// Active subscriptions
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

/// Entry counts of a store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Cached entries per operation, operations without entries left out
    pub entries: BTreeMap<Operation, usize>,
    /// Cached entries over every operation
    pub total_entries: usize,
    /// Active subscriptions
    pub subscriptions: usize,
}

/// Cached, subscribable view of the node's query operations
///
/// Clones share the same state.
#[derive(Clone)]
pub struct Store {
    state: Arc<RwLock<StoreState>>,
    client: Arc<QueryClient>,
}

impl Store {
    /// Create an empty store
    pub fn new(client: QueryClient) -> Self {
        Self::with_state(client, StoreState::default())
    }

    /// Create a store starting from `state`
    pub fn with_state(client: QueryClient, state: StoreState) -> Self {
        Self { state: Arc::new(RwLock::new(state)), client: Arc::new(client) }
    }

    /// The query client used on misses and refreshes
    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    /// Overwrite the entry under `key` for the response's operation
    pub async fn write(&self, key: CacheKey, response: Response) {
        debug!("Caching {} under {}", response.operation(), key);
        self.state.write().await.insert(key, response);
    }

    /// Cached response, or the operation's zero value when nothing is cached
    pub async fn read(&self, operation: Operation, key: &CacheKey) -> Response {
        self.state
            .read()
            .await
            .entry(operation, key)
            .cloned()
            .unwrap_or_else(|| Response::empty(operation))
    }

    /// Typed [`Store::read`] by request and filter
    pub async fn get<R: OperationOutput>(&self, request: &Request, filter: &QueryFilter) -> R {
        let key = CacheKey::for_request(request, filter);
        R::from_response(self.read(R::OPERATION, &key).await).unwrap_or_default()
    }

    /// Whether a response is cached under `key`
    pub async fn contains(&self, operation: Operation, key: &CacheKey) -> bool {
        self.state.read().await.entry(operation, key).is_some()
    }

    /// Register a subscription; registering an equal one again changes nothing
    pub async fn subscribe(&self, subscription: Subscription) -> bool {
        let added = self.state.write().await.add_subscription(subscription);
        if added {
            debug!("Subscription added");
        }
        added
    }

    /// Remove a subscription, returning whether it was registered
    pub async fn unsubscribe(&self, subscription: &Subscription) -> bool {
        self.state.write().await.subscriptions.remove(subscription)
    }

    /// Active subscriptions, in no particular order
    pub async fn subscriptions(&self) -> Vec<Subscription> {
        self.state.read().await.subscriptions().cloned().collect()
    }

    /// Drop every entry and every subscription
    pub async fn reset(&self) {
        *self.state.write().await = StoreState::default();
        info!("Store reset");
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    /// Entry and subscription counts
    pub async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        let entries: BTreeMap<Operation, usize> = state
            .entries
            .iter()
            .filter(|(_, cached)| !cached.is_empty())
            .map(|(operation, cached)| (*operation, cached.len()))
            .collect();
        StoreStats {
            total_entries: entries.values().sum(),
            entries,
            subscriptions: state.subscriptions.len(),
        }
    }

    /// Fetch, cache and return the result of a request
    ///
    /// On failure the error is logged, the cache is left untouched and the
    /// operation's zero value is returned.
    pub async fn query(
        &self,
        request: &Request,
        filter: &QueryFilter,
        options: QueryOptions,
    ) -> Response {
        match self.try_query(request, filter, options).await {
            Ok(response) => response,
            Err(e) => {
                error!("{e}");
                Response::empty(request.operation())
            }
        }
    }

    /// [`Store::query`] that reports failures instead of swallowing them
    pub async fn try_query(
        &self,
        request: &Request,
        filter: &QueryFilter,
        options: QueryOptions,
    ) -> Result<Response, QueryError> {
        let response = self.client.execute(request, filter, options.all).await?;
        self.write(CacheKey::for_request(request, filter), response.clone()).await;

        if options.subscribe {
            self.subscribe(Subscription::new(request.clone(), filter.clone(), options.all)).await;
        }
        Ok(response)
    }

    /// Re-run a subscription's query and cache the result
    pub async fn refresh(&self, subscription: &Subscription) -> Result<Response, QueryError> {
        let options = QueryOptions { subscribe: false, all: subscription.all };
        self.try_query(&subscription.request, &subscription.filter, options).await
    }

    /// Save the current state to `path`
    pub async fn save_state(&self, path: &Path) -> Result<()> {
        self.state.read().await.save(path)
    }

    /// Replace the current state with the one saved at `path`
    pub async fn load_state(&self, path: &Path) -> Result<()> {
        let state = StoreState::load(path)?;
        *self.state.write().await = state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::TransportError, transport::Transport};
    use async_trait::async_trait;
    use chainstore_codec::cosmos::{bank, base::Coin, gov};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Answers every supply query with an increasing amount
    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn get(&self, _path: &str, _query: &[(String, String)]) -> Result<Value, TransportError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(json!({"amount": {"denom": "aphoton", "amount": n.to_string()}}))
        }
    }

    struct DownTransport;

    #[async_trait]
    impl Transport for DownTransport {
        async fn get(&self, path: &str, _query: &[(String, String)]) -> Result<Value, TransportError> {
            Err(TransportError::InvalidResponse(format!("connection refused for {path}")))
        }
    }

    fn supply_of(denom: &str) -> Request {
        Request::from(bank::QuerySupplyOfRequest { denom: denom.to_string() })
    }

    fn counting_store() -> (Store, Arc<CountingTransport>) {
        let transport = Arc::new(CountingTransport::default());
        (Store::new(QueryClient::new(transport.clone())), transport)
    }

    #[tokio::test]
    async fn test_read_miss_is_zero_value() {
        chainstore_common::logging::ensure_test_logging(None);
        let (store, _) = counting_store();
        let key = CacheKey::for_request(&supply_of("aphoton"), &QueryFilter::new());
        assert_eq!(store.read(Operation::BankSupplyOf, &key).await, Response::empty(Operation::BankSupplyOf));
        assert!(!store.contains(Operation::BankSupplyOf, &key).await);
    }

    #[tokio::test]
    async fn test_query_writes_and_overwrites() {
        let (store, _) = counting_store();
        let request = supply_of("aphoton");
        let filter = QueryFilter::new();

        store.query(&request, &filter, QueryOptions::default()).await;
        let first: bank::QuerySupplyOfResponse = store.get(&request, &filter).await;
        assert_eq!(first.amount, Some(Coin::new(1u32, "aphoton")));

        store.query(&request, &filter, QueryOptions::default()).await;
        let second: bank::QuerySupplyOfResponse = store.get(&request, &filter).await;
        assert_eq!(second.amount, Some(Coin::new(2u32, "aphoton")));
        assert_eq!(store.stats().await.total_entries, 1);
    }

    #[tokio::test]
    async fn test_failed_query_returns_zero_value_and_keeps_cache() {
        let request = Request::from(gov::QueryVoteRequest { proposal_id: 1, voter: "addr1".into() });
        let filter = QueryFilter::new();
        let key = CacheKey::for_request(&request, &filter);

        let mut state = StoreState::new();
        let cached = Response::from_json(
            Operation::GovVote,
            &json!({"vote": {"proposal_id": "1", "voter": "addr1", "option": "VOTE_OPTION_YES"}}),
        )
        .unwrap();
        state.insert(key.clone(), cached.clone());
        let store = Store::with_state(QueryClient::new(Arc::new(DownTransport)), state);

        let options = QueryOptions { subscribe: true, all: false };
        let response = store.query(&request, &filter, options).await;
        assert_eq!(response, Response::empty(Operation::GovVote));
        assert_eq!(store.read(Operation::GovVote, &key).await, cached);
        assert!(store.subscriptions().await.is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_is_idempotent() {
        let (store, _) = counting_store();
        let subscription = Subscription::new(supply_of("aphoton"), QueryFilter::new(), false);

        assert!(store.subscribe(subscription.clone()).await);
        assert!(!store.subscribe(subscription.clone()).await);
        assert_eq!(store.subscriptions().await, vec![subscription.clone()]);

        // `all` is part of the subscription, not of the cache key
        let all = Subscription { all: true, ..subscription.clone() };
        assert_eq!(all.cache_key(), subscription.cache_key());
        assert!(store.subscribe(all).await);

        assert!(store.unsubscribe(&subscription).await);
        assert!(!store.unsubscribe(&subscription).await);
        assert_eq!(store.subscriptions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_query_with_subscribe_registers_subscription() {
        let (store, _) = counting_store();
        let options = QueryOptions { subscribe: true, all: false };
        store.query(&supply_of("aphoton"), &QueryFilter::new(), options).await;
        store.query(&supply_of("aphoton"), &QueryFilter::new(), options).await;
        assert_eq!(store.subscriptions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_restores_empty_state() {
        let (store, _) = counting_store();
        let request = supply_of("aphoton");
        let options = QueryOptions { subscribe: true, all: false };
        store.query(&request, &QueryFilter::new(), options).await;
        assert!(!store.snapshot().await.is_empty());

        store.reset().await;
        assert!(store.snapshot().await.is_empty());
        let value: bank::QuerySupplyOfResponse = store.get(&request, &QueryFilter::new()).await;
        assert_eq!(value, bank::QuerySupplyOfResponse::default());
        assert_eq!(store.stats().await, StoreStats::default());
    }

    #[tokio::test]
    async fn test_state_survives_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state").join("store.json");

        let (store, _) = counting_store();
        let options = QueryOptions { subscribe: true, all: false };
        store.query(&supply_of("aphoton"), &QueryFilter::new(), options).await;
        store.query(&supply_of("stake"), &QueryFilter::new().limit(1), QueryOptions::default()).await;
        store.save_state(&path).await.unwrap();
        assert!(!path.with_extension("tmp").exists());

        let (restored, transport) = counting_store();
        restored.load_state(&path).await.unwrap();
        assert_eq!(restored.snapshot().await, store.snapshot().await);
        assert_eq!(restored.stats().await.entries.get(&Operation::BankSupplyOf), Some(&2));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["subscriptions"][0]["request"]["operation"], "bank/SupplyOf");
    }

    #[tokio::test]
    async fn test_request_pagination_does_not_split_subscriptions() {
        let (store, _) = counting_store();
        let plain = gov::QueryVotesRequest { proposal_id: 1, pagination: None };
        let paged = gov::QueryVotesRequest {
            proposal_id: 1,
            pagination: Some(chainstore_codec::PageRequest { limit: 5, ..Default::default() }),
        };

        let first = Subscription::new(plain, QueryFilter::new(), false);
        let second = Subscription::new(paged, QueryFilter::new(), false);
        assert_eq!(first, second);
        assert_eq!(first.cache_key(), second.cache_key());

        assert!(store.subscribe(first.clone()).await);
        assert!(!store.subscribe(second.clone()).await);
        assert_eq!(store.subscriptions().await.len(), 1);

        assert!(store.unsubscribe(&second).await);
        assert!(store.subscriptions().await.is_empty());

        let all_pages = Subscription::new(first.request.clone(), QueryFilter::new(), true);
        assert_ne!(first, all_pages);
    }
}
