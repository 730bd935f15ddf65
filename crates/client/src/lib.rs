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

//! Chainstore Client - Cached query layer for Ethermint nodes
//!
//! Wraps a node's REST gateway in a deduplicated, re-playable client-side store:
//!
//! - [`QueryClient`] runs [`Request`]s, following pagination cursors on demand
//! - [`Store`] caches decoded [`Response`]s by [`CacheKey`] and tracks [`Subscription`]s
//! - [`Dispatcher`] replays every subscription when a [`ChainEvent::NewBlock`] arrives
//! - [`TxClient`] builds, signs and broadcasts transactions
//!
//! ```no_run
//! # use chainstore_client::*;
//! # use chainstore_codec::cosmos::gov;
//! # async fn example() -> eyre::Result<()> {
//! let config = chainstore_common::EndpointConfig::load()?;
//! let store = Store::new(QueryClient::from_config(&config)?);
//!
//! let request = Request::from(gov::QueryVoteRequest { proposal_id: 1, voter: "ethm1...".into() });
//! let options = QueryOptions { subscribe: true, all: false };
//! let vote = store.query(&request, &QueryFilter::new(), options).await;
//! # Ok(())
//! # }
//! ```

pub mod cache_key;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod filter;
pub mod operation;
pub mod query;
pub mod rpc;
pub mod store;
pub mod transport;
pub mod tx;

pub use cache_key::CacheKey;
pub use dispatcher::{Dispatcher, RefreshFailure, RefreshReport};
pub use error::{ParseOperationError, QueryError, TransportError, TxError};
pub use events::{ChainEvent, NewBlockListener};
pub use filter::QueryFilter;
pub use operation::{Operation, OperationOutput, Request, Response};
pub use query::QueryClient;
pub use rpc::TendermintRpc;
pub use store::{QueryOptions, Store, StoreSnapshot, StoreState, StoreStats, Subscription};
pub use transport::{RestTransport, Transport};
pub use tx::{
    build_message, AccountInfo, BroadcastMode, BroadcastOptions, BroadcastReceipt, MsgKind,
    Signer, TxClient, TxMsg,
};
