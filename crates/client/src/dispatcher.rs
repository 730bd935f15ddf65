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

//! Subscription dispatcher: replays every active subscription on each new block

use crate::{
    events::ChainEvent,
    store::{Store, Subscription},
};
use futures::future::join_all;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A subscription whose refresh failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshFailure {
    /// The subscription
    pub subscription: Subscription,
    /// Why it failed
    pub reason: String,
}

/// Outcome of one refresh tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    /// Height of the block that triggered the tick, if known
    pub height: Option<u64>,
    /// Subscriptions refreshed successfully
    pub refreshed: Vec<Subscription>,
    /// Subscriptions that failed; their cached values are left as they were
    pub failed: Vec<RefreshFailure>,
}

impl RefreshReport {
    /// Whether every subscription refreshed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives store refreshes from block events
#[derive(Clone)]
pub struct Dispatcher {
    store: Store,
}

impl Dispatcher {
    /// Create a dispatcher for `store`
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The store being refreshed
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Refresh every subscription registered at the time of the call
    ///
    /// Refreshes run concurrently and complete in any order. A failing one is
    /// recorded in the report and does not affect the others.
    pub async fn on_new_block(&self) -> RefreshReport {
        let subscriptions = self.store.subscriptions().await;
        debug!("Refreshing {} subscription(s)", subscriptions.len());

        let results = join_all(subscriptions.into_iter().map(|subscription| async move {
            let result = self.store.refresh(&subscription).await;
            (subscription, result)
        }))
        .await;

        let mut report = RefreshReport::default();
        for (subscription, result) in results {
            match result {
                Ok(_) => report.refreshed.push(subscription),
                Err(e) => {
                    warn!("Failed to refresh {}: {}", subscription.operation(), e);
                    report.failed.push(RefreshFailure { subscription, reason: e.to_string() });
                }
            }
        }
        report
    }

    /// Refresh on every [`ChainEvent::NewBlock`] until the channel closes
    ///
    /// `on_report` is called after each tick.
    pub async fn run<F>(&self, mut events: mpsc::Receiver<ChainEvent>, mut on_report: F)
    where
        F: FnMut(&RefreshReport),
    {
        while let Some(event) = events.recv().await {
            match event {
                ChainEvent::NewBlock { height } => {
                    let mut report = self.on_new_block().await;
                    report.height = Some(height);
                    debug!(
                        "Block {}: {} refreshed, {} failed",
                        height,
                        report.refreshed.len(),
                        report.failed.len()
                    );
                    on_report(&report);
                }
                ChainEvent::Connected => info!("Listening for new blocks"),
                ChainEvent::Disconnected => warn!("Block event connection lost"),
                ChainEvent::Error(e) => warn!("Block event error: {}", e),
            }
        }
        debug!("Block event channel closed, dispatcher stopped");
    }
}
