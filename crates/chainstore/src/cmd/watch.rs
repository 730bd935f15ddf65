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

//! Watch command - refresh subscribed queries on every new block

use super::query::{open_store, RequestArgs};
use chainstore_client::{ChainEvent, Dispatcher, NewBlockListener, Operation, QueryOptions, RefreshReport};
use chainstore_common::EndpointConfig;
use clap::Args;
use eyre::{bail, Result};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Capacity of the block event channel
const EVENT_CHANNEL_SIZE: usize = 64;

/// Arguments of the `watch` command
#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Subscribe to these operations before watching (see `operations`); they share the parameters
    pub operations: Vec<String>,

    #[command(flatten)]
    pub request: RequestArgs,

    /// Restore subscriptions from this file, and save the store there on exit
    #[arg(long)]
    pub state_file: Option<PathBuf>,
}

/// Listen for new blocks and print one JSON refresh report per block
///
/// Runs until Ctrl+C or until the event connection gives up.
pub async fn watch(config: &EndpointConfig, args: &WatchArgs) -> Result<()> {
    let operations = args
        .operations
        .iter()
        .map(|name| name.parse::<Operation>())
        .collect::<Result<Vec<_>, _>>()?;
    let store = open_store(config, args.state_file.as_deref()).await?;

    let options = QueryOptions { subscribe: true, all: args.request.all };
    for operation in operations {
        let (request, filter) = args.request.build(operation)?;
        store.try_query(&request, &filter, options).await?;
    }

    let subscriptions = store.subscriptions().await;
    if subscriptions.is_empty() {
        bail!("nothing to watch: give an operation or a state file with subscriptions");
    }
    for subscription in &subscriptions {
        info!("Watching {} ({})", subscription.operation(), subscription.cache_key());
    }

    let (event_tx, event_rx) = mpsc::channel::<ChainEvent>(EVENT_CHANNEL_SIZE);
    let mut listener = NewBlockListener::new(config.ws_url(), event_tx);
    listener.start();
    info!("Listening for new blocks on {}", listener.ws_url());

    let dispatcher = Dispatcher::new(store.clone());
    tokio::select! {
        _ = dispatcher.run(event_rx, print_report) => {
            warn!("Block event stream ended");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }
    listener.stop().await;

    if let Some(path) = &args.state_file {
        store.save_state(path).await?;
    }
    Ok(())
}

fn print_report(report: &RefreshReport) {
    match serde_json::to_string(report) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!("Failed to render refresh report: {}", e),
    }
}
