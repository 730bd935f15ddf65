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

//! Chainstore - Cached query and transaction CLI for Ethermint nodes
//!
//! Runs gov, bank and evm queries against a node's REST gateway, keeps the
//! results fresh on every new block, and builds transaction messages.

use chainstore_common::{logging, EndpointConfig};
use clap::{Parser, Subcommand};
use eyre::Result;
use std::path::PathBuf;
use tracing::Level;

mod cmd;

/// Command-line interface for Chainstore
#[derive(Debug, Parser)]
#[command(name = "chainstore")]
#[command(about = "Chainstore - Cached queries and transactions for Ethermint nodes")]
#[command(version)]
pub struct Cli {
    /// REST gateway endpoint used for queries
    #[arg(long, env = "CHAINSTORE_API_URL")]
    pub api_url: Option<String>,

    /// Tendermint RPC endpoint used for block events and broadcasting
    #[arg(long, env = "CHAINSTORE_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Chain id placed in sign documents
    #[arg(long, env = "CHAINSTORE_CHAIN_ID")]
    pub chain_id: Option<String>,

    /// Config file (default: ~/.chainstore/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the supported query operations
    Operations,
    /// Run one query and print the result as JSON
    Query(cmd::QueryArgs),
    /// Keep subscribed queries fresh, refreshing them on every new block
    Watch(cmd::WatchArgs),
    /// Show the field layout of a message type
    Schema {
        /// Type URL, fully qualified name, or unique short name
        type_name: String,
    },
    /// Build a transaction message and print it packed as `Any`
    Msg {
        /// Message kind, e.g. `gov/MsgVote` or `MsgSend`
        kind: String,
        /// Message fields as JSON
        data: String,
    },
    /// Show the resolved endpoint configuration
    Config {
        /// Write the resolved configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

impl Cli {
    /// Endpoint configuration: file (or defaults), then env, then flags
    pub fn endpoint_config(&self) -> Result<EndpointConfig> {
        let config = match &self.config {
            Some(path) => EndpointConfig::load_from(path)?.with_env_overrides(),
            None => EndpointConfig::load()?,
        };
        Ok(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: EndpointConfig) -> EndpointConfig {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(url) = &self.rpc_url {
            config.rpc_url = url.clone();
        }
        if let Some(chain_id) = &self.chain_id {
            config.chain_id = chain_id.clone();
        }
        config
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Watch runs until interrupted; keep its logs on disk as well
    if matches!(cli.command, Commands::Watch(_)) {
        logging::init_logging("chainstore", true, cli.log_level())?;
    } else {
        logging::init_simple_logging(cli.log_level())?;
    }

    match &cli.command {
        Commands::Operations => cmd::list_operations(),
        Commands::Query(args) => cmd::run_query(&cli.endpoint_config()?, args).await,
        Commands::Watch(args) => cmd::watch(&cli.endpoint_config()?, args).await,
        Commands::Schema { type_name } => cmd::show_schema(type_name),
        Commands::Msg { kind, data } => cmd::build_msg(kind, data),
        Commands::Config { save } => cmd::show_config(&cli.endpoint_config()?, *save, cli.config.as_deref()),
    }
}
