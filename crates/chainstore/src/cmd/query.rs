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

//! Query command - one query through the cache store

use chainstore_client::{Operation, QueryClient, QueryFilter, QueryOptions, Request, Store};
use chainstore_common::EndpointConfig;
use clap::Args;
use eyre::{bail, eyre, Result, WrapErr};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What to query
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// Request parameter, e.g. `-p proposal_id=1` (repeatable)
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Request parameters as a JSON object; `--param` values are applied on top
    #[arg(long = "params", value_name = "JSON")]
    pub params_json: Option<String>,

    /// Query-string option, e.g. `-f pagination.limit=10` (repeatable)
    #[arg(short = 'f', long = "filter", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    pub filter: Vec<(String, String)>,

    /// Follow the pagination cursor and return every page merged
    #[arg(long)]
    pub all: bool,
}

/// Arguments of the `query` command
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Operation, e.g. `gov/Proposals` or `Balance` (see `operations`)
    pub operation: String,

    #[command(flatten)]
    pub request: RequestArgs,

    /// Load the store from this file first and save it back afterwards
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Register the query for refresh by `watch`
    #[arg(long, requires = "state_file")]
    pub subscribe: bool,

    /// Exit with an error when the node cannot answer instead of printing the empty result
    #[arg(long)]
    pub strict: bool,
}

impl RequestArgs {
    /// Build the request and filter for `operation`
    pub fn build(&self, operation: Operation) -> Result<(Request, QueryFilter)> {
        let params = self.params_value()?;
        debug!("Parameters for {}: {}", operation, params);
        let request = Request::from_params(operation, &params)
            .wrap_err_with(|| format!("invalid parameters for {operation}"))?;
        let filter = QueryFilter::from_pairs(self.filter.iter().cloned()).map_err(|e| eyre!(e))?;
        Ok((request, filter))
    }

    fn params_value(&self) -> Result<Value> {
        let mut params = match &self.params_json {
            Some(json) => match serde_json::from_str(json).wrap_err("invalid --params JSON")? {
                Value::Object(map) => map,
                Value::Null => Map::new(),
                _ => bail!("--params must be a JSON object"),
            },
            None => Map::new(),
        };
        for (name, value) in &self.params {
            params.insert(name.clone(), param_value(value));
        }
        Ok(Value::Object(params))
    }
}

/// Booleans stay booleans; everything else is passed as a string
fn param_value(value: &str) -> Value {
    match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(value.to_string()),
    }
}

/// Parse a `NAME=VALUE` argument
pub fn parse_key_val(arg: &str) -> Result<(String, String), String> {
    let (name, value) =
        arg.split_once('=').ok_or_else(|| format!("expected NAME=VALUE, got `{arg}`"))?;
    if name.is_empty() {
        return Err(format!("missing name in `{arg}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Open a store for `config`, restoring `state_file` when it exists
pub async fn open_store(config: &EndpointConfig, state_file: Option<&Path>) -> Result<Store> {
    let store = Store::new(QueryClient::from_config(config)?);
    if let Some(path) = state_file.filter(|path| path.exists()) {
        store.load_state(path).await?;
    }
    Ok(store)
}

/// Run one query and print the result
pub async fn run_query(config: &EndpointConfig, args: &QueryArgs) -> Result<()> {
    let operation: Operation = args.operation.parse()?;
    let (request, filter) = args.request.build(operation)?;
    let options = QueryOptions { subscribe: args.subscribe, all: args.request.all };

    info!("Querying {} on {}", operation, config.api_url);
    let store = open_store(config, args.state_file.as_deref()).await?;

    let response = if args.strict {
        store.try_query(&request, &filter, options).await?
    } else {
        store.query(&request, &filter, options).await
    };

    if let Some(path) = &args.state_file {
        store.save_state(path).await?;
    }

    println!("{}", serde_json::to_string_pretty(&response.to_json()?)?);
    Ok(())
}
