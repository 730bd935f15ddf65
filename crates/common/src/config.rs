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

//! Node endpoint configuration
//!
//! Settings are resolved in three layers: built-in defaults, an optional TOML
//! file at `~/.chainstore/config.toml`, then `CHAINSTORE_*` environment variables
//! (a `.env` file in the working directory is honoured as well).

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Default REST (grpc-gateway) endpoint of a local node
pub const DEFAULT_API_URL: &str = "http://localhost:1317";
/// Default Tendermint RPC endpoint of a local node
pub const DEFAULT_RPC_URL: &str = "http://localhost:26657";
/// Default chain id of a local Ethermint devnet
pub const DEFAULT_CHAIN_ID: &str = "ethermint_9000-1";
/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding [`EndpointConfig::api_url`]
pub const ENV_API_URL: &str = "CHAINSTORE_API_URL";
/// Environment variable overriding [`EndpointConfig::rpc_url`]
pub const ENV_RPC_URL: &str = "CHAINSTORE_RPC_URL";
/// Environment variable overriding [`EndpointConfig::chain_id`]
pub const ENV_CHAIN_ID: &str = "CHAINSTORE_CHAIN_ID";

/// Where to reach the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL of the REST gateway used for queries
    pub api_url: String,
    /// Base URL of the Tendermint RPC used for broadcasting and block events
    pub rpc_url: String,
    /// Chain id placed in sign documents
    pub chain_id: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EndpointConfig {
    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().ok_or_else(|| eyre::eyre!("Could not find home directory"))?;
        Ok(home.join(".chainstore").join("config.toml"))
    }

    /// Load configuration from the default location, then apply env overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();
        let path = Self::config_path()?;
        let config = if path.exists() { Self::load_from(&path)? } else { Self::default() };
        Ok(config.with_env_overrides())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| eyre::eyre!("Invalid config file {}: {e}", path.display()))?;
        debug!("Loaded endpoint config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        info!("Saved endpoint config to {}", path.display());
        Ok(())
    }

    /// Apply `CHAINSTORE_*` environment variables on top of this config
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var(ENV_API_URL) {
            self.api_url = url;
        }
        if let Ok(url) = env::var(ENV_RPC_URL) {
            self.rpc_url = url;
        }
        if let Ok(chain_id) = env::var(ENV_CHAIN_ID) {
            self.chain_id = chain_id;
        }
        self
    }

    /// WebSocket endpoint for Tendermint event subscriptions
    ///
    /// Derived from the RPC URL: `http` becomes `ws`, `https` becomes `wss`,
    /// and `/websocket` is appended.
    pub fn ws_url(&self) -> String {
        let base = self.rpc_url.trim_end_matches('/');
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_string()
        };
        format!("{base}/websocket")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EndpointConfig::default();
        assert_eq!(config.api_url, "http://localhost:1317");
        assert_eq!(config.rpc_url, "http://localhost:26657");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_ws_url_derivation() {
        let mut config = EndpointConfig::default();
        assert_eq!(config.ws_url(), "ws://localhost:26657/websocket");

        config.rpc_url = "https://rpc.example.org/".to_string();
        assert_eq!(config.ws_url(), "wss://rpc.example.org/websocket");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = EndpointConfig {
            api_url: "http://node:1317".to_string(),
            chain_id: "ethermint_1-1".to_string(),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = EndpointConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"http://other:1317\"\n").unwrap();

        let loaded = EndpointConfig::load_from(&path).unwrap();
        assert_eq!(loaded.api_url, "http://other:1317");
        assert_eq!(loaded.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var(ENV_API_URL, "http://env-node:1317");
        env::set_var(ENV_CHAIN_ID, "env_9-1");
        let config = EndpointConfig::default().with_env_overrides();
        env::remove_var(ENV_API_URL);
        env::remove_var(ENV_CHAIN_ID);

        assert_eq!(config.api_url, "http://env-node:1317");
        assert_eq!(config.chain_id, "env_9-1");
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    }
}
