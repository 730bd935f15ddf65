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

//! Chainstore Common - Shared functionality for Chainstore components
//!
//! This crate provides the pieces used by both the client library and the
//! `chainstore` binary: logging setup and node endpoint configuration.

/// Endpoint configuration for the REST gateway and the Tendermint RPC
pub mod config;
/// Logging setup and utilities for consistent logging across Chainstore components
pub mod logging;

pub use config::*;
pub use logging::*;
