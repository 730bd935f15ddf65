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

//! Offline commands - operations, schemas, message building and configuration

use chainstore_client::{build_message, MsgKind, Operation};
use chainstore_codec::{registry, Message, MessageDescriptor};
use chainstore_common::EndpointConfig;
use eyre::{Result, WrapErr};
use serde_json::{json, Value};
use std::path::Path;

/// Print every supported operation with its request type
pub fn list_operations() -> Result<()> {
    for operation in Operation::ALL {
        let paged = if operation.is_paginated() { "paginated" } else { "" };
        println!(
            "{:<20} {:<10} {}",
            operation.as_str(),
            paged,
            operation.request_descriptor().full_name
        );
    }
    Ok(())
}

/// Print the field layout of a message type, or of an operation's request and response
pub fn show_schema(type_name: &str) -> Result<()> {
    let schema = match type_name.parse::<Operation>() {
        Ok(operation) => json!({
            "operation": operation,
            "paginated": operation.is_paginated(),
            "request": operation.request_descriptor(),
            "response": operation.response_descriptor(),
        }),
        Err(_) => describe(registry::resolve(type_name)?.descriptor),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn describe(descriptor: &MessageDescriptor) -> Value {
    json!({
        "type_url": descriptor.type_url(),
        "fields": descriptor.fields,
    })
}

/// Build a transaction message from JSON and print it packed, with its binary form in hex
pub fn build_msg(kind: &str, data: &str) -> Result<()> {
    let kind: MsgKind = kind.parse()?;
    let data: Value = serde_json::from_str(data).wrap_err("message data is not valid JSON")?;
    let any = build_message(kind, &data)?;

    let output = json!({
        "any": any.to_json()?,
        "hex": hex::encode(any.encode_to_bytes()),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the resolved configuration, optionally saving it
pub fn show_config(config: &EndpointConfig, save: bool, path: Option<&Path>) -> Result<()> {
    let mut output = serde_json::to_value(config)?;
    output["ws_url"] = Value::String(config.ws_url());
    println!("{}", serde_json::to_string_pretty(&output)?);

    if save {
        match path {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
    }
    Ok(())
}
