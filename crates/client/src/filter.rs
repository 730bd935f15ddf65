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

//! Query-string filter of a query: the pagination cursor plus free-form options

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `pagination.key`
pub const PAGINATION_KEY: &str = "pagination.key";
/// `pagination.offset`
pub const PAGINATION_OFFSET: &str = "pagination.offset";
/// `pagination.limit`
pub const PAGINATION_LIMIT: &str = "pagination.limit";
/// `pagination.countTotal`
pub const PAGINATION_COUNT_TOTAL: &str = "pagination.countTotal";

/// Query-string options of a request
///
/// Serializes to the flat gateway form, e.g.
/// `{"pagination.limit": 10, "proposal_status": "2"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Base64 continuation key
    #[serde(rename = "pagination.key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Items to skip; ignored by the node when a key is set
    #[serde(rename = "pagination.offset", default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Page size
    #[serde(rename = "pagination.limit", default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Ask for the total item count
    #[serde(rename = "pagination.countTotal", default, skip_serializing_if = "Option::is_none")]
    pub count_total: Option<bool>,
    /// Any other query-string option
    #[serde(flatten)]
    pub options: BTreeMap<String, String>,
}

impl QueryFilter {
    /// Empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add a free-form option
    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Whether no option is set
    pub fn is_empty(&self) -> bool {
        self.key.is_none()
            && self.offset.is_none()
            && self.limit.is_none()
            && self.count_total.is_none()
            && self.options.is_empty()
    }

    /// The same filter asking for the page at `key`
    ///
    /// The node rejects requests carrying both a key and an offset, so the offset
    /// is dropped.
    pub fn with_page_key(&self, key: impl Into<String>) -> Self {
        Self { key: Some(key.into()), offset: None, ..self.clone() }
    }

    /// Query-string pairs, pagination first, then options in name order
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(key) = &self.key {
            pairs.push((PAGINATION_KEY.to_string(), key.clone()));
        }
        if let Some(offset) = self.offset {
            pairs.push((PAGINATION_OFFSET.to_string(), offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push((PAGINATION_LIMIT.to_string(), limit.to_string()));
        }
        if let Some(count_total) = self.count_total {
            pairs.push((PAGINATION_COUNT_TOTAL.to_string(), count_total.to_string()));
        }
        pairs.extend(self.options.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }

    /// Parse `name=value` style pairs, as given on a command line
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = Self::default();
        for (name, value) in pairs {
            let value = value.into();
            match name.as_ref() {
                PAGINATION_KEY | "key" => filter.key = Some(value),
                PAGINATION_OFFSET | "offset" => filter.offset = Some(parse(name.as_ref(), &value)?),
                PAGINATION_LIMIT | "limit" => filter.limit = Some(parse(name.as_ref(), &value)?),
                PAGINATION_COUNT_TOTAL | "countTotal" | "count_total" => {
                    filter.count_total = Some(parse(name.as_ref(), &value)?)
                }
                other => {
                    filter.options.insert(other.to_string(), value);
                }
            }
        }
        Ok(filter)
    }
}

fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| format!("invalid value `{value}` for {name}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_pairs_order() {
        let filter = QueryFilter::new().option("voter", "addr1").limit(5).option("depositor", "addr2");
        assert_eq!(
            filter.to_query_pairs(),
            vec![
                ("pagination.limit".to_string(), "5".to_string()),
                ("depositor".to_string(), "addr2".to_string()),
                ("voter".to_string(), "addr1".to_string()),
            ]
        );
    }

    #[test]
    fn test_with_page_key_drops_offset() {
        let filter = QueryFilter { offset: Some(20), limit: Some(10), ..Default::default() };
        let next = filter.with_page_key("YWJj");
        assert_eq!(next.key.as_deref(), Some("YWJj"));
        assert_eq!(next.offset, None);
        assert_eq!(next.limit, Some(10));
    }

    #[test]
    fn test_from_pairs() {
        let filter = QueryFilter::from_pairs([
            ("pagination.limit", "3"),
            ("countTotal", "true"),
            ("proposal_status", "2"),
        ])
        .unwrap();
        assert_eq!(filter.limit, Some(3));
        assert_eq!(filter.count_total, Some(true));
        assert_eq!(filter.options.get("proposal_status").map(String::as_str), Some("2"));

        assert!(QueryFilter::from_pairs([("limit", "ten")]).is_err());
    }

    #[test]
    fn test_serde_flat_shape() {
        let filter = QueryFilter::new().limit(2).option("voter", "addr1");
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json, json!({"pagination.limit": 2, "voter": "addr1"}));
        assert_eq!(serde_json::from_value::<QueryFilter>(json).unwrap(), filter);
        assert!(QueryFilter::new().is_empty());
    }
}
