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

//! Cursor pagination (`cosmos.base.query.v1beta1`) and page accumulation

use crate::{impl_message, Message};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Pagination controls attached to list queries
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// Continuation key returned by the previous page
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "crate::serde_helpers::base64_bytes")]
    pub key: Vec<u8>,
    /// Number of items to skip, only honoured when `key` is empty
    #[prost(uint64, tag = "2")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub offset: u64,
    /// Maximum number of items in the page
    #[prost(uint64, tag = "3")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub limit: u64,
    /// Ask the node to count the whole result set
    #[prost(bool, tag = "4")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub count_total: bool,
}

/// Pagination metadata returned with a page
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct PageResponse {
    /// Key for the next page; empty when this is the last page
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "crate::serde_helpers::base64_bytes", alias = "nextKey")]
    pub next_key: Vec<u8>,
    /// Total item count, when requested
    #[prost(uint64, tag = "2")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub total: u64,
}

impl_message! {
    PageRequest = "cosmos.base.query.v1beta1.PageRequest" {
        key = 1: bytes,
        offset = 2: uint64,
        limit = 3: uint64,
        count_total = 4: bool,
    }
    PageResponse = "cosmos.base.query.v1beta1.PageResponse" {
        next_key = 1: bytes,
        total = 2: uint64,
    }
}

impl PageResponse {
    /// The continuation key, `None` when absent
    pub fn next_key(&self) -> Option<&[u8]> {
        (!self.next_key.is_empty()).then_some(self.next_key.as_slice())
    }

    /// The continuation key in the form the REST gateway expects for `pagination.key`
    pub fn next_key_param(&self) -> Option<String> {
        self.next_key().map(|key| STANDARD.encode(key))
    }
}

/// A response that comes in pages
pub trait Paginated: Message {
    /// Pagination metadata of this page
    fn pagination(&self) -> Option<&PageResponse>;

    /// Merge the next page into the accumulated value
    ///
    /// Repeated fields are concatenated in page order; every other field takes the
    /// value of `page`.
    fn merge_page(&mut self, page: Self);

    /// Continuation key, `None` on the last page
    fn next_key_param(&self) -> Option<String> {
        self.pagination().and_then(PageResponse::next_key_param)
    }
}

/// Implement [`Paginated`] for a response with a `pagination` field
///
/// The listed fields are concatenated across pages.
#[macro_export]
macro_rules! impl_paginated {
    ($($ty:ident { $($repeated:ident),* $(,)? })+) => {
        $(
            impl $crate::Paginated for $ty {
                fn pagination(&self) -> Option<&$crate::PageResponse> {
                    self.pagination.as_ref()
                }

                fn merge_page(&mut self, mut page: Self) {
                    $(
                        let mut merged = ::std::mem::take(&mut self.$repeated);
                        merged.append(&mut page.$repeated);
                        page.$repeated = merged;
                    )*
                    *self = page;
                }
            }
        )+
    };
}
