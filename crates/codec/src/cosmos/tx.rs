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

//! `cosmos.tx.v1beta1`: the transaction envelope signed in `SIGN_MODE_DIRECT`

use crate::{cosmos::base::Coin, impl_message, proto_enum, Any};
use serde::{Deserialize, Serialize};

proto_enum! {
    /// How a signer produced its signature
    SignMode = "cosmos.tx.signing.v1beta1.SignMode" {
        /// Not set; rejected by the node
        Unspecified = 0 => "SIGN_MODE_UNSPECIFIED",
        /// Signature over the protobuf [`SignDoc`]
        Direct = 1 => "SIGN_MODE_DIRECT",
        /// Signature over a human readable rendering
        Textual = 2 => "SIGN_MODE_TEXTUAL",
        /// Signature over the legacy Amino JSON rendering
        LegacyAminoJson = 127 => "SIGN_MODE_LEGACY_AMINO_JSON",
    }
}

/// Messages and metadata of a transaction
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct TxBody {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub messages: Vec<Any>,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub memo: String,
    /// Block height after which the transaction is no longer valid, 0 for none
    #[prost(uint64, tag = "3")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub timeout_height: u64,
}

/// Signers and fee of a transaction
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthInfo {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub signer_infos: Vec<SignerInfo>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
}

/// One signer's key, sign mode and sequence
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerInfo {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<Any>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_info: Option<ModeInfo>,
    #[prost(uint64, tag = "3")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub sequence: u64,
}

/// Signing mode of a single-key signer
///
/// Multisig signers are not supported, so only the `single` arm of the upstream
/// `oneof` is modelled; the wire encoding is the same.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeInfo {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single: Option<mode_info::Single>,
}

/// Nested types of [`ModeInfo`]
pub mod mode_info {
    use super::SignMode;
    use crate::impl_message;
    use serde::{Deserialize, Serialize};

    /// Sign mode of one key
    #[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Single {
        #[prost(enumeration = "SignMode", tag = "1")]
        #[serde(
            serialize_with = "crate::serde_helpers::enumeration::serialize::<SignMode, _>",
            deserialize_with = "crate::serde_helpers::enumeration::deserialize::<SignMode, _>"
        )]
        pub mode: i32,
    }

    impl_message! {
        Single = "cosmos.tx.v1beta1.ModeInfo.Single" {
            mode = 1: (enum "cosmos.tx.signing.v1beta1.SignMode"),
        }
    }
}

/// Fee paid for a transaction
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Fee {
    #[prost(message, repeated, tag = "1")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub amount: Vec<Coin>,
    #[prost(uint64, tag = "2")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub gas_limit: u64,
    #[prost(string, tag = "3")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub payer: String,
    #[prost(string, tag = "4")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub granter: String,
}

/// The document a `SIGN_MODE_DIRECT` signer signs
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct SignDoc {
    /// Encoded [`TxBody`]
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "crate::serde_helpers::base64_bytes")]
    pub body_bytes: Vec<u8>,
    /// Encoded [`AuthInfo`]
    #[prost(bytes = "vec", tag = "2")]
    #[serde(with = "crate::serde_helpers::base64_bytes")]
    pub auth_info_bytes: Vec<u8>,
    #[prost(string, tag = "3")]
    #[serde(deserialize_with = "crate::serde_helpers::null_default")]
    pub chain_id: String,
    #[prost(uint64, tag = "4")]
    #[serde(with = "crate::serde_helpers::u64_string")]
    pub account_number: u64,
}

/// A signed transaction ready for broadcast
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct TxRaw {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "crate::serde_helpers::base64_bytes")]
    pub body_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    #[serde(with = "crate::serde_helpers::base64_bytes")]
    pub auth_info_bytes: Vec<u8>,
    /// One signature per signer, in `signer_infos` order
    #[prost(bytes = "vec", repeated, tag = "3")]
    #[serde(with = "crate::serde_helpers::base64_bytes_vec")]
    pub signatures: Vec<Vec<u8>>,
}

impl_message! {
    TxBody = "cosmos.tx.v1beta1.TxBody" {
        messages = 1: (repeated (message "google.protobuf.Any")),
        memo = 2: string,
        timeout_height = 3: uint64,
    }
    AuthInfo = "cosmos.tx.v1beta1.AuthInfo" {
        signer_infos = 1: (repeated (message "cosmos.tx.v1beta1.SignerInfo")),
        fee = 2: (optional "cosmos.tx.v1beta1.Fee"),
    }
    SignerInfo = "cosmos.tx.v1beta1.SignerInfo" {
        public_key = 1: (optional "google.protobuf.Any"),
        mode_info = 2: (optional "cosmos.tx.v1beta1.ModeInfo"),
        sequence = 3: uint64,
    }
    ModeInfo = "cosmos.tx.v1beta1.ModeInfo" {
        single = 1: (optional "cosmos.tx.v1beta1.ModeInfo.Single"),
    }
    Fee = "cosmos.tx.v1beta1.Fee" {
        amount = 1: (repeated (message "cosmos.base.v1beta1.Coin")),
        gas_limit = 2: uint64,
        payer = 3: string,
        granter = 4: string,
    }
    SignDoc = "cosmos.tx.v1beta1.SignDoc" {
        body_bytes = 1: bytes,
        auth_info_bytes = 2: bytes,
        chain_id = 3: string,
        account_number = 4: uint64,
    }
    TxRaw = "cosmos.tx.v1beta1.TxRaw" {
        body_bytes = 1: bytes,
        auth_info_bytes = 2: bytes,
        signatures = 3: (repeated bytes),
    }
}

impl ModeInfo {
    /// Single signer in the given mode
    pub fn single(mode: SignMode) -> Self {
        Self { single: Some(mode_info::Single { mode: mode.into() }) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cosmos::bank::MsgSend, Message};

    #[test]
    fn test_mode_info_wire_layout() {
        // single (1, len 2) { mode (1, varint) = 1 }
        assert_eq!(ModeInfo::single(SignMode::Direct).encode_to_bytes(), vec![0x0a, 0x02, 0x08, 0x01]);
    }

    #[test]
    fn test_tx_raw_roundtrip_and_json() {
        let body = TxBody {
            messages: vec![Any::pack(&MsgSend {
                from_address: "cosmos1from".to_string(),
                to_address: "cosmos1to".to_string(),
                amount: vec![Coin::new(5u32, "aphoton")],
            })],
            memo: "hi".to_string(),
            timeout_height: 0,
        };
        let raw = TxRaw {
            body_bytes: body.encode_to_bytes(),
            auth_info_bytes: AuthInfo::default().encode_to_bytes(),
            signatures: vec![vec![1, 2, 3]],
        };

        let decoded = TxRaw::decode_bytes(&raw.encode_to_bytes()).unwrap();
        assert_eq!(decoded, raw);
        assert_eq!(TxBody::decode_bytes(&decoded.body_bytes).unwrap(), body);

        let json = raw.to_json().unwrap();
        assert_eq!(json["signatures"], serde_json::json!(["AQID"]));
        assert_eq!(TxRaw::from_json(&json).unwrap(), raw);
    }

    #[test]
    fn test_body_json_expands_registered_messages() {
        let body = TxBody {
            messages: vec![Any::pack(&MsgSend::default())],
            ..Default::default()
        };
        let json = body.to_json().unwrap();
        assert_eq!(json["messages"][0]["@type"], "/cosmos.bank.v1beta1.MsgSend");
        assert_eq!(json["messages"][0]["from_address"], "");
        assert_eq!(TxBody::from_json(&json).unwrap(), body);
    }
}
