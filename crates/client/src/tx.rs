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

//! Transaction client: message construction, `SIGN_MODE_DIRECT` signing and broadcast
//!
//! Nothing here is cached. A missing signer is reported as
//! [`TxError::SignerRequired`] before any I/O; everything that goes wrong after
//! the transaction is attempted is [`TxError::BroadcastFailed`].

use crate::{
    error::{TransportError, TxError},
    rpc::TendermintRpc,
    transport::{gateway_path, RestTransport, Transport},
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use chainstore_codec::{
    cosmos::{
        bank, gov,
        tx::{AuthInfo, Fee, ModeInfo, SignDoc, SignMode, SignerInfo, TxBody, TxRaw},
    },
    Any, Message, MessageDescriptor,
};
use chainstore_common::EndpointConfig;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{fmt, str::FromStr, sync::Arc};
use tracing::{debug, info};

/// Gas limit used when the caller does not set a fee
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

const AUTH_ACCOUNTS: &str = "/cosmos/auth/v1beta1/accounts";

macro_rules! tx_messages {
    ($($(#[$doc:meta])* $variant:ident = $name:literal ($msg:ty)),+ $(,)?) => {
        /// Kind of a transaction message
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum MsgKind {
            $($(#[$doc])* $variant,)+
        }

        impl MsgKind {
            /// Every kind, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Module-qualified name, e.g. `gov/MsgVote`
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Schema of the message
            pub fn descriptor(&self) -> &'static MessageDescriptor {
                match self {
                    $(Self::$variant => <$msg as Message>::descriptor(),)+
                }
            }
        }

        /// A transaction message
        #[derive(Debug, Clone, PartialEq)]
        pub enum TxMsg {
            $($(#[$doc])* $variant($msg),)+
        }

        impl TxMsg {
            /// Kind of the message
            pub fn kind(&self) -> MsgKind {
                match self {
                    $(Self::$variant(_) => MsgKind::$variant,)+
                }
            }

            /// Build a message of `kind` from gateway JSON, zero-filling missing fields
            pub fn from_json(kind: MsgKind, data: &Value) -> Result<Self, TxError> {
                let invalid = |e: chainstore_codec::CodecError| TxError::InvalidMessage {
                    kind: kind.to_string(),
                    reason: e.to_string(),
                };
                match kind {
                    $(MsgKind::$variant => <$msg as Message>::from_json(data).map(Self::$variant).map_err(invalid),)+
                }
            }

            /// Pack into an `Any`
            pub fn to_any(&self) -> Any {
                match self {
                    $(Self::$variant(msg) => Any::pack(msg),)+
                }
            }
        }

        $(
            impl From<$msg> for TxMsg {
                fn from(msg: $msg) -> Self {
                    Self::$variant(msg)
                }
            }
        )+
    };
}

tx_messages! {
    /// Submit a governance proposal
    SubmitProposal = "gov/MsgSubmitProposal" (gov::MsgSubmitProposal),
    /// Deposit on a proposal
    Deposit = "gov/MsgDeposit" (gov::MsgDeposit),
    /// Vote on a proposal
    Vote = "gov/MsgVote" (gov::MsgVote),
    /// Transfer coins
    Send = "bank/MsgSend" (bank::MsgSend),
}

impl fmt::Display for MsgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MsgKind {
    type Err = TxError;

    /// Accepts `gov/MsgVote`, `MsgVote`, `cosmos.gov.v1beta1.MsgVote` or its type URL
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim_start_matches('/');
        Self::ALL
            .iter()
            .copied()
            .find(|kind| {
                let short = kind.as_str().split_once('/').map_or(kind.as_str(), |(_, n)| n);
                kind.as_str().eq_ignore_ascii_case(name)
                    || short.eq_ignore_ascii_case(name)
                    || kind.descriptor().full_name == name
            })
            .ok_or_else(|| TxError::InvalidMessage {
                kind: name.to_string(),
                reason: "unknown message kind".to_string(),
            })
    }
}

/// Build a message of `kind` from JSON data and pack it, without any I/O
pub fn build_message(kind: MsgKind, data: &Value) -> Result<Any, TxError> {
    TxMsg::from_json(kind, data).map(|msg| msg.to_any())
}

/// Holds the key that signs transactions
#[async_trait]
pub trait Signer: Send + Sync {
    /// Bech32 account address
    fn address(&self) -> String;

    /// Public key, packed (e.g. `/cosmos.crypto.secp256k1.PubKey`)
    fn public_key(&self) -> Any;

    /// Sign the encoded sign document
    async fn sign_direct(&self, sign_doc: &SignDoc) -> eyre::Result<Vec<u8>>;
}

/// How long broadcasting waits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastMode {
    /// Return after `CheckTx`
    #[default]
    Sync,
    /// Return immediately
    Async,
    /// Return after the transaction is committed in a block
    Commit,
}

impl BroadcastMode {
    /// Tendermint RPC method
    pub fn method(&self) -> &'static str {
        match self {
            Self::Sync => "broadcast_tx_sync",
            Self::Async => "broadcast_tx_async",
            Self::Commit => "broadcast_tx_commit",
        }
    }
}

/// Fee, memo and mode of a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastOptions {
    /// Fee; defaults to no coins and [`DEFAULT_GAS_LIMIT`]
    pub fee: Fee,
    /// Free text attached to the transaction
    pub memo: String,
    /// Height after which the transaction is invalid, 0 for none
    pub timeout_height: u64,
    /// Broadcast mode
    pub mode: BroadcastMode,
}

impl Default for BroadcastOptions {
    fn default() -> Self {
        Self {
            fee: Fee { gas_limit: DEFAULT_GAS_LIMIT, ..Default::default() },
            memo: String::new(),
            timeout_height: 0,
            mode: BroadcastMode::default(),
        }
    }
}

/// Account number and sequence of a signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    /// Bech32 address
    pub address: String,
    /// Account number
    pub account_number: u64,
    /// Next sequence
    pub sequence: u64,
}

/// What the node said about a broadcast transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastReceipt {
    /// Transaction hash, uppercase hex
    pub hash: String,
    /// ABCI result code, 0 on success
    pub code: u32,
    /// Result log
    pub log: String,
    /// Module reporting a non-zero code
    pub codespace: String,
    /// Block height, known only in commit mode
    pub height: Option<u64>,
}

/// Builds, signs and broadcasts transactions
pub struct TxClient {
    transport: Arc<dyn Transport>,
    rpc: TendermintRpc,
    chain_id: String,
    signer: Option<Arc<dyn Signer>>,
}

impl TxClient {
    /// Create a client without a signer
    pub fn new(transport: Arc<dyn Transport>, rpc: TendermintRpc, chain_id: impl Into<String>) -> Self {
        Self { transport, rpc, chain_id: chain_id.into(), signer: None }
    }

    /// Create a client for the configured endpoints and chain id
    pub fn from_config(config: &EndpointConfig) -> Result<Self, TransportError> {
        Ok(Self::new(
            Arc::new(RestTransport::from_config(config)?),
            TendermintRpc::from_config(config)?,
            config.chain_id.clone(),
        ))
    }

    /// Attach a signer
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// The attached signer
    pub fn signer(&self) -> Option<&Arc<dyn Signer>> {
        self.signer.as_ref()
    }

    /// Chain id placed in sign documents
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// See [`build_message`]
    pub fn build_message(&self, kind: MsgKind, data: &Value) -> Result<Any, TxError> {
        build_message(kind, data)
    }

    /// Look up the account number and sequence of `address`
    pub async fn account(&self, address: &str) -> Result<AccountInfo, TxError> {
        let path = gateway_path(AUTH_ACCOUNTS, &[address])
            .map_err(|e| TxError::broadcast(format!("account lookup for {address} failed: {e}")))?;
        let value = self
            .transport
            .get(&path, &[])
            .await
            .map_err(|e| TxError::broadcast(format!("account lookup for {address} failed: {e}")))?;

        let account = value
            .get("account")
            .ok_or_else(|| TxError::broadcast(format!("no account in response for {address}")))?;
        // Ethermint wraps the base account inside an `EthAccount`
        let base = account.get("base_account").unwrap_or(account);

        Ok(AccountInfo {
            address: address.to_string(),
            account_number: account_u64(base, "account_number", address)?,
            sequence: account_u64(base, "sequence", address)?,
        })
    }

    /// Build and sign a transaction carrying `messages`
    pub async fn sign(&self, messages: Vec<Any>, options: &BroadcastOptions) -> Result<TxRaw, TxError> {
        let signer = self.signer.as_ref().ok_or(TxError::SignerRequired)?;
        if messages.is_empty() {
            return Err(TxError::InvalidMessage {
                kind: "tx".to_string(),
                reason: "a transaction needs at least one message".to_string(),
            });
        }

        let account = self.account(&signer.address()).await?;
        debug!(
            "Signing {} message(s) as {} (account {}, sequence {})",
            messages.len(),
            account.address,
            account.account_number,
            account.sequence
        );

        let body = TxBody {
            messages,
            memo: options.memo.clone(),
            timeout_height: options.timeout_height,
        };
        let auth_info = AuthInfo {
            signer_infos: vec![SignerInfo {
                public_key: Some(signer.public_key()),
                mode_info: Some(ModeInfo::single(SignMode::Direct)),
                sequence: account.sequence,
            }],
            fee: Some(options.fee.clone()),
        };
        let sign_doc = SignDoc {
            body_bytes: body.encode_to_bytes(),
            auth_info_bytes: auth_info.encode_to_bytes(),
            chain_id: self.chain_id.clone(),
            account_number: account.account_number,
        };

        let signature = signer
            .sign_direct(&sign_doc)
            .await
            .map_err(|e| TxError::SigningFailed(format!("{e:#}")))?;

        Ok(TxRaw {
            body_bytes: sign_doc.body_bytes,
            auth_info_bytes: sign_doc.auth_info_bytes,
            signatures: vec![signature],
        })
    }

    /// Sign `messages` and broadcast the transaction
    pub async fn sign_and_broadcast(
        &self,
        messages: Vec<Any>,
        options: &BroadcastOptions,
    ) -> Result<BroadcastReceipt, TxError> {
        let tx = self.sign(messages, options).await?;
        self.broadcast(&tx, options.mode).await
    }

    /// Broadcast a signed transaction
    pub async fn broadcast(&self, tx: &TxRaw, mode: BroadcastMode) -> Result<BroadcastReceipt, TxError> {
        let encoded = STANDARD.encode(tx.encode_to_bytes());
        let result = self
            .rpc
            .call(mode.method(), json!({ "tx": encoded }))
            .await
            .map_err(TxError::broadcast)?;

        let receipt = parse_receipt(mode, &result);
        if receipt.code != 0 {
            return Err(TxError::BroadcastFailed {
                reason: format!("code {} ({}): {}", receipt.code, receipt.codespace, receipt.log),
                code: Some(receipt.code),
                hash: Some(receipt.hash),
            });
        }

        info!("Broadcast tx {} ({})", receipt.hash, mode.method());
        Ok(receipt)
    }
}

/// Read a receipt from a `broadcast_tx_*` result
///
/// In commit mode a failed `check_tx` wins; otherwise the `deliver_tx` (or
/// `tx_result` on newer nodes) outcome is reported.
fn parse_receipt(mode: BroadcastMode, result: &Value) -> BroadcastReceipt {
    let outcome = match mode {
        BroadcastMode::Commit => {
            let check = result.get("check_tx").unwrap_or(&Value::Null);
            if json_u64(check.get("code")) != 0 {
                check
            } else {
                result.get("deliver_tx").or_else(|| result.get("tx_result")).unwrap_or(check)
            }
        }
        BroadcastMode::Sync | BroadcastMode::Async => result,
    };

    let text = |value: &Value, field: &str| {
        value.get(field).and_then(Value::as_str).unwrap_or_default().to_string()
    };

    BroadcastReceipt {
        hash: text(result, "hash"),
        code: u32::try_from(json_u64(outcome.get("code"))).unwrap_or(u32::MAX),
        log: text(outcome, "log"),
        codespace: text(outcome, "codespace"),
        height: result.get("height").map(|h| json_u64(Some(h))).filter(|h| *h != 0),
    }
}

/// Account field that must be present, as a number or a decimal string
fn account_u64(account: &Value, field: &str, address: &str) -> Result<u64, TxError> {
    let parsed = match account.get(field) {
        Some(Value::String(s)) => s.parse().ok(),
        Some(other) => other.as_u64(),
        None => None,
    };
    parsed.ok_or_else(|| TxError::broadcast(format!("account {address} has no valid `{field}`")))
}

/// Integer that the node may send as a number or a decimal string
fn json_u64(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) => s.parse().unwrap_or_default(),
        Some(other) => other.as_u64().unwrap_or_default(),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainstore_codec::cosmos::{base::Coin, crypto::PubKey};
    use std::{sync::Mutex, time::Duration};
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    /// Signs with a fixed signature and remembers what it signed
    struct StaticSigner {
        signed: Mutex<Vec<SignDoc>>,
    }

    #[async_trait]
    impl Signer for StaticSigner {
        fn address(&self) -> String {
            "ethm1signer".to_string()
        }

        fn public_key(&self) -> Any {
            Any::pack(&PubKey { key: vec![2; 33] })
        }

        async fn sign_direct(&self, sign_doc: &SignDoc) -> eyre::Result<Vec<u8>> {
            self.signed.lock().unwrap().push(sign_doc.clone());
            Ok(vec![7; 64])
        }
    }

    fn vote() -> Any {
        build_message(
            MsgKind::Vote,
            &json!({"proposal_id": "1", "voter": "ethm1signer", "option": "VOTE_OPTION_YES"}),
        )
        .unwrap()
    }

    async fn mount_account(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/cosmos/auth/v1beta1/accounts/ethm1signer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account": {
                    "@type": "/ethermint.types.v1.EthAccount",
                    "base_account": {"address": "ethm1signer", "account_number": "12", "sequence": "3"},
                    "code_hash": "0x"
                }
            })))
            .mount(server)
            .await;
    }

    fn client(server: &MockServer) -> (TxClient, Arc<StaticSigner>) {
        let signer = Arc::new(StaticSigner { signed: Mutex::new(Vec::new()) });
        let transport = RestTransport::new(server.uri(), Duration::from_secs(5)).unwrap();
        let rpc = TendermintRpc::new(server.uri(), Duration::from_secs(5)).unwrap();
        let client = TxClient::new(Arc::new(transport), rpc, "ethermint_9000-1").with_signer(signer.clone());
        (client, signer)
    }

    #[test]
    fn test_build_message() {
        let any = vote();
        assert_eq!(any.type_url, "/cosmos.gov.v1beta1.MsgVote");
        let msg: gov::MsgVote = any.unpack().unwrap();
        assert_eq!(msg.proposal_id, 1);
        assert_eq!(msg.option(), gov::VoteOption::Yes);

        let err = build_message(MsgKind::Send, &json!({"amount": "lots"})).unwrap_err();
        assert!(matches!(err, TxError::InvalidMessage { ref kind, .. } if kind == "bank/MsgSend"));
    }

    #[test]
    fn test_msg_kind_names() {
        assert_eq!("gov/MsgVote".parse::<MsgKind>().unwrap(), MsgKind::Vote);
        assert_eq!("MsgSend".parse::<MsgKind>().unwrap(), MsgKind::Send);
        assert_eq!("/cosmos.gov.v1beta1.MsgDeposit".parse::<MsgKind>().unwrap(), MsgKind::Deposit);
        assert!("MsgDelegate".parse::<MsgKind>().is_err());
        assert_eq!(TxMsg::from(bank::MsgSend::default()).kind(), MsgKind::Send);
    }

    #[tokio::test]
    async fn test_signer_required_before_any_io() {
        let server = MockServer::start().await;
        let rpc = TendermintRpc::new(server.uri(), Duration::from_secs(5)).unwrap();
        let transport = RestTransport::new(server.uri(), Duration::from_secs(5)).unwrap();
        let client = TxClient::new(Arc::new(transport), rpc, "ethermint_9000-1");

        let err = client.sign_and_broadcast(vec![vote()], &BroadcastOptions::default()).await.unwrap_err();
        assert!(matches!(err, TxError::SignerRequired));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_sign_and_broadcast_sync() {
        chainstore_common::logging::ensure_test_logging(None);
        let server = MockServer::start().await;
        mount_account(&server).await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "broadcast_tx_sync"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"code": 0, "data": "", "log": "[]", "codespace": "", "hash": "ABCDEF"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, signer) = client(&server);
        let options = BroadcastOptions {
            fee: Fee { amount: vec![Coin::new(20u32, "aphoton")], gas_limit: 100_000, ..Default::default() },
            memo: "vote yes".to_string(),
            ..Default::default()
        };
        let receipt = client.sign_and_broadcast(vec![vote()], &options).await.unwrap();
        assert_eq!(receipt.hash, "ABCDEF");
        assert_eq!(receipt.code, 0);
        assert_eq!(receipt.height, None);

        let sign_doc = signer.signed.lock().unwrap()[0].clone();
        assert_eq!(sign_doc.chain_id, "ethermint_9000-1");
        assert_eq!(sign_doc.account_number, 12);
        let auth_info = AuthInfo::decode_bytes(&sign_doc.auth_info_bytes).unwrap();
        assert_eq!(auth_info.signer_infos[0].sequence, 3);
        assert_eq!(auth_info.fee.unwrap().gas_limit, 100_000);
        assert_eq!(TxBody::decode_bytes(&sign_doc.body_bytes).unwrap().memo, "vote yes");

        // The broadcast carries the signed bytes
        let requests = server.received_requests().await.unwrap();
        let broadcast: Value = requests
            .iter()
            .filter(|r| r.url.path() == "/")
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .next()
            .unwrap();
        let tx_bytes = STANDARD.decode(broadcast["params"]["tx"].as_str().unwrap()).unwrap();
        let tx = TxRaw::decode_bytes(&tx_bytes).unwrap();
        assert_eq!(tx.body_bytes, sign_doc.body_bytes);
        assert_eq!(tx.signatures, vec![vec![7; 64]]);
    }

    #[tokio::test]
    async fn test_check_tx_rejection_is_broadcast_failed() {
        let server = MockServer::start().await;
        mount_account(&server).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"code": 5, "log": "insufficient funds", "codespace": "sdk", "hash": "FF00"}
            })))
            .mount(&server)
            .await;

        let (client, _) = client(&server);
        match client.sign_and_broadcast(vec![vote()], &BroadcastOptions::default()).await {
            Err(TxError::BroadcastFailed { code, hash, reason }) => {
                assert_eq!(code, Some(5));
                assert_eq!(hash.as_deref(), Some("FF00"));
                assert!(reason.contains("insufficient funds"));
            }
            other => panic!("expected broadcast failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_rpc_is_broadcast_failed() {
        let server = MockServer::start().await;
        mount_account(&server).await;
        let signer = Arc::new(StaticSigner { signed: Mutex::new(Vec::new()) });
        let transport = RestTransport::new(server.uri(), Duration::from_secs(5)).unwrap();
        let rpc = TendermintRpc::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let client = TxClient::new(Arc::new(transport), rpc, "ethermint_9000-1").with_signer(signer);

        let err = client.sign_and_broadcast(vec![vote()], &BroadcastOptions::default()).await.unwrap_err();
        assert!(matches!(err, TxError::BroadcastFailed { code: None, .. }));
    }

    #[test]
    fn test_commit_receipt() {
        let result = json!({
            "check_tx": {"code": 0, "log": ""},
            "deliver_tx": {"code": 11, "log": "out of gas", "codespace": "sdk"},
            "hash": "AB",
            "height": "90"
        });
        let receipt = parse_receipt(BroadcastMode::Commit, &result);
        assert_eq!(receipt.code, 11);
        assert_eq!(receipt.log, "out of gas");
        assert_eq!(receipt.height, Some(90));

        let newer = json!({"check_tx": {"code": 0}, "tx_result": {"code": 0}, "hash": "AB", "height": "91"});
        assert_eq!(parse_receipt(BroadcastMode::Commit, &newer).code, 0);
    }

    #[tokio::test]
    async fn test_plain_base_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cosmos/auth/v1beta1/accounts/cosmos1plain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account": {"@type": "/cosmos.auth.v1beta1.BaseAccount", "account_number": 4, "sequence": "0"}
            })))
            .mount(&server)
            .await;

        let (client, _) = client(&server);
        let account = client.account("cosmos1plain").await.unwrap();
        assert_eq!((account.account_number, account.sequence), (4, 0));
    }

    #[tokio::test]
    async fn test_incomplete_account_is_broadcast_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cosmos/auth/v1beta1/accounts/ethm1signer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account": {"base_account": {"address": "ethm1signer", "account_number": "12"}}
            })))
            .mount(&server)
            .await;

        let (client, signer) = client(&server);
        let err = client.sign_and_broadcast(vec![vote()], &BroadcastOptions::default()).await.unwrap_err();
        match err {
            TxError::BroadcastFailed { reason, .. } => assert!(reason.contains("`sequence`"), "{reason}"),
            other => panic!("expected broadcast failure, got {other:?}"),
        }
        assert!(signer.signed.lock().unwrap().is_empty());

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/cosmos/auth/v1beta1/accounts/ethm1signer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account": {"account_number": "twelve", "sequence": "3"}
            })))
            .mount(&server)
            .await;
        assert!(matches!(client.account("ethm1signer").await, Err(TxError::BroadcastFailed { .. })));
    }
}
