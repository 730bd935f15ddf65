use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use tracing::info;

/// Nothing listens on the discard port
const UNREACHABLE: &str = "http://127.0.0.1:9";

/// The binary, isolated from the user's config file and environment
fn chainstore(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chainstore").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("CHAINSTORE_API_URL")
        .env_remove("CHAINSTORE_RPC_URL")
        .env_remove("CHAINSTORE_CHAIN_ID")
        .current_dir(home.path());
    cmd
}

#[test]
fn test_help_command() {
    chainstore_common::logging::ensure_test_logging(None);
    info!("Testing CLI help command");

    let home = TempDir::new().unwrap();
    chainstore(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cached queries and transactions"));
}

#[test]
fn test_version_command() {
    let home = TempDir::new().unwrap();
    chainstore(&home).arg("--version").assert().success().stdout(predicate::str::contains("chainstore"));
}

#[test]
fn test_missing_subcommand() {
    let home = TempDir::new().unwrap();
    chainstore(&home).assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_operations_lists_every_module() {
    let home = TempDir::new().unwrap();
    chainstore(&home)
        .arg("operations")
        .assert()
        .success()
        .stdout(predicate::str::contains("gov/Proposals"))
        .stdout(predicate::str::contains("bank/AllBalances"))
        .stdout(predicate::str::contains("evm/Storage"));
}

#[test]
fn test_schema_of_message_and_operation() {
    let home = TempDir::new().unwrap();
    chainstore(&home)
        .args(["schema", "MsgVote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/cosmos.gov.v1beta1.MsgVote"))
        .stdout(predicate::str::contains("\"voter\""));

    chainstore(&home)
        .args(["schema", "gov/Votes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cosmos.gov.v1beta1.QueryVotesResponse"));

    chainstore(&home).args(["schema", "NoSuchType"]).assert().failure();
}

#[test]
fn test_msg_builds_packed_message() {
    let home = TempDir::new().unwrap();
    chainstore(&home)
        .args(["msg", "gov/MsgVote", r#"{"proposal_id": "1", "voter": "ethm1abc", "option": "VOTE_OPTION_YES"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"@type\": \"/cosmos.gov.v1beta1.MsgVote\""))
        .stdout(predicate::str::contains("\"hex\""));
}

#[test]
fn test_msg_rejects_unknown_kind_and_bad_data() {
    let home = TempDir::new().unwrap();
    chainstore(&home).args(["msg", "MsgDelegate", "{}"]).assert().failure();
    chainstore(&home)
        .args(["msg", "bank/MsgSend", r#"{"amount": "lots"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid bank/MsgSend message"));
}

#[test]
fn test_unknown_operation() {
    let home = TempDir::new().unwrap();
    chainstore(&home)
        .args(["--api-url", UNREACHABLE, "query", "gov/Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown operation gov/Nope"));
}

#[test]
fn test_unreachable_node_prints_empty_result() {
    let home = TempDir::new().unwrap();
    chainstore(&home)
        .args(["--api-url", UNREACHABLE, "query", "gov/Vote", "-p", "proposal_id=1", "-p", "voter=addr1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{}"))
        .stderr(predicate::str::contains("API node unavailable"));
}

#[test]
fn test_strict_query_fails_on_unreachable_node() {
    let home = TempDir::new().unwrap();
    chainstore(&home)
        .args(["--api-url", UNREACHABLE, "query", "--strict", "gov/TallyResult", "-p", "proposal_id=2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API node unavailable"));
}

#[test]
fn test_failed_subscription_leaves_nothing_to_watch() {
    let home = TempDir::new().unwrap();
    let state = home.path().join("state.json");
    let state = state.to_str().unwrap();

    chainstore(&home)
        .args(["--api-url", UNREACHABLE, "query", "bank/SupplyOf", "-p", "denom=aphoton"])
        .args(["--state-file", state, "--subscribe"])
        .assert()
        .success();
    assert!(home.path().join("state.json").exists());

    chainstore(&home)
        .args(["--api-url", UNREACHABLE, "--rpc-url", UNREACHABLE, "watch", "--state-file", state])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to watch"));
}

#[test]
fn test_watch_takes_several_operations() {
    let home = TempDir::new().unwrap();
    chainstore(&home)
        .args(["--api-url", UNREACHABLE, "--rpc-url", UNREACHABLE, "watch"])
        .args(["gov/TallyResult", "gov/Deposits", "gov/Nope", "-p", "proposal_id=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown operation gov/Nope"));

    chainstore(&home)
        .args(["--api-url", UNREACHABLE, "--rpc-url", UNREACHABLE, "watch"])
        .args(["gov/TallyResult", "gov/Deposits", "-p", "proposal_id=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API node unavailable"));
}

#[test]
fn test_subscribe_requires_state_file() {
    let home = TempDir::new().unwrap();
    chainstore(&home).args(["query", "gov/Params", "--subscribe"]).assert().failure();
}

#[test]
fn test_config_reflects_flags() {
    let home = TempDir::new().unwrap();
    chainstore(&home)
        .args(["--rpc-url", "https://rpc.example.org", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wss://rpc.example.org/websocket"))
        .stdout(predicate::str::contains("http://localhost:1317"));
}
