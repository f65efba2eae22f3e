//! Tests for the MCP tool dispatch and the validation layer behind it.
//! None of these tests reach a live RPC endpoint; the cases that could
//! are pointed at a local mock server asserting zero calls.

use mockito::mock;
use secrecy::Secret;
use serde_json::{json, Value};
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;

use solana_mcp_server::{
    config::Config,
    mcp::handler::{dispatch_tool, handle_mcp_request},
    mcp::protocol::{error_codes, Request},
    AppState,
};

fn test_state() -> AppState {
    // Point both networks at the local mock server so an unexpected RPC
    // call fails loudly instead of going to the public devnet.
    let config = Config {
        devnet_rpc_url: mockito::server_url(),
        mainnet_rpc_url: mockito::server_url(),
        ..Config::default()
    };
    AppState::new(config)
}

fn test_state_with_default_wallet(keypair: &Keypair) -> AppState {
    let config = Config {
        devnet_rpc_url: mockito::server_url(),
        mainnet_rpc_url: mockito::server_url(),
        private_key: Some(Secret::new(bs58::encode(keypair.to_bytes()).into_string())),
        ..Config::default()
    };
    AppState::new(config)
}

async fn call(state: &AppState, tool: &str, args: Value) -> solana_mcp_server::wallet::ToolResponse {
    dispatch_tool(tool, &args, state)
        .await
        .unwrap_or_else(|| panic!("unknown tool {tool}"))
}

#[tokio::test]
async fn tools_list_enumerates_the_wallet_surface() {
    let req = Request {
        jsonrpc: "2.0".to_string(),
        id: json!(1),
        method: "tools/list".to_string(),
        params: None,
    };
    let resp = handle_mcp_request(req, test_state()).await.unwrap();
    let result = resp.result.unwrap();
    let tools = result["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 12);

    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    for expected in [
        "get_balance",
        "get_token_accounts",
        "get_token_balance",
        "create_transaction",
        "sign_transaction",
        "send_transaction",
        "generate_keypair",
        "import_private_key",
        "validate_address",
        "check_transaction",
        "switch_network",
        "get_current_network",
    ] {
        assert!(names.contains(&expected), "missing tool {expected}");
    }
}

#[tokio::test]
async fn unknown_tool_is_a_method_not_found_error() {
    let req = Request {
        jsonrpc: "2.0".to_string(),
        id: json!(7),
        method: "tools/call".to_string(),
        params: Some(json!({ "name": "mint_nft", "arguments": {} })),
    };
    let resp = handle_mcp_request(req, test_state()).await.unwrap();
    let err = resp.error.unwrap();
    assert_eq!(err.code, error_codes::METHOD_NOT_FOUND);
    assert_eq!(err.message, "Tool not found: mint_nft");
}

#[tokio::test]
async fn notifications_produce_no_response() {
    let req = Request {
        jsonrpc: "2.0".to_string(),
        id: Value::Null,
        method: "tools/list".to_string(),
        params: None,
    };
    assert!(handle_mcp_request(req, test_state()).await.is_none());
}

#[tokio::test]
async fn validate_address_reports_invalid_input_verbatim() {
    let state = test_state();
    let resp = call(&state, "validate_address", json!({"address": "definitely-not-base58"})).await;
    assert!(resp.is_error);
    assert_eq!(resp.text(), "Invalid address: definitely-not-base58");
}

#[tokio::test]
async fn validate_address_confirms_a_valid_address() {
    let state = test_state();
    let pubkey = Keypair::new().pubkey();
    let resp = call(&state, "validate_address", json!({"address": pubkey.to_string()})).await;
    assert!(!resp.is_error);
    assert_eq!(resp.text(), format!("{pubkey} is a valid Solana address"));
}

#[tokio::test]
async fn generated_keypair_reimports_to_the_same_address() {
    let state = test_state();
    let resp = call(&state, "generate_keypair", json!({})).await;
    assert!(!resp.is_error);

    let text = resp.text().to_string();
    let public_key = text
        .lines()
        .find_map(|l| l.strip_prefix("Public key: "))
        .expect("public key line");
    let private_key = text
        .lines()
        .find_map(|l| l.strip_prefix("Private key (base-58): "))
        .expect("private key line");

    let resp = call(&state, "import_private_key", json!({"privateKey": private_key})).await;
    assert!(!resp.is_error);
    assert_eq!(resp.text(), format!("Imported keypair. Address: {public_key}"));
}

#[tokio::test]
async fn two_generated_keypairs_are_distinct() {
    let state = test_state();
    let a = call(&state, "generate_keypair", json!({})).await;
    let b = call(&state, "generate_keypair", json!({})).await;
    assert_ne!(a.text(), b.text());
}

#[tokio::test]
async fn import_rejects_keys_of_wrong_length() {
    let state = test_state();
    let short = bs58::encode([1u8; 31]).into_string();
    let resp = call(&state, "import_private_key", json!({"privateKey": short})).await;
    assert!(resp.is_error);
    assert_eq!(
        resp.text(),
        "invalid private key length: 31 bytes (expected a 32-byte seed or a 64-byte keypair)"
    );
}

#[tokio::test]
async fn network_switch_round_trip_is_observable_immediately() {
    let state = test_state();

    let resp = call(&state, "get_current_network", json!({})).await;
    assert_eq!(resp.text(), "Current network: devnet");

    let resp = call(&state, "switch_network", json!({"network": "mainnet"})).await;
    assert!(!resp.is_error);
    assert!(resp.text().starts_with("Switched to mainnet"));

    let resp = call(&state, "get_current_network", json!({})).await;
    assert_eq!(resp.text(), "Current network: mainnet");

    let resp = call(&state, "switch_network", json!({"network": "devnet"})).await;
    assert!(!resp.is_error);
    let resp = call(&state, "get_current_network", json!({})).await;
    assert_eq!(resp.text(), "Current network: devnet");
}

#[tokio::test]
async fn switching_to_an_unknown_network_fails_and_keeps_state() {
    let state = test_state();
    let resp = call(&state, "switch_network", json!({"network": "localnet"})).await;
    assert!(resp.is_error);
    assert_eq!(
        resp.text(),
        "Unknown network: localnet (expected 'devnet' or 'mainnet')"
    );
    let resp = call(&state, "get_current_network", json!({})).await;
    assert_eq!(resp.text(), "Current network: devnet");
}

#[tokio::test]
async fn create_transaction_without_any_sender_makes_no_rpc_call() {
    let rpc = mock("POST", "/").expect(0).create();
    let state = test_state();
    let to = Keypair::new().pubkey();

    let resp = call(
        &state,
        "create_transaction",
        json!({"toPublicKey": to.to_string(), "amount": 1000}),
    )
    .await;

    assert!(resp.is_error);
    assert_eq!(
        resp.text(),
        "No public key provided and no default wallet configured. Set PRIVATE_KEY in the server environment to configure a default wallet"
    );
    rpc.assert();
}

#[tokio::test]
async fn amount_validation_fails_before_any_rpc_call() {
    let rpc = mock("POST", "/").expect(0).create();
    let keypair = Keypair::new();
    let state = test_state_with_default_wallet(&keypair);
    let to = Keypair::new().pubkey();

    for (amount, expected) in [
        (json!(0), "Amount must be greater than 0"),
        (json!(-5), "Amount must be greater than 0"),
        (json!(1.5), "Amount must be an integer number of lamports"),
    ] {
        let resp = call(
            &state,
            "create_transaction",
            json!({"toPublicKey": to.to_string(), "amount": amount}),
        )
        .await;
        assert!(resp.is_error);
        assert_eq!(resp.text(), expected);
    }
    rpc.assert();
}

#[tokio::test]
async fn missing_required_argument_is_reported_with_the_operation_verb() {
    let state = test_state();
    let resp = call(&state, "create_transaction", json!({"amount": 1000})).await;
    assert!(resp.is_error);
    assert!(
        resp.text().starts_with("Error creating transaction: "),
        "unexpected message: {}",
        resp.text()
    );
}

#[tokio::test]
async fn signing_without_a_key_reports_the_missing_credential() {
    let state = test_state();
    let resp = call(&state, "sign_transaction", json!({"message": "abc"})).await;
    assert!(resp.is_error);
    assert_eq!(
        resp.text(),
        "No private key provided and no default wallet configured. Set PRIVATE_KEY in the server environment to configure a default wallet"
    );
}

#[tokio::test]
async fn default_wallet_is_used_when_no_public_key_is_passed() {
    // get_balance with a default wallet resolves the key before RPC; the
    // RPC call then fails against the mock server, and the handler turns
    // that failure into an error envelope rather than a panic.
    let keypair = Keypair::new();
    let state = test_state_with_default_wallet(&keypair);

    let resp = call(&state, "get_balance", json!({"commitment": "bogus"})).await;
    assert!(resp.is_error);
    // Commitment validation runs after key resolution and still short-circuits.
    assert_eq!(
        resp.text(),
        "Invalid commitment level: bogus (expected 'processed', 'confirmed' or 'finalized')"
    );
}

#[tokio::test]
async fn direct_method_aliases_reuse_the_tool_logic() {
    let req = Request {
        jsonrpc: "2.0".to_string(),
        id: json!(3),
        method: "get_current_network".to_string(),
        params: None,
    };
    let resp = handle_mcp_request(req, test_state()).await.unwrap();
    let result = resp.result.unwrap();
    assert_eq!(result["isError"], json!(false));
    assert_eq!(result["content"][0]["text"], json!("Current network: devnet"));
}
