//! # MCP Handler Module
//!
//! This module implements the Model Context Protocol (MCP) dispatch for
//! the Solana wallet server. It handles incoming MCP requests and routes
//! them to the wallet operation handlers.
//!
//! ## Supported Tools
//!
//! ### Queries
//! - `get_balance` - Native balance of an account
//! - `get_token_accounts` - SPL token accounts owned by an address
//! - `get_token_balance` - Balance of a single token account
//! - `check_transaction` - Status of a submitted transaction
//!
//! ### Transactions
//! - `create_transaction` - Build an unsigned transfer message
//! - `sign_transaction` - Sign a transfer message
//! - `send_transaction` - Submit a signed transaction
//!
//! ### Keys and Network
//! - `generate_keypair` / `import_private_key` / `validate_address`
//! - `switch_network` / `get_current_network`

use crate::mcp::protocol::{error_codes, Request, Response};
use crate::wallet::{balance, keys, network, transactions, ToolResponse};
use crate::{utils, AppState};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::info;

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tool_call(req, state).await,
        // Convenience aliases to support direct method calls from CLI
        // clients; rewritten into tools/call to reuse the same logic
        "get_balance" | "get_token_accounts" | "get_token_balance" | "create_transaction"
        | "sign_transaction" | "send_transaction" | "generate_keypair" | "import_private_key"
        | "validate_address" | "check_transaction" | "switch_network" | "get_current_network" => {
            let name = req.method.clone();
            let wrapped = Request {
                jsonrpc: req.jsonrpc.clone(),
                id: req.id.clone(),
                method: "tools/call".to_string(),
                params: Some(json!({
                    "name": name,
                    "arguments": req.params.clone().unwrap_or_else(|| json!({}))
                })),
            };
            handle_tool_call(wrapped, state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request by dispatching it to the correct tool logic.
async fn handle_tool_call(req: Request, state: AppState) -> Response {
    let params = match req.params.as_ref() {
        Some(p) => p,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".into(),
            )
        }
    };

    let tool_name = match utils::get_required_arg::<String>(params, "name", &req.id) {
        Ok(name) => name,
        Err(err_resp) => return err_resp,
    };

    let empty_args = json!({});
    let args = params.get("arguments").unwrap_or(&empty_args);

    match dispatch_tool(&tool_name, args, &state).await {
        Some(envelope) => match serde_json::to_value(&envelope) {
            Ok(result) => Response::success(req.id, result),
            Err(e) => Response::error(req.id, error_codes::INTERNAL_ERROR, e.to_string()),
        },
        None => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Tool not found: {}", tool_name),
        ),
    }
}

/// The verb used when the dispatch boundary itself has to report a
/// failure (malformed arguments, mostly).
fn tool_verb(name: &str) -> &'static str {
    match name {
        "get_balance" => "getting balance",
        "get_token_accounts" => "getting token accounts",
        "get_token_balance" => "getting token balance",
        "create_transaction" => "creating transaction",
        "sign_transaction" => "signing transaction",
        "send_transaction" => "sending transaction",
        "generate_keypair" => "generating keypair",
        "import_private_key" => "importing private key",
        "validate_address" => "validating address",
        "check_transaction" => "checking transaction",
        "switch_network" => "switching network",
        "get_current_network" => "getting current network",
        _ => "handling request",
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, args: &Value) -> Result<T, ToolResponse> {
    serde_json::from_value(args.clone())
        .map_err(|e| ToolResponse::error(format!("Error {}: {}", tool_verb(tool), e)))
}

/// Route a tool call to its operation handler and collapse the outcome
/// into the result envelope. Returns `None` for an unknown tool name.
///
/// Every handler converts its own faults into an error envelope; this
/// boundary only has to cover argument deserialization, which it reports
/// as `"Error {verb}: {message}"`.
pub async fn dispatch_tool(name: &str, args: &Value, state: &AppState) -> Option<ToolResponse> {
    let ctx = state.wallet.as_ref();

    let envelope = match name {
        "get_balance" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(balance::get_balance(ctx, a).await),
            Err(resp) => resp,
        },
        "get_token_accounts" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(balance::get_token_accounts(ctx, a).await),
            Err(resp) => resp,
        },
        "get_token_balance" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(balance::get_token_balance(ctx, a).await),
            Err(resp) => resp,
        },
        "create_transaction" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(transactions::create_transaction(ctx, a).await),
            Err(resp) => resp,
        },
        "sign_transaction" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(transactions::sign_transaction(ctx, a).await),
            Err(resp) => resp,
        },
        "send_transaction" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(transactions::send_transaction(ctx, a).await),
            Err(resp) => resp,
        },
        "check_transaction" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(transactions::check_transaction(ctx, a).await),
            Err(resp) => resp,
        },
        "generate_keypair" => ToolResponse::from_result(keys::generate_keypair()),
        "import_private_key" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(keys::import_private_key(a)),
            Err(resp) => resp,
        },
        "validate_address" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(keys::validate_address_tool(a)),
            Err(resp) => resp,
        },
        "switch_network" => match parse_args(name, args) {
            Ok(a) => ToolResponse::from_result(network::switch_network(ctx, a)),
            Err(resp) => resp,
        },
        "get_current_network" => ToolResponse::from_result(network::get_current_network(ctx)),
        _ => return None,
    };

    Some(envelope)
}

/// Handles the 'initialize' request.
fn handle_initialize(req: &Request) -> Response {
    let server_info = json!({
        "name": "solana_mcp",
        "version": "0.1.0"
    });
    let capabilities = json!({ "tools": { "listChanged": false } });
    let instructions =
        "Solana wallet MCP server for balance queries, transaction construction, signing and submission, keypair management, and devnet/mainnet switching.";

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": "2025-06-18",
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

/// Handles the 'tools/list' request by returning a JSON definition of all available tools.
fn handle_tools_list(req: &Request) -> Response {
    let tools = json!([
        {
            "name": "get_balance",
            "description": "Get the native SOL balance of an address. Falls back to the default wallet when publicKey is omitted.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "publicKey": {"type": "string", "description": "Base-58 account address. Optional when a default wallet is configured."},
                    "commitment": {"type": "string", "enum": ["processed", "confirmed", "finalized"], "description": "Staleness tolerance for the read (default 'confirmed')."}
                },
                "additionalProperties": false
            }
        },
        {
            "name": "get_token_accounts",
            "description": "List the SPL token accounts owned by an address. Falls back to the default wallet when publicKey is omitted.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "publicKey": {"type": "string", "description": "Base-58 owner address. Optional when a default wallet is configured."}
                },
                "additionalProperties": false
            }
        },
        {
            "name": "get_token_balance",
            "description": "Get the balance of a single SPL token account.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "tokenAccount": {"type": "string", "description": "Base-58 token account address."},
                    "commitment": {"type": "string", "enum": ["processed", "confirmed", "finalized"]}
                },
                "required": ["tokenAccount"],
                "additionalProperties": false
            }
        },
        {
            "name": "create_transaction",
            "description": "Build an unsigned SOL transfer. Returns the base-58 encoded transaction message for sign_transaction.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "toPublicKey": {"type": "string", "description": "Recipient address."},
                    "amount": {"type": "number", "description": "Amount in lamports (positive integer)."},
                    "fromPublicKey": {"type": "string", "description": "Sender address. Defaults to the configured wallet."},
                    "commitment": {"type": "string", "enum": ["processed", "confirmed", "finalized"]}
                },
                "required": ["toPublicKey", "amount"],
                "additionalProperties": false
            }
        },
        {
            "name": "sign_transaction",
            "description": "Sign a transaction message created by create_transaction. Returns the base-58 encoded signed transaction.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "message": {"type": "string", "description": "Base-58 encoded unsigned transaction message."},
                    "privateKey": {"type": "string", "description": "Base-58 private key (32-byte seed or 64-byte keypair). Defaults to the configured wallet."}
                },
                "required": ["message"],
                "additionalProperties": false
            }
        },
        {
            "name": "send_transaction",
            "description": "Submit a signed transaction to the current network (or an explicit RPC endpoint).",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "signedTransaction": {"type": "string", "description": "Base-58 encoded signed transaction."},
                    "skipPreflight": {"type": "boolean", "description": "Skip preflight simulation (default false)."},
                    "commitment": {"type": "string", "enum": ["processed", "confirmed", "finalized"]},
                    "rpcUrl": {"type": "string", "description": "Optional RPC endpoint override for this call."}
                },
                "required": ["signedTransaction"],
                "additionalProperties": false
            }
        },
        {
            "name": "generate_keypair",
            "description": "Generate a new keypair. Returns the public key and base-58 private key.",
            "inputSchema": { "type": "object", "properties": {}, "additionalProperties": false }
        },
        {
            "name": "import_private_key",
            "description": "Derive the address of a base-58 private key (32-byte seed or 64-byte keypair).",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "privateKey": {"type": "string", "description": "Base-58 private key."}
                },
                "required": ["privateKey"],
                "additionalProperties": false
            }
        },
        {
            "name": "validate_address",
            "description": "Check whether a string is a valid Solana address.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "address": {"type": "string", "description": "The string to validate."}
                },
                "required": ["address"],
                "additionalProperties": false
            }
        },
        {
            "name": "check_transaction",
            "description": "Get the status of a submitted transaction: slot, block time, outcome, fee and balance changes.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "signature": {"type": "string", "description": "Base-58 transaction signature."},
                    "commitment": {"type": "string", "enum": ["processed", "confirmed", "finalized"]},
                    "rpcUrl": {"type": "string", "description": "Optional RPC endpoint override for this call."}
                },
                "required": ["signature"],
                "additionalProperties": false
            }
        },
        {
            "name": "switch_network",
            "description": "Switch between devnet and mainnet. Rebinds the RPC client to the selected network's endpoint.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "network": {"type": "string", "enum": ["devnet", "mainnet"]}
                },
                "required": ["network"],
                "additionalProperties": false
            }
        },
        {
            "name": "get_current_network",
            "description": "Report the currently selected network.",
            "inputSchema": { "type": "object", "properties": {}, "additionalProperties": false }
        },
    ]);
    Response::success(req.id.clone(), json!({ "tools": tools }))
}
