// src/wallet/transactions.rs

use chrono::DateTime;
use serde::Deserialize;
use serde_json::{json, Value};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_client::rpc_request::RpcRequest;
use solana_sdk::message::Message;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::wallet::error::WalletError;
use crate::wallet::keys::keypair_from_private_key;
use crate::wallet::network::WalletContext;
use crate::wallet::validate::{parse_commitment, resolve_public_key, validate_address, validate_amount};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionArgs {
    pub to_public_key: String,
    pub amount: f64,
    #[serde(default)]
    pub from_public_key: Option<String>,
    #[serde(default)]
    pub commitment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionArgs {
    pub message: String,
    #[serde(default)]
    pub private_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionArgs {
    pub signed_transaction: String,
    #[serde(default)]
    pub skip_preflight: Option<bool>,
    #[serde(default)]
    pub commitment: Option<String>,
    #[serde(default)]
    pub rpc_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckTransactionArgs {
    pub signature: String,
    #[serde(default)]
    pub commitment: Option<String>,
    #[serde(default)]
    pub rpc_url: Option<String>,
}

/// A per-call RPC override, or a snapshot of the context's client.
fn resolve_rpc_client(
    ctx: &WalletContext,
    override_url: Option<&str>,
) -> Result<Arc<RpcClient>, WalletError> {
    match override_url {
        Some(s) => {
            let url = Url::parse(s).map_err(|_| WalletError::InvalidRpcUrl(s.to_string()))?;
            Ok(Arc::new(RpcClient::new(url.to_string())))
        }
        None => Ok(ctx.rpc_client()),
    }
}

/// Build an unsigned transfer. Inputs are validated before the blockhash
/// is fetched, so a missing credential or bad amount never reaches the
/// RPC layer. Returns the serialized legacy message, base-58 encoded.
pub async fn create_transaction(
    ctx: &WalletContext,
    args: CreateTransactionArgs,
) -> Result<String, WalletError> {
    let from = resolve_public_key(ctx, args.from_public_key.as_deref())?;
    let to = validate_address(&args.to_public_key)?;
    let lamports = validate_amount(args.amount)?;
    let commitment = parse_commitment(args.commitment.as_deref())?;

    let client = ctx.rpc_client();
    let (blockhash, _) = client
        .get_latest_blockhash_with_commitment(commitment)
        .await?;

    let instruction = system_instruction::transfer(&from, &to, lamports);
    let message = Message::new_with_blockhash(&[instruction], Some(&from), &blockhash);
    let encoded = bs58::encode(message.serialize()).into_string();
    info!("Created transfer of {} lamports from {} to {}", lamports, from, to);

    Ok(format!(
        "Created transfer of {lamports} lamports from {from} to {to}.\nUnsigned transaction message (base-58): {encoded}"
    ))
}

/// Sign a previously created message with the explicit key or the default
/// wallet. The blockhash embedded in the message is reused for signing.
pub async fn sign_transaction(
    ctx: &WalletContext,
    args: SignTransactionArgs,
) -> Result<String, WalletError> {
    let keypair: Arc<Keypair> = match args.private_key.as_deref() {
        Some(encoded) => Arc::new(keypair_from_private_key(encoded)?),
        None => ctx.default_keypair().ok_or(WalletError::NoPrivateKey)?,
    };

    let bytes = bs58::decode(args.message.trim())
        .into_vec()
        .map_err(|e| WalletError::InvalidMessage(e.to_string()))?;
    let message: Message =
        bincode::deserialize(&bytes).map_err(|e| WalletError::InvalidMessage(e.to_string()))?;

    let blockhash = message.recent_blockhash;
    let mut transaction = Transaction::new_unsigned(message);
    transaction.try_sign(&[keypair.as_ref()], blockhash)?;

    let serialized = bincode::serialize(&transaction)
        .map_err(|e| WalletError::InvalidTransaction(e.to_string()))?;
    Ok(format!(
        "Signed transaction (base-58): {}",
        bs58::encode(serialized).into_string()
    ))
}

/// Submit a signed transaction and report the ledger signature.
pub async fn send_transaction(
    ctx: &WalletContext,
    args: SendTransactionArgs,
) -> Result<String, WalletError> {
    let bytes = bs58::decode(args.signed_transaction.trim())
        .into_vec()
        .map_err(|e| WalletError::InvalidTransaction(e.to_string()))?;
    let transaction: Transaction =
        bincode::deserialize(&bytes).map_err(|e| WalletError::InvalidTransaction(e.to_string()))?;
    let commitment = parse_commitment(args.commitment.as_deref())?;

    let client = resolve_rpc_client(ctx, args.rpc_url.as_deref())?;
    let config = RpcSendTransactionConfig {
        skip_preflight: args.skip_preflight.unwrap_or(false),
        preflight_commitment: Some(commitment.commitment),
        ..RpcSendTransactionConfig::default()
    };
    let signature = client
        .send_transaction_with_config(&transaction, config)
        .await?;
    info!("Sent transaction {}", signature);

    Ok(format!("Transaction sent. Signature: {signature}"))
}

/// Look up a confirmed transaction by signature. A null result from the
/// ledger is reported as not-found, distinct from a transport failure.
pub async fn check_transaction(
    ctx: &WalletContext,
    args: CheckTransactionArgs,
) -> Result<String, WalletError> {
    let signature = Signature::from_str(args.signature.trim())
        .map_err(|_| WalletError::InvalidSignature(args.signature.clone()))?;
    let commitment = parse_commitment(args.commitment.as_deref())?;

    let client = resolve_rpc_client(ctx, args.rpc_url.as_deref())?;
    let params = json!([
        signature.to_string(),
        {
            "commitment": commitment.commitment,
            "encoding": "json",
            "maxSupportedTransactionVersion": 0,
        }
    ]);
    let result: Option<Value> = client.send(RpcRequest::GetTransaction, params).await?;
    let transaction = result.ok_or(WalletError::TransactionNotFound)?;

    Ok(format_transaction_status(&signature, &transaction))
}

fn format_transaction_status(signature: &Signature, transaction: &Value) -> String {
    let meta = transaction.get("meta");
    let status = match meta.and_then(|m| m.get("err")) {
        None | Some(Value::Null) => "ok".to_string(),
        Some(err) => format!("failed ({err})"),
    };

    let mut lines = vec![format!("Transaction {signature}"), format!("Status: {status}")];
    if let Some(slot) = transaction.get("slot").and_then(Value::as_u64) {
        lines.push(format!("Slot: {slot}"));
    }
    if let Some(timestamp) = transaction.get("blockTime").and_then(Value::as_i64) {
        if let Some(datetime) = DateTime::from_timestamp(timestamp, 0) {
            lines.push(format!(
                "Block time: {}",
                datetime.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
    }
    if let Some(fee) = meta.and_then(|m| m.get("fee")).and_then(Value::as_u64) {
        lines.push(format!("Fee: {fee} lamports"));
    }
    if let Some(pre) = meta.and_then(|m| m.get("preBalances")) {
        lines.push(format!("Pre-balances: {pre}"));
    }
    if let Some(post) = meta.and_then(|m| m.get("postBalances")) {
        lines.push(format!("Post-balances: {post}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::hash::Hash;
    use solana_sdk::signer::Signer;

    fn transfer_message(from: &Keypair, lamports: u64) -> String {
        let to = Keypair::new().pubkey();
        let instruction = system_instruction::transfer(&from.pubkey(), &to, lamports);
        let message =
            Message::new_with_blockhash(&[instruction], Some(&from.pubkey()), &Hash::new_unique());
        bs58::encode(message.serialize()).into_string()
    }

    #[tokio::test]
    async fn signs_a_created_message_with_an_explicit_key() {
        let keypair = Keypair::new();
        let encoded = transfer_message(&keypair, 1_000);
        let ctx = WalletContext::new(&crate::config::Config::default());

        let text = sign_transaction(
            &ctx,
            SignTransactionArgs {
                message: encoded,
                private_key: Some(bs58::encode(keypair.to_bytes()).into_string()),
            },
        )
        .await
        .unwrap();

        let serialized = text
            .strip_prefix("Signed transaction (base-58): ")
            .expect("prefix");
        let transaction: Transaction =
            bincode::deserialize(&bs58::decode(serialized).into_vec().unwrap()).unwrap();
        transaction.verify().unwrap();
        assert_eq!(transaction.message.account_keys[0], keypair.pubkey());
    }

    #[tokio::test]
    async fn signing_without_any_key_reports_missing_credential() {
        let keypair = Keypair::new();
        let encoded = transfer_message(&keypair, 1_000);
        let ctx = WalletContext::new(&crate::config::Config::default());

        let err = sign_transaction(
            &ctx,
            SignTransactionArgs {
                message: encoded,
                private_key: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, WalletError::NoPrivateKey));
    }

    #[tokio::test]
    async fn garbage_message_is_a_validation_error() {
        let ctx = WalletContext::new(&crate::config::Config::default());
        let err = sign_transaction(
            &ctx,
            SignTransactionArgs {
                message: "zzzz".to_string(),
                private_key: Some(bs58::encode(Keypair::new().to_bytes()).into_string()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, WalletError::InvalidMessage(_)));
    }

    #[test]
    fn rejects_malformed_rpc_overrides() {
        let ctx = WalletContext::new(&crate::config::Config::default());
        let err = resolve_rpc_client(&ctx, Some("not a url")).err().unwrap();
        assert_eq!(err.to_string(), "Invalid RPC URL: not a url");
    }

    #[test]
    fn formats_a_failed_transaction_status() {
        let signature = Signature::default();
        let transaction = json!({
            "slot": 42,
            "blockTime": 1_700_000_000,
            "meta": {
                "err": {"InstructionError": [0, "Custom"]},
                "fee": 5000,
                "preBalances": [10, 0],
                "postBalances": [5, 5],
            }
        });
        let text = format_transaction_status(&signature, &transaction);
        assert!(text.contains("Status: failed"));
        assert!(text.contains("Slot: 42"));
        assert!(text.contains("Fee: 5000 lamports"));
        assert!(text.contains("Pre-balances: [10,0]"));
    }
}
