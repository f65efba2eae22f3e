// src/wallet/balance.rs

use serde::Deserialize;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::native_token::lamports_to_sol;
use tracing::info;

use crate::wallet::error::WalletError;
use crate::wallet::network::WalletContext;
use crate::wallet::validate::{parse_commitment, resolve_public_key, validate_address};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetBalanceArgs {
    pub public_key: Option<String>,
    pub commitment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetTokenAccountsArgs {
    pub public_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTokenBalanceArgs {
    pub token_account: String,
    #[serde(default)]
    pub commitment: Option<String>,
}

/// Query the native balance of an account, reported in lamports and SOL.
pub async fn get_balance(ctx: &WalletContext, args: GetBalanceArgs) -> Result<String, WalletError> {
    let owner = resolve_public_key(ctx, args.public_key.as_deref())?;
    let commitment = parse_commitment(args.commitment.as_deref())?;

    let client = ctx.rpc_client();
    let lamports = client
        .get_balance_with_commitment(&owner, commitment)
        .await?
        .value;
    info!("Balance for {}: {} lamports", owner, lamports);

    Ok(format!(
        "Balance for {}: {} lamports ({} SOL)",
        owner,
        lamports,
        lamports_to_sol(lamports)
    ))
}

/// List the SPL token accounts owned by an address.
pub async fn get_token_accounts(
    ctx: &WalletContext,
    args: GetTokenAccountsArgs,
) -> Result<String, WalletError> {
    let owner = resolve_public_key(ctx, args.public_key.as_deref())?;

    let client = ctx.rpc_client();
    let accounts = client
        .get_token_accounts_by_owner(&owner, TokenAccountsFilter::ProgramId(spl_token::id()))
        .await?;

    if accounts.is_empty() {
        return Ok(format!("No token accounts found for {owner}"));
    }
    let list = accounts
        .iter()
        .map(|account| account.pubkey.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(format!("Token accounts owned by {owner}:\n{list}"))
}

/// Query the balance of a single SPL token account.
pub async fn get_token_balance(
    ctx: &WalletContext,
    args: GetTokenBalanceArgs,
) -> Result<String, WalletError> {
    let account = validate_address(&args.token_account)?;
    let commitment = parse_commitment(args.commitment.as_deref())?;

    let client = ctx.rpc_client();
    let balance = client
        .get_token_account_balance_with_commitment(&account, commitment)
        .await?
        .value;

    let ui_amount = balance
        .ui_amount
        .map(|v| v.to_string())
        .unwrap_or_else(|| "0".to_string());
    Ok(format!(
        "Token balance for {}: {} ({})",
        account, ui_amount, balance.ui_amount_string
    ))
}
