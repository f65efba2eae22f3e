// src/wallet/validate.rs

use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::wallet::error::WalletError;
use crate::wallet::network::WalletContext;

/// Parse `s` as a Solana address. The error message embeds the rejected
/// input verbatim so the caller can see what was wrong.
pub fn validate_address(s: &str) -> Result<Pubkey, WalletError> {
    Pubkey::from_str(s.trim()).map_err(|_| WalletError::InvalidAddress(s.to_string()))
}

/// Resolve the effective public key for an operation: the explicit
/// argument wins, otherwise the default wallet's key. Missing both is an
/// error before any RPC call is issued.
pub fn resolve_public_key(
    ctx: &WalletContext,
    explicit: Option<&str>,
) -> Result<Pubkey, WalletError> {
    match explicit {
        Some(s) => validate_address(s),
        None => ctx.default_pubkey().ok_or(WalletError::NoPublicKey),
    }
}

/// Validate a transfer amount. The integer check runs first: a non-finite
/// or fractional amount is rejected before the positivity check, and the
/// two paths produce distinct messages.
pub fn validate_amount(amount: f64) -> Result<u64, WalletError> {
    if !amount.is_finite() || amount.fract() != 0.0 {
        return Err(WalletError::NonIntegerAmount);
    }
    if amount <= 0.0 {
        return Err(WalletError::NonPositiveAmount);
    }
    Ok(amount as u64)
}

/// Parse an optional commitment level, defaulting to `confirmed`.
pub fn parse_commitment(s: Option<&str>) -> Result<CommitmentConfig, WalletError> {
    match s {
        None => Ok(CommitmentConfig::confirmed()),
        Some("processed") => Ok(CommitmentConfig::processed()),
        Some("confirmed") => Ok(CommitmentConfig::confirmed()),
        Some("finalized") => Ok(CommitmentConfig::finalized()),
        Some(other) => Err(WalletError::InvalidCommitment(other.to_string())),
    }
}
