// src/wallet/keys.rs

use serde::Deserialize;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::keypair::keypair_from_seed;
use solana_sdk::signer::Signer;
use tracing::info;
use zeroize::Zeroize;

use crate::wallet::error::WalletError;
use crate::wallet::validate::validate_address;

/// Decode a base-58 private key into a signing keypair.
///
/// Accepts either a 32-byte seed or a 64-byte full keypair encoding. A
/// 32-byte seed is expanded to the full keypair by deriving its public
/// half; any other decoded length is a length error.
pub fn keypair_from_private_key(encoded: &str) -> Result<Keypair, WalletError> {
    let mut bytes = bs58::decode(encoded.trim())
        .into_vec()
        .map_err(|e| WalletError::InvalidKey(e.to_string()))?;

    let keypair = match bytes.len() {
        32 => keypair_from_seed(&bytes).map_err(|e| WalletError::InvalidKey(e.to_string())),
        64 => Keypair::from_bytes(&bytes).map_err(|e| WalletError::InvalidKey(e.to_string())),
        n => Err(WalletError::InvalidKeyLength(n)),
    };
    bytes.zeroize();
    keypair
}

/// Base-58 encoding of a keypair's 32-byte seed. This is the form
/// `keypair_from_private_key` round-trips, so an emitted private key can
/// always be re-imported.
pub fn seed_base58(keypair: &Keypair) -> String {
    let mut bytes = keypair.to_bytes();
    let encoded = bs58::encode(&bytes[..32]).into_string();
    bytes.zeroize();
    encoded
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPrivateKeyArgs {
    pub private_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateAddressArgs {
    pub address: String,
}

/// Generate a fresh keypair and report both halves.
pub fn generate_keypair() -> Result<String, WalletError> {
    let keypair = Keypair::new();
    info!("Generated keypair {}", keypair.pubkey());
    Ok(format!(
        "Generated new keypair.\nPublic key: {}\nPrivate key (base-58): {}",
        keypair.pubkey(),
        seed_base58(&keypair)
    ))
}

/// Import a private key and report the derived address.
pub fn import_private_key(args: ImportPrivateKeyArgs) -> Result<String, WalletError> {
    let keypair = keypair_from_private_key(&args.private_key)?;
    Ok(format!("Imported keypair. Address: {}", keypair.pubkey()))
}

/// Confirm that a string parses as a Solana address.
pub fn validate_address_tool(args: ValidateAddressArgs) -> Result<String, WalletError> {
    let pubkey = validate_address(&args.address)?;
    Ok(format!("{} is a valid Solana address", pubkey))
}
