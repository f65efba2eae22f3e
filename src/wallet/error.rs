// src/wallet/error.rs

use thiserror::Error;

/// Everything a wallet operation can fail with. Validation variants carry
/// the literal messages surfaced to the tool caller; RPC and signing
/// failures embed the underlying library message verbatim.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid commitment level: {0} (expected 'processed', 'confirmed' or 'finalized')")]
    InvalidCommitment(String),

    #[error("Amount must be an integer number of lamports")]
    NonIntegerAmount,

    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    #[error("No public key provided and no default wallet configured. Set PRIVATE_KEY in the server environment to configure a default wallet")]
    NoPublicKey,

    #[error("No private key provided and no default wallet configured. Set PRIVATE_KEY in the server environment to configure a default wallet")]
    NoPrivateKey,

    #[error("invalid private key length: {0} bytes (expected a 32-byte seed or a 64-byte keypair)")]
    InvalidKeyLength(usize),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid transaction message: {0}")]
    InvalidMessage(String),

    #[error("Invalid signed transaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Unknown network: {0} (expected 'devnet' or 'mainnet')")]
    UnknownNetwork(String),

    #[error("Transaction not found")]
    TransactionNotFound,

    #[error("signing failed: {0}")]
    Signing(#[from] solana_sdk::signer::SignerError),

    #[error(transparent)]
    Rpc(#[from] solana_client::client_error::ClientError),
}
