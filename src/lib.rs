// src/lib.rs

use std::sync::Arc;

// Re-export commonly used types
pub use solana_sdk::pubkey::Pubkey;
pub use solana_sdk::signature::{Keypair, Signature};

// Re-export modules
pub mod api;
pub mod config;
pub mod mcp;
pub mod utils;
pub mod wallet;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Active network selection, derived RPC client and default keypair
    pub wallet: Arc<wallet::WalletContext>,
}

impl AppState {
    /// Build the shared state from a loaded configuration. The default
    /// keypair is decoded here, once, before any handler runs.
    pub fn new(config: config::Config) -> Self {
        let wallet = Arc::new(wallet::WalletContext::new(&config));
        Self { config, wallet }
    }
}
