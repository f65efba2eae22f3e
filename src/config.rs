// src/config.rs

use anyhow::{Context, Result};
use secrecy::Secret;
use std::env;

/// Default public RPC endpoints, used when no override is configured.
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

// A struct to hold all configuration, loaded once at startup from the .env file.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub port: u16,

    /// RPC endpoint used when the devnet network is selected
    pub devnet_rpc_url: String,
    /// RPC endpoint used when the mainnet network is selected
    pub mainnet_rpc_url: String,

    /// Base-58 private key of the default wallet. Optional; when absent,
    /// every operation that needs a key must pass one explicitly.
    pub private_key: Option<Secret<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            devnet_rpc_url: DEVNET_RPC_URL.to_string(),
            mainnet_rpc_url: MAINNET_RPC_URL.to_string(),
            private_key: None,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,

            devnet_rpc_url: env::var("SOLANA_DEVNET_RPC_URL")
                .unwrap_or_else(|_| DEVNET_RPC_URL.to_string()),
            mainnet_rpc_url: env::var("SOLANA_MAINNET_RPC_URL")
                .unwrap_or_else(|_| MAINNET_RPC_URL.to_string()),

            private_key: env::var("PRIVATE_KEY").ok().map(Secret::new),
        })
    }
}
