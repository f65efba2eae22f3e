// src/wallet/mod.rs

// Validation & formatting layer
pub mod error;
pub mod response;
pub mod validate;

// Operation handlers, grouped by concern
pub mod balance;
pub mod keys;
pub mod network;
pub mod transactions;

pub use error::WalletError;
pub use network::{Network, WalletContext};
pub use response::ToolResponse;
