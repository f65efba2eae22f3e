//! # API Module
//!
//! HTTP handlers for the Solana MCP server. These are a thin convenience
//! surface over the same wallet operations the MCP tools expose.
//!
//! ## Available Endpoints
//!
//! - `GET /api/health` - Liveness check
//! - `GET /api/balance/:address` - Native balance of an address
//! - `GET /api/network` - Currently selected network and endpoint
//! - `POST /api/rpc` - JSON-RPC endpoint for MCP tool calls

pub mod balance;
pub mod health;
pub mod network;
pub mod rpc;
