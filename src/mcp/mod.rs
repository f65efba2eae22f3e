// Exposes the MCP protocol types and the request dispatcher
pub mod handler;
pub mod protocol;
