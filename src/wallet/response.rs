// src/wallet/response.rs

use serde::{Deserialize, Serialize};

use crate::wallet::error::WalletError;

/// A single text block inside a tool response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// The uniform result envelope every wallet operation terminates in.
/// Callers branch only on `is_error`; the text carries the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<TextContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(message)],
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(message)],
            is_error: true,
        }
    }

    /// The text of the first content block, or "" for an empty envelope.
    pub fn text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }

    /// Collapse a handler outcome into an envelope. Error messages are
    /// embedded verbatim; nothing propagates past this point.
    pub fn from_result(result: Result<String, WalletError>) -> Self {
        match result {
            Ok(message) => Self::success(message),
            Err(err) => Self::error(err.to_string()),
        }
    }
}
