//! Error types for the mathtutor domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all mathtutor operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Chat platform errors ---
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    // --- Agent errors ---
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures talking to the chat platform (Slack Web API).
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat API call failed: {method} — {reason}")]
    Api { method: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    #[error("Chat client not configured: {0}")]
    NotConfigured(String),
}

/// Failures inside the conversational agent.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Agent invocation failed: {0}")]
    InvocationFailed(String),

    #[error("Tool dispatch failed: {0}")]
    ToolDispatch(#[from] ToolError),
}

/// Failures executing a tool.
///
/// Domain-level failures (unsolvable equation, unknown algorithm) are NOT
/// errors — they are `ToolResponse::Failure` values. This type covers
/// infrastructure failures only.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}
