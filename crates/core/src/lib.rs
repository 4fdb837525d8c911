//! # mathtutor Core
//!
//! Domain types, traits, and error definitions for the mathtutor Slack bot.
//! This crate has **zero framework dependencies** — it defines the domain
//! model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The two external collaborators — the chat platform and the
//! conversational agent — are defined as traits here (`ChatClient`,
//! `Agent`). Implementations live in their respective crates. This enables:
//! - Swapping the Slack client for a test double
//! - Swapping the built-in tool-routing agent for an LLM-backed one
//! - Clean dependency graph (all crates depend inward on core)

pub mod agent;
pub mod chat;
pub mod error;
pub mod event;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use agent::{Agent, AgentContent, AgentResult, ContentBlock};
pub use chat::{ChatClient, OutboundMessage, RawMessage};
pub use error::{AgentError, ChatError, Error, Result, ToolError};
pub use event::{InboundEvent, MessageEvent, ReactionEvent};
pub use tool::{
    ComplexityResult, PlotResult, SolutionResult, StatisticsResult, TimeComplexity, Tool,
    ToolRegistry, ToolResponse,
};
