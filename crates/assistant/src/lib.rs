//! Tool-calling AI assistant for the Find a Helper marketplace.
//!
//! The assistant wraps an OpenAI-compatible chat-completions API. Each chat
//! turn is a two-pass protocol: the first model call may request read-only
//! query tools over the available-tasks snapshot; requested tools are
//! executed in order and their outputs fed back for a single second call
//! that produces the final reply. No tool calls are honored on the second
//! pass.

pub mod api_types;
pub mod assistant;
pub mod config;
pub mod error;
pub mod prompt;
pub mod tools;

pub use assistant::{Assistant, ChatOutcome, ChatTurn};
pub use config::AssistantConfig;
pub use error::AssistantError;
pub use tools::FoundTask;
