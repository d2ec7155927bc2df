//! Text-generation seam for the hosted model backend.
//!
//! # Responsibility
//! - Define the provider-agnostic contract the chat service depends on:
//!   send a system instruction plus message history, receive reply text.
//! - Surface upstream failures as typed errors so callers can distinguish
//!   "service unavailable" from an empty reply.
//!
//! # Invariants
//! - Trait implementations never return an empty string on failure; they
//!   return an error.

pub mod gemini;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Conversation role for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Convenience constructor for a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Convenience constructor for an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Generation-layer error.
#[derive(Debug)]
pub enum GenerateError {
    /// No API credential is configured.
    MissingApiKey,
    /// Transport-level failure before any response arrived.
    Transport(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The response arrived but carried no usable text.
    EmptyReply,
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "missing API key; set GEMINI_API_KEY or GOOGLE_GENERATIVE_AI_API_KEY"
            ),
            Self::Transport(message) => write!(f, "transport error: {message}"),
            Self::Api { status, message } => write!(f, "API error (status {status}): {message}"),
            Self::EmptyReply => write!(f, "generation response contained no text"),
        }
    }
}

impl Error for GenerateError {}

/// Contract for a hosted text-generation backend.
///
/// The chat service only needs "send prompt + context, receive text" and is
/// agnostic to the provider's transport framing.
pub trait TextGenerator {
    /// Generates one reply for the given system instruction and history.
    fn generate(&self, system: &str, messages: &[ChatMessage]) -> Result<String, GenerateError>;
}
