//! Core domain logic for the JotBot journaling assistant.
//! This crate is the single source of truth for intent routing, entry
//! storage and the generation-backend boundary.

pub mod chat;
pub mod classify;
pub mod llm;
pub mod logging;
pub mod model;
pub mod store;
pub mod taxonomy;

pub use chat::{ChatError, ChatReply, ChatService, REJECTION_MESSAGE};
pub use classify::{classify, Intent};
pub use llm::gemini::GeminiClient;
pub use llm::{ChatMessage, GenerateError, Role, TextGenerator};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{Category, EntryId, JournalEntry};
pub use store::{EntryStore, StoreStats};
pub use taxonomy::{detect_category, extract_tags, normalize_tags};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
