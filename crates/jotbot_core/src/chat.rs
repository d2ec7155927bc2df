//! Chat request/response orchestration.
//!
//! # Responsibility
//! - Route one utterance through the intent router and the entry store.
//! - Assemble system prompt plus recent-entry context for general chat and
//!   delegate to the configured [`TextGenerator`].
//!
//! # Invariants
//! - Rejected and journal-handled turns never touch the generation backend.
//! - Upstream generation failure surfaces as a typed error, never as a
//!   silent empty reply.
//! - Replies are structured; rendering to user-facing text is the caller's
//!   concern.

use crate::classify::{classify, Intent};
use crate::llm::{ChatMessage, GenerateError, TextGenerator};
use crate::model::entry::JournalEntry;
use crate::store::EntryStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Redirect message for utterances outside journaling scope.
pub const REJECTION_MESSAGE: &str = "I'm only a journaling assistant — I can help you add or \
     query journal entries. Try saying 'Remind me to buy eggs' or 'What's in my shopping list?'";

const SYSTEM_PROMPT: &str = "You are a helpful journaling assistant. Help users add entries to \
     their journal and retrieve information from it. Stay within journaling scope: politely \
     decline math, trivia and other general-knowledge questions. Acknowledge every entry you \
     add, present query results clearly, and when nothing matches a query, suggest related \
     categories or offer to add something new.";

/// Number of recent entries appended as context for general chat.
const CONTEXT_ENTRY_LIMIT: usize = 20;

/// Structured outcome of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatReply {
    /// Out-of-scope utterance with the fixed redirect message.
    Rejected { message: String },
    /// A new entry was created from the utterance.
    EntryAdded { entry: JournalEntry },
    /// Entries matching the query, newest-first. May be empty.
    QueryResults { entries: Vec<JournalEntry> },
    /// Pass-through reply from the generation backend.
    Assistant { text: String },
}

/// Chat-layer error. Only the generation boundary can fail.
#[derive(Debug)]
pub enum ChatError {
    /// The backend cannot be reached or is not configured.
    Unavailable(String),
    /// The backend answered but the reply was unusable.
    Upstream(GenerateError),
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "generation service unavailable: {message}"),
            Self::Upstream(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::Upstream(err) => Some(err),
        }
    }
}

impl From<GenerateError> for ChatError {
    fn from(value: GenerateError) -> Self {
        match value {
            GenerateError::MissingApiKey => Self::Unavailable(value.to_string()),
            GenerateError::Transport(message) => Self::Unavailable(message),
            other => Self::Upstream(other),
        }
    }
}

/// Chat service over an owned store and a generation backend.
pub struct ChatService<G: TextGenerator> {
    store: EntryStore,
    generator: G,
}

impl<G: TextGenerator> ChatService<G> {
    /// Creates a service with an empty store.
    pub fn new(generator: G) -> Self {
        Self::with_store(EntryStore::new(), generator)
    }

    /// Creates a service over an existing store.
    pub fn with_store(store: EntryStore, generator: G) -> Self {
        Self { store, generator }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Handles one chat turn.
    ///
    /// `history` is the prior conversation (oldest first, without the
    /// current utterance); it is only forwarded for general chat.
    ///
    /// # Errors
    /// - `ChatError::Unavailable` when the backend is unreachable or has no
    ///   credential configured.
    /// - `ChatError::Upstream` for API-level failures.
    pub fn handle(
        &mut self,
        utterance: &str,
        history: &[ChatMessage],
    ) -> Result<ChatReply, ChatError> {
        let intent = classify(utterance);
        info!("event=turn_classified module=chat intent={intent:?}");

        match intent {
            Intent::Reject => Ok(ChatReply::Rejected {
                message: REJECTION_MESSAGE.to_string(),
            }),
            Intent::Add => {
                let entry = self.store.add_entry(utterance, None, None);
                Ok(ChatReply::EntryAdded { entry })
            }
            Intent::Query => Ok(ChatReply::QueryResults {
                entries: self.run_query(utterance),
            }),
            Intent::General => self.generate_reply(utterance, history),
        }
    }

    /// Routes a query utterance to a category scan or free-text search.
    ///
    /// Category shortcuts mirror the add-side vocabulary: shopping words hit
    /// the shopping category, quote words the quotes category, reminder
    /// words the reminders category. Anything else is a substring search
    /// over the whole store.
    fn run_query(&self, utterance: &str) -> Vec<JournalEntry> {
        let lower = utterance.to_lowercase();

        if ["shopping", "buy", "supermarket"]
            .iter()
            .any(|word| lower.contains(word))
        {
            return self.store.shopping_list();
        }
        if ["quote", "said"].iter().any(|word| lower.contains(word)) {
            return self.store.entries_by_category("quotes");
        }
        if lower.contains("reminder") {
            return self.store.entries_by_category("reminders");
        }

        self.store.search_entries(utterance)
    }

    fn generate_reply(
        &self,
        utterance: &str,
        history: &[ChatMessage],
    ) -> Result<ChatReply, ChatError> {
        let system = self.system_with_context();
        let mut messages = history.to_vec();
        messages.push(ChatMessage::user(utterance));

        match self.generator.generate(&system, &messages) {
            Ok(text) => Ok(ChatReply::Assistant { text }),
            Err(err) => {
                warn!("event=generate_reply_failed module=chat error={err}");
                Err(err.into())
            }
        }
    }

    fn system_with_context(&self) -> String {
        let recent = self.store.recent_entries(CONTEXT_ENTRY_LIMIT);
        let context = if recent.is_empty() {
            "No entries yet.".to_string()
        } else {
            recent
                .iter()
                .map(|entry| format!("[{}] {}", entry.created_at, entry.content))
                .collect::<Vec<_>>()
                .join("\n")
        };
        format!("{SYSTEM_PROMPT}\n\nRecent entries:\n{context}")
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatError, ChatService};
    use crate::llm::{ChatMessage, GenerateError, TextGenerator};

    struct FailingGenerator(fn() -> GenerateError);

    impl TextGenerator for FailingGenerator {
        fn generate(&self, _: &str, _: &[ChatMessage]) -> Result<String, GenerateError> {
            Err((self.0)())
        }
    }

    #[test]
    fn missing_credential_maps_to_unavailable() {
        let mut service = ChatService::new(FailingGenerator(|| GenerateError::MissingApiKey));
        let err = service
            .handle("hello", &[])
            .expect_err("general chat should fail without a credential");
        assert!(matches!(err, ChatError::Unavailable(_)));
    }

    #[test]
    fn api_failure_maps_to_upstream() {
        let mut service = ChatService::new(FailingGenerator(|| GenerateError::Api {
            status: 500,
            message: "boom".to_string(),
        }));
        let err = service
            .handle("hello", &[])
            .expect_err("general chat should propagate API failure");
        assert!(matches!(err, ChatError::Upstream(_)));
    }

    #[test]
    fn journal_turns_never_touch_the_generator() {
        // Classification and store work must succeed even when the backend
        // is completely broken.
        let mut service = ChatService::new(FailingGenerator(|| GenerateError::MissingApiKey));
        service
            .handle("Remind me to buy eggs", &[])
            .expect("add turn should not call the generator");
        service
            .handle("what's in my shopping list", &[])
            .expect("query turn should not call the generator");
        service
            .handle("what is 2+2", &[])
            .expect("rejected turn should not call the generator");
    }
}
