//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the canonical record produced by every successful add.
//! - Define the fixed category taxonomy and its label mapping.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `content`, `created_at`, `category` and `tags` never change after
//!   creation.
//! - Every entry has exactly one category; `Category::General` is the
//!   fallback when nothing else matches.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every journal entry.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntryId = Uuid;

/// Fixed topic taxonomy for journal entries.
///
/// The set is closed on purpose: the category detector resolves every piece
/// of content to exactly one of these labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Groceries and errands ("buy", "pick up", ...).
    Shopping,
    /// Quoted speech attributed to someone.
    Quotes,
    /// Things to remember or not forget.
    Reminders,
    /// Plans and intentions.
    Goals,
    /// Feelings, opinions, introspection.
    Thoughts,
    /// Fallback when no other vocabulary matches.
    General,
}

impl Category {
    /// All categories in detector priority order.
    pub const ALL: [Category; 6] = [
        Category::Shopping,
        Category::Quotes,
        Category::Reminders,
        Category::Goals,
        Category::Thoughts,
        Category::General,
    ];

    /// Returns the lowercase wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Shopping => "shopping",
            Category::Quotes => "quotes",
            Category::Reminders => "reminders",
            Category::Goals => "goals",
            Category::Thoughts => "thoughts",
            Category::General => "general",
        }
    }

    /// Parses a label case-insensitively.
    ///
    /// Returns `None` for labels outside the fixed taxonomy.
    pub fn parse(label: &str) -> Option<Category> {
        let normalized = label.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical journal entry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Stable global ID used for linking and auditing.
    pub id: EntryId,
    /// Original free-text content, verbatim.
    pub content: String,
    /// Creation time in unix epoch milliseconds.
    pub created_at: i64,
    /// Exactly one category, assigned at creation.
    pub category: Category,
    /// Lowercase deduplicated tags; may be empty.
    pub tags: Vec<String>,
}

impl JournalEntry {
    /// Creates an entry with a generated stable ID and current timestamp.
    ///
    /// Category and tag derivation is the store's job; this constructor only
    /// assembles the record.
    pub fn new(content: impl Into<String>, category: Category, tags: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            created_at: now_epoch_ms(),
            category,
            tags,
        }
    }
}

/// Current time in unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{now_epoch_ms, Category, JournalEntry};

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("Shopping"), Some(Category::Shopping));
        assert_eq!(Category::parse("SHOPPING"), Some(Category::Shopping));
        assert_eq!(Category::parse(" quotes "), Some(Category::Quotes));
        assert_eq!(Category::parse("unknown"), None);
    }

    #[test]
    fn category_serializes_to_snake_case_label() {
        let json = serde_json::to_string(&Category::Reminders).expect("category should serialize");
        assert_eq!(json, "\"reminders\"");
    }

    #[test]
    fn new_entry_gets_unique_id_and_timestamp() {
        let before = now_epoch_ms();
        let first = JournalEntry::new("a", Category::General, vec![]);
        let second = JournalEntry::new("b", Category::General, vec![]);
        assert_ne!(first.id, second.id);
        assert!(first.created_at >= before);
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = JournalEntry::new(
            "Remind me to buy eggs",
            Category::Shopping,
            vec!["eggs".to_string()],
        );
        let json = serde_json::to_string(&entry).expect("entry should serialize");
        let parsed: JournalEntry = serde_json::from_str(&json).expect("entry should deserialize");
        assert_eq!(parsed, entry);
        assert!(json.contains("\"shopping\""));
    }
}
