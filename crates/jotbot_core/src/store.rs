//! In-memory journal entry store.
//!
//! # Responsibility
//! - Own the append-only entry list for one process.
//! - Derive category and tags on insert when the caller supplies none.
//! - Serve linear-scan retrieval: search, category, recency.
//!
//! # Invariants
//! - Entries are never mutated or deleted after insertion.
//! - Every read returns cloned snapshots, never live references.
//! - All reads are newest-first. Timestamps are assigned at insertion, so
//!   reverse insertion order is the recency order and breaks
//!   same-millisecond ties.
//! - The store is constructor-injected state, not a process-wide global;
//!   tests instantiate isolated stores per case.

use crate::model::entry::{Category, JournalEntry};
use crate::taxonomy::{detect_category, extract_tags, normalize_tags};
use log::debug;
use serde::{Deserialize, Serialize};

/// Append-only in-memory journal store.
///
/// Lives for the process lifetime; nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<JournalEntry>,
}

/// Aggregate snapshot for dashboard-style callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Total number of entries ever added.
    pub total_entries: usize,
    /// Number of distinct categories in use.
    pub categories: usize,
    /// The five most recent entries, newest-first.
    pub recent_activity: Vec<JournalEntry>,
}

impl EntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry; never fails.
    ///
    /// Category falls back to the detector and tags to the extractor when
    /// not supplied. Caller-supplied tags are normalized (lowercase,
    /// deduplicated, empties dropped).
    pub fn add_entry(
        &mut self,
        content: impl Into<String>,
        category: Option<Category>,
        tags: Option<Vec<String>>,
    ) -> JournalEntry {
        let content = content.into();
        let category = category.unwrap_or_else(|| detect_category(&content));
        let tags = match tags {
            Some(tags) => normalize_tags(&tags),
            None => extract_tags(&content),
        };

        let entry = JournalEntry::new(content, category, tags);
        debug!(
            "event=entry_added module=store status=ok id={} category={} tags={}",
            entry.id,
            entry.category,
            entry.tags.len()
        );
        self.entries.push(entry.clone());
        entry
    }

    /// Returns entries whose content, any tag, or category label contains
    /// `query` as a case-insensitive substring. Newest-first.
    pub fn search_entries(&self, query: &str) -> Vec<JournalEntry> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .rev()
            .filter(|entry| {
                entry.content.to_lowercase().contains(&needle)
                    || entry.tags.iter().any(|tag| tag.contains(&needle))
                    || entry.category.as_str().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Returns entries with an exact case-insensitive category match,
    /// newest-first. Labels outside the taxonomy yield an empty list.
    pub fn entries_by_category(&self, label: &str) -> Vec<JournalEntry> {
        let Some(category) = Category::parse(label) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .rev()
            .filter(|entry| entry.category == category)
            .cloned()
            .collect()
    }

    /// Returns at most `limit` entries, newest-first.
    pub fn recent_entries(&self, limit: usize) -> Vec<JournalEntry> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }

    /// Returns every entry, newest-first.
    pub fn all_entries(&self) -> Vec<JournalEntry> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Shorthand for the shopping category.
    pub fn shopping_list(&self) -> Vec<JournalEntry> {
        self.entries_by_category(Category::Shopping.as_str())
    }

    /// Distinct categories currently in use, in detector priority order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.entries.iter().any(|entry| entry.category == *category))
            .collect()
    }

    /// Aggregate snapshot: totals plus the five most recent entries.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_entries: self.entries.len(),
            categories: self.categories().len(),
            recent_activity: self.recent_entries(5),
        }
    }

    /// Number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
