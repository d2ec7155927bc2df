//! Domain model for journal entries.
//!
//! # Responsibility
//! - Define the canonical entry record shared by store, router and chat.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - Entries are immutable after creation; no update or delete exists.

pub mod entry;
