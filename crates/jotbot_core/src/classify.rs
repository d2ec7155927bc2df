//! Intent routing for incoming chat utterances.
//!
//! # Responsibility
//! - Classify one utterance into `Reject`, `Add`, `Query` or `General`.
//! - Keep classification pure: no store access, no side effects, no errors.
//!
//! # Invariants
//! - Stages run in a fixed order: relevance filter, add detection, query
//!   detection, then the `General` fallthrough.
//! - Pattern lists are evaluated top-to-bottom; the first hit decides the
//!   stage outcome. The ordering is load-bearing for compatibility.
//! - A non-journal pattern only rejects when the utterance carries no
//!   personal reference and no domain keyword; the contextual override
//!   always beats rejection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Router outcome for one user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Off-topic for journaling; the caller should redirect the user.
    Reject,
    /// The utterance should be stored as a new journal entry.
    Add,
    /// The utterance asks for existing entries.
    Query,
    /// In-scope small talk; forwarded to the generation backend.
    General,
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid intent pattern"))
        .collect()
}

// Off-topic shapes: arithmetic, trivia, weather, jokes. Ordered from the
// most specific math forms down to the generic bare question opener.
static NON_JOURNAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"^\d+\s*[+\-*/]\s*\d+",
        r"^what\s+is\s+\d+",
        r"\d+\s*[+\-*/]\s*\d+",
        r"\d+\s*(plus|minus|times|divided\s+by)\s*\d+",
        r"^[0-9+\-*/()\s=?]+$",
        r"calculate",
        r"solve\s+",
        r"what\s+is\s+the\s+(capital|population|area|distance)",
        r"who\s+(invented|discovered|created)",
        r"when\s+was.*born",
        r"tell\s+me\s+a\s+joke",
        r"what.*weather",
        r"how\s+is\s+the\s+(air|weather)",
        r"^what\s+is\b",
    ])
});

// "my"/"I" as whole words. The utterance talks about the speaker's own
// things, which keeps it in journaling scope regardless of shape.
static PERSONAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(my|i)\b").expect("valid personal-reference regex"));

/// Domain vocabulary that keeps an utterance in journaling scope even when
/// it resembles an off-topic question.
const DOMAIN_KEYWORDS: [&str; 24] = [
    "remind",
    "reminder",
    "journal",
    "entry",
    "entries",
    "note",
    "notes",
    "shopping",
    "list",
    "todo",
    "to-do",
    "task",
    "buy",
    "purchase",
    "pick up",
    "grab",
    "grocery",
    "supermarket",
    "store",
    "quote",
    "says",
    "said",
    "told",
    "mentioned",
];

static ADD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"remind\s+me\s+to",
        r"add.*to.*(journal|list)",
        r"write\s+down",
        r"note\s+that",
        r"remember\s+to",
        r"don'?t\s+forget",
        r#".+\s+says?\s+['"]"#,
        r"someone\s+told\s+me",
    ])
});

// Capitalized speaker attribution, matched on original casing.
static NAMED_SPEAKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+\s+says?\b").expect("valid named-speaker regex"));

static QUERY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"what.*my.*(list|journal|entries)",
        r"show\s+me.*my",
        r"what.*do\s+i\s+have",
        r"what.*should\s+i\s+(buy|get)",
        r"my\s+(shopping\s+)?list",
        r"what.*in\s+my",
        r"find.*in.*journal",
    ])
});

fn matches_any(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(text))
}

fn has_personal_reference(lower: &str) -> bool {
    PERSONAL_RE.is_match(lower)
}

fn has_domain_keyword(lower: &str) -> bool {
    DOMAIN_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Classifies one utterance.
///
/// Total over all inputs and never errors; anything that survives the
/// relevance filter but matches neither add nor query shapes falls through
/// to `Intent::General`.
pub fn classify(utterance: &str) -> Intent {
    let lower = utterance.trim().to_lowercase();

    if matches_any(&NON_JOURNAL_PATTERNS, &lower)
        && !has_personal_reference(&lower)
        && !has_domain_keyword(&lower)
    {
        return Intent::Reject;
    }

    if matches_any(&ADD_PATTERNS, &lower) || NAMED_SPEAKER_RE.is_match(utterance.trim()) {
        return Intent::Add;
    }

    if matches_any(&QUERY_PATTERNS, &lower) {
        return Intent::Query;
    }

    Intent::General
}
