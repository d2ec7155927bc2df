//! Category detection and tag extraction over entry content.
//!
//! # Responsibility
//! - Resolve free text to exactly one `Category` via an ordered rule table.
//! - Collect lowercase tags from fixed vocabularies and a speaker pattern.
//!
//! # Invariants
//! - Detector rules are evaluated top-to-bottom; the first match wins, so
//!   content matching several vocabularies always resolves to the
//!   earliest-listed category. The order is load-bearing for compatibility
//!   ("remind me to buy eggs" is shopping, not reminders).
//! - Vocabulary matching is plain substring matching over lowercased text.
//! - Extracted tags are lowercase and deduplicated; order carries no meaning.

use crate::model::entry::Category;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Food vocabulary recognized as shopping-item tags.
const FOOD_ITEMS: [&str; 24] = [
    "eggs", "milk", "bread", "cheese", "butter", "yogurt", "apples", "bananas", "chicken", "beef",
    "fish", "rice", "pasta", "tomatoes", "onions", "carrots", "potatoes", "coffee", "tea", "sugar",
    "salt", "pepper", "oil", "flour",
];

/// Location vocabulary recognized as place tags.
const LOCATIONS: [&str; 8] = [
    "supermarket",
    "store",
    "mall",
    "market",
    "shop",
    "office",
    "home",
    "work",
];

/// Ordered (predicate, category) rule table. First match wins.
const CATEGORY_RULES: [(fn(&str) -> bool, Category); 5] = [
    (is_shopping, Category::Shopping),
    (is_quote, Category::Quotes),
    (is_reminder, Category::Reminders),
    (is_goal, Category::Goals),
    (is_thought, Category::Thoughts),
];

// Capitalized name directly before "say"/"says", matched on original casing.
static SPEAKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][a-z]+)\s+says?\b").expect("valid speaker regex"));

// A paired single-quoted span. A lone apostrophe ("don't") is not quote
// vocabulary; only wrapped speech counts.
static QUOTED_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'[^']+'").expect("valid quoted-span regex"));

fn contains_any(lower: &str, vocabulary: &[&str]) -> bool {
    vocabulary.iter().any(|word| lower.contains(word))
}

fn is_shopping(lower: &str) -> bool {
    contains_any(
        lower,
        &["buy", "shopping", "store", "supermarket", "grocery", "pick up"],
    )
}

fn is_quote(lower: &str) -> bool {
    contains_any(lower, &["says", "quote", "\"", "told me"]) || QUOTED_SPAN_RE.is_match(lower)
}

fn is_reminder(lower: &str) -> bool {
    contains_any(lower, &["remind", "remember", "don't forget"])
}

fn is_goal(lower: &str) -> bool {
    contains_any(lower, &["goal", "plan", "want to"])
}

fn is_thought(lower: &str) -> bool {
    contains_any(lower, &["feeling", "think", "believe"])
}

/// Resolves content to exactly one category.
///
/// Total over all inputs; falls back to `Category::General`.
pub fn detect_category(content: &str) -> Category {
    let lower = content.to_lowercase();

    CATEGORY_RULES
        .into_iter()
        .find(|(matches, _)| matches(&lower))
        .map(|(_, category)| category)
        .unwrap_or(Category::General)
}

/// Extracts lowercase tags from content.
///
/// Scans the food and location vocabularies as substrings of the lowercased
/// content, and collects capitalized speaker names appearing before
/// "say"/"says". The result is deduplicated set output; callers must not
/// rely on ordering.
pub fn extract_tags(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    let mut tags = BTreeSet::new();

    for item in FOOD_ITEMS {
        if lower.contains(item) {
            tags.insert(item.to_string());
        }
    }

    for captures in SPEAKER_RE.captures_iter(content) {
        if let Some(name) = captures.get(1) {
            tags.insert(name.as_str().to_lowercase());
        }
    }

    for location in LOCATIONS {
        if lower.contains(location) {
            tags.insert(location.to_string());
        }
    }

    tags.into_iter().collect()
}

/// Normalizes caller-supplied tags: trimmed, lowercased, deduplicated,
/// empties dropped.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let normalized: BTreeSet<String> = tags
        .iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();
    normalized.into_iter().collect()
}
