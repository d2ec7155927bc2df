use jotbot_core::{classify, Intent};

#[test]
fn pure_arithmetic_is_rejected_without_personal_context() {
    for input in ["5+5", "what is 2+2", "what is 5 plus 5", "12 * 12", "100/4=?"] {
        assert_eq!(classify(input), Intent::Reject, "input: {input}");
    }
}

#[test]
fn general_knowledge_questions_are_rejected() {
    for input in [
        "What is the capital of Japan",
        "who discovered penicillin",
        "when was Mozart born",
        "tell me a joke",
        "what's the weather like",
    ] {
        assert_eq!(classify(input), Intent::Reject, "input: {input}");
    }
}

#[test]
fn personal_list_references_always_query_even_when_math_shaped() {
    // "my" plus a list/journal/entries reference must never reject, even
    // when the text also resembles an arithmetic expression.
    for input in [
        "what's in my shopping list",
        "what is in my journal",
        "what are the 2+2 items in my list",
    ] {
        assert_eq!(classify(input), Intent::Query, "input: {input}");
    }
}

#[test]
fn bare_what_is_rejected_but_my_prefix_accepted() {
    assert_ne!(classify("what is shopping list"), Intent::Reject); // domain keyword
    assert_eq!(classify("what is a quasar"), Intent::Reject);
    assert_ne!(classify("what is my quasar"), Intent::Reject);
}

#[test]
fn add_intents_cover_the_full_phrase_list() {
    for input in [
        "Remind me to buy eggs and milk",
        "add cheese to the shopping list",
        "add this thought to my journal",
        "write down the wifi password hint",
        "note that the car needs servicing",
        "remember to send the invoice",
        "Don't forget mum's birthday",
        "Grandpa says 'waste not, want not'",
        "Alice says \"meet me at noon\"",
        "someone told me the shop closes early",
    ] {
        assert_eq!(classify(input), Intent::Add, "input: {input}");
    }
}

#[test]
fn query_intents_cover_the_full_phrase_list() {
    for input in [
        "what's in my shopping list?",
        "show me my reminders",
        "what do I have in my journal",
        "what should I buy this week",
        "what should i get for dinner",
        "find coffee in my journal",
    ] {
        assert_eq!(classify(input), Intent::Query, "input: {input}");
    }
}

#[test]
fn in_scope_small_talk_falls_through_to_general() {
    for input in ["hello", "thanks!", "that sounds good", "how are you"] {
        assert_eq!(classify(input), Intent::General, "input: {input}");
    }
}

#[test]
fn classification_is_pure_and_stable() {
    let input = "Remind me to buy eggs";
    assert_eq!(classify(input), classify(input));
}
