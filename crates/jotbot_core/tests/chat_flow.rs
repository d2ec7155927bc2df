use jotbot_core::{
    Category, ChatError, ChatMessage, ChatReply, ChatService, GenerateError, TextGenerator,
    REJECTION_MESSAGE,
};
use std::cell::RefCell;
use std::rc::Rc;

type RecordedCalls = Rc<RefCell<Vec<(String, Vec<ChatMessage>)>>>;

/// Scripted generator: records what it was asked and replies with a fixed
/// line, or fails when constructed without one.
struct ScriptedGenerator {
    reply: Option<String>,
    calls: RecordedCalls,
}

impl ScriptedGenerator {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn unavailable() -> Self {
        Self {
            reply: None,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn call_log(&self) -> RecordedCalls {
        Rc::clone(&self.calls)
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, system: &str, messages: &[ChatMessage]) -> Result<String, GenerateError> {
        self.calls
            .borrow_mut()
            .push((system.to_string(), messages.to_vec()));
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(GenerateError::MissingApiKey),
        }
    }
}

#[test]
fn off_topic_turn_returns_structured_rejection() {
    let mut service = ChatService::new(ScriptedGenerator::replying("unused"));
    let reply = service
        .handle("what is 2+2", &[])
        .expect("rejection is not an error");

    assert_eq!(
        reply,
        ChatReply::Rejected {
            message: REJECTION_MESSAGE.to_string()
        }
    );
}

#[test]
fn add_turn_returns_the_created_entry() {
    let mut service = ChatService::new(ScriptedGenerator::replying("unused"));
    let reply = service
        .handle("Remind me to buy eggs and milk", &[])
        .expect("add turn should succeed");

    let ChatReply::EntryAdded { entry } = reply else {
        panic!("expected EntryAdded, got {reply:?}");
    };
    assert_eq!(entry.category, Category::Shopping);
    assert!(entry.tags.contains(&"eggs".to_string()));
    assert_eq!(service.store().len(), 1);
}

#[test]
fn query_turn_routes_shopping_vocabulary_to_the_shopping_category() {
    let mut service = ChatService::new(ScriptedGenerator::replying("unused"));
    service
        .handle("Remind me to buy eggs", &[])
        .expect("seed add should succeed");
    service
        .handle("note that I want to read more", &[])
        .expect("seed add should succeed");

    let reply = service
        .handle("what's in my shopping list?", &[])
        .expect("query turn should succeed");
    let ChatReply::QueryResults { entries } = reply else {
        panic!("expected QueryResults, got {reply:?}");
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].category, Category::Shopping);
}

#[test]
fn query_with_no_matches_returns_empty_results_not_an_error() {
    let mut service = ChatService::new(ScriptedGenerator::replying("unused"));
    let reply = service
        .handle("show me my quotes", &[])
        .expect("query turn should succeed");
    assert_eq!(reply, ChatReply::QueryResults { entries: vec![] });
}

#[test]
fn general_turn_passes_history_and_recent_entry_context_to_the_generator() {
    let generator = ScriptedGenerator::replying("nice to meet you");
    let calls = generator.call_log();
    let mut service = ChatService::new(generator);
    service
        .handle("Remind me to buy eggs", &[])
        .expect("seed add should succeed");

    let history = vec![
        ChatMessage::user("hi"),
        ChatMessage::assistant("hello, what can I note down?"),
    ];
    let reply = service
        .handle("how are you", &history)
        .expect("general turn should succeed");
    assert_eq!(
        reply,
        ChatReply::Assistant {
            text: "nice to meet you".to_string()
        }
    );

    let recorded = calls.borrow();
    assert_eq!(recorded.len(), 1, "only the general turn reaches the backend");
    let (system, messages) = &recorded[0];
    assert!(system.contains("Remind me to buy eggs"), "recent entries go into the system prompt");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], history[0]);
    assert_eq!(messages[2], ChatMessage::user("how are you"));
}

#[test]
fn empty_store_context_announces_no_entries() {
    let generator = ScriptedGenerator::replying("ok");
    let calls = generator.call_log();
    let mut service = ChatService::new(generator);
    service.handle("how are you", &[]).expect("general turn");

    let recorded = calls.borrow();
    assert!(recorded[0].0.contains("No entries yet."));
}

#[test]
fn missing_credential_surfaces_as_service_unavailable() {
    let mut service = ChatService::new(ScriptedGenerator::unavailable());
    let err = service
        .handle("how are you", &[])
        .expect_err("general chat must fail without a backend");
    assert!(matches!(err, ChatError::Unavailable(_)));
    assert!(err.to_string().contains("unavailable"));
}

#[test]
fn journal_turns_succeed_while_the_backend_is_down() {
    let mut service = ChatService::new(ScriptedGenerator::unavailable());

    let added = service
        .handle("Remind me to buy milk", &[])
        .expect("add works offline");
    assert!(matches!(added, ChatReply::EntryAdded { .. }));

    let queried = service
        .handle("what's in my shopping list", &[])
        .expect("query works offline");
    let ChatReply::QueryResults { entries } = queried else {
        panic!("expected QueryResults");
    };
    assert_eq!(entries.len(), 1);

    let rejected = service
        .handle("tell me a joke", &[])
        .expect("rejection works offline");
    assert!(matches!(rejected, ChatReply::Rejected { .. }));
}
