//! Interactive chat entry point.
//!
//! # Responsibility
//! - Drive one `ChatService` over stdin/stdout.
//! - Render structured replies as plain text; keep formatting out of core.

use jotbot_core::{
    default_log_level, init_logging, ChatError, ChatMessage, ChatReply, ChatService, GeminiClient,
    JournalEntry,
};
use std::io::{BufRead, Write};

fn main() {
    if let Some(log_dir) = default_log_dir() {
        // Logging is best-effort for the CLI; the chat loop works without it.
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: {err}");
        }
    }

    let generator = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(err) => {
            // Add/query/reject turns still work offline; only general chat
            // needs the backend, and it will report the missing credential.
            eprintln!("warning: {err}");
            GeminiClient::new("", "gemini-2.5-flash")
        }
    };
    let mut service = ChatService::new(generator);
    let mut history: Vec<ChatMessage> = Vec::new();
    log::info!("event=cli_start module=cli status=ok version={}", jotbot_core::core_version());

    println!("jotbot {} — journaling assistant (ctrl-d to quit)", jotbot_core::core_version());

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }

        match service.handle(utterance, &history) {
            Ok(reply) => {
                let text = render_reply(&reply);
                println!("{text}");
                if let ChatReply::Assistant { .. } = reply {
                    history.push(ChatMessage::user(utterance));
                    history.push(ChatMessage::assistant(text));
                }
            }
            Err(ChatError::Unavailable(message)) => {
                println!("The assistant is unavailable right now: {message}");
            }
            Err(err) => {
                println!("The assistant could not reply: {err}");
            }
        }
    }
}

fn default_log_dir() -> Option<String> {
    let dir = std::env::temp_dir().join("jotbot-logs");
    dir.to_str().map(str::to_string)
}

fn render_reply(reply: &ChatReply) -> String {
    match reply {
        ChatReply::Rejected { message } => message.clone(),
        ChatReply::EntryAdded { entry } => format!(
            "Added to your journal (category: {}, tags: {}): \"{}\"",
            entry.category,
            render_tags(entry),
            entry.content
        ),
        ChatReply::QueryResults { entries } if entries.is_empty() => {
            "I couldn't find any matching entries in your journal. \
             Would you like to add something new?"
                .to_string()
        }
        ChatReply::QueryResults { entries } => {
            let mut lines = vec![format!(
                "I found {} {} in your journal:",
                entries.len(),
                if entries.len() == 1 { "entry" } else { "entries" }
            )];
            for (index, entry) in entries.iter().enumerate() {
                lines.push(format!(
                    "{}. {} [{} | {}]",
                    index + 1,
                    entry.content,
                    entry.category,
                    render_tags(entry)
                ));
            }
            lines.join("\n")
        }
        ChatReply::Assistant { text } => text.clone(),
    }
}

fn render_tags(entry: &JournalEntry) -> String {
    if entry.tags.is_empty() {
        "none".to_string()
    } else {
        entry.tags.join(", ")
    }
}
