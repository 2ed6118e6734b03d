//! `carecompanion chat`: Single-message or interactive conversation.

use carecompanion_core::message::Message;
use carecompanion_core::signal::SignalBundle;
use carecompanion_engine::{Assistant, ChatReply, format_reply_for_speech};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{build_assistant, load_json_or_default};

pub async fn run(
    message: Option<String>,
    bundle: Option<String>,
    speak: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bundle: SignalBundle = load_json_or_default(bundle.as_deref())?;
    let (config, assistant) = build_assistant()?;

    if let Some(msg) = message {
        eprint!("  Thinking...");
        let reply = turn(&assistant, &msg, &[], &bundle).await;
        eprint!("\r              \r");
        print_reply(&reply, speak);
        return Ok(());
    }

    println!();
    println!("  Care Companion: Interactive Mode");
    println!();
    println!("  Model:     {}", config.model);
    println!(
        "  User:      {}",
        config.user.name.as_deref().unwrap_or("(unnamed)")
    );
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut history: Vec<Message> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("  You > ");
    use std::io::Write;
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let utterance = line.trim();
        if utterance.eq_ignore_ascii_case("exit") || utterance.eq_ignore_ascii_case("quit") {
            break;
        }
        if !utterance.is_empty() {
            let reply = turn(&assistant, utterance, &history, &bundle).await;
            println!();
            print_reply(&reply, speak);
            println!();

            history.push(Message::user(utterance));
            history.push(Message::assistant(reply.response));
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}

/// One turn; collaborator failures become the apology.
async fn turn(
    assistant: &Assistant,
    utterance: &str,
    history: &[Message],
    bundle: &SignalBundle,
) -> ChatReply {
    assistant
        .chat(utterance, history, bundle)
        .await
        .unwrap_or_else(|_| ChatReply::apology())
}

fn print_reply(reply: &ChatReply, speak: bool) {
    let text = if speak {
        format_reply_for_speech(&reply.response)
    } else {
        reply.response.clone()
    };
    for line in text.lines() {
        println!("  Assistant > {line}");
    }

    if reply.needs_confirmation {
        let action = reply.suggested_action;
        match action.requires_approval() {
            Some(approval) => println!("  [Suggested action: {action}, needs {approval:?} approval]"),
            None => println!("  [Suggested action: {action}]"),
        }
    }
}
