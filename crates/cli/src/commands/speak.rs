//! `carecompanion speak`: Speech formatting.

use carecompanion_core::account::Account;
use carecompanion_core::signal::CalendarEvent;
use carecompanion_engine::{
    format_balance_for_speech, format_events_for_speech, format_reply_for_speech,
    format_simple_balance,
};
use clap::Subcommand;

use super::load_json;

#[derive(Subcommand)]
pub enum SpeakCommand {
    /// Add spoken pauses to a reply
    Reply {
        text: String,
    },

    /// Summarize account balances
    Balance {
        /// Accounts JSON, inline or a file path
        accounts: String,
    },

    /// Answer "do I have enough money?"
    SimpleBalance {
        /// Accounts JSON, inline or a file path
        accounts: String,
    },

    /// Summarize today's events
    Events {
        /// Events JSON, inline or a file path
        events: String,
    },
}

pub fn run(what: SpeakCommand) -> Result<(), Box<dyn std::error::Error>> {
    let speech = match what {
        SpeakCommand::Reply { text } => format_reply_for_speech(&text),
        SpeakCommand::Balance { accounts } => {
            let accounts: Vec<Account> = load_json(&accounts)?;
            format_balance_for_speech(&accounts)
        }
        SpeakCommand::SimpleBalance { accounts } => {
            let accounts: Vec<Account> = load_json(&accounts)?;
            format_simple_balance(&accounts)
        }
        SpeakCommand::Events { events } => {
            let events: Vec<CalendarEvent> = load_json(&events)?;
            format_events_for_speech(&events)
        }
    };
    println!("{speech}");
    Ok(())
}
