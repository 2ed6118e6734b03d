//! Speech formatting for the text-to-speech layer.
//!
//! Sentence pauses are rendered as ellipses, and balances and calendar
//! events become short spoken summaries.

use carecompanion_core::account::Account;
use carecompanion_core::signal::CalendarEvent;
use chrono::{DateTime, NaiveDateTime};

use crate::currency::dollars;

/// Events named individually before the rest are summarized as a count.
const SPOKEN_EVENT_LIMIT: usize = 3;

/// Insert pauses so the reply is easier to follow when spoken.
pub fn format_reply_for_speech(text: &str) -> String {
    let paused = text.replace(". ", "... ").replace("? ", "?... ");
    if paused.to_lowercase().contains("appointment") {
        paused.replace("appointment", "... appointment ...")
    } else {
        paused
    }
}

/// Spoken summary of the user's checking and savings balances.
pub fn format_balance_for_speech(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "I couldn't find any account information.".into();
    }

    let mut speech = String::new();

    if let Some(checking) = accounts.iter().find(|a| a.is_subtype("checking")) {
        speech.push_str(&format!(
            "You have {} in your checking account. ",
            dollars(checking.balance)
        ));
    }

    if let Some(savings) = accounts.iter().find(|a| a.is_subtype("savings")) {
        speech.push_str(&format!(
            "And {} in your savings account. ",
            dollars(savings.balance)
        ));
    }

    if speech.is_empty() {
        let total: f64 = accounts.iter().map(|a| a.balance).sum();
        speech = format!("Your total account balance is {}. ", dollars(total));
    }

    speech.push_str("All your accounts are in good standing.");
    speech
}

/// Answer "do I have enough money?" from the first checking account.
pub fn format_simple_balance(accounts: &[Account]) -> String {
    let Some(checking) = accounts.iter().find(|a| a.is_subtype("checking")) else {
        return "I can see your accounts are active.".into();
    };

    let balance = checking.balance;
    let amount = dollars(balance);
    if balance > 1000.0 {
        format!("Yes, you have {amount}. You're doing great!")
    } else if balance > 100.0 {
        format!("You have {amount}. You have enough for now.")
    } else {
        format!("You have {amount} in your account. You might want to check with your caregiver.")
    }
}

/// Spoken rundown of today's events.
pub fn format_events_for_speech(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "You don't have any events scheduled.".into();
    }

    let count = events.len();
    let plural = if count > 1 { "s" } else { "" };
    let named = events
        .iter()
        .take(SPOKEN_EVENT_LIMIT)
        .map(spoken_event)
        .collect::<Vec<_>>()
        .join(", ");

    let tail = if count > SPOKEN_EVENT_LIMIT {
        format!(", and {} more events.", count - SPOKEN_EVENT_LIMIT)
    } else {
        ".".to_string()
    };

    format!("You have {count} event{plural} today. {named}{tail}")
}

fn spoken_event(event: &CalendarEvent) -> String {
    let summary = event.summary.as_deref().unwrap_or("Event");
    match event.start.as_deref().and_then(spoken_start) {
        Some(when) => format!("{summary} {when}"),
        None => summary.to_string(),
    }
}

/// `at 02:00 PM` for timed starts, `all day` for date-only starts.
fn spoken_start(start: &str) -> Option<String> {
    if !start.contains('T') {
        return Some("all day".into());
    }

    let time = match DateTime::parse_from_rfc3339(start) {
        Ok(dt) => dt.format("%I:%M %p").to_string(),
        Err(_) => NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M:%S")
            .ok()?
            .format("%I:%M %p")
            .to_string(),
    };
    Some(format!("at {time}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checking(balance: f64) -> Vec<Account> {
        vec![Account::new("Everyday", Some("checking"), balance)]
    }

    fn event(summary: &str, start: &str) -> CalendarEvent {
        CalendarEvent {
            start: Some(start.into()),
            ..CalendarEvent::titled(summary)
        }
    }

    #[test]
    fn reply_gets_pauses() {
        assert_eq!(
            format_reply_for_speech("Hello there. How are you? Fine"),
            "Hello there... How are you?... Fine"
        );
    }

    #[test]
    fn appointment_is_set_apart() {
        assert_eq!(
            format_reply_for_speech("Your appointment is at 2pm"),
            "Your ... appointment ... is at 2pm"
        );
        // detection is case-insensitive, replacement is not
        assert_eq!(
            format_reply_for_speech("Appointment today"),
            "Appointment today"
        );
    }

    #[test]
    fn balance_with_no_accounts() {
        assert_eq!(
            format_balance_for_speech(&[]),
            "I couldn't find any account information."
        );
    }

    #[test]
    fn balance_checking_and_savings() {
        let accounts = vec![
            Account::new("Savings", Some("savings"), 5000.0),
            Account::new("Everyday", Some("checking"), 1234.56),
        ];
        assert_eq!(
            format_balance_for_speech(&accounts),
            "You have $1,234.56 in your checking account. \
             And $5,000.00 in your savings account. \
             All your accounts are in good standing."
        );
    }

    #[test]
    fn balance_falls_back_to_total() {
        let accounts = vec![
            Account::new("Card", Some("credit card"), 20.0),
            Account::new("Brokerage", None, 1000.5),
        ];
        assert_eq!(
            format_balance_for_speech(&accounts),
            "Your total account balance is $1,020.50. All your accounts are in good standing."
        );
    }

    #[test]
    fn simple_balance_without_checking() {
        let accounts = vec![Account::new("Savings", Some("savings"), 9000.0)];
        assert_eq!(
            format_simple_balance(&accounts),
            "I can see your accounts are active."
        );
        assert_eq!(format_simple_balance(&[]), "I can see your accounts are active.");
    }

    #[test]
    fn simple_balance_bands() {
        assert_eq!(
            format_simple_balance(&checking(99.99)),
            "You have $99.99 in your account. You might want to check with your caregiver."
        );
        assert_eq!(
            format_simple_balance(&checking(100.0)),
            "You have $100.00 in your account. You might want to check with your caregiver."
        );
        assert_eq!(
            format_simple_balance(&checking(100.01)),
            "You have $100.01. You have enough for now."
        );
        assert_eq!(
            format_simple_balance(&checking(1000.0)),
            "You have $1,000.00. You have enough for now."
        );
        assert_eq!(
            format_simple_balance(&checking(1000.01)),
            "Yes, you have $1,000.01. You're doing great!"
        );
    }

    #[test]
    fn simple_balance_uses_first_checking() {
        let accounts = vec![
            Account::new("Old", Some("checking"), 5.0),
            Account::new("New", Some("checking"), 5000.0),
        ];
        assert!(format_simple_balance(&accounts).starts_with("You have $5.00 in your account."));
    }

    #[test]
    fn no_events() {
        assert_eq!(
            format_events_for_speech(&[]),
            "You don't have any events scheduled."
        );
    }

    #[test]
    fn single_timed_event() {
        let events = vec![event("Doctor visit", "2025-03-04T14:30:00-05:00")];
        assert_eq!(
            format_events_for_speech(&events),
            "You have 1 event today. Doctor visit at 02:30 PM."
        );
    }

    #[test]
    fn all_day_and_untimed_events() {
        let events = vec![
            event("Birthday", "2025-03-04"),
            event("Walk", "2025-03-04T09:05:00"),
            event("Lunch", "soon-ish T"),
        ];
        assert_eq!(
            format_events_for_speech(&events),
            "You have 3 events today. Birthday all day, Walk at 09:05 AM, Lunch."
        );
    }

    #[test]
    fn more_than_three_events_are_counted() {
        let events = vec![
            event("A", "2025-03-04T08:00:00Z"),
            CalendarEvent::titled("B"),
            CalendarEvent::titled("C"),
            CalendarEvent::titled("D"),
            CalendarEvent::titled("E"),
        ];
        assert_eq!(
            format_events_for_speech(&events),
            "You have 5 events today. A at 08:00 AM, B, C, and 2 more events."
        );
    }
}
