//! Context formatter: the signal bundle rendered as prompt text.
//!
//! Produces a fenced block of fact lines in a fixed order:
//!
//! | # | Field | Line |
//! |---|-------|------|
//! | 1 | `calendar_today` | `Today's calendar: ...` |
//! | 2 | `medications_due` | `Medications due now: ...` |
//! | 3 | `account_balance` | `Bank account balance: $...` |
//! | 4 | `unread_messages` | `Unread messages: N` |
//! | 5 | `user_name` | `User's name: ...` |
//! | 6 | `current_time` | `Current time: ...` |
//!
//! A field is rendered when it is present, whatever its value. The one
//! exception is an empty medications list, which is dropped entirely.
//!
//! # Determinism
//!
//! Pure function of the bundle: identical input always produces identical
//! output.

use carecompanion_core::signal::{CalendarEvent, MedicationRef, SignalBundle};

use crate::currency::dollars;

/// First line of every context block.
pub const CONTEXT_OPEN: &str = "[CONTEXT - Information available to help the user]";

/// Last line of every context block.
pub const CONTEXT_CLOSE: &str = "[END CONTEXT]";

const EVENT_PLACEHOLDER: &str = "Event";

/// Render the bundle as a context block.
///
/// An empty bundle yields just the two marker lines.
pub fn format_context(bundle: &SignalBundle) -> String {
    let mut lines = vec![CONTEXT_OPEN.to_string()];

    if let Some(events) = &bundle.calendar_today {
        lines.push(format!("Today's calendar: {}", calendar_summary(events)));
    }

    if let Some(meds) = bundle.medications_due.as_deref().filter(|m| !m.is_empty()) {
        lines.push(format!("Medications due now: {}", medication_names(meds)));
    }

    if let Some(balance) = bundle.account_balance {
        lines.push(format!("Bank account balance: {}", dollars(balance)));
    }

    if let Some(count) = bundle.unread_messages {
        lines.push(format!("Unread messages: {count}"));
    }

    if let Some(name) = &bundle.user_name {
        lines.push(format!("User's name: {name}"));
    }

    if let Some(time) = &bundle.current_time {
        lines.push(format!("Current time: {time}"));
    }

    lines.push(CONTEXT_CLOSE.to_string());
    lines.join("\n")
}

/// Build the user content handed to the text collaborator.
///
/// With no present field the utterance passes through untouched; otherwise
/// the context block is prepended.
pub fn compose_user_content(bundle: &SignalBundle, utterance: &str) -> String {
    if bundle.is_empty() {
        return utterance.to_string();
    }
    format!("{}\n\nUser says: {}", format_context(bundle), utterance)
}

fn calendar_summary(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No events scheduled".into();
    }
    events
        .iter()
        .map(|e| e.summary.as_deref().unwrap_or(EVENT_PLACEHOLDER))
        .collect::<Vec<_>>()
        .join(", ")
}

fn medication_names(meds: &[MedicationRef]) -> String {
    meds.iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
