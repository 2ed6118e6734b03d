//! Action extraction: which safety-gated action, if any, the user asked for.
//!
//! Rules are an ordered table evaluated top to bottom; the first rule with a
//! keyword contained in the lower-cased utterance wins. Matching is by
//! substring, so "message" also fires inside "messages".
//!
//! Only the user's own words are inspected, never the generated reply.
//!
//! Emergency keywords rank below communication and scheduling, so
//! "please text my daughter, I fell" proposes a message rather than an alert.
//! This ordering is kept as-is pending product review.

use carecompanion_core::intent::ActionIntent;

/// Ordered `(keywords, intent)` rules.
const RULES: &[(&[&str], ActionIntent)] = &[
    (&["text", "send message", "message"], ActionIntent::SendMessage),
    (&["call", "phone"], ActionIntent::MakeCall),
    (
        &["schedule", "appointment", "remind me"],
        ActionIntent::CreateReminder,
    ),
    (
        &["help", "emergency", "hurt", "fell", "scared"],
        ActionIntent::EmergencyAlert,
    ),
];

/// Classify an utterance into exactly one intent.
pub fn extract_action(utterance: &str) -> ActionIntent {
    let lower = utterance.to_lowercase();
    for (keywords, intent) in RULES {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *intent;
        }
    }
    ActionIntent::None
}
