//! Action intents: safety-gated operations proposed from a user utterance.
//!
//! The approval and confirmation gates are derived from the variant, so an
//! emergency alert can never be built that waits for confirmation, and no
//! other action can be built that skips it.

use serde::{Deserialize, Serialize};

/// Who has to approve an action before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approval {
    /// The person being cared for confirms it themselves
    User,
    /// A caregiver signs off
    Caregiver,
}

/// A discrete action proposed from what the user said.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "IntentPayload", from = "IntentPayload")]
pub enum ActionIntent {
    SendMessage,
    MakeCall,
    CreateReminder,
    /// Auto-executes: no approval, no confirmation.
    EmergencyAlert,
    None,
}

impl ActionIntent {
    /// The approval gate, or `None` when the action runs without one.
    pub fn requires_approval(self) -> Option<Approval> {
        match self {
            Self::SendMessage => Some(Approval::Caregiver),
            Self::MakeCall | Self::CreateReminder => Some(Approval::User),
            Self::EmergencyAlert | Self::None => None,
        }
    }

    /// Whether the user must confirm before execution.
    pub fn confirmation_needed(self) -> bool {
        matches!(
            self,
            Self::SendMessage | Self::MakeCall | Self::CreateReminder
        )
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }

    /// Wire tag, `None` for the absent intent.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::SendMessage => Some("send_message"),
            Self::MakeCall => Some("make_call"),
            Self::CreateReminder => Some("create_reminder"),
            Self::EmergencyAlert => Some("emergency_alert"),
            Self::None => None,
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "send_message" => Self::SendMessage,
            "make_call" => Self::MakeCall,
            "create_reminder" => Self::CreateReminder,
            "emergency_alert" => Self::EmergencyAlert,
            _ => Self::None,
        }
    }
}

impl std::fmt::Display for ActionIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().unwrap_or("none"))
    }
}

/// Serialized shape consumed by the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IntentPayload {
    #[serde(rename = "type")]
    kind: Option<String>,
    requires_approval: Option<Approval>,
    #[serde(default)]
    confirmation_needed: bool,
}

impl From<ActionIntent> for IntentPayload {
    fn from(intent: ActionIntent) -> Self {
        Self {
            kind: intent.as_str().map(str::to_string),
            requires_approval: intent.requires_approval(),
            confirmation_needed: intent.confirmation_needed(),
        }
    }
}

// Gates are recomputed from the tag; payload flags are not trusted.
impl From<IntentPayload> for ActionIntent {
    fn from(payload: IntentPayload) -> Self {
        payload
            .kind
            .as_deref()
            .map(ActionIntent::from_tag)
            .unwrap_or(ActionIntent::None)
    }
}
