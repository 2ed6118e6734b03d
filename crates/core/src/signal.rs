//! Signal bundle: the optional facts available to inform a reply.
//!
//! Every field is optional and presence, not value, decides whether it is
//! rendered: `Some(vec![])` for the calendar means "checked, nothing today",
//! while `None` means "not known".

use serde::{Deserialize, Serialize};

/// A calendar event as delivered by the calendar collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Event title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// RFC 3339 timestamp, or a bare date for all-day events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// An event with just a title.
    pub fn titled(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }
}

/// A medication shown to the user or passed into a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationRef {
    pub name: String,

    /// Free-form strength, e.g. "10mg"
    #[serde(default)]
    pub dosage: String,
}

impl MedicationRef {
    pub fn new(name: impl Into<String>, dosage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
        }
    }
}

/// The set of optional structured facts about the user's current situation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_today: Option<Vec<CalendarEvent>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications_due: Option<Vec<MedicationRef>>,

    /// Primary account balance in dollars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_messages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Pre-formatted local time, e.g. "02:30 PM"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_time: Option<String>,
}

impl SignalBundle {
    /// Parse a bundle from JSON with snake_case keys.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether no field at all is present.
    pub fn is_empty(&self) -> bool {
        self.calendar_today.is_none()
            && self.medications_due.is_none()
            && self.account_balance.is_none()
            && self.unread_messages.is_none()
            && self.user_name.is_none()
            && self.current_time.is_none()
    }
}
