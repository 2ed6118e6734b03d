//! Bank account balances as delivered by the read-only banking collaborator.
//!
//! Account numbers are never part of this type.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,

    /// Broad type, e.g. "depository"
    #[serde(rename = "type", default)]
    pub account_type: String,

    /// Narrow type, e.g. "checking" or "savings"
    #[serde(default)]
    pub subtype: Option<String>,

    /// Current balance in the account currency
    pub balance: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Opaque identifier from the banking collaborator
    #[serde(default)]
    pub account_id: String,
}

impl Account {
    /// A depository account with only the fields speech output needs.
    pub fn new(name: impl Into<String>, subtype: Option<&str>, balance: f64) -> Self {
        Self {
            name: name.into(),
            account_type: "depository".into(),
            subtype: subtype.map(str::to_string),
            balance,
            available: None,
            currency: Some("USD".into()),
            account_id: String::new(),
        }
    }

    /// Whether the subtype equals `subtype` exactly.
    pub fn is_subtype(&self, subtype: &str) -> bool {
        self.subtype.as_deref() == Some(subtype)
    }
}
