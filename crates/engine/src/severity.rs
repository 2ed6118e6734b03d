//! Severity classification of generated analysis text.

use carecompanion_core::analysis::SeverityTier;

/// Any of these in the lower-cased text marks it `Severe`.
const SEVERE_KEYWORDS: &[&str] = &["severe", "dangerous", "contraindicated", "do not"];

/// Classify text into a risk tier. Never returns `Moderate`.
pub fn classify(text: &str) -> SeverityTier {
    let lower = text.to_lowercase();
    if SEVERE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        SeverityTier::Severe
    } else {
        SeverityTier::None
    }
}
