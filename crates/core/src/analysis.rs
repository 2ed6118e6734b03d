//! Photo analysis value types: what kind of image it is, what came out of
//! the reply, and how risky the reply reads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The kind of image the user photographed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    Prescription,
    #[serde(rename = "medication")]
    MedicationLabel,
    DoctorNote,
    Recipe,
    FoodLabel,
    Nutrition,
    Sign,
    #[serde(other)]
    Unknown,
}

impl AnalysisType {
    /// Parse a wire tag. Unrecognized tags map to `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "prescription" => Self::Prescription,
            "medication" => Self::MedicationLabel,
            "doctor_note" => Self::DoctorNote,
            "recipe" => Self::Recipe,
            "food_label" => Self::FoodLabel,
            "nutrition" => Self::Nutrition,
            "sign" => Self::Sign,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prescription => "prescription",
            Self::MedicationLabel => "medication",
            Self::DoctorNote => "doctor_note",
            Self::Recipe => "recipe",
            Self::FoodLabel => "food_label",
            Self::Nutrition => "nutrition",
            Self::Sign => "sign",
            Self::Unknown => "unknown",
        }
    }

    /// Whether structured medication fields are pulled from the reply.
    pub fn extracts_medication_fields(self) -> bool {
        matches!(self, Self::Prescription | Self::MedicationLabel)
    }
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse risk tier of generated analysis text. Ordered: `None < Moderate < Severe`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    #[default]
    None,
    /// Reserved for manual review; no keyword rule produces it.
    Moderate,
    Severe,
}

impl SeverityTier {
    /// `Severe` blocks proceeding until someone reviews it.
    pub fn is_unsafe(self) -> bool {
        self == Self::Severe
    }
}

/// Structured view of a vision reply.
///
/// Optional collections are either present with at least one entry or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The reply text, unmodified
    #[serde(rename = "analysis")]
    pub analysis_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,

    #[serde(
        rename = "extracted_data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub extracted_fields: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!(AnalysisType::from_tag("Prescription"), AnalysisType::Prescription);
        assert_eq!(AnalysisType::from_tag("medication"), AnalysisType::MedicationLabel);
        assert_eq!(AnalysisType::from_tag(" food_label "), AnalysisType::FoodLabel);
        assert_eq!(AnalysisType::from_tag("receipt"), AnalysisType::Unknown);
    }

    #[test]
    fn unknown_tag_deserializes_to_unknown() {
        let t: AnalysisType = serde_json::from_str(r#""x_ray""#).unwrap();
        assert_eq!(t, AnalysisType::Unknown);
        let t: AnalysisType = serde_json::from_str(r#""medication""#).unwrap();
        assert_eq!(t, AnalysisType::MedicationLabel);
    }

    #[test]
    fn only_medication_types_extract_fields() {
        assert!(AnalysisType::Prescription.extracts_medication_fields());
        assert!(AnalysisType::MedicationLabel.extracts_medication_fields());
        assert!(!AnalysisType::Recipe.extracts_medication_fields());
        assert!(!AnalysisType::Unknown.extracts_medication_fields());
    }

    #[test]
    fn severity_is_monotonic() {
        assert!(SeverityTier::None < SeverityTier::Moderate);
        assert!(SeverityTier::Moderate < SeverityTier::Severe);
        assert!(SeverityTier::Severe.is_unsafe());
        assert!(!SeverityTier::Moderate.is_unsafe());
    }

    #[test]
    fn absent_collections_are_not_serialized() {
        let result = AnalysisResult {
            analysis_text: "A stop sign.".into(),
            warnings: None,
            suggestions: None,
            extracted_fields: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"analysis": "A stop sign."}));
    }
}
