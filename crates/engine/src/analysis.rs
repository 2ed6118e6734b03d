//! Analysis post-processing: free-form vision replies turned into
//! warnings, suggestions and medication fields.
//!
//! Everything here is keyword heuristics over individual lines:
//!
//! - **Warnings**: lines mentioning a safety keyword
//! - **Suggestions**: lines mentioning a next-step keyword
//! - **Fields** (prescriptions and medication labels only): the text after the
//!   first colon of the first line naming each field
//!
//! A line may land in both warnings and suggestions. Nothing is deduplicated
//! and nothing is fabricated: an unmatched field is simply missing.

use std::collections::BTreeMap;

use carecompanion_core::analysis::{AnalysisResult, AnalysisType};

const WARNING_KEYWORDS: &[&str] = &[
    "warning",
    "caution",
    "do not",
    "danger",
    "interaction",
    "contraindication",
    "allergy",
    "side effect",
];

const SUGGESTION_KEYWORDS: &[&str] = &[
    "what to do",
    "recommend",
    "suggest",
    "should",
    "consider",
    "next step",
];

/// Canonical medication fields and the synonyms that name them, in scan order.
const FIELD_SYNONYMS: &[(&str, &[&str])] = &[
    ("name", &["medication name", "drug name", "what it is"]),
    ("dosage", &["dosage", "dose", "strength"]),
    ("frequency", &["frequency", "how often", "take"]),
    ("instructions", &["instructions", "how to take"]),
];

/// Bullet and emphasis characters stripped from collected lines.
const MARKUP: &[char] = &['*', '-', ' '];

/// Turn a vision reply into a structured result.
pub fn postprocess(analysis_text: &str, analysis_type: AnalysisType) -> AnalysisResult {
    let lines: Vec<&str> = analysis_text.lines().collect();

    let warnings = collect_matching(&lines, WARNING_KEYWORDS);
    let suggestions = collect_matching(&lines, SUGGESTION_KEYWORDS);
    let extracted_fields = if analysis_type.extracts_medication_fields() {
        Some(extract_medication_fields(&lines)).filter(|fields| !fields.is_empty())
    } else {
        None
    };

    AnalysisResult {
        analysis_text: analysis_text.to_string(),
        warnings: non_empty(warnings),
        suggestions: non_empty(suggestions),
        extracted_fields,
    }
}

fn collect_matching(lines: &[&str], keywords: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| {
            let lower = line.to_lowercase();
            keywords.iter().any(|k| lower.contains(k))
        })
        .map(|line| line.trim_matches(MARKUP).to_string())
        .collect()
}

fn extract_medication_fields(lines: &[&str]) -> BTreeMap<String, String> {
    let lowered: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();
    let mut fields = BTreeMap::new();

    for (key, synonyms) in FIELD_SYNONYMS {
        let value = lowered
            .iter()
            .filter(|line| synonyms.iter().any(|s| line.contains(s)))
            .find_map(|line| line.split_once(':').map(|(_, rest)| rest.trim()));

        if let Some(value) = value {
            fields.insert((*key).to_string(), value.to_string());
        }
    }

    fields
}

/// Empty collections are reported as absent.
fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESCRIPTION_REPLY: &str = "\
**WHAT IT IS:** Lisinopril, a blood pressure medicine
Dosage: 10mg twice daily
- HOW TO TAKE IT: with a glass of water
* WARNINGS: Do not take with potassium supplements
WHAT TO DO: You should ask your pharmacist about refills";

    #[test]
    fn extracts_dosage_from_prescription() {
        let result = postprocess("Dosage: 10mg twice daily", AnalysisType::Prescription);
        let fields = result.extracted_fields.unwrap();
        assert_eq!(fields.get("dosage").map(String::as_str), Some("10mg twice daily"));
    }

    #[test]
    fn full_prescription_reply() {
        let result = postprocess(PRESCRIPTION_REPLY, AnalysisType::Prescription);

        assert_eq!(result.analysis_text, PRESCRIPTION_REPLY);
        assert_eq!(
            result.warnings.unwrap(),
            vec!["WARNINGS: Do not take with potassium supplements"]
        );
        assert_eq!(
            result.suggestions.unwrap(),
            vec!["WHAT TO DO: You should ask your pharmacist about refills"]
        );

        let fields = result.extracted_fields.unwrap();
        assert_eq!(fields["name"], "** lisinopril, a blood pressure medicine");
        assert_eq!(fields["dosage"], "10mg twice daily");
        // "take" appears first on the HOW TO TAKE IT line
        assert_eq!(fields["frequency"], "with a glass of water");
        assert_eq!(fields["instructions"], "with a glass of water");
    }

    #[test]
    fn line_can_be_warning_and_suggestion() {
        let text = "Caution: you should not drive";
        let result = postprocess(text, AnalysisType::Sign);
        assert_eq!(result.warnings.unwrap(), vec![text]);
        assert_eq!(result.suggestions.unwrap(), vec![text]);
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let text = "- Allergy: peanuts\nServing size 2\n- Allergy: peanuts";
        let result = postprocess(text, AnalysisType::FoodLabel);
        assert_eq!(
            result.warnings.unwrap(),
            vec!["Allergy: peanuts", "Allergy: peanuts"]
        );
    }

    #[test]
    fn nothing_matched_is_absent() {
        let result = postprocess("A red octagon reading STOP.", AnalysisType::Sign);
        assert!(result.warnings.is_none());
        assert!(result.suggestions.is_none());
        assert!(result.extracted_fields.is_none());
    }

    #[test]
    fn empty_text_is_not_an_error() {
        let result = postprocess("", AnalysisType::Prescription);
        assert_eq!(result.analysis_text, "");
        assert!(result.warnings.is_none());
        assert!(result.extracted_fields.is_none());
    }

    #[test]
    fn keyword_without_colon_is_skipped() {
        let text = "Take one dose each morning\nDose: 5mg";
        let fields = postprocess(text, AnalysisType::MedicationLabel)
            .extracted_fields
            .unwrap();
        assert_eq!(fields["dosage"], "5mg");
        assert!(!fields.contains_key("frequency"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn value_after_first_colon_only() {
        let fields = postprocess("Frequency: 8:00 and 20:00", AnalysisType::Prescription)
            .extracted_fields
            .unwrap();
        assert_eq!(fields["frequency"], "8:00 and 20:00");
    }

    #[test]
    fn fields_only_for_medication_types() {
        let result = postprocess("Dosage: 10mg", AnalysisType::Recipe);
        assert!(result.extracted_fields.is_none());
    }

    #[test]
    fn postprocess_is_idempotent() {
        assert_eq!(
            postprocess(PRESCRIPTION_REPLY, AnalysisType::Prescription),
            postprocess(PRESCRIPTION_REPLY, AnalysisType::Prescription)
        );
    }
}
