//! `carecompanion vision` and `carecompanion interactions`: medication
//! safety helpers backed by the generation service.

use std::path::Path;

use carecompanion_core::analysis::AnalysisType;
use carecompanion_core::signal::MedicationRef;
use carecompanion_engine::{AnalysisReport, InteractionReport};

use super::{build_assistant, load_json_or_default};

/// `carecompanion vision --image <path> --type <tag> [--medications <json>]`
pub async fn run(
    image: &Path,
    kind: &str,
    medications: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let medications: Vec<MedicationRef> = load_json_or_default(medications)?;
    let bytes = std::fs::read(image)
        .map_err(|e| format!("Failed to read image {}: {e}", image.display()))?;
    let (_, assistant) = build_assistant()?;

    let report = assistant
        .analyze_image(bytes, AnalysisType::from_tag(kind), &medications)
        .await
        .unwrap_or_else(|_| AnalysisReport::unreadable());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// `carecompanion interactions --medication <name> [--current <json>]`
pub async fn interactions(
    medication: &str,
    current: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let current: Vec<MedicationRef> = load_json_or_default(current)?;
    let (_, assistant) = build_assistant()?;

    let report = assistant
        .check_interactions(medication, &current)
        .await
        .unwrap_or_else(|_| InteractionReport::unavailable());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
