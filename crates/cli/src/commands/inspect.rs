//! Offline inspection commands: `context`, `intent`, `analyze`, `prompt`.
//!
//! None of these contact a generation service.

use std::io::Read;
use std::path::Path;

use carecompanion_core::analysis::AnalysisType;
use carecompanion_core::signal::{MedicationRef, SignalBundle};
use carecompanion_engine::{
    AnalysisReport, classify, compose_user_content, extract_action, format_context, postprocess,
    select_template,
};

use super::{load_json, load_json_or_default};

/// `carecompanion context --bundle <json> [--message <text>]`
pub fn context(bundle: &str, message: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let bundle: SignalBundle = load_json(bundle)?;
    match message {
        Some(utterance) => println!("{}", compose_user_content(&bundle, utterance)),
        None => println!("{}", format_context(&bundle)),
    }
    Ok(())
}

/// `carecompanion intent <utterance>`
pub fn intent(utterance: &str) -> Result<(), Box<dyn std::error::Error>> {
    let intent = extract_action(utterance);
    println!("{}", serde_json::to_string_pretty(&intent)?);
    Ok(())
}

/// `carecompanion analyze --type <tag> [--file <path>]`
pub fn analyze(kind: &str, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let analysis_type = AnalysisType::from_tag(kind);
    let report = AnalysisReport {
        result: postprocess(&text, analysis_type),
        severity: classify(&text),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// `carecompanion prompt --type <tag> [--medications <json>]`
pub fn prompt(kind: &str, medications: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let medications: Vec<MedicationRef> = load_json_or_default(medications)?;
    println!("{}", select_template(AnalysisType::from_tag(kind), &medications));
    Ok(())
}
