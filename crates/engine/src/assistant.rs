//! The assistant: one conversational turn, one photo analysis or one
//! interaction check, each a single collaborator call wrapped by the pure
//! formatters and classifiers.

use std::sync::Arc;

use carecompanion_config::AppConfig;
use carecompanion_core::analysis::{AnalysisResult, AnalysisType, SeverityTier};
use carecompanion_core::error::GenerationFailure;
use carecompanion_core::intent::ActionIntent;
use carecompanion_core::message::Message;
use carecompanion_core::provider::{
    GenerationRequest, TextGenerator, Usage, VisionGenerator, VisionRequest,
};
use carecompanion_core::signal::{MedicationRef, SignalBundle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::postprocess;
use crate::context::compose_user_content;
use crate::intent::extract_action;
use crate::severity::classify;
use crate::templates::{interaction_prompt, select_template, CHAT_SYSTEM_PROMPT};

const APOLOGY: &str =
    "I'm sorry, I'm having trouble right now. Can you try asking again in a moment?";
const UNREADABLE_IMAGE: &str = "I had trouble reading this image. Please try again with better lighting or a clearer photo.";
const INTERACTIONS_UNAVAILABLE: &str =
    "Could not check interactions. Please consult your doctor or pharmacist.";
const CONSULT_DOCTOR: &str = "Please consult with your doctor before taking this medication.";
const VERIFY_WITH_PHARMACIST: &str = "This appears safe, but verify with your pharmacist.";

/// Generation limits and the user facts the assistant adds to every turn.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantSettings {
    pub chat_max_tokens: u32,
    pub chat_temperature: f32,
    pub vision_max_tokens: u32,
    pub interactions_max_tokens: u32,
    /// Fills `user_name` when a bundle doesn't carry one
    pub user_name: Option<String>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for AssistantSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            chat_max_tokens: config.chat.max_tokens,
            chat_temperature: config.chat.temperature,
            vision_max_tokens: config.vision.max_tokens,
            interactions_max_tokens: config.interactions.max_tokens,
            user_name: config.user.name.clone(),
        }
    }
}

/// The reply to one chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub suggested_action: ActionIntent,
    /// Any proposed action is surfaced for confirmation by the UI
    pub needs_confirmation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatReply {
    /// What the user hears when the text collaborator fails.
    pub fn apology() -> Self {
        Self {
            response: APOLOGY.into(),
            suggested_action: ActionIntent::None,
            needs_confirmation: false,
            usage: None,
        }
    }
}

/// A photo analysis together with its risk tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub severity: SeverityTier,
}

impl AnalysisReport {
    /// What the user sees when the vision collaborator fails.
    pub fn unreadable() -> Self {
        Self {
            result: AnalysisResult {
                analysis_text: UNREADABLE_IMAGE.into(),
                warnings: None,
                suggestions: None,
                extracted_fields: None,
            },
            severity: SeverityTier::None,
        }
    }
}

/// Outcome of checking a new medication against the current list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionReport {
    pub interactions: Vec<String>,
    pub warnings: Vec<String>,
    pub safe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl InteractionReport {
    /// Nothing to compare against.
    fn nothing_to_check() -> Self {
        Self {
            interactions: Vec::new(),
            warnings: Vec::new(),
            safe: true,
            recommendation: None,
        }
    }

    /// Reported when the check itself could not run. Errs on the side of caution.
    pub fn unavailable() -> Self {
        Self {
            interactions: Vec::new(),
            warnings: vec![INTERACTIONS_UNAVAILABLE.into()],
            safe: false,
            recommendation: None,
        }
    }
}

/// Orchestrates the engine around the two generation collaborators.
pub struct Assistant {
    text: Arc<dyn TextGenerator>,
    vision: Arc<dyn VisionGenerator>,
    settings: AssistantSettings,
}

impl Assistant {
    pub fn new(
        text: Arc<dyn TextGenerator>,
        vision: Arc<dyn VisionGenerator>,
        settings: AssistantSettings,
    ) -> Self {
        Self {
            text,
            vision,
            settings,
        }
    }

    pub fn settings(&self) -> &AssistantSettings {
        &self.settings
    }

    /// Handle one conversational turn.
    ///
    /// The intent comes from the user's own words, never from the reply.
    pub async fn chat(
        &self,
        utterance: &str,
        history: &[Message],
        bundle: &SignalBundle,
    ) -> Result<ChatReply, GenerationFailure> {
        let bundle = self.with_user_facts(bundle);
        let user_content = compose_user_content(&bundle, utterance);

        let request = GenerationRequest {
            system: CHAT_SYSTEM_PROMPT.to_string(),
            history: history.to_vec(),
            user_content,
            max_tokens: Some(self.settings.chat_max_tokens),
            temperature: Some(self.settings.chat_temperature),
        };

        debug!(
            provider = self.text.name(),
            history = request.history.len(),
            content_chars = request.user_content.len(),
            "Sending chat turn"
        );

        let generation = self.text.generate(request).await.map_err(|e| {
            warn!(provider = self.text.name(), "Chat generation failed: {e}");
            e
        })?;

        let suggested_action = extract_action(utterance);
        if !suggested_action.is_none() {
            info!(
                intent = %suggested_action,
                approval = ?suggested_action.requires_approval(),
                "Proposed action"
            );
        }

        Ok(ChatReply {
            response: generation.text,
            needs_confirmation: !suggested_action.is_none(),
            suggested_action,
            usage: generation.usage,
        })
    }

    /// Describe a photo and pull out warnings, suggestions and medication fields.
    pub async fn analyze_image(
        &self,
        image: Vec<u8>,
        analysis_type: AnalysisType,
        medications: &[MedicationRef],
    ) -> Result<AnalysisReport, GenerationFailure> {
        let request = VisionRequest {
            image,
            prompt: select_template(analysis_type, medications),
            max_tokens: Some(self.settings.vision_max_tokens),
        };

        debug!(
            provider = self.vision.name(),
            analysis_type = %analysis_type,
            image_bytes = request.image.len(),
            "Sending image for analysis"
        );

        let reply = self.vision.describe(request).await.map_err(|e| {
            warn!(provider = self.vision.name(), "Image analysis failed: {e}");
            e
        })?;

        let severity = classify(&reply.text);
        if severity.is_unsafe() {
            info!(analysis_type = %analysis_type, "Severe content detected in image analysis");
        }

        Ok(AnalysisReport {
            result: postprocess(&reply.text, analysis_type),
            severity,
        })
    }

    /// Check a new medication against the current list.
    ///
    /// An empty list is safe without asking the collaborator.
    pub async fn check_interactions(
        &self,
        new_medication: &str,
        current: &[MedicationRef],
    ) -> Result<InteractionReport, GenerationFailure> {
        if current.is_empty() {
            return Ok(InteractionReport::nothing_to_check());
        }

        let request = GenerationRequest {
            max_tokens: Some(self.settings.interactions_max_tokens),
            ..GenerationRequest::new(String::new(), interaction_prompt(new_medication, current))
        };

        debug!(
            provider = self.text.name(),
            medication = new_medication,
            current = current.len(),
            "Checking medication interactions"
        );

        let generation = self.text.generate(request).await.map_err(|e| {
            warn!(provider = self.text.name(), "Interaction check failed: {e}");
            e
        })?;

        let analysis = generation.text;
        let report = if classify(&analysis).is_unsafe() {
            info!(medication = new_medication, "Severe interaction reported");
            InteractionReport {
                interactions: vec![analysis.clone()],
                warnings: vec![analysis],
                safe: false,
                recommendation: Some(CONSULT_DOCTOR.into()),
            }
        } else {
            InteractionReport {
                interactions: vec![analysis],
                warnings: Vec::new(),
                safe: true,
                recommendation: Some(VERIFY_WITH_PHARMACIST.into()),
            }
        };

        Ok(report)
    }

    fn with_user_facts(&self, bundle: &SignalBundle) -> SignalBundle {
        let mut bundle = bundle.clone();
        if bundle.user_name.is_none() {
            bundle.user_name = self.settings.user_name.clone();
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CONTEXT_OPEN;
    use crate::test_helpers::{FailingGenerator, ScriptedGenerator};

    fn assistant_with(generator: Arc<ScriptedGenerator>) -> Assistant {
        Assistant::new(generator.clone(), generator, AssistantSettings::default())
    }

    #[tokio::test]
    async fn chat_without_signals_sends_bare_utterance() {
        let generator = Arc::new(ScriptedGenerator::new(&["It's Tuesday, dear."]));
        let assistant = assistant_with(generator.clone());

        let reply = assistant
            .chat("What day is it?", &[], &SignalBundle::default())
            .await
            .unwrap();

        assert_eq!(reply.response, "It's Tuesday, dear.");
        assert_eq!(reply.suggested_action, ActionIntent::None);
        assert!(!reply.needs_confirmation);
        assert_eq!(reply.usage.map(|u| u.output_tokens), Some(5));

        let requests = generator.text_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user_content, "What day is it?");
        assert_eq!(requests[0].system, CHAT_SYSTEM_PROMPT);
        assert_eq!(requests[0].max_tokens, Some(1024));
        assert_eq!(requests[0].temperature, Some(0.7));
    }

    #[tokio::test]
    async fn chat_with_medications_prefixes_context() {
        let generator = Arc::new(ScriptedGenerator::new(&["Time for your pill."]));
        let assistant = assistant_with(generator.clone());
        let bundle = SignalBundle {
            medications_due: Some(vec![MedicationRef::new("Lisinopril", "10mg")]),
            ..SignalBundle::default()
        };

        assistant.chat("Anything due?", &[], &bundle).await.unwrap();

        let content = &generator.text_requests()[0].user_content;
        assert_eq!(
            content,
            &format!(
                "{CONTEXT_OPEN}\nMedications due now: Lisinopril\n[END CONTEXT]\n\nUser says: Anything due?"
            )
        );
    }

    #[tokio::test]
    async fn chat_intent_comes_from_utterance_not_reply() {
        let generator = Arc::new(ScriptedGenerator::new(&["Shall I call Sarah for you?"]));
        let assistant = assistant_with(generator);

        let reply = assistant
            .chat("please text my daughter, I fell", &[], &SignalBundle::default())
            .await
            .unwrap();

        assert_eq!(reply.suggested_action, ActionIntent::SendMessage);
        assert!(reply.needs_confirmation);
    }

    #[tokio::test]
    async fn chat_passes_history_through() {
        let generator = Arc::new(ScriptedGenerator::new(&["Yes, at 2pm."]));
        let assistant = assistant_with(generator.clone());
        let history = vec![
            Message::user("When is my appointment?"),
            Message::assistant("It's at 2pm."),
        ];

        assistant
            .chat("Is it today?", &history, &SignalBundle::default())
            .await
            .unwrap();

        assert_eq!(generator.text_requests()[0].history, history);
    }

    #[tokio::test]
    async fn configured_user_name_fills_bundle() {
        let generator = Arc::new(ScriptedGenerator::new(&["Hi Margaret!"]));
        let settings = AssistantSettings {
            user_name: Some("Margaret".into()),
            ..AssistantSettings::default()
        };
        let assistant = Assistant::new(generator.clone(), generator.clone(), settings);

        assistant.chat("Hello", &[], &SignalBundle::default()).await.unwrap();

        assert!(generator.text_requests()[0]
            .user_content
            .contains("User's name: Margaret"));
    }

    #[tokio::test]
    async fn chat_failure_is_returned() {
        let failing = Arc::new(FailingGenerator(GenerationFailure::Network("reset".into())));
        let assistant = Assistant::new(failing.clone(), failing, AssistantSettings::default());

        let err = assistant
            .chat("Hello", &[], &SignalBundle::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationFailure::Network(_)));
    }

    #[test]
    fn apology_has_no_technical_detail() {
        let reply = ChatReply::apology();
        assert_eq!(reply.response, APOLOGY);
        assert!(!reply.needs_confirmation);
        assert!(InteractionReport::unavailable().warnings[0].contains("consult"));
        assert!(!InteractionReport::unavailable().safe);
    }

    #[tokio::test]
    async fn analyze_prescription_photo() {
        let generator = Arc::new(ScriptedGenerator::new(&[
            "WHAT IT IS: Metformin\nDosage: 500mg\nWARNINGS: Do not skip meals",
        ]));
        let assistant = assistant_with(generator.clone());

        let report = assistant
            .analyze_image(
                vec![0xFF, 0xD8, 0xFF],
                AnalysisType::Prescription,
                &[MedicationRef::new("Lisinopril", "10mg")],
            )
            .await
            .unwrap();

        assert_eq!(report.severity, SeverityTier::Severe);
        assert_eq!(
            report.result.warnings,
            Some(vec!["WARNINGS: Do not skip meals".to_string()])
        );
        let fields = report.result.extracted_fields.unwrap();
        assert_eq!(fields["name"], "metformin");
        assert_eq!(fields["dosage"], "500mg");

        let requests = generator.vision_requests();
        assert_eq!(requests[0].image, vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(requests[0].max_tokens, Some(2048));
        assert!(requests[0].prompt.contains("Lisinopril 10mg"));
    }

    #[test]
    fn report_serializes_flat() {
        let json = serde_json::to_value(AnalysisReport::unreadable()).unwrap();
        assert_eq!(json["severity"], "none");
        assert!(json["analysis"].as_str().unwrap().starts_with("I had trouble"));
        assert!(json.get("warnings").is_none());
        assert!(json.get("result").is_none());
    }

    #[tokio::test]
    async fn analyze_failure_is_returned() {
        let failing = Arc::new(FailingGenerator(GenerationFailure::EmptyResponse));
        let assistant = Assistant::new(failing.clone(), failing, AssistantSettings::default());

        let result = assistant
            .analyze_image(vec![1, 2, 3], AnalysisType::Sign, &[])
            .await;
        assert!(result.is_err());
        assert!(AnalysisReport::unreadable()
            .result
            .analysis_text
            .starts_with("I had trouble reading this image."));
    }

    #[tokio::test]
    async fn no_current_medications_skips_collaborator() {
        let generator = Arc::new(ScriptedGenerator::silent());
        let assistant = assistant_with(generator.clone());

        let report = assistant.check_interactions("Ibuprofen", &[]).await.unwrap();

        assert!(report.safe);
        assert!(report.interactions.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn severe_interaction_is_unsafe() {
        let generator = Arc::new(ScriptedGenerator::new(&[
            "Ibuprofen with Warfarin is dangerous: bleeding risk.",
        ]));
        let assistant = assistant_with(generator.clone());

        let report = assistant
            .check_interactions("Ibuprofen", &[MedicationRef::new("Warfarin", "5mg")])
            .await
            .unwrap();

        assert!(!report.safe);
        assert_eq!(report.warnings, report.interactions);
        assert_eq!(report.recommendation.as_deref(), Some(CONSULT_DOCTOR));
        let request = &generator.text_requests()[0];
        assert_eq!(request.max_tokens, Some(1024));
        assert!(request.system.is_empty());
    }

    #[tokio::test]
    async fn mild_interaction_is_safe() {
        let generator = Arc::new(ScriptedGenerator::new(&["No known interactions."]));
        let assistant = assistant_with(generator);

        let report = assistant
            .check_interactions("Vitamin D", &[MedicationRef::new("Metformin", "500mg")])
            .await
            .unwrap();

        assert!(report.safe);
        assert!(report.warnings.is_empty());
        assert_eq!(report.interactions, vec!["No known interactions."]);
        assert_eq!(report.recommendation.as_deref(), Some(VERIFY_WITH_PHARMACIST));
    }
}
