//! # Care Companion Engine
//!
//! The conversational signal engine: turns optional structured facts and a
//! spoken utterance into prompt content, classifies what the user asked for,
//! and structures what the generation collaborators send back.
//!
//! Every formatter and classifier is a pure function. The [`Assistant`] is
//! the only part that awaits a collaborator.

pub mod analysis;
pub mod assistant;
pub mod context;
pub mod currency;
pub mod intent;
pub mod severity;
pub mod speech;
pub mod templates;

#[cfg(test)]
mod test_helpers;

pub use analysis::postprocess;
pub use assistant::{AnalysisReport, Assistant, AssistantSettings, ChatReply, InteractionReport};
pub use context::{compose_user_content, format_context};
pub use intent::extract_action;
pub use severity::classify;
pub use speech::{
    format_balance_for_speech, format_events_for_speech, format_reply_for_speech,
    format_simple_balance,
};
pub use templates::{format_medications, interaction_prompt, select_template, CHAT_SYSTEM_PROMPT};
