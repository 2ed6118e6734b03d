//! Collaborator traits: the abstraction over text and vision generation.
//!
//! The engine never generates language itself. It hands a prompt to a
//! `TextGenerator` (chat, interaction checks) or a `VisionGenerator` (photo
//! analysis) and treats the reply as an opaque string.
//!
//! Implementations: the Anthropic Messages API client, scripted test doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationFailure;
use crate::message::Message;

/// A request to the text-generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System instructions (persona, safety rules)
    pub system: String,

    /// Prior conversation turns, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Message>,

    /// The new user content (already prefixed with context, if any)
    pub user_content: String,

    /// Maximum tokens to generate; `None` uses the collaborator's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature; `None` uses the collaborator's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// A request with no history and collaborator defaults.
    pub fn new(system: impl Into<String>, user_content: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            history: Vec::new(),
            user_content: user_content.into(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Token usage information. Passed through, never inspected by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A completed text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    /// The generated reply
    pub text: String,

    /// Token usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// A request to the vision-generation collaborator.
#[derive(Clone, Serialize, Deserialize)]
pub struct VisionRequest {
    /// Raw image bytes (JPEG, PNG, GIF or WebP)
    pub image: Vec<u8>,

    /// Instructional prompt for the image
    pub prompt: String,

    /// Maximum tokens to generate; `None` uses the collaborator's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl std::fmt::Debug for VisionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionRequest")
            .field("image_bytes", &self.image.len())
            .field("prompt", &self.prompt)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// A completed vision analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionReply {
    pub text: String,
}

/// The text-generation collaborator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// A human-readable name (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Generate a reply for the given request.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<Generation, GenerationFailure>;
}

/// The vision-generation collaborator.
#[async_trait]
pub trait VisionGenerator: Send + Sync {
    /// A human-readable name (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Describe an image according to the prompt.
    async fn describe(
        &self,
        request: VisionRequest,
    ) -> std::result::Result<VisionReply, GenerationFailure>;
}
