//! Anthropic native provider implementation.
//!
//! Uses Anthropic's Messages API directly for both text and vision.
//!
//! Features:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System prompt as top-level field
//! - Images sent inline as base64 content blocks, media type sniffed from
//!   the leading bytes

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use carecompanion_core::error::GenerationFailure;
use carecompanion_core::message::Message;
use carecompanion_core::provider::{
    Generation, GenerationRequest, TextGenerator, Usage, VisionGenerator, VisionReply,
    VisionRequest,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Anthropic native Messages API provider.
pub struct AnthropicProvider {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider for `model`.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GenerationFailure> {
        Self::with_timeout(api_key, model, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a provider whose requests give up after `timeout_secs`.
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, GenerationFailure> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerationFailure::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: "anthropic".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_api_messages(history: &[Message], user_content: &str) -> Vec<AnthropicMessage> {
        history
            .iter()
            .map(|m| AnthropicMessage {
                role: m.role.to_string(),
                content: AnthropicContent::Text(m.content.clone()),
            })
            .chain(std::iter::once(AnthropicMessage {
                role: "user".into(),
                content: AnthropicContent::Text(user_content.to_string()),
            }))
            .collect()
    }

    fn text_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": Self::to_api_messages(&request.history, &request.user_content),
            "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });

        if !request.system.is_empty() {
            body["system"] = serde_json::json!(request.system);
        }

        if let Some(temperature) = request.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        body
    }

    fn vision_body(&self, request: &VisionRequest) -> serde_json::Value {
        let message = AnthropicMessage {
            role: "user".into(),
            content: AnthropicContent::Blocks(vec![
                ContentBlock::Image {
                    source: ImageSource {
                        kind: "base64".into(),
                        media_type: sniff_media_type(&request.image).into(),
                        data: BASE64.encode(&request.image),
                    },
                },
                ContentBlock::Text {
                    text: request.prompt.clone(),
                },
            ]),
        };

        serde_json::json!({
            "model": self.model,
            "messages": [message],
            "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }

    /// POST a Messages API body and decode the reply.
    async fn send(&self, body: &serde_json::Value) -> Result<AnthropicResponse, GenerationFailure> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            warn!(status, retry_after_secs, "Anthropic rate limit");
            return Err(GenerationFailure::RateLimited { retry_after_secs });
        }
        if status == 401 || status == 403 {
            warn!(status, "Anthropic rejected the API key");
            return Err(GenerationFailure::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic API error");
            return Err(GenerationFailure::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GenerationFailure::ApiError {
                status_code: 200,
                message: format!("Failed to parse Anthropic response: {e}"),
            })
    }
}

#[async_trait]
impl TextGenerator for AnthropicProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Generation, GenerationFailure> {
        let body = self.text_body(&request);

        debug!(
            provider = "anthropic",
            model = %self.model,
            history = request.history.len(),
            system_chars = request.system.len(),
            content_chars = request.user_content.len(),
            "Sending text request"
        );

        let response = self.send(&body).await?;
        response_to_generation(response)
    }
}

#[async_trait]
impl VisionGenerator for AnthropicProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn describe(&self, request: VisionRequest) -> Result<VisionReply, GenerationFailure> {
        let body = self.vision_body(&request);

        debug!(
            provider = "anthropic",
            model = %self.model,
            image_bytes = request.image.len(),
            prompt_chars = request.prompt.len(),
            "Sending vision request"
        );

        let response = self.send(&body).await?;
        response_to_generation(response).map(|generation| VisionReply {
            text: generation.text,
        })
    }
}

fn transport_failure(e: reqwest::Error) -> GenerationFailure {
    if e.is_timeout() {
        GenerationFailure::Timeout(e.to_string())
    } else {
        GenerationFailure::Network(e.to_string())
    }
}

/// Convert an Anthropic API response into a generation.
///
/// Text blocks are joined with newlines; a reply without any is a failure.
fn response_to_generation(resp: AnthropicResponse) -> Result<Generation, GenerationFailure> {
    let text = resp
        .content
        .iter()
        .filter_map(|block| match block {
            ResponseContentBlock::Text { text } => Some(text.as_str()),
            ResponseContentBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        return Err(GenerationFailure::EmptyResponse);
    }

    Ok(Generation {
        text,
        usage: resp.usage.map(|u| Usage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        }),
    })
}

/// Media type from the image's magic bytes. Unrecognized input is sent as JPEG.
pub fn sniff_media_type(image: &[u8]) -> &'static str {
    match image {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/jpeg",
    }
}

// --- Anthropic API types ---

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: AnthropicContent,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum AnthropicContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image")]
    Image { source: ImageSource },
}

#[derive(Debug, Serialize, Deserialize)]
struct ImageSource {
    #[serde(rename = "type")]
    kind: String,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ResponseContentBlock>,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}
