//! Scripted collaborators for assistant tests.

use carecompanion_core::error::GenerationFailure;
use carecompanion_core::provider::{
    Generation, GenerationRequest, TextGenerator, Usage, VisionGenerator, VisionReply,
    VisionRequest,
};
use std::sync::Mutex;

/// Returns scripted replies in order and records every request it sees.
///
/// Panics if more calls are made than replies provided.
pub struct ScriptedGenerator {
    replies: Mutex<Vec<String>>,
    text_requests: Mutex<Vec<GenerationRequest>>,
    vision_requests: Mutex<Vec<VisionRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().rev().map(|r| r.to_string()).collect()),
            text_requests: Mutex::new(Vec::new()),
            vision_requests: Mutex::new(Vec::new()),
        }
    }

    /// A generator that must never be called.
    pub fn silent() -> Self {
        Self::new(&[])
    }

    pub fn text_requests(&self) -> Vec<GenerationRequest> {
        self.text_requests.lock().unwrap().clone()
    }

    pub fn vision_requests(&self) -> Vec<VisionRequest> {
        self.vision_requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.text_requests.lock().unwrap().len() + self.vision_requests.lock().unwrap().len()
    }

    fn next_reply(&self) -> String {
        self.replies
            .lock()
            .unwrap()
            .pop()
            .expect("ScriptedGenerator: no more replies")
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Generation, GenerationFailure> {
        self.text_requests.lock().unwrap().push(request);
        Ok(Generation {
            text: self.next_reply(),
            usage: Some(Usage {
                input_tokens: 10,
                output_tokens: 5,
            }),
        })
    }
}

#[async_trait::async_trait]
impl VisionGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn describe(&self, request: VisionRequest) -> Result<VisionReply, GenerationFailure> {
        self.vision_requests.lock().unwrap().push(request);
        Ok(VisionReply {
            text: self.next_reply(),
        })
    }
}

/// Fails every call with the same failure.
pub struct FailingGenerator(pub GenerationFailure);

#[async_trait::async_trait]
impl TextGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<Generation, GenerationFailure> {
        Err(self.0.clone())
    }
}

#[async_trait::async_trait]
impl VisionGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn describe(&self, _request: VisionRequest) -> Result<VisionReply, GenerationFailure> {
        Err(self.0.clone())
    }
}
