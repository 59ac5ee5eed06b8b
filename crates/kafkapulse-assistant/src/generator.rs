use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::AssistantError;

/// A single text-generation call: one system instruction, one user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(system_instruction: impl Into<String>, prompt: impl Into<String>) -> Self {
        GenerationRequest {
            system_instruction: system_instruction.into(),
            prompt: prompt.into(),
        }
    }
}

/// Backend that turns a prompt into text.
///
/// An empty string is a valid answer; callers decide what to show for it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError>;

    /// Model identifier used for requests.
    fn model(&self) -> &str;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Generator that returns a canned answer without any I/O.
///
/// Used when running offline and in tests. It records every request it
/// receives.
pub struct StaticGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last: Mutex<Option<GenerationRequest>>,
}

impl StaticGenerator {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::with_result(Ok(text.into()))
    }

    /// Every call fails with [`AssistantError::Backend`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_result(Err(message.into()))
    }

    fn with_result(reply: Result<String, String>) -> Self {
        StaticGenerator {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());
        self.reply.clone().map_err(AssistantError::Backend)
    }

    fn model(&self) -> &str {
        "static"
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
