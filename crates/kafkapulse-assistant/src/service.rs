//! Summarization and chat with fixed fallbacks.
//!
//! The public operations never fail: errors are logged once and replaced
//! by a fallback string so the dashboard always has something to show.
//! There are no retries.

use std::sync::Arc;

use kafkapulse_core::{ChatMessage, MetricRecord, MetricWindow};

use crate::generator::{GenerationRequest, TextGenerator};
use crate::prompt;
use crate::AssistantError;

pub const SUMMARY_EMPTY_FALLBACK: &str = "I was unable to analyze the data at this time.";
pub const SUMMARY_ERROR_FALLBACK: &str =
    "Failed to fetch AI analysis. Check your API configuration.";
pub const CHAT_EMPTY_FALLBACK: &str = "I'm sorry, I couldn't process that request.";
pub const CHAT_ERROR_FALLBACK: &str = "Error communicating with AI assistant.";

/// Front door to the text generator. Cheap to clone.
#[derive(Clone)]
pub struct Assistant {
    generator: Arc<dyn TextGenerator>,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Assistant { generator }
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// Raw model text for a window summary.
    pub async fn try_summarize(&self, window: &MetricWindow) -> Result<String, AssistantError> {
        let request = GenerationRequest::new(
            prompt::SUMMARY_SYSTEM_INSTRUCTION,
            prompt::summary_prompt(window),
        );
        self.generator.generate(&request).await
    }

    /// Markdown summary of `window`, or a fallback.
    pub async fn summarize(&self, window: &MetricWindow) -> String {
        match self.try_summarize(window).await {
            Ok(text) if text.is_empty() => SUMMARY_EMPTY_FALLBACK.to_string(),
            Ok(text) => text,
            Err(e) => {
                log::error!("analysis via {} failed: {e}", self.generator.name());
                SUMMARY_ERROR_FALLBACK.to_string()
            }
        }
    }

    /// Raw model text answering the last message of `history`.
    pub async fn try_chat(
        &self,
        history: &[ChatMessage],
        latest: Option<&MetricRecord>,
    ) -> Result<String, AssistantError> {
        let prompt =
            prompt::chat_prompt(history, latest).ok_or(AssistantError::EmptyHistory)?;
        let request = GenerationRequest::new(prompt::CHAT_SYSTEM_INSTRUCTION, prompt);
        self.generator.generate(&request).await
    }

    /// Reply to the last message of `history`, or a fallback.
    pub async fn chat(&self, history: &[ChatMessage], latest: Option<&MetricRecord>) -> String {
        match self.try_chat(history, latest).await {
            Ok(text) if text.is_empty() => CHAT_EMPTY_FALLBACK.to_string(),
            Ok(text) => text,
            Err(e) => {
                log::error!("chat via {} failed: {e}", self.generator.name());
                CHAT_ERROR_FALLBACK.to_string()
            }
        }
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("backend", &self.generator.name())
            .field("model", &self.generator.model())
            .finish()
    }
}
