//! # kafkapulse-assistant
//!
//! AI collaborator for the kafkapulse dashboard: a one-shot analysis of the
//! current metric window and a chat that answers questions with the newest
//! record as context.
//!
//! ```no_run
//! # async fn demo(window: kafkapulse_core::MetricWindow) -> Result<(), kafkapulse_assistant::AssistantError> {
//! use std::sync::Arc;
//! use kafkapulse_assistant::{Assistant, GeminiClient};
//!
//! let assistant = Assistant::new(Arc::new(GeminiClient::from_env()?));
//! println!("{}", assistant.summarize(&window).await);
//! # Ok(())
//! # }
//! ```
//!
//! Calls go through the [`TextGenerator`] trait; [`GeminiClient`] is the
//! HTTP implementation and [`StaticGenerator`] answers offline.

pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod service;

pub use config::{AssistantConfig, DEFAULT_MODEL};
pub use error::AssistantError;
pub use gemini::GeminiClient;
pub use generator::{GenerationRequest, StaticGenerator, TextGenerator};
pub use service::{
    Assistant, CHAT_EMPTY_FALLBACK, CHAT_ERROR_FALLBACK, SUMMARY_EMPTY_FALLBACK,
    SUMMARY_ERROR_FALLBACK,
};
