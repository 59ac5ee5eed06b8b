/// Errors from the AI collaborator.
///
/// None of these reach the dashboard directly: the [`crate::Assistant`]
/// logs them and substitutes a fixed fallback string.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AssistantError {
    /// No API key configured.
    #[error("no API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,

    /// A chat request carried no messages.
    #[error("chat history is empty")]
    EmptyHistory,

    /// Transport failure, including connect and request timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// The API answered 2xx with a body we could not parse.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend-specific failure.
    #[error("generator error: {0}")]
    Backend(String),
}

impl AssistantError {
    /// True when the request gave up waiting for the service.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AssistantError::Http(e) if e.is_timeout())
    }
}
