use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;
use crate::generator::{GenerationRequest, TextGenerator};
use crate::AssistantError;

/// Client for the Generative Language `generateContent` REST call.
pub struct GeminiClient {
    config: AssistantConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated. Empty when the model
    /// returned no text.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn request_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: &request.system_instruction,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part {
                text: &request.prompt,
            }],
        }],
    }
}

impl GeminiClient {
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(GeminiClient { config, client })
    }

    /// Client configured from the environment.
    pub fn from_env() -> Result<Self, AssistantError> {
        Self::new(AssistantConfig::from_env())
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AssistantError::MissingApiKey)?;

        log::debug!("POST {} ({} prompt bytes)", self.url(), request.prompt.len());

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request_body(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(parsed.text())
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
