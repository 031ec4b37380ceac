use crate::error::GenerationError;
use crate::prompt::{compose_prompt, instruction, response_schema};
use crate::SiteGenerator;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitecraft_core::{GeneratedSite, ProviderConfig};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Header carrying the credential on every request
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    temperature: f32,
    language: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

/// Gemini API response wrapper
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

impl GeminiClient {
    /// Create a new client. Fails before any network access when no API key is set.
    pub fn new(config: &ProviderConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key()
            .map_err(|_| GenerationError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(api_key)
                .map_err(|e| GenerationError::Config(format!("invalid API key: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            endpoint,
            temperature: config.temperature,
            language: config.language.clone(),
        })
    }

    /// Generate a site from an idea and a project type
    pub async fn generate(
        &self,
        idea: &str,
        project_type: &str,
    ) -> Result<GeneratedSite, GenerationError> {
        self.generate_site(&compose_prompt(project_type, idea)).await
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SiteGenerator for GeminiClient {
    async fn generate_site(&self, prompt: &str) -> Result<GeneratedSite, GenerationError> {
        let text = instruction(prompt, &self.language);
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &text }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                temperature: self.temperature,
            },
        };

        info!(endpoint = %self.endpoint, "requesting site generation");
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), %message, "model provider rejected request");
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body)?;
        let site_json = envelope.text().ok_or(GenerationError::EmptyResponse)?;

        let site: GeneratedSite = serde_json::from_str(&site_json)?;
        site.validate().map_err(|_| GenerationError::NoPages)?;

        debug!(site = %site.site_name, pages = site.pages.len(), "site generated");
        Ok(site)
    }
}
