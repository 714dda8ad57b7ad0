//! Gemini HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). One
//! `generateContent` call per comparison, with structured JSON output and
//! optional Google Search grounding.

use std::time::Duration;

use chrono::Local;
use serde::{Deserialize, Serialize};

use pressroom_config::{AIConfigStatus, ResolvedAIConfig};
use pressroom_config::settings::AIProvider;
use pressroom_core::{format_dateline, GenerateError, Generated, Generator, GroundingSource};

use crate::parse::parse_comparison;
use crate::prompt::{build_prompt, response_schema};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// Gemini API types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Deserialize)]
struct WebSource {
    title: Option<String>,
    uri: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: String,
    #[allow(dead_code)]
    status: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Gemini generation client (blocking).
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
    grounding: bool,
}

impl GeminiClient {
    /// Build a client from resolved configuration. Fails when generation
    /// is disabled or no key was found.
    pub fn from_config(config: &ResolvedAIConfig) -> Result<Self, GenerateError> {
        match (config.provider, config.status) {
            (AIProvider::None, _) | (_, AIConfigStatus::Disabled) => {
                return Err(GenerateError::NotConfigured("generation is disabled".to_string()));
            }
            (_, AIConfigStatus::MissingKey) => return Err(GenerateError::MissingKey),
            (AIProvider::Gemini, AIConfigStatus::Ready) => {}
        }
        let api_key = config.api_key.clone().ok_or(GenerateError::MissingKey)?;

        let http = build_http(config.timeout)?;
        Ok(Self {
            http,
            base_url: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            grounding: config.grounding,
        })
    }

    /// Client against an explicit base URL with default model and timeout.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, GenerateError> {
        Ok(Self {
            http: build_http(DEFAULT_TIMEOUT)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: AIProvider::Gemini.default_model().to_string(),
            grounding: true,
        })
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn grounding(mut self, enabled: bool) -> Self {
        self.grounding = enabled;
        self
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(&self, product_a: &str, product_b: &str) -> GenerateContentRequest {
        let today = format_dateline(Local::now().date_naive());
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: build_prompt(product_a, product_b, &today),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
            tools: if self.grounding {
                vec![Tool { google_search: GoogleSearch {} }]
            } else {
                Vec::new()
            },
        }
    }
}

impl Generator for GeminiClient {
    fn generate(&self, product_a: &str, product_b: &str) -> Result<Generated, GenerateError> {
        log::debug!("POST {} (grounding: {})", self.url(), self.grounding);

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(product_a, product_b))
            .send()
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<GeminiError>(&body) {
                Ok(error) => error.error.message,
                Err(_) => body,
            };
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        read_response(&body)
    }
}

fn build_http(timeout: Duration) -> Result<reqwest::blocking::Client, GenerateError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GenerateError::Network(e.to_string()))
}

/// Pull the article text and grounding citations out of a successful
/// `generateContent` body.
fn read_response(body: &str) -> Result<Generated, GenerateError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| GenerateError::Parse(e.to_string()))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GenerateError::EmptyResponse);
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let data = parse_comparison(&text)?;

    let sources = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            let uri = web.uri.filter(|u| !u.is_empty())?;
            Some(GroundingSource {
                title: web.title.unwrap_or_default(),
                uri,
            })
        })
        .collect();

    Ok(Generated { data, sources })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressroom_config::settings::AISettings;
    use pressroom_config::{KeyLookup, KeySource};

    #[test]
    fn test_read_response_joins_parts_and_sources() {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "{\"title\":\"T\",\"subtitle\":\"S\",\"date\":\"D\",\"category\":\"C\",\"summary\":\"Sum\"," },
                    { "text": "\"productA\":{\"name\":\"A\",\"pros\":[],\"cons\":[],\"priceRange\":\"$\",\"affiliateUrl\":\"#\",\"rating\":4}," },
                    { "text": "\"productB\":{\"name\":\"B\",\"pros\":[],\"cons\":[],\"priceRange\":\"$\",\"affiliateUrl\":\"#\",\"rating\":3},\"verdict\":\"V\",\"author\":\"Au\"}" }
                ]},
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "title": "Review site", "uri": "https://review.example" } },
                    { "retrievedContext": {} },
                    { "web": { "title": "No link" } }
                ]}
            }]
        });
        let generated = read_response(&body.to_string()).unwrap();
        assert_eq!(generated.data.product_b.name, "B");
        assert_eq!(
            generated.sources,
            vec![GroundingSource { title: "Review site".into(), uri: "https://review.example".into() }]
        );
    }

    #[test]
    fn test_read_response_no_candidates() {
        assert_eq!(read_response(r#"{"candidates": []}"#).unwrap_err(), GenerateError::EmptyResponse);
        assert_eq!(read_response("{}").unwrap_err(), GenerateError::EmptyResponse);
    }

    #[test]
    fn test_request_body_shape() {
        let client = GeminiClient::with_base_url("k".into(), "http://localhost".into()).unwrap();
        let body = serde_json::to_value(client.request_body("A", "B")).unwrap();
        assert!(body["contents"][0]["parts"][0]["text"].as_str().unwrap().contains("between A and B"));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(body["tools"], serde_json::json!([{ "googleSearch": {} }]));

        let ungrounded = serde_json::to_value(client.grounding(false).request_body("A", "B")).unwrap();
        assert!(ungrounded.get("tools").is_none());
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = ResolvedAIConfig::with_key(&AISettings::default(), KeyLookup { key: None, source: KeySource::None });
        assert_eq!(GeminiClient::from_config(&config).err(), Some(GenerateError::MissingKey));

        let disabled = AISettings { provider: AIProvider::None, ..AISettings::default() };
        let config = ResolvedAIConfig::with_key(&disabled, KeyLookup { key: None, source: KeySource::None });
        assert!(matches!(GeminiClient::from_config(&config), Err(GenerateError::NotConfigured(_))));
    }

    #[test]
    fn test_from_config_uses_settings() {
        let settings = AISettings {
            model: "gemini-2.5-pro".into(),
            endpoint: Some("http://localhost:8080/".into()),
            ..AISettings::default()
        };
        let lookup = KeyLookup { key: Some("k".into()), source: KeySource::Environment };
        let client = GeminiClient::from_config(&ResolvedAIConfig::with_key(&settings, lookup)).unwrap();
        assert_eq!(client.url(), "http://localhost:8080/v1beta/models/gemini-2.5-pro:generateContent");
    }
}
