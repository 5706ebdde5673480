use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::TranslateConfig;
use crate::error::{Result, RirekishoError};
use super::{GenerationRequest, TextGenerator};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
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

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

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

/// Google Gemini generateContent backend
pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(config: &TranslateConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint().to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn model_url(&self) -> String {
        format!("{}/v1beta/models/{}", self.endpoint, self.model)
    }

    /// The key travels in the `x-goog-api-key` header, never in the URL
    fn generate_url(&self) -> String {
        format!("{}:generateContent", self.model_url())
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: &request.system_instruction }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &request.content }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        };

        let url = self.generate_url();
        debug!("Sending generation request to: {}", url);

        let response = self.client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RirekishoError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RirekishoError::Translation(format!(
                "Gemini API error {}: {}", status, error_text
            )));
        }

        let body = response.text().await
            .map_err(|e| RirekishoError::Translation(format!("Failed to read response: {}", e)))?;
        extract_text(&body)
    }

    async fn check_availability(&self) -> Result<()> {
        let response = self.client
            .get(self.model_url())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| RirekishoError::Translation(format!("Failed to connect to Gemini: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RirekishoError::Translation(format!(
                "Gemini model '{}' is not available ({})",
                self.model,
                response.status()
            )))
        }
    }
}

/// Concatenate the text parts of the first candidate.
/// A response without candidates (e.g. blocked content) yields an empty string.
fn extract_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| RirekishoError::Translation(format!("Failed to parse response: {}", e)))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "・チーム" }, { "text": "を5名管理" }] },
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(extract_text(body).unwrap(), "・チームを5名管理");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let body = r#"{ "promptFeedback": { "blockReason": "SAFETY" } }"#;
        assert_eq!(extract_text(body).unwrap(), "");
    }

    #[test]
    fn test_extract_text_rejects_malformed_body() {
        assert!(matches!(
            extract_text("<html>quota exceeded</html>"),
            Err(RirekishoError::Translation(_))
        ));
    }

    #[test]
    fn test_api_key_stays_out_of_url() {
        let mut config = crate::config::Config::default().translate;
        config.endpoint = "https://generativelanguage.googleapis.com/".to_string();
        config.model = "gemini-2.5-flash".to_string();
        let generator = GeminiGenerator::new(&config, "secret-key".to_string()).unwrap();

        let url = generator.generate_url();
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!url.contains("secret-key"));
        assert_eq!(API_KEY_HEADER, "x-goog-api-key");
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            system_instruction: Content { role: None, parts: vec![Part { text: "sys" }] },
            contents: vec![Content { role: Some("user"), parts: vec![Part { text: "hello" }] }],
            generation_config: GenerationConfig { temperature: 0.1 },
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "sys");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }
}
