//! Client for the generative text API (`generateContent` REST shape).
//!
//! Callers decide what a failure degrades to; this module only reports it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Per-call generation settings.
#[derive(Debug, Clone)]
pub struct GenerationOptions<'a> {
    pub system_instruction: &'a str,
    pub temperature: f32,
    /// JSON schema the reply must follow. Plain text when absent.
    pub response_schema: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    system_instruction: RequestContent<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TextGateway {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl TextGateway {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one prompt and return the reply text.
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions<'_>,
    ) -> Result<String, AppError> {
        let Some(api_key) = &self.api_key else {
            return Err(AppError::Gateway(
                "Generative text API key is not configured".to_string(),
            ));
        };

        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
            system_instruction: RequestContent {
                parts: [RequestPart {
                    text: options.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                temperature: options.temperature,
                response_mime_type: options
                    .response_schema
                    .as_ref()
                    .map(|_| "application/json"),
                response_schema: options.response_schema.clone(),
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Gateway(format!(
                "Generative text request failed with status {}",
                status
            )));
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: "hello" }],
            }],
            system_instruction: RequestContent {
                parts: [RequestPart { text: "be brief" }],
            },
            generation_config: GenerationConfig {
                temperature: 0.5,
                response_mime_type: None,
                response_schema: None,
            },
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
        assert!(json["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let parsed: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "a"}, {"text": "b"}]}}]
        }))
        .unwrap();
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        assert_eq!(text, "ab");
    }

    #[tokio::test]
    async fn test_missing_key_is_an_error() {
        let gateway = TextGateway::new("http://127.0.0.1:9", "m", None).unwrap();
        assert!(!gateway.is_configured());
        let opts = GenerationOptions {
            system_instruction: "",
            temperature: 0.1,
            response_schema: None,
        };
        assert!(gateway.generate("x", &opts).await.is_err());
    }
}
