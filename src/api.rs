use crate::{
    config::Config,
    constants::GEMINI_API_VERSION,
    errors::{FolioError, FolioResult},
    logging::log_api_call,
    models::ApiCallLog,
};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// The external text-generation endpoint: prompt in, text out.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> FolioResult<String>;
}

/// `generateContent` client for the Google Generative Language API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(config: &Config) -> FolioResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, GEMINI_API_VERSION, self.model
        )
    }

    fn payload(&self, prompt: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens
            }
        })
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> FolioResult<String> {
        let endpoint = self.endpoint();
        let start_time = Instant::now();

        let sent = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.payload(prompt))
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                record_call(&endpoint, 0, start_time);
                return Err(FolioError::api_error(format!("Request failed: {}", e)));
            }
        };

        let status = response.status();
        record_call(&endpoint, status.as_u16(), start_time);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FolioError::api_error(format!(
                "API returned error: {} - {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            FolioError::response_error(format!("Failed to parse API response: {}", e))
        })?;
        debug!("Gemini response: {}", body);

        extract_text(&body)
    }
}

fn record_call(endpoint: &str, status: u16, start_time: Instant) {
    log_api_call(&ApiCallLog {
        timestamp: Utc::now(),
        endpoint: endpoint.to_string(),
        request_summary: "generateContent".to_string(),
        response_status: status,
        response_time_ms: start_time.elapsed().as_millis(),
    });
}

/// Pulls the answer out of a `generateContent` body, joining all text parts
/// of the first candidate.
pub fn extract_text(body: &Value) -> FolioResult<String> {
    if let Some(error) = body["error"].as_object() {
        return Err(FolioError::api_error(format!(
            "{}: {}",
            error
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or("unknown"),
            error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message")
        )));
    }

    let parts = body["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| FolioError::response_error("Response missing expected content"))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.trim().is_empty() {
        return Err(FolioError::response_error("Response contained no text"));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn test_config(base_url: String) -> Config {
        Config {
            api_key: "test-api-key".to_string(),
            base_url,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "text": "hello?" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "**React** is " }, { "text": "great" }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new(&test_config(mock_server.uri())).unwrap();
        let text = client.generate("hello?").await.unwrap();
        assert_eq!(text, "**React** is great");
    }

    #[tokio::test]
    async fn test_generate_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new(&test_config(mock_server.uri())).unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, FolioError::Api(ref msg) if msg.contains("429")));
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new(&test_config(mock_server.uri())).unwrap();
        assert!(matches!(
            client.generate("hi").await,
            Err(FolioError::Response(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_unreachable_host() {
        let client = GeminiClient::new(&test_config("http://127.0.0.1:9".to_string())).unwrap();
        assert!(matches!(client.generate("hi").await, Err(FolioError::Api(_))));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(&test_config("http://localhost:8080/".to_string())).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_extract_text_reports_api_error() {
        let body = json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        });
        let err = extract_text(&body).unwrap_err();
        assert_eq!(err.to_string(), "API error: PERMISSION_DENIED: API key not valid");
    }

    #[test]
    fn test_extract_text_rejects_empty_candidates() {
        assert!(extract_text(&json!({ "candidates": [] })).is_err());
        assert!(extract_text(&json!({
            "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
        }))
        .is_err());
    }
}
