//! Inference client for a hosted text-generation endpoint
//!
//! One outbound call per prompt: POST `{ "inputs": <prompt> }` with bearer
//! authorization, expecting a JSON array whose first element carries a
//! `generated_text` field. Every failure path terminates in a fixed
//! user-visible fallback string; no error escapes [`InferenceClient::generate`].

use crate::{HablaError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed reply returned on any transport or parsing failure.
pub const FALLBACK_REPLY: &str = "Ocurrió un error. Inténtalo de nuevo.";

/// Reply used when the endpoint answers without a generated text.
pub const EMPTY_REPLY: &str = "No se recibió respuesta válida";

/// Environment variable holding the endpoint credential.
pub const API_TOKEN_ENV: &str = "HABLA_API_TOKEN";

const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/deepseek-ai/DeepSeek-R1-Distill-Qwen-32B";

/// Configuration for the inference boundary
#[derive(Clone, Debug)]
pub struct InferenceConfig {
    /// Endpoint URL for the text-generation service
    pub endpoint: String,

    /// Bearer token; absent means unauthenticated requests
    pub api_token: Option<String>,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: std::env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty()),
            timeout: Duration::from_secs(30),
        }
    }
}

impl InferenceConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(HablaError::ConfigError(
                "inference endpoint is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct InferenceChoice {
    generated_text: Option<String>,
}

/// Thin client over the hosted inference endpoint.
pub struct InferenceClient {
    config: InferenceConfig,
    client: reqwest::Client,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    /// Generate a reply for the prompt. Transport and parsing failures are
    /// caught here and reported as [`FALLBACK_REPLY`].
    pub async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Inference request failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn try_generate(&self, prompt: &str) -> Result<String> {
        debug!("Sending inference request to {}", self.config.endpoint);

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&InferenceRequest { inputs: prompt });

        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HablaError::InferenceError(e.to_string()))?;

        let choices: Vec<InferenceChoice> = response
            .json()
            .await
            .map_err(|e| HablaError::InferenceError(e.to_string()))?;

        Ok(choices
            .into_iter()
            .next()
            .and_then(|c| c.generated_text)
            .unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unroutable_config() -> InferenceConfig {
        InferenceConfig::default()
            .with_endpoint("http://127.0.0.1:9/models/none")
            .with_timeout(Duration::from_millis(500))
    }

    #[test]
    fn test_request_and_response_wire_format() {
        let body = serde_json::to_value(InferenceRequest {
            inputs: "hola asistente",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "inputs": "hola asistente" }));

        let choices: Vec<InferenceChoice> =
            serde_json::from_str(r#"[{ "generated_text": "buenas" }]"#).unwrap();
        assert_eq!(choices[0].generated_text.as_deref(), Some("buenas"));

        // An array element without the field deserializes rather than erroring
        let choices: Vec<InferenceChoice> = serde_json::from_str(r#"[{}]"#).unwrap();
        assert!(choices[0].generated_text.is_none());
    }

    #[test]
    fn test_config_builder_and_validation() {
        let config = InferenceConfig::default()
            .with_endpoint("https://example.test/generate")
            .with_api_token("secret")
            .with_timeout(Duration::from_secs(5));
        assert!(config.validate().is_ok());
        assert_eq!(config.api_token.as_deref(), Some("secret"));

        let empty = InferenceConfig::default().with_endpoint("");
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_transport_failure_returns_fallback() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = InferenceClient::new(unroutable_config());

        let reply = runtime.block_on(client.generate("hola asistente"));
        assert_eq!(reply, FALLBACK_REPLY);
    }
}
