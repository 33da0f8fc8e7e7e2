//! Bedrock runtime client (Anthropic messages format)

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};

use crate::config::BedrockConfig;
use crate::error::{Error, Result};
use crate::providers::llm::{CompletionRequest, LlmProvider, Role};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Bedrock `invoke_model` client
pub struct BedrockRuntimeClient {
    client: Client,
    model_id: String,
    credentials: Option<SharedCredentialsProvider>,
}

impl BedrockRuntimeClient {
    /// Create a new runtime client
    ///
    /// # Arguments
    /// * `sdk_config` - Shared AWS config (region, credentials, timeouts)
    /// * `config` - Bedrock section of the pipeline config
    pub fn new(sdk_config: &SdkConfig, config: &BedrockConfig) -> Self {
        let mut builder = aws_sdk_bedrockruntime::config::Builder::from(sdk_config);
        if let Some(endpoint) = &config.runtime_endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            model_id: config.model_id.clone(),
            credentials: sdk_config.credentials_provider(),
        }
    }
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    anthropic_version: &'static str,
    messages: Vec<InvokeMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct InvokeMessage<'a> {
    role: Role,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Serialize)]
struct ContentBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl<'a> InvokeRequest<'a> {
    fn from_completion(request: &'a CompletionRequest) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION,
            messages: request
                .messages
                .iter()
                .map(|m| InvokeMessage {
                    role: m.role,
                    content: vec![ContentBlock {
                        kind: "text",
                        text: &m.text,
                    }],
                })
                .collect(),
            max_tokens: request.params.max_tokens,
            temperature: request.params.temperature,
            top_p: request.params.top_p,
        }
    }
}

/// Join the text blocks of a response. No text blocks at all is an error; an empty text
/// block is a legitimately empty answer.
fn extract_text(response: InvokeResponse) -> Result<String> {
    let texts: Vec<String> = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ResponseBlock::Text { text } => Some(text),
            ResponseBlock::Other => None,
        })
        .collect();

    if texts.is_empty() {
        return Err(Error::llm("No text content in Bedrock response"));
    }
    Ok(texts.join("\n"))
}

#[async_trait]
impl LlmProvider for BedrockRuntimeClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = serde_json::to_vec(&InvokeRequest::from_completion(request))
            .map_err(|e| Error::llm(format!("Failed to encode Bedrock request: {}", e)))?;

        tracing::debug!("Bedrock invoke_model with model: {}", self.model_id);

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                Error::llm(format!(
                    "Bedrock invoke_model failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let parsed: InvokeResponse = serde_json::from_slice(output.body().as_ref())
            .map_err(|e| Error::llm(format!("Failed to parse Bedrock response: {}", e)))?;

        extract_text(parsed)
    }

    async fn health_check(&self) -> Result<bool> {
        let Some(credentials) = &self.credentials else {
            tracing::warn!("No AWS credentials provider configured");
            return Ok(false);
        };

        match credentials.provide_credentials().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("AWS credentials could not be resolved: {}", e);
                Ok(false)
            }
        }
    }

    fn name(&self) -> &'static str {
        "bedrock"
    }

    fn model(&self) -> String {
        self.model_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::bedrock::test_support::{sdk_config, serve_once};
    use crate::providers::llm::SamplingParams;
    use serde_json::json;

    #[test]
    fn test_request_body() {
        let request = CompletionRequest::user(
            "Classify this",
            SamplingParams {
                temperature: 0.0,
                top_p: 0.1,
                max_tokens: 10,
            },
        );
        let body = serde_json::to_value(InvokeRequest::from_completion(&request)).unwrap();

        assert_eq!(body["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(
            body["messages"],
            json!([{
                "role": "user",
                "content": [{ "type": "text", "text": "Classify this" }]
            }])
        );
        assert_eq!(body["max_tokens"], 10);
        assert_eq!(body["temperature"].as_f64(), Some(0.0));
        assert!((body["top_p"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text() {
        let response: InvokeResponse = serde_json::from_value(json!({
            "id": "msg_01",
            "content": [
                { "type": "text", "text": "Category E" },
                { "type": "tool_use", "id": "x", "name": "y", "input": {} }
            ],
            "stop_reason": "end_turn"
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Category E");
    }

    #[test]
    fn test_extract_text_empty_content() {
        let response: InvokeResponse = serde_json::from_value(json!({ "content": [] })).unwrap();
        assert!(matches!(extract_text(response), Err(Error::Llm(_))));

        let response: InvokeResponse =
            serde_json::from_value(json!({ "content": [{ "type": "text", "text": "" }] }))
                .unwrap();
        assert_eq!(extract_text(response).unwrap(), "");
    }

    #[tokio::test]
    async fn test_invoke_is_signed() {
        let (endpoint, server) = serve_once(
            r#"{"content":[{"type":"text","text":"Category E"}],"stop_reason":"end_turn"}"#,
        )
        .await;
        let config = BedrockConfig {
            runtime_endpoint: Some(endpoint),
            ..BedrockConfig::default()
        };
        let client = BedrockRuntimeClient::new(&sdk_config(true), &config);

        let request = CompletionRequest::user(
            "Classify this",
            SamplingParams {
                temperature: 0.0,
                top_p: 0.1,
                max_tokens: 10,
            },
        );
        assert_eq!(client.complete(&request).await.unwrap(), "Category E");

        let raw = server.await.unwrap().to_lowercase();
        assert!(raw.starts_with("post /model/anthropic.claude-3-sonnet-20240229-v1"));
        assert!(raw.contains("/invoke "));
        assert!(raw.contains("authorization: aws4-hmac-sha256 credential=akidexample/"));
        assert!(raw.contains("x-amz-date:"));
        assert!(raw.contains("\"anthropic_version\":\"bedrock-2023-05-31\""));
    }

    #[tokio::test]
    async fn test_health_check_without_credentials() {
        let client = BedrockRuntimeClient::new(&sdk_config(false), &BedrockConfig::default());
        assert!(!client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check_with_credentials() {
        let client = BedrockRuntimeClient::new(&sdk_config(true), &BedrockConfig::default());
        assert!(client.health_check().await.unwrap());
        assert_eq!(client.name(), "bedrock");
        assert_eq!(client.model(), "anthropic.claude-3-sonnet-20240229-v1:0");
    }
}
