//! LLM provider trait for text generation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{ClassificationConfig, GenerationConfig};
use crate::error::Result;

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// One role-tagged message block
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

/// Sampling parameters sent with every completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl From<&ClassificationConfig> for SamplingParams {
    fn from(config: &ClassificationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        }
    }
}

impl From<&GenerationConfig> for SamplingParams {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        }
    }
}

/// A single non-streaming completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub params: SamplingParams,
}

impl CompletionRequest {
    /// Request with a single user message
    pub fn user(prompt: impl Into<String>, params: SamplingParams) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            params,
        }
    }
}

/// Trait for remote text generation
///
/// Implementations:
/// - `BedrockRuntimeClient`: AWS Bedrock invoke_model (Claude messages format)
/// - `OllamaLlm`: Local Ollama server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion and return the generated text
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &'static str;

    /// Get the model being used
    fn model(&self) -> String;
}
