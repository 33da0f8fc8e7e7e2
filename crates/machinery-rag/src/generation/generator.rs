//! Answer generation

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::llm::{CompletionRequest, LlmProvider, SamplingParams};

/// Sends an assembled prompt to the LLM. One call, no retry, no streaming.
pub struct Generator {
    llm: Arc<dyn LlmProvider>,
    params: SamplingParams,
}

impl Generator {
    pub fn new(llm: Arc<dyn LlmProvider>, params: SamplingParams) -> Self {
        Self { llm, params }
    }

    /// Generate an answer. Remote failures are `Error::Generation`; an empty string from the
    /// model is returned as-is.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest::user(prompt, self.params);

        self.llm
            .complete(&request)
            .await
            .map_err(|e| Error::generation(e.to_string()))
    }

    /// Check if the backing provider is reachable
    pub async fn health_check(&self) -> Result<bool> {
        self.llm.health_check().await
    }

    /// Provider and model, for logging
    pub fn describe(&self) -> String {
        format!("{} ({})", self.llm.name(), self.llm.model())
    }
}
