//! RAG orchestration
//!
//! Classify → retrieve → assemble → generate → cite, with early exits when the
//! classification gate rejects the question or retrieval comes back empty. Every failure
//! degrades to a defined [`ChatOutcome`]; nothing here returns an error to the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::Instrument;
use uuid::Uuid;

use crate::classification::Classifier;
use crate::config::{BackendProvider, RagConfig};
use crate::error::Result;
use crate::generation::{citation, Generator, PromptBuilder};
use crate::providers::bedrock::load_sdk_config;
use crate::providers::{
    BedrockKnowledgeBaseClient, BedrockRuntimeClient, KnowledgeBaseProvider, LlmProvider,
    OllamaLlm, SamplingParams,
};
use crate::retrieval::Retriever;
use crate::types::ChatOutcome;

/// The chat pipeline. Holds only shared, read-only service handles, so one instance can
/// serve concurrent requests.
pub struct RagPipeline {
    classifier: Classifier,
    retriever: Retriever,
    generator: Generator,
}

impl RagPipeline {
    /// Wire the pipeline from injected service handles
    pub fn new(
        classifier_llm: Arc<dyn LlmProvider>,
        knowledge_base: Arc<dyn KnowledgeBaseProvider>,
        generator_llm: Arc<dyn LlmProvider>,
        config: &RagConfig,
    ) -> Self {
        Self {
            classifier: Classifier::new(
                classifier_llm,
                SamplingParams::from(&config.classification),
            ),
            retriever: Retriever::new(
                knowledge_base,
                config.bedrock.knowledge_base_id.clone(),
                config.retrieval.max_results,
            ),
            generator: Generator::new(generator_llm, SamplingParams::from(&config.generation)),
        }
    }

    /// Build real clients for the configured backend. AWS credentials are resolved from the
    /// standard chain; the knowledge base is always served by Bedrock.
    pub async fn from_config(config: &RagConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let sdk_config = load_sdk_config(&config.bedrock, timeout).await;

        let llm: Arc<dyn LlmProvider> = match config.backend {
            BackendProvider::Bedrock => {
                tracing::info!("Using Bedrock backend ({})", config.bedrock.model_id);
                Arc::new(BedrockRuntimeClient::new(&sdk_config, &config.bedrock))
            }
            BackendProvider::Ollama => {
                tracing::info!(
                    "Using Ollama backend ({} at {})",
                    config.ollama.model,
                    config.ollama.base_url
                );
                Arc::new(OllamaLlm::new(&config.ollama, timeout)?)
            }
        };

        let knowledge_base: Arc<dyn KnowledgeBaseProvider> =
            Arc::new(BedrockKnowledgeBaseClient::new(&sdk_config, &config.bedrock));
        tracing::info!(
            "Using {} ({})",
            knowledge_base.name(),
            config.bedrock.knowledge_base_id
        );

        Ok(Self::new(Arc::clone(&llm), knowledge_base, llm, config))
    }

    /// Run one question through the pipeline
    pub async fn answer(&self, query: &str) -> ChatOutcome {
        let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
        self.run(query).instrument(span).await
    }

    /// Run one question and render the user-facing response
    pub async fn chat(&self, query: &str) -> String {
        self.answer(query).await.to_string()
    }

    /// Check the generation backend
    pub async fn health_check(&self) -> Result<bool> {
        self.generator.health_check().await
    }

    /// Generation backend description, for logging
    pub fn backend(&self) -> String {
        self.generator.describe()
    }

    async fn run(&self, query: &str) -> ChatOutcome {
        let start = Instant::now();

        tracing::info!("Validating prompt...");
        match self.classifier.classify(query).await {
            Ok(label) if label.is_machinery_relevant() => {}
            Ok(label) => {
                tracing::info!("Rejected prompt (category: {})", label);
                return ChatOutcome::Rejected {
                    category: Some(label),
                };
            }
            Err(e) => {
                tracing::warn!("Rejected prompt, classification failed: {}", e);
                return ChatOutcome::Rejected { category: None };
            }
        }

        tracing::info!("Retrieving information...");
        let chunks = match self.retriever.retrieve(query).await {
            Ok(chunks) if chunks.is_empty() => {
                tracing::info!("No chunks found in {}", self.retriever.knowledge_base_id());
                return ChatOutcome::NoInformation {
                    retrieval_failed: false,
                };
            }
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::warn!("Error querying knowledge base: {}", e);
                return ChatOutcome::NoInformation {
                    retrieval_failed: true,
                };
            }
        };

        let prompt = PromptBuilder::assemble(query, &chunks);

        tracing::info!("Generating answer...");
        let (answer, generation_failed) = match self.generator.generate(&prompt).await {
            Ok(answer) => (answer, false),
            Err(e) => {
                tracing::warn!("Error generating response: {}", e);
                (String::new(), true)
            }
        };

        let sources = citation::format_citations(&chunks);

        tracing::info!(
            "Answered in {}ms from {} chunk(s), {} source(s)",
            start.elapsed().as_millis(),
            chunks.len(),
            sources.len()
        );

        ChatOutcome::Answered {
            answer,
            sources,
            generation_failed,
        }
    }
}
