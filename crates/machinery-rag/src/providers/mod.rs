//! Provider abstractions for text generation and knowledge base retrieval
//!
//! The pipeline only sees these traits, so the Bedrock clients, the local Ollama client
//! and test doubles are interchangeable.

pub mod bedrock;
pub mod knowledge_base;
pub mod llm;
pub mod ollama;

pub use bedrock::{BedrockKnowledgeBaseClient, BedrockRuntimeClient};
pub use knowledge_base::KnowledgeBaseProvider;
pub use llm::{CompletionRequest, LlmProvider, Message, Role, SamplingParams};
pub use ollama::OllamaLlm;
