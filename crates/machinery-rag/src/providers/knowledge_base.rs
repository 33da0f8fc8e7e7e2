//! Knowledge base provider trait for semantic search

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RetrievedChunk;

/// Trait for semantic search over a managed knowledge base
///
/// Implementations:
/// - `BedrockKnowledgeBaseClient`: Bedrock agent runtime `retrieve`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KnowledgeBaseProvider: Send + Sync {
    /// Search `knowledge_base_id` for chunks similar to `query`.
    ///
    /// Results come back in service order (score-descending), at most `limit` of them.
    async fn retrieve(
        &self,
        knowledge_base_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedChunk>>;

    /// Get provider name for logging
    fn name(&self) -> &'static str;
}
