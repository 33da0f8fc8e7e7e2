//! Knowledge base retrieval

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::knowledge_base::KnowledgeBaseProvider;
use crate::types::RetrievedChunk;

/// Retrieves chunks for a question from one knowledge base
pub struct Retriever {
    knowledge_base: Arc<dyn KnowledgeBaseProvider>,
    knowledge_base_id: String,
    limit: usize,
}

impl Retriever {
    pub fn new(
        knowledge_base: Arc<dyn KnowledgeBaseProvider>,
        knowledge_base_id: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self {
            knowledge_base,
            knowledge_base_id: knowledge_base_id.into(),
            limit,
        }
    }

    /// One search request, results in service order.
    ///
    /// Remote failures come back as `Error::Retrieval` so callers can tell them apart from
    /// an empty result.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedChunk>> {
        let mut chunks = self
            .knowledge_base
            .retrieve(&self.knowledge_base_id, query, self.limit)
            .await
            .map_err(|e| Error::retrieval(e.to_string()))?;

        chunks.truncate(self.limit);
        tracing::debug!(
            "Retrieved {} chunk(s) from knowledge base {}",
            chunks.len(),
            self.knowledge_base_id
        );
        Ok(chunks)
    }

    pub fn knowledge_base_id(&self) -> &str {
        &self.knowledge_base_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::knowledge_base::MockKnowledgeBaseProvider;

    #[tokio::test]
    async fn test_retrieve_scoped_to_knowledge_base() {
        let mut kb = MockKnowledgeBaseProvider::new();
        kb.expect_retrieve()
            .withf(|kb_id, query, limit| kb_id == "KB-MACHINERY" && query == "boom lift capacity" && *limit == 3)
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    RetrievedChunk::new("second").with_score(0.4),
                    RetrievedChunk::new("first").with_score(0.9),
                ])
            });

        let retriever = Retriever::new(Arc::new(kb), "KB-MACHINERY", 3);
        let chunks = retriever.retrieve("boom lift capacity").await.unwrap();

        // service order is kept, no re-sort by score
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_retrieve_truncates_over_returned_results() {
        let mut kb = MockKnowledgeBaseProvider::new();
        kb.expect_retrieve().returning(|_, _, _| {
            Ok((0..5).map(|i| RetrievedChunk::new(format!("chunk {}", i))).collect())
        });

        let retriever = Retriever::new(Arc::new(kb), "KB", 3);
        assert_eq!(retriever.retrieve("q").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_retrieve_failure_is_tagged() {
        let mut kb = MockKnowledgeBaseProvider::new();
        kb.expect_retrieve()
            .returning(|_, _, _| Err(Error::knowledge_base("AccessDenied")));

        let retriever = Retriever::new(Arc::new(kb), "KB", 3);
        let result = retriever.retrieve("q").await;
        assert!(matches!(result, Err(Error::Retrieval(msg)) if msg.contains("AccessDenied")));
    }
}
