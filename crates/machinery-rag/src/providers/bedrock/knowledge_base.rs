//! Bedrock Knowledge Base retrieval client

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration, KnowledgeBaseRetrievalResult,
    KnowledgeBaseVectorSearchConfiguration, RetrievalResultLocation,
};
use aws_sdk_bedrockagentruntime::Client;

use crate::config::BedrockConfig;
use crate::error::{Error, Result};
use crate::providers::knowledge_base::KnowledgeBaseProvider;
use crate::types::RetrievedChunk;

/// Bedrock agent runtime `retrieve` client
pub struct BedrockKnowledgeBaseClient {
    client: Client,
}

impl BedrockKnowledgeBaseClient {
    /// Create a new knowledge base client
    pub fn new(sdk_config: &SdkConfig, config: &BedrockConfig) -> Self {
        let mut builder = aws_sdk_bedrockagentruntime::config::Builder::from(sdk_config);
        if let Some(endpoint) = &config.agent_runtime_endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

/// S3 URI, falling back to the web URL for crawled sources
fn locator(location: &RetrievalResultLocation) -> Option<String> {
    location
        .s3_location
        .as_ref()
        .and_then(|s3| s3.uri.clone())
        .or_else(|| location.web_location.as_ref().and_then(|web| web.url.clone()))
}

fn into_chunk(result: &KnowledgeBaseRetrievalResult) -> RetrievedChunk {
    let text = result
        .content
        .as_ref()
        .and_then(|content| Option::<String>::from(content.text.clone()))
        .unwrap_or_default();

    RetrievedChunk {
        text,
        location: result.location.as_ref().and_then(locator),
        score: result.score.map(|score| score as f32),
    }
}

#[async_trait]
impl KnowledgeBaseProvider for BedrockKnowledgeBaseClient {
    async fn retrieve(
        &self,
        knowledge_base_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedChunk>> {
        let retrieval_query = KnowledgeBaseQuery::builder()
            .text(query)
            .build();

        let configuration = KnowledgeBaseRetrievalConfiguration::builder()
            .vector_search_configuration(
                KnowledgeBaseVectorSearchConfiguration::builder()
                    .number_of_results(i32::try_from(limit).unwrap_or(i32::MAX))
                    .build(),
            )
            .build();

        let output = self
            .client
            .retrieve()
            .knowledge_base_id(knowledge_base_id)
            .retrieval_query(retrieval_query)
            .retrieval_configuration(configuration)
            .send()
            .await
            .map_err(|e| {
                Error::knowledge_base(format!(
                    "Knowledge base retrieve failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(output
            .retrieval_results()
            .iter()
            .take(limit)
            .map(into_chunk)
            .collect())
    }

    fn name(&self) -> &'static str {
        "bedrock-knowledge-base"
    }
}
