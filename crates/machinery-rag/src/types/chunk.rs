//! Retrieved knowledge base chunks

use serde::{Deserialize, Serialize};

/// A fragment of a source document returned by the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk text
    pub text: String,
    /// Storage locator of the source document (e.g., `s3://bucket/manuals/xl-2000.pdf`)
    pub location: Option<String>,
    /// Relevance score reported by the search service
    pub score: Option<f32>,
}

impl RetrievedChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: None,
            score: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}
