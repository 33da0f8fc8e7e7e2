//! machinery-rag: heavy-machinery documentation assistant
//!
//! A question is classified (only heavy-machinery questions pass), relevant chunks are
//! retrieved from a Bedrock knowledge base, a grounded prompt is assembled, the LLM answers,
//! and the source documents are appended as numbered citations.

pub mod classification;
pub mod config;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::RagPipeline;
pub use types::{
    category::CategoryLabel,
    chunk::RetrievedChunk,
    response::{ChatOutcome, NO_INFORMATION_MESSAGE, REJECTION_MESSAGE},
};
