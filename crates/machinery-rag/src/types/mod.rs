//! Core types for the chat pipeline

pub mod category;
pub mod chunk;
pub mod response;

pub use category::CategoryLabel;
pub use chunk::RetrievedChunk;
pub use response::{ChatOutcome, NO_INFORMATION_MESSAGE, REJECTION_MESSAGE};
