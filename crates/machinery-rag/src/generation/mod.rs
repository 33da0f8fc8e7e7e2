//! Prompt assembly, answer generation and citation rendering

pub mod citation;
pub mod generator;
pub mod prompt;

pub use citation::{format_citations, render, source_identifier};
pub use generator::Generator;
pub use prompt::PromptBuilder;
