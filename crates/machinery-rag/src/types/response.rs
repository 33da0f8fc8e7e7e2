//! Pipeline outcomes and the user-facing messages they render to

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategoryLabel;
use crate::generation::citation;

/// Returned when the classification gate rejects a question
pub const REJECTION_MESSAGE: &str =
    "I'm sorry, I can only answer questions related to heavy machinery. Please try another question.";

/// Returned when the knowledge base has nothing for a question
pub const NO_INFORMATION_MESSAGE: &str =
    "I'm sorry, I couldn't find any relevant information in the knowledge base for your question.";

/// Terminal state of one pipeline run.
///
/// Every variant renders to a user-facing string via `Display`; the flags keep service
/// failures distinguishable from legitimately empty results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatOutcome {
    /// Classification gate said no. `category` is `None` when classification itself failed.
    Rejected { category: Option<CategoryLabel> },
    /// Nothing retrieved, or the knowledge base call failed
    NoInformation { retrieval_failed: bool },
    /// Generated answer plus deduplicated source identifiers
    Answered {
        answer: String,
        sources: Vec<String>,
        generation_failed: bool,
    },
}

impl fmt::Display for ChatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { .. } => f.write_str(REJECTION_MESSAGE),
            Self::NoInformation { .. } => f.write_str(NO_INFORMATION_MESSAGE),
            Self::Answered {
                answer, sources, ..
            } => f.write_str(&citation::render(answer, sources)),
        }
    }
}
