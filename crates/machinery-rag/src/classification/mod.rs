//! Prompt classification gate
//!
//! The raw question is embedded verbatim in a fixed taxonomy prompt and the model answers
//! with a single `Category X` token. Anything that does not parse to a known label is an
//! error, and callers treat errors as "not valid".

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::llm::{CompletionRequest, LlmProvider, SamplingParams};
use crate::types::CategoryLabel;

/// Classifies user questions with a remote LLM
pub struct Classifier {
    llm: Arc<dyn LlmProvider>,
    params: SamplingParams,
}

impl Classifier {
    pub fn new(llm: Arc<dyn LlmProvider>, params: SamplingParams) -> Self {
        Self { llm, params }
    }

    /// Classify a question. Remote failures and unparseable output are `Error::Classification`.
    pub async fn classify(&self, query: &str) -> Result<CategoryLabel> {
        let request = CompletionRequest::user(build_classification_prompt(query), self.params);

        let raw = self
            .llm
            .complete(&request)
            .await
            .map_err(|e| Error::classification(e.to_string()))?;

        tracing::info!("Prompt category: {}", raw.trim());
        parse_category(&raw)
    }
}

/// Build the taxonomy prompt. The query is inserted as-is.
pub fn build_classification_prompt(query: &str) -> String {
    let mut prompt = String::from(
        "Human: Classify the provided user request into one of the following categories. \
         Evaluate the user request against each category. \
         Once the user category has been selected with high confidence return the answer.\n",
    );

    for label in CategoryLabel::ALL {
        prompt.push_str(&format!("{}: {}\n", label.token(), label.description()));
    }

    prompt.push_str("<user_request>\n");
    prompt.push_str(query);
    prompt.push_str("\n</user_request>\n");
    prompt.push_str(
        "ONLY ANSWER with the Category letter, such as the following output example:\n\n\
         Category B\n\nAssistant:",
    );
    prompt
}

/// Parse model output into a label.
///
/// Exact match after trimming, ignoring case, against `Category X` or the canonical label
/// name. Variants like `Category E.` or `E` are rejected.
pub fn parse_category(raw: &str) -> Result<CategoryLabel> {
    let normalized = raw.trim().to_lowercase();

    CategoryLabel::ALL
        .into_iter()
        .find(|label| {
            normalized == label.token().to_lowercase()
                || normalized == label.name().to_lowercase()
        })
        .ok_or_else(|| Error::classification(format!("unrecognized category: {:?}", raw.trim())))
}
