//! Prompt templates for RAG generation

use crate::types::RetrievedChunk;

/// Prompt builder for grounded answers
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the context block: each chunk labelled `Chunk i:` (1-based), blank-line separated,
    /// in input order. Empty input gives an empty block.
    pub fn build_context(chunks: &[RetrievedChunk]) -> String {
        let mut context = String::new();

        for (i, chunk) in chunks.iter().enumerate() {
            context.push_str(&format!("Chunk {}:\n{}\n\n", i + 1, chunk.text));
        }

        context
    }

    /// Build the full RAG prompt
    pub fn assemble(question: &str, chunks: &[RetrievedChunk]) -> String {
        Self::build_rag_prompt(question, &Self::build_context(chunks))
    }

    /// Fill the two-slot template
    pub fn build_rag_prompt(question: &str, context: &str) -> String {
        format!(
            r#"Human: You are an expert assistant on heavy machinery.
Use the following pieces of context to answer the user's question.
If you don't know the answer, just say that you don't know, don't try to make up an answer.

<context>
{context}
</context>

<question>
{question}
</question>

Assistant:"#,
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks() -> Vec<RetrievedChunk> {
        vec![
            RetrievedChunk::new("Check hydraulic fluid daily.")
                .with_location("s3://spec-sheets/xl-2000.pdf"),
            RetrievedChunk::new("Replace filters every 500 hours."),
        ]
    }

    #[test]
    fn test_build_context_numbering() {
        assert_eq!(
            PromptBuilder::build_context(&chunks()),
            "Chunk 1:\nCheck hydraulic fluid daily.\n\nChunk 2:\nReplace filters every 500 hours.\n\n"
        );
    }

    #[test]
    fn test_assemble_contains_both_slots() {
        let prompt = PromptBuilder::assemble("How do I service the XL-2000 hydraulic pump?", &chunks());

        assert!(prompt.contains("<context>\nChunk 1:\nCheck hydraulic fluid daily."));
        assert!(prompt.contains("<question>\nHow do I service the XL-2000 hydraulic pump?\n</question>"));
        assert!(prompt.contains("say that you don't know"));
        let first = prompt.find("Chunk 1:").unwrap();
        let second = prompt.find("Chunk 2:").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let a = PromptBuilder::assemble("Track tension?", &chunks());
        let b = PromptBuilder::assemble("Track tension?", &chunks());
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_assemble_empty_chunks() {
        assert_eq!(PromptBuilder::build_context(&[]), "");
        let prompt = PromptBuilder::assemble("Anything?", &[]);
        assert!(prompt.contains("<context>\n\n</context>"));
    }
}
