//! Source citation extraction and rendering

use std::collections::HashSet;

use crate::types::RetrievedChunk;

/// Derive a source identifier from a storage locator: the final non-empty path segment,
/// ignoring any query string or fragment.
///
/// `s3://bucket/manuals/xl-2000.pdf` gives `xl-2000.pdf`. Blank locators, locators ending
/// in `/` and bare `scheme://authority` locators give `None`.
pub fn source_identifier(location: &str) -> Option<String> {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    // `s3://bucket` names a bucket, not a document
    let path = match path.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, key)| key)?,
        None => path,
    };

    path.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Source identifiers for `chunks`, deduplicated in first-seen order.
///
/// Chunks without a usable location are skipped.
pub fn format_citations(chunks: &[RetrievedChunk]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut identifiers = Vec::new();

    for chunk in chunks {
        let Some(identifier) = chunk.location.as_deref().and_then(source_identifier) else {
            tracing::debug!("Skipping citation for chunk with location {:?}", chunk.location);
            continue;
        };

        if seen.insert(identifier.clone()) {
            identifiers.push(identifier);
        }
    }

    identifiers
}

/// Append a numbered `Sources:` section to the answer.
///
/// The header is always emitted, even when there are no identifiers.
pub fn render(answer: &str, identifiers: &[String]) -> String {
    let mut response = format!("{}\n\nSources:\n", answer);

    for (i, identifier) in identifiers.iter().enumerate() {
        response.push_str(&format!("[{}] {}\n", i + 1, identifier));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_at(location: &str) -> RetrievedChunk {
        RetrievedChunk::new("text").with_location(location)
    }

    #[test]
    fn test_source_identifier() {
        assert_eq!(source_identifier("s3://b/doc1.pdf").as_deref(), Some("doc1.pdf"));
        assert_eq!(
            source_identifier("s3://spec-sheets/loaders/wl-50/manual.docx").as_deref(),
            Some("manual.docx")
        );
        assert_eq!(
            source_identifier("https://example.com/manuals/torque.html?v=2#specs").as_deref(),
            Some("torque.html")
        );
        assert_eq!(source_identifier("manual.pdf").as_deref(), Some("manual.pdf"));
    }

    #[test]
    fn test_source_identifier_malformed() {
        assert_eq!(source_identifier(""), None);
        assert_eq!(source_identifier("   "), None);
        assert_eq!(source_identifier("s3://bucket/"), None);
        assert_eq!(source_identifier("s3://"), None);
        assert_eq!(source_identifier("s3://bucket"), None);
    }

    #[test]
    fn test_dedup_first_seen_order() {
        let chunks = vec![
            chunk_at("s3://b/doc1.pdf"),
            chunk_at("s3://b/doc2.pdf"),
            chunk_at("s3://b/doc1.pdf"),
        ];

        let identifiers = format_citations(&chunks);
        assert_eq!(identifiers, vec!["doc1.pdf", "doc2.pdf"]);
        assert_eq!(
            render("answer", &identifiers),
            "answer\n\nSources:\n[1] doc1.pdf\n[2] doc2.pdf\n"
        );
    }

    #[test]
    fn test_duplicates_do_not_shift_numbering() {
        let chunks = vec![
            chunk_at("s3://b/c.pdf"),
            chunk_at("s3://b/c.pdf"),
            chunk_at("s3://b/a.pdf"),
            chunk_at("s3://other-bucket/c.pdf"),
            chunk_at("s3://b/b.pdf"),
        ];

        assert_eq!(format_citations(&chunks), vec!["c.pdf", "a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_malformed_locations_skipped() {
        let chunks = vec![
            RetrievedChunk::new("no location"),
            chunk_at("s3://b/"),
            chunk_at("s3://b/doc-a.pdf"),
            chunk_at(""),
            chunk_at("s3://b/doc-b.pdf"),
        ];

        assert_eq!(format_citations(&chunks), vec!["doc-a.pdf", "doc-b.pdf"]);
    }

    #[test]
    fn test_render_empty_sources_keeps_header() {
        assert_eq!(render("Nothing cited.", &[]), "Nothing cited.\n\nSources:\n");
        assert_eq!(render("", &[]), "\n\nSources:\n");
    }
}
