//! Declared table-of-contents extraction
//!
//! Looks for an "ÍNDICE" / "CONTENIDO" / "TABLA DE CONTENIDO" block and parses
//! its lines with the index-entry rules. A document without such a block is
//! a normal outcome, reported with `found: false`.

use crate::patterns::{PatternRule, INDEX_BLOCK_END, INDEX_KEYWORDS, INDEX_KEYWORD_PATTERNS};
use shared_types::{ExplicitIndex, IndexEntry};

/// Extract the explicit index declared in `raw_text`
pub fn extract_explicit_index(raw_text: &str) -> ExplicitIndex {
    let Some((keyword, block)) = find_index_block(raw_text) else {
        tracing::debug!("no table of contents block found");
        return ExplicitIndex::not_found();
    };

    let items = parse_index_entries(block);
    tracing::debug!(
        keyword,
        entries = items.len(),
        "extracted explicit table of contents"
    );

    ExplicitIndex {
        found: true,
        items,
        raw_text: block.to_string(),
    }
}

/// Locate the index block, returning the keyword that opened it
///
/// Keywords are tried in priority order and the first one present anywhere
/// in the text wins. The block ends before the first blank-line-separated
/// heading-like line or chapter marker, or at the end of the text.
pub fn find_index_block(raw_text: &str) -> Option<(&'static str, &str)> {
    INDEX_KEYWORDS
        .iter()
        .zip(INDEX_KEYWORD_PATTERNS.iter())
        .find_map(|(keyword, pattern)| {
            let opening = pattern.find(raw_text)?;
            let rest = &raw_text[opening.end()..];
            let end = INDEX_BLOCK_END
                .find(rest)
                .map(|m| m.start())
                .unwrap_or(rest.len());
            Some((*keyword, &rest[..end]))
        })
}

/// Parse every line of an index block; lines no rule accepts are skipped
pub fn parse_index_entries(block: &str) -> Vec<IndexEntry> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            PatternRule::INDEX_ENTRY_RULES
                .iter()
                .find_map(|rule| rule.match_index_entry(line))
        })
        .collect()
}
