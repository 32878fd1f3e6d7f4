//! Heading structure detection from body text
//!
//! Best-effort and deterministic: the same text always yields the same
//! headings, false positives included.

use crate::patterns::PatternRule;
use shared_types::{AutomaticIndex, HeadingCandidate};

/// Build an index from the headings found in `raw_text`
pub fn generate_automatic_index(raw_text: &str) -> AutomaticIndex {
    let items: Vec<HeadingCandidate> = raw_text
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| detect_heading(line, idx + 1))
        .collect();

    tracing::debug!(headings = items.len(), "generated automatic index");
    AutomaticIndex::new(items)
}

/// Classify a single line, `line_number` being 1-indexed
pub fn detect_heading(line: &str, line_number: usize) -> Option<HeadingCandidate> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (rule, heading) = PatternRule::HEADING_RULES
        .iter()
        .find_map(|rule| rule.match_heading(line).map(|m| (rule, m)))?;
    tracing::trace!(line_number, rule = rule.name(), "heading candidate");

    Some(HeadingCandidate {
        level: heading_level(heading.number.as_deref()),
        number: heading.number,
        title: heading.title,
        line_number,
    })
}

/// One level per separator dot in the number, top level when unnumbered
pub fn heading_level(number: Option<&str>) -> usize {
    number.map_or(0, |n| n.matches('.').count()) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading(
        number: Option<&str>,
        title: &str,
        level: usize,
        line_number: usize,
    ) -> HeadingCandidate {
        HeadingCandidate {
            number: number.map(str::to_string),
            title: title.to_string(),
            level,
            line_number,
        }
    }

    #[test]
    fn test_detects_numbered_and_chapter_headings() {
        let index =
            generate_automatic_index("1.1 Antecedentes\ntexto\nCAPÍTULO 2: Desarrollo\ntexto");
        assert_eq!(
            index.items,
            vec![
                heading(Some("1.1"), "Antecedentes", 2, 1),
                heading(Some("CAPÍTULO 2"), "Desarrollo", 1, 3),
            ]
        );
        assert_eq!(index.total_items, 2);
    }

    #[test]
    fn test_all_caps_lines_are_headings() {
        let text = "\n  RESUMEN EJECUTIVO  \nEl presente documento...\nOBJETIVOS\n";
        let index = generate_automatic_index(text);
        assert_eq!(index.items, vec![heading(None, "RESUMEN EJECUTIVO", 1, 2)]);
    }

    #[test]
    fn test_numbered_rule_takes_priority_over_all_caps() {
        let index = generate_automatic_index("2.3.1 ESTUDIO DE TRÁFICO");
        assert_eq!(
            index.items,
            vec![heading(Some("2.3.1"), "ESTUDIO DE TRÁFICO", 3, 1)]
        );
    }

    #[test]
    fn test_trailing_dot_counts_toward_level() {
        assert_eq!(heading_level(Some("1.")), 2);
        assert_eq!(heading_level(Some("3")), 1);
        assert_eq!(heading_level(Some("CAPÍTULO 4")), 1);
        assert_eq!(heading_level(None), 1);
    }

    #[test]
    fn test_lowercase_numbered_lines_are_ignored() {
        let index = generate_automatic_index("12 metros lineales\n3. se instalará la tubería");
        assert!(index.items.is_empty());
        assert_eq!(index.total_items, 0);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(generate_automatic_index(""), AutomaticIndex::default());
    }
}
