//! Pattern rules for table-of-contents entries and body headings
//!
//! Each heuristic is a named [`PatternRule`] so the extractor and the
//! detector share one definition and each rule can be tested on its own.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::IndexEntry;

/// Keywords that open a declared table of contents, in priority order
pub const INDEX_KEYWORDS: &[&str] = &["ÍNDICE", "CONTENIDO", "TABLA DE CONTENIDO"];

/// An all-caps line must be longer than this (in characters) to be a heading
pub const ALL_CAPS_MIN_EXCLUSIVE: usize = 10;

lazy_static! {
    /// One pattern per index keyword, same order as INDEX_KEYWORDS
    pub(crate) static ref INDEX_KEYWORD_PATTERNS: Vec<Regex> = INDEX_KEYWORDS
        .iter()
        .map(|kw| Regex::new(&format!(r"(?i){}\s*\n", regex::escape(kw))).unwrap())
        .collect();

    /// End of an index block: a heading-like line after a blank line, or a chapter marker
    pub(crate) static ref INDEX_BLOCK_END: Regex =
        Regex::new(r"(?i)\n\s*\n[A-Z]{3}|\n\s*CAPÍTULO").unwrap();

    /// "1.2 Title ....... 14"
    static ref NUMBERED_ENTRY: Regex =
        Regex::new(r"^([0-9]+(?:\.[0-9]+)*\.?)\s+(.+?)[\s.]+([0-9]+)$").unwrap();

    /// "CAPÍTULO 2: Title ....... 14"
    static ref CHAPTER_ENTRY: Regex =
        Regex::new(r"(?i)^((?:CAPÍTULO|SECCIÓN)\s+[0-9]+)[\s:]+(.+?)[\s.]+([0-9]+)$").unwrap();

    /// "1.2 Title" where the title starts with an upper-case letter
    static ref NUMBERED_HEADING: Regex =
        Regex::new(r"^([0-9]+(?:\.[0-9]+)*\.?)\s+(\p{Lu}.+)$").unwrap();

    /// "CAPÍTULO 2: Title"
    static ref CHAPTER_HEADING: Regex =
        Regex::new(r"(?i)^((?:CAPÍTULO|SECCIÓN)\s+[0-9]+)[\s:]+(.+)$").unwrap();
}

/// A named heuristic for recognizing structure in a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternRule {
    /// Numeric prefix such as "1.", "2.3" or "4.1.2"
    NumberedEntry,
    /// "CAPÍTULO N" or "SECCIÓN N" marker
    ChapterMarker,
    /// A line written entirely in upper case
    AllCapsLine,
}

/// Number and title split out of a heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub number: Option<String>,
    pub title: String,
}

impl PatternRule {
    /// Rules tried against table-of-contents lines, in order
    pub const INDEX_ENTRY_RULES: &'static [PatternRule] =
        &[PatternRule::NumberedEntry, PatternRule::ChapterMarker];

    /// Rules tried against body lines, in order; the first match decides the split
    pub const HEADING_RULES: &'static [PatternRule] = &[
        PatternRule::NumberedEntry,
        PatternRule::ChapterMarker,
        PatternRule::AllCapsLine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternRule::NumberedEntry => "numbered_entry",
            PatternRule::ChapterMarker => "chapter_marker",
            PatternRule::AllCapsLine => "all_caps_line",
        }
    }

    /// Parse a table-of-contents line into an entry
    ///
    /// The trailing page number is mandatory. Lines without one, or with a
    /// page number that does not fit, yield `None`.
    pub fn match_index_entry(&self, line: &str) -> Option<IndexEntry> {
        let pattern: &Regex = match self {
            PatternRule::NumberedEntry => &*NUMBERED_ENTRY,
            PatternRule::ChapterMarker => &*CHAPTER_ENTRY,
            PatternRule::AllCapsLine => return None,
        };

        let captures = pattern.captures(line)?;
        let page = captures.get(3)?.as_str().parse::<u32>().ok()?;

        Some(IndexEntry {
            number: Some(captures.get(1)?.as_str().trim().to_string()),
            title: captures.get(2)?.as_str().trim().to_string(),
            page: Some(page),
        })
    }

    /// Recognize a body line as a heading
    pub fn match_heading(&self, line: &str) -> Option<HeadingMatch> {
        match self {
            PatternRule::NumberedEntry => split_heading(&NUMBERED_HEADING, line),
            PatternRule::ChapterMarker => split_heading(&CHAPTER_HEADING, line),
            PatternRule::AllCapsLine => {
                if is_all_caps(line) {
                    Some(HeadingMatch {
                        number: None,
                        title: line.trim().to_string(),
                    })
                } else {
                    None
                }
            }
        }
    }
}

fn split_heading(pattern: &Regex, line: &str) -> Option<HeadingMatch> {
    let captures = pattern.captures(line)?;
    Some(HeadingMatch {
        number: Some(captures.get(1)?.as_str().trim().to_string()),
        title: captures.get(2)?.as_str().trim().to_string(),
    })
}

/// True when the line reads the same upper-cased and is long enough
///
/// Lines without letters also qualify, matching the upper-case comparison.
pub fn is_all_caps(line: &str) -> bool {
    line.chars().count() > ALL_CAPS_MIN_EXCLUSIVE && line == line.to_uppercase()
}
