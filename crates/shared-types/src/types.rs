//! Data model shared by the index engine and its callers.
//!
//! Field names serialize in camelCase, the shape consumed by the HTTP layer.

use serde::{Deserialize, Serialize};

/// An entry declared in a document's explicit table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Hierarchical number ("1.2.3") or label ("CAPÍTULO 2")
    pub number: Option<String>,
    pub title: String,
    pub page: Option<u32>,
}

/// A heading inferred from the body text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingCandidate {
    pub number: Option<String>,
    pub title: String,
    /// Nesting depth, 1 for top-level headings
    pub level: usize,
    /// 1-indexed line in the source text
    pub line_number: usize,
}

/// Result of looking for a declared table of contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplicitIndex {
    pub found: bool,
    pub items: Vec<IndexEntry>,
    /// The TOC block as it appeared in the text, empty when not found
    pub raw_text: String,
}

impl ExplicitIndex {
    pub fn not_found() -> Self {
        Self::default()
    }
}

/// Heading structure detected from the body text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomaticIndex {
    pub items: Vec<HeadingCandidate>,
    pub total_items: usize,
}

impl AutomaticIndex {
    pub fn new(items: Vec<HeadingCandidate>) -> Self {
        let total_items = items.len();
        Self { items, total_items }
    }
}

/// An explicit entry paired with the detected heading it matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub explicit: IndexEntry,
    pub automatic: HeadingCandidate,
    /// Diagnostic edit-distance similarity in [0, 1]
    pub similarity: f64,
}

/// Reconciliation of the declared index against the detected headings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub matches: Vec<MatchResult>,
    /// Declared entries with no detected heading
    pub missing: Vec<IndexEntry>,
    /// Detected headings not declared in the index
    pub mismatches: Vec<HeadingCandidate>,
    pub consistency: f64,
}

/// A required topic from the reference specification (TDR)
///
/// Also accepts the persisted column names so rows can be passed through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    #[serde(alias = "nombre_requisito")]
    pub name: String,
    #[serde(default, alias = "descripcion_completa")]
    pub description: Option<String>,
    #[serde(default = "default_obligatory", alias = "es_obligatorio")]
    pub is_obligatory: bool,
}

fn default_obligatory() -> bool {
    true
}

impl Requirement {
    pub fn obligatory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_obligatory: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_obligatory: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Any item of a product index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexItem {
    Heading(HeadingCandidate),
    Entry(IndexEntry),
}

impl IndexItem {
    pub fn title(&self) -> &str {
        match self {
            IndexItem::Entry(entry) => &entry.title,
            IndexItem::Heading(heading) => &heading.title,
        }
    }

    pub fn number(&self) -> Option<&str> {
        match self {
            IndexItem::Entry(entry) => entry.number.as_deref(),
            IndexItem::Heading(heading) => heading.number.as_deref(),
        }
    }
}

/// A requirement satisfied by an index item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceItem {
    pub requirement: String,
    pub matched_item: IndexItem,
    pub is_obligatory: bool,
}

/// A requirement with no matching index item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingRequirement {
    pub requirement: String,
    pub description: Option<String>,
    pub is_obligatory: bool,
}

/// Outcome of checking a product index against the requirement list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub compliance: Vec<ComplianceItem>,
    /// Obligatory requirements not found
    pub missing: Vec<MissingRequirement>,
    /// Optional requirements not found, only filled when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_optional: Vec<MissingRequirement>,
    pub compliance_rate: f64,
    pub obligatory_missing_count: usize,
}
