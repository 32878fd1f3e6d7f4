//! Full audit of one document and its human-readable rendering

use crate::requirements::IndexSource;
use serde::{Deserialize, Serialize};
use shared_types::{AutomaticIndex, ComparisonResult, ComplianceResult, ExplicitIndex};

/// Everything the pipeline produced for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAudit {
    pub explicit: ExplicitIndex,
    pub automatic: AutomaticIndex,
    pub comparison: ComparisonResult,
    /// Index the requirements were checked against
    pub index_source: IndexSource,
    pub compliance: ComplianceResult,
}

/// Headline numbers of an audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub explicit_index_found: bool,
    pub declared_entries: usize,
    pub detected_headings: usize,
    pub consistency: f64,
    pub requirements_met: usize,
    pub obligatory_missing: usize,
    pub optional_missing: usize,
    pub compliance_rate: f64,
    pub status: AuditStatus,
}

/// Overall verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// Every obligatory requirement found and the declared index checks out
    Compliant,
    /// No obligatory gaps, but declared sections or optional topics are missing
    CompliantWithGaps,
    /// At least one obligatory requirement is missing
    NonCompliant,
}

impl DocumentAudit {
    pub fn summary(&self) -> AuditSummary {
        let obligatory_missing = self.compliance.obligatory_missing_count;
        let optional_missing = self.compliance.missing_optional.len();

        let status = if obligatory_missing > 0 {
            AuditStatus::NonCompliant
        } else if !self.comparison.missing.is_empty() || optional_missing > 0 {
            AuditStatus::CompliantWithGaps
        } else {
            AuditStatus::Compliant
        };

        AuditSummary {
            explicit_index_found: self.explicit.found,
            declared_entries: self.explicit.items.len(),
            detected_headings: self.automatic.total_items,
            consistency: self.comparison.consistency,
            requirements_met: self.compliance.compliance.len(),
            obligatory_missing,
            optional_missing,
            compliance_rate: self.compliance.compliance_rate,
            status,
        }
    }

    /// Generate a text report
    pub fn to_text(&self) -> String {
        let summary = self.summary();
        let mut output = String::new();

        output.push_str("Document Index Audit\n");
        output.push_str(&"=".repeat(60));
        output.push_str("\n\n");

        output.push_str(&format!("Status: {:?}\n", summary.status));
        output.push_str(&format!(
            "Declared index: {}\n",
            if summary.explicit_index_found {
                format!("found, {} entries", summary.declared_entries)
            } else {
                "not found".to_string()
            }
        ));
        output.push_str(&format!("Detected headings: {}\n", summary.detected_headings));
        output.push_str(&format!(
            "Index consistency: {:.0}%\n",
            summary.consistency * 100.0
        ));
        output.push_str(&format!(
            "Requirements checked against: {:?} index\n",
            self.index_source
        ));
        output.push_str(&format!(
            "Compliance: {:.0}% ({} met, {} obligatory missing)\n\n",
            summary.compliance_rate * 100.0,
            summary.requirements_met,
            summary.obligatory_missing
        ));

        output.push_str("Requirements:\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        for item in &self.compliance.compliance {
            output.push_str(&format!(
                "✓ FOUND {} -> {}\n",
                item.requirement,
                item.matched_item.title()
            ));
        }
        for miss in &self.compliance.missing {
            output.push_str(&format!("✗ MISSING {}\n", miss.requirement));
            if let Some(description) = &miss.description {
                output.push_str(&format!("    {}\n", description));
            }
        }
        for miss in &self.compliance.missing_optional {
            output.push_str(&format!("- OPTIONAL {}\n", miss.requirement));
        }

        if !self.comparison.missing.is_empty() {
            output.push_str("\nDeclared but not found in body:\n");
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for (i, entry) in self.comparison.missing.iter().enumerate() {
                let page = entry
                    .page
                    .map(|p| format!(" (p. {})", p))
                    .unwrap_or_default();
                output.push_str(&format!("{}. {}{}\n", i + 1, entry.title, page));
            }
        }

        output
    }
}
