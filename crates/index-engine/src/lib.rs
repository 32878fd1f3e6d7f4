//! Document index engine
//!
//! Extracts the declared table of contents of a technical submission, detects
//! its actual heading structure, reconciles the two and checks the result
//! against the TDR requirement list. Every operation is a pure function of its
//! inputs.

pub mod compare;
pub mod detector;
pub mod error;
pub mod explicit;
pub mod patterns;
pub mod report;
pub mod requirements;
pub mod similarity;

pub use compare::{compare_indexes, compare_indexes_with, MatchPolicy};
pub use detector::generate_automatic_index;
pub use error::{IndexError, Result};
pub use explicit::extract_explicit_index;
pub use patterns::PatternRule;
pub use report::{AuditStatus, AuditSummary, DocumentAudit};
pub use requirements::{
    compare_with_requirements, compare_with_requirements_opts, requirements_from_json,
    ComplianceOptions, IndexSource, ProductIndex,
};
pub use similarity::{edit_distance, normalize, similarity, SimilarityScorer};

use serde::{Deserialize, Serialize};
use shared_types::Requirement;

/// Engine settings; the defaults reproduce the reference behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Policy used both between the two indexes and against requirements
    pub match_policy: MatchPolicy,
    pub record_optional_misses: bool,
}

/// IndexEngine entry point
#[derive(Debug, Clone, Default)]
pub struct IndexEngine {
    config: EngineConfig,
}

impl IndexEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.match_policy.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the whole pipeline on one document
    pub fn audit(&self, raw_text: &str, requirements: &[Requirement]) -> Result<DocumentAudit> {
        let explicit = extract_explicit_index(raw_text);
        let automatic = generate_automatic_index(raw_text);
        let comparison = compare_indexes_with(&explicit, &automatic, self.config.match_policy)?;

        let product_index = ProductIndex::select(&explicit, &automatic);
        let index_source = product_index.source();
        let compliance = compare_with_requirements_opts(
            product_index,
            requirements,
            ComplianceOptions {
                match_policy: self.config.match_policy,
                record_optional_misses: self.config.record_optional_misses,
            },
        )?;

        tracing::info!(
            explicit_found = explicit.found,
            source = ?index_source,
            consistency = comparison.consistency,
            compliance_rate = compliance.compliance_rate,
            obligatory_missing = compliance.obligatory_missing_count,
            "document audit complete"
        );

        Ok(DocumentAudit {
            explicit,
            automatic,
            comparison,
            index_source,
            compliance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBMISSION: &str = "EXPEDIENTE TÉCNICO\n\
        ÍNDICE\n\
        1. Memoria descriptiva ........ 3\n\
        2. Estudio de suelos ........ 10\n\
        3. Presupuesto ........ 25\n\
        \n\
        MEMORIA DESCRIPTIVA\n\
        El proyecto comprende...\n\
        2. Estudio de suelos\n\
        Se realizaron calicatas...\n";

    #[test]
    fn test_engine_audits_document_with_declared_index() {
        let engine = IndexEngine::new();
        let requirements = vec![
            Requirement::obligatory("Memoria descriptiva"),
            Requirement::obligatory("Estudio de suelos"),
            Requirement::obligatory("Planos"),
            Requirement::optional("Cronograma"),
        ];
        let audit = engine.audit(SUBMISSION, &requirements).unwrap();

        assert!(audit.explicit.found);
        assert_eq!(audit.explicit.items.len(), 3);
        assert_eq!(audit.index_source, IndexSource::Explicit);
        // The index lines themselves read as numbered headings
        assert!(audit.comparison.missing.is_empty());
        assert_eq!(audit.comparison.consistency, 1.0);
        assert_eq!(audit.comparison.mismatches.len(), 1);
        assert_eq!(audit.comparison.mismatches[0].title, "EXPEDIENTE TÉCNICO");
        assert_eq!(audit.compliance.compliance.len(), 2);
        assert_eq!(audit.compliance.obligatory_missing_count, 1);
        assert_eq!(audit.summary().status, AuditStatus::NonCompliant);
    }

    #[test]
    fn test_engine_falls_back_to_detected_headings() {
        let engine = IndexEngine::new();
        let text = "1. Memoria Descriptiva\ntexto\n2. Planos\n";
        let audit = engine
            .audit(text, &[Requirement::obligatory("Planos")])
            .unwrap();

        assert!(!audit.explicit.found);
        assert_eq!(audit.index_source, IndexSource::Automatic);
        assert_eq!(audit.compliance.compliance_rate, 1.0);
        assert_eq!(audit.summary().status, AuditStatus::Compliant);
    }

    #[test]
    fn test_signature_line_does_not_satisfy_requirements() {
        let text = "1. Memoria Descriptiva\ntexto\n____________________\nfirma\n";
        let requirements = vec![
            Requirement::obligatory("Presupuesto"),
            Requirement::obligatory("Planos"),
            Requirement::obligatory("Cronograma de obra"),
        ];
        let audit = IndexEngine::new().audit(text, &requirements).unwrap();

        // The separator is still detected, it just never matches
        assert_eq!(audit.automatic.total_items, 2);
        assert_eq!(audit.index_source, IndexSource::Automatic);
        assert_eq!(audit.compliance.missing.len(), 3);
        assert_eq!(audit.compliance.compliance_rate, 0.0);
        assert_eq!(audit.summary().status, AuditStatus::NonCompliant);
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = EngineConfig {
            match_policy: MatchPolicy::SimilarityThreshold(-0.1),
            ..Default::default()
        };
        assert!(IndexEngine::with_config(config).is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"recordOptionalMisses": true}"#).unwrap();
        assert_eq!(config.match_policy, MatchPolicy::Containment);
        assert!(config.record_optional_misses);
    }
}
