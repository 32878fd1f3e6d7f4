//! Reconciliation of a declared index with the detected headings

use crate::error::{IndexError, Result};
use crate::similarity::{contains_either, normalize, SimilarityScorer};
use serde::{Deserialize, Serialize};
use shared_types::{AutomaticIndex, ComparisonResult, ExplicitIndex, MatchResult};

/// Decides whether two normalized titles refer to the same topic
///
/// Whatever the policy, the similarity attached to a match is the plain
/// edit-distance score of the two normalized titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "threshold", rename_all = "snake_case")]
pub enum MatchPolicy {
    /// One title contains the other
    #[default]
    Containment,
    /// Similarity at or above the threshold, in [0, 1]
    SimilarityThreshold(f64),
}

impl MatchPolicy {
    pub fn validate(&self) -> Result<()> {
        match *self {
            MatchPolicy::Containment => Ok(()),
            MatchPolicy::SimilarityThreshold(t) if t.is_finite() && (0.0..=1.0).contains(&t) => {
                Ok(())
            }
            MatchPolicy::SimilarityThreshold(t) => Err(IndexError::InvalidInput(format!(
                "similarity threshold must be within [0, 1], got {}",
                t
            ))),
        }
    }

    /// Apply the policy to two already-normalized titles
    ///
    /// A title that normalized to nothing (separator rules, signature lines)
    /// never matches, since it would be contained in every other title.
    pub fn matches(&self, scorer: &mut SimilarityScorer, a: &str, b: &str) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        match *self {
            MatchPolicy::Containment => contains_either(a, b),
            MatchPolicy::SimilarityThreshold(t) => scorer.similarity(a, b) >= t,
        }
    }
}

/// Compare the explicit index against the automatic one by containment
pub fn compare_indexes(explicit: &ExplicitIndex, automatic: &AutomaticIndex) -> ComparisonResult {
    compare_titles(explicit, automatic, MatchPolicy::Containment)
}

/// Compare the two indexes under a chosen match policy
pub fn compare_indexes_with(
    explicit: &ExplicitIndex,
    automatic: &AutomaticIndex,
    policy: MatchPolicy,
) -> Result<ComparisonResult> {
    policy.validate()?;
    Ok(compare_titles(explicit, automatic, policy))
}

fn compare_titles(
    explicit: &ExplicitIndex,
    automatic: &AutomaticIndex,
    policy: MatchPolicy,
) -> ComparisonResult {
    let mut scorer = SimilarityScorer::new();
    let explicit_titles: Vec<String> = explicit.items.iter().map(|i| normalize(&i.title)).collect();
    let automatic_titles: Vec<String> =
        automatic.items.iter().map(|i| normalize(&i.title)).collect();

    let mut matches = Vec::new();
    let mut missing = Vec::new();

    for (entry, entry_title) in explicit.items.iter().zip(&explicit_titles) {
        let found = automatic
            .items
            .iter()
            .zip(&automatic_titles)
            .find(|(_, auto_title)| policy.matches(&mut scorer, entry_title, auto_title));

        match found {
            Some((heading, heading_title)) => matches.push(MatchResult {
                explicit: entry.clone(),
                automatic: heading.clone(),
                similarity: scorer.similarity(entry_title, heading_title),
            }),
            None => missing.push(entry.clone()),
        }
    }

    let mismatches = automatic
        .items
        .iter()
        .zip(&automatic_titles)
        .filter(|(_, auto_title)| {
            !explicit_titles
                .iter()
                .any(|entry_title| policy.matches(&mut scorer, entry_title, auto_title))
        })
        .map(|(heading, _)| heading.clone())
        .collect::<Vec<_>>();

    let consistency = matches.len() as f64 / explicit.items.len().max(1) as f64;
    tracing::debug!(
        matched = matches.len(),
        missing = missing.len(),
        mismatches = mismatches.len(),
        consistency,
        "compared explicit and automatic indexes"
    );

    ComparisonResult {
        matches,
        missing,
        mismatches,
        consistency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{HeadingCandidate, IndexEntry};

    fn explicit(titles: &[&str]) -> ExplicitIndex {
        ExplicitIndex {
            found: true,
            items: titles
                .iter()
                .enumerate()
                .map(|(i, t)| IndexEntry {
                    number: Some(format!("{}.", i + 1)),
                    title: t.to_string(),
                    page: Some(i as u32 + 1),
                })
                .collect(),
            raw_text: String::new(),
        }
    }

    fn automatic(titles: &[&str]) -> AutomaticIndex {
        AutomaticIndex::new(
            titles
                .iter()
                .enumerate()
                .map(|(i, t)| HeadingCandidate {
                    number: None,
                    title: t.to_string(),
                    level: 1,
                    line_number: i * 10 + 1,
                })
                .collect(),
        )
    }

    #[test]
    fn test_identical_titles_are_fully_consistent() {
        let titles = ["Introducción", "Metodología", "Conclusiones"];
        let result = compare_indexes(&explicit(&titles), &automatic(&titles));

        assert_eq!(result.consistency, 1.0);
        assert_eq!(result.matches.len(), 3);
        assert!(result.missing.is_empty());
        assert!(result.mismatches.is_empty());
        assert!(result.matches.iter().all(|m| m.similarity == 1.0));
    }

    #[test]
    fn test_disjoint_titles() {
        let e = explicit(&["Alcance", "Presupuesto"]);
        let a = automatic(&["RESUMEN EJECUTIVO", "Topografía"]);
        let result = compare_indexes(&e, &a);

        assert_eq!(result.consistency, 0.0);
        assert!(result.matches.is_empty());
        assert_eq!(result.missing, e.items);
        assert_eq!(result.mismatches, a.items);
    }

    #[test]
    fn test_containment_ignores_accents_and_case() {
        let e = explicit(&["Estudio de Tráfico"]);
        let a = automatic(&["ESTUDIO DE TRAFICO Y CAPACIDAD VIAL"]);
        let result = compare_indexes(&e, &a);

        assert_eq!(result.matches.len(), 1);
        let score = result.matches[0].similarity;
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_first_matching_heading_is_paired() {
        let e = explicit(&["Anexos"]);
        let a = automatic(&["Anexos fotográficos", "Anexos"]);
        let result = compare_indexes(&e, &a);

        assert_eq!(result.matches[0].automatic.title, "Anexos fotográficos");
        assert!(result.mismatches.is_empty());
    }

    #[test]
    fn test_empty_explicit_index_has_zero_consistency() {
        let result =
            compare_indexes(&ExplicitIndex::not_found(), &automatic(&["OBJETIVOS GENERALES"]));
        assert_eq!(result.consistency, 0.0);
        assert_eq!(result.mismatches.len(), 1);
    }

    #[test]
    fn test_letterless_heading_matches_nothing() {
        let e = explicit(&["Presupuesto", "--"]);
        let a = automatic(&["____________________", "Presupuesto general"]);
        let result = compare_indexes(&e, &a);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].automatic.title, "Presupuesto general");
        assert_eq!(result.missing.len(), 1);
        assert_eq!(result.missing[0].title, "--");
        assert_eq!(result.mismatches.len(), 1);
        assert_eq!(result.mismatches[0].title, "____________________");

        let mut scorer = SimilarityScorer::new();
        assert!(!MatchPolicy::SimilarityThreshold(0.0).matches(&mut scorer, "", ""));
    }

    #[test]
    fn test_similarity_threshold_policy() {
        let e = explicit(&["Metodologia"]);
        let a = automatic(&["Metodologa", "Cronograma"]);

        let strict = compare_indexes_with(&e, &a, MatchPolicy::SimilarityThreshold(0.95)).unwrap();
        assert!(strict.matches.is_empty());

        let lenient = compare_indexes_with(&e, &a, MatchPolicy::SimilarityThreshold(0.8)).unwrap();
        assert_eq!(lenient.matches.len(), 1);
        assert_eq!(lenient.mismatches.len(), 1);
        assert_eq!(lenient.mismatches[0].title, "Cronograma");
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let e = explicit(&["A"]);
        let a = automatic(&["A"]);
        assert!(compare_indexes_with(&e, &a, MatchPolicy::SimilarityThreshold(1.5)).is_err());
        assert!(compare_indexes_with(&e, &a, MatchPolicy::SimilarityThreshold(f64::NAN)).is_err());
        assert!(compare_indexes_with(&e, &a, MatchPolicy::Containment).is_ok());
    }

    #[test]
    fn test_policy_serializes_with_kind_tag() {
        let json = serde_json::to_value(MatchPolicy::SimilarityThreshold(0.8)).unwrap();
        assert_eq!(json["kind"], "similarity_threshold");
        assert_eq!(json["threshold"], 0.8);
        let parsed: MatchPolicy = serde_json::from_str(r#"{"kind":"containment"}"#).unwrap();
        assert_eq!(parsed, MatchPolicy::Containment);
    }
}
