//! Checking a product index against the TDR requirement list

use crate::compare::MatchPolicy;
use crate::error::{IndexError, Result};
use crate::similarity::{normalize, SimilarityScorer};
use serde::{Deserialize, Serialize};
use shared_types::{
    AutomaticIndex, ComplianceItem, ComplianceResult, ExplicitIndex, HeadingCandidate, IndexEntry,
    IndexItem, MissingRequirement, Requirement,
};

/// Which index a compliance check was run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexSource {
    Explicit,
    Automatic,
}

/// The index treated as authoritative for a compliance check
#[derive(Debug, Clone, Copy)]
pub enum ProductIndex<'a> {
    Explicit(&'a [IndexEntry]),
    Automatic(&'a [HeadingCandidate]),
}

impl<'a> ProductIndex<'a> {
    /// The declared index when one was found, the detected headings otherwise
    ///
    /// A found index wins even when none of its lines could be parsed.
    pub fn select(explicit: &'a ExplicitIndex, automatic: &'a AutomaticIndex) -> Self {
        if explicit.found {
            ProductIndex::Explicit(&explicit.items)
        } else {
            ProductIndex::Automatic(&automatic.items)
        }
    }

    pub fn source(&self) -> IndexSource {
        match self {
            ProductIndex::Explicit(_) => IndexSource::Explicit,
            ProductIndex::Automatic(_) => IndexSource::Automatic,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ProductIndex::Explicit(items) => items.len(),
            ProductIndex::Automatic(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn titles(&self) -> Vec<&'a str> {
        match *self {
            ProductIndex::Explicit(items) => items.iter().map(|i| i.title.as_str()).collect(),
            ProductIndex::Automatic(items) => items.iter().map(|i| i.title.as_str()).collect(),
        }
    }

    fn item(&self, idx: usize) -> IndexItem {
        match *self {
            ProductIndex::Explicit(items) => IndexItem::Entry(items[idx].clone()),
            ProductIndex::Automatic(items) => IndexItem::Heading(items[idx].clone()),
        }
    }
}

impl<'a> From<&'a ExplicitIndex> for ProductIndex<'a> {
    fn from(index: &'a ExplicitIndex) -> Self {
        ProductIndex::Explicit(&index.items)
    }
}

impl<'a> From<&'a AutomaticIndex> for ProductIndex<'a> {
    fn from(index: &'a AutomaticIndex) -> Self {
        ProductIndex::Automatic(&index.items)
    }
}

/// Knobs for the compliance check; the defaults reproduce the reference behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplianceOptions {
    pub match_policy: MatchPolicy,
    /// Keep unmatched optional requirements in `missing_optional` instead of dropping them
    pub record_optional_misses: bool,
}

/// Check the product index against the requirements with default options
///
/// Unmatched optional requirements leave no trace in the result.
pub fn compare_with_requirements(
    product_index: ProductIndex<'_>,
    requirements: &[Requirement],
) -> Result<ComplianceResult> {
    compare_with_requirements_opts(product_index, requirements, ComplianceOptions::default())
}

pub fn compare_with_requirements_opts(
    product_index: ProductIndex<'_>,
    requirements: &[Requirement],
    options: ComplianceOptions,
) -> Result<ComplianceResult> {
    options.match_policy.validate()?;

    // Validate everything up front so a bad requirement never yields a partial result
    let requirement_names = requirements
        .iter()
        .enumerate()
        .map(|(idx, req)| {
            let name = normalize(&req.name);
            if name.is_empty() {
                Err(IndexError::InvalidInput(format!(
                    "requirement #{} has no usable name: {:?}",
                    idx + 1,
                    req.name
                )))
            } else {
                Ok(name)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let item_titles: Vec<String> = product_index.titles().into_iter().map(normalize).collect();
    let mut scorer = SimilarityScorer::new();

    let mut compliance = Vec::new();
    let mut missing = Vec::new();
    let mut missing_optional = Vec::new();

    for (req, req_name) in requirements.iter().zip(&requirement_names) {
        let found = item_titles
            .iter()
            .position(|title| options.match_policy.matches(&mut scorer, req_name, title));

        match found {
            Some(idx) => compliance.push(ComplianceItem {
                requirement: req.name.clone(),
                matched_item: product_index.item(idx),
                is_obligatory: req.is_obligatory,
            }),
            None => {
                let miss = MissingRequirement {
                    requirement: req.name.clone(),
                    description: req.description.clone(),
                    is_obligatory: req.is_obligatory,
                };
                if req.is_obligatory {
                    missing.push(miss);
                } else if options.record_optional_misses {
                    missing_optional.push(miss);
                }
            }
        }
    }

    let compliance_rate = compliance.len() as f64 / requirements.len().max(1) as f64;
    let obligatory_missing_count = missing.iter().filter(|m| m.is_obligatory).count();
    tracing::debug!(
        source = ?product_index.source(),
        requirements = requirements.len(),
        satisfied = compliance.len(),
        obligatory_missing = obligatory_missing_count,
        compliance_rate,
        "checked requirements against product index"
    );

    Ok(ComplianceResult {
        compliance,
        missing,
        missing_optional,
        compliance_rate,
        obligatory_missing_count,
    })
}

/// Parse a JSON array of requirements
pub fn requirements_from_json(json: &str) -> Result<Vec<Requirement>> {
    Ok(serde_json::from_str(json)?)
}
