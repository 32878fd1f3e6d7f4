pub mod types;

pub use types::{
    AutomaticIndex, ComparisonResult, ComplianceItem, ComplianceResult, ExplicitIndex,
    HeadingCandidate, IndexEntry, IndexItem, MatchResult, MissingRequirement, Requirement,
};
