//! Score aggregator: combines principle scores into the final Report.
//!
//! Aggregation is strict and deterministic: totals are sums in registration
//! order, and the warnings list is the single channel for degraded-operation
//! signals (malformed-record notes first, then Indeterminate explanations,
//! deduplicated in first-seen order).

use std::collections::HashSet;

use crate::record::MetadataRecord;
use crate::types::{PrincipleScore, Report, Scheme, Verdict};

/// Subject used when a record carries no identifier.
const UNIDENTIFIED_SUBJECT: &str = "(unidentified resource)";

pub(crate) fn aggregate(
    scheme: Scheme,
    record: &MetadataRecord,
    principles: Vec<PrincipleScore>,
) -> Report {
    let subject = record
        .identifier
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(UNIDENTIFIED_SUBJECT)
        .to_string();

    let mut warnings = record_warnings(record);
    for principle in &principles {
        for criterion in &principle.criteria {
            if criterion.verdict == Verdict::Indeterminate {
                warnings.push(format!(
                    "{}: {}",
                    criterion.criterion_id, criterion.explanation
                ));
            }
        }
    }
    dedup_preserving_order(&mut warnings);

    let total_score = principles.iter().map(|p| p.score).sum();
    let total_max = principles.iter().map(|p| p.max_score).sum();

    if !warnings.is_empty() {
        tracing::warn!(
            subject = %subject,
            warnings = warnings.len(),
            "report produced with degraded-operation warnings"
        );
    }

    Report {
        subject,
        scheme,
        principles,
        total_score,
        total_max,
        warnings,
    }
}

/// Structural problems no criterion can handle; scoring continues around them.
fn record_warnings(record: &MetadataRecord) -> Vec<String> {
    let mut warnings = Vec::new();

    if record
        .identifier
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .is_none()
    {
        warnings.push(format!(
            "record has no identifier; reporting under {UNIDENTIFIED_SUBJECT}"
        ));
    }

    let empty_refs = record
        .attributions
        .iter()
        .filter(|a| a.agent.as_str().trim().is_empty())
        .count();
    if empty_refs > 0 {
        warnings.push(format!(
            "{empty_refs} attribution(s) carry an empty agent reference"
        ));
    }

    warnings
}

fn dedup_preserving_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
