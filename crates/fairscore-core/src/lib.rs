//! # fairscore-core
//!
//! Deterministic FAIR/CARE/LC scoring engine for DCAT-style dataset metadata.
//!
//! This crate provides the core scoring logic, answering:
//! - How findable, accessible, interoperable and reusable is this dataset?
//! - Does its governance honour CARE and label-scheme expectations?
//! - What exactly earned or lost each point?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same record and same resolver answers always produce
//!    an identical Report, in criterion registration order.
//! 2. **No network calls**: agent resolution is consumed through the
//!    [`AgentResolver`] seam; the async catalogue client lives in
//!    `fairscore-runtime`.
//! 3. **Explainable**: every verdict carries an explanation; every degraded
//!    operation surfaces in the Report's warnings.
//! 4. **Never aborts on data quality**: only configuration errors return
//!    `Err`; a Report is always produced for a valid scheme.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fairscore_core::{compute_score, MetadataRecord, OfflineResolver, Scheme};
//!
//! let record = MetadataRecord::from_json_file("dataset.json")?;
//! let report = compute_score(Scheme::Fair, &record, &OfflineResolver)?;
//!
//! println!("{}: {}/{}", report.subject, report.total_score, report.total_max);
//! for warning in &report.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! ```

mod aggregator;
pub mod criteria;
mod evaluator;
pub mod record;
mod resolver;
mod types;

pub use criteria::{criteria_for, CheckFn, Checked, CriterionDef};
pub use evaluator::{ScoringConfig, DEFAULT_PARTIAL_FACTOR};
pub use record::{
    AgentRef, Attribution, AttributionRole, Distribution, Extent, MetadataRecord, RecordError,
    Reference,
};
pub use resolver::{AgentResolver, OfflineResolver};
pub use types::{
    Agent, AgentSource, CriterionResult, IndigeneityStatus, Principle, PrincipleScore, Report,
    Scheme, ScoreError, Verdict,
};

/// Compute a Report for one record under one scheme with default scoring
/// configuration.
///
/// This is the main entry point. Data-quality and lookup problems never make
/// this fail; they surface as verdicts and warnings inside the Report.
pub fn compute_score(
    scheme: Scheme,
    record: &MetadataRecord,
    resolver: &dyn AgentResolver,
) -> Result<Report, ScoreError> {
    compute_score_with_config(scheme, record, resolver, &ScoringConfig::default())
}

/// Compute a Report with an explicit [`ScoringConfig`] (partial-credit factor
/// and per-criterion weight overrides).
pub fn compute_score_with_config(
    scheme: Scheme,
    record: &MetadataRecord,
    resolver: &dyn AgentResolver,
    config: &ScoringConfig,
) -> Result<Report, ScoreError> {
    let defs = criteria_for(scheme);
    if defs.is_empty() {
        return Err(ScoreError::EmptyCriterionSet(scheme));
    }
    config.validate(scheme)?;

    let principles = evaluator::evaluate_scheme(scheme, record, resolver, config);
    Ok(aggregator::aggregate(scheme, record, principles))
}
