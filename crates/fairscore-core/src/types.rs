//! Shared evaluation types: schemes, principles, verdicts, and the Report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::record::AgentRef;

/// Errors that abort a scoring run before a Report is produced.
///
/// Data-quality and lookup problems never surface here; they become verdicts
/// and Report warnings. Only configuration and programming errors are fatal.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("no criteria registered for scheme {0}")]
    EmptyCriterionSet(Scheme),

    #[error("partial-credit factor {0} is outside [0, 1]")]
    InvalidPartialFactor(f64),

    #[error("weight override for criterion {criterion} is not a positive finite number: {weight}")]
    InvalidWeight { criterion: String, weight: f64 },

    #[error("weight override names unknown criterion {0}")]
    UnknownCriterion(String),
}

/// The scoring scheme requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Scheme {
    Fair,
    Care,
    /// Label scheme distinct from FAIR/CARE, evaluated by the same engine.
    Lc,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Fair => write!(f, "FAIR"),
            Scheme::Care => write!(f, "CARE"),
            Scheme::Lc => write!(f, "LC"),
        }
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fair" => Ok(Scheme::Fair),
            "care" => Ok(Scheme::Care),
            "lc" | "lc-labels" => Ok(Scheme::Lc),
            other => Err(format!("unknown scheme: {other}")),
        }
    }
}

/// A named principle within a scheme.
///
/// Principles are fixed; criteria register under exactly one of them and the
/// Report groups results in this declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principle {
    // FAIR
    Findable,
    Accessible,
    Interoperable,
    Reusable,
    // CARE
    CollectiveBenefit,
    AuthorityToControl,
    Responsibility,
    Ethics,
    // LC labels
    Custodianship,
    IndigeneityDisclosure,
    CaveatNotices,
}

impl Principle {
    pub fn scheme(&self) -> Scheme {
        match self {
            Principle::Findable
            | Principle::Accessible
            | Principle::Interoperable
            | Principle::Reusable => Scheme::Fair,
            Principle::CollectiveBenefit
            | Principle::AuthorityToControl
            | Principle::Responsibility
            | Principle::Ethics => Scheme::Care,
            Principle::Custodianship
            | Principle::IndigeneityDisclosure
            | Principle::CaveatNotices => Scheme::Lc,
        }
    }

    /// Short letter code used in criterion ids and rendered reports.
    pub fn code(&self) -> &'static str {
        match self {
            Principle::Findable => "F",
            Principle::Accessible => "A",
            Principle::Interoperable => "I",
            Principle::Reusable => "R",
            Principle::CollectiveBenefit => "C",
            Principle::AuthorityToControl => "A",
            Principle::Responsibility => "R",
            Principle::Ethics => "E",
            Principle::Custodianship => "LC-C",
            Principle::IndigeneityDisclosure => "LC-I",
            Principle::CaveatNotices => "LC-N",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Principle::Findable => "Findable",
            Principle::Accessible => "Accessible",
            Principle::Interoperable => "Interoperable",
            Principle::Reusable => "Reusable",
            Principle::CollectiveBenefit => "Collective benefit",
            Principle::AuthorityToControl => "Authority to control",
            Principle::Responsibility => "Responsibility",
            Principle::Ethics => "Ethics",
            Principle::Custodianship => "Custodianship",
            Principle::IndigeneityDisclosure => "Indigeneity disclosure",
            Principle::CaveatNotices => "Caveat notices",
        }
    }
}

/// Outcome of a single criterion check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Pass,
    PartialPass,
    Fail,
    /// The criterion does not apply to this record; excluded from max_score.
    NotApplicable,
    /// A required external lookup failed; the criterion cannot be evaluated
    /// safely. Never counted as Fail.
    Indeterminate,
}

impl Verdict {
    /// Whether the criterion's weight counts toward max_score.
    pub fn is_applicable(&self) -> bool {
        matches!(self, Verdict::Pass | Verdict::PartialPass | Verdict::Fail)
    }
}

/// Result of evaluating one criterion against one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionResult {
    pub criterion_id: String,
    pub principle: Principle,
    pub verdict: Verdict,
    pub weight: f64,
    pub explanation: String,
}

/// Per-principle sub-score with its criterion breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipleScore {
    pub principle: Principle,
    pub score: f64,
    pub max_score: f64,
    pub criteria: Vec<CriterionResult>,
}

/// The final, immutable scoring report.
///
/// Deterministic: identical inputs (including identical resolver responses)
/// produce an identical Report. Principle and criterion ordering is always
/// the declared registration order. The warnings list is the single channel
/// for degraded-operation signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "subjectIdentifier")]
    pub subject: String,
    pub scheme: Scheme,
    #[serde(rename = "principleScores")]
    pub principles: Vec<PrincipleScore>,
    pub total_score: f64,
    pub total_max: f64,
    pub warnings: Vec<String>,
}

/// Indigeneity classification of an agent, as recorded by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndigeneityStatus {
    Indigenous,
    NonIndigenous,
    Unknown,
}

/// Where an agent's identity information came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentSource {
    /// The catalogue answered for this reference (found or definitively not).
    Catalogue,
    /// No catalogue answer: bare literal name, lookup failure, or never asked.
    Unresolved,
}

/// Resolved identity information for one [`AgentRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub agent_ref: AgentRef,
    pub display_name: Option<String>,
    pub status: IndigeneityStatus,
    pub source: AgentSource,
    /// Set when a catalogue lookup was attempted and failed. Criteria that
    /// depend on indigeneity status must treat this as Indeterminate rather
    /// than reading `status` as a fact.
    pub lookup_error: Option<String>,
}

impl Agent {
    /// An agent that was never looked up (bare literal names, offline runs).
    pub fn unresolved(agent_ref: AgentRef) -> Self {
        Self {
            agent_ref,
            display_name: None,
            status: IndigeneityStatus::Unknown,
            source: AgentSource::Unresolved,
            lookup_error: None,
        }
    }

    /// A successful catalogue hit.
    pub fn catalogued(
        agent_ref: AgentRef,
        status: IndigeneityStatus,
        display_name: Option<String>,
    ) -> Self {
        Self {
            agent_ref,
            display_name,
            status,
            source: AgentSource::Catalogue,
            lookup_error: None,
        }
    }

    /// A definitive negative: the catalogue answered and does not know the agent.
    pub fn not_found(agent_ref: AgentRef) -> Self {
        Self {
            agent_ref,
            display_name: None,
            status: IndigeneityStatus::Unknown,
            source: AgentSource::Catalogue,
            lookup_error: None,
        }
    }

    /// A lookup that was attempted and failed (network error, bad response,
    /// timeout, cancellation).
    pub fn failed(agent_ref: AgentRef, error: impl Into<String>) -> Self {
        Self {
            agent_ref,
            display_name: None,
            status: IndigeneityStatus::Unknown,
            source: AgentSource::Unresolved,
            lookup_error: Some(error.into()),
        }
    }

    /// Name to use in explanations: display name, else the raw reference.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.agent_ref.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("fair".parse::<Scheme>().unwrap(), Scheme::Fair);
        assert_eq!("CARE".parse::<Scheme>().unwrap(), Scheme::Care);
        assert_eq!("lc-labels".parse::<Scheme>().unwrap(), Scheme::Lc);
        assert!("tair".parse::<Scheme>().is_err());
    }

    #[test]
    fn test_principle_scheme_membership() {
        assert_eq!(Principle::Findable.scheme(), Scheme::Fair);
        assert_eq!(Principle::AuthorityToControl.scheme(), Scheme::Care);
        assert_eq!(Principle::Custodianship.scheme(), Scheme::Lc);
    }

    #[test]
    fn test_verdict_applicability() {
        assert!(Verdict::Pass.is_applicable());
        assert!(Verdict::Fail.is_applicable());
        assert!(!Verdict::NotApplicable.is_applicable());
        assert!(!Verdict::Indeterminate.is_applicable());
    }

    #[test]
    fn test_failed_agent_keeps_unknown_status() {
        let agent = Agent::failed(AgentRef::parse("https://example.org/agent/1"), "timeout");
        assert_eq!(agent.status, IndigeneityStatus::Unknown);
        assert_eq!(agent.source, AgentSource::Unresolved);
        assert!(agent.lookup_error.is_some());
    }
}
