//! Principle evaluator: runs a scheme's criteria and computes sub-scores.
//!
//! Criteria run in registration order; only configuration errors abort.
//! `score = Σ weight (Pass) + Σ weight · partial_factor (PartialPass)` and
//! `max_score = Σ weight` over applicable criteria. NotApplicable and
//! Indeterminate criteria are excluded from `max_score`: the former do not
//! apply, the latter would otherwise let a lookup outage masquerade as bad
//! metadata.

use std::collections::HashMap;

use crate::criteria::{criteria_for, CriterionDef};
use crate::record::MetadataRecord;
use crate::resolver::AgentResolver;
use crate::types::{CriterionResult, PrincipleScore, Scheme, ScoreError, Verdict};

/// Partial-credit factor applied to PartialPass verdicts unless a criterion
/// declares its own. Provisional pending the published rubric.
pub const DEFAULT_PARTIAL_FACTOR: f64 = 0.5;

/// Run-level scoring configuration.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Factor applied to PartialPass verdicts.
    pub partial_factor: f64,

    /// Per-criterion weight overrides, keyed by criterion id.
    pub weight_overrides: HashMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            partial_factor: DEFAULT_PARTIAL_FACTOR,
            weight_overrides: HashMap::new(),
        }
    }
}

impl ScoringConfig {
    /// Validate against a scheme's registry. Violations are configuration
    /// errors and abort the run.
    pub fn validate(&self, scheme: Scheme) -> Result<(), ScoreError> {
        if !(0.0..=1.0).contains(&self.partial_factor) {
            return Err(ScoreError::InvalidPartialFactor(self.partial_factor));
        }
        let defs = criteria_for(scheme);
        for (id, weight) in &self.weight_overrides {
            if !defs.iter().any(|d| d.id == id) {
                return Err(ScoreError::UnknownCriterion(id.clone()));
            }
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(ScoreError::InvalidWeight {
                    criterion: id.clone(),
                    weight: *weight,
                });
            }
        }
        Ok(())
    }

    fn weight_for(&self, def: &CriterionDef) -> f64 {
        self.weight_overrides
            .get(def.id)
            .copied()
            .unwrap_or(def.weight)
    }
}

/// Evaluate every criterion of `scheme` against `record`, grouped by
/// principle in registration order.
pub(crate) fn evaluate_scheme(
    scheme: Scheme,
    record: &MetadataRecord,
    resolver: &dyn AgentResolver,
    config: &ScoringConfig,
) -> Vec<PrincipleScore> {
    let mut principles: Vec<PrincipleScore> = Vec::new();

    for def in criteria_for(scheme) {
        let weight = config.weight_for(def);
        let checked = (def.check)(record, resolver);
        tracing::debug!(
            criterion = def.id,
            verdict = ?checked.verdict,
            "criterion evaluated"
        );

        let factor = def.partial_factor.unwrap_or(config.partial_factor);
        let (earned, counted) = match checked.verdict {
            Verdict::Pass => (weight, weight),
            Verdict::PartialPass => (weight * factor, weight),
            Verdict::Fail => (0.0, weight),
            Verdict::NotApplicable | Verdict::Indeterminate => (0.0, 0.0),
        };

        let result = CriterionResult {
            criterion_id: def.id.to_string(),
            principle: def.principle,
            verdict: checked.verdict,
            weight,
            explanation: checked.explanation,
        };

        match principles.last_mut() {
            Some(p) if p.principle == def.principle => {
                p.score += earned;
                p.max_score += counted;
                p.criteria.push(result);
            }
            _ => principles.push(PrincipleScore {
                principle: def.principle,
                score: earned,
                max_score: counted,
                criteria: vec![result],
            }),
        }
    }

    principles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Reference;
    use crate::resolver::OfflineResolver;

    fn licensed_record() -> MetadataRecord {
        MetadataRecord {
            identifier: Some("https://doi.org/10.1000/182".to_string()),
            license: Some(Reference::parse("All rights reserved")),
            ..Default::default()
        }
    }

    #[test]
    fn test_partial_pass_earns_configured_factor() {
        let record = licensed_record();
        let principles =
            evaluate_scheme(Scheme::Fair, &record, &OfflineResolver, &ScoringConfig::default());

        let reusable = principles
            .iter()
            .find(|p| p.principle == crate::types::Principle::Reusable)
            .unwrap();
        let r1 = reusable
            .criteria
            .iter()
            .find(|c| c.criterion_id == "R1")
            .unwrap();
        assert_eq!(r1.verdict, Verdict::PartialPass);

        // R1 partial (0.5), R2 fail, R3 not applicable -> score 0.5, max 2.
        assert!((reusable.score - 0.5).abs() < f64::EPSILON);
        assert!((reusable.max_score - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_not_applicable_is_excluded_from_max() {
        let without_source = licensed_record();
        let mut with_source = licensed_record();
        with_source.source = Some(Reference::parse("https://example.org/upstream"));

        let config = ScoringConfig::default();
        let max_without: f64 =
            evaluate_scheme(Scheme::Fair, &without_source, &OfflineResolver, &config)
                .iter()
                .map(|p| p.max_score)
                .sum();
        let max_with: f64 = evaluate_scheme(Scheme::Fair, &with_source, &OfflineResolver, &config)
            .iter()
            .map(|p| p.max_score)
            .sum();

        // R3 applies only when a source is declared.
        assert!((max_with - max_without - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weight_override_changes_score() {
        let record = licensed_record();
        let mut config = ScoringConfig::default();
        config.weight_overrides.insert("F1".to_string(), 3.0);
        config.validate(Scheme::Fair).unwrap();

        let principles = evaluate_scheme(Scheme::Fair, &record, &OfflineResolver, &config);
        let findable = &principles[0];
        let f1 = &findable.criteria[0];
        assert_eq!(f1.criterion_id, "F1");
        assert_eq!(f1.verdict, Verdict::Pass);
        assert!((f1.weight - 3.0).abs() < f64::EPSILON);
        assert!(findable.score >= 3.0);
    }

    #[test]
    fn test_invalid_partial_factor_rejected() {
        let config = ScoringConfig {
            partial_factor: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(Scheme::Fair),
            Err(ScoreError::InvalidPartialFactor(_))
        ));
    }

    #[test]
    fn test_unknown_criterion_override_rejected() {
        let mut config = ScoringConfig::default();
        config.weight_overrides.insert("NOPE".to_string(), 1.0);
        assert!(matches!(
            config.validate(Scheme::Fair),
            Err(ScoreError::UnknownCriterion(_))
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = ScoringConfig::default();
        config.weight_overrides.insert("F1".to_string(), -1.0);
        assert!(matches!(
            config.validate(Scheme::Fair),
            Err(ScoreError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_principles_appear_in_registration_order() {
        use crate::types::Principle;
        let principles = evaluate_scheme(
            Scheme::Fair,
            &MetadataRecord::default(),
            &OfflineResolver,
            &ScoringConfig::default(),
        );
        let order: Vec<Principle> = principles.iter().map(|p| p.principle).collect();
        assert_eq!(
            order,
            vec![
                Principle::Findable,
                Principle::Accessible,
                Principle::Interoperable,
                Principle::Reusable
            ]
        );
    }
}
