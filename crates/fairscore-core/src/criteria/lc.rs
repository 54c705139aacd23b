//! LC label criteria: custodianship, indigeneity disclosure, caveat notices.
//!
//! The label scheme certifies how well a record discloses who holds the data
//! and what is known about them, rather than the data's quality itself.

use super::care::AUTHORITY_ROLES;
use super::patterns::{ATTRIBUTION_INCOMPLETE, INCOMPLETE_MANAGEMENT};
use super::{Checked, CriterionDef};
use crate::record::{AttributionRole, MetadataRecord};
use crate::resolver::AgentResolver;
use crate::types::{Agent, IndigeneityStatus, Principle};

pub(super) static CRITERIA: &[CriterionDef] = &[
    CriterionDef {
        id: "LC1",
        principle: Principle::Custodianship,
        summary: "A custodian holds the data in its jurisdiction",
        weight: 1.0,
        partial_factor: None,
        check: custodianship,
    },
    CriterionDef {
        id: "LC2",
        principle: Principle::IndigeneityDisclosure,
        summary: "Indigeneity of key agents is explicitly on record",
        weight: 1.0,
        partial_factor: None,
        check: indigeneity_disclosure,
    },
    CriterionDef {
        id: "LC3",
        principle: Principle::CaveatNotices,
        summary: "Incomplete data-management information is flagged",
        weight: 1.0,
        partial_factor: None,
        check: completeness_caveats,
    },
];

fn custodianship(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let custodians = record
        .attributions_with_role(&[AttributionRole::Custodian])
        .count();
    if custodians > 0 {
        return Checked::pass(format!("{custodians} custodian attribution(s) recorded"));
    }

    let fallback = record
        .attributions_with_role(&[AttributionRole::RightsHolder, AttributionRole::Owner])
        .count();
    if fallback > 0 {
        Checked::partial("no custodian recorded, but a rights holder or owner stands in")
    } else {
        Checked::fail("no custodian, rights holder or owner attribution recorded")
    }
}

/// The label requires the indigeneity of key agents to be on record either
/// way; an unresolved status earns partial credit and a failed lookup is
/// Indeterminate.
fn indigeneity_disclosure(record: &MetadataRecord, resolver: &dyn AgentResolver) -> Checked {
    let agents: Vec<Agent> = record
        .attributions_with_role(AUTHORITY_ROLES)
        .map(|a| resolver.resolve(&a.agent))
        .collect();

    if agents.is_empty() {
        return Checked::not_applicable("no key agents attributed; nothing to disclose");
    }

    if let Some(agent) = agents.iter().find(|a| a.lookup_error.is_some()) {
        return Checked::indeterminate(format!(
            "status of {} could not be determined: {}",
            agent.agent_ref.as_str(),
            agent.lookup_error.as_deref().unwrap_or("lookup failed")
        ));
    }

    let undetermined = agents
        .iter()
        .filter(|a| a.status == IndigeneityStatus::Unknown)
        .count();
    if undetermined == 0 {
        Checked::pass(format!(
            "indigeneity status of all {} key agent(s) is on record",
            agents.len()
        ))
    } else {
        Checked::partial(format!(
            "status of {undetermined} of {} key agent(s) remains undetermined",
            agents.len()
        ))
    }
}

fn completeness_caveats(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    if let Some(notice) = record
        .first_notice_match(&INCOMPLETE_MANAGEMENT)
        .or_else(|| record.first_notice_match(&ATTRIBUTION_INCOMPLETE))
    {
        Checked::partial(format!(
            "data-management information is flagged as incomplete: \"{notice}\""
        ))
    } else {
        Checked::pass("no incompleteness caveats recorded")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AgentRef, Attribution};
    use crate::resolver::OfflineResolver;
    use crate::types::Verdict;

    fn custodian_record(agent: &str) -> MetadataRecord {
        MetadataRecord {
            attributions: vec![Attribution {
                role: AttributionRole::Custodian,
                agent: AgentRef::parse(agent),
            }],
            ..Default::default()
        }
    }

    struct CataloguedResolver(IndigeneityStatus);

    impl AgentResolver for CataloguedResolver {
        fn resolve(&self, agent_ref: &AgentRef) -> Agent {
            Agent::catalogued(agent_ref.clone(), self.0, None)
        }
    }

    #[test]
    fn test_custodian_passes_rights_holder_is_partial() {
        assert_eq!(
            custodianship(&custodian_record("https://example.org/agent/1"), &OfflineResolver)
                .verdict,
            Verdict::Pass
        );

        let rights_holder_only = MetadataRecord {
            attributions: vec![Attribution {
                role: AttributionRole::RightsHolder,
                agent: AgentRef::parse("https://example.org/agent/1"),
            }],
            ..Default::default()
        };
        assert_eq!(
            custodianship(&rights_holder_only, &OfflineResolver).verdict,
            Verdict::PartialPass
        );
    }

    #[test]
    fn test_disclosure_counts_either_definitive_status() {
        let record = custodian_record("https://example.org/agent/1");
        // Non-Indigenous on record is still a disclosure.
        let checked = indigeneity_disclosure(&record, &CataloguedResolver(IndigeneityStatus::NonIndigenous));
        assert_eq!(checked.verdict, Verdict::Pass);
    }

    #[test]
    fn test_disclosure_unknown_is_partial() {
        let record = custodian_record("https://example.org/agent/1");
        let checked = indigeneity_disclosure(&record, &OfflineResolver);
        assert_eq!(checked.verdict, Verdict::PartialPass);
    }

    #[test]
    fn test_management_caveat_is_echoed() {
        let record = MetadataRecord {
            notes: vec!["Incomplete data management history for this collection".to_string()],
            ..Default::default()
        };
        let checked = completeness_caveats(&record, &OfflineResolver);
        assert_eq!(checked.verdict, Verdict::PartialPass);
        assert!(checked.explanation.contains("Incomplete data management"));
    }
}
