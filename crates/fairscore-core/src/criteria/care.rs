//! CARE criteria: Collective benefit, Authority to control, Responsibility,
//! Ethics.
//!
//! Authority criteria consult the agent resolver. Policy: an Unknown
//! indigeneity status degrades to PartialPass and a failed lookup to
//! Indeterminate — never a silent Fail. Only a definitive catalogue answer
//! may Fail a status-dependent criterion.

use super::patterns::{ATTRIBUTION_INCOMPLETE, BENEFIT_LANGUAGE};
use super::{has_text, Checked, CriterionDef};
use crate::record::{AgentRef, AttributionRole, MetadataRecord};
use crate::resolver::AgentResolver;
use crate::types::{Agent, IndigeneityStatus, Principle};

/// Roles that carry authority over the data.
pub(super) const AUTHORITY_ROLES: &[AttributionRole] = &[
    AttributionRole::Custodian,
    AttributionRole::RightsHolder,
    AttributionRole::Originator,
];

pub(super) static CRITERIA: &[CriterionDef] = &[
    CriterionDef {
        id: "CARE-C1",
        principle: Principle::CollectiveBenefit,
        summary: "Metadata are discoverable through a catalogue",
        weight: 1.0,
        partial_factor: None,
        check: discoverable,
    },
    CriterionDef {
        id: "CARE-C2",
        principle: Principle::CollectiveBenefit,
        summary: "Use of the data is documented",
        weight: 1.0,
        partial_factor: None,
        check: documented_use,
    },
    CriterionDef {
        id: "CARE-C3",
        principle: Principle::CollectiveBenefit,
        summary: "Data are accessible under stated conditions",
        weight: 1.0,
        partial_factor: None,
        check: accessible_conditions,
    },
    CriterionDef {
        id: "CARE-A1",
        principle: Principle::AuthorityToControl,
        summary: "An authority over the data is attributed",
        weight: 1.0,
        partial_factor: None,
        check: authority_attributed,
    },
    CriterionDef {
        id: "CARE-A2",
        principle: Principle::AuthorityToControl,
        summary: "Attributed authorities resolve to Indigenous agents",
        weight: 1.0,
        partial_factor: None,
        check: indigenous_authority,
    },
    CriterionDef {
        id: "CARE-A3",
        principle: Principle::AuthorityToControl,
        summary: "Attribution caveats are honoured",
        weight: 1.0,
        partial_factor: None,
        check: attribution_caveats,
    },
    CriterionDef {
        id: "CARE-R1",
        principle: Principle::Responsibility,
        summary: "Responsibility for the data is evidenced",
        weight: 1.0,
        partial_factor: None,
        check: responsible_provenance,
    },
    CriterionDef {
        id: "CARE-R2",
        principle: Principle::Responsibility,
        summary: "Benefit-sharing or community use is documented",
        weight: 1.0,
        partial_factor: None,
        check: benefit_sharing,
    },
    CriterionDef {
        id: "CARE-E1",
        principle: Principle::Ethics,
        summary: "Caveats and consent state are disclosed",
        weight: 1.0,
        partial_factor: None,
        check: consent_disclosure,
    },
    CriterionDef {
        id: "CARE-E2",
        principle: Principle::Ethics,
        summary: "Rights are stated alongside the license",
        weight: 1.0,
        partial_factor: None,
        check: rights_with_license,
    },
];

fn discoverable(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    if record.is_part_of.is_empty() {
        Checked::fail("not part of any discoverable catalogue")
    } else {
        Checked::pass(format!(
            "discoverable through {} catalogue(s)",
            record.is_part_of.len()
        ))
    }
}

fn documented_use(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let titled = has_text(&record.title);
    let described = has_text(&record.description);
    match (titled, described) {
        (true, true) => Checked::pass("title and description document the data"),
        (true, false) | (false, true) => {
            Checked::partial("only one of title and description is provided")
        }
        (false, false) => Checked::fail("no title or description documents the data"),
    }
}

fn accessible_conditions(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    if record.access_rights.is_some() {
        Checked::pass("access rights state the conditions of access")
    } else if has_text(&record.rights) {
        Checked::partial("a free-text rights statement stands in for access rights")
    } else {
        Checked::fail("no access conditions are stated")
    }
}

fn authority_attributed(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let authorities = record.attributions_with_role(AUTHORITY_ROLES).count();
    if authorities > 0 {
        Checked::pass(format!(
            "{authorities} custodian/rights-holder/originator attribution(s) present"
        ))
    } else if !record.attributions.is_empty() {
        Checked::partial("attributions present, but none names an authority over the data")
    } else {
        Checked::fail("no attribution names an authority over the data")
    }
}

/// Resolve the authority agents and classify the set.
///
/// Verdict precedence: any Indigenous agent passes; otherwise any failed
/// lookup makes the criterion Indeterminate (the missing answer could have
/// been Indigenous); otherwise any Unknown degrades to PartialPass; a Fail
/// requires every authority to be definitively non-Indigenous.
fn indigenous_authority(record: &MetadataRecord, resolver: &dyn AgentResolver) -> Checked {
    let agents: Vec<Agent> = record
        .attributions_with_role(AUTHORITY_ROLES)
        .map(|a| resolver.resolve(&a.agent))
        .collect();

    if agents.is_empty() {
        return Checked::not_applicable("no authority attribution to resolve");
    }

    if let Some(agent) = agents
        .iter()
        .find(|a| a.status == IndigeneityStatus::Indigenous)
    {
        return Checked::pass(format!(
            "{} is recognised as Indigenous by the catalogue",
            agent.label()
        ));
    }

    if let Some(agent) = agents.iter().find(|a| a.lookup_error.is_some()) {
        return Checked::indeterminate(format!(
            "indigeneity of {} could not be determined: {}",
            agent.agent_ref.as_str(),
            agent.lookup_error.as_deref().unwrap_or("lookup failed")
        ));
    }

    let unknown: Vec<&Agent> = agents
        .iter()
        .filter(|a| a.status == IndigeneityStatus::Unknown)
        .collect();
    if !unknown.is_empty() {
        let mut explanation = format!(
            "indigeneity of {} remains unknown (unresolved reference)",
            unknown
                .iter()
                .map(|a| a.agent_ref.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        if let Some(notice) = record.first_notice_match(&ATTRIBUTION_INCOMPLETE) {
            explanation.push_str(&format!("; metadata carries a notice: \"{notice}\""));
        }
        return Checked::partial(explanation);
    }

    Checked::fail("all attributed authorities are recognised as non-Indigenous")
}

fn attribution_caveats(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    if let Some(notice) = record.first_notice_match(&ATTRIBUTION_INCOMPLETE) {
        return Checked::partial(format!(
            "attribution is flagged as incomplete: \"{notice}\""
        ));
    }
    if record.attributions.is_empty() {
        Checked::fail("no attribution recorded and no incompleteness notice explains why")
    } else {
        Checked::pass("attributions are declared without incompleteness caveats")
    }
}

fn responsible_provenance(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let attributed = !record.attributions.is_empty();
    let dated = record.created.is_some() || record.modified.is_some();
    match (attributed, dated) {
        (true, true) => Checked::pass("attributions and lifecycle dates evidence responsibility"),
        (true, false) => Checked::partial("attributions present but lifecycle dates are missing"),
        (false, true) => Checked::partial("lifecycle dates present but no responsible agent named"),
        (false, false) => Checked::fail("no attribution or lifecycle dates recorded"),
    }
}

fn benefit_sharing(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let texts = record
        .notes
        .iter()
        .map(String::as_str)
        .chain(record.rights.as_deref());

    let mut any_text = false;
    for text in texts {
        if text.trim().is_empty() {
            continue;
        }
        any_text = true;
        if BENEFIT_LANGUAGE.is_match(text) {
            return Checked::pass("notes document community use or benefit sharing");
        }
    }
    if any_text {
        Checked::partial("notes present but none addresses community use or benefit sharing")
    } else {
        Checked::fail("no notes or rights text documents benefit sharing")
    }
}

fn consent_disclosure(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    if let Some(notice) = record
        .local_context
        .iter()
        .find(|s| !s.trim().is_empty())
    {
        return Checked::pass(format!("local-context notice discloses caveats: \"{notice}\""));
    }
    if record.attributions.is_empty() {
        return Checked::not_applicable("no attribution recorded; no consent state to disclose");
    }
    let unidentified = record
        .attributions
        .iter()
        .filter(|a| matches!(a.agent, AgentRef::Name(_)))
        .count();
    if unidentified > 0 {
        Checked::partial(format!(
            "{unidentified} attribution(s) are unidentifiable and no disclosure notice explains the gap"
        ))
    } else {
        Checked::pass("attributions are identifiable; no caveat notice required")
    }
}

fn rights_with_license(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let licensed = record.license.is_some();
    let rights = record.access_rights.is_some() || has_text(&record.rights);
    match (licensed, rights) {
        (true, true) => Checked::pass("license and rights are both declared"),
        (true, false) => Checked::partial("license declared but rights are not stated"),
        (false, true) => Checked::partial("rights stated but no license declared"),
        (false, false) => Checked::fail("neither license nor rights are declared"),
    }
}
