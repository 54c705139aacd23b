//! FAIR criteria: Findable, Accessible, Interoperable, Reusable.

use super::patterns::{
    is_machine_readable_extension, is_machine_readable_media_type, is_open_format,
    is_proprietary_format, ACCESS_CLOSED, ACCESS_OPEN, ACCESS_PARTIAL, DATA_ACCESS_RIGHTS_NS,
    PID_INDICATORS,
};
use super::{has_text, Checked, CriterionDef};
use crate::record::{Extent, MetadataRecord, Reference};
use crate::resolver::AgentResolver;
use crate::types::Principle;

pub(super) static CRITERIA: &[CriterionDef] = &[
    CriterionDef {
        id: "F1",
        principle: Principle::Findable,
        summary: "Identifier is globally unique and persistent",
        weight: 1.0,
        partial_factor: None,
        check: persistent_identifier,
    },
    CriterionDef {
        id: "F2",
        principle: Principle::Findable,
        summary: "Data are described with rich metadata",
        weight: 1.0,
        partial_factor: None,
        check: rich_metadata,
    },
    CriterionDef {
        id: "F3",
        principle: Principle::Findable,
        summary: "Metadata are registered in a searchable resource",
        weight: 1.0,
        partial_factor: None,
        check: registered_in_catalogue,
    },
    CriterionDef {
        id: "A1",
        principle: Principle::Accessible,
        summary: "Access conditions are declared",
        weight: 1.0,
        partial_factor: None,
        check: access_declared,
    },
    CriterionDef {
        id: "A2",
        principle: Principle::Accessible,
        summary: "Declared access classification is open",
        weight: 1.0,
        partial_factor: None,
        check: access_openness,
    },
    CriterionDef {
        id: "A3",
        principle: Principle::Accessible,
        summary: "Data are retrievable from a distribution",
        weight: 1.0,
        partial_factor: None,
        check: retrievable_distribution,
    },
    CriterionDef {
        id: "I1",
        principle: Principle::Interoperable,
        summary: "Distribution formats are machine-readable",
        weight: 1.0,
        partial_factor: None,
        check: machine_readable_format,
    },
    CriterionDef {
        id: "I2",
        principle: Principle::Interoperable,
        summary: "Metadata references use shared vocabularies",
        weight: 1.0,
        partial_factor: None,
        check: shared_vocabularies,
    },
    CriterionDef {
        id: "I3",
        principle: Principle::Interoperable,
        summary: "Metadata include qualified references to other data",
        weight: 1.0,
        partial_factor: None,
        check: qualified_references,
    },
    CriterionDef {
        id: "I4",
        principle: Principle::Interoperable,
        summary: "Distribution formats are open, not proprietary",
        weight: 1.0,
        partial_factor: None,
        check: open_format,
    },
    CriterionDef {
        id: "R1",
        principle: Principle::Reusable,
        summary: "A clear, machine-readable usage license is declared",
        weight: 1.0,
        partial_factor: None,
        check: usage_license,
    },
    CriterionDef {
        id: "R2",
        principle: Principle::Reusable,
        summary: "Metadata are associated with provenance",
        weight: 1.0,
        partial_factor: None,
        check: provenance,
    },
    CriterionDef {
        id: "R3",
        principle: Principle::Reusable,
        summary: "Declared sources are properly cited",
        weight: 1.0,
        partial_factor: None,
        check: cited_source,
    },
];

fn persistent_identifier(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let Some(id) = record.identifier.as_deref().filter(|s| !s.trim().is_empty()) else {
        return Checked::fail("no identifier assigned to the resource");
    };

    if let Some(indicator) = PID_INDICATORS.iter().find(|p| id.contains(*p)) {
        return Checked::pass(format!(
            "identifier uses a persistent scheme ({indicator})"
        ));
    }
    if id.starts_with("http://") || id.starts_with("https://") {
        return Checked::partial(
            "identifier is a plain web address, not a recognised persistent scheme",
        );
    }
    Checked::partial("identifier is local only; not globally resolvable")
}

fn rich_metadata(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let titled = has_text(&record.title);
    let described = has_text(&record.description);

    let richness = [
        record.created.is_some(),
        record.modified.is_some(),
        record.issued.is_some(),
        !record.attributions.is_empty(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();

    if titled && described && richness >= 2 {
        Checked::pass(format!(
            "title, description and {richness} further descriptive properties present"
        ))
    } else if titled || described {
        Checked::partial(format!(
            "basic description only (title: {titled}, description: {described}, \
             further properties: {richness})"
        ))
    } else {
        Checked::fail("the resource is not described: no title or description")
    }
}

fn registered_in_catalogue(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    match record.is_part_of.len() {
        0 => Checked::fail("not registered in any catalogue or searchable resource"),
        n => Checked::pass(format!("registered in {n} catalogue(s)")),
    }
}

/// Data-access-rights classifications declared through themes.
fn access_themes(record: &MetadataRecord) -> Vec<&str> {
    record
        .themes
        .iter()
        .filter_map(|t| t.as_str().strip_prefix(DATA_ACCESS_RIGHTS_NS))
        .collect()
}

fn access_declared(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    if record.access_rights.is_some() {
        Checked::pass("access rights are declared")
    } else if has_text(&record.rights) {
        Checked::pass("a rights statement describes access conditions")
    } else if !access_themes(record).is_empty() {
        Checked::pass("an access classification is declared through themes")
    } else {
        Checked::fail("no access rights, rights statement or access classification declared")
    }
}

fn access_openness(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let declared = access_themes(record);

    if declared.iter().any(|c| ACCESS_OPEN.contains(c)) {
        return Checked::pass("data are classified as openly accessible");
    }
    if let Some(c) = declared.iter().find(|c| ACCESS_PARTIAL.contains(*c)) {
        return Checked::partial(format!("access is declared but limited ({c})"));
    }
    if let Some(c) = declared.iter().find(|c| ACCESS_CLOSED.contains(*c)) {
        // A declared closed classification is still a declaration.
        return Checked::partial(format!("access is declared as closed ({c})"));
    }
    if record.access_rights.is_some() || has_text(&record.rights) {
        return Checked::partial(
            "access conditions are stated but carry no recognised openness classification",
        );
    }
    Checked::fail("no openness classification declared")
}

fn retrievable_distribution(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    if record.distributions.is_empty() {
        return Checked::fail("no distributions described");
    }
    let downloadable = record.distributions.iter().filter(|d| d.downloadable()).count();
    if downloadable > 0 {
        Checked::pass(format!(
            "{downloadable} of {} distribution(s) carry a retrievable URL",
            record.distributions.len()
        ))
    } else {
        Checked::partial("distributions are listed but none carries a retrievable URL")
    }
}

fn machine_readable_format(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let declared: Vec<&str> = record
        .distributions
        .iter()
        .flat_map(|d| [d.media_type.as_deref(), d.format.as_deref()])
        .flatten()
        .collect();

    if declared.is_empty() {
        return Checked::fail("no distribution formats declared");
    }
    if let Some(mt) = declared.iter().find(|v| is_machine_readable_media_type(v)) {
        return Checked::pass(format!("machine-readable media type declared ({mt})"));
    }
    if let Some(ext) = declared.iter().find(|v| is_machine_readable_extension(v)) {
        return Checked::partial(format!(
            "machine-readable format declared as a file extension ({ext}), not a media type"
        ));
    }
    Checked::fail("declared formats are not recognised as machine-readable")
}

fn open_format(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let declared: Vec<&str> = record
        .distributions
        .iter()
        .flat_map(|d| [d.media_type.as_deref(), d.format.as_deref()])
        .flatten()
        .collect();

    if declared.is_empty() {
        return Checked::not_applicable("no distribution formats to assess");
    }
    if let Some(f) = declared.iter().find(|v| is_open_format(v)) {
        return Checked::pass(format!("open, non-proprietary format available ({f})"));
    }
    if let Some(f) = declared.iter().find(|v| is_proprietary_format(v)) {
        return Checked::partial(format!(
            "only proprietary machine-readable formats available ({f})"
        ));
    }
    Checked::fail("declared formats are neither open nor machine-readable")
}

fn shared_vocabularies(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    // References expected to point at shared vocabularies when given as IRIs.
    let candidates: Vec<&Reference> = record
        .license
        .iter()
        .chain(record.access_rights.iter())
        .chain(record.themes.iter())
        .chain(record.source.iter())
        .chain(record.is_part_of.iter())
        .collect();

    let agent_iris = record
        .attributions
        .iter()
        .filter(|a| a.agent.is_resolvable())
        .count();
    let agent_literals = record.attributions.len() - agent_iris;

    let iris = candidates.iter().filter(|r| r.is_iri()).count() + agent_iris;
    let literals = candidates.iter().filter(|r| !r.is_iri()).count() + agent_literals;

    if iris + literals == 0 {
        return Checked::fail("no candidate references declared");
    }
    if iris == 0 {
        Checked::fail("no declared reference uses an IRI; shared vocabularies are absent")
    } else if literals == 0 {
        Checked::pass(format!("all {iris} declared references are IRIs"))
    } else if iris > literals {
        Checked::partial(format!(
            "most declared references are IRIs ({iris} of {})",
            iris + literals
        ))
    } else {
        Checked::fail(format!(
            "literals outweigh IRIs among declared references ({literals} of {})",
            iris + literals
        ))
    }
}

fn qualified_references(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let count = record.is_part_of.len()
        + record.has_part.len()
        + usize::from(record.source.is_some());
    if count > 0 {
        Checked::pass(format!("{count} qualified reference(s) to other (meta)data"))
    } else {
        Checked::fail("no references to related datasets or sources")
    }
}

fn usage_license(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    match &record.license {
        None => Checked::fail("no data-usage license declared"),
        Some(Reference::Iri(iri)) => {
            Checked::pass(format!("machine-readable license declared ({iri})"))
        }
        Some(Reference::Literal(_)) => {
            Checked::partial("license declared as literal text; present but not machine-readable")
        }
    }
}

fn provenance(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    let temporal_coverage = matches!(
        record.temporal,
        Some(Extent::Period { .. }) | Some(Extent::Value(_))
    );
    let signals = [
        !record.attributions.is_empty(),
        temporal_coverage,
        record.spatial.is_some(),
        record.created.is_some() || record.issued.is_some(),
    ]
    .into_iter()
    .filter(|s| *s)
    .count();

    match signals {
        0 => Checked::fail("no provenance information: no attribution, coverage or dates"),
        1 | 2 => Checked::partial(format!("{signals} of 4 provenance signals present")),
        _ => Checked::pass(format!("{signals} of 4 provenance signals present")),
    }
}

fn cited_source(record: &MetadataRecord, _resolver: &dyn AgentResolver) -> Checked {
    match &record.source {
        None => Checked::not_applicable("no source declared; nothing to assess"),
        Some(Reference::Iri(iri)) => Checked::pass(format!("source cited by IRI ({iri})")),
        Some(Reference::Literal(_)) => {
            Checked::partial("source cited as free text rather than an identifier")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Distribution;
    use crate::resolver::OfflineResolver;
    use crate::types::Verdict;

    fn record_with_identifier(id: &str) -> MetadataRecord {
        MetadataRecord {
            identifier: Some(id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_doi_identifier_passes() {
        let record = record_with_identifier("https://doi.org/10.1000/182");
        let checked = persistent_identifier(&record, &OfflineResolver);
        assert_eq!(checked.verdict, Verdict::Pass);
    }

    #[test]
    fn test_plain_url_identifier_is_partial() {
        let record = record_with_identifier("https://data.example.org/dataset/1");
        let checked = persistent_identifier(&record, &OfflineResolver);
        assert_eq!(checked.verdict, Verdict::PartialPass);
    }

    #[test]
    fn test_missing_identifier_fails() {
        let checked = persistent_identifier(&MetadataRecord::default(), &OfflineResolver);
        assert_eq!(checked.verdict, Verdict::Fail);
    }

    #[test]
    fn test_empty_identifier_fails_like_absent() {
        let record = record_with_identifier("  ");
        let checked = persistent_identifier(&record, &OfflineResolver);
        assert_eq!(checked.verdict, Verdict::Fail);
    }

    #[test]
    fn test_literal_license_is_the_partial_pass_case() {
        let record = MetadataRecord {
            license: Some(Reference::parse("All rights reserved")),
            ..Default::default()
        };
        let checked = usage_license(&record, &OfflineResolver);
        assert_eq!(checked.verdict, Verdict::PartialPass);
        assert!(checked.explanation.contains("not machine-readable"));
    }

    #[test]
    fn test_iri_license_passes() {
        let record = MetadataRecord {
            license: Some(Reference::parse("https://creativecommons.org/licenses/by/4.0/")),
            ..Default::default()
        };
        assert_eq!(usage_license(&record, &OfflineResolver).verdict, Verdict::Pass);
    }

    #[test]
    fn test_media_type_beats_extension_in_format_check() {
        let by_media_type = MetadataRecord {
            distributions: vec![Distribution {
                media_type: Some("text/csv".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let by_extension = MetadataRecord {
            distributions: vec![Distribution {
                format: Some("csv".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            machine_readable_format(&by_media_type, &OfflineResolver).verdict,
            Verdict::Pass
        );
        assert_eq!(
            machine_readable_format(&by_extension, &OfflineResolver).verdict,
            Verdict::PartialPass
        );
    }

    #[test]
    fn test_shared_vocabularies_grading() {
        let all_iris = MetadataRecord {
            license: Some(Reference::parse("https://creativecommons.org/licenses/by/4.0/")),
            themes: vec![Reference::parse("https://vocab.example.org/theme/health")],
            ..Default::default()
        };
        assert_eq!(
            shared_vocabularies(&all_iris, &OfflineResolver).verdict,
            Verdict::Pass
        );

        let mostly_literals = MetadataRecord {
            license: Some(Reference::parse("see website")),
            themes: vec![Reference::parse("health")],
            ..Default::default()
        };
        assert_eq!(
            shared_vocabularies(&mostly_literals, &OfflineResolver).verdict,
            Verdict::Fail
        );
    }

    #[test]
    fn test_declared_closed_access_is_partial_not_fail() {
        let record = MetadataRecord {
            themes: vec![Reference::parse(
                "https://linked.data.gov.au/def/data-access-rights/restricted",
            )],
            ..Default::default()
        };
        let checked = access_openness(&record, &OfflineResolver);
        assert_eq!(checked.verdict, Verdict::PartialPass);
        assert!(checked.explanation.contains("restricted"));
    }

    #[test]
    fn test_open_access_passes() {
        let record = MetadataRecord {
            themes: vec![Reference::parse(
                "https://linked.data.gov.au/def/data-access-rights/open",
            )],
            ..Default::default()
        };
        assert_eq!(access_openness(&record, &OfflineResolver).verdict, Verdict::Pass);
    }

    #[test]
    fn test_proprietary_format_scores_lower_than_open() {
        let open = MetadataRecord {
            distributions: vec![Distribution {
                media_type: Some("text/csv".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let proprietary = MetadataRecord {
            distributions: vec![Distribution {
                format: Some("xlsx".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(open_format(&open, &OfflineResolver).verdict, Verdict::Pass);
        assert_eq!(
            open_format(&proprietary, &OfflineResolver).verdict,
            Verdict::PartialPass
        );
        assert_eq!(
            open_format(&MetadataRecord::default(), &OfflineResolver).verdict,
            Verdict::NotApplicable
        );
    }

    #[test]
    fn test_absent_source_is_not_applicable() {
        let checked = cited_source(&MetadataRecord::default(), &OfflineResolver);
        assert_eq!(checked.verdict, Verdict::NotApplicable);
    }

    #[test]
    fn test_distributions_without_urls_are_partial() {
        let record = MetadataRecord {
            distributions: vec![Distribution {
                format: Some("csv".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            retrievable_distribution(&record, &OfflineResolver).verdict,
            Verdict::PartialPass
        );
    }
}
