//! Metadata record parsing from JSON/YAML documents.
//!
//! The record is the normalized interchange form produced by external
//! loaders; the core never fetches or parses raw DCAT/RDF documents.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a metadata document.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("failed to read metadata file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("document does not match the record schema: {0}")]
    SchemaError(String),
}

/// A reference that is either a dereferenceable IRI or a bare literal.
///
/// Several criteria hinge on this distinction (machine-readable licenses,
/// shared-vocabulary detection, source citation), so it is a sum type rather
/// than a string with a convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Iri(String),
    Literal(String),
}

impl Reference {
    pub fn parse(s: &str) -> Self {
        if looks_like_iri(s) {
            Reference::Iri(s.to_string())
        } else {
            Reference::Literal(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Reference::Iri(s) | Reference::Literal(s) => s,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Reference::Iri(_))
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Reference::parse(&s))
    }
}

/// Reference to an agent: a resolvable IRI, or a bare literal name.
///
/// A bare name is the known partial-identification case, not an error; it is
/// never sent to the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgentRef {
    Iri(String),
    Name(String),
}

impl AgentRef {
    pub fn parse(s: &str) -> Self {
        if looks_like_iri(s) {
            AgentRef::Iri(s.to_string())
        } else {
            AgentRef::Name(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AgentRef::Iri(s) | AgentRef::Name(s) => s,
        }
    }

    /// Whether this reference can be sent to the catalogue at all.
    pub fn is_resolvable(&self) -> bool {
        matches!(self, AgentRef::Iri(_))
    }
}

impl Serialize for AgentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AgentRef::parse(&s))
    }
}

fn looks_like_iri(s: &str) -> bool {
    s.starts_with("http://")
        || s.starts_with("https://")
        || s.starts_with("urn:")
        || s.starts_with("doi:")
        || s.starts_with("ark:")
}

/// Role an agent plays in a dataset attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributionRole {
    Custodian,
    RightsHolder,
    Originator,
    Owner,
    Publisher,
    Contributor,
    #[serde(other)]
    Other,
}

/// One qualified attribution: an agent in a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub role: AttributionRole,
    pub agent: AgentRef,
}

/// A distribution of the dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Distribution {
    /// Declared format, either a media type or a bare file-extension label.
    pub format: Option<String>,
    /// Declared IANA media type, when given separately from `format`.
    pub media_type: Option<String>,
    pub access_url: Option<String>,
    pub download_url: Option<String>,
}

impl Distribution {
    /// Derived: a distribution is downloadable when it carries any URL.
    pub fn downloadable(&self) -> bool {
        self.access_url.is_some() || self.download_url.is_some()
    }
}

/// A spatial or temporal extent: a period, or a single IRI/literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extent {
    Period {
        #[serde(default, with = "flex_date")]
        start: Option<NaiveDate>,
        #[serde(default, with = "flex_date")]
        end: Option<NaiveDate>,
    },
    Value(Reference),
}

/// Normalized, read-only view of one dataset description.
///
/// Immutable once constructed; all scoring is pure reads over it plus
/// external lookups. Absent fields are `None`/empty collections — never
/// empty-string sentinels — so criteria can tell "provided but empty" apart
/// from "not provided".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataRecord {
    /// Opaque identifier; required for reporting, not for scoring.
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(with = "flex_date")]
    pub created: Option<NaiveDate>,
    #[serde(with = "flex_date")]
    pub modified: Option<NaiveDate>,
    #[serde(with = "flex_date")]
    pub issued: Option<NaiveDate>,
    pub license: Option<Reference>,
    pub rights: Option<String>,
    pub access_rights: Option<Reference>,
    pub distributions: Vec<Distribution>,
    pub spatial: Option<Extent>,
    pub temporal: Option<Extent>,
    pub themes: Vec<Reference>,
    pub attributions: Vec<Attribution>,
    pub is_part_of: Vec<Reference>,
    pub has_part: Vec<Reference>,
    /// Cited upstream source of the data, when one is declared.
    pub source: Option<Reference>,
    pub notes: Vec<String>,
    /// Local-context annotations (e.g. an "Attribution Incomplete" notice).
    pub local_context: Vec<String>,
}

impl MetadataRecord {
    /// Parse a record from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a record from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, RecordError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from a file path, dispatching on the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_json_file(path),
        }
    }

    /// Attributions whose role is one of `roles`, in declaration order.
    pub fn attributions_with_role<'a>(
        &'a self,
        roles: &'a [AttributionRole],
    ) -> impl Iterator<Item = &'a Attribution> + 'a {
        self.attributions
            .iter()
            .filter(move |a| roles.contains(&a.role))
    }

    /// First local-context or note entry matching `pattern`.
    pub fn first_notice_match<'a>(&'a self, pattern: &regex::Regex) -> Option<&'a str> {
        self.local_context
            .iter()
            .chain(self.notes.iter())
            .map(String::as_str)
            .find(|s| pattern.is_match(s))
    }
}

/// Lenient date (de)serialization: accepts a date or the date prefix of a
/// datetime string.
mod flex_date {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        match value {
            None => Ok(None),
            Some(s) => {
                let prefix = s.get(..10).unwrap_or(s.as_str());
                NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("invalid date: {s}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_parse_distinguishes_iri_from_literal() {
        assert!(Reference::parse("https://example.org/license").is_iri());
        assert!(Reference::parse("doi:10.1000/182").is_iri());
        assert!(!Reference::parse("All rights reserved").is_iri());
    }

    #[test]
    fn test_agent_ref_literal_is_not_resolvable() {
        assert!(AgentRef::parse("https://example.org/agent/1").is_resolvable());
        assert!(!AgentRef::parse("AUGOV").is_resolvable());
    }

    #[test]
    fn test_record_from_json() {
        let record = MetadataRecord::from_json(
            r#"{
                "identifier": "https://data.example.org/dataset/1",
                "title": "Example dataset",
                "created": "2020-03-01T10:30:00Z",
                "license": "https://creativecommons.org/licenses/by/4.0/",
                "attributions": [
                    {"role": "rightsHolder", "agent": "https://example.org/agent/1"},
                    {"role": "custodian", "agent": "AUGOV"}
                ],
                "distributions": [{"format": "csv", "accessUrl": "https://example.org/d.csv"}]
            }"#,
        )
        .unwrap();

        assert_eq!(record.created, NaiveDate::from_ymd_opt(2020, 3, 1));
        assert!(record.license.as_ref().unwrap().is_iri());
        assert_eq!(record.attributions.len(), 2);
        assert!(!record.attributions[1].agent.is_resolvable());
        assert!(record.distributions[0].downloadable());
        // Absent fields stay absent, not defaulted to empty strings.
        assert!(record.description.is_none());
    }

    #[test]
    fn test_record_from_yaml() {
        let record = MetadataRecord::from_yaml(
            "identifier: https://data.example.org/dataset/2\n\
             description: ''\n\
             localContext:\n  - 'Attribution Incomplete: collected 1910-1940'\n",
        )
        .unwrap();

        // Present-but-empty is distinguishable from absent.
        assert_eq!(record.description.as_deref(), Some(""));
        assert!(record.title.is_none());
        assert_eq!(record.local_context.len(), 1);
    }

    #[test]
    fn test_unknown_attribution_role_maps_to_other() {
        let record = MetadataRecord::from_json(
            r#"{"attributions": [{"role": "stakeholder", "agent": "X"}]}"#,
        )
        .unwrap();
        assert_eq!(record.attributions[0].role, AttributionRole::Other);
    }

    #[test]
    fn test_invalid_date_is_a_parse_error() {
        let result = MetadataRecord::from_json(r#"{"created": "not-a-date"}"#);
        assert!(matches!(result, Err(RecordError::JsonError(_))));
    }

    #[test]
    fn test_temporal_period_extent() {
        let record = MetadataRecord::from_json(
            r#"{"temporal": {"start": "1910-01-01", "end": "1940-12-31"}}"#,
        )
        .unwrap();
        match record.temporal {
            Some(Extent::Period { start, end }) => {
                assert!(start.is_some());
                assert!(end.is_some());
            }
            other => panic!("expected period extent, got {other:?}"),
        }
    }
}
