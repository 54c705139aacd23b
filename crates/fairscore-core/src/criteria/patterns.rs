//! Shared detection tables for criteria.
//!
//! Indicator lists and format tables used by more than one criterion live
//! here so the check functions stay declarative.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Substrings that mark an identifier as a persistent scheme (DOI, ARK,
/// PURL, Handle, w3id, AGLDWG persistent identifiers).
pub const PID_INDICATORS: &[&str] = &[
    "doi:",
    "doi.org",
    "ark:",
    "purl.org",
    "linked.data.gov.au",
    "handle.net",
    "w3id.org",
];

/// Data-access-rights vocabulary namespace.
pub const DATA_ACCESS_RIGHTS_NS: &str = "https://linked.data.gov.au/def/data-access-rights/";

/// Access classifications that grant full, partial, or no openness credit.
pub const ACCESS_OPEN: &[&str] = &["open"];
pub const ACCESS_PARTIAL: &[&str] = &["conditional", "embargoed", "metadata-only"];
pub const ACCESS_CLOSED: &[&str] = &["protected", "restricted"];

lazy_static! {
    /// File-extension labels considered machine-readable, with their media
    /// types. A declared media type scores higher than a bare extension.
    pub static ref MACHINE_READABLE_FORMATS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("json", "application/json");
        m.insert("xml", "application/xml");
        m.insert("csv", "text/csv");
        m.insert("tsv", "text/tab-separated-values");
        m.insert("yaml", "application/x-yaml");
        m.insert("yml", "application/x-yaml");
        m.insert("rdf", "application/rdf+xml");
        m.insert("ttl", "text/turtle");
        m.insert("jsonld", "application/ld+json");
        m.insert("geojson", "application/geo+json");
        m.insert("gml", "application/gml+xml");
        m.insert("kml", "application/vnd.google-earth.kml+xml");
        m.insert("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
        m.insert("xls", "application/vnd.ms-excel");
        m.insert("ods", "application/vnd.oasis.opendocument.spreadsheet");
        m
    };

    /// Local Contexts notice flagging incomplete attribution.
    pub static ref ATTRIBUTION_INCOMPLETE: Regex =
        Regex::new(r"(?i)attribution\s+incomplete").unwrap();

    /// Notices flagging incomplete data-management information.
    pub static ref INCOMPLETE_MANAGEMENT: Regex = Regex::new(
        r"(?i)(incomplete|unverified|pending)\s+(data[\s-]management|metadata|provenance|records?)"
    ).unwrap();

    /// Benefit-sharing and community-use language in notes/rights text.
    pub static ref BENEFIT_LANGUAGE: Regex = Regex::new(
        r"(?i)\b(benefit|reuse|re-use|community|engagement|shar(e|ing|ed))\b"
    ).unwrap();
}

/// Machine-readable formats that are nevertheless proprietary; open formats
/// score higher under format-openness checks.
pub const PROPRIETARY_FORMATS: &[&str] = &[
    "xlsx",
    "xls",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

/// Whether a declared media type is in the machine-readable set.
pub fn is_machine_readable_media_type(value: &str) -> bool {
    MACHINE_READABLE_FORMATS
        .values()
        .any(|mt| value.eq_ignore_ascii_case(mt))
}

/// Whether a declared format label is a machine-readable file extension.
pub fn is_machine_readable_extension(value: &str) -> bool {
    MACHINE_READABLE_FORMATS
        .keys()
        .any(|ext| value.eq_ignore_ascii_case(ext))
}

/// Whether a declared format (extension or media type) is proprietary.
pub fn is_proprietary_format(value: &str) -> bool {
    PROPRIETARY_FORMATS
        .iter()
        .any(|f| value.eq_ignore_ascii_case(f))
}

/// Whether a declared format is machine-readable and non-proprietary.
pub fn is_open_format(value: &str) -> bool {
    (is_machine_readable_media_type(value) || is_machine_readable_extension(value))
        && !is_proprietary_format(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_beats_extension() {
        assert!(is_machine_readable_media_type("text/csv"));
        assert!(!is_machine_readable_media_type("csv"));
        assert!(is_machine_readable_extension("csv"));
    }

    #[test]
    fn test_attribution_incomplete_notice_matches() {
        assert!(ATTRIBUTION_INCOMPLETE.is_match("Attribution Incomplete: collected 1910-1940"));
        assert!(ATTRIBUTION_INCOMPLETE.is_match("attribution incomplete"));
        assert!(!ATTRIBUTION_INCOMPLETE.is_match("attribution complete"));
    }

    #[test]
    fn test_incomplete_management_notice_matches() {
        assert!(INCOMPLETE_MANAGEMENT.is_match("Incomplete data management history"));
        assert!(INCOMPLETE_MANAGEMENT.is_match("unverified provenance"));
    }
}
