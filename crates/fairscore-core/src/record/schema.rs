//! JSON Schema validation for metadata documents.
//!
//! Loaders may validate a raw document before constructing a record, so that
//! shape problems are reported against the document instead of surfacing as
//! serde errors deep in a field.

use jsonschema::Validator;
use lazy_static::lazy_static;
use serde_json::Value;

use super::RecordError;

/// Schema for the normalized metadata document.
const RECORD_SCHEMA: &str = r##"{
    "$schema": "https://json-schema.org/draft/2020-12/schema",
    "title": "Metadata record document",
    "type": "object",
    "properties": {
        "identifier": {"type": ["string", "null"]},
        "title": {"type": ["string", "null"]},
        "description": {"type": ["string", "null"]},
        "created": {"type": ["string", "null"]},
        "modified": {"type": ["string", "null"]},
        "issued": {"type": ["string", "null"]},
        "license": {"type": ["string", "null"]},
        "rights": {"type": ["string", "null"]},
        "accessRights": {"type": ["string", "null"]},
        "distributions": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "format": {"type": ["string", "null"]},
                    "mediaType": {"type": ["string", "null"]},
                    "accessUrl": {"type": ["string", "null"]},
                    "downloadUrl": {"type": ["string", "null"]}
                }
            }
        },
        "spatial": {},
        "temporal": {},
        "themes": {"type": "array", "items": {"type": "string"}},
        "attributions": {
            "type": "array",
            "items": {
                "type": "object",
                "required": ["role", "agent"],
                "properties": {
                    "role": {"type": "string"},
                    "agent": {"type": "string", "minLength": 1}
                }
            }
        },
        "isPartOf": {"type": "array", "items": {"type": "string"}},
        "hasPart": {"type": "array", "items": {"type": "string"}},
        "source": {"type": ["string", "null"]},
        "notes": {"type": "array", "items": {"type": "string"}},
        "localContext": {"type": "array", "items": {"type": "string"}}
    }
}"##;

lazy_static! {
    static ref VALIDATOR: Validator = {
        let schema: Value =
            serde_json::from_str(RECORD_SCHEMA).expect("embedded record schema is valid JSON");
        jsonschema::validator_for(&schema).expect("embedded record schema compiles")
    };
}

/// Validate a raw document against the record schema.
pub fn validate_document(document: &Value) -> Result<(), RecordError> {
    let errors: Vec<String> = VALIDATOR
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RecordError::SchemaError(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_document_passes() {
        let doc = json!({
            "identifier": "https://data.example.org/dataset/1",
            "title": "Example",
            "attributions": [{"role": "custodian", "agent": "https://example.org/agent/1"}]
        });
        assert!(validate_document(&doc).is_ok());
    }

    #[test]
    fn test_attribution_missing_agent_fails() {
        let doc = json!({"attributions": [{"role": "custodian"}]});
        let err = validate_document(&doc).unwrap_err();
        assert!(matches!(err, RecordError::SchemaError(_)));
    }

    #[test]
    fn test_empty_agent_ref_fails() {
        let doc = json!({"attributions": [{"role": "custodian", "agent": ""}]});
        assert!(validate_document(&doc).is_err());
    }

    #[test]
    fn test_wrong_type_fails() {
        let doc = json!({"themes": "not-an-array"});
        assert!(validate_document(&doc).is_err());
    }
}
