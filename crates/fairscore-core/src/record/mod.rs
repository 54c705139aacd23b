//! Metadata record model and document parsing.
//!
//! Records arrive as normalized JSON/YAML documents produced by external
//! loaders and are validated against a JSON Schema on request.

mod parser;
pub mod schema;

pub use parser::{
    AgentRef, Attribution, AttributionRole, Distribution, Extent, MetadataRecord, RecordError,
    Reference,
};
