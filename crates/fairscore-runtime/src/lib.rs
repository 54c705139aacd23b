//! # fairscore-runtime
//!
//! Async agent resolution for fairscore.
//!
//! The core engine in `fairscore-core` is fully deterministic and never
//! performs I/O; this crate supplies the one suspending dependency — the
//! indigeneity catalogue lookup — and the machinery around it:
//!
//! - [`CatalogueClient`]: the catalogue query contract, with an HTTP
//!   implementation ([`HttpCatalogue`]).
//! - [`CachingResolver`]: per-run cache with coalesced loads, so N
//!   concurrent criteria referencing the same agent trigger exactly one
//!   external call.
//! - [`ScoreOrchestrator`]: concurrent fan-out of lookups under per-lookup
//!   and per-run deadlines, feeding a frozen snapshot to the core.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fairscore_core::{MetadataRecord, Scheme};
//! use fairscore_runtime::{HttpCatalogue, RuntimeConfig, ScoreOrchestrator};
//!
//! let catalogue = HttpCatalogue::new("https://catalogue.example.org");
//! let orchestrator = ScoreOrchestrator::new(catalogue, RuntimeConfig::default());
//!
//! let record = MetadataRecord::from_json_file("dataset.json")?;
//! let report = orchestrator.compute(Scheme::Care, &record).await?;
//! ```

pub mod catalogue;
mod config;
mod orchestrator;
mod resolver;

pub use catalogue::{
    CatalogueClient, CatalogueEntry, CatalogueError, HttpCatalogue, CATALOGUE_TOKEN_ENV,
};
pub use config::RuntimeConfig;
pub use orchestrator::{ResolvedAgents, ScoreOrchestrator};
pub use resolver::{CachingResolver, ResolverStats};
