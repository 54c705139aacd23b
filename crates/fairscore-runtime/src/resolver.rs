//! Per-run agent resolution with caching and coalescing.
//!
//! One [`CachingResolver`] is constructed per scoring run, so cached answers
//! (including failures) never leak across invocations. Concurrent resolves
//! of the same ref coalesce into a single catalogue call.

use moka::future::Cache;
use parking_lot::RwLock;
use std::sync::Arc;

use fairscore_core::{Agent, AgentRef};

use crate::catalogue::CatalogueClient;

/// Lookup counters for one run, reported at debug level and available to
/// tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Catalogue queries actually sent (cache misses).
    pub queries: u64,
    /// Queries that failed after retries.
    pub failures: u64,
    /// Bare literal refs short-circuited without a lookup.
    pub literals: u64,
}

/// Caching, coalescing resolver over a [`CatalogueClient`].
///
/// # Shared-resource policy
/// The cache is the only mutable shared state in a run. Each distinct ref is
/// written at most once; concurrent resolvers for the same ref serialize
/// through the cache's coalesced load, so exactly one catalogue call is made
/// per distinct ref per run.
pub struct CachingResolver<C> {
    catalogue: Arc<C>,
    cache: Cache<AgentRef, Agent>,
    stats: RwLock<ResolverStats>,
}

impl<C: CatalogueClient> CachingResolver<C> {
    pub fn new(catalogue: C, cache_capacity: u64) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            cache: Cache::new(cache_capacity),
            stats: RwLock::new(ResolverStats::default()),
        }
    }

    /// Resolve one ref.
    ///
    /// Never fails: bare literal names return Unknown/Unresolved immediately
    /// (the expected partial-identification case), and catalogue failures are
    /// folded into the returned [`Agent`] and cached for the rest of the run
    /// to avoid repeated retries against a known-bad lookup.
    pub async fn resolve(&self, agent_ref: &AgentRef) -> Agent {
        let iri = match agent_ref {
            AgentRef::Name(_) => {
                self.stats.write().literals += 1;
                return Agent::unresolved(agent_ref.clone());
            }
            AgentRef::Iri(iri) => iri.clone(),
        };

        self.cache
            .get_with(agent_ref.clone(), self.load(agent_ref.clone(), iri))
            .await
    }

    async fn load(&self, agent_ref: AgentRef, iri: String) -> Agent {
        self.stats.write().queries += 1;
        tracing::debug!(iri = %iri, catalogue = self.catalogue.name(), "querying catalogue");

        match self.catalogue.query(&iri).await {
            Ok(entry) if entry.found => Agent::catalogued(
                agent_ref,
                entry
                    .indigeneity_status
                    .unwrap_or(fairscore_core::IndigeneityStatus::Unknown),
                entry.display_name,
            ),
            Ok(_) => Agent::not_found(agent_ref),
            Err(e) => {
                self.stats.write().failures += 1;
                tracing::warn!(iri = %iri, error = %e, "catalogue lookup failed");
                Agent::failed(agent_ref, e.to_string())
            }
        }
    }

    pub fn stats(&self) -> ResolverStats {
        *self.stats.read()
    }
}
