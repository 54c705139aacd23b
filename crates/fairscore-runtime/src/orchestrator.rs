//! Scoring orchestrator: concurrent agent resolution feeding the
//! deterministic core.
//!
//! The orchestrator pre-scans the record for distinct resolvable refs, fans
//! their lookups out concurrently through the coalescing cache, and hands
//! the synchronous core a frozen [`ResolvedAgents`] snapshot. Concurrency
//! affects latency only: the Report's ordering comes from the core's
//! criterion registry, never from resolution completion order.

use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use fairscore_core::{
    Agent, AgentRef, AgentResolver, MetadataRecord, Report, Scheme, ScoreError, ScoringConfig,
};

use crate::catalogue::CatalogueClient;
use crate::config::RuntimeConfig;
use crate::resolver::{CachingResolver, ResolverStats};

/// Pre-resolved agent snapshot handed to the core.
///
/// Frozen before evaluation starts, so criteria see identical answers no
/// matter how they interleave.
pub struct ResolvedAgents {
    agents: HashMap<AgentRef, Agent>,
}

impl AgentResolver for ResolvedAgents {
    fn resolve(&self, agent_ref: &AgentRef) -> Agent {
        if let Some(agent) = self.agents.get(agent_ref) {
            return agent.clone();
        }
        match agent_ref {
            AgentRef::Name(_) => Agent::unresolved(agent_ref.clone()),
            AgentRef::Iri(_) => Agent::failed(
                agent_ref.clone(),
                "agent was not resolved before evaluation",
            ),
        }
    }
}

/// Orchestrates one or more scoring runs against a catalogue.
pub struct ScoreOrchestrator<C> {
    resolver: Arc<CachingResolver<C>>,
    config: RuntimeConfig,
}

impl<C: CatalogueClient> ScoreOrchestrator<C> {
    pub fn new(catalogue: C, config: RuntimeConfig) -> Self {
        let resolver = Arc::new(CachingResolver::new(catalogue, config.cache_capacity));
        Self { resolver, config }
    }

    /// Score one record with default scoring configuration.
    pub async fn compute(
        &self,
        scheme: Scheme,
        record: &MetadataRecord,
    ) -> Result<Report, ScoreError> {
        self.compute_with_config(scheme, record, &ScoringConfig::default())
            .await
    }

    /// Score one record with an explicit [`ScoringConfig`].
    pub async fn compute_with_config(
        &self,
        scheme: Scheme,
        record: &MetadataRecord,
        scoring: &ScoringConfig,
    ) -> Result<Report, ScoreError> {
        let refs = distinct_resolvable_refs(record);
        let resolved = self.resolve_all(refs).await;
        fairscore_core::compute_score_with_config(scheme, record, &resolved, scoring)
    }

    /// Resolve every ref concurrently under the run deadline.
    ///
    /// Lookups exceeding `lookup_timeout` fail individually; when the run
    /// deadline expires, all in-flight lookups are abandoned and the
    /// remaining refs are marked cancelled. Both cases surface as
    /// Indeterminate verdicts, never as hangs.
    async fn resolve_all(&self, refs: Vec<AgentRef>) -> ResolvedAgents {
        let lookup_timeout = self.config.lookup_timeout;
        let deadline = tokio::time::sleep(self.config.run_timeout);
        tokio::pin!(deadline);

        let mut pending: FuturesUnordered<_> = refs
            .iter()
            .cloned()
            .map(|agent_ref| {
                let resolver = Arc::clone(&self.resolver);
                async move {
                    let agent =
                        match tokio::time::timeout(lookup_timeout, resolver.resolve(&agent_ref))
                            .await
                        {
                            Ok(agent) => agent,
                            Err(_) => Agent::failed(
                                agent_ref.clone(),
                                format!("catalogue lookup timed out after {lookup_timeout:?}"),
                            ),
                        };
                    (agent_ref, agent)
                }
            })
            .collect();

        let mut agents = HashMap::with_capacity(refs.len());
        loop {
            tokio::select! {
                _ = &mut deadline => {
                    tracing::warn!(
                        outstanding = pending.len(),
                        "run deadline exceeded; abandoning in-flight lookups"
                    );
                    break;
                }
                next = pending.next() => match next {
                    Some((agent_ref, agent)) => {
                        agents.insert(agent_ref, agent);
                    }
                    None => break,
                }
            }
        }
        drop(pending);

        for agent_ref in refs {
            agents
                .entry(agent_ref)
                .or_insert_with_key(|k| {
                    Agent::failed(k.clone(), "resolution cancelled before completion")
                });
        }

        ResolvedAgents { agents }
    }

    /// Lookup counters for the current run.
    pub fn stats(&self) -> ResolverStats {
        self.resolver.stats()
    }

    /// Timeout applied to a single lookup.
    pub fn lookup_timeout(&self) -> Duration {
        self.config.lookup_timeout
    }
}

/// Distinct resolvable refs in attribution declaration order. Bare literal
/// names are excluded: they never reach the catalogue.
fn distinct_resolvable_refs(record: &MetadataRecord) -> Vec<AgentRef> {
    let mut seen = std::collections::HashSet::new();
    record
        .attributions
        .iter()
        .map(|a| &a.agent)
        .filter(|r| r.is_resolvable())
        .filter(|r| seen.insert((*r).clone()))
        .cloned()
        .collect()
}
