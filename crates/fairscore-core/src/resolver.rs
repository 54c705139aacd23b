//! Agent resolution seam.
//!
//! Criteria consume resolution through this synchronous trait; the async
//! catalogue client, cache, and coalescing live in `fairscore-runtime`, which
//! hands the core a pre-resolved snapshot.
//!
//! # Contract
//! - `resolve` never fails: lookup problems are carried inside the returned
//!   [`Agent`] (`lookup_error`), so criteria can degrade to Indeterminate.
//! - Implementations must be pure for the duration of one scoring run: the
//!   same ref always yields the same agent within a run.

use crate::record::AgentRef;
use crate::types::Agent;

/// Resolves an [`AgentRef`] to identity facts.
pub trait AgentResolver: Send + Sync {
    fn resolve(&self, agent_ref: &AgentRef) -> Agent;
}

/// Resolver for offline runs: every agent is Unknown/Unresolved, with no
/// lookup error. Status-dependent criteria degrade to PartialPass, never
/// Indeterminate, because nothing failed.
pub struct OfflineResolver;

impl AgentResolver for OfflineResolver {
    fn resolve(&self, agent_ref: &AgentRef) -> Agent {
        Agent::unresolved(agent_ref.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentSource, IndigeneityStatus};

    #[test]
    fn test_offline_resolver_is_unknown_without_error() {
        let agent = OfflineResolver.resolve(&AgentRef::parse("https://example.org/agent/1"));
        assert_eq!(agent.status, IndigeneityStatus::Unknown);
        assert_eq!(agent.source, AgentSource::Unresolved);
        assert!(agent.lookup_error.is_none());
    }
}
