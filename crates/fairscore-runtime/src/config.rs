//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one scoring run's resolution phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Timeout for a single catalogue lookup (in seconds).
    #[serde(with = "duration_secs")]
    pub lookup_timeout: Duration,

    /// Overall deadline for the resolution phase (in seconds). When it
    /// expires, in-flight lookups are abandoned and the affected criteria
    /// resolve to Indeterminate.
    #[serde(with = "duration_secs")]
    pub run_timeout: Duration,

    /// Capacity of the per-run agent cache.
    pub cache_capacity: u64,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(5),
            run_timeout: Duration::from_secs(30),
            cache_capacity: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_json() {
        let config = RuntimeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.lookup_timeout, config.lookup_timeout);
        assert_eq!(parsed.cache_capacity, config.cache_capacity);
    }
}
