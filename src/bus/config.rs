//! Bus configuration.

use serde::{Deserialize, Serialize};

/// Default bound on how many follow-up levels one dispatch may cascade.
pub const DEFAULT_MAX_CASCADE_DEPTH: usize = 32;

/// Tunables for a `CommandBus`.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use cqrs_bus::BusConfig;
///
/// let config = BusConfig::from_json(r#"{ "max_cascade_depth": 4 }"#).unwrap();
/// assert_eq!(config.max_cascade_depth, 4);
///
/// let config = BusConfig::from_json("{}").unwrap();
/// assert_eq!(config, BusConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Follow-ups nested deeper than this fail with
    /// `BusError::CascadeLimitExceeded`. The top-level request is depth 0.
    pub max_cascade_depth: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            max_cascade_depth: DEFAULT_MAX_CASCADE_DEPTH,
        }
    }
}

impl BusConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_max_cascade_depth(mut self, depth: usize) -> Self {
        self.max_cascade_depth = depth;
        self
    }
}
