use serde::{Deserialize, Serialize};

/// Configuration for an [`Authorizer`](crate::Authorizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizerConfig {
    /// Memoize decisions per resolved goal (default: true)
    pub cache_decisions: bool,

    /// Initial capacity of the decision cache (default: 256)
    pub cache_capacity: usize,

    /// Emit a debug event for every denied query (default: true)
    pub log_denials: bool,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            cache_decisions: true,
            cache_capacity: 256,
            log_denials: true,
        }
    }
}

impl AuthorizerConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable decision caching
    pub fn with_cache_decisions(mut self, enabled: bool) -> Self {
        self.cache_decisions = enabled;
        self
    }

    /// Set the initial cache capacity
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Enable or disable denial logging
    pub fn with_log_denials(mut self, enabled: bool) -> Self {
        self.log_denials = enabled;
        self
    }
}
