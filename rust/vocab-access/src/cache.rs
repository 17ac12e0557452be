use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::trace;

use crate::goal::Goal;

/// A thread-safe memo of decisions keyed by resolved goal.
///
/// Entries never expire; the whole cache is dropped together with the
/// capability store it was computed from.
pub struct DecisionCache {
    decisions: Mutex<HashMap<Goal, bool>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for DecisionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionCache")
            .field("decisions", &self.len())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for DecisionCache {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl DecisionCache {
    /// Creates an empty cache with room for `capacity` decisions before it
    /// reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            decisions: Mutex::new(HashMap::with_capacity(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Looks up a decision, counting the hit or miss.
    pub fn get(&self, goal: &Goal) -> Option<bool> {
        let decision = self.decisions.lock().get(goal).copied();
        match decision {
            Some(allowed) => {
                trace!(%goal, allowed, "Decision cache hit");
                self.hits.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
            }
        }
        decision
    }

    pub fn insert(&self, goal: Goal, allowed: bool) {
        self.decisions.lock().insert(goal, allowed);
    }

    /// Returns the cached decision for `goal`, computing and storing it with
    /// `decide` on a miss.
    ///
    /// The lock is not held while `decide` runs, so two threads missing on
    /// the same goal may both compute it; both store the same answer.
    pub fn get_or_insert_with(&self, goal: &Goal, decide: impl FnOnce() -> bool) -> bool {
        if let Some(allowed) = self.get(goal) {
            return allowed;
        }
        let allowed = decide();
        self.insert(goal.clone(), allowed);
        allowed
    }

    pub fn len(&self) -> usize {
        self.decisions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

/// Counters describing the work done by the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Queries answered from the cache.
    pub hits: u64,
    /// Queries that missed the cache.
    pub misses: u64,
    /// Goals run through the evaluator.
    pub evaluations: u64,
    /// Decisions currently cached.
    pub entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::Permissions;
    use crate::topic::{Domain, Topic};

    fn goal() -> Goal {
        Goal::new(Topic::Domain(Domain::Rdf), Permissions::R)
    }

    #[test]
    fn test_hit_and_miss_counters() {
        let cache = DecisionCache::default();
        assert_eq!(cache.get(&goal()), None);
        cache.insert(goal(), true);
        assert_eq!(cache.get(&goal()), Some(true));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_or_insert_with_decides_once() {
        let cache = DecisionCache::with_capacity(4);
        let mut calls = 0;
        for _ in 0..3 {
            let allowed = cache.get_or_insert_with(&goal(), || {
                calls += 1;
                false
            });
            assert!(!allowed);
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.hits(), 2);
    }
}
