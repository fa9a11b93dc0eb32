//! Readiness cache
//!
//! An explicit cache object injected into the service and parameterized by
//! capacity and TTL — never process-global state. A multi-instance
//! deployment that needs shared caching swaps this for a shared store
//! behind the same surface.

use ckb_readiness::FlowReadiness;
use ckb_registry::Flow;
use moka::sync::Cache;
use std::time::Duration;
use uuid::Uuid;

/// Per-(company, flow) cache of computed readiness verdicts
///
/// Entries are invalidated per company whenever the service applies a
/// write; time-based expiration covers mutations made outside the
/// service.
#[derive(Debug, Clone)]
pub struct ReadinessCache {
    inner: Cache<(Uuid, Flow), FlowReadiness>,
}

impl ReadinessCache {
    /// Create a cache with max capacity and no time-based expiration
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create a cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Cached verdict for a company and flow
    #[inline]
    #[must_use]
    pub fn get(&self, company_id: Uuid, flow: Flow) -> Option<FlowReadiness> {
        self.inner.get(&(company_id, flow))
    }

    /// Store a verdict
    #[inline]
    pub fn insert(&self, company_id: Uuid, flow: Flow, readiness: FlowReadiness) {
        self.inner.insert((company_id, flow), readiness);
    }

    /// Drop every flow's verdict for one company
    pub fn invalidate_company(&self, company_id: Uuid) {
        for flow in Flow::ALL {
            self.inner.invalidate(&(company_id, flow));
        }
    }

    /// Number of cached entries
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for ReadinessCache {
    fn default() -> Self {
        Self::with_ttl(10_000, Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ckb_readiness::empty_readiness;

    #[test]
    fn insert_and_get() {
        let cache = ReadinessCache::new(100);
        let company = Uuid::new_v4();

        assert!(cache.get(company, Flow::Strategy).is_none());
        cache.insert(company, Flow::Strategy, empty_readiness(Flow::Strategy));
        assert!(cache.get(company, Flow::Strategy).is_some());
    }

    #[test]
    fn invalidate_is_per_company() {
        let cache = ReadinessCache::new(100);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        cache.insert(a, Flow::Strategy, empty_readiness(Flow::Strategy));
        cache.insert(b, Flow::Strategy, empty_readiness(Flow::Strategy));

        cache.invalidate_company(a);

        assert!(cache.get(a, Flow::Strategy).is_none());
        assert!(cache.get(b, Flow::Strategy).is_some());
    }

    #[test]
    fn flows_are_cached_independently() {
        let cache = ReadinessCache::new(100);
        let company = Uuid::new_v4();
        cache.insert(company, Flow::GapIa, empty_readiness(Flow::GapIa));
        assert!(cache.get(company, Flow::GapFull).is_none());
    }
}
