//! Time-bounded cache with an injected clock
//!
//! Lookup front-ends keep recently loaded snapshots here. The cache is an
//! explicit object owned by its caller; the engine never holds one.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Default time-to-live for cached lookups
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Source of the current time
///
/// Injected into [`TtlCache`] so expiry can be tested without sleeping.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Map whose entries expire `ttl` after insertion
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tariffwatch_core::cache::{SystemClock, TtlCache};
///
/// let mut cache = TtlCache::new(Duration::from_secs(60), SystemClock);
/// cache.insert("exports/hts.csv".to_string(), 42);
/// assert_eq!(cache.get(&"exports/hts.csv".to_string()), Some(&42));
/// ```
pub struct TtlCache<K, V, C: Clock = SystemClock> {
    entries: HashMap<K, Entry<V>>,
    ttl: Duration,
    clock: C,
}

impl<K: Eq + Hash, V> TtlCache<K, V, SystemClock> {
    /// Cache with the default one-hour TTL and the system clock
    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL, SystemClock)
    }
}

impl<K: Eq + Hash, V, C: Clock> TtlCache<K, V, C> {
    pub fn new(ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &Entry<V>) -> bool {
        self.clock.now().saturating_duration_since(entry.inserted_at) < self.ttl
    }

    /// Value for `key` if present and not yet expired
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| &entry.value)
    }

    /// Insert or replace, restarting the entry's TTL
    pub fn insert(&mut self, key: K, value: V) {
        let inserted_at = self.clock.now();
        self.entries.insert(key, Entry { value, inserted_at });
    }

    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.inserted_at) < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct ManualClock {
        base: Instant,
        offset: Rc<Cell<Duration>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Rc::new(Cell::new(Duration::ZERO)),
            }
        }

        fn advance(&self, by: Duration) {
            self.offset.set(self.offset.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + self.offset.get()
        }
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::new(Duration::from_secs(10), clock.clone());
        cache.insert("a", 1);

        clock.advance(Duration::from_secs(9));
        assert_eq!(cache.get(&"a"), Some(&1));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn test_reinsert_restarts_ttl() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::new(Duration::from_secs(10), clock.clone());
        cache.insert("a", 1);
        clock.advance(Duration::from_secs(8));
        cache.insert("a", 2);
        clock.advance(Duration::from_secs(8));
        assert_eq!(cache.get(&"a"), Some(&2));
    }

    #[test]
    fn test_purge_expired() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::new(Duration::from_secs(10), clock.clone());
        cache.insert("old", 1);
        clock.advance(Duration::from_secs(11));
        cache.insert("new", 2);

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.invalidate(&"new"), Some(2));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_default_ttl_is_one_hour() {
        let cache: TtlCache<String, u32> = TtlCache::with_default_ttl();
        assert_eq!(cache.ttl(), Duration::from_secs(3600));
    }
}
