//! Bounded least-frequently-used cache.
//!
//! Used by extraction runs to remember term ids. Eviction removes the entry
//! with the fewest hits; among equals, the one touched longest ago.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    hits: u64,
    tick: u64,
}

/// A bounded map that evicts its least-frequently-used entry.
#[derive(Debug, Clone)]
pub struct LfuCache<K, V> {
    capacity: usize,
    slots: HashMap<K, Slot<V>>,
    // (hits, tick) -> key; the first entry is the next eviction victim.
    order: BTreeMap<(u64, u64), K>,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq + Clone, V: Clone> LfuCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A zero capacity stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: HashMap::with_capacity(capacity.min(1024)),
            order: BTreeMap::new(),
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Look up a key, counting a hit or a miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let tick = self.next_tick();
        let Some(slot) = self.slots.get_mut(key) else {
            self.misses += 1;
            return None;
        };

        self.order.remove(&(slot.hits, slot.tick));
        slot.hits += 1;
        slot.tick = tick;
        self.order.insert((slot.hits, slot.tick), key.clone());
        self.hits += 1;
        Some(slot.value.clone())
    }

    /// Insert or overwrite a value, evicting if the cache is full.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let tick = self.next_tick();

        if let Some(slot) = self.slots.get_mut(&key) {
            slot.value = value;
            return;
        }

        if self.slots.len() >= self.capacity {
            if let Some((_, victim)) = self.order.pop_first() {
                self.slots.remove(&victim);
            }
        }

        self.order.insert((0, tick), key.clone());
        self.slots.insert(
            key,
            Slot {
                value,
                hits: 0,
                tick,
            },
        );
    }

    /// Whether the key is cached. Does not count as a use.
    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lookups that found a value.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that found nothing.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_counts_hits_and_misses() {
        let mut cache = LfuCache::new(4);
        assert_eq!(cache.get(&"therapy"), None);
        cache.insert("therapy", 7);
        assert_eq!(cache.get(&"therapy"), Some(7));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn test_evicts_least_frequently_used() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"b");

        cache.insert("c", 3);
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_ties_evict_oldest() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let mut cache = LfuCache::new(1);
        cache.insert("a", 1);
        cache.insert("a", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"a"), Some(2));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = LfuCache::new(0);
        cache.insert("a", 1);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 0);
    }
}
