use chrono::{DateTime, TimeDelta, Utc};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// A cached payload with its expiry instant
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, now: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Self {
            data,
            expires_at: now + ttl,
        }
    }

    /// Valid through `expires_at` inclusive
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Bounded map that evicts in insertion order
///
/// Keys are tracked in a queue alongside the map; the front of the queue is
/// the oldest insertion still present.
#[derive(Debug)]
pub struct BoundedTable<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K, V> BoundedTable<K, V>
where
    K: Copy + Eq + Hash,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let removed = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Drop every entry expired at `now`, returning how many were removed
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let entries = &self.entries;
        self.order.retain(|key| entries.contains_key(key));
        before - self.entries.len()
    }

    /// Insert `entry`. A full table is purged of expired entries first;
    /// if a new key still would exceed the bound, the oldest insertion is
    /// evicted and returned.
    pub fn insert(&mut self, key: K, entry: CacheEntry<V>, now: DateTime<Utc>) -> Option<K> {
        let mut evicted = None;

        if self.entries.len() >= self.capacity {
            self.purge_expired(now);
        }

        if self.remove(&key).is_none() && self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                evicted = Some(oldest);
            }
        }

        self.entries.insert(key, entry);
        self.order.push_back(key);
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: &str, now: DateTime<Utc>, ttl_secs: i64) -> CacheEntry<String> {
        CacheEntry::new(value.to_string(), now, TimeDelta::seconds(ttl_secs))
    }

    #[test]
    fn test_entry_valid_through_expiry_instant() {
        let now = Utc::now();
        let e = entry("a", now, 60);
        assert!(!e.is_expired(now));
        assert!(!e.is_expired(now + TimeDelta::seconds(60)));
        assert!(e.is_expired(now + TimeDelta::seconds(60) + TimeDelta::milliseconds(1)));
    }

    #[test]
    fn test_evicts_oldest_insertion_at_capacity() {
        let now = Utc::now();
        let mut table = BoundedTable::new(3);
        for id in 1..=3u64 {
            assert_eq!(table.insert(id, entry("x", now, 300), now), None);
        }

        let evicted = table.insert(4, entry("x", now, 300), now);
        assert_eq!(evicted, Some(1));
        assert_eq!(table.len(), 3);
        assert!(!table.contains(&1));
        assert!(table.contains(&2) && table.contains(&3) && table.contains(&4));
    }

    #[test]
    fn test_purges_expired_before_evicting() {
        let now = Utc::now();
        let mut table = BoundedTable::new(3);
        table.insert(1u64, entry("fresh", now, 300), now);
        table.insert(2, entry("short", now, 10), now);
        table.insert(3, entry("fresh", now, 300), now);

        let later = now + TimeDelta::seconds(11);
        let evicted = table.insert(4, entry("new", later, 300), later);
        assert_eq!(evicted, None);
        assert_eq!(table.len(), 3);
        assert!(table.contains(&1));
        assert!(!table.contains(&2));
    }

    #[test]
    fn test_replacing_existing_key_does_not_evict() {
        let now = Utc::now();
        let mut table = BoundedTable::new(2);
        table.insert(1u64, entry("a", now, 300), now);
        table.insert(2, entry("b", now, 300), now);

        assert_eq!(table.insert(1, entry("a2", now, 300), now), None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&1).map(|e| e.data.as_str()), Some("a2"));

        // 1 was re-inserted, so 2 is now the oldest
        assert_eq!(table.insert(3, entry("c", now, 300), now), Some(2));
    }

    #[test]
    fn test_replacing_in_full_table_purges_expired() {
        let now = Utc::now();
        let mut table = BoundedTable::new(3);
        table.insert(1u64, entry("short", now, 10), now);
        table.insert(2, entry("b", now, 300), now);
        table.insert(3, entry("c", now, 300), now);

        let later = now + TimeDelta::seconds(11);
        assert_eq!(table.insert(2, entry("b2", later, 300), later), None);
        assert_eq!(table.len(), 2);
        assert!(!table.contains(&1));
        assert_eq!(table.get(&2).map(|e| e.data.as_str()), Some("b2"));
    }

    #[test]
    fn test_clear() {
        let now = Utc::now();
        let mut table = BoundedTable::new(2);
        table.insert(1u64, entry("a", now, 300), now);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.insert(2, entry("b", now, 300), now), None);
    }
}
