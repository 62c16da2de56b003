//! Hash map resolving collisions with one linked list per bucket.

use std::{fmt, mem};

use tracing::{debug, trace};

use crate::{
    DynamicArray,
    hash::{HashFn, sum_of_chars},
    linked_list::{self, LinkedList},
    prime::{next_prime, prime_capacity},
    table::{DEFAULT_CAPACITY, HashTable},
};

/// Load factor at which `put` doubles the table before inserting
pub const MAX_LOAD_FACTOR: f64 = 1.0;

/// A hash map using separate chaining.
///
/// Every bucket owns a [`LinkedList`]; colliding keys are appended to the same
/// chain and removal unlinks the node, so there are no tombstones. The capacity
/// is always prime and doubles once the map holds as many keys as buckets.
pub struct ChainingMap<V, H = HashFn> {
    /// One chain per bucket; its length always equals `capacity`
    buckets: DynamicArray<LinkedList<V>>,
    /// Number of buckets, always prime
    capacity: usize,
    /// Number of keys stored across all chains
    size: usize,
    /// Maps a key to its bucket before reduction modulo `capacity`
    hash_fn: H,
}

impl<V: fmt::Debug, H> fmt::Debug for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainingMap")
            .field("capacity", &self.capacity)
            .field("size", &self.size)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl<V> Default for ChainingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, sum_of_chars)
    }
}

impl<V, H> Extend<(String, V)> for ChainingMap<V, H>
where
    H: Fn(&str) -> u64,
{
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V, H> ChainingMap<V, H>
where
    H: Fn(&str) -> u64,
{
    /// Creates a map whose capacity is the first prime reached from `capacity`
    #[must_use]
    pub fn new(capacity: usize, hash_fn: H) -> Self {
        let capacity = next_prime(capacity);
        Self { buckets: Self::empty_chains(capacity), capacity, size: 0, hash_fn }
    }

    /// Allocates `capacity` empty chains
    fn empty_chains(capacity: usize) -> DynamicArray<LinkedList<V>> {
        (0..capacity).map(|_| LinkedList::new()).collect()
    }

    /// Gets the bucket index for a key
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    fn bucket_index(&self, key: &str) -> usize {
        let hash = (self.hash_fn)(key);
        (hash % self.capacity as u64) as usize
    }

    /// Gets the chain `key` belongs to; an index outside the table reads as no chain
    fn chain(&self, key: &str) -> Option<&LinkedList<V>> {
        self.buckets.get_at_index(self.bucket_index(key)).ok()
    }

    /// Mutable counterpart of [`chain`](Self::chain)
    fn chain_mut(&mut self, key: &str) -> Option<&mut LinkedList<V>> {
        let index = self.bucket_index(key);
        self.buckets.get_at_index_mut(index).ok()
    }

    /// Inserts a key-value pair, or replaces the value stored under the key.
    ///
    /// Returns the replaced value. The table is doubled first if its load has
    /// reached one key per bucket.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.resize_table(self.capacity.saturating_mul(2));
        }

        let chain = self.chain_mut(&key)?;
        if let Some(node) = chain.contains_mut(&key) {
            return Some(mem::replace(&mut node.value, value));
        }
        chain.insert(key, value);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.contains(key).map(|node| &node.value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key)?.contains_mut(key).map(|node| &mut node.value)
    }

    /// Returns true if `key` is stored in the map
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.size != 0 && self.get(key).is_some()
    }

    /// Unlinks `key` from its chain and returns the removed value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let value = self.chain_mut(key)?.take(key)?;
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Rebuilds the table with `new_capacity` buckets, or the next prime above it.
    ///
    /// A target of zero is ignored. Pairs are re-inserted bucket by bucket in
    /// chain order.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            trace!(new_capacity, "resize target below one bucket, ignored");
            return;
        }

        let capacity = prime_capacity(new_capacity);
        debug!(from = self.capacity, to = capacity, live = self.size, "resizing chaining table");

        let old_buckets = mem::replace(&mut self.buckets, Self::empty_chains(capacity));
        self.capacity = capacity;
        self.size = 0;

        for (key, value) in old_buckets.into_iter().flatten() {
            self.put(key, value);
        }
    }

    /// Number of nodes in the chain `key` hashes to
    #[must_use]
    pub fn chain_length(&self, key: &str) -> usize {
        self.chain(key).map_or(0, LinkedList::length)
    }

    /// Returns the current load factor of the map
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }
}

impl<V, H> ChainingMap<V, H> {
    /// Counts buckets whose chain has no nodes
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Replaces every chain with an empty one, keeping the capacity
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            *chain = LinkedList::new();
        }
        self.size = 0;
    }

    /// Returns the number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map stores no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns an iterator over the pairs, bucket by bucket in chain order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None }
    }

    /// Copies every key-value pair, bucket by bucket in chain order
    #[must_use]
    pub fn get_keys_and_values(&self) -> DynamicArray<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<V, H> HashTable<V> for ChainingMap<V, H>
where
    H: Fn(&str) -> u64,
{
    fn put(&mut self, key: String, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize_table(&mut self, new_capacity: usize) {
        Self::resize_table(self, new_capacity);
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn len(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn get_keys_and_values(&self) -> DynamicArray<(String, V)>
    where
        V: Clone,
    {
        Self::get_keys_and_values(self)
    }
}

impl<V: fmt::Display, H> fmt::Display for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

/// Iterator over the pairs of a [`ChainingMap`]
#[derive(Debug)]
pub struct Iter<'a, V> {
    /// Buckets not yet visited
    buckets: std::slice::Iter<'a, LinkedList<V>>,
    /// Remaining nodes of the bucket being visited
    chain: Option<linked_list::Iter<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.as_mut().and_then(Iterator::next) {
                return Some((node.key.as_str(), &node.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash::weighted_sum_of_chars, prime::is_prime};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn colliding(_: &str) -> u64 {
        0
    }

    fn pairs<H: Fn(&str) -> u64>(map: &ChainingMap<String, H>) -> Vec<(String, String)> {
        map.get_keys_and_values().into_iter().collect()
    }

    fn owned(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|&(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = ChainingMap::new(31, sum_of_chars);
        assert_eq!(map.get("key"), None);
        assert_eq!(map.put("key1".to_string(), 10), None);

        assert_eq!(map.get("key1"), Some(&10));
        assert!(map.contains_key("key1"));
        assert!(!map.contains_key("key2"));
    }

    #[test]
    fn test_update_in_place() {
        let mut map = ChainingMap::new(53, sum_of_chars);
        map.put("key1".to_string(), 10);
        assert_eq!(map.put("key1".to_string(), 30), Some(10));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key1"), Some(&30));
    }

    #[test]
    fn test_default_map() {
        let map: ChainingMap<i32> = ChainingMap::default();
        assert_eq!(map.capacity(), 11);
        assert!(map.is_empty());
        assert_eq!(map.empty_buckets(), 11);
    }

    #[test]
    fn test_keys_and_values_follow_bucket_then_chain_order() {
        let mut map = ChainingMap::new(11, sum_of_chars);
        for i in 1..6 {
            map.put(i.to_string(), (i * 10).to_string());
        }
        assert_eq!(
            pairs(&map),
            owned(&[("1", "10"), ("2", "20"), ("3", "30"), ("4", "40"), ("5", "50")])
        );

        map.put("20".to_string(), "200".to_string());
        map.remove("1");
        map.resize_table(2);

        // Re-insertion into 2 buckets overflows and grows the table again to 5
        assert_eq!(map.capacity(), 5);
        assert_eq!(map.len(), 5);
        assert_eq!(
            pairs(&map),
            owned(&[("2", "20"), ("3", "30"), ("4", "40"), ("5", "50"), ("20", "200")])
        );
    }

    #[test]
    fn test_colliding_keys_share_a_chain() {
        let mut map = ChainingMap::new(11, colliding);
        for key in ["a", "b", "c"] {
            map.put(key.to_string(), key.to_string());
        }

        assert_eq!(map.chain_length("anything"), 3);
        assert_eq!(map.empty_buckets(), 10);
        assert_eq!(map.to_string().lines().next(), Some("0: (a: a) -> (b: b) -> (c: c)"));

        assert_eq!(map.remove("b"), Some("b".to_string()));
        assert_eq!(map.remove("b"), None);
        assert_eq!(map.len(), 2);
        assert_eq!(pairs(&map), owned(&[("a", "a"), ("c", "c")]));
    }

    #[test]
    fn test_put_resizes_at_full_load() {
        let mut map = ChainingMap::new(11, weighted_sum_of_chars);
        for i in 0..11 {
            map.put(format!("key{i}"), i);
        }
        assert_eq!(map.capacity(), 11);
        assert!((map.table_load() - 1.0).abs() < f64::EPSILON);

        map.put("key11".to_string(), 11);
        assert_eq!(map.capacity(), 23);
        for i in 0..12 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_resize_table() {
        let mut map = ChainingMap::new(23, sum_of_chars);
        map.put("key1".to_string(), 10);
        map.resize_table(30);

        assert_eq!(map.capacity(), 31);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key1"), Some(&10));

        map.resize_table(0);
        assert_eq!(map.capacity(), 31);
    }

    #[test]
    fn test_clear() {
        let mut map = ChainingMap::new(53, sum_of_chars);
        map.put("key1".to_string(), 10);
        map.put("key2".to_string(), 20);
        map.resize_table(100);
        map.clear();

        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 101);
        assert_eq!(map.empty_buckets(), 101);
        assert!(!map.contains_key("key1"));
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainingMap::new(11, colliding);
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);

        if let Some(value) = map.get_mut("b") {
            *value *= 21;
        }
        assert_eq!(map.get("b"), Some(&42));
        assert!(map.get_mut("c").is_none());
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut map = ChainingMap::new(7, sum_of_chars);
        map.extend([("x".to_string(), 1), ("y".to_string(), 2), ("z".to_string(), 3)]);

        let first: i32 = map.iter().map(|(_, value)| value).sum();
        let second: i32 = map.iter().map(|(_, value)| value).sum();
        assert_eq!(first, 6);
        assert_eq!(second, 6);
        assert_eq!(ChainingMap::<i32>::default().iter().next(), None);
    }

    #[test]
    fn test_resize_stress() {
        let mut map = ChainingMap::new(79, weighted_sum_of_chars);
        let keys: Vec<usize> = (1..1000).step_by(13).collect();
        for &key in &keys {
            map.put(key.to_string(), key * 42);
        }

        for capacity in (111..1000).step_by(117) {
            map.resize_table(capacity);
            map.put("some key".to_string(), 0);
            assert!(map.contains_key("some key"));
            map.remove("some key");

            for &key in &keys {
                assert!(map.contains_key(&key.to_string()));
                assert!(!map.contains_key(&(key + 1).to_string()));
            }
            assert!(is_prime(map.capacity()));
            assert_eq!(map.len(), keys.len());
        }
    }

    proptest! {
        #[test]
        fn behaves_like_std_hash_map(
            ops in prop::collection::vec((0_u8..3, 0_u8..24, any::<u16>()), 0..200)
        ) {
            let mut map = ChainingMap::new(1, sum_of_chars);
            let mut model = HashMap::new();

            for (kind, k, v) in ops {
                let key = format!("k{k}");
                match kind {
                    0 | 1 => {
                        prop_assert_eq!(map.put(key.clone(), v), model.insert(key, v));
                        prop_assert!(map.table_load() <= MAX_LOAD_FACTOR);
                    }
                    _ => {
                        prop_assert_eq!(map.remove(&key), model.remove(&key));
                    }
                }
                prop_assert!(is_prime(map.capacity()));
                prop_assert_eq!(map.len(), model.len());
                prop_assert_eq!(map.iter().count(), model.len());
            }

            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(value));
            }
        }

        #[test]
        fn resize_preserves_every_pair(
            keys in prop::collection::hash_set("[a-z]{1,6}", 0..60),
            target in 1_usize..200,
        ) {
            let mut map = ChainingMap::new(11, weighted_sum_of_chars);
            for key in &keys {
                map.put(key.clone(), key.len());
            }
            map.resize_table(target);

            prop_assert!(is_prime(map.capacity()));
            prop_assert!(map.capacity() >= target);
            prop_assert_eq!(map.len(), keys.len());
            for key in &keys {
                prop_assert_eq!(map.get(key), Some(&key.len()));
            }
        }
    }
}
