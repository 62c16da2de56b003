use std::{fmt, mem};

use tracing::{debug, trace};

use crate::{
    DynamicArray,
    hash::{HashFn, sum_of_chars},
    prime::{next_prime, prime_capacity},
    table::{DEFAULT_CAPACITY, HashTable},
};

/// Load factor at which `put` doubles the table before inserting
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// A key-value pair stored in a slot
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// State of one bucket of the table
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<V> {
    /// Never written since the last rebuild or clear
    Empty,
    /// Logically deleted; keeps the removed key so probe chains stay intact
    Tombstone(String),
    /// Holds a live entry
    Occupied(Entry<V>),
}

/// Quadratic probe sequence `(home + j * j) mod capacity` for `j` in `0..capacity`
#[derive(Debug, Clone)]
struct Probe {
    /// Index yielded next
    index: usize,
    /// Distance to the index after that, `(2j + 1) mod capacity`
    step: usize,
    /// Indices left before the sequence gives up
    remaining: usize,
    /// Table capacity, never zero
    capacity: usize,
}

impl Iterator for Probe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.index;
        self.remaining -= 1;
        // (j + 1)^2 - j^2 == 2j + 1
        self.index = (self.index + self.step) % self.capacity;
        self.step = (self.step + 2) % self.capacity;
        Some(current)
    }
}

/// A hash map resolving collisions by open addressing with quadratic probing.
///
/// The capacity is always prime and the table is doubled whenever an insertion
/// finds it at least half full, which keeps the first `(capacity + 1) / 2` probe
/// positions distinct and guarantees a free slot among them.
///
/// Removal leaves a tombstone behind. Tombstones are only discarded when the
/// table is rebuilt, either by [`resize_table`](Self::resize_table) or by a `put`
/// whose key finds every reachable slot taken, or wiped by [`clear`](Self::clear).
#[derive(Clone)]
pub struct OpenAddressingMap<V, H = HashFn> {
    /// The slots of the table; its length always equals `capacity`
    buckets: DynamicArray<Slot<V>>,
    /// Number of slots, always prime
    capacity: usize,
    /// Number of live keys
    size: usize,
    /// Maps a key to its home slot before reduction modulo `capacity`
    hash_fn: H,
}

impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("capacity", &self.capacity)
            .field("size", &self.size)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, sum_of_chars)
    }
}

impl<V, H> Extend<(String, V)> for OpenAddressingMap<V, H>
where
    H: Fn(&str) -> u64,
{
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V, H> OpenAddressingMap<V, H>
where
    H: Fn(&str) -> u64,
{
    /// Creates a map whose capacity is the first prime reached from `capacity`
    #[must_use]
    pub fn new(capacity: usize, hash_fn: H) -> Self {
        let capacity = next_prime(capacity);
        Self { buckets: Self::empty_slots(capacity), capacity, size: 0, hash_fn }
    }

    /// Allocates `capacity` empty slots
    fn empty_slots(capacity: usize) -> DynamicArray<Slot<V>> {
        (0..capacity).map(|_| Slot::Empty).collect()
    }

    /// Gets the first slot of the probe sequence for a key
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    fn home_index(&self, key: &str) -> usize {
        let hash = (self.hash_fn)(key);
        // The remainder is below `capacity`, so narrowing it back is lossless
        (hash % self.capacity as u64) as usize
    }

    /// Returns the probe sequence for a key
    fn probe(&self, key: &str) -> Probe {
        Probe {
            index: self.home_index(key),
            step: 1 % self.capacity,
            remaining: self.capacity,
            capacity: self.capacity,
        }
    }

    /// Walks the lookup probe of `key`.
    ///
    /// Returns the slot holding `key` as a live entry, if any, along with the number
    /// of slots inspected. An empty slot or a tombstone of `key` ends the walk as a miss.
    fn lookup(&self, key: &str) -> (Option<usize>, usize) {
        let mut inspected: usize = 0;
        for index in self.probe(key) {
            inspected = inspected.saturating_add(1);
            match self.buckets.get_at_index(index) {
                Ok(Slot::Occupied(entry)) if entry.key == key => return (Some(index), inspected),
                Err(_) | Ok(Slot::Empty) => return (None, inspected),
                Ok(Slot::Tombstone(dead)) if dead == key => return (None, inspected),
                Ok(_) => {}
            }
        }
        (None, inspected)
    }

    /// Locates the slot holding `key` as a live entry
    fn find(&self, key: &str) -> Option<usize> {
        self.lookup(key).0
    }

    /// Picks the slot a `put` of `key` writes into.
    ///
    /// A live key is overwritten where it sits. A new key lands on the first empty
    /// slot or on its own tombstone, probing through live entries and tombstones
    /// left by other keys. Returns `None` when the whole probe sequence is taken.
    fn landing_index(&self, key: &str) -> Option<usize> {
        if self.contains_key(key) {
            return self.find(key);
        }

        for index in self.probe(key) {
            match self.buckets.get_at_index(index) {
                Ok(Slot::Empty) => return Some(index),
                Ok(Slot::Tombstone(dead)) if dead == key => return Some(index),
                Ok(_) => {}
                Err(_) => return None,
            }
        }
        None
    }

    /// Inserts a key-value pair, or replaces the value of a live key.
    ///
    /// Returns the replaced value. The table is doubled first if it is at least
    /// half full. When tombstones of other keys block every position the key can
    /// reach, the table is rebuilt at its current capacity to drop them.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.resize_table(self.capacity.saturating_mul(2));
        }

        let mut compacted = false;
        let index = loop {
            if let Some(index) = self.landing_index(&key) {
                break index;
            }
            if compacted {
                trace!(capacity = self.capacity, "probe sequence full after compaction");
                self.resize_table(self.capacity.saturating_mul(2));
            } else {
                trace!(capacity = self.capacity, "probe sequence exhausted by tombstones");
                self.resize_table(self.capacity);
                compacted = true;
            }
        };

        // Probe indices are reduced modulo `capacity`, the length of `buckets`
        match self.buckets.set_at_index(index, Slot::Occupied(Entry { key, value })) {
            Ok(Slot::Occupied(previous)) => Some(previous.value),
            Ok(Slot::Empty | Slot::Tombstone(_)) => {
                self.size = self.size.saturating_add(1);
                None
            }
            Err(error) => {
                debug!(%error, "landing slot outside the table, pair dropped");
                None
            }
        }
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find(key)?;
        match self.buckets.get_at_index(index) {
            Ok(Slot::Occupied(entry)) => Some(&entry.value),
            _ => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find(key)?;
        match self.buckets.get_at_index_mut(index) {
            Ok(Slot::Occupied(entry)) => Some(&mut entry.value),
            _ => None,
        }
    }

    /// Returns true if `key` is live in the map
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.size != 0 && self.find(key).is_some()
    }

    /// Turns the slot of `key` into a tombstone and returns the removed value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        if self.size == 0 {
            return None;
        }
        let index = self.find(key)?;
        let slot = self.buckets.get_at_index_mut(index).ok()?;

        match mem::replace(slot, Slot::Empty) {
            Slot::Occupied(Entry { key, value }) => {
                *slot = Slot::Tombstone(key);
                self.size = self.size.saturating_sub(1);
                Some(value)
            }
            previous => {
                *slot = previous;
                None
            }
        }
    }

    /// Rebuilds the table with `new_capacity` slots, or the next prime above it.
    ///
    /// Targets smaller than the number of live keys are ignored. Live entries are
    /// re-inserted in slot order and tombstones are dropped; re-insertion may grow
    /// the table further if the target leaves it half full.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            trace!(new_capacity, size = self.size, "resize target below live entries, ignored");
            return;
        }

        let capacity = prime_capacity(new_capacity);
        debug!(from = self.capacity, to = capacity, live = self.size, "resizing open addressing table");

        let old_buckets = mem::replace(&mut self.buckets, Self::empty_slots(capacity));
        self.capacity = capacity;
        self.size = 0;

        for slot in old_buckets {
            if let Slot::Occupied(Entry { key, value }) = slot {
                self.put(key, value);
            }
        }
    }

    /// Number of slots inspected by a lookup of `key`
    #[must_use]
    pub fn probe_length(&self, key: &str) -> usize {
        self.lookup(key).1
    }

    /// Returns the current load factor of the map
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }
}

impl<V, H> OpenAddressingMap<V, H> {
    /// Counts slots that are empty or hold a tombstone
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|slot| !matches!(slot, Slot::Occupied(_))).count()
    }

    /// Empties every slot, tombstones included, keeping the capacity
    pub fn clear(&mut self) {
        for slot in self.buckets.iter_mut() {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Returns the number of live keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a cursor over the live entries in slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.buckets)
    }

    /// Copies every live key-value pair in slot order
    #[must_use]
    pub fn get_keys_and_values(&self) -> DynamicArray<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<V, H> HashTable<V> for OpenAddressingMap<V, H>
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

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("None"),
            Self::Tombstone(key) => write!(f, "TS({key})"),
            Self::Occupied(entry) => write!(f, "({}, {})", entry.key, entry.value),
        }
    }
}

impl<V: fmt::Display, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {slot}")?;
        }
        Ok(())
    }
}

/// Cursor over the live entries of an [`OpenAddressingMap`]
#[derive(Debug)]
pub struct Iter<'a, V> {
    /// Slots of the map being walked
    buckets: &'a DynamicArray<Slot<V>>,
    /// The next live slot, or an index past the end once the walk is over
    index: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self { buckets: self.buckets, index: self.index }
    }
}

impl<'a, V> Iter<'a, V> {
    /// Creates a cursor resting on the first live slot
    fn new(buckets: &'a DynamicArray<Slot<V>>) -> Self {
        let mut iter = Self { buckets, index: 0 };
        iter.seek();
        iter
    }

    /// Moves the cursor forward until it rests on a live slot or leaves the array
    fn seek(&mut self) {
        while let Ok(slot) = self.buckets.get_at_index(self.index) {
            if matches!(slot, Slot::Occupied(_)) {
                return;
            }
            self.index = self.index.saturating_add(1);
        }
    }

    /// Returns true if another live entry lies ahead of the cursor
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.buckets.get_at_index(self.index).is_ok()
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        // Stepping past the end of the backing array ends the walk
        let Slot::Occupied(entry) = self.buckets.get_at_index(self.index).ok()? else {
            return None;
        };
        self.index = self.index.saturating_add(1);
        self.seek();
        Some((entry.key.as_str(), &entry.value))
    }
}
