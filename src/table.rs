//! Operations shared by the open addressing and the chaining map.

use crate::DynamicArray;

/// Initial capacity used by `Default` constructors
pub const DEFAULT_CAPACITY: usize = 11;

/// Common interface of the string-keyed hash maps in this crate.
///
/// Both maps also expose these operations as inherent methods; the trait lets
/// reports, benchmarks and property tests drive either variant generically.
pub trait HashTable<V> {
    /// Inserts or updates `key`, returning the value it replaced
    fn put(&mut self, key: String, value: V) -> Option<V>;

    /// Returns the value stored under `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if `key` is live in the table
    fn contains_key(&self, key: &str) -> bool;

    /// Removes `key`, returning its value
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Drops every entry while keeping the capacity
    fn clear(&mut self);

    /// Rebuilds the table with (at least) `new_capacity` buckets.
    ///
    /// Invalid targets are ignored without any state change.
    fn resize_table(&mut self, new_capacity: usize);

    /// Number of buckets holding no live entry
    fn empty_buckets(&self) -> usize;

    /// Number of live keys
    fn len(&self) -> usize;

    /// Number of buckets
    fn capacity(&self) -> usize;

    /// Snapshot of every live pair in bucket order
    fn get_keys_and_values(&self) -> DynamicArray<(String, V)>
    where
        V: Clone;

    /// Returns true if the table holds no live keys
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ratio of live keys to buckets
    #[allow(clippy::cast_precision_loss)]
    fn table_load(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }
}
