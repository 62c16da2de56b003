//! Utility functions and traits shared by the hash map implementations

use crate::table::HashTable;

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions<V> {
    /// Returns the keys of the hash map as a Vec, in bucket order
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the hash map as a Vec, in bucket order
    fn values(&self) -> Vec<V>;
}

impl<V, M> HashMapExtensions<V> for M
where
    M: HashTable<V>,
    V: Clone,
{
    fn keys(&self) -> Vec<String> {
        self.get_keys_and_values().into_iter().map(|(key, _)| key).collect()
    }

    fn values(&self) -> Vec<V> {
        self.get_keys_and_values().into_iter().map(|(_, value)| value).collect()
    }
}

/// Fills `map` with key-value pairs and hands it back
pub fn from_pairs<M, V, I>(mut map: M, pairs: I) -> M
where
    M: HashTable<V>,
    I: IntoIterator<Item = (String, V)>,
{
    for (key, value) in pairs {
        map.put(key, value);
    }
    map
}
