//! Hash functions that can be plugged into either map.
//!
//! Any `Fn(&str) -> u64` works as a map hasher; these are the stock ones.

use std::hash::{DefaultHasher, Hash, Hasher};

/// Function pointer type accepted by the maps by default
pub type HashFn = fn(&str) -> u64;

/// Sums the code points of every character in the key
#[must_use]
pub fn sum_of_chars(key: &str) -> u64 {
    key.chars().fold(0_u64, |hash, letter| hash.wrapping_add(u64::from(letter)))
}

/// Sums the code points of the key weighted by their one-based position.
///
/// Unlike [`sum_of_chars`], anagrams hash differently.
#[must_use]
pub fn weighted_sum_of_chars(key: &str) -> u64 {
    key.chars().zip(1_u64..).fold(0_u64, |hash, (letter, position)| {
        hash.wrapping_add(position.wrapping_mul(u64::from(letter)))
    })
}

/// Hashes the key with the standard library's `DefaultHasher`
#[must_use]
pub fn std_hash(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
