//! # Prime Table
//!
//! String-keyed hash maps built from first principles on prime-sized bucket arrays.
//!
//! This crate provides two hash map implementations:
//!
//! - `OpenAddressingMap`: open addressing with quadratic probing and tombstone deletion,
//!   doubled whenever an insertion finds it half full
//! - `ChainingMap`: separate chaining with one singly linked list per bucket, doubled
//!   once it holds as many keys as buckets
//!
//! Both keep their capacity prime and take the hash function as a constructor
//! argument, so any `Fn(&str) -> u64` can be plugged in.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primetable::{OpenAddressingMap, hash::sum_of_chars};
//!
//! // Create a new hash map with (at least) 11 buckets
//! let mut map = OpenAddressingMap::new(11, sum_of_chars);
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.len(), 1);
//! ```
//!
//! ## Finding Modes
//!
//! ```rust
//! use primetable::find_mode;
//!
//! let (modes, frequency) = find_mode(["Mint", "Ubuntu", "Mint", "Ubuntu", "Arch"]);
//!
//! assert_eq!(frequency, 2);
//! assert_eq!(modes.as_slice(), &["Mint".to_string(), "Ubuntu".to_string()]);
//! ```

/// Module implementing the separate chaining hash map
pub mod chaining;
/// Module implementing the growable backing array
mod dynamic_array;
/// Hash functions that can be plugged into the maps
pub mod hash;
/// Module implementing the chain list used by the separate chaining map
pub mod linked_list;
/// Mode finding built on the separate chaining map
mod mode;
/// Module implementing the open addressing hash map
pub mod open_addressing;
/// Prime capacity sizing
pub mod prime;
/// Operations shared by both hash maps
mod table;
/// Utility functions and traits for the hash maps
mod utils;

pub use chaining::ChainingMap;
pub use dynamic_array::{ArrayError, DynamicArray};
pub use linked_list::LinkedList;
pub use mode::find_mode;
pub use open_addressing::OpenAddressingMap;
pub use table::{DEFAULT_CAPACITY, HashTable};
pub use utils::{HashMapExtensions, from_pairs};
