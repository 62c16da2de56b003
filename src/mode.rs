//! Mode finding on top of [`ChainingMap`].

use std::cmp::Ordering;

use crate::{ChainingMap, DynamicArray};

/// Returns the most frequent items and their frequency.
///
/// Items are counted in a default [`ChainingMap`]. Ties are reported in the
/// map's iteration order (bucket, then chain), so the result is deterministic
/// for a given input order. An empty input yields no modes and a frequency of 0.
#[must_use]
pub fn find_mode<I>(items: I) -> (DynamicArray<String>, usize)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut counts: ChainingMap<usize> = ChainingMap::default();
    for item in items {
        let item = item.as_ref();
        let count = counts.get(item).copied().unwrap_or(0);
        counts.put(item.to_owned(), count.saturating_add(1));
    }

    let mut modes = DynamicArray::new();
    let mut frequency = 0;
    for (key, &count) in counts.iter() {
        match count.cmp(&frequency) {
            Ordering::Equal => modes.append(key.to_owned()),
            Ordering::Greater => {
                frequency = count;
                modes = DynamicArray::new();
                modes.append(key.to_owned());
            }
            Ordering::Less => {}
        }
    }

    (modes, frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modes_of(items: &[&str]) -> (Vec<String>, usize) {
        let (modes, frequency) = find_mode(items);
        (modes.into_iter().collect(), frequency)
    }

    #[test]
    fn test_single_mode() {
        let (modes, frequency) = modes_of(&["apple", "apple", "grape", "melon", "peach"]);
        assert_eq!(modes, vec!["apple"]);
        assert_eq!(frequency, 2);
    }

    #[test]
    fn test_tied_modes_follow_map_order() {
        let (modes, frequency) = modes_of(&[
            "Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu",
        ]);
        assert_eq!(modes, vec!["Mint", "Ubuntu"]);
        assert_eq!(frequency, 3);
    }

    #[test]
    fn test_all_distinct() {
        let (mut modes, frequency) = modes_of(&["one", "two", "three", "four", "five"]);
        modes.sort();

        assert_eq!(frequency, 1);
        assert_eq!(modes, vec!["five", "four", "one", "three", "two"]);
    }

    #[test]
    fn test_numbers() {
        let (modes, frequency) =
            modes_of(&["2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2"]);
        // "2" hashes to bucket 6, "3" to 7, "4" to 8
        assert_eq!(modes, vec!["2", "3", "4"]);
        assert_eq!(frequency, 3);
    }

    #[test]
    fn test_empty_input() {
        let (modes, frequency) = modes_of(&[]);
        assert!(modes.is_empty());
        assert_eq!(frequency, 0);
    }

    #[test]
    fn test_owned_strings() {
        let items = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        let (modes, frequency) = find_mode(&items);

        assert_eq!(modes.as_slice(), &["b".to_string()]);
        assert_eq!(frequency, 2);
    }
}
