//! Singly linked chain of key/value nodes backing each bucket of the chaining map.

use std::fmt;

/// A node of the chain holding one key/value pair
#[derive(Debug)]
pub struct Node<V> {
    /// The key of the pair
    pub key: String,
    /// The value associated with the key
    pub value: V,
    /// The following node, if any
    next: Option<Box<Node<V>>>,
}

/// A singly linked list of key/value nodes kept in insertion order.
///
/// The list performs no duplicate detection on its own; callers look a key up
/// with [`LinkedList::contains`] before inserting it.
#[derive(Debug)]
pub struct LinkedList<V> {
    /// The first node
    head: Option<Box<Node<V>>>,
    /// Number of nodes in the list
    length: usize,
}

impl<V> Default for LinkedList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LinkedList<V> {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self { head: None, length: 0 }
    }

    /// Appends a new node at the tail of the list
    pub fn insert(&mut self, key: String, value: V) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { key, value, next: None }));
        self.length = self.length.saturating_add(1);
    }

    /// Returns the first node holding `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> Option<&Node<V>> {
        self.iter().find(|node| node.key == key)
    }

    /// Returns the first node holding `key`, mutably
    pub fn contains_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(node);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the first node holding `key`; returns whether a node was removed
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Unlinks the first node holding `key` and returns its value
    pub fn take(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        loop {
            if cursor.as_deref()?.key == key {
                let Node { value, next, .. } = *cursor.take()?;
                *cursor = next;
                self.length = self.length.saturating_sub(1);
                return Some(value);
            }
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }
    }

    /// Detaches the first node and returns its pair
    pub fn pop_front(&mut self) -> Option<(String, V)> {
        self.head.take().map(|node| {
            let Node { key, value, next } = *node;
            self.head = next;
            self.length = self.length.saturating_sub(1);
            (key, value)
        })
    }

    /// Returns the number of nodes
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns true if the list has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns an iterator over the nodes in insertion order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }
}

// Unlink iteratively so long chains don't overflow the stack.
impl<V> Drop for LinkedList<V> {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

impl<V: fmt::Display> fmt::Display for LinkedList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in self {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "({}: {})", node.key, node.value)?;
            first = false;
        }
        Ok(())
    }
}

/// Iterator over the nodes of a [`LinkedList`]
#[derive(Debug)]
pub struct Iter<'a, V> {
    /// The node to yield next
    next: Option<&'a Node<V>>,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self { next: self.next }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node
        })
    }
}

impl<'a, V> IntoIterator for &'a LinkedList<V> {
    type Item = &'a Node<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator yielding the pairs of a [`LinkedList`] in insertion order
#[derive(Debug)]
pub struct IntoIter<V> {
    /// The list being drained
    list: LinkedList<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }
}

impl<V> IntoIterator for LinkedList<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(pairs: &[(&str, i32)]) -> LinkedList<i32> {
        let mut list = LinkedList::new();
        for &(key, value) in pairs {
            list.insert(key.to_string(), value);
        }
        list
    }

    fn keys(list: &LinkedList<i32>) -> Vec<&str> {
        list.iter().map(|node| node.key.as_str()).collect()
    }

    #[test]
    fn test_insert_keeps_insertion_order() {
        let list = list_of(&[("a", 1), ("b", 2), ("c", 3)]);

        assert_eq!(list.length(), 3);
        assert_eq!(keys(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_contains() {
        let mut list = list_of(&[("a", 1), ("b", 2)]);

        assert_eq!(list.contains("b").map(|node| node.value), Some(2));
        assert!(list.contains("z").is_none());

        if let Some(node) = list.contains_mut("a") {
            node.value = 10;
        }
        assert_eq!(list.contains("a").map(|node| node.value), Some(10));
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut list = list_of(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);

        assert!(list.remove("b"));
        assert_eq!(keys(&list), vec!["a", "c", "d"]);

        assert!(list.remove("a"));
        assert_eq!(keys(&list), vec!["c", "d"]);

        assert!(list.remove("d"));
        assert_eq!(keys(&list), vec!["c"]);

        assert!(!list.remove("d"));
        assert_eq!(list.length(), 1);

        assert!(list.remove("c"));
        assert!(list.is_empty());
        assert_eq!(list.length(), 0);
    }

    #[test]
    fn test_take_returns_value() {
        let mut list = list_of(&[("a", 1), ("b", 2)]);

        assert_eq!(list.take("b"), Some(2));
        assert_eq!(list.take("b"), None);
        assert_eq!(keys(&list), vec!["a"]);
        assert_eq!(list.length(), 1);
    }

    #[test]
    fn test_remove_only_first_match() {
        let mut list = list_of(&[("a", 1), ("a", 2)]);

        assert!(list.remove("a"));
        assert_eq!(list.contains("a").map(|node| node.value), Some(2));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let list = list_of(&[("a", 1), ("b", 2)]);

        let first: i32 = list.iter().map(|node| node.value).sum();
        let second: i32 = list.iter().map(|node| node.value).sum();
        assert_eq!(first, 3);
        assert_eq!(second, 3);
    }

    #[test]
    fn test_into_iter_drains_in_order() {
        let list = list_of(&[("a", 1), ("b", 2), ("c", 3)]);
        let pairs: Vec<(String, i32)> = list.into_iter().collect();

        assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]);
    }

    #[test]
    fn test_display() {
        let list = list_of(&[("a", 1), ("b", 2)]);
        assert_eq!(list.to_string(), "(a: 1) -> (b: 2)");
        assert_eq!(LinkedList::<i32>::new().to_string(), "");
    }

    #[test]
    fn test_drop_long_chain() {
        let mut list = LinkedList::new();
        for i in 0..200_000 {
            list.push_front_for_test(i);
        }
        assert_eq!(list.length(), 200_000);
    }

    impl LinkedList<i32> {
        /// Prepends without walking the chain, so building a long list stays linear
        fn push_front_for_test(&mut self, value: i32) {
            let next = self.head.take();
            self.head = Some(Box::new(Node { key: value.to_string(), value, next }));
            self.length += 1;
        }
    }
}
