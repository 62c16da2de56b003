//! Growable, index-addressable backing storage used by both map variants.

use thiserror::Error;

/// Errors raised by [`DynamicArray`] accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// The index lies outside `[0, length)`
    #[error("index {index} is out of bounds for an array of length {length}")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The array length at the time of the access
        length: usize,
    },
}

/// A contiguous sequence of slots that grows as items are appended.
///
/// Every positional accessor is bound-checked and reports
/// [`ArrayError::IndexOutOfBounds`] instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicArray<T> {
    /// The stored items
    items: Vec<T>,
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicArray<T> {
    /// Creates an empty array
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty array with room for `capacity` items before reallocating
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    /// Appends an item at the end of the array
    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Returns a reference to the item at `index`
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] if `index >= self.length()`.
    pub fn get_at_index(&self, index: usize) -> Result<&T, ArrayError> {
        let length = self.items.len();
        self.items.get(index).ok_or(ArrayError::IndexOutOfBounds { index, length })
    }

    /// Returns a mutable reference to the item at `index`
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] if `index >= self.length()`.
    pub fn get_at_index_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let length = self.items.len();
        self.items.get_mut(index).ok_or(ArrayError::IndexOutOfBounds { index, length })
    }

    /// Stores `item` at `index` and hands back the item it replaced
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] if `index >= self.length()`; the array is
    /// left untouched in that case.
    pub fn set_at_index(&mut self, index: usize, item: T) -> Result<T, ArrayError> {
        let slot = self.get_at_index_mut(index)?;
        Ok(std::mem::replace(slot, item))
    }

    /// Returns the number of items stored
    #[must_use]
    pub fn length(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the items in index order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns an iterator over mutable references to the items in index order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Views the stored items as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
