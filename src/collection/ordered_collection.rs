//! Always-sorted list.
//!
//! [`OrderedCollection`] keeps its elements sorted by a comparator (natural
//! order by default). Single insertions go straight to their ordered position;
//! bulk insertions append and sort once.

use std::cmp::Ordering;
use std::fmt;

use super::Collection;
use crate::error::{CollectionError, Result};
use crate::stream::{ArrayStream, IntoStream, Streamable, natural_order};

/// Up to this many elements, [`OrderedCollection::search`] scans linearly;
/// above it, it binary-searches.
pub const LINEAR_SEARCH_THRESHOLD: usize = 3000;

const TYPE_NAME: &str = "OrderedCollection";

/// Comparator type of a naturally ordered [`OrderedCollection`].
pub type NaturalOrder<T> = fn(&T, &T) -> Ordering;

/// A list kept sorted by a comparator.
///
/// Positions are ordered positions: [`OrderedCollection::at`] returns the
/// `n`-th smallest element.
///
/// # Examples
///
/// ```rust
/// use hashstream::collection::OrderedCollection;
///
/// let mut numbers = OrderedCollection::new();
/// numbers.add(3);
/// numbers.add(1);
/// numbers.add(2);
///
/// assert_eq!(numbers.to_vec(), vec![1, 2, 3]);
/// assert_eq!(numbers.at(0), Ok(&1));
/// assert_eq!(numbers.search(&3), Some(2));
/// ```
pub struct OrderedCollection<T, C = NaturalOrder<T>> {
    elements: Vec<T>,
    comparator: C,
}

impl<T: PartialOrd> OrderedCollection<T> {
    /// Creates an empty collection in natural order.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(natural_order::<T>)
    }
}

impl<T, C> OrderedCollection<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty collection ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::collection::OrderedCollection;
    ///
    /// let mut descending = OrderedCollection::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// descending.add_all(vec![1, 3, 2]);
    ///
    /// assert_eq!(descending.to_vec(), vec![3, 2, 1]);
    /// ```
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            elements: Vec::new(),
            comparator,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the collection holds no element.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Inserts `element` at its ordered position, after any equal elements.
    pub fn add(&mut self, element: T) {
        let position = self
            .elements
            .partition_point(|current| (self.comparator)(current, &element) != Ordering::Greater);
        self.elements.insert(position, element);
    }

    /// Inserts every element, sorting once at the end.
    pub fn add_all<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.elements.len();
        self.elements.extend(elements);
        if self.elements.len() > before {
            self.sort();
        }
    }

    /// Replaces the content with `elements`.
    pub fn replace<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.elements.clear();
        self.add_all(elements);
    }

    fn sort(&mut self) {
        let comparator = &self.comparator;
        self.elements.sort_by(|left, right| comparator(left, right));
        tracing::trace!(elements = self.elements.len(), "ordered collection re-sorted");
    }

    /// Returns the element at ordered `position`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when `position` is out of bounds.
    pub fn at(&self, position: usize) -> Result<&T> {
        self.elements
            .get(position)
            .ok_or_else(|| CollectionError::not_found(position.to_string()))
    }

    /// Always fails: positions are decided by the ordering.
    ///
    /// # Errors
    ///
    /// Always returns [`CollectionError::UnsupportedOperation`].
    pub fn set_at(&mut self, _position: usize, _element: T) -> Result<()> {
        Err(CollectionError::unsupported(TYPE_NAME, "set_at"))
    }

    /// Removes and returns the element at ordered `position`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when `position` is out of bounds.
    pub fn remove_at(&mut self, position: usize) -> Result<T> {
        if position < self.elements.len() {
            Ok(self.elements.remove(position))
        } else {
            Err(CollectionError::not_found(position.to_string()))
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Returns an iterator over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Returns the elements as a sorted slice.
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns the elements in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.elements.clone()
    }

    /// Calls `consumer(element, position)` for every element in order.
    pub fn for_each<F>(&self, mut consumer: F)
    where
        F: FnMut(&T, usize),
    {
        for (position, element) in self.elements.iter().enumerate() {
            consumer(element, position);
        }
    }

    /// Returns a stream over a snapshot of the elements, keyed by position.
    pub fn stream(&self) -> ArrayStream<T>
    where
        T: Clone,
    {
        ArrayStream::new(self.to_vec())
    }
}

impl<T: PartialEq, C> OrderedCollection<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Returns the ordered position of an element equal to `element`.
    ///
    /// Small collections are scanned linearly; larger ones are binary-searched
    /// with the collection's comparator.
    pub fn search(&self, element: &T) -> Option<usize> {
        if self.elements.len() <= LINEAR_SEARCH_THRESHOLD {
            return self.elements.iter().position(|current| current == element);
        }

        tracing::trace!(elements = self.elements.len(), "ordered collection binary search");
        let (mut first, mut last) = (0_usize, self.elements.len());
        while first < last {
            let middle = first + (last - first) / 2;
            let current = &self.elements[middle];
            if current == element {
                return Some(middle);
            }
            if (self.comparator)(element, current) == Ordering::Less {
                last = middle;
            } else {
                first = middle + 1;
            }
        }
        None
    }

    /// Returns `true` if an element equal to `element` is present.
    pub fn contains(&self, element: &T) -> bool {
        self.search(element).is_some()
    }

    /// Removes an element equal to `element`, returning whether one existed.
    pub fn remove(&mut self, element: &T) -> bool {
        match self.search(element) {
            Some(position) => {
                self.elements.remove(position);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: PartialOrd> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, C: Clone> Clone for OrderedCollection<T, C> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: PartialOrd> FromIterator<T> for OrderedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.add_all(iter);
        collection
    }
}

impl<T, C: Fn(&T, &T) -> Ordering> Extend<T> for OrderedCollection<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedCollection<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(&self.elements).finish()
    }
}

// =============================================================================
// Collection and Stream Integration
// =============================================================================

impl<T: PartialEq, C: Fn(&T, &T) -> Ordering> Collection<T> for OrderedCollection<T, C> {
    fn add(&mut self, element: T) -> Result<bool> {
        Self::add(self, element);
        Ok(true)
    }

    fn add_all<I>(&mut self, elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        Self::add_all(self, elements);
        Ok(true)
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn remove(&mut self, element: &T) -> bool {
        Self::remove(self, element)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<T: Clone, C: Fn(&T, &T) -> Ordering> Streamable for OrderedCollection<T, C> {
    type Stream = ArrayStream<T>;

    fn stream(&self) -> Self::Stream {
        Self::stream(self)
    }
}

impl<T, C> IntoStream for OrderedCollection<T, C> {
    type Key = usize;
    type Value = T;
    type IntoStream = ArrayStream<T>;

    fn into_stream(self) -> Self::IntoStream {
        ArrayStream::new(self.elements)
    }
}
