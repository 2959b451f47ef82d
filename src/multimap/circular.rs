//! Circular-buffer-backed value strategy.

use std::fmt;
use std::num::NonZeroUsize;

use super::ValueStrategy;
use crate::CollectionError;
use crate::circular::CircularArray;
use crate::keying::{IsEqual, is_equal_default};

/// Keeps the most recent `capacity` values per key.
///
/// Once a key holds `capacity` values, each addition evicts the oldest one.
/// Values are iterated from the oldest to the newest.
///
/// # Examples
///
/// ```rust
/// use massive_collections::multimap::{CircularStrategy, ValueStrategy};
///
/// let strategy = CircularStrategy::new(2)?;
/// let mut values = strategy.create();
/// strategy.add_all(&mut values, ["a", "b", "c"]);
///
/// assert_eq!(strategy.values(&values).copied().collect::<Vec<_>>(), vec!["b", "c"]);
/// # Ok::<(), massive_collections::CollectionError>(())
/// ```
pub struct CircularStrategy<V> {
    capacity: NonZeroUsize,
    is_equal: IsEqual<V>,
}

impl<V: PartialEq> CircularStrategy<V> {
    /// Creates a strategy bounded to `capacity` values per key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidCapacity`] when `capacity` is `0`.
    pub fn new(capacity: usize) -> Result<Self, CollectionError> {
        Self::with_comparer(capacity, is_equal_default::<V>)
    }
}

impl<V> CircularStrategy<V> {
    /// Creates a strategy bounded to `capacity` values per key, comparing
    /// values with `is_equal`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidCapacity`] when `capacity` is `0`.
    pub fn with_comparer(capacity: usize, is_equal: IsEqual<V>) -> Result<Self, CollectionError> {
        let capacity =
            NonZeroUsize::new(capacity).ok_or(CollectionError::zero_capacity("CircularStrategy"))?;
        Ok(Self { capacity, is_equal })
    }

    /// Maximum number of values kept per key.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

impl<V> Clone for CircularStrategy<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for CircularStrategy<V> {}

impl<V> fmt::Debug for CircularStrategy<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CircularStrategy")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<V> ValueStrategy<V> for CircularStrategy<V> {
    type Container = CircularArray<V>;

    fn create(&self) -> Self::Container {
        CircularArray::with_capacity(self.capacity)
    }

    fn add(&self, container: &mut Self::Container, value: V) {
        container.push(value);
    }

    fn has(&self, container: &Self::Container, value: &V) -> bool {
        container.iter().any(|item| (self.is_equal)(item, value))
    }

    fn count(&self, container: &Self::Container) -> usize {
        container.len()
    }

    fn values<'a>(&self, container: &'a Self::Container) -> impl Iterator<Item = &'a V>
    where
        V: 'a,
    {
        container.iter()
    }

    fn without(&self, container: &Self::Container, value: &V) -> Self::Container
    where
        V: Clone,
    {
        let mut copy = container.clone();
        copy.retain(|item| !(self.is_equal)(item, value));
        copy
    }

    fn remove(&self, container: &mut Self::Container, value: &V) -> bool
    where
        V: Clone,
    {
        let before = container.len();
        container.retain(|item| !(self.is_equal)(item, value));
        container.len() != before
    }
}
