//! Array-backed value strategy.

use std::fmt;

use super::ValueStrategy;
use crate::keying::{IsEqual, is_equal_default};

/// Stores values in insertion order, duplicates allowed.
///
/// Equality for `has`, `without` and `remove` is decided by a comparer,
/// `PartialEq` by default.
///
/// # Examples
///
/// ```rust
/// use massive_collections::multimap::{ArrayStrategy, ValueStrategy};
///
/// let strategy = ArrayStrategy::new();
/// let mut values = strategy.create();
/// strategy.add_all(&mut values, [1, 1, 2]);
///
/// assert_eq!(strategy.count(&values), 3);
/// assert_eq!(strategy.without(&values, &1), vec![2]);
/// ```
pub struct ArrayStrategy<V> {
    is_equal: IsEqual<V>,
}

impl<V: PartialEq> ArrayStrategy<V> {
    /// Creates a strategy comparing values with `PartialEq`.
    pub fn new() -> Self {
        Self::with_comparer(is_equal_default::<V>)
    }
}

impl<V> ArrayStrategy<V> {
    /// Creates a strategy comparing values with `is_equal`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::multimap::{ArrayStrategy, ValueStrategy};
    ///
    /// let strategy = ArrayStrategy::with_comparer(|left: &String, right: &String| {
    ///     left.eq_ignore_ascii_case(right)
    /// });
    /// let values = vec!["Hello".to_string()];
    /// assert!(strategy.has(&values, &"HELLO".to_string()));
    /// ```
    pub const fn with_comparer(is_equal: IsEqual<V>) -> Self {
        Self { is_equal }
    }
}

impl<V: PartialEq> Default for ArrayStrategy<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for ArrayStrategy<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ArrayStrategy<V> {}

impl<V> fmt::Debug for ArrayStrategy<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ArrayStrategy").finish_non_exhaustive()
    }
}

impl<V> ValueStrategy<V> for ArrayStrategy<V> {
    type Container = Vec<V>;

    fn create(&self) -> Self::Container {
        Vec::new()
    }

    fn add(&self, container: &mut Self::Container, value: V) {
        container.push(value);
    }

    fn add_all<I>(&self, container: &mut Self::Container, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        container.extend(values);
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
        container
            .iter()
            .filter(|item| !(self.is_equal)(*item, value))
            .cloned()
            .collect()
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

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_add_keeps_duplicates_in_order() {
        let strategy = ArrayStrategy::new();
        let mut values = strategy.create();
        strategy.add_all(&mut values, ["b", "a", "b"]);
        assert_eq!(strategy.values(&values).copied().collect::<Vec<_>>(), vec!["b", "a", "b"]);
    }

    #[rstest]
    fn test_remove_drops_every_match() {
        let strategy = ArrayStrategy::new();
        let mut values = vec![1, 2, 1, 3];
        assert!(strategy.remove(&mut values, &1));
        assert_eq!(values, vec![2, 3]);
        assert!(!strategy.remove(&mut values, &9));
    }

    #[rstest]
    fn test_custom_comparer_drives_has_and_without() {
        let strategy = ArrayStrategy::with_comparer(|left: &i32, right: &i32| left % 10 == right % 10);
        let values = vec![1, 12, 21];
        assert!(strategy.has(&values, &31));
        assert_eq!(strategy.without(&values, &11), vec![12]);
    }

    #[rstest]
    fn test_find_and_filter() {
        let strategy = ArrayStrategy::new();
        let values = vec![1, 2, 3, 4];
        assert_eq!(strategy.find(&values, |value| *value > 2), Some(&3));
        assert_eq!(
            strategy.filter(&values, |value| value % 2 == 0).copied().collect::<Vec<_>>(),
            vec![2, 4]
        );
    }
}
