//! Set-backed value strategy.

use std::fmt;

use indexmap::IndexMap;

use super::ValueStrategy;
use crate::keying::{DefaultBuildHasher, ToKey};

/// Container of the set strategy: values indexed by their derived key, in
/// first-insertion order.
pub type KeyedValues<V> = IndexMap<String, V, DefaultBuildHasher>;

/// Stores at most one value per derived key.
///
/// Adding a value whose key is already present is skipped: the value stored
/// first is kept. The key function defaults to the JSON representation of the
/// value (feature `json`), so structurally equal values collapse into one.
/// Values are iterated in the order their keys were first added.
///
/// # Examples
///
/// ```rust
/// use massive_collections::multimap::{SetStrategy, ValueStrategy};
///
/// let strategy = SetStrategy::with_key(|value: &i32| (value % 3).to_string());
/// let mut values = strategy.create();
/// strategy.add_all(&mut values, [1, 4, 2]);
///
/// // 4 shares the key of 1 and was skipped
/// assert_eq!(strategy.count(&values), 2);
/// assert!(strategy.has(&values, &7));
/// ```
pub struct SetStrategy<V> {
    to_key: ToKey<V>,
}

#[cfg(feature = "json")]
impl<V: serde::Serialize> SetStrategy<V> {
    /// Creates a strategy keying values by their JSON representation.
    pub fn new() -> Self {
        Self::with_key(crate::keying::json_key::<V>)
    }
}

impl<V> SetStrategy<V> {
    /// Creates a strategy keying values with `to_key`.
    pub const fn with_key(to_key: ToKey<V>) -> Self {
        Self { to_key }
    }

    /// Derives the key `value` is stored under.
    pub fn key_of(&self, value: &V) -> String {
        (self.to_key)(value)
    }
}

#[cfg(feature = "json")]
impl<V: serde::Serialize> Default for SetStrategy<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for SetStrategy<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for SetStrategy<V> {}

impl<V> fmt::Debug for SetStrategy<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("SetStrategy").finish_non_exhaustive()
    }
}

impl<V> ValueStrategy<V> for SetStrategy<V> {
    type Container = KeyedValues<V>;

    fn create(&self) -> Self::Container {
        KeyedValues::default()
    }

    fn add(&self, container: &mut Self::Container, value: V) {
        container.entry(self.key_of(&value)).or_insert(value);
    }

    fn has(&self, container: &Self::Container, value: &V) -> bool {
        container.contains_key(&self.key_of(value))
    }

    fn count(&self, container: &Self::Container) -> usize {
        container.len()
    }

    fn values<'a>(&self, container: &'a Self::Container) -> impl Iterator<Item = &'a V>
    where
        V: 'a,
    {
        container.values()
    }

    fn without(&self, container: &Self::Container, value: &V) -> Self::Container
    where
        V: Clone,
    {
        let excluded = self.key_of(value);
        container
            .iter()
            .filter(|(key, _)| **key != excluded)
            .map(|(key, item)| (key.clone(), item.clone()))
            .collect()
    }

    fn remove(&self, container: &mut Self::Container, value: &V) -> bool
    where
        V: Clone,
    {
        container.shift_remove(&self.key_of(value)).is_some()
    }
}
