//! The mutable multi-value map driver.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use indexmap::IndexMap;

use super::{ArrayStrategy, CircularStrategy, ValueStrategy};
use crate::CollectionError;
use crate::keying::DefaultBuildHasher;

/// A map from a key to a collection of values.
///
/// How the values of one key are stored, compared and evicted is decided by
/// the strategy `S`. The map keeps keys in first-insertion order: every
/// enumeration (`keys`, `keys_and_counts`, `entries`, `entries_flat`) visits
/// keys in the order they were first added.
///
/// Lookups of absent keys never fail: they report `false`, `0`, `None` or an
/// empty iterator.
///
/// # Type Parameters
///
/// * `K` - The key type. Must implement `Eq` and `Hash`.
/// * `V` - The value type.
/// * `S` - The value strategy, see [`ValueStrategy`].
///
/// # Examples
///
/// ```rust
/// use massive_collections::multimap::MultiValueMap;
///
/// let mut map = MultiValueMap::of_array();
/// map.add_keyed_values("fruit", ["apple", "pear"]);
/// map.add_keyed_values("veg", ["leek"]);
/// map.add_keyed_values("fruit", ["apple"]);
///
/// assert_eq!(map.count("fruit"), 3);
/// assert_eq!(map.count("nuts"), 0);
///
/// let counts: Vec<(&&str, usize)> = map.keys_and_counts().collect();
/// assert_eq!(counts, vec![(&"fruit", 3), (&"veg", 1)]);
/// ```
pub struct MultiValueMap<K, V, S>
where
    S: ValueStrategy<V>,
{
    strategy: S,
    entries: IndexMap<K, S::Container, DefaultBuildHasher>,
    marker: PhantomData<fn(V) -> V>,
}

impl<K, V, S> MultiValueMap<K, V, S>
where
    K: Eq + Hash,
    S: ValueStrategy<V>,
{
    /// Creates an empty map using `strategy` for every key's values.
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            entries: IndexMap::default(),
            marker: PhantomData,
        }
    }

    /// Returns the value strategy.
    #[inline]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Adds `values` under `key`, creating the entry if needed.
    ///
    /// The entry is created even when `values` is empty.
    pub fn add_keyed_values<I>(&mut self, key: K, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        let container = self
            .entries
            .entry(key)
            .or_insert_with(|| self.strategy.create());
        self.strategy.add_all(container, values);
    }

    /// Adds every value under the key `group_by` derives from it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::multimap::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::of_array();
    /// map.add_value_by(|word: &&str| word.len(), ["ox", "cat", "be", "dog"]);
    ///
    /// assert_eq!(map.values_for(&2).copied().collect::<Vec<_>>(), vec!["ox", "be"]);
    /// assert_eq!(map.values_for(&3).copied().collect::<Vec<_>>(), vec!["cat", "dog"]);
    /// ```
    pub fn add_value_by<F, I>(&mut self, group_by: F, values: I)
    where
        F: Fn(&V) -> K,
        I: IntoIterator<Item = V>,
    {
        for value in values {
            let container = self
                .entries
                .entry(group_by(&value))
                .or_insert_with(|| self.strategy.create());
            self.strategy.add(container, value);
        }
    }

    /// Replaces the values of `key` with `values`, keeping the key's position.
    pub fn set<I>(&mut self, key: K, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        let mut fresh = self.strategy.create();
        self.strategy.add_all(&mut fresh, values);
        self.entries.insert(key, fresh);
    }

    /// Returns `true` if `key` has an entry, even an empty one.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Returns `true` if `key` holds a value equal to `value`.
    pub fn has_key_value<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key)
            .is_some_and(|container| self.strategy.has(container, value))
    }

    /// Returns the container stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&S::Container>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Number of values under `key`, `0` when absent.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key)
            .map_or(0, |container| self.strategy.count(container))
    }

    /// Iterates over the values of `key`; empty when the key is absent.
    ///
    /// Calling it again restarts the iteration.
    pub fn values_for<'a, Q>(&'a self, key: &Q) -> impl Iterator<Item = &'a V> + use<'a, K, V, S, Q>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let strategy = &self.strategy;
        self.get(key)
            .into_iter()
            .flat_map(move |container| strategy.values(container))
    }

    /// Returns the first value of `key` matching `predicate`.
    pub fn find<Q, P>(&self, key: &Q, predicate: P) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: FnMut(&V) -> bool,
    {
        self.get(key)
            .and_then(|container| self.strategy.find(container, predicate))
    }

    /// Iterates over the values of `key` matching `predicate`.
    pub fn filter<'a, Q, P>(
        &'a self,
        key: &Q,
        predicate: P,
    ) -> impl Iterator<Item = &'a V> + use<'a, K, V, S, Q, P>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: FnMut(&V) -> bool,
    {
        let strategy = &self.strategy;
        self.get(key)
            .map(move |container| strategy.filter(container, predicate))
            .into_iter()
            .flatten()
    }

    /// Returns a copy of `key`'s container without values equal to `value`.
    ///
    /// The map itself is unchanged.
    pub fn without<Q>(&self, key: &Q, value: &V) -> Option<S::Container>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key)
            .map(|container| self.strategy.without(container, value))
    }

    /// Deletes `key` and all of its values. Returns `true` if it existed.
    ///
    /// The remaining keys keep their order. Adding `key` again appends it.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.shift_remove(key).is_some()
    }

    /// Removes values equal to `value` from `key`. Returns `true` if anything
    /// was removed.
    ///
    /// The key is kept even when its container becomes empty.
    pub fn delete_key_value<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let strategy = &self.strategy;
        self.entries
            .get_mut(key)
            .is_some_and(|container| strategy.remove(container, value))
    }

    /// Removes values equal to `value` from every key. Returns the number of
    /// keys that lost at least one value.
    pub fn delete_by_value(&mut self, value: &V) -> usize
    where
        V: Clone,
    {
        let mut affected = 0;
        for container in self.entries.values_mut() {
            if self.strategy.has(container, value) && self.strategy.remove(container, value) {
                affected += 1;
            }
        }
        affected
    }

    /// Returns the first key, in key order, holding a value equal to `value`.
    pub fn first_key_by_value(&self, value: &V) -> Option<&K> {
        self.entries
            .iter()
            .find(|(_, container)| self.strategy.has(container, value))
            .map(|(key, _)| key)
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of values across all keys.
    pub fn total_count(&self) -> usize {
        self.entries
            .values()
            .map(|container| self.strategy.count(container))
            .sum()
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> {
        self.entries.keys()
    }

    /// Iterates over `(key, container)` pairs.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = (&K, &S::Container)> {
        self.entries.iter()
    }

    /// Iterates over `(key, value count)` pairs.
    pub fn keys_and_counts(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries
            .iter()
            .map(|(key, container)| (key, self.strategy.count(container)))
    }

    /// Iterates over every `(key, value)` pair, key by key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::multimap::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::of_array();
    /// map.add_keyed_values('b', [1, 2]);
    /// map.add_keyed_values('a', [3]);
    ///
    /// let pairs: Vec<(char, i32)> = map.entries_flat().map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(pairs, vec![('b', 1), ('b', 2), ('a', 3)]);
    /// ```
    pub fn entries_flat(&self) -> impl Iterator<Item = (&K, &V)> {
        let strategy = &self.strategy;
        self.entries.iter().flat_map(move |(key, container)| {
            strategy.values(container).map(move |value| (key, value))
        })
    }

    /// Iterates over every value, key by key.
    pub fn values_flat(&self) -> impl Iterator<Item = &V> {
        self.entries_flat().map(|(_, value)| value)
    }
}

impl<K, V> MultiValueMap<K, V, ArrayStrategy<V>>
where
    K: Eq + Hash,
    V: PartialEq,
{
    /// Creates a map storing values in insertion order, duplicates allowed.
    pub fn of_array() -> Self {
        Self::new(ArrayStrategy::new())
    }
}

#[cfg(feature = "json")]
impl<K, V> MultiValueMap<K, V, super::SetStrategy<V>>
where
    K: Eq + Hash,
    V: serde::Serialize,
{
    /// Creates a map storing each distinct value (by JSON representation)
    /// once per key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::multimap::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::of_set();
    /// map.add_keyed_values("tags", ["a", "b", "a"]);
    /// assert_eq!(map.count("tags"), 2);
    /// ```
    pub fn of_set() -> Self {
        Self::new(super::SetStrategy::new())
    }
}

impl<K, V> MultiValueMap<K, V, CircularStrategy<V>>
where
    K: Eq + Hash,
    V: PartialEq,
{
    /// Creates a map keeping the latest `capacity` values per key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidCapacity`] when `capacity` is `0`.
    pub fn of_circular(capacity: usize) -> Result<Self, CollectionError> {
        CircularStrategy::new(capacity).map(Self::new)
    }
}

impl<K, V, S> Default for MultiValueMap<K, V, S>
where
    K: Eq + Hash,
    S: ValueStrategy<V> + Default,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<K, V, S> Clone for MultiValueMap<K, V, S>
where
    K: Clone,
    S: ValueStrategy<V> + Clone,
    S::Container: Clone,
{
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy.clone(),
            entries: self.entries.clone(),
            marker: PhantomData,
        }
    }
}

impl<K, V, S> Extend<(K, V)> for MultiValueMap<K, V, S>
where
    K: Eq + Hash,
    S: ValueStrategy<V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add_keyed_values(key, [value]);
        }
    }
}

struct ContainerDebug<'a, V, S: ValueStrategy<V>> {
    strategy: &'a S,
    container: &'a S::Container,
    marker: PhantomData<fn(V)>,
}

impl<V: fmt::Debug, S: ValueStrategy<V>> fmt::Debug for ContainerDebug<'_, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.strategy.values(self.container))
            .finish()
    }
}

impl<K, V, S> fmt::Debug for MultiValueMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
    S: ValueStrategy<V>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.entries.iter().map(|(key, container)| {
                (
                    key,
                    ContainerDebug {
                        strategy: &self.strategy,
                        container,
                        marker: PhantomData,
                    },
                )
            }))
            .finish()
    }
}

static_assertions::assert_impl_all!(
    MultiValueMap<String, i32, ArrayStrategy<i32>>: Send, Sync, Clone
);
