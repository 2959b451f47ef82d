//! The value strategy abstraction.

/// Defines how the values stored under one key of a
/// [`MultiValueMap`](super::MultiValueMap) behave.
///
/// A strategy owns no values itself: it creates containers and is the only
/// code that mutates or inspects them. The map only does key bookkeeping.
///
/// # Laws
///
/// For any container `c` and value `v`:
///
/// - after `add(c, v)`, `has(c, &v)` holds unless the strategy evicted `v`
///   immediately (not possible for any built-in strategy)
/// - `count(c) == values(c).count()`
/// - `has(&without(c, &v), &v)` is `false`
pub trait ValueStrategy<V> {
    /// The per-key container.
    type Container;

    /// Creates an empty container.
    fn create(&self) -> Self::Container;

    /// Adds one value to `container`.
    fn add(&self, container: &mut Self::Container, value: V);

    /// Adds every value of `values` to `container`, in order.
    fn add_all<I>(&self, container: &mut Self::Container, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        for value in values {
            self.add(container, value);
        }
    }

    /// Returns `true` if `container` holds a value equal to `value`.
    fn has(&self, container: &Self::Container, value: &V) -> bool;

    /// Number of values held by `container`.
    fn count(&self, container: &Self::Container) -> usize;

    /// Iterates over the values of `container` in the strategy's order.
    fn values<'a>(&self, container: &'a Self::Container) -> impl Iterator<Item = &'a V>
    where
        V: 'a;

    /// Returns a copy of `container` without any value equal to `value`.
    fn without(&self, container: &Self::Container, value: &V) -> Self::Container
    where
        V: Clone;

    /// Removes every value equal to `value`. Returns `true` if anything was
    /// removed.
    fn remove(&self, container: &mut Self::Container, value: &V) -> bool
    where
        V: Clone,
    {
        let before = self.count(container);
        *container = self.without(container, value);
        self.count(container) != before
    }

    /// Returns the first value matching `predicate`.
    fn find<'a, P>(&self, container: &'a Self::Container, mut predicate: P) -> Option<&'a V>
    where
        V: 'a,
        P: FnMut(&V) -> bool,
    {
        self.values(container).find(|value| predicate(*value))
    }

    /// Iterates over the values matching `predicate`.
    fn filter<'a, P>(
        &self,
        container: &'a Self::Container,
        mut predicate: P,
    ) -> impl Iterator<Item = &'a V>
    where
        V: 'a,
        P: FnMut(&V) -> bool,
    {
        self.values(container).filter(move |value| predicate(*value))
    }
}
