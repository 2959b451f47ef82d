//! Capacity-bounded ring buffer.
//!
//! [`CircularArray`] keeps the most recent `capacity` values. Once full, every
//! new value overwrites the oldest one.
//!
//! # Slot Layout
//!
//! Values are written into slots; `pointer` is the slot the next write goes
//! to. Until the array is full, slots are filled front to back. Afterwards the
//! pointer wraps and the oldest value always sits at `pointer`.
//!
//! ```text
//! capacity = 3, after adding 1, 2, 3, 4
//!
//! slots:   [4, 2, 3]
//! pointer:     ^        (next write, also the oldest value)
//! logical: 2, 3, 4      (oldest to newest)
//! ```
//!
//! Iteration, indexing and equality use the logical order. The raw slot order
//! is available through [`CircularArray::as_slots`].
//!
//! # Examples
//!
//! ```rust
//! use massive_collections::circular::CircularArray;
//!
//! let mut recent = CircularArray::new(3)?;
//! for value in 1..=4 {
//!     recent.push(value);
//! }
//!
//! assert!(recent.is_full());
//! assert_eq!(recent.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
//! assert_eq!(recent.as_slots(), &[4, 2, 3]);
//! # Ok::<(), massive_collections::CollectionError>(())
//! ```

use std::fmt;
use std::num::NonZeroUsize;

use crate::CollectionError;

/// A fixed-capacity ring buffer that evicts its oldest value when full.
///
/// See the [module documentation](self) for the slot layout.
#[derive(Clone)]
pub struct CircularArray<T> {
    slots: Vec<T>,
    capacity: NonZeroUsize,
    pointer: usize,
}

impl<T> CircularArray<T> {
    /// Creates an empty array holding at most `capacity` values.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidCapacity`] when `capacity` is `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::circular::CircularArray;
    ///
    /// assert!(CircularArray::<u8>::new(4).is_ok());
    /// assert!(CircularArray::<u8>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, CollectionError> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(CollectionError::zero_capacity("CircularArray"))
    }

    /// Creates an empty array from an already validated capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.get()),
            capacity,
            pointer: 0,
        }
    }

    /// Maximum number of values held.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Slot the next value will be written to.
    #[inline]
    pub const fn pointer(&self) -> usize {
        self.pointer
    }

    /// Number of values held.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no value has been added yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` once `capacity` values are held.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity.get()
    }

    /// Adds `value`, returning the evicted oldest value when full.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::circular::CircularArray;
    ///
    /// let mut array = CircularArray::new(2)?;
    /// assert_eq!(array.push('a'), None);
    /// assert_eq!(array.push('b'), None);
    /// assert_eq!(array.push('c'), Some('a'));
    /// # Ok::<(), massive_collections::CollectionError>(())
    /// ```
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.is_full() {
            Some(std::mem::replace(&mut self.slots[self.pointer], value))
        } else {
            self.slots.push(value);
            None
        };
        self.pointer = (self.pointer + 1) % self.capacity.get();
        evicted
    }

    /// Slot index of the logical position `index` (0 = oldest).
    #[inline]
    const fn slot_of(&self, index: usize, length: usize) -> usize {
        if length == self.capacity.get() {
            (self.pointer + index) % length
        } else {
            index
        }
    }

    /// Returns the value at logical position `index`, 0 being the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        let length = self.slots.len();
        if index >= length {
            return None;
        }
        self.slots.get(self.slot_of(index, length))
    }

    /// Returns the oldest value.
    pub fn oldest(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the most recently added value.
    pub fn newest(&self) -> Option<&T> {
        self.slots.len().checked_sub(1).and_then(|last| self.get(last))
    }

    /// Iterates from the oldest to the newest value.
    pub fn iter(&self) -> CircularArrayIterator<'_, T> {
        let (older, newer) = if self.is_full() {
            let (front, back) = self.slots.split_at(self.pointer);
            (back, front)
        } else {
            (self.slots.as_slice(), &[][..])
        };
        CircularArrayIterator {
            inner: older.iter().chain(newer.iter()),
        }
    }

    /// Raw slot order, as written.
    #[inline]
    pub fn as_slots(&self) -> &[T] {
        &self.slots
    }

    /// Keeps only the values matching `predicate`, preserving logical order.
    ///
    /// The array is repacked so the remaining values occupy the first slots.
    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        if self.is_full() {
            self.slots.rotate_left(self.pointer);
        }
        self.slots.retain(predicate);
        self.pointer = self.slots.len() % self.capacity.get();
    }

    /// Removes every value. The capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.pointer = 0;
    }
}

impl<T: Clone> CircularArray<T> {
    /// Returns a copy with `value` added, leaving `self` untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::circular::CircularArray;
    ///
    /// let empty = CircularArray::new(2)?;
    /// let one = empty.add(1);
    ///
    /// assert!(empty.is_empty());
    /// assert_eq!(one.len(), 1);
    /// # Ok::<(), massive_collections::CollectionError>(())
    /// ```
    #[must_use]
    pub fn add(&self, value: T) -> Self {
        let mut next = self.clone();
        next.push(value);
        next
    }
}

impl<T: PartialEq> PartialEq for CircularArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity && self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularArray<T> {}

impl<T: fmt::Debug> fmt::Debug for CircularArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for CircularArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a CircularArray<T> {
    type Item = &'a T;
    type IntoIter = CircularArrayIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`CircularArray`], oldest value first.
pub struct CircularArrayIterator<'a, T> {
    inner: std::iter::Chain<std::slice::Iter<'a, T>, std::slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for CircularArrayIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for CircularArrayIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for CircularArrayIterator<'_, T> {}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
struct LogicalOrder<'a, T>(&'a CircularArray<T>);

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for LogicalOrder<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for CircularArray<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("CircularArray", 2)?;
        state.serialize_field("capacity", &self.capacity)?;
        state.serialize_field("values", &LogicalOrder(self))?;
        state.end()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CircularArrayRepresentation<T> {
    capacity: NonZeroUsize,
    values: Vec<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for CircularArray<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let representation =
            <CircularArrayRepresentation<T> as serde::Deserialize>::deserialize(deserializer)?;
        let mut array = Self::with_capacity(representation.capacity);
        array.extend(representation.values);
        Ok(array)
    }
}

static_assertions::assert_impl_all!(CircularArray<String>: Send, Sync, Clone);

// =============================================================================
// Tests
// =============================================================================
