//! Error types for collection construction.
//!
//! Steady-state operations on the collections in this crate never fail:
//! absent keys and values are reported as `false`, `0`, `None` or an empty
//! iterator. The only fallible step is construction with an invalid
//! configuration, which is a programmer error surfaced as a [`CollectionError`].

/// Represents a rejected capacity passed to a bounded collection.
///
/// # Examples
///
/// ```rust
/// use massive_collections::CapacityError;
///
/// let error = CapacityError {
///     collection_name: "CircularArray",
///     requested: 0,
/// };
/// assert_eq!(
///     format!("{}", error),
///     "CircularArray: capacity must be at least 1, got 0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityError {
    /// The name of the collection that rejected the capacity.
    pub collection_name: &'static str,
    /// The capacity that was requested.
    pub requested: usize,
}

impl std::fmt::Display for CapacityError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}: capacity must be at least 1, got {}",
            self.collection_name, self.requested
        )
    }
}

impl std::error::Error for CapacityError {}

/// Errors raised while constructing a collection.
///
/// # Examples
///
/// ```rust
/// use massive_collections::{CircularArray, CollectionError};
///
/// let result = CircularArray::<i32>::new(0);
/// assert!(matches!(result, Err(CollectionError::InvalidCapacity(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A bounded collection was configured with an unusable capacity.
    InvalidCapacity(CapacityError),
}

impl CollectionError {
    pub(crate) const fn zero_capacity(collection_name: &'static str) -> Self {
        Self::InvalidCapacity(CapacityError {
            collection_name,
            requested: 0,
        })
    }
}

impl std::fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCapacity(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for CollectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidCapacity(error) => Some(error),
        }
    }
}
