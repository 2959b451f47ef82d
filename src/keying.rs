//! Equality and key-derivation helpers shared by the collections.
//!
//! - [`IsEqual`] / [`is_equal_default`]: value comparison used by the array
//!   and circular value strategies.
//! - [`ToKey`] / [`json_key`] / [`display_key`]: stable string keys used by the
//!   set value strategy to partition values into equality classes.
//! - [`DefaultBuildHasher`]: the hasher used by every hash-based bucket in the
//!   crate, switchable through the `fxhash` and `ahash` features.
//!
//! Keys produced here are only meant for equality partitioning. They are not
//! suitable for persistence or for anything security related.

/// A function comparing two values for equality.
pub type IsEqual<V> = fn(&V, &V) -> bool;

/// A function deriving a stable string key from a value.
pub type ToKey<V> = fn(&V) -> String;

/// Build hasher used by all hash-based storage in this crate.
///
/// With the `fxhash` feature this is `rustc_hash::FxBuildHasher`. With the
/// `ahash` feature (and without `fxhash`) this is `ahash::RandomState`.
/// Otherwise it is the standard library's `RandomState`.
#[cfg(feature = "fxhash")]
pub type DefaultBuildHasher = rustc_hash::FxBuildHasher;

/// Build hasher used by all hash-based storage in this crate.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultBuildHasher = ahash::RandomState;

/// Build hasher used by all hash-based storage in this crate.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultBuildHasher = std::collections::hash_map::RandomState;

/// Compares two values with `PartialEq`.
///
/// # Examples
///
/// ```rust
/// use massive_collections::keying::is_equal_default;
///
/// assert!(is_equal_default(&1, &1));
/// assert!(!is_equal_default(&"a", &"b"));
/// ```
#[inline]
pub fn is_equal_default<V: PartialEq>(left: &V, right: &V) -> bool {
    left == right
}

/// Derives a key from the JSON representation of a value.
///
/// Two values with the same JSON representation share a key, so structurally
/// equal values collapse even when they are distinct instances. Values that
/// cannot be represented as JSON get a key tagged with the serialization error;
/// such values only collide with other values failing the same way.
///
/// # Examples
///
/// ```rust
/// use massive_collections::keying::json_key;
///
/// assert_eq!(json_key(&vec![1, 2]), "[1,2]");
/// assert_eq!(json_key(&"text"), "\"text\"");
/// ```
#[cfg(feature = "json")]
pub fn json_key<V: serde::Serialize>(value: &V) -> String {
    serde_json::to_string(value).unwrap_or_else(|error| format!("!unserializable:{error}"))
}

/// Derives a key from the `Display` representation of a value.
///
/// # Examples
///
/// ```rust
/// use massive_collections::keying::display_key;
///
/// assert_eq!(display_key(&42), "42");
/// ```
pub fn display_key<V: std::fmt::Display>(value: &V) -> String {
    value.to_string()
}
