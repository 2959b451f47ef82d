//! Multi-value maps with pluggable value containers.
//!
//! A [`MultiValueMap`] associates each key with a collection of values. The
//! behaviour of that collection is supplied by a [`ValueStrategy`]:
//!
//! - [`ArrayStrategy`]: insertion order, duplicates allowed
//! - [`SetStrategy`]: one value per derived key, later duplicates skipped
//! - [`CircularStrategy`]: the latest `capacity` values, oldest evicted first
//!
//! The map driver is identical for all three; only the strategy changes.
//!
//! # Examples
//!
//! ```rust
//! use massive_collections::multimap::MultiValueMap;
//!
//! let mut recent = MultiValueMap::of_circular(2)?;
//! recent.add_keyed_values("sensor", [1, 2, 3]);
//!
//! assert_eq!(recent.count("sensor"), 2);
//! assert_eq!(recent.values_for("sensor").copied().collect::<Vec<_>>(), vec![2, 3]);
//! # Ok::<(), massive_collections::CollectionError>(())
//! ```

mod array;
mod circular;
mod map;
mod set;
mod strategy;

pub use array::ArrayStrategy;
pub use circular::CircularStrategy;
pub use map::MultiValueMap;
pub use set::KeyedValues;
pub use set::SetStrategy;
pub use strategy::ValueStrategy;
