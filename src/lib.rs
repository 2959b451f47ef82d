//! # massive-collections
//!
//! Collections for managing many values under amortized constant-time
//! operations with clear mutation contracts.
//!
//! ## Overview
//!
//! - **Sharded Sets**: [`MassiveSet`](sharded::MassiveSet), a string set whose
//!   members are routed by prefix characters into a fixed-depth tree of
//!   hash-set buckets
//! - **Multi-Value Maps**: [`MultiValueMap`](multimap::MultiValueMap), a map from
//!   a key to many values with array, set or circular value strategies
//! - **Ring Buffers**: [`CircularArray`](circular::CircularArray), a
//!   capacity-bounded buffer evicting its oldest value
//! - **Keying**: equality and key-derivation helpers shared by the above
//!
//! ## Feature Flags
//!
//! - `sharded`: [`MassiveSet`](sharded::MassiveSet) and its shard tree
//! - `circular`: [`CircularArray`](circular::CircularArray)
//! - `multimap`: [`MultiValueMap`](multimap::MultiValueMap) and its strategies
//!   (enables `circular`)
//! - `json`: JSON-based default keys for the set strategy
//! - `serde`: `Serialize`/`Deserialize` for the collections
//! - `fxhash` / `ahash`: faster hashers for every hash-based bucket
//! - `full`: enable all collection features and serde
//!
//! ## Example
//!
//! ```rust
//! use massive_collections::prelude::*;
//!
//! let mut words = MassiveSet::new(2);
//! words.add("shard");
//! words.add("share");
//! assert!(words.has("share"));
//!
//! let mut by_initial = MultiValueMap::of_array();
//! by_initial.add_value_by(|word: &String| word.chars().next(), words.iter());
//! assert_eq!(by_initial.count(&Some('s')), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the collections and the strategy trait.
///
/// # Usage
///
/// ```rust
/// use massive_collections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;

    #[cfg(feature = "sharded")]
    pub use crate::sharded::*;

    #[cfg(feature = "circular")]
    pub use crate::circular::*;

    #[cfg(feature = "multimap")]
    pub use crate::multimap::*;
}

mod error;
pub mod keying;

#[cfg(feature = "sharded")]
pub mod sharded;

#[cfg(feature = "circular")]
pub mod circular;

#[cfg(feature = "multimap")]
pub mod multimap;

pub use error::CapacityError;
pub use error::CollectionError;

#[cfg(feature = "circular")]
pub use circular::CircularArray;
