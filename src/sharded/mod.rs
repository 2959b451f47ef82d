//! Prefix-sharded string sets.
//!
//! - [`MassiveSet`]: deduplicating string set routed through a fixed-depth
//!   tree of shard nodes
//! - [`ShardNode`]: read-only view of one node of that tree
//! - [`ShardStats`]: diagnostics snapshot of a tree's shape
//!
//! # Examples
//!
//! ```rust
//! use massive_collections::sharded::MassiveSet;
//!
//! let mut set = MassiveSet::new(2);
//! for word in ["alpha", "alps", "beta"] {
//!     set.add(word);
//! }
//!
//! // Two first-level shards: 'a' and 'b'
//! assert_eq!(set.size_children(), 2);
//!
//! // Per-node introspection
//! let shard_a = set.root().child('a').expect("routed");
//! assert_eq!(shard_a.size(), 2);
//! ```

mod massive_set;
mod node;
mod stats;

pub use massive_set::DEFAULT_MAX_DEPTH;
pub use massive_set::MassiveSet;
pub use massive_set::MassiveSetIterator;
pub use node::ShardNode;
pub use stats::ShardStats;
