//! Prefix-sharded string set.
//!
//! [`MassiveSet`] keeps very large string sets responsive by bounding the size
//! of any single hash set: strings are routed through a tree of shard nodes,
//! one character per level, and stored in the bucket where routing ends.
//!
//! # Routing
//!
//! A string `s` takes exactly `min(max_depth, chars(s))` hops from the root.
//! Each hop consumes one character and selects (or creates) a child keyed by
//! it. The unconsumed suffix is stored in the bucket of the node reached.
//! `has` and `remove` follow the same path but never create nodes.
//!
//! ```text
//! max_depth = 2, members {a, abc, abcd, acd, d}
//!
//! root ─ 'a' ─ {""}
//!        │     ├─ 'b' ─ {"c", "cd"}
//!        │     └─ 'c' ─ {"d"}
//!        └ 'd' ─ {""}
//! ```
//!
//! A depth of `0` degenerates to a single flat hash set at the root.
//!
//! # Removal
//!
//! `remove` leaves emptied nodes in place, so `size_children` reflects every
//! prefix ever routed. [`MassiveSet::compact`] drops empty subtrees on demand.
//!
//! # Examples
//!
//! ```rust
//! use massive_collections::sharded::MassiveSet;
//!
//! let mut set = MassiveSet::new(2);
//! set.add("apple");
//! set.add("apricot");
//!
//! assert!(set.has("apple"));
//! assert!(!set.has("banana"));
//! assert_eq!(set.size(), 2);
//! assert_eq!(set.size_children(), 1);
//! ```

use std::collections::hash_set;
use std::fmt;

use super::{ShardNode, ShardStats};

/// Default routing depth.
pub const DEFAULT_MAX_DEPTH: usize = 1;

/// A deduplicating string set sharded by prefix characters.
///
/// See the [module documentation](self) for the routing rules.
#[derive(Clone)]
pub struct MassiveSet {
    max_depth: usize,
    root: ShardNode,
    length: usize,
}

impl MassiveSet {
    /// Creates an empty set routing through at most `max_depth` levels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::sharded::MassiveSet;
    ///
    /// let set = MassiveSet::new(3);
    /// assert_eq!(set.max_depth(), 3);
    /// assert!(set.is_empty());
    /// ```
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            root: ShardNode::new(0, max_depth),
            length: 0,
        }
    }

    /// Returns the routing depth fixed at construction.
    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Adds `value`. Returns `true` if it was not already present.
    ///
    /// Adding a string twice is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::sharded::MassiveSet;
    ///
    /// let mut set = MassiveSet::new(1);
    /// assert!(set.add("x"));
    /// assert!(!set.add("x"));
    /// assert_eq!(set.size(), 1);
    /// ```
    pub fn add(&mut self, value: &str) -> bool {
        let inserted = self.root.insert(value);
        if inserted {
            self.length += 1;
        }
        inserted
    }

    /// Returns `true` if `value` is a member.
    pub fn has(&self, value: &str) -> bool {
        self.root.contains(value)
    }

    /// Removes `value`. Returns `true` if it was present.
    ///
    /// Nodes emptied by the removal are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::sharded::MassiveSet;
    ///
    /// let mut set = MassiveSet::new(2);
    /// set.add("abc");
    /// assert!(set.remove("abc"));
    /// assert!(!set.remove("abc"));
    /// assert_eq!(set.size_children(), 1);
    /// ```
    pub fn remove(&mut self, value: &str) -> bool {
        let removed = self.root.remove(value);
        if removed {
            self.length -= 1;
        }
        removed
    }

    /// Counts members by walking the whole tree.
    ///
    /// Always equal to [`len`](Self::len), which is tracked incrementally.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Members stored directly at the root bucket.
    ///
    /// Non-zero only for the empty string or when `max_depth` is `0`.
    pub fn size_local(&self) -> usize {
        self.root.size_local()
    }

    /// Number of first-level shards.
    pub fn size_children(&self) -> usize {
        self.root.size_children()
    }

    /// Number of shard nodes below the root.
    pub fn size_children_deep(&self) -> usize {
        self.root.size_children_deep()
    }

    /// Number of members.
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the set holds no members.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Removes every member and every shard node.
    pub fn clear(&mut self) {
        self.root.clear();
        self.length = 0;
    }

    /// Drops every shard subtree that holds no members and returns the
    /// number of nodes dropped. Membership is unaffected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use massive_collections::sharded::MassiveSet;
    ///
    /// let mut set = MassiveSet::new(2);
    /// set.add("abc");
    /// set.remove("abc");
    /// assert_eq!(set.size_children_deep(), 2);
    /// assert_eq!(set.compact(), 2);
    /// assert_eq!(set.size_children_deep(), 0);
    /// ```
    pub fn compact(&mut self) -> usize {
        self.root.prune_empty()
    }

    /// Returns the root shard node for per-node inspection.
    #[inline]
    pub const fn root(&self) -> &ShardNode {
        &self.root
    }

    /// Takes a diagnostics snapshot of the tree.
    pub fn stats(&self) -> ShardStats {
        let mut stats = ShardStats {
            max_depth: self.max_depth,
            ..ShardStats::default()
        };
        self.root.collect_stats(&mut stats);
        stats
    }

    /// Renders the tree as indented text, one node per line.
    ///
    /// Buckets are printed with their suffixes sorted so the output is stable.
    pub fn dump(&self) -> String {
        TreeDump(self).to_string()
    }

    /// Iterates over all members.
    ///
    /// Members of a node are yielded before those of its children, children
    /// in ascending key order. Order within a bucket is unspecified but stable
    /// while the set is not mutated.
    pub fn iter(&self) -> MassiveSetIterator<'_> {
        MassiveSetIterator {
            pending: vec![(0, None, &self.root)],
            prefix: String::new(),
            current: None,
            remaining: self.length,
        }
    }
}

impl Default for MassiveSet {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl PartialEq for MassiveSet {
    fn eq(&self, other: &Self) -> bool {
        self.max_depth == other.max_depth
            && self.length == other.length
            && self.iter().all(|value| other.has(&value))
    }
}

impl Eq for MassiveSet {}

impl fmt::Debug for MassiveSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

struct TreeDump<'a>(&'a MassiveSet);

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            formatter,
            "MassiveSet max_depth={} size={}",
            self.0.max_depth, self.0.length
        )?;
        self.0.root.write_tree(formatter)
    }
}

impl<S: AsRef<str>> FromIterator<S> for MassiveSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for MassiveSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            self.add(value.as_ref());
        }
    }
}

impl<'a> IntoIterator for &'a MassiveSet {
    type Item = String;
    type IntoIter = MassiveSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of a [`MassiveSet`].
///
/// Yields owned strings rebuilt from the routing prefix and stored suffix.
/// The walk shares one prefix buffer: each pending node remembers the prefix
/// length of its parent and the key that routes to it.
pub struct MassiveSetIterator<'a> {
    pending: Vec<(usize, Option<char>, &'a ShardNode)>,
    prefix: String,
    current: Option<hash_set::Iter<'a, Box<str>>>,
    remaining: usize,
}

impl Iterator for MassiveSetIterator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(suffixes) = &mut self.current
                && let Some(suffix) = suffixes.next()
            {
                self.remaining = self.remaining.saturating_sub(1);
                let mut value = String::with_capacity(self.prefix.len() + suffix.len());
                value.push_str(&self.prefix);
                value.push_str(suffix);
                return Some(value);
            }
            let (parent_length, key, node) = self.pending.pop()?;
            self.prefix.truncate(parent_length);
            if let Some(key) = key {
                self.prefix.push(key);
            }
            let length = self.prefix.len();
            self.pending
                .extend(node.children().rev().map(|(key, child)| (length, Some(key), child)));
            self.current = Some(node.members().iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MassiveSetIterator<'_> {}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
struct Members<'a>(&'a MassiveSet);

#[cfg(feature = "serde")]
impl serde::Serialize for Members<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MassiveSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("MassiveSet", 2)?;
        state.serialize_field("max_depth", &self.max_depth)?;
        state.serialize_field("values", &Members(self))?;
        state.end()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MassiveSetRepresentation {
    max_depth: usize,
    values: Vec<String>,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MassiveSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let representation =
            <MassiveSetRepresentation as serde::Deserialize>::deserialize(deserializer)?;
        let mut set = Self::new(representation.max_depth);
        set.extend(representation.values);
        Ok(set)
    }
}

static_assertions::assert_impl_all!(MassiveSet: Send, Sync, Clone);

// =============================================================================
// Tests
// =============================================================================
