//! Shard nodes of the prefix routing tree.
//!
//! Every node owns a bucket of string suffixes and, while it still has depth
//! budget, a set of child nodes keyed by the next character of a routed string.
//! Children are kept sorted by key in inline storage; most nodes have only a
//! handful of children.
//!
//! `max_depth` is unbounded, so every whole-tree walk (sizes, pruning, stats,
//! clone, equality and drop) runs on an explicit work stack.

use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt;

use super::ShardStats;
use crate::keying::DefaultBuildHasher;

/// Number of children stored inline before spilling to the heap.
const INLINE_CHILDREN: usize = 4;

pub(crate) type Bucket = HashSet<Box<str>, DefaultBuildHasher>;

type Children = SmallVec<[(char, Box<ShardNode>); INLINE_CHILDREN]>;

/// A node of the routing tree behind [`MassiveSet`](super::MassiveSet).
///
/// A node with `depth_remaining() == 0` is a leaf bucket: it never has
/// children and stores every string routed to it.
pub struct ShardNode {
    depth: usize,
    depth_remaining: usize,
    members: Bucket,
    children: Children,
}

impl ShardNode {
    pub(crate) fn new(depth: usize, depth_remaining: usize) -> Self {
        Self {
            depth,
            depth_remaining,
            members: Bucket::default(),
            children: Children::new(),
        }
    }

    /// Number of characters consumed to reach this node.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Number of routing hops still available below this node.
    #[inline]
    pub const fn depth_remaining(&self) -> usize {
        self.depth_remaining
    }

    /// Returns `true` if this node can never have children.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.depth_remaining == 0
    }

    /// Returns the child routed by `key`, if it has been created.
    pub fn child(&self, key: char) -> Option<&Self> {
        self.find_child(key)
            .ok()
            .map(|index| self.children[index].1.as_ref())
    }

    /// Iterates over the immediate children in ascending key order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (char, &Self)> {
        self.children.iter().map(|(key, child)| (*key, child.as_ref()))
    }

    /// Iterates over the suffixes stored directly in this node's bucket.
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(AsRef::as_ref)
    }

    /// Total members stored in this node and all of its descendants.
    pub fn size(&self) -> usize {
        self.subtree().map(Self::size_local).sum()
    }

    /// Members stored directly in this node's bucket.
    #[inline]
    pub fn size_local(&self) -> usize {
        self.members.len()
    }

    /// Number of immediate children.
    #[inline]
    pub fn size_children(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes below this one, across the whole subtree.
    pub fn size_children_deep(&self) -> usize {
        self.subtree().skip(1).count()
    }

    /// Visits this node and every descendant, parents before children and
    /// siblings in ascending key order.
    fn subtree(&self) -> impl Iterator<Item = &Self> {
        let mut pending = vec![self];
        std::iter::from_fn(move || {
            let node = pending.pop()?;
            pending.extend(node.children.iter().rev().map(|(_, child)| &**child));
            Some(node)
        })
    }

    /// Copy of this node's bucket without its children.
    fn detached(&self) -> Self {
        Self {
            depth: self.depth,
            depth_remaining: self.depth_remaining,
            members: self.members.clone(),
            children: Children::new(),
        }
    }

    pub(crate) const fn members(&self) -> &Bucket {
        &self.members
    }

    /// Splits off the routing key of `suffix`, or returns `None` when the
    /// suffix terminates at this node.
    #[inline]
    fn route<'v>(&self, suffix: &'v str) -> Option<(char, &'v str)> {
        if self.depth_remaining == 0 {
            return None;
        }
        let key = suffix.chars().next()?;
        Some((key, &suffix[key.len_utf8()..]))
    }

    #[inline]
    fn find_child(&self, key: char) -> Result<usize, usize> {
        self.children.binary_search_by_key(&key, |(child_key, _)| *child_key)
    }

    fn child_or_insert(&mut self, key: char) -> &mut Self {
        let index = match self.find_child(key) {
            Ok(index) => index,
            Err(position) => {
                let child = Self::new(self.depth + 1, self.depth_remaining - 1);
                self.children.insert(position, (key, Box::new(child)));
                position
            }
        };
        self.children[index].1.as_mut()
    }

    pub(crate) fn insert(&mut self, value: &str) -> bool {
        let mut node = self;
        let mut suffix = value;
        while let Some((key, rest)) = node.route(suffix) {
            node = node.child_or_insert(key);
            suffix = rest;
        }
        if node.members.contains(suffix) {
            return false;
        }
        node.members.insert(Box::from(suffix))
    }

    pub(crate) fn contains(&self, value: &str) -> bool {
        let mut node = self;
        let mut suffix = value;
        while let Some((key, rest)) = node.route(suffix) {
            match node.child(key) {
                Some(child) => {
                    node = child;
                    suffix = rest;
                }
                None => return false,
            }
        }
        node.members.contains(suffix)
    }

    pub(crate) fn remove(&mut self, value: &str) -> bool {
        let mut node = self;
        let mut suffix = value;
        while let Some((key, rest)) = node.route(suffix) {
            let Ok(index) = node.find_child(key) else {
                return false;
            };
            node = node.children[index].1.as_mut();
            suffix = rest;
        }
        node.members.remove(suffix)
    }

    pub(crate) fn clear(&mut self) {
        self.members.clear();
        self.children.clear();
    }

    fn is_vacant(&self) -> bool {
        self.members.is_empty() && self.children.is_empty()
    }

    /// Drops every subtree that holds no members. Returns the number of nodes
    /// dropped.
    ///
    /// Children are detached and walked depth first; a node is reattached to
    /// its parent once its own children are settled, unless it ended up vacant.
    pub(crate) fn prune_empty(&mut self) -> usize {
        let mut pruned = 0;
        let mut root_pending = std::mem::take(&mut self.children).into_iter();
        let mut stack: Vec<PruneFrame> = Vec::new();
        loop {
            let pending = match stack.last_mut() {
                Some(frame) => &mut frame.pending,
                None => &mut root_pending,
            };
            if let Some((key, mut node)) = pending.next() {
                let pending = std::mem::take(&mut node.children).into_iter();
                stack.push(PruneFrame { key, node, pending });
                continue;
            }
            let Some(settled) = stack.pop() else {
                return pruned;
            };
            if settled.node.is_vacant() {
                pruned += 1;
                continue;
            }
            let parent = stack
                .last_mut()
                .map_or(&mut *self, |frame| &mut *frame.node);
            parent.children.push((settled.key, settled.node));
        }
    }

    pub(crate) fn collect_stats(&self, stats: &mut ShardStats) {
        for node in self.subtree() {
            stats.nodes += 1;
            stats.members += node.members.len();
            stats.largest_bucket = stats.largest_bucket.max(node.members.len());
            stats.deepest_node = stats.deepest_node.max(node.depth);
            if node.is_leaf() {
                stats.leaf_nodes += 1;
            }
            if node.is_vacant() {
                stats.empty_nodes += 1;
            }
            if !node.members.is_empty() {
                stats.occupied_buckets += 1;
            }
        }
    }

    /// Writes one line per node, indented by depth. Buckets are printed with
    /// their suffixes sorted.
    pub(crate) fn write_tree<W: fmt::Write>(&self, output: &mut W) -> fmt::Result {
        let mut pending: Vec<(Option<char>, &Self)> = vec![(None, self)];
        while let Some((key, node)) = pending.pop() {
            let indent = "  ".repeat(node.depth + 1);
            match key {
                Some(key) => write!(output, "{indent}{key:?}")?,
                None => write!(output, "{indent}root")?,
            }
            write!(
                output,
                " depth={} local={} children={}",
                node.depth,
                node.members.len(),
                node.children.len()
            )?;
            if !node.members.is_empty() {
                let mut suffixes: Vec<&str> = node.suffixes().collect();
                suffixes.sort_unstable();
                write!(output, " {suffixes:?}")?;
            }
            writeln!(output)?;
            pending.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|(key, child)| (Some(*key), &**child)),
            );
        }
        Ok(())
    }
}

/// A detached node awaiting its children during `ShardNode::prune_empty`.
struct PruneFrame {
    key: char,
    node: Box<ShardNode>,
    pending: <Children as IntoIterator>::IntoIter,
}

/// A node being copied by `ShardNode::clone`.
struct CloneFrame<'a> {
    key: char,
    source: &'a ShardNode,
    built: ShardNode,
    next: usize,
}

impl Clone for ShardNode {
    fn clone(&self) -> Self {
        let mut root = self.detached();
        let mut root_next = 0;
        let mut stack: Vec<CloneFrame<'_>> = Vec::new();
        loop {
            let (source, next) = match stack.last_mut() {
                Some(frame) => (frame.source, &mut frame.next),
                None => (self, &mut root_next),
            };
            if let Some((key, child)) = source.children.get(*next) {
                *next += 1;
                stack.push(CloneFrame {
                    key: *key,
                    source: child,
                    built: child.detached(),
                    next: 0,
                });
                continue;
            }
            let Some(copied) = stack.pop() else {
                return root;
            };
            let parent = stack.last_mut().map_or(&mut root, |frame| &mut frame.built);
            parent.children.push((copied.key, Box::new(copied.built)));
        }
    }
}

impl Drop for ShardNode {
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let mut pending: Vec<Box<Self>> = self.children.drain(..).map(|(_, child)| child).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain(..).map(|(_, child)| child));
        }
    }
}

impl PartialEq for ShardNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.depth != right.depth
                || left.depth_remaining != right.depth_remaining
                || left.children.len() != right.children.len()
                || left.members != right.members
            {
                return false;
            }
            for ((left_key, left_child), (right_key, right_child)) in
                left.children.iter().zip(&right.children)
            {
                if left_key != right_key {
                    return false;
                }
                pending.push((&**left_child, &**right_child));
            }
        }
        true
    }
}

impl Eq for ShardNode {}

impl fmt::Debug for ShardNode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<char> = self.children.iter().map(|(key, _)| *key).collect();
        formatter
            .debug_struct("ShardNode")
            .field("depth", &self.depth)
            .field("depth_remaining", &self.depth_remaining)
            .field("size_local", &self.members.len())
            .field("children", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_route_consumes_one_character() {
        let node = ShardNode::new(0, 2);
        assert_eq!(node.route("abc"), Some(('a', "bc")));
    }

    #[rstest]
    fn test_route_stops_at_leaf() {
        let node = ShardNode::new(2, 0);
        assert_eq!(node.route("abc"), None);
    }

    #[rstest]
    fn test_route_stops_at_exhausted_suffix() {
        let node = ShardNode::new(1, 1);
        assert_eq!(node.route(""), None);
    }

    #[rstest]
    fn test_route_handles_multibyte_characters() {
        let node = ShardNode::new(0, 1);
        assert_eq!(node.route("éa"), Some(('é', "a")));
    }

    #[rstest]
    fn test_insert_stores_suffix_in_terminal_bucket() {
        let mut node = ShardNode::new(0, 2);
        assert!(node.insert("abcd"));

        let terminal = node.child('a').and_then(|child| child.child('b'));
        let suffixes: Vec<&str> = terminal.map(|n| n.suffixes().collect()).unwrap_or_default();
        assert_eq!(suffixes, vec!["cd"]);
    }

    #[rstest]
    fn test_children_are_sorted_by_key() {
        let mut node = ShardNode::new(0, 1);
        for value in ["zeta", "alpha", "mu", "beta", "omega"] {
            node.insert(value);
        }
        let keys: Vec<char> = node.children().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!['a', 'b', 'm', 'o', 'z']);
    }

    #[rstest]
    fn test_leaf_never_creates_children() {
        let mut node = ShardNode::new(0, 0);
        node.insert("abc");
        node.insert("xyz");
        assert_eq!(node.size_children(), 0);
        assert_eq!(node.size_local(), 2);
    }

    #[rstest]
    fn test_remove_missing_path_does_not_create_nodes() {
        let mut node = ShardNode::new(0, 3);
        assert!(!node.remove("abc"));
        assert_eq!(node.size_children(), 0);
    }

    #[rstest]
    fn test_clone_copies_vacant_nodes_and_key_order() {
        let mut node = ShardNode::new(0, 2);
        for value in ["mb", "ma", "zz", "a"] {
            node.insert(value);
        }
        node.remove("zz");

        let copy = node.clone();
        assert_eq!(copy, node);
        assert_eq!(copy.size_children_deep(), node.size_children_deep());
        let keys: Vec<char> = copy.children().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!['a', 'm', 'z']);
    }

    #[rstest]
    fn test_equality_sees_vacant_nodes() {
        let mut pruned = ShardNode::new(0, 2);
        pruned.insert("ab");
        let mut kept = pruned.clone();
        kept.insert("cd");
        kept.remove("cd");

        assert_ne!(pruned, kept);
        kept.prune_empty();
        assert_eq!(pruned, kept);
    }

    #[rstest]
    fn test_prune_empty_keeps_surviving_key_order() {
        let mut node = ShardNode::new(0, 2);
        for value in ["d1", "b1", "c1", "a1"] {
            node.insert(value);
        }
        node.remove("b1");
        node.remove("d1");

        assert_eq!(node.prune_empty(), 4);
        let keys: Vec<char> = node.children().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!['a', 'c']);
        assert!(node.contains("a1"));
        assert!(node.contains("c1"));
    }

    #[rstest]
    fn test_write_tree_lists_nodes_depth_first() {
        let mut node = ShardNode::new(0, 1);
        node.insert("ba");
        node.insert("ab");

        let mut output = String::new();
        assert!(node.write_tree(&mut output).is_ok());
        assert_eq!(
            output,
            "  root depth=0 local=0 children=2\n    'a' depth=1 local=1 children=0 [\"b\"]\n    'b' depth=1 local=1 children=0 [\"a\"]\n"
        );
    }

    #[rstest]
    fn test_prune_empty_counts_whole_subtrees() {
        let mut node = ShardNode::new(0, 3);
        node.insert("abc");
        node.insert("b");
        node.remove("abc");

        assert_eq!(node.size_children_deep(), 4);
        assert_eq!(node.prune_empty(), 3);
        assert_eq!(node.size_children_deep(), 1);
        assert!(node.contains("b"));
    }
}
