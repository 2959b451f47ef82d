//! Diagnostics snapshot of a [`MassiveSet`](super::MassiveSet) tree.

use std::fmt;

/// Shape of a shard tree at one point in time.
///
/// Useful for tuning `max_depth` against the key distribution of a workload:
/// a large `largest_bucket` means the tree is too shallow, many `empty_nodes`
/// after heavy removal means [`MassiveSet::compact`](super::MassiveSet::compact)
/// would reclaim memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShardStats {
    /// Configured routing depth.
    pub max_depth: usize,
    /// Members stored across all buckets.
    pub members: usize,
    /// Nodes in the tree, root included.
    pub nodes: usize,
    /// Nodes that exhausted their depth budget.
    pub leaf_nodes: usize,
    /// Nodes with neither members nor children.
    pub empty_nodes: usize,
    /// Nodes whose bucket holds at least one member.
    pub occupied_buckets: usize,
    /// Member count of the fullest bucket.
    pub largest_bucket: usize,
    /// Depth of the deepest node.
    pub deepest_node: usize,
}

impl ShardStats {
    /// Average members per occupied bucket, or `0.0` for an empty tree.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_bucket(&self) -> f64 {
        if self.occupied_buckets == 0 {
            0.0
        } else {
            self.members as f64 / self.occupied_buckets as f64
        }
    }
}

impl fmt::Display for ShardStats {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "members={} nodes={} leaves={} empty={} largest_bucket={} depth={}/{}",
            self.members,
            self.nodes,
            self.leaf_nodes,
            self.empty_nodes,
            self.largest_bucket,
            self.deepest_node,
            self.max_depth
        )
    }
}
