//! Consistent hash ring over wallet names
//!
//! Lets concurrent workers pick wallets from a shared pool without talking to
//! each other: a sharding key always lands on the same wallet, and different
//! keys spread evenly across the pool.

use alloy::primitives::keccak256;

/// Points each wallet name occupies on the ring
pub const VIRTUAL_NODES: usize = 160;

/// Immutable ring mapping sharding keys to node names.
#[derive(Debug, Clone)]
pub struct HashRing {
    /// (point, index into `nodes`), sorted by point
    points: Vec<(u64, usize)>,
    nodes: Vec<String>,
}

impl HashRing {
    /// Build a ring over `nodes`.
    ///
    /// Callers pass names sorted so rings over the same set agree even when
    /// two names collide on a point.
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes: Vec<String> = nodes.into_iter().map(Into::into).collect();
        let mut points = Vec::with_capacity(nodes.len() * VIRTUAL_NODES);
        for (index, node) in nodes.iter().enumerate() {
            for replica in 0..VIRTUAL_NODES {
                points.push((hash_point(format!("{node}-{replica}").as_bytes()), index));
            }
        }
        // Stable sort keeps insertion order on equal points
        points.sort_by_key(|(point, _)| *point);

        Self { points, nodes }
    }

    /// Node owning `key`: the first point at or after the key's hash,
    /// wrapping around. `None` on an empty ring.
    pub fn get_node(&self, key: &str) -> Option<&str> {
        if self.points.is_empty() {
            return None;
        }
        let hash = hash_point(key.as_bytes());
        let pos = self.points.partition_point(|(point, _)| *point < hash);
        let (_, index) = self.points[pos % self.points.len()];
        Some(&self.nodes[index])
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn hash_point(data: &[u8]) -> u64 {
    let digest = keccak256(data);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}
