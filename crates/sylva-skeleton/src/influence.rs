//! Per-iteration influence accumulation.
//!
//! During each growth iteration, attractors vote on the node nearest to
//! them. The buffer stores, per node, the running sum of unit pull
//! directions and the number of contributions; it is rebuilt (resized and
//! cleared) at the start of every iteration and carries no state across
//! iterations.

use glam::Vec3;

use crate::tree::NodeId;

/// Dense per-node accumulator for attractor pull directions.
#[derive(Debug)]
pub struct InfluenceBuffer {
    sum: Vec<Vec3>,
    count: Vec<u32>,
}

impl InfluenceBuffer {
    /// Create a buffer covering `len` nodes.
    pub fn with_len(len: usize) -> Self {
        Self {
            sum: vec![Vec3::ZERO; len],
            count: vec![0; len],
        }
    }

    /// Resize to exactly `len` nodes and clear all accumulated influence.
    pub fn ensure_len(&mut self, len: usize) {
        if self.sum.len() != len {
            self.sum.resize(len, Vec3::ZERO);
            self.count.resize(len, 0);
        }
        self.clear();
    }

    /// Zero all sums and counts, keeping the current length.
    pub fn clear(&mut self) {
        self.sum.fill(Vec3::ZERO);
        self.count.fill(0);
    }

    /// Add one unit pull direction for node `id`.
    #[inline]
    pub fn add(&mut self, id: NodeId, dir: Vec3) {
        self.sum[id] += dir;
        self.count[id] += 1;
    }

    /// Number of contributions recorded for node `id`.
    #[inline]
    pub fn count(&self, id: NodeId) -> u32 {
        self.count[id]
    }

    /// Average pull direction for node `id`, or zero if uninfluenced.
    #[inline]
    pub fn average(&self, id: NodeId) -> Vec3 {
        if self.count[id] == 0 {
            Vec3::ZERO
        } else {
            self.sum[id] / self.count[id] as f32
        }
    }

    /// Ids with at least one contribution, in ascending order.
    pub fn influenced_indices(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.count
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(id, _)| id)
    }
}
