//! Tree skeleton generation: arena tree structure, attractor sampling,
//! space-colonization growth, and pipe-model radius solving.

mod attractor;
mod grower;
mod influence;
mod radius;
mod tree;

pub use attractor::sample_canopy_attractors;
pub use grower::{WIND_AXIS, grow_skeleton};
pub use influence::InfluenceBuffer;
pub use radius::solve_radii;
pub use tree::{Node, NodeId, SkeletonError, TreeSkeleton};
