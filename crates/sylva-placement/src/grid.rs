//! Uniform spatial hash grid for amortized constant-time spacing queries.

use glam::DVec2;
use hashbrown::HashMap;

/// Spatial hash over accepted placement points.
///
/// Cell size is `min_spacing / √2`, so a cell can hold at most one point
/// and a spacing query only needs the `⌈min_spacing / cell_size⌉`-cell
/// neighborhood around the candidate.
pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64), DVec2>,
}

impl SpatialGrid {
    /// Create a grid sized for the given minimum spacing.
    pub fn new(min_spacing: f64) -> Self {
        debug_assert!(min_spacing > 0.0, "min_spacing must be positive");
        Self {
            cell_size: min_spacing / std::f64::consts::SQRT_2,
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, point: DVec2) -> (i64, i64) {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
        )
    }

    /// Register an accepted point.
    pub fn insert(&mut self, point: DVec2) {
        self.cells.insert(self.cell_of(point), point);
    }

    /// Number of registered points.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no points are registered.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when any registered point lies strictly closer than `radius`
    /// to `point`. Only the cell neighborhood covering `radius` is scanned.
    pub fn has_neighbor_within(&self, point: DVec2, radius: f64) -> bool {
        let (cx, cz) = self.cell_of(point);
        let reach = (radius / self.cell_size).ceil() as i64;
        let r2 = radius * radius;
        for dx in -reach..=reach {
            for dz in -reach..=reach {
                if let Some(&other) = self.cells.get(&(cx + dx, cz + dz))
                    && (other - point).length_squared() < r2
                {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_a_close_neighbor() {
        let mut grid = SpatialGrid::new(2.0);
        grid.insert(DVec2::new(0.0, 0.0));
        assert!(grid.has_neighbor_within(DVec2::new(1.0, 0.0), 2.0));
    }

    #[test]
    fn ignores_points_beyond_the_radius() {
        let mut grid = SpatialGrid::new(2.0);
        grid.insert(DVec2::new(0.0, 0.0));
        assert!(!grid.has_neighbor_within(DVec2::new(5.0, 0.0), 2.0));
    }

    #[test]
    fn boundary_distance_is_not_a_violation() {
        let mut grid = SpatialGrid::new(2.0);
        grid.insert(DVec2::new(0.0, 0.0));
        // Exactly at the radius: strict inequality, so acceptable.
        assert!(!grid.has_neighbor_within(DVec2::new(2.0, 0.0), 2.0));
    }

    #[test]
    fn works_across_cell_boundaries_and_negative_coords() {
        let mut grid = SpatialGrid::new(1.0);
        grid.insert(DVec2::new(-0.01, -0.01));
        assert!(grid.has_neighbor_within(DVec2::new(0.01, 0.01), 1.0));
        grid.insert(DVec2::new(-7.3, 4.2));
        assert!(grid.has_neighbor_within(DVec2::new(-7.0, 4.0), 1.0));
    }

    #[test]
    fn brute_force_agreement_on_a_scattered_set() {
        let mut grid = SpatialGrid::new(1.5);
        let mut points = Vec::new();
        // Deterministic scatter with pairwise distance >= 1.5.
        for i in 0..10 {
            for j in 0..10 {
                let p = DVec2::new(i as f64 * 1.6, j as f64 * 1.6);
                points.push(p);
                grid.insert(p);
            }
        }
        for probe in [
            DVec2::new(0.7, 0.7),
            DVec2::new(8.05, 8.05),
            DVec2::new(-3.0, -3.0),
            DVec2::new(15.99, 0.0),
        ] {
            let brute = points.iter().any(|p| (*p - probe).length() < 1.5);
            assert_eq!(
                grid.has_neighbor_within(probe, 1.5),
                brute,
                "grid and brute force disagree at {probe:?}"
            );
        }
    }
}
