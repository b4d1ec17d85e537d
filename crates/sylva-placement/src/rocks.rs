//! Rock formation exclusion footprints.

use glam::DVec3;

/// A rock formation occupying part of the field.
///
/// Trees keep `rock_clearance` away from the collider's XZ footprint.
#[derive(Clone, Copy, Debug)]
pub struct RockFormation {
    /// Collider center.
    pub position: DVec3,
    /// Collider half-extents along each axis.
    pub half_extents: DVec3,
}

impl RockFormation {
    /// True when the planar point `(x, z)` falls inside this rock's
    /// box-plus-clearance footprint.
    ///
    /// Colliders without a usable planar extent fall back to a radial
    /// check with radius `clearance`.
    pub fn excludes(&self, x: f64, z: f64, clearance: f64) -> bool {
        let hx = self.half_extents.x;
        let hz = self.half_extents.z;
        if hx > f64::EPSILON && hz > f64::EPSILON {
            (x - self.position.x).abs() <= hx + clearance
                && (z - self.position.z).abs() <= hz + clearance
        } else {
            let radius = hx.max(hz).max(0.0) + clearance;
            let dx = x - self.position.x;
            let dz = z - self.position.z;
            dx * dx + dz * dz <= radius * radius
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boulder() -> RockFormation {
        RockFormation {
            position: DVec3::new(10.0, 0.0, -5.0),
            half_extents: DVec3::new(2.0, 1.5, 3.0),
        }
    }

    #[test]
    fn box_footprint_includes_clearance_margin() {
        let rock = boulder();
        assert!(rock.excludes(10.0, -5.0, 1.0), "center must be excluded");
        assert!(rock.excludes(12.9, -5.0, 1.0), "inside x margin");
        assert!(!rock.excludes(13.1, -5.0, 1.0), "outside x margin");
        assert!(rock.excludes(10.0, -1.1, 1.0), "inside z margin");
        assert!(!rock.excludes(10.0, -0.9, 1.0), "outside z margin");
    }

    #[test]
    fn degenerate_collider_falls_back_to_radial_check() {
        let spike = RockFormation {
            position: DVec3::ZERO,
            half_extents: DVec3::ZERO,
        };
        assert!(spike.excludes(0.5, 0.0, 1.0));
        assert!(spike.excludes(0.7, 0.7, 1.0));
        assert!(!spike.excludes(1.5, 0.0, 1.0));
    }

    #[test]
    fn height_extent_does_not_affect_the_footprint() {
        let tall = RockFormation {
            position: DVec3::ZERO,
            half_extents: DVec3::new(1.0, 50.0, 1.0),
        };
        let flat = RockFormation {
            position: DVec3::ZERO,
            half_extents: DVec3::new(1.0, 0.1, 1.0),
        };
        for &(x, z) in &[(0.0, 0.0), (1.5, 0.0), (2.5, 2.5)] {
            assert_eq!(tall.excludes(x, z, 0.5), flat.excludes(x, z, 0.5));
        }
    }
}
