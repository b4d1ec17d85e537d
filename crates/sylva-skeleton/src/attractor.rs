//! Canopy attractor sampling.
//!
//! Each canopy shape has its own point distribution; all of them consume
//! exactly three RNG draws per attractor, which keeps the stream layout
//! independent of the shape tag.

use glam::Vec3;
use sylva_config::CanopyShape;
use sylva_seed::{DeterministicRng, det_acosf, det_cbrtf, det_cosf, det_powf, det_sinf};

use crate::grower::WIND_AXIS;

/// Height-falloff exponent for conical canopies.
const CONE_HEIGHT_EXPONENT: f32 = 0.78;
/// Radial pinch applied to columnar canopies.
const COLUMNAR_RADIAL_PINCH: f32 = 0.55;
/// Vertical stretch applied to columnar canopies.
const COLUMNAR_STRETCH: f32 = 1.2;

/// Sample `count` attractor points for a canopy sitting on top of the
/// trunk at `trunk_top`.
///
/// Conical canopies rise from the trunk top; the ellipsoidal families
/// (spherical, windswept, columnar) are centered half a canopy height
/// above it. Exactly `3 * count` RNG draws are consumed.
pub fn sample_canopy_attractors(
    shape: CanopyShape,
    count: u32,
    canopy_height: f32,
    canopy_radius: f32,
    wind_skew: f32,
    trunk_top: Vec3,
    rng: &mut DeterministicRng,
) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let u1 = rng.next_f32();
        let u2 = rng.next_f32();
        let u3 = rng.next_f32();
        let local = match shape {
            CanopyShape::Conical => conical_point(u1, u2, u3, canopy_height, canopy_radius),
            CanopyShape::Spherical => {
                ellipsoid_point(u1, u2, u3, canopy_radius, canopy_height * 0.5, canopy_radius)
            }
            CanopyShape::Windswept => {
                let half_height = canopy_height * 0.5;
                let p = ellipsoid_point(u1, u2, u3, canopy_radius, half_height, canopy_radius);
                // Shear along the wind axis, growing with height in the canopy.
                p + WIND_AXIS * (wind_skew * (p.y + half_height))
            }
            CanopyShape::Columnar => ellipsoid_point(
                u1,
                u2,
                u3,
                canopy_radius * COLUMNAR_RADIAL_PINCH,
                canopy_height * 0.5 * COLUMNAR_STRETCH,
                canopy_radius * COLUMNAR_RADIAL_PINCH,
            ),
        };
        let center = match shape {
            CanopyShape::Conical => trunk_top,
            _ => trunk_top + Vec3::Y * (canopy_height * 0.5),
        };
        points.push(center + local);
    }
    points
}

/// Cone rising from the local origin: power-law height falloff with
/// uniform-disk radial sampling, tapering to a point at `height`.
fn conical_point(u1: f32, u2: f32, u3: f32, height: f32, radius: f32) -> Vec3 {
    let h_frac = det_powf(u1, CONE_HEIGHT_EXPONENT);
    let ring_radius = radius * (1.0 - h_frac) * det_powf(u2, 0.5);
    let angle = std::f32::consts::TAU * u3;
    Vec3::new(
        ring_radius * det_cosf(angle),
        h_frac * height,
        ring_radius * det_sinf(angle),
    )
}

/// Uniform point inside an axis-aligned ellipsoid centered on the local
/// origin: cube-root radius, arccosine polar angle, uniform azimuth.
fn ellipsoid_point(u1: f32, u2: f32, u3: f32, semi_x: f32, semi_y: f32, semi_z: f32) -> Vec3 {
    let r = det_cbrtf(u1);
    let polar = det_acosf(1.0 - 2.0 * u2);
    let azimuth = std::f32::consts::TAU * u3;
    let sp = det_sinf(polar);
    Vec3::new(
        r * sp * det_cosf(azimuth) * semi_x,
        r * det_cosf(polar) * semi_y,
        r * sp * det_sinf(azimuth) * semi_z,
    )
}
