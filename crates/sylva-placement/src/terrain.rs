//! Terrain sampling interface and reference implementations.
//!
//! The placer only ever reads terrain through [`TerrainSampler`]; the
//! shipped implementations cover flat test fields and multi-octave noise
//! terrain for realistic runs.

use noise::{NoiseFn, Simplex};

/// Read-only view of terrain used during placement.
///
/// Slope uses the rise-over-run convention: 0 is flat, 1 is a 45° incline.
/// `PlacementConfig::max_slope` is compared against the same scale.
pub trait TerrainSampler {
    /// Terrain height at the planar point `(x, z)`.
    fn sample_height(&self, x: f64, z: f64) -> f64;
    /// Terrain slope (gradient magnitude) at the planar point `(x, z)`.
    fn sample_slope(&self, x: f64, z: f64) -> f64;
}

/// Perfectly flat terrain at a fixed height. Slope is zero everywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatTerrain {
    /// Uniform terrain height.
    pub height: f64,
}

impl TerrainSampler for FlatTerrain {
    fn sample_height(&self, _x: f64, _z: f64) -> f64 {
        self.height
    }

    fn sample_slope(&self, _x: f64, _z: f64) -> f64 {
        0.0
    }
}

/// Parameters for multi-octave fBm noise terrain.
#[derive(Clone, Debug)]
pub struct NoiseTerrainParams {
    /// Seed for the underlying simplex noise.
    pub seed: u32,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency of the first octave.
    pub base_frequency: f64,
    /// Amplitude of the first octave in world units.
    pub amplitude: f64,
}

impl Default for NoiseTerrainParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.015,
            amplitude: 6.0,
        }
    }
}

/// Rolling terrain from fractal Brownian motion over simplex noise.
///
/// Slope is estimated by central differences over a small planar epsilon.
pub struct NoiseTerrain {
    noise: Simplex,
    params: NoiseTerrainParams,
}

/// Step used for the central-difference slope estimate.
const SLOPE_EPSILON: f64 = 0.25;

impl NoiseTerrain {
    /// Create noise terrain with the given parameters.
    pub fn new(params: NoiseTerrainParams) -> Self {
        Self {
            noise: Simplex::new(params.seed),
            params,
        }
    }
}

impl TerrainSampler for NoiseTerrain {
    fn sample_height(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;
        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }
        total
    }

    fn sample_slope(&self, x: f64, z: f64) -> f64 {
        let dx = self.sample_height(x + SLOPE_EPSILON, z) - self.sample_height(x - SLOPE_EPSILON, z);
        let dz = self.sample_height(x, z + SLOPE_EPSILON) - self.sample_height(x, z - SLOPE_EPSILON);
        let inv_run = 1.0 / (2.0 * SLOPE_EPSILON);
        ((dx * inv_run).powi(2) + (dz * inv_run).powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_terrain_is_flat() {
        let terrain = FlatTerrain { height: 2.5 };
        assert_eq!(terrain.sample_height(10.0, -40.0), 2.5);
        assert_eq!(terrain.sample_slope(10.0, -40.0), 0.0);
    }

    #[test]
    fn noise_terrain_is_deterministic() {
        let a = NoiseTerrain::new(NoiseTerrainParams::default());
        let b = NoiseTerrain::new(NoiseTerrainParams::default());
        for i in 0..32 {
            let x = i as f64 * 3.7;
            assert_eq!(a.sample_height(x, -x), b.sample_height(x, -x));
        }
    }

    #[test]
    fn noise_terrain_heights_are_bounded_by_total_amplitude() {
        let params = NoiseTerrainParams::default();
        let bound: f64 = (0..params.octaves)
            .map(|i| params.amplitude * params.persistence.powi(i as i32))
            .sum();
        let terrain = NoiseTerrain::new(params);
        for i in -20..20 {
            let h = terrain.sample_height(i as f64 * 5.0, i as f64 * -2.0);
            assert!(h.abs() <= bound, "height {h} exceeds bound {bound}");
        }
    }

    #[test]
    fn slope_is_nonnegative_and_zero_on_flat_regions() {
        let terrain = NoiseTerrain::new(NoiseTerrainParams {
            amplitude: 0.0,
            ..NoiseTerrainParams::default()
        });
        assert_eq!(terrain.sample_slope(3.0, 4.0), 0.0);

        let bumpy = NoiseTerrain::new(NoiseTerrainParams::default());
        for i in 0..16 {
            assert!(bumpy.sample_slope(i as f64 * 7.3, 2.0) >= 0.0);
        }
    }
}
