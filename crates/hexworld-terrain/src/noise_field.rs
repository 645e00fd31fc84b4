//! Multi-octave fractal Brownian motion (fBm) over simplex noise.
//!
//! Octave `i` samples the primitive at `frequency * 2^i` with amplitude
//! `persistence^i`; the sum is divided by the sum of amplitudes so results stay
//! within `[-1, 1]`.

use glam::DVec3;
use hexworld_geodesic::lon_lat_to_unit;
use noise::{NoiseFn, Simplex};

use crate::TerrainError;

/// Largest coordinate handed to the simplex primitive. Beyond this the lattice
/// cell index no longer fits the primitive's integer math.
pub const MAX_SAMPLING_EXTENT: f64 = 1e12;

/// Parameters of a fractal noise field.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseConfig {
    /// Frequency of the first (broadest) octave. Must be positive.
    pub frequency: f64,
    /// Number of octaves to composite. At least 1.
    pub octaves: u32,
    /// Amplitude ratio between successive octaves, in `(0, 1)`.
    pub persistence: f64,
    /// Seed of the simplex primitive. `None` asks the caller to pick and
    /// record one before building a [`NoiseField`].
    pub seed: Option<u32>,
    /// Added to every coordinate before scaling, shifting the sampled region.
    pub offset: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            frequency: 0.5,
            octaves: 8,
            persistence: 0.6,
            seed: None,
            offset: 0.0,
        }
    }
}

impl NoiseConfig {
    /// Return a copy with an explicit seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check ranges without requiring a seed.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidNoiseConfig`] describing the first bad field.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(TerrainError::InvalidNoiseConfig(format!(
                "frequency must be positive, got {}",
                self.frequency
            )));
        }
        if self.octaves == 0 {
            return Err(TerrainError::InvalidNoiseConfig(
                "octaves must be at least 1".into(),
            ));
        }
        if !(self.persistence > 0.0 && self.persistence < 1.0) {
            return Err(TerrainError::InvalidNoiseConfig(format!(
                "persistence must lie in (0, 1), got {}",
                self.persistence
            )));
        }
        if !self.offset.is_finite() {
            return Err(TerrainError::InvalidNoiseConfig(format!(
                "offset must be finite, got {}",
                self.offset
            )));
        }
        let extent = self.sampling_extent();
        if !extent.is_finite() || extent > MAX_SAMPLING_EXTENT {
            return Err(TerrainError::InvalidNoiseConfig(format!(
                "frequency {} over {} octaves with offset {} reaches coordinate {extent:e}, \
                 limit is {MAX_SAMPLING_EXTENT:e}",
                self.frequency, self.octaves, self.offset
            )));
        }
        Ok(())
    }

    /// Largest coordinate magnitude the finest octave sees for a unit-sphere
    /// point: `(1 + |offset|) * frequency * 2^(octaves - 1)`.
    pub fn sampling_extent(&self) -> f64 {
        let doublings = self.octaves.saturating_sub(1).min(i32::MAX as u32) as i32;
        (1.0 + self.offset.abs()) * self.frequency * 2f64.powi(doublings)
    }
}

/// Deterministic fBm sampler. Identical config and input always give the
/// identical value.
#[derive(Clone, Debug)]
pub struct NoiseField {
    noise: Simplex,
    config: NoiseConfig,
}

impl NoiseField {
    /// Build a field from a validated, seeded config.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidNoiseConfig`] for out-of-range values or
    /// a missing seed.
    pub fn new(config: NoiseConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        let Some(seed) = config.seed else {
            return Err(TerrainError::InvalidNoiseConfig(
                "seed must be chosen before sampling".into(),
            ));
        };
        Ok(Self {
            noise: Simplex::new(seed),
            config,
        })
    }

    /// Sample at a 3D point, typically a unit-sphere cell centroid.
    pub fn sample(&self, point: DVec3) -> f64 {
        let base = point + DVec3::splat(self.config.offset);
        self.accumulate(|frequency| {
            let p = base * frequency;
            self.noise.get([p.x, p.y, p.z])
        })
    }

    /// Sample a planar 2D domain.
    ///
    /// Not for geographic input: longitude/latitude pairs go through
    /// [`NoiseField::sample_geo`].
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        let offset = self.config.offset;
        self.accumulate(|frequency| {
            self.noise
                .get([(x + offset) * frequency, (y + offset) * frequency])
        })
    }

    /// Sample at a longitude/latitude in degrees.
    ///
    /// The pair is mapped onto the unit sphere first, so values are continuous
    /// across the antimeridian and at the poles.
    pub fn sample_geo(&self, lon_deg: f64, lat_deg: f64) -> f64 {
        self.sample(lon_lat_to_unit(lon_deg, lat_deg))
    }

    /// Sum of all octave amplitudes, the normalizer applied to every sample.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        for _ in 0..self.config.octaves {
            sum += amplitude;
            amplitude *= self.config.persistence;
        }
        sum
    }

    /// The config this field was built from.
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    fn accumulate(&self, mut octave: impl FnMut(f64) -> f64) -> f64 {
        let mut total = 0.0;
        let mut max_value = 0.0;
        let mut frequency = self.config.frequency;
        let mut amplitude = 1.0;

        for _ in 0..self.config.octaves {
            total += octave(frequency) * amplitude;
            max_value += amplitude;
            amplitude *= self.config.persistence;
            frequency *= 2.0;
        }

        total / max_value
    }
}
