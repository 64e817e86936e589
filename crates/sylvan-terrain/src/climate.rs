//! Fractal elevation and moisture fields.
//!
//! Each field sums weighted octaves of simplex noise, doubling the frequency at
//! every octave, then renormalizes by the weight sum so the result stays in
//! `[0, 1]`. Results are snapped to a fixed grid so two samples of the same
//! point compare equal bit for bit.

use noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

/// Errors produced when validating noise field parameters.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FieldParamsError {
    /// The octave list is empty.
    #[error("{0:?} field has no octaves")]
    NoOctaves(FieldKind),
    /// The octave weights sum to zero or less, so the sum cannot be renormalized.
    #[error("{kind:?} field octave weights sum to {sum}")]
    NonPositiveWeightSum {
        /// Field being validated.
        kind: FieldKind,
        /// Offending sum.
        sum: f64,
    },
    /// Spatial scale must be finite and positive.
    #[error("{kind:?} field scale must be positive, got {scale}")]
    InvalidScale {
        /// Field being validated.
        kind: FieldKind,
        /// Offending scale.
        scale: f64,
    },
    /// Exponent must be finite and positive.
    #[error("{kind:?} field exponent must be positive, got {exponent}")]
    InvalidExponent {
        /// Field being validated.
        kind: FieldKind,
        /// Offending exponent.
        exponent: f64,
    },
    /// Rounding denominator must be finite and positive.
    #[error("{kind:?} field rounding must be positive, got {rounding}")]
    InvalidRounding {
        /// Field being validated.
        kind: FieldKind,
        /// Offending denominator.
        rounding: f64,
    },
}

/// The two scalar fields driving biome classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Terrain elevation.
    Elevation,
    /// Ground moisture.
    Moisture,
}

/// Configuration of one fractal noise field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    /// Octave weights, lowest frequency first. Octave `i` samples at `2^i`
    /// times the base frequency.
    pub octaves: Vec<f64>,
    /// World units per noise unit along x. Larger values stretch the field.
    pub scale_x: f64,
    /// World units per noise unit along z.
    pub scale_z: f64,
    /// Power applied after renormalization. Values above 1 bias toward 0.
    pub exponent: f64,
    /// Grid denominator: results are rounded to the nearest `1 / rounding`.
    pub rounding: f64,
}

/// Chunk width the default x scales are expressed in.
pub const DEFAULT_CHUNK_WIDTH: f64 = 64.0;

/// Chunk depth the default z scales are expressed in.
pub const DEFAULT_CHUNK_DEPTH: f64 = 64.0;

impl FieldParams {
    /// Default elevation parameters for the given chunk footprint.
    pub fn elevation(chunk_width: f64, chunk_depth: f64) -> Self {
        Self {
            octaves: vec![0.95, 0.35, 0.25, 0.125, 0.0625, 0.0005],
            scale_x: chunk_width * 48.0,
            scale_z: chunk_depth * 48.0,
            exponent: 5.0,
            rounding: 180.0,
        }
    }

    /// Default moisture parameters for the given chunk footprint.
    pub fn moisture(chunk_width: f64, chunk_depth: f64) -> Self {
        Self {
            octaves: vec![0.59, 0.21, 0.32, 0.13],
            scale_x: chunk_width * 192.0,
            scale_z: chunk_depth * 192.0,
            exponent: 1.0,
            rounding: 180.0,
        }
    }

    /// Sum of the octave weights, used to renormalize the fractal sum.
    pub fn weight_sum(&self) -> f64 {
        self.octaves.iter().sum()
    }

    /// Check that the parameters describe a usable field.
    pub fn validate(&self, kind: FieldKind) -> Result<(), FieldParamsError> {
        if self.octaves.is_empty() {
            return Err(FieldParamsError::NoOctaves(kind));
        }
        let sum = self.weight_sum();
        if !(sum.is_finite() && sum > 0.0) {
            return Err(FieldParamsError::NonPositiveWeightSum { kind, sum });
        }
        for scale in [self.scale_x, self.scale_z] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(FieldParamsError::InvalidScale { kind, scale });
            }
        }
        if !(self.exponent.is_finite() && self.exponent > 0.0) {
            return Err(FieldParamsError::InvalidExponent {
                kind,
                exponent: self.exponent,
            });
        }
        if !(self.rounding.is_finite() && self.rounding > 0.0) {
            return Err(FieldParamsError::InvalidRounding {
                kind,
                rounding: self.rounding,
            });
        }
        Ok(())
    }
}

/// Parameters for both climate fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClimateParams {
    /// Elevation field.
    pub elevation: FieldParams,
    /// Moisture field.
    pub moisture: FieldParams,
}

impl Default for ClimateParams {
    fn default() -> Self {
        Self {
            elevation: FieldParams::elevation(DEFAULT_CHUNK_WIDTH, DEFAULT_CHUNK_DEPTH),
            moisture: FieldParams::moisture(DEFAULT_CHUNK_WIDTH, DEFAULT_CHUNK_DEPTH),
        }
    }
}

/// A single seeded fractal field.
pub struct NoiseField {
    noise: Simplex,
    params: FieldParams,
    weight_sum: f64,
}

impl NoiseField {
    /// Build a field from a noise seed and validated parameters.
    pub fn new(
        seed: u32,
        kind: FieldKind,
        params: FieldParams,
    ) -> Result<Self, FieldParamsError> {
        params.validate(kind)?;
        let weight_sum = params.weight_sum();
        Ok(Self {
            noise: Simplex::new(seed),
            params,
            weight_sum,
        })
    }

    /// Sample the field at a world-space `(x, z)` coordinate.
    ///
    /// The result lies in `[0, 1]` and is a multiple of `1 / rounding`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let nx = x / self.params.scale_x - 0.5;
        let nz = z / self.params.scale_z - 0.5;

        let mut total = 0.0;
        let mut frequency = 1.0;
        for &weight in &self.params.octaves {
            total += weight * self.unit_noise(frequency * nx, frequency * nz);
            frequency *= 2.0;
        }

        let normalized = (total / self.weight_sum).clamp(0.0, 1.0);
        let shaped = normalized.powf(self.params.exponent);
        (shaped * self.params.rounding).round() / self.params.rounding
    }

    /// Raw simplex output remapped from `[-1, 1]` to `[0, 1]`.
    fn unit_noise(&self, nx: f64, nz: f64) -> f64 {
        let raw = self.noise.get([nx, nz]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Return a reference to the field parameters.
    pub fn params(&self) -> &FieldParams {
        &self.params
    }
}

/// Fold a 64-bit world seed into the 32-bit seed `Simplex` accepts.
///
/// Seeds below `2^32` pass through unchanged; higher bits are xored into the
/// low word so they still select a different field.
pub fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Elevation and moisture fields seeded from one world seed.
///
/// Elevation uses `noise_seed(seed)` and moisture `noise_seed(seed + 1)`, so
/// the two fields are decorrelated.
pub struct ClimateSampler {
    elevation: NoiseField,
    moisture: NoiseField,
}

impl ClimateSampler {
    /// Construct both fields. Must complete before any concurrent sampling.
    pub fn new(seed: u64, params: ClimateParams) -> Result<Self, FieldParamsError> {
        let elevation = NoiseField::new(
            noise_seed(seed),
            FieldKind::Elevation,
            params.elevation,
        )?;
        let moisture = NoiseField::new(
            noise_seed(seed.wrapping_add(1)),
            FieldKind::Moisture,
            params.moisture,
        )?;
        Ok(Self {
            elevation,
            moisture,
        })
    }

    /// Sample either field.
    pub fn sample(&self, kind: FieldKind, x: f64, z: f64) -> f64 {
        match kind {
            FieldKind::Elevation => self.elevation.sample(x, z),
            FieldKind::Moisture => self.moisture.sample(x, z),
        }
    }

    /// Elevation at `(x, z)`.
    pub fn elevation(&self, x: f64, z: f64) -> f64 {
        self.elevation.sample(x, z)
    }

    /// Moisture at `(x, z)`.
    pub fn moisture(&self, x: f64, z: f64) -> f64 {
        self.moisture.sample(x, z)
    }

    /// The field for `kind`.
    pub fn field(&self, kind: FieldKind) -> &NoiseField {
        match kind {
            FieldKind::Elevation => &self.elevation,
            FieldKind::Moisture => &self.moisture,
        }
    }
}
