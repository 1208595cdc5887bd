use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Grid;
use crate::interpolate::{Curve, SampleKind};
use crate::config::FieldRequest;

#[derive(Debug, Error)]
pub enum NoiseError {
    #[error("output dimensions must be positive and fit in memory, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("frequency {frequency} is below 2; a grid needs at least two samples per axis")]
    FrequencyTooLow { frequency: usize },
    #[error("frequency {frequency} is too high; a {frequency}x{frequency} grid does not fit in memory")]
    FrequencyTooHigh { frequency: usize },
    #[error("min frequency {min} is greater than max frequency {max}")]
    FrequencyRange { min: usize, max: usize },
    #[error("1D generation needs more than 2 samples, got {max_samples}")]
    TooFewSamples { max_samples: usize },
    #[error("amplitude for frequency {frequency} is not finite: {amplitude}")]
    InvalidAmplitude { frequency: usize, amplitude: f64 },
    #[error("octave amplitudes sum past the largest f64")]
    AmplitudeOverflow,
    #[error("precision of {decimals} decimal places exceeds the maximum of {max}")]
    InvalidPrecision { decimals: u32, max: u32 },
    #[error("raw field is not finite (range {min}..{max}); amplitudes are too large")]
    NonFiniteField { min: f64, max: f64 },
    #[error("octave schedule is empty")]
    EmptySchedule,
    #[error("generation cancelled after {completed} octave(s)")]
    Cancelled { completed: usize },
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)] pub struct Seed(pub u64);

/// Per-call switches for 2D generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseOptions {
    pub curve: Curve,
    pub kind: SampleKind,
    pub tile: bool,
    /// Decimal places kept after normalization, `None` keeps full precision.
    pub precision: Option<u32>,
}

impl Default for NoiseOptions {
    fn default() -> Self { Self { curve: Curve::Linear, kind: SampleKind::Value, tile: false, precision: Some(2) } }
}

/// Result of a config-driven generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field { Line(Vec<f64>), Plane(Grid<f64>) }

impl Field {
    pub fn values(&self) -> &[f64] {
        match self { Field::Line(v) => v, Field::Plane(g) => g.values() }
    }
}

pub trait NoiseEngine: Send {
    fn reseed(&mut self, seed: Seed);
    fn generate_1d(&mut self, max_samples: usize) -> Result<Vec<f64>, NoiseError>;
    fn generate_2d(
        &mut self,
        min_frequency: usize,
        max_frequency: usize,
        amplitude: &dyn Fn(f64) -> f64,
        width: usize,
        height: usize,
        options: NoiseOptions,
    ) -> Result<Grid<f64>, NoiseError>;
    fn generate(&mut self, request: &FieldRequest) -> Result<Field, NoiseError>;
}
