use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::{NoiseError, NoiseOptions};
use crate::interpolate::SampleKind;
use crate::normalize::check_precision;
use crate::octave::OctaveSchedule;
use crate::sampling::check_dimensions;

/// Serializable amplitude curves standing in for a caller-supplied callback.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Amplitude {
    /// `1 / f`
    #[default]
    InverseFrequency,
    Constant(f64),
    /// `f^-exponent`
    Power { exponent: f64 },
    /// `p^log2(f)`: each doubling of frequency scales amplitude by `p`.
    Persistence(f64),
}

impl Amplitude {
    pub fn eval(&self, frequency: f64) -> f64 {
        match *self {
            Amplitude::InverseFrequency => 1.0 / frequency,
            Amplitude::Constant(a) => a,
            Amplitude::Power { exponent } => frequency.powf(-exponent),
            Amplitude::Persistence(p) => p.powf(frequency.log2()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimensions {
    Line { length: usize },
    Plane { width: usize, height: usize },
}

/// Octave layout for line requests. Plane requests always double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScheduleKind {
    /// Start at the line length, halve frequency and double amplitude.
    #[default]
    Halving,
    /// `min_frequency` doubling up to `max_frequency`, weighted by `amplitude`.
    Doubling,
}

fn default_min_frequency() -> usize { 2 }
fn default_max_frequency() -> usize { 32 }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRequest {
    pub dimensions: Dimensions,
    #[serde(default = "default_min_frequency")]
    pub min_frequency: usize,
    #[serde(default = "default_max_frequency")]
    pub max_frequency: usize,
    #[serde(default)]
    pub amplitude: Amplitude,
    #[serde(default)]
    pub schedule: ScheduleKind,
    #[serde(default)]
    pub options: NoiseOptions,
}

impl FieldRequest {
    pub fn plane(width: usize, height: usize) -> Self { Self::with_dimensions(Dimensions::Plane { width, height }) }

    pub fn line(length: usize) -> Self { Self::with_dimensions(Dimensions::Line { length }) }

    fn with_dimensions(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            min_frequency: default_min_frequency(),
            max_frequency: default_max_frequency(),
            amplitude: Amplitude::default(),
            schedule: ScheduleKind::default(),
            options: NoiseOptions::default(),
        }
    }

    /// Checks everything that can be checked before drawing a single sample.
    pub fn validate(&self) -> Result<(), NoiseError> {
        match self.dimensions {
            Dimensions::Plane { width, height } => check_dimensions(width, height)?,
            Dimensions::Line { length } => check_dimensions(length, 1)?,
        }
        check_precision(self.options.precision)?;
        match self.dimensions {
            Dimensions::Line { .. } if self.options.kind == SampleKind::Gradient => {
                Err(NoiseError::Config("gradient samples need a 2D field".into()))
            }
            Dimensions::Line { .. } if self.options.tile => Err(NoiseError::Config("tiling needs a 2D field".into())),
            _ => self.schedule().map(|_| ()),
        }
    }

    pub fn schedule(&self) -> Result<OctaveSchedule, NoiseError> {
        match (self.dimensions, self.schedule) {
            (Dimensions::Line { length }, ScheduleKind::Halving) => OctaveSchedule::halving(length),
            _ => OctaveSchedule::doubling(self.min_frequency, self.max_frequency, |f| self.amplitude.eval(f)),
        }
    }
}

/// Top-level `.ron` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    pub request: FieldRequest,
}

impl NoiseConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, NoiseError> {
        ron::from_str(s).map_err(|e| NoiseError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, NoiseError> {
        Self::from_ron_str(&std::fs::read_to_string(path)?)
    }

    pub fn to_ron_string(&self) -> Result<String, NoiseError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| NoiseError::Config(e.to_string()))
    }
}
