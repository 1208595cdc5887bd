use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::NoiseError;
use crate::grid::Grid;
use crate::interpolate::{Curve, Interpolator, SampleKind};
use crate::random::RandomGridGenerator;
use crate::sample::Sample;
use crate::tiling::TilingSampler;

/// One frequency band. `frequency` is the sample grid resolution per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave { pub frequency: usize, pub amplitude: f64 }

/// Validated list of octaves, in the order they are accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct OctaveSchedule { octaves: Vec<Octave> }

impl OctaveSchedule {
    /// `min, 2·min, 4·min, …` up to and including `max`, each weighted by
    /// `amplitude(frequency)`.
    pub fn doubling(min: usize, max: usize, amplitude: impl Fn(f64) -> f64) -> Result<Self, NoiseError> {
        if min < 2 { return Err(NoiseError::FrequencyTooLow { frequency: min }); }
        if min > max { return Err(NoiseError::FrequencyRange { min, max }); }

        let mut octaves = Vec::new();
        let mut frequency = min;
        while frequency <= max {
            octaves.push(Octave { frequency, amplitude: amplitude(frequency as f64) });
            frequency = match frequency.checked_mul(2) { Some(next) => next, None => break };
        }
        Self::from_octaves(octaves)
    }

    /// The 1D convention: start at `max_samples`, halve the frequency and
    /// double the amplitude (from 2) while the frequency stays above 2.
    pub fn halving(max_samples: usize) -> Result<Self, NoiseError> {
        if max_samples <= 2 { return Err(NoiseError::TooFewSamples { max_samples }); }

        let mut octaves = Vec::new();
        let (mut frequency, mut amplitude) = (max_samples, 2.0);
        while frequency > 2 {
            octaves.push(Octave { frequency, amplitude });
            frequency /= 2;
            amplitude *= 2.0;
        }
        Self::from_octaves(octaves)
    }

    pub fn from_octaves(octaves: Vec<Octave>) -> Result<Self, NoiseError> {
        if octaves.is_empty() { return Err(NoiseError::EmptySchedule); }
        for o in &octaves {
            if o.frequency < 2 { return Err(NoiseError::FrequencyTooLow { frequency: o.frequency }); }
            if o.frequency.checked_mul(o.frequency).is_none() {
                return Err(NoiseError::FrequencyTooHigh { frequency: o.frequency });
            }
            if !o.amplitude.is_finite() {
                return Err(NoiseError::InvalidAmplitude { frequency: o.frequency, amplitude: o.amplitude });
            }
        }
        // raw cells scale with this sum; Normalizer catches overflow that gets past it
        if !octaves.iter().map(|o| o.amplitude.abs()).sum::<f64>().is_finite() {
            return Err(NoiseError::AmplitudeOverflow);
        }
        Ok(Self { octaves })
    }

    pub fn octaves(&self) -> &[Octave] { &self.octaves }
    pub fn len(&self) -> usize { self.octaves.len() }
    pub fn is_empty(&self) -> bool { self.octaves.is_empty() }
}

/// Output coordinate of cell `index` along an axis of `extent` cells.
/// Tiled fields span the closed domain so the first and last cells sit on
/// the two mirrored edges.
fn axis_coordinate(index: usize, extent: usize, tile: bool) -> f64 {
    if tile && extent > 1 {
        index as f64 * extent as f64 / (extent - 1) as f64
    } else {
        index as f64
    }
}

/// Sums amplitude-weighted octave layers into a raw (unnormalized) field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OctaveCompositor {
    pub curve: Curve,
    pub kind: SampleKind,
    pub tile: bool,
}

impl OctaveCompositor {
    pub fn new(curve: Curve, kind: SampleKind, tile: bool) -> Self { Self { curve, kind, tile } }

    /// Value of one cell of one octave, before amplitude weighting.
    pub fn sample(&self, grid: &Grid<Sample>, x: f64, y: f64, width: f64, height: f64) -> f64 {
        let interpolator = Interpolator::new(self.curve);
        if self.tile {
            TilingSampler::new(interpolator).sample(grid, x, y, width, height)
        } else {
            interpolator.sample(grid, x, y, width, height)
        }
    }

    /// Amplitude-weighted contribution of one octave at every output cell.
    pub fn layer(&self, grid: &Grid<Sample>, octave: &Octave, width: usize, height: usize) -> Grid<f64> {
        let (w, h) = (width as f64, height as f64);
        Grid::from_fn(width, height, |ix, iy| {
            let x = axis_coordinate(ix, width, self.tile);
            let y = axis_coordinate(iy, height, self.tile);
            octave.amplitude * self.sample(grid, x, y, w, h)
        })
    }

    /// Generates every octave's grid and folds the layers together.
    /// `checkpoint` runs before each octave; returning `false` abandons the
    /// whole field.
    pub fn compose<R: RngCore>(
        &self,
        grids: &mut RandomGridGenerator<R>,
        schedule: &OctaveSchedule,
        width: usize,
        height: usize,
        checkpoint: &mut dyn FnMut(&Octave) -> bool,
    ) -> Result<Grid<f64>, NoiseError> {
        schedule.octaves().iter().enumerate().try_fold(Grid::filled(width, height, 0.0), |field, (completed, octave)| {
            if !checkpoint(octave) {
                return Err(NoiseError::Cancelled { completed });
            }
            debug!(frequency = octave.frequency, amplitude = octave.amplitude, kind = ?self.kind, "accumulating octave");
            let samples = grids.generate(octave.frequency, octave.frequency, self.kind);
            let layer = self.layer(&samples, octave, width, height);
            Ok(field.zip_with(&layer, |acc, v| acc + v))
        })
    }

    /// 1D variant: each octave draws `frequency` scalars spread over `length` cells.
    pub fn compose_line<R: RngCore>(&self, grids: &mut RandomGridGenerator<R>, schedule: &OctaveSchedule, length: usize) -> Vec<f64> {
        let interpolator = Interpolator::new(self.curve);
        schedule.octaves().iter().fold(vec![0.0; length], |acc, octave| {
            debug!(frequency = octave.frequency, amplitude = octave.amplitude, "accumulating line octave");
            let samples = grids.generate_line(octave.frequency);
            acc.into_iter().enumerate()
                .map(|(i, sum)| sum + octave.amplitude * interpolator.sample_line(&samples, i as f64, length as f64))
                .collect()
        })
    }
}
