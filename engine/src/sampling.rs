use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::api::*;
use crate::config::{Dimensions, FieldRequest};
use crate::grid::Grid;
use crate::interpolate::{Curve, SampleKind};
use crate::normalize::{check_precision, Normalizer};
use crate::octave::{Octave, OctaveCompositor, OctaveSchedule};
use crate::random::RandomGridGenerator;

/// Fractal-sum noise engine. Owns the random source every octave draws from.
pub struct OctaveEngine<R = ChaCha8Rng> {
    grids: RandomGridGenerator<R>,
}

impl OctaveEngine<ChaCha8Rng> {
    pub fn from_seed(seed: Seed) -> Self { Self::from_rng(ChaCha8Rng::seed_from_u64(seed.0)) }
}

/// Rejects empty fields and fields whose cell count overflows `usize`.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), NoiseError> {
    match width.checked_mul(height) {
        Some(cells) if cells > 0 => Ok(()),
        _ => Err(NoiseError::InvalidDimensions { width, height }),
    }
}

impl<R: RngCore> OctaveEngine<R> {
    pub fn from_rng(rng: R) -> Self { Self { grids: RandomGridGenerator::new(rng) } }

    /// General 1D form: any schedule, any curve.
    pub fn generate_line(&mut self, length: usize, schedule: &OctaveSchedule, curve: Curve, precision: Option<u32>) -> Result<Vec<f64>, NoiseError> {
        check_dimensions(length, 1)?;
        check_precision(precision)?;

        let compositor = OctaveCompositor::new(curve, SampleKind::Value, false);
        let mut line = compositor.compose_line(&mut self.grids, schedule, length);
        Normalizer::new(precision).normalize(&mut line)?;
        info!(length, octaves = schedule.len(), "generated line");
        Ok(line)
    }

    /// General 2D form over a prepared schedule.
    pub fn generate_plane(&mut self, width: usize, height: usize, schedule: &OctaveSchedule, options: NoiseOptions) -> Result<Grid<f64>, NoiseError> {
        self.generate_plane_with_checkpoint(width, height, schedule, options, &mut |_: &Octave| true)
    }

    pub fn generate_plane_with_checkpoint(
        &mut self,
        width: usize,
        height: usize,
        schedule: &OctaveSchedule,
        options: NoiseOptions,
        checkpoint: &mut dyn FnMut(&Octave) -> bool,
    ) -> Result<Grid<f64>, NoiseError> {
        check_dimensions(width, height)?;
        check_precision(options.precision)?;

        let compositor = OctaveCompositor::new(options.curve, options.kind, options.tile);
        let raw = compositor.compose(&mut self.grids, schedule, width, height, checkpoint)?;
        let field = Normalizer::new(options.precision).normalize_grid(raw)?;
        info!(width, height, octaves = schedule.len(), ?options, "generated plane");
        Ok(field)
    }

    /// [`NoiseEngine::generate_2d`] with a cancellation hook consulted before each octave.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_2d_with_checkpoint(
        &mut self,
        min_frequency: usize,
        max_frequency: usize,
        amplitude: &dyn Fn(f64) -> f64,
        width: usize,
        height: usize,
        options: NoiseOptions,
        checkpoint: &mut dyn FnMut(&Octave) -> bool,
    ) -> Result<Grid<f64>, NoiseError> {
        check_dimensions(width, height)?;
        check_precision(options.precision)?;
        let schedule = OctaveSchedule::doubling(min_frequency, max_frequency, amplitude)?;
        self.generate_plane_with_checkpoint(width, height, &schedule, options, checkpoint)
    }
}

impl<R: RngCore + SeedableRng + Send> NoiseEngine for OctaveEngine<R> {
    fn reseed(&mut self, seed: Seed) { self.grids = RandomGridGenerator::new(R::seed_from_u64(seed.0)); }

    fn generate_1d(&mut self, max_samples: usize) -> Result<Vec<f64>, NoiseError> {
        let schedule = OctaveSchedule::halving(max_samples)?;
        self.generate_line(max_samples, &schedule, Curve::Linear, None)
    }

    fn generate_2d(
        &mut self,
        min_frequency: usize,
        max_frequency: usize,
        amplitude: &dyn Fn(f64) -> f64,
        width: usize,
        height: usize,
        options: NoiseOptions,
    ) -> Result<Grid<f64>, NoiseError> {
        self.generate_2d_with_checkpoint(min_frequency, max_frequency, amplitude, width, height, options, &mut |_: &Octave| true)
    }

    fn generate(&mut self, request: &FieldRequest) -> Result<Field, NoiseError> {
        request.validate()?;
        let schedule = request.schedule()?;
        match request.dimensions {
            Dimensions::Line { length } => {
                self.generate_line(length, &schedule, request.options.curve, request.options.precision).map(Field::Line)
            }
            Dimensions::Plane { width, height } => self.generate_plane(width, height, &schedule, request.options).map(Field::Plane),
        }
    }
}
