use std::sync::Arc;

use parking_lot::Mutex;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::api::Seed;
use crate::grid::Grid;
use crate::interpolate::SampleKind;
use crate::sample::{Sample, Vec2};

/// Draws the raw random grids each octave interpolates.
pub struct RandomGridGenerator<R> {
    rng: R,
}

impl RandomGridGenerator<ChaCha8Rng> {
    pub fn from_seed(seed: Seed) -> Self { Self::new(ChaCha8Rng::seed_from_u64(seed.0)) }
}

impl<R: RngCore> RandomGridGenerator<R> {
    pub fn new(rng: R) -> Self { Self { rng } }

    /// Independent draws from `[0, 1)`, row by row.
    pub fn generate_scalars(&mut self, width: usize, height: usize) -> Grid<f64> {
        Grid::from_fn(width, height, |_, _| self.rng.gen::<f64>())
    }

    /// Directions drawn uniformly from `[-1, 1)²` then normalized.
    pub fn generate_vectors(&mut self, width: usize, height: usize) -> Grid<Vec2> {
        Grid::from_fn(width, height, |_, _| {
            let x = self.rng.gen::<f64>() * 2.0 - 1.0;
            let y = self.rng.gen::<f64>() * 2.0 - 1.0;
            Vec2::new(x, y).normalized()
        })
    }

    pub fn generate(&mut self, width: usize, height: usize, kind: SampleKind) -> Grid<Sample> {
        match kind {
            SampleKind::Value => self.generate_scalars(width, height).map(|&v| Sample::Scalar(v)),
            SampleKind::Gradient => self.generate_vectors(width, height).map(|&v| Sample::Gradient(v)),
        }
    }

    /// One row of scalar samples for the 1D variant.
    pub fn generate_line(&mut self, len: usize) -> Vec<f64> {
        (0..len).map(|_| self.rng.gen::<f64>()).collect()
    }
}

/// One seeded generator shared by several engines, possibly across threads.
/// Every draw takes the lock, so the interleaving of draws decides which
/// engine sees which numbers.
#[derive(Clone)]
pub struct SharedRng(Arc<Mutex<ChaCha8Rng>>);

impl SharedRng {
    pub fn from_seed(seed: Seed) -> Self { Self(Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed.0)))) }
}

impl RngCore for SharedRng {
    fn next_u32(&mut self) -> u32 { self.0.lock().next_u32() }
    fn next_u64(&mut self) -> u64 { self.0.lock().next_u64() }
    fn fill_bytes(&mut self, dest: &mut [u8]) { self.0.lock().fill_bytes(dest) }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> { self.0.lock().try_fill_bytes(dest) }
}
