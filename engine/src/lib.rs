//! Fractal-sum noise over 1D lines and 2D grids.
//!
//! Data flows bottom-up:
//! 1. `random` - draws per-octave grids of scalars or unit vectors
//! 2. `interpolate` - blends the nodes around a query point (linear or cubic curve)
//! 3. `tiling` - mirrors a lookup across the domain so opposite edges match
//! 4. `octave` - schedules frequency bands and sums their weighted layers
//! 5. `normalize` - rescales the raw sum onto `[0, 1]`
//!
//! `sampling::OctaveEngine` ties the chain together behind the `NoiseEngine` trait.

pub mod api;
pub mod config;
pub mod grid;
pub mod interpolate;
pub mod normalize;
pub mod octave;
pub mod random;
pub mod sample;
pub mod sampling;
pub mod tiling;

pub use api::{Field, NoiseEngine, NoiseError, NoiseOptions, Seed};
pub use config::{Amplitude, Dimensions, FieldRequest, NoiseConfig, ScheduleKind};
pub use grid::Grid;
pub use interpolate::{smootherstep, Curve, Interpolator, SampleKind};
pub use normalize::{quantize, Normalizer, Range, FLAT_VALUE, MAX_PRECISION};
pub use octave::{Octave, OctaveCompositor, OctaveSchedule};
pub use random::{RandomGridGenerator, SharedRng};
pub use sample::{Sample, Vec2};
pub use sampling::OctaveEngine;
pub use tiling::TilingSampler;
