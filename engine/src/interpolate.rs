use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::sample::{Sample, Vec2};

/// Blending curve applied to the fractional offsets inside a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    #[default]
    Linear,
    /// `3t² − 2t³`; C¹ across cell boundaries, which hides the creases linear blending leaves.
    Cubic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    #[default]
    Value,
    Gradient,
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 { (b - a) * t + a }

pub fn smootherstep(t: f64) -> f64 { t * t * (3.0 - 2.0 * t) }

impl Curve {
    pub fn ease(self, t: f64) -> f64 {
        match self {
            Curve::Linear => t,
            Curve::Cubic => smootherstep(t),
        }
    }

    pub fn blend(self, x: f64, y: f64, tl: f64, tr: f64, bl: f64, br: f64) -> f64 {
        let (u, v) = (self.ease(x), self.ease(y));
        lerp(lerp(tl, tr, u), lerp(bl, br, u), v)
    }
}

/// Locates the two grid nodes around a continuous grid-space position.
/// Returns `(low, high, fraction)`; `low == high` on an exact hit.
fn bracket(position: f64, len: usize) -> (usize, usize, f64) {
    let low = position.floor();
    let high = (position.ceil() as usize).min(len - 1);
    (low as usize, high, position - low)
}

/// Resolves a query point in output space against one octave's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interpolator { pub curve: Curve }

impl Interpolator {
    pub fn new(curve: Curve) -> Self { Self { curve } }

    /// `(x, y)` lives in `[0, width] × [0, height]` and maps linearly onto the
    /// full grid, so `x == width` lands on the last column.
    pub fn sample(&self, grid: &Grid<Sample>, x: f64, y: f64, width: f64, height: f64) -> f64 {
        debug_assert!(grid.width() >= 2 && grid.height() >= 2);
        debug_assert!((0.0..=width).contains(&x), "x {x} outside [0, {width}]");
        debug_assert!((0.0..=height).contains(&y), "y {y} outside [0, {height}]");

        let gx = x / width * (grid.width() - 1) as f64;
        let gy = y / height * (grid.height() - 1) as f64;
        let (x0, x1, rx) = bracket(gx, grid.width());
        let (y0, y1, ry) = bracket(gy, grid.height());

        let tl = grid.at(x0, y0).contribution(Vec2::new(rx, ry));
        let tr = grid.at(x1, y0).contribution(Vec2::new(rx - 1.0, ry));
        let bl = grid.at(x0, y1).contribution(Vec2::new(rx, ry - 1.0));
        let br = grid.at(x1, y1).contribution(Vec2::new(rx - 1.0, ry - 1.0));
        self.curve.blend(rx, ry, tl, tr, bl, br)
    }

    /// 1D counterpart of [`Interpolator::sample`] over scalar samples.
    pub fn sample_line(&self, samples: &[f64], x: f64, length: f64) -> f64 {
        debug_assert!(samples.len() >= 2);
        debug_assert!((0.0..=length).contains(&x));

        let position = x / length * (samples.len() - 1) as f64;
        let (low, high, t) = bracket(position, samples.len());
        if low == high {
            return samples[low];
        }
        lerp(samples[low], samples[high], self.curve.ease(t))
    }
}
