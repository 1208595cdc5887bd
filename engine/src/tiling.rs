use crate::grid::Grid;
use crate::interpolate::Interpolator;
use crate::sample::Sample;

/// Blends a lookup with its three mirror images across the domain so that
/// opposite edges of the octave carry the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TilingSampler { pub interpolator: Interpolator }

impl TilingSampler {
    pub fn new(interpolator: Interpolator) -> Self { Self { interpolator } }

    pub fn sample(&self, grid: &Grid<Sample>, x: f64, y: f64, width: f64, height: f64) -> f64 {
        let lookup = |qx: f64, qy: f64| self.interpolator.sample(grid, qx, qy, width, height);
        let (mx, my) = (width - x, height - y);

        let sum = mx * my * lookup(x, y)
            + x * my * lookup(mx, y)
            + x * y * lookup(mx, my)
            + mx * y * lookup(x, my);
        sum / (width * height)
    }
}
