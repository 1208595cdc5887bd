use tracing::warn;

use crate::api::NoiseError;
use crate::grid::Grid;

/// Value every cell takes when the raw field is flat.
pub const FLAT_VALUE: f64 = 0.5;

/// Most decimal places `quantize` honors; an f64 carries no more than this in `[0, 1]`.
pub const MAX_PRECISION: u32 = 15;

pub fn check_precision(precision: Option<u32>) -> Result<(), NoiseError> {
    match precision {
        Some(decimals) if decimals > MAX_PRECISION => Err(NoiseError::InvalidPrecision { decimals, max: MAX_PRECISION }),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range { pub min: f64, pub max: f64 }

impl Range {
    pub fn of(values: &[f64]) -> Option<Range> {
        let first = *values.first()?;
        Some(values.iter().fold(Range { min: first, max: first }, |r, &v| Range { min: r.min.min(v), max: r.max.max(v) }))
    }

    pub fn is_flat(&self) -> bool { self.max == self.min }
}

/// Rounds to `decimals` places, capped at [`MAX_PRECISION`].
pub fn quantize(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_PRECISION) as i32);
    (value * scale).round() / scale
}

/// Linearly rescales a raw field onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Normalizer { pub precision: Option<u32> }

impl Normalizer {
    pub fn new(precision: Option<u32>) -> Self { Self { precision } }

    /// Normalizes in place and returns the raw range, `None` for an empty slice.
    /// A flat field becomes [`FLAT_VALUE`] everywhere. A field holding a
    /// non-finite value, or whose span overflows, is left untouched.
    pub fn normalize(&self, values: &mut [f64]) -> Result<Option<Range>, NoiseError> {
        let Some(range) = Range::of(values) else { return Ok(None) };
        if values.iter().any(|v| !v.is_finite()) || !(range.max - range.min).is_finite() {
            return Err(NoiseError::NonFiniteField { min: range.min, max: range.max });
        }
        if range.is_flat() {
            warn!(value = range.min, cells = values.len(), "flat field, filling with {}", FLAT_VALUE);
            values.fill(FLAT_VALUE);
        } else {
            let span = range.max - range.min;
            for v in values.iter_mut() {
                *v = (*v - range.min) / span;
            }
        }
        if let Some(decimals) = self.precision {
            for v in values.iter_mut() {
                *v = quantize(*v, decimals);
            }
        }
        Ok(Some(range))
    }

    pub fn normalize_grid(&self, mut grid: Grid<f64>) -> Result<Grid<f64>, NoiseError> {
        self.normalize(grid.values_mut())?;
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretches_to_unit_range() {
        let mut v = vec![2.0, 4.0, 3.0, 6.0];
        let range = Normalizer::default().normalize(&mut v).unwrap().unwrap();
        assert_eq!(range, Range { min: 2.0, max: 6.0 });
        assert_eq!(v, vec![0.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_flat_field_is_constant() {
        let mut v = vec![0.0; 10];
        Normalizer::new(Some(2)).normalize(&mut v).unwrap();
        assert!(v.iter().all(|x| *x == FLAT_VALUE));
    }

    #[test]
    fn test_quantizes_to_two_places() {
        let mut v = vec![0.0, 1.0, 3.0];
        Normalizer::new(Some(2)).normalize(&mut v).unwrap();
        assert_eq!(v, vec![0.0, 0.33, 1.0]);
        assert_eq!(quantize(0.005, 2), 0.01);
        assert_eq!(quantize(0.123456, 3), 0.123);
    }

    #[test]
    fn test_renormalize_is_noop() {
        let mut v = vec![0.3, -1.2, 5.5, 2.25, 0.0, 4.75];
        let n = Normalizer::new(Some(2));
        n.normalize(&mut v).unwrap();
        let once = v.clone();
        n.normalize(&mut v).unwrap();
        assert_eq!(v, once);

        let mut raw = vec![0.0, 0.1234, 0.77, 1.0];
        Normalizer::default().normalize(&mut raw).unwrap();
        assert_eq!(raw, vec![0.0, 0.1234, 0.77, 1.0]);
    }

    #[test]
    fn test_empty_has_no_range() {
        assert!(Normalizer::default().normalize(&mut []).unwrap().is_none());
    }

    #[test]
    fn test_quantize_caps_decimals() {
        assert_eq!(quantize(0.25, 400), 0.25);
        assert_eq!(quantize(1.0, u32::MAX), 1.0);
        assert!(check_precision(Some(MAX_PRECISION)).is_ok());
        assert!(matches!(check_precision(Some(400)), Err(NoiseError::InvalidPrecision { decimals: 400, .. })));
    }

    #[test]
    fn test_non_finite_field_is_rejected() {
        let mut overflowed = vec![0.0, 1.0, f64::INFINITY];
        assert!(matches!(Normalizer::default().normalize(&mut overflowed), Err(NoiseError::NonFiniteField { .. })));
        assert_eq!(overflowed[1], 1.0);

        let mut nan = vec![0.0, f64::NAN, 2.0];
        assert!(Normalizer::default().normalize(&mut nan).is_err());

        // both ends finite, but the span does not fit in an f64
        let mut wide = vec![-f64::MAX, 0.0, f64::MAX];
        assert!(matches!(Normalizer::default().normalize(&mut wide), Err(NoiseError::NonFiniteField { .. })));
    }
}
