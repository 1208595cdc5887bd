use serde::{Deserialize, Serialize};

/// Row-major `width × height` array. Grids are built whole and never resized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

#[derive(Deserialize)]
struct RawGrid<T> { width: usize, height: usize, cells: Vec<T> }

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = String;
    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        Grid::from_vec(raw.width, raw.height, raw.cells)
            .ok_or_else(|| format!("grid {}x{} does not match cell count", raw.width, raw.height))
    }
}

impl<T> Grid<T> {
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height { for x in 0..width {
            cells.push(f(x, y));
        }}
        Self { width, height, cells }
    }

    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Option<Self> {
        (width.checked_mul(height) == Some(cells.len())).then_some(Self { width, height, cells })
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height { self.cells.get(y * self.width + x) } else { None }
    }

    /// Unchecked-by-option access for hot loops; panics when out of bounds.
    pub(crate) fn at(&self, x: usize, y: usize) -> &T { &self.cells[y * self.width + x] }

    pub fn values(&self) -> &[T] { &self.cells }
    pub(crate) fn values_mut(&mut self) -> &mut [T] { &mut self.cells }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ { self.cells.chunks(self.width.max(1)) }

    pub fn column(&self, x: usize) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter().skip(x).step_by(self.width.max(1)).take(self.height)
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid { width: self.width, height: self.height, cells: self.cells.iter().map(f).collect() }
    }

    /// Combines two grids of identical shape cell by cell.
    pub fn zip_with<U, V>(&self, other: &Grid<U>, mut f: impl FnMut(&T, &U) -> V) -> Grid<V> {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        let cells = self.cells.iter().zip(&other.cells).map(|(a, b)| f(a, b)).collect();
        Grid { width: self.width, height: self.height, cells }
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self { width, height, cells: vec![value; width * height] }
    }

    /// Nested rows, the shape most renderers upload as a heightmap.
    pub fn to_rows(&self) -> Vec<Vec<T>> { self.rows().map(<[T]>::to_vec).collect() }
}
