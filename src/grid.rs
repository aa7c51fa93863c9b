//! Fixed-size 2d container addressed by [`Point`].

use crate::error::MapError;
use crate::geom::Point;

/// Row-major grid of cells. The size never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// A grid filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![T::default(); width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Wraps row-major `cells`; the length must be `width * height`.
    pub fn from_vec(name: &str, width: usize, height: usize, cells: Vec<T>) -> Result<Self, MapError> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            MapError::InvalidMap(format!("layer '{name}' of {width}x{height} cells is too large"))
        })?;
        if cells.len() != expected {
            return Err(MapError::InvalidLayerSize {
                layer: name.to_owned(),
                expected,
                found: cells.len(),
            });
        }
        Ok(Grid { width, height, cells })
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// True when `at` lies inside the grid.
    pub fn contains(&self, at: Point) -> bool {
        at.x >= 0 && at.y >= 0 && (at.x as usize) < self.width && (at.y as usize) < self.height
    }

    fn index(&self, at: Point) -> Result<usize, MapError> {
        if !self.contains(at) {
            return Err(MapError::OutOfBounds {
                x: at.x,
                y: at.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(at.x as usize + at.y as usize * self.width)
    }

    /// Cell at `at`; out-of-range points are an `OutOfBounds` error.
    pub fn get(&self, at: Point) -> Result<&T, MapError> {
        let i = self.index(at)?;
        Ok(&self.cells[i])
    }

    /// Mutable cell at `at`.
    pub fn get_mut(&mut self, at: Point) -> Result<&mut T, MapError> {
        let i = self.index(at)?;
        Ok(&mut self.cells[i])
    }

    /// Stores `value` at `at` and returns a reference to the stored cell.
    pub fn set(&mut self, at: Point, value: T) -> Result<&T, MapError> {
        let i = self.index(at)?;
        self.cells[i] = value;
        Ok(&self.cells[i])
    }

    /// Visits every cell row by row with its coordinate and the whole cell slice.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&T, Point, &[T]),
    {
        for y in 0..self.height {
            for x in 0..self.width {
                let at = Point::new(x as i32, y as i32);
                visit(&self.cells[x + y * self.width], at, &self.cells);
            }
        }
    }

    /// Like [`Grid::for_each`] but the visitor may rewrite each cell.
    pub fn for_each_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut T, Point),
    {
        let width = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            visit(cell, Point::new((i % width) as i32, (i / width) as i32));
        }
    }

    /// Row-major iterator over `(coordinate, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Point::new((i % width) as i32, (i / width) as i32), c))
    }

    /// Builds a same-shaped grid through a fallible mapping.
    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<Grid<U>, E>
    where
        F: FnMut(&T, Point) -> Result<U, E>,
    {
        let cells = self
            .iter()
            .map(|(at, c)| f(c, at))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Grid { width: self.width, height: self.height, cells })
    }
}
