//! Dense 2D storage for per-cell data
//!
//! Row-major: index = y * cols + x, so a row is contiguous in memory.

use glam::IVec2;

/// Rectangular buffer addressed by cell coordinate
///
/// Callers are expected to check `in_bounds` before indexing; access to a
/// coordinate outside the grid panics.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    cols: u32,
    rows: u32,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid2d<T> {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            data: vec![T::default(); cols as usize * rows as usize],
        }
    }
}

impl<T: Copy> Grid2d<T> {
    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.cols && (cell.y as u32) < self.rows
    }

    #[inline]
    fn index(&self, cell: IVec2) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.y as usize * self.cols as usize + cell.x as usize
    }

    pub fn get(&self, cell: IVec2) -> T {
        self.data[self.index(cell)]
    }

    pub fn get_mut(&mut self, cell: IVec2) -> &mut T {
        let idx = self.index(cell);
        &mut self.data[idx]
    }

    pub fn set(&mut self, cell: IVec2, value: T) {
        let idx = self.index(cell);
        self.data[idx] = value;
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}
