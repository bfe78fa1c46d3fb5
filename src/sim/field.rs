//! Directional force-field accumulator
//!
//! Two dense scalar planes (x and y) over the world grid. A magnet's
//! contribution is swept along its row or column once when the magnet is
//! placed, removed, rotated, or moved; queries are O(1). The push is uniform
//! at every cell beyond the source, with no distance falloff.

use glam::{IVec2, Vec2};

use super::grid::Grid2d;

/// Accumulated magnetic push per cell, in Newtons per axis
#[derive(Debug, Clone, PartialEq)]
pub struct ForceField {
    fx: Grid2d<f32>,
    fy: Grid2d<f32>,
}

impl ForceField {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            fx: Grid2d::new(cols, rows),
            fy: Grid2d::new(cols, rows),
        }
    }

    pub fn cols(&self) -> u32 {
        self.fx.cols()
    }

    pub fn rows(&self) -> u32 {
        self.fx.rows()
    }

    /// Add a directional contribution sourced at an in-bounds cell.
    ///
    /// A positive x component is added to every cell strictly right of the
    /// source in its row, a negative one to every cell strictly left; the y
    /// component sweeps the column the same way. A zero component leaves its
    /// plane untouched, so the source cell itself never changes.
    pub fn apply(&mut self, cell: IVec2, force: Vec2) {
        debug_assert!(self.fx.in_bounds(cell));
        if force.x > 0.0 {
            for x in (cell.x + 1)..self.cols() as i32 {
                *self.fx.get_mut(IVec2::new(x, cell.y)) += force.x;
            }
        } else if force.x < 0.0 {
            for x in 0..cell.x {
                *self.fx.get_mut(IVec2::new(x, cell.y)) += force.x;
            }
        }

        if force.y > 0.0 {
            for y in (cell.y + 1)..self.rows() as i32 {
                *self.fy.get_mut(IVec2::new(cell.x, y)) += force.y;
            }
        } else if force.y < 0.0 {
            for y in 0..cell.y {
                *self.fy.get_mut(IVec2::new(cell.x, y)) += force.y;
            }
        }
    }

    /// Undo a contribution previously applied at `cell`
    pub fn retract(&mut self, cell: IVec2, force: Vec2) {
        self.apply(cell, -force);
    }

    /// Accumulated force at a cell; zero outside the grid
    pub fn force_at(&self, cell: IVec2) -> Vec2 {
        if !self.fx.in_bounds(cell) {
            return Vec2::ZERO;
        }
        Vec2::new(self.fx.get(cell), self.fy.get(cell))
    }

    /// Zero both planes. Full-world reset only, never mid-simulation.
    pub fn clear(&mut self) {
        self.fx.fill(0.0);
        self.fy.fill(0.0);
    }

    /// True when no cell holds any accumulated force
    pub fn is_zero(&self) -> bool {
        self.fx.iter().all(|v| *v == 0.0) && self.fy.iter().all(|v| *v == 0.0)
    }
}
