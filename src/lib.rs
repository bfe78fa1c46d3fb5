//! Ferrogrid - a grid-aligned magnetic block sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (dense grid, force field, block registry, tick pipeline)
//! - `config`: Validated world construction parameters
//! - `assets`: Texture handles and the pre-start readiness gate
//! - `snapshot`: Versioned JSON save/load

pub mod assets;
pub mod config;
pub mod sim;
pub mod snapshot;

pub use config::WorldConfig;
pub use sim::{World, tick};

use glam::{IVec2, Vec2};

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Edge length of one square grid cell in world units
    pub const DEFAULT_CELL_SIZE: f32 = 50.0;
    /// Mass of a block placed without an explicit template (kg)
    pub const DEFAULT_BLOCK_MASS: f32 = 50.0;
    /// Per-tick velocity damping for default placements (0 = frictionless)
    pub const DEFAULT_FRICTION: f32 = 0.0;

    /// Default grid dimensions - a 1920x1080 world at 50-unit cells
    pub const DEFAULT_WORLD_COLS: u32 = 38;
    pub const DEFAULT_WORLD_ROWS: u32 = 21;
}

/// Discretize a world-space position to its grid cell
#[inline]
pub fn world_to_cell(pos: Vec2, cell_size: f32) -> IVec2 {
    (pos / cell_size).floor().as_ivec2()
}

/// World-space origin (minimum corner) of a cell
#[inline]
pub fn cell_origin(cell: IVec2, cell_size: f32) -> Vec2 {
    cell.as_vec2() * cell_size
}

/// World-space center of a cell
#[inline]
pub fn cell_center(cell: IVec2, cell_size: f32) -> Vec2 {
    (cell.as_vec2() + 0.5) * cell_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_cell_floors_negative_positions() {
        assert_eq!(world_to_cell(Vec2::new(0.0, 0.0), 50.0), IVec2::new(0, 0));
        assert_eq!(world_to_cell(Vec2::new(49.9, 49.9), 50.0), IVec2::new(0, 0));
        assert_eq!(world_to_cell(Vec2::new(50.0, 99.9), 50.0), IVec2::new(1, 1));
        // Truncation toward zero would put these in cell 0
        assert_eq!(world_to_cell(Vec2::new(-0.1, -50.0), 50.0), IVec2::new(-1, -1));
        assert_eq!(world_to_cell(Vec2::new(-50.1, 10.0), 50.0), IVec2::new(-2, 0));
    }

    #[test]
    fn test_cell_origin_is_cell_min_corner() {
        let origin = cell_origin(IVec2::new(3, 2), 50.0);
        assert_eq!(origin, Vec2::new(150.0, 100.0));
        assert_eq!(world_to_cell(origin, 50.0), IVec2::new(3, 2));
        assert_eq!(cell_center(IVec2::new(0, 0), 50.0), Vec2::new(25.0, 25.0));
    }
}
