//! Deterministic simulation module
//!
//! All sandbox logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (world generation; the tick path draws nothing)
//! - Stable iteration order (row-major over cells)
//! - No rendering or platform dependencies

pub mod block;
pub mod field;
pub mod grid;
pub mod registry;
pub mod state;
pub mod tick;

pub use block::{Block, BlockId, BlockTemplate, BlockVisual, MagnetDirection};
pub use field::ForceField;
pub use grid::Grid2d;
pub use registry::{ActionError, BlockRegistry};
pub use state::{World, WorldPhase};
pub use tick::{InputEvent, TickInput, tick};
