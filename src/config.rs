//! World configuration
//!
//! Validated once at construction; a world never mutates its config.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::block::BlockTemplate;

/// Rejected configuration, or a failed start gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid has zero columns or zero rows
    EmptyGrid,
    /// Cell size must be positive
    NonPositiveCellSize,
    /// Default block mass must be positive
    NonPositiveMass,
    /// Default friction must lie in [0, 1]
    FrictionOutOfRange,
    /// Started before every block visual had a texture registered
    AssetsMissing,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid => write!(f, "grid must have at least one column and row"),
            ConfigError::NonPositiveCellSize => write!(f, "cell size must be positive"),
            ConfigError::NonPositiveMass => write!(f, "default block mass must be positive"),
            ConfigError::FrictionOutOfRange => {
                write!(f, "default friction must lie between 0 and 1")
            }
            ConfigError::AssetsMissing => write!(f, "not every block visual has a texture"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// World dimensions and default block parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid width in cells
    pub cols: u32,
    /// Grid height in cells
    pub rows: u32,
    /// Edge length of one cell in world units
    pub cell_size: f32,
    /// Mass for blocks placed without an explicit template
    pub default_mass: f32,
    /// Friction coefficient for default blocks, in [0, 1]
    pub default_friction: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cols: consts::DEFAULT_WORLD_COLS,
            rows: consts::DEFAULT_WORLD_ROWS,
            cell_size: consts::DEFAULT_CELL_SIZE,
            default_mass: consts::DEFAULT_BLOCK_MASS,
            default_friction: consts::DEFAULT_FRICTION,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.cell_size <= 0.0 {
            return Err(ConfigError::NonPositiveCellSize);
        }
        if self.default_mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass);
        }
        if !(0.0..=1.0).contains(&self.default_friction) {
            return Err(ConfigError::FrictionOutOfRange);
        }
        Ok(())
    }

    /// World width in world units
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.cell_size
    }

    /// World height in world units
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Template used for click placement and scattering
    pub fn template(&self) -> BlockTemplate {
        BlockTemplate {
            mass: self.default_mass,
            friction: self.default_friction,
            ..BlockTemplate::default()
        }
    }
}
