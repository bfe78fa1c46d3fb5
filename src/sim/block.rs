//! Block entities and their magnetic state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BLOCK_MASS, DEFAULT_FRICTION};

/// Stable identifier for a placed block, assigned by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub u32);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which way a block's magnetic face points
///
/// +y is north in world space. Renderers whose screen y axis points down
/// flip on draw; the simulation never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MagnetDirection {
    #[default]
    None,
    North,
    East,
    South,
    West,
}

impl MagnetDirection {
    /// Next direction in the rotate cycle: None -> N -> E -> S -> W -> None
    pub fn rotated(self) -> Self {
        match self {
            MagnetDirection::None => MagnetDirection::North,
            MagnetDirection::North => MagnetDirection::East,
            MagnetDirection::East => MagnetDirection::South,
            MagnetDirection::South => MagnetDirection::West,
            MagnetDirection::West => MagnetDirection::None,
        }
    }

    pub fn is_magnetic(self) -> bool {
        self != MagnetDirection::None
    }

    /// Force vector a block of the given mass emits at its own cell
    pub fn force(self, mass: f32) -> Vec2 {
        match self {
            MagnetDirection::None => Vec2::ZERO,
            MagnetDirection::North => Vec2::new(0.0, mass),
            MagnetDirection::East => Vec2::new(mass, 0.0),
            MagnetDirection::South => Vec2::new(0.0, -mass),
            MagnetDirection::West => Vec2::new(-mass, 0.0),
        }
    }
}

/// Renderable state, derived from the magnetic direction
///
/// The renderer resolves each variant to a texture through the catalog; the
/// simulation only hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockVisual {
    Plain,
    MagnetNorth,
    MagnetEast,
    MagnetSouth,
    MagnetWest,
}

impl BlockVisual {
    /// Every variant, in catalog slot order
    pub const ALL: [BlockVisual; 5] = [
        BlockVisual::Plain,
        BlockVisual::MagnetNorth,
        BlockVisual::MagnetEast,
        BlockVisual::MagnetSouth,
        BlockVisual::MagnetWest,
    ];
}

impl From<MagnetDirection> for BlockVisual {
    fn from(direction: MagnetDirection) -> Self {
        match direction {
            MagnetDirection::None => BlockVisual::Plain,
            MagnetDirection::North => BlockVisual::MagnetNorth,
            MagnetDirection::East => BlockVisual::MagnetEast,
            MagnetDirection::South => BlockVisual::MagnetSouth,
            MagnetDirection::West => BlockVisual::MagnetWest,
        }
    }
}

/// Parameters for placing a new block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockTemplate {
    /// Mass in kg, must be positive
    pub mass: f32,
    /// Per-tick velocity damping in [0, 1]
    pub friction: f32,
    pub direction: MagnetDirection,
    pub velocity: Vec2,
}

impl Default for BlockTemplate {
    fn default() -> Self {
        Self {
            mass: DEFAULT_BLOCK_MASS,
            friction: DEFAULT_FRICTION,
            direction: MagnetDirection::None,
            velocity: Vec2::ZERO,
        }
    }
}

impl BlockTemplate {
    /// Default template already magnetized in a direction
    pub fn magnet(direction: MagnetDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.mass > 0.0 && (0.0..=1.0).contains(&self.friction)
    }
}

/// A placed block
///
/// Persisted through `snapshot::BlockRecord`, never serialized directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Continuous position of the block's minimum corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Position at the start of the current tick
    pub prev_pos: Vec2,
    pub mass: f32,
    /// Per-tick velocity damping in [0, 1]
    pub friction: f32,
    pub direction: MagnetDirection,
}

impl Block {
    /// Force this block currently emits at its cell
    pub fn emitted_force(&self) -> Vec2 {
        self.direction.force(self.mass)
    }

    pub fn visual(&self) -> BlockVisual {
        self.direction.into()
    }
}
