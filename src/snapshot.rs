//! Versioned world snapshots
//!
//! A JSON envelope holding everything needed to reproduce a world: seed,
//! tick counter, config and blocks. The force field is derived state and is
//! never stored; load replays each block into a fresh registry, which
//! rebuilds the field by construction. Storage is the caller's concern;
//! this module only turns worlds into strings and back.

use std::fmt;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, WorldConfig};
use crate::sim::block::{Block, BlockId, MagnetDirection};
use crate::sim::registry::ActionError;
use crate::sim::state::World;
use crate::world_to_cell;

/// Bump when the envelope layout changes
pub const SNAPSHOT_VERSION: u32 = 1;

/// Why a snapshot failed to load
#[derive(Debug)]
pub enum SnapshotError {
    /// Envelope version this build does not understand
    UnsupportedVersion(u32),
    /// The JSON itself failed to parse
    Malformed(serde_json::Error),
    /// A stored block could not be replayed into the registry
    Invalid(ActionError),
    /// The stored config failed validation
    Config(ConfigError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::UnsupportedVersion(version) => {
                write!(f, "unsupported snapshot version {}", version)
            }
            SnapshotError::Malformed(err) => write!(f, "malformed snapshot: {}", err),
            SnapshotError::Invalid(err) => write!(f, "invalid snapshot block: {}", err),
            SnapshotError::Config(err) => write!(f, "invalid snapshot config: {}", err),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Malformed(err)
    }
}

impl From<ActionError> for SnapshotError {
    fn from(err: ActionError) -> Self {
        SnapshotError::Invalid(err)
    }
}

impl From<ConfigError> for SnapshotError {
    fn from(err: ConfigError) -> Self {
        SnapshotError::Config(err)
    }
}

/// One stored block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: u32,
    pub cell: IVec2,
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: f32,
    pub friction: f32,
    pub direction: MagnetDirection,
}

/// The envelope written to and read from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub seed: u64,
    pub ticks: u64,
    pub config: WorldConfig,
    pub blocks: Vec<BlockRecord>,
}

impl Snapshot {
    /// Capture a world. Blocks are stored in row-major cell order.
    pub fn capture(world: &World) -> Self {
        let blocks = world
            .registry
            .blocks()
            .map(|(cell, block)| BlockRecord {
                id: block.id.0,
                cell,
                pos: block.pos,
                vel: block.vel,
                mass: block.mass,
                friction: block.friction,
                direction: block.direction,
            })
            .collect();
        Self {
            version: SNAPSHOT_VERSION,
            seed: world.seed(),
            ticks: world.time_ticks(),
            config: *world.config(),
            blocks,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an envelope, rejecting versions this build does not understand
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }

    /// Rebuild a world from the envelope. The result is back in `Loading`;
    /// the shell runs the start gate again before ticking.
    pub fn restore(&self) -> Result<World, SnapshotError> {
        let mut world = World::new(self.config, self.seed)?;
        for record in &self.blocks {
            if world_to_cell(record.pos, self.config.cell_size) != record.cell {
                log::warn!(
                    "block {} position ({}, {}) lies outside its stored cell ({}, {})",
                    record.id,
                    record.pos.x,
                    record.pos.y,
                    record.cell.x,
                    record.cell.y
                );
            }
            let block = Block {
                id: BlockId(record.id),
                pos: record.pos,
                vel: record.vel,
                prev_pos: record.pos,
                mass: record.mass,
                friction: record.friction,
                direction: record.direction,
            };
            world.registry.insert_restored(record.cell, block)?;
        }
        world.time_ticks = self.ticks;
        log::info!(
            "restored world at tick {} with {} blocks",
            self.ticks,
            self.blocks.len()
        );
        Ok(world)
    }
}
