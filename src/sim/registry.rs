//! Spatial block registry
//!
//! One block per grid cell. The registry owns both the blocks and the force
//! field and keeps them in lockstep: every placement, removal, rotation, and
//! cell crossing updates the field within the same call, so the field never
//! has to be rebuilt from scratch.

use std::collections::HashMap;
use std::fmt;

use glam::{IVec2, Vec2};

use crate::config::WorldConfig;
use crate::{cell_origin, world_to_cell};

use super::block::{Block, BlockId, BlockTemplate, MagnetDirection};
use super::field::ForceField;

/// Why a block action was refused. Each action reports its own failure;
/// one bad event never aborts the batch it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// Target cell lies outside the world grid
    OutOfBounds,
    /// Target cell already holds a block
    AlreadyOccupied,
    /// No block at the target cell
    NotFound,
    /// Template mass or friction is out of range
    InvalidTemplate,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::OutOfBounds => write!(f, "cell is outside the world grid"),
            ActionError::AlreadyOccupied => write!(f, "cell already holds a block"),
            ActionError::NotFound => write!(f, "no block at that cell"),
            ActionError::InvalidTemplate => write!(f, "block mass or friction is out of range"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Owns every block in the world plus the force field they induce
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    cols: u32,
    rows: u32,
    cell_size: f32,
    blocks: HashMap<IVec2, Block>,
    field: ForceField,
    next_id: u32,
}

impl BlockRegistry {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            cols: config.cols,
            rows: config.rows,
            cell_size: config.cell_size,
            blocks: HashMap::new(),
            field: ForceField::new(config.cols, config.rows),
            next_id: 0,
        }
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.cols as i32 && cell.y < self.rows as i32
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn field(&self) -> &ForceField {
        &self.field
    }

    /// Place a new block snapped to `cell`. Checks run in order: bounds,
    /// template validity, occupancy.
    pub fn place(&mut self, cell: IVec2, template: BlockTemplate) -> Result<BlockId, ActionError> {
        if !self.in_bounds(cell) {
            return Err(ActionError::OutOfBounds);
        }
        if !template.is_valid() {
            return Err(ActionError::InvalidTemplate);
        }
        if self.blocks.contains_key(&cell) {
            return Err(ActionError::AlreadyOccupied);
        }

        let id = BlockId(self.next_id);
        self.next_id += 1;
        let pos = cell_origin(cell, self.cell_size);
        let block = Block {
            id,
            pos,
            vel: template.velocity,
            prev_pos: pos,
            mass: template.mass,
            friction: template.friction,
            direction: template.direction,
        };
        self.field.apply(cell, block.emitted_force());
        self.blocks.insert(cell, block);
        log::debug!("placed block {} at cell ({}, {})", id, cell.x, cell.y);
        Ok(id)
    }

    /// Place at a world position, snapping to the containing cell
    pub fn place_at(&mut self, pos: Vec2, template: BlockTemplate) -> Result<BlockId, ActionError> {
        self.place(world_to_cell(pos, self.cell_size), template)
    }

    /// Remove the block at `cell` and retract its force contribution
    pub fn remove(&mut self, cell: IVec2) -> Result<Block, ActionError> {
        let block = self.blocks.remove(&cell).ok_or(ActionError::NotFound)?;
        self.field.retract(cell, block.emitted_force());
        log::debug!("removed block {} from cell ({}, {})", block.id, cell.x, cell.y);
        Ok(block)
    }

    /// Advance the block's magnet direction one step through the cycle,
    /// retracting the old contribution and applying the new one together.
    /// Returns the direction the block now faces.
    pub fn rotate(&mut self, cell: IVec2) -> Result<MagnetDirection, ActionError> {
        let block = self.blocks.get_mut(&cell).ok_or(ActionError::NotFound)?;
        let old_force = block.emitted_force();
        block.direction = block.direction.rotated();
        let direction = block.direction;
        let new_force = block.emitted_force();
        self.field.retract(cell, old_force);
        self.field.apply(cell, new_force);
        log::debug!("block at cell ({}, {}) now faces {:?}", cell.x, cell.y, direction);
        Ok(direction)
    }

    pub fn get(&self, cell: IVec2) -> Option<&Block> {
        self.blocks.get(&cell)
    }

    /// Accumulated magnetic force at a world position; zero outside the grid
    pub fn force_at(&self, pos: Vec2) -> Vec2 {
        self.field.force_at(world_to_cell(pos, self.cell_size))
    }

    /// All blocks in row-major cell order (y outer, x inner)
    pub fn blocks(&self) -> impl Iterator<Item = (IVec2, &Block)> {
        let mut entries: Vec<(IVec2, &Block)> =
            self.blocks.iter().map(|(cell, block)| (*cell, block)).collect();
        entries.sort_unstable_by_key(|(cell, _)| (cell.y, cell.x));
        entries.into_iter()
    }

    /// Remove every block and zero the field. IDs restart from zero.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.field.clear();
        self.next_id = 0;
    }

    pub(crate) fn occupied_cells(&self) -> Vec<IVec2> {
        let mut cells: Vec<IVec2> = self.blocks.keys().copied().collect();
        cells.sort_unstable_by_key(|cell| (cell.y, cell.x));
        cells
    }

    /// Re-key blocks whose position drifted into another cell since the last
    /// tick, sweeping their force contribution along. Crossings resolve in
    /// row-major order of the cell each block occupied before the pass.
    pub(crate) fn refresh_moved(&mut self) {
        for cell in self.occupied_cells() {
            let Some(block) = self.blocks.get(&cell) else {
                continue;
            };
            let target = world_to_cell(block.pos, self.cell_size);
            if target != cell {
                self.move_block(cell, target);
            }
        }
        for block in self.blocks.values_mut() {
            block.prev_pos = block.pos;
        }
    }

    /// Carry one block across a cell boundary. A taken or out-of-bounds
    /// target bounces the block back instead: velocity reflects on the axes
    /// that crossed and the position reverts to the last keyed one.
    fn move_block(&mut self, from: IVec2, to: IVec2) {
        let free = self.in_bounds(to) && !self.blocks.contains_key(&to);
        let Some(mut block) = self.blocks.remove(&from) else {
            return;
        };
        if free {
            let force = block.emitted_force();
            self.field.retract(from, force);
            self.field.apply(to, force);
            log::debug!(
                "block {} crossed from cell ({}, {}) to ({}, {})",
                block.id,
                from.x,
                from.y,
                to.x,
                to.y
            );
            self.blocks.insert(to, block);
        } else {
            if to.x != from.x {
                block.vel.x = -block.vel.x;
            }
            if to.y != from.y {
                block.vel.y = -block.vel.y;
            }
            block.pos = block.prev_pos;
            self.blocks.insert(from, block);
        }
    }

    /// Magnetic impulse plus friction decay, applied per tick without time
    /// scaling. Each block samples the field at the cell containing it.
    pub(crate) fn integrate_velocities(&mut self) {
        let field = &self.field;
        let cell_size = self.cell_size;
        for block in self.blocks.values_mut() {
            let cell = world_to_cell(block.pos, cell_size);
            block.vel += field.force_at(cell) / block.mass;
            block.vel *= 1.0 - block.friction;
        }
    }

    pub(crate) fn integrate_positions(&mut self, dt: f32) {
        for block in self.blocks.values_mut() {
            block.pos += block.vel * dt;
        }
    }

    /// Keep every block's origin inside the world span, reflecting velocity
    /// inward on contact. The y limit comes from the row count, not the
    /// column count.
    pub(crate) fn enforce_bounds(&mut self) {
        let max = Vec2::new(
            (self.cols - 1) as f32 * self.cell_size,
            (self.rows - 1) as f32 * self.cell_size,
        );
        for block in self.blocks.values_mut() {
            if block.pos.x < 0.0 {
                block.pos.x = 0.0;
                block.vel.x = block.vel.x.abs();
            } else if block.pos.x > max.x {
                block.pos.x = max.x;
                block.vel.x = -block.vel.x.abs();
            }
            if block.pos.y < 0.0 {
                block.pos.y = 0.0;
                block.vel.y = block.vel.y.abs();
            } else if block.pos.y > max.y {
                block.pos.y = max.y;
                block.vel.y = -block.vel.y.abs();
            }
        }
    }

    /// Reinsert a block restored from a snapshot, re-deriving its field
    /// contribution. The ID counter advances past the restored ID.
    pub(crate) fn insert_restored(&mut self, cell: IVec2, block: Block) -> Result<(), ActionError> {
        if !self.in_bounds(cell) {
            return Err(ActionError::OutOfBounds);
        }
        if block.mass <= 0.0 || !(0.0..=1.0).contains(&block.friction) {
            return Err(ActionError::InvalidTemplate);
        }
        if self.blocks.contains_key(&cell) {
            return Err(ActionError::AlreadyOccupied);
        }
        self.next_id = self.next_id.max(block.id.0.saturating_add(1));
        self.field.apply(cell, block.emitted_force());
        self.blocks.insert(cell, block);
        Ok(())
    }
}
