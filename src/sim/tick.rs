//! Fixed timestep simulation tick
//!
//! Advances the world deterministically: input events first, then cell
//! crossings, then velocity and position integration, then the bounds sweep.

use glam::Vec2;

use super::registry::ActionError;
use super::state::{World, WorldPhase};
use crate::world_to_cell;

/// A discrete action delivered to the world, in world-space coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary click: place a default block in the clicked cell, or remove
    /// the block already there
    PlaceOrToggle { x: f32, y: f32 },
    /// Advance the clicked block's magnet direction one step
    Rotate { x: f32, y: f32 },
    /// Shut the world down
    Close,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events applied in order, before any physics
    pub events: Vec<InputEvent>,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if !world.is_running() {
        return;
    }

    for event in &input.events {
        apply_event(world, *event);
        if world.phase == WorldPhase::Closed {
            return;
        }
    }

    world.registry.refresh_moved();
    world.registry.integrate_velocities();
    world.registry.integrate_positions(dt);
    world.registry.enforce_bounds();
    world.time_ticks += 1;
}

/// Route one event into the registry. Rejected actions are traced at debug
/// level and never abort the tick.
fn apply_event(world: &mut World, event: InputEvent) {
    match event {
        InputEvent::PlaceOrToggle { x, y } => {
            let cell = world_to_cell(Vec2::new(x, y), world.registry.cell_size());
            let template = world.config().template();
            match world.registry.place(cell, template) {
                Ok(_) => {}
                Err(ActionError::AlreadyOccupied) => {
                    if let Err(err) = world.registry.remove(cell) {
                        log::debug!("toggle at cell ({}, {}) failed: {}", cell.x, cell.y, err);
                    }
                }
                Err(err) => {
                    log::debug!("place at cell ({}, {}) rejected: {}", cell.x, cell.y, err);
                }
            }
        }
        InputEvent::Rotate { x, y } => {
            let cell = world_to_cell(Vec2::new(x, y), world.registry.cell_size());
            if let Err(err) = world.registry.rotate(cell) {
                log::debug!("rotate at cell ({}, {}) rejected: {}", cell.x, cell.y, err);
            }
        }
        InputEvent::Close => {
            log::info!("close requested at tick {}", world.time_ticks);
            world.phase = WorldPhase::Closed;
        }
    }
}
