//! World state and lifecycle
//!
//! Everything a snapshot must capture to reproduce a run lives here.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::TextureCatalog;
use crate::config::{ConfigError, WorldConfig};

use super::block::BlockVisual;
use super::registry::BlockRegistry;

/// Current phase of the world lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldPhase {
    /// Configured but not started; textures may still be loading
    Loading,
    /// Simulation is advancing
    Running,
    /// Shut down by a close event, ticks are ignored
    Closed,
}

/// Complete world state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    /// Blocks plus the force field they induce
    pub registry: BlockRegistry,
    pub(crate) phase: WorldPhase,
    /// Seed kept for reset and snapshots
    seed: u64,
    /// Drawn from only for world generation, never on the tick path
    rng: Pcg32,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
}

impl World {
    /// Build a world from a validated config. The world starts in
    /// `Loading`; call [`World::start`] once textures are registered.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "world created: {}x{} cells of {} units, seed {}",
            config.cols,
            config.rows,
            config.cell_size,
            seed
        );
        Ok(Self {
            config,
            registry: BlockRegistry::new(&config),
            phase: WorldPhase::Loading,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
        })
    }

    /// Leave `Loading` once every block visual has a texture registered
    pub fn start(&mut self, catalog: &TextureCatalog) -> Result<(), ConfigError> {
        if !catalog.ready() {
            log::error!("cannot start, textures missing for {:?}", catalog.missing());
            return Err(ConfigError::AssetsMissing);
        }
        self.phase = WorldPhase::Running;
        log::info!("world running");
        Ok(())
    }

    pub fn phase(&self) -> WorldPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == WorldPhase::Running
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Scatter up to `max_blocks` default blocks over random cells. A cell
    /// that comes up twice keeps its first block. Returns how many landed.
    pub fn scatter(&mut self, max_blocks: u32) -> u32 {
        let count = self.rng.random_range(0..=max_blocks);
        let mut landed = 0;
        for _ in 0..count {
            let cell = IVec2::new(
                self.rng.random_range(0..self.config.cols as i32),
                self.rng.random_range(0..self.config.rows as i32),
            );
            if self.registry.place(cell, self.config.template()).is_ok() {
                landed += 1;
            }
        }
        log::info!("scattered {} of {} rolled blocks", landed, count);
        landed
    }

    /// Return to the freshly-created state: no blocks, reseeded RNG, zero
    /// ticks, back in `Loading`.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.time_ticks = 0;
        self.phase = WorldPhase::Loading;
        log::info!("world reset to seed {}", self.seed);
    }

    /// Blocks as (visual, world position) pairs in row-major cell order,
    /// ready for a renderer to consume
    pub fn draw_list(&self) -> Vec<(BlockVisual, Vec2)> {
        self.registry
            .blocks()
            .map(|(_, block)| (block.visual(), block.pos))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureId;
    use crate::sim::block::{BlockTemplate, MagnetDirection};

    fn test_config() -> WorldConfig {
        WorldConfig {
            cols: 10,
            rows: 6,
            cell_size: 50.0,
            ..WorldConfig::default()
        }
    }

    fn full_catalog() -> TextureCatalog {
        let mut catalog = TextureCatalog::default();
        for (i, visual) in BlockVisual::ALL.iter().enumerate() {
            catalog.register(*visual, TextureId(i as u32));
        }
        catalog
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = WorldConfig {
            cols: 0,
            ..test_config()
        };
        assert_eq!(World::new(config, 1).unwrap_err(), ConfigError::EmptyGrid);
    }

    #[test]
    fn test_start_requires_full_catalog() {
        let mut world = World::new(test_config(), 1).unwrap();
        let err = world.start(&TextureCatalog::default()).unwrap_err();
        assert_eq!(err, ConfigError::AssetsMissing);
        assert_eq!(world.phase(), WorldPhase::Loading);

        world.start(&full_catalog()).unwrap();
        assert!(world.is_running());
    }

    #[test]
    fn test_scatter_is_deterministic() {
        let mut a = World::new(test_config(), 99).unwrap();
        let mut b = World::new(test_config(), 99).unwrap();

        assert_eq!(a.scatter(12), b.scatter(12));
        let cells_a: Vec<IVec2> = a.registry.blocks().map(|(cell, _)| cell).collect();
        let cells_b: Vec<IVec2> = b.registry.blocks().map(|(cell, _)| cell).collect();
        assert_eq!(cells_a, cells_b);
    }

    #[test]
    fn test_scatter_respects_cap() {
        let mut world = World::new(test_config(), 5).unwrap();
        let landed = world.scatter(12);
        assert!(landed <= 12);
        assert_eq!(world.registry.len(), landed as usize);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut world = World::new(test_config(), 7).unwrap();
        world.scatter(9);
        let first: Vec<IVec2> = world.registry.blocks().map(|(cell, _)| cell).collect();
        world.time_ticks = 42;

        world.reset();
        assert!(world.registry.is_empty());
        assert_eq!(world.time_ticks(), 0);
        assert_eq!(world.phase(), WorldPhase::Loading);

        world.scatter(9);
        let second: Vec<IVec2> = world.registry.blocks().map(|(cell, _)| cell).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_draw_list_pairs_visual_and_position() {
        let mut world = World::new(test_config(), 1).unwrap();
        world
            .registry
            .place(IVec2::new(2, 1), BlockTemplate::magnet(MagnetDirection::North))
            .unwrap();
        world
            .registry
            .place(IVec2::new(0, 0), BlockTemplate::default())
            .unwrap();

        let list = world.draw_list();
        assert_eq!(
            list,
            vec![
                (BlockVisual::Plain, Vec2::new(0.0, 0.0)),
                (BlockVisual::MagnetNorth, Vec2::new(100.0, 50.0)),
            ]
        );
    }
}
