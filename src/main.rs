//! Ferrogrid demo shell
//!
//! A headless stand-in for the rendering and input collaborators: builds a
//! world, registers placeholder texture handles, scatters blocks, runs a
//! scripted event sequence through the fixed-timestep loop, prints ASCII
//! maps along the way and finally round-trips the world through a snapshot.

use glam::IVec2;

use ferrogrid::assets::{TextureCatalog, TextureId};
use ferrogrid::consts::SIM_DT;
use ferrogrid::sim::{BlockVisual, InputEvent, TickInput, World, tick};
use ferrogrid::snapshot::{Snapshot, SnapshotError};
use ferrogrid::{WorldConfig, cell_center, world_to_cell};

fn main() {
    env_logger::init();
    log::info!("ferrogrid demo starting");

    let config = WorldConfig {
        cols: 16,
        rows: 9,
        cell_size: 50.0,
        ..WorldConfig::default()
    };
    let mut world = match World::new(config, 0xF3A9) {
        Ok(world) => world,
        Err(err) => {
            log::error!("config rejected: {}", err);
            std::process::exit(1);
        }
    };

    // Stand-in for the texture loader
    let mut catalog = TextureCatalog::default();
    for (i, visual) in BlockVisual::ALL.iter().enumerate() {
        catalog.register(*visual, TextureId(i as u32));
    }
    if let Err(err) = world.start(&catalog) {
        log::error!("start gate failed: {}", err);
        std::process::exit(1);
    }

    world.scatter(10);

    // Scripted session: raise two magnets, let the field push things
    // around, toggle one away again, then close. Clicks land on cell
    // centers the way a pointer would.
    let east_site = cell_center(IVec2::new(7, 4), config.cell_size);
    let plain_site = cell_center(IVec2::new(12, 4), config.cell_size);
    let north_site = cell_center(IVec2::new(2, 1), config.cell_size);
    let script: Vec<(u64, InputEvent)> = vec![
        (5, InputEvent::PlaceOrToggle { x: east_site.x, y: east_site.y }),
        (10, InputEvent::Rotate { x: east_site.x, y: east_site.y }),
        (15, InputEvent::Rotate { x: east_site.x, y: east_site.y }),
        (20, InputEvent::PlaceOrToggle { x: plain_site.x, y: plain_site.y }),
        (30, InputEvent::PlaceOrToggle { x: north_site.x, y: north_site.y }),
        (35, InputEvent::Rotate { x: north_site.x, y: north_site.y }),
        (90, InputEvent::PlaceOrToggle { x: east_site.x, y: east_site.y }),
        (175, InputEvent::Close),
    ];

    for tick_no in 0..180u64 {
        let events: Vec<InputEvent> = script
            .iter()
            .filter(|(due, _)| *due == tick_no)
            .map(|(_, event)| *event)
            .collect();
        let input = TickInput { events };
        tick(&mut world, &input, SIM_DT);

        if tick_no % 30 == 0 {
            print!("{}", render_ascii(&world));
            println!("tick {:3}  blocks {}", world.time_ticks(), world.registry.len());
        }
        if !world.is_running() {
            break;
        }
    }

    if let Err(err) = demo_snapshot(&world) {
        log::error!("snapshot demo failed: {}", err);
    }

    world.reset();
    log::info!("demo finished, world reset to tick {}", world.time_ticks());
}

/// Capture, serialize, parse and restore the world once
fn demo_snapshot(world: &World) -> Result<(), SnapshotError> {
    let json = Snapshot::capture(world).to_json()?;
    log::info!("snapshot captured ({} bytes)", json.len());
    let restored = Snapshot::from_json(&json)?.restore()?;
    log::info!(
        "snapshot restored: {} blocks at tick {}",
        restored.registry.len(),
        restored.time_ticks()
    );
    Ok(())
}

fn glyph(visual: BlockVisual) -> char {
    match visual {
        BlockVisual::Plain => '#',
        BlockVisual::MagnetNorth => '^',
        BlockVisual::MagnetEast => '>',
        BlockVisual::MagnetSouth => 'v',
        BlockVisual::MagnetWest => '<',
    }
}

/// One grid row per line, top row first (+y is north)
fn render_ascii(world: &World) -> String {
    let config = world.config();
    let mut rows = vec![vec!['.'; config.cols as usize]; config.rows as usize];
    for (visual, pos) in world.draw_list() {
        let cell = world_to_cell(pos, config.cell_size);
        rows[cell.y as usize][cell.x as usize] = glyph(visual);
    }

    let mut out = String::new();
    for row in rows.iter().rev() {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}
