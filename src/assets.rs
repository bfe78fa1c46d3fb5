//! Texture handles for the rendering collaborator
//!
//! The core never loads pixel data. The loading collaborator reports one
//! handle per block visual, and `ready` gates the first tick.

use crate::sim::block::BlockVisual;

/// Opaque handle to a loaded texture, issued by the loading collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Registered texture handles for the five block visuals
#[derive(Debug, Clone, Default)]
pub struct TextureCatalog {
    slots: [Option<TextureId>; 5],
}

impl TextureCatalog {
    fn slot(visual: BlockVisual) -> usize {
        match visual {
            BlockVisual::Plain => 0,
            BlockVisual::MagnetNorth => 1,
            BlockVisual::MagnetEast => 2,
            BlockVisual::MagnetSouth => 3,
            BlockVisual::MagnetWest => 4,
        }
    }

    /// Record the handle for one visual, replacing any earlier one
    pub fn register(&mut self, visual: BlockVisual, id: TextureId) {
        self.slots[Self::slot(visual)] = Some(id);
        log::debug!("texture {} registered for {:?}", id.0, visual);
    }

    pub fn get(&self, visual: BlockVisual) -> Option<TextureId> {
        self.slots[Self::slot(visual)]
    }

    /// True once every visual can be drawn
    pub fn ready(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }

    /// Visuals still waiting on a texture
    pub fn missing(&self) -> Vec<BlockVisual> {
        BlockVisual::ALL
            .iter()
            .copied()
            .filter(|visual| self.get(*visual).is_none())
            .collect()
    }
}
