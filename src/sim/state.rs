//! Strip state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Everyday pickup (coin)
    Common,
    /// Invincibility pickup, gated by its own cooldown
    Rare,
}

/// Vertical placement band for items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemBand {
    /// Resting on the tile top
    Ground,
    /// Elevated; needs a jump
    Floating,
}

/// An obstacle attached to a tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleHandle {
    pub id: u32,
    /// Index into the obstacle catalog
    pub template: usize,
    /// Sequence index of the tile this belongs to
    pub tile_index: u64,
    /// Offset from the tile position
    pub offset: Vec2,
    /// Local scale relative to the tile
    pub scale: Vec2,
    /// False when footprint data was missing and the scale is the template's own
    pub fitted: bool,
}

/// An item attached to a tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemHandle {
    pub id: u32,
    pub kind: ItemKind,
    pub tile_index: u64,
    pub band: ItemBand,
    pub offset: Vec2,
}

/// One fixed-width terrain slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Sequence index; grows every time the slot is recycled
    pub index: u64,
    pub pos: Vec2,
    /// Solid (true) or gap (false)
    pub active: bool,
    /// Local visual size; `None` if the tile has no visual
    pub size: Option<Vec2>,
    /// Scale inherited from the parent transform
    pub scale: Vec2,
    pub obstacle: Option<ObstacleHandle>,
    pub item: Option<ItemHandle>,
}

impl Tile {
    pub fn new(index: u64, pos: Vec2, world_size: Vec2, scale: Vec2) -> Self {
        Self {
            index,
            pos,
            active: false,
            size: Some(world_size / scale),
            scale,
            obstacle: None,
            item: None,
        }
    }

    /// On-screen size after the inherited scale
    pub fn world_size(&self) -> Option<Vec2> {
        self.size.map(|s| s * self.scale)
    }

    /// Drop any attached content, returning it for removal notices
    pub fn clear_content(&mut self) -> (Option<ObstacleHandle>, Option<ItemHandle>) {
        (self.obstacle.take(), self.item.take())
    }
}

/// Per-tile replay record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub index: u64,
    pub active: bool,
    pub obstacle: Option<usize>,
    pub item: Option<ItemKind>,
}

impl From<&Tile> for TileSnapshot {
    fn from(tile: &Tile) -> Self {
        Self {
            index: tile.index,
            active: tile.active,
            obstacle: tile.obstacle.as_ref().map(|o| o.template),
            item: tile.item.as_ref().map(|i| i.kind),
        }
    }
}

/// Strip contents front to back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripSnapshot {
    pub distance: f32,
    pub tiles: Vec<TileSnapshot>,
}

/// Hands out entity ids for placed content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed.wrapping_add(self.stream))
    }
}
