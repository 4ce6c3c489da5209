//! Collectible placement
//!
//! Two rolls at `spawn_percent`: whether anything appears, then whether the
//! kind is up for grabs. The rare kind also needs its own roll and an idle
//! cooldown, which drains by one on every solid recycle.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{EntityIds, ItemBand, ItemHandle, ItemKind, Tile};
use crate::consts::ITEM_GROUND_BIAS;

/// Countdown toward rare-item eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCooldown {
    pub countdown: u32,
    /// Countdown armed when a rare item is placed
    pub length: u32,
}

impl ItemCooldown {
    pub fn new(length: u32) -> Self {
        Self {
            countdown: 0,
            length,
        }
    }

    pub fn reset(&mut self) {
        self.countdown = 0;
    }

    fn drain(&mut self) {
        self.countdown = self.countdown.saturating_sub(1);
    }

    /// Decide the item for one solid tile. `roll(p)` must return true with
    /// probability `p`.
    pub fn choose(
        &mut self,
        spawn_percent: f32,
        rare_chance: f32,
        mut roll: impl FnMut(f32) -> bool,
    ) -> Option<ItemKind> {
        if !roll(spawn_percent) {
            self.drain();
            return None;
        }
        if !roll(spawn_percent) {
            self.drain();
            return Some(ItemKind::Common);
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            return Some(ItemKind::Common);
        }
        if roll(rare_chance) {
            self.countdown = self.length;
            Some(ItemKind::Rare)
        } else {
            Some(ItemKind::Common)
        }
    }
}

/// Places collectibles on solid tiles
#[derive(Debug, Clone, Copy)]
pub struct ItemSpawner {
    pub spawn_percent: f32,
    pub rare_chance: f32,
    /// Offset above the tile top for resting items
    pub ground_offset: f32,
    /// Offset above the tile top for floating items
    pub float_offset: f32,
}

impl ItemSpawner {
    pub fn try_place<R: Rng + ?Sized>(
        &self,
        tile: &Tile,
        cooldown: &mut ItemCooldown,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> Option<ItemHandle> {
        if !tile.active {
            return None;
        }

        let kind = cooldown.choose(self.spawn_percent, self.rare_chance, |p| {
            rng.random_bool(f64::from(p))
        })?;

        let band = if rng.random_bool(ITEM_GROUND_BIAS) {
            ItemBand::Ground
        } else {
            ItemBand::Floating
        };
        let lift = match band {
            ItemBand::Ground => self.ground_offset,
            ItemBand::Floating => self.float_offset,
        };
        let tile_height = tile.world_size().map_or(0.0, |s| s.y);

        log::debug!("{:?} item ({:?}) on tile {}", kind, band, tile.index);
        Some(ItemHandle {
            id: ids.next_id(),
            kind,
            tile_index: tile.index,
            band,
            offset: Vec2::new(0.0, tile_height / 2.0 + lift),
        })
    }
}
