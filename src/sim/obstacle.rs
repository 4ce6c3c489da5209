//! Obstacle placement
//!
//! At most [`OBSTACLE_CONSECUTIVE_CAP`] obstacle tiles in a row, then a
//! cooldown of `length` recycles with none. A failed roll in the middle of
//! a run also arms the cooldown.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::fit::fit;
use super::state::{EntityIds, ObstacleHandle, Tile};
use crate::catalog::ContentCatalog;
use crate::consts::{OBSTACLE_CHANCE, OBSTACLE_CONSECUTIVE_CAP};

/// Where the obstacle cooldown machine currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstaclePhase {
    /// Placements allowed; holds the current run length
    Available(u8),
    /// Recycles remaining before placements resume
    Cooldown(u32),
}

/// Countdown plus consecutive-placement counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleCooldown {
    pub countdown: u32,
    pub consecutive: u8,
    /// Countdown armed after a run ends
    pub length: u32,
}

impl ObstacleCooldown {
    pub fn new(length: u32) -> Self {
        Self {
            countdown: 0,
            consecutive: 0,
            length,
        }
    }

    pub fn phase(&self) -> ObstaclePhase {
        if self.countdown > 0 {
            ObstaclePhase::Cooldown(self.countdown)
        } else {
            ObstaclePhase::Available(self.consecutive)
        }
    }

    fn arm(&mut self) {
        self.countdown = self.length;
        self.consecutive = 0;
    }

    pub fn reset(&mut self) {
        self.countdown = 0;
        self.consecutive = 0;
    }

    /// Step the machine for one eligible tile. `roll` is drawn only when
    /// no cooldown is running. Returns true if an obstacle goes down.
    pub fn admit(&mut self, roll: impl FnOnce() -> bool) -> bool {
        if self.countdown > 0 {
            self.countdown -= 1;
            return false;
        }

        if !roll() {
            if self.consecutive > 0 {
                self.arm();
            }
            return false;
        }

        if self.consecutive >= OBSTACLE_CONSECUTIVE_CAP {
            self.arm();
            return false;
        }

        self.consecutive += 1;
        if self.consecutive >= OBSTACLE_CONSECUTIVE_CAP {
            self.arm();
        }
        true
    }
}

/// A tile can only carry an obstacle if it and its predecessor are solid
/// and it is not the first tile of the strip
pub fn eligible(tile: &Tile, previous: Option<&Tile>) -> bool {
    tile.active && tile.index != 0 && previous.is_some_and(|p| p.active)
}

/// Places obstacles from the catalog onto recycled tiles
pub struct ObstacleSpawner<'a> {
    pub catalog: &'a ContentCatalog,
    /// Extra lift above the tile top
    pub offset_y: f32,
}

impl ObstacleSpawner<'_> {
    pub fn try_place<R: Rng + ?Sized>(
        &self,
        tile: &Tile,
        previous: Option<&Tile>,
        cooldown: &mut ObstacleCooldown,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> Option<ObstacleHandle> {
        if !eligible(tile, previous) {
            return None;
        }
        if !cooldown.admit(|| rng.random_bool(OBSTACLE_CHANCE)) {
            return None;
        }
        if self.catalog.is_empty() {
            log::warn!("No obstacle templates, tile {} left clear", tile.index);
            return None;
        }

        let template_index = rng.random_range(0..self.catalog.obstacles.len());
        let template = &self.catalog.obstacles[template_index];

        let (scale, height, fitted) = match fit(tile, template) {
            Some(fit) => (fit.local_scale, fit.world_size.y, true),
            None => (
                template.baked_scale,
                template.rendered_size().map_or(0.0, |s| s.y),
                false,
            ),
        };
        let tile_height = tile.world_size().map_or(0.0, |s| s.y);
        let offset = Vec2::new(0.0, tile_height / 2.0 + self.offset_y + height / 2.0);

        let handle = ObstacleHandle {
            id: ids.next_id(),
            template: template_index,
            tile_index: tile.index,
            offset,
            scale,
            fitted,
        };
        log::debug!(
            "Obstacle '{}' on tile {} (run {})",
            template.name,
            tile.index,
            cooldown.consecutive
        );
        Some(handle)
    }
}
