//! Per-frame strip scrolling
//!
//! Ordering within a tick is fixed: translate every tile, test the front
//! tile against the recycle threshold, then recycle at most one tile
//! (reposition, pattern, obstacle, item) and report the new distance.

use std::collections::VecDeque;

use glam::Vec2;
use rand_pcg::Pcg32;

use super::item::{ItemCooldown, ItemSpawner};
use super::obstacle::{ObstacleCooldown, ObstacleSpawner};
use super::pattern;
use super::pool::TilePool;
use super::state::{EntityIds, ItemHandle, ObstacleHandle, RngState, StripSnapshot, Tile};
use crate::catalog::ContentCatalog;
use crate::consts::EVENT_QUEUE_CAP;
use crate::error::StripError;
use crate::session::{DistanceTracker, Mover};
use crate::settings::StripSettings;

/// Placement and removal notices for physics/collision listeners
#[derive(Debug, Clone, PartialEq)]
pub enum StripEvent {
    TileRecycled { index: u64, active: bool },
    ObstaclePlaced(ObstacleHandle),
    ObstacleRemoved { id: u32 },
    ItemPlaced(ItemHandle),
    ItemRemoved { id: u32 },
}

/// Notices waiting for the host. Holds at most [`EVENT_QUEUE_CAP`]; past
/// that the oldest notice is dropped.
#[derive(Debug, Default)]
struct EventQueue {
    pending: VecDeque<StripEvent>,
    dropped: u64,
}

impl EventQueue {
    fn push(&mut self, event: StripEvent) {
        if self.pending.len() >= EVENT_QUEUE_CAP {
            self.pending.pop_front();
            self.dropped += 1;
            if self.dropped == 1 {
                log::warn!(
                    "Strip event queue full ({} pending), dropping oldest notices",
                    EVENT_QUEUE_CAP
                );
            }
        }
        self.pending.push_back(event);
    }
}

/// The scrolling strip: tile ring, pattern, cooldowns and collaborators
///
/// Placement and removal notices queue up until [`Strip::drain_events`].
/// A host that never drains only keeps the newest [`EVENT_QUEUE_CAP`].
pub struct Strip<M: Mover, D: DistanceTracker> {
    settings: StripSettings,
    catalog: ContentCatalog,
    mover: M,
    tracker: D,
    rng_state: RngState,
    rng: Pcg32,
    /// Created on first initialize, reused afterwards
    pool: Option<TilePool>,
    initialized: bool,
    /// Where the window was laid out; the recycle threshold is relative to it
    origin: Vec2,
    pattern: Vec<bool>,
    pattern_cursor: usize,
    obstacle_cooldown: ObstacleCooldown,
    item_cooldown: ItemCooldown,
    ids: EntityIds,
    /// Distance accounted for by scrolling so far
    distance: f32,
    /// Seconds spent scrolling (drives acceleration)
    elapsed: f32,
    events: EventQueue,
}

impl<M: Mover, D: DistanceTracker> Strip<M, D> {
    pub fn new(
        settings: StripSettings,
        catalog: ContentCatalog,
        mover: M,
        tracker: D,
        seed: u64,
    ) -> Result<Self, StripError> {
        if let Err(err) = settings.validate() {
            log::warn!("Rejected strip settings: {}", err);
            return Err(err);
        }
        let rng_state = RngState::new(seed);
        Ok(Self {
            rng: rng_state.to_rng(),
            rng_state,
            pattern: Vec::with_capacity(settings.pool_size),
            pattern_cursor: 0,
            obstacle_cooldown: ObstacleCooldown::new(settings.cooldown_after_obstacle),
            item_cooldown: ItemCooldown::new(settings.invincible_cooldown),
            events: EventQueue::default(),
            settings,
            catalog,
            mover,
            tracker,
            pool: None,
            initialized: false,
            origin: Vec2::ZERO,
            ids: EntityIds::default(),
            distance: 0.0,
            elapsed: 0.0,
        })
    }

    /// Lay out the first window from `origin`, fill it with content, place
    /// the mover on the first solid tile and return the window span. The
    /// first tile stays clear as the landing spot.
    pub fn initialize(&mut self, origin: Vec2) -> Result<f32, StripError> {
        if self.catalog.is_empty() {
            log::error!("Cannot initialize strip: obstacle catalog is empty");
            return Err(StripError::EmptyObstacleCatalog);
        }

        let s = &self.settings;
        let tile_size = Vec2::new(s.tile_width, s.tile_height);
        let reuse = self.pool.is_some();
        let pool = self
            .pool
            .get_or_insert_with(|| TilePool::new(s.pool_size, origin, tile_size, s.tile_scale));
        if reuse {
            pool.relayout(origin, s.tile_width);
        }

        for tile in pool.iter_mut() {
            let (obstacle, item) = tile.clear_content();
            push_removals(&mut self.events, obstacle, item);
        }

        pattern::generate_into(
            &mut self.pattern,
            s.pool_size,
            s.max_tiles_between_empty,
            &mut self.rng,
        );
        for i in 0..pool.len() {
            if let Some(tile) = pool.get_mut(i) {
                tile.active = self.pattern[i];
            }
        }
        self.pattern_cursor = self.pattern.len();

        self.obstacle_cooldown.reset();
        self.item_cooldown.reset();
        for position in 1..self.len() {
            self.spawn_content(position);
        }

        let lift = self.settings.tile_height / 2.0 + self.settings.mover_spawn_height;
        let spawn = self
            .tiles()
            .find(|t| t.active)
            .map(|t| t.pos + Vec2::new(0.0, lift));
        if let Some(spawn) = spawn {
            self.mover.place(spawn);
        }

        self.elapsed = 0.0;
        self.distance = self.tracker.total();
        self.origin = origin;
        self.initialized = true;

        let span = self.settings.window_span();
        log::info!(
            "Strip initialized: {} tiles from ({:.1}, {:.1}), span {:.1}, seed {}",
            self.settings.pool_size,
            origin.x,
            origin.y,
            span,
            self.rng_state.seed
        );
        Ok(span)
    }

    /// Scroll by one frame. No-op until initialized, while the mover is not
    /// ready, or while the mover has not travelled past the scrolled distance.
    pub fn advance(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }
        if !self.mover.is_ready() {
            log::trace!("Mover not ready, strip holding");
            return;
        }
        if self.mover.traveled() <= self.distance {
            return;
        }
        let Some(pool) = self.pool.as_mut() else {
            return;
        };

        let step = current_speed(&self.settings, self.elapsed) * dt;
        for tile in pool.iter_mut() {
            tile.pos.x -= step;
        }
        self.elapsed += dt;
        self.distance += step;
        log::trace!("Scrolled {:.3} (total {:.2})", step, self.distance);

        let front_x = pool.front().map_or(f32::INFINITY, |t| t.pos.x);
        let threshold = self.origin.x + self.settings.recycle_threshold();
        if front_x < threshold && self.distance < self.tracker.stage_length() {
            self.recycle();
        }

        self.tracker.record(self.distance);
    }

    /// Recycle the front tile to the back with fresh content
    fn recycle(&mut self) {
        let Some(pool) = self.pool.as_mut() else {
            return;
        };
        let back = pool.len().saturating_sub(1);
        let Some(tile) = pool.recycle_front(self.settings.tile_width) else {
            return;
        };

        let (obstacle, item) = tile.clear_content();
        push_removals(&mut self.events, obstacle, item);

        if self.pattern_cursor >= self.pattern.len() {
            pattern::generate_into(
                &mut self.pattern,
                self.settings.pool_size,
                self.settings.max_tiles_between_empty,
                &mut self.rng,
            );
            self.pattern_cursor = 0;
        }
        tile.active = self.pattern[self.pattern_cursor];
        self.pattern_cursor += 1;

        let index = tile.index;
        let active = tile.active;
        self.events.push(StripEvent::TileRecycled { index, active });
        log::debug!("Recycled tile {} ({})", index, if active { "solid" } else { "gap" });

        self.spawn_content(back);
    }

    /// Run the obstacle and item spawners for the tile at logical `position`,
    /// judged against the tile in front of it, and attach what they place.
    fn spawn_content(&mut self, position: usize) {
        let Some(pool) = self.pool.as_mut() else {
            return;
        };

        let (index, obstacle, item) = {
            let view: &TilePool = pool;
            let Some(tile) = view.get(position) else {
                return;
            };
            let previous = view.predecessor(position);

            let obstacles = ObstacleSpawner {
                catalog: &self.catalog,
                offset_y: self.settings.obstacle_offset_y,
            };
            let obstacle = obstacles.try_place(
                tile,
                previous,
                &mut self.obstacle_cooldown,
                &mut self.ids,
                &mut self.rng,
            );

            let items = ItemSpawner {
                spawn_percent: self.settings.item_spawn_percent,
                rare_chance: self.settings.invincible_item_chance,
                ground_offset: self.settings.item_ground_offset,
                float_offset: self.settings.item_float_offset,
            };
            let item = if tile.active {
                items.try_place(tile, &mut self.item_cooldown, &mut self.ids, &mut self.rng)
            } else {
                None
            };
            (tile.index, obstacle, item)
        };

        if let Some(tile) = pool.get_mut(position) {
            if let Some(handle) = obstacle {
                self.events.push(StripEvent::ObstaclePlaced(handle.clone()));
                tile.obstacle = Some(handle);
            }
            if let Some(handle) = item {
                log::debug!("Placed '{}' on tile {}", self.catalog.items.name(handle.kind), index);
                self.events.push(StripEvent::ItemPlaced(handle.clone()));
                tile.item = Some(handle);
            }
        }
    }

    /// Deactivate every tile and clear cooldowns. Outside battle mode the
    /// distance and pattern position rewind too. Safe to call repeatedly.
    pub fn reset(&mut self) {
        if let Some(pool) = self.pool.as_mut() {
            for tile in pool.iter_mut() {
                tile.active = false;
                let (obstacle, item) = tile.clear_content();
                push_removals(&mut self.events, obstacle, item);
            }
        }
        self.obstacle_cooldown.reset();
        self.item_cooldown.reset();
        self.initialized = false;

        if !self.tracker.battle_mode() {
            self.distance = 0.0;
            self.elapsed = 0.0;
            self.pattern_cursor = 0;
            self.tracker.record(0.0);
        }
        log::info!("Strip reset (battle mode: {})", self.tracker.battle_mode());
    }

    /// Take the notices queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, StripEvent> {
        self.events.pending.drain(..)
    }

    /// Notices dropped because the queue was full
    pub fn dropped_events(&self) -> u64 {
        self.events.dropped
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of live tiles (constant once initialized)
    pub fn len(&self) -> usize {
        self.pool.as_ref().map_or(0, TilePool::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tiles front to back
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.pool.iter().flat_map(|p| p.iter())
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Scroll speed for the next tick
    pub fn speed(&self) -> f32 {
        current_speed(&self.settings, self.elapsed)
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn settings(&self) -> &StripSettings {
        &self.settings
    }

    pub fn obstacle_cooldown(&self) -> &ObstacleCooldown {
        &self.obstacle_cooldown
    }

    pub fn item_cooldown(&self) -> &ItemCooldown {
        &self.item_cooldown
    }

    pub fn mover(&self) -> &M {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut M {
        &mut self.mover
    }

    pub fn tracker(&self) -> &D {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut D {
        &mut self.tracker
    }

    pub fn snapshot(&self) -> StripSnapshot {
        StripSnapshot {
            distance: self.distance,
            tiles: self.tiles().map(Into::into).collect(),
        }
    }
}

fn current_speed(settings: &StripSettings, elapsed: f32) -> f32 {
    (settings.speed + settings.acceleration * elapsed).min(settings.max_speed)
}

fn push_removals(events: &mut EventQueue, obstacle: Option<ObstacleHandle>, item: Option<ItemHandle>) {
    if let Some(o) = obstacle {
        events.push(StripEvent::ObstacleRemoved { id: o.id });
    }
    if let Some(i) = item {
        events.push(StripEvent::ItemRemoved { id: i.id });
    }
}
