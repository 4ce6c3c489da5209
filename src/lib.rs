//! Runner Strip - procedural ground for side-scrolling runners
//!
//! Core modules:
//! - `sim`: Deterministic strip simulation (tile pool, patterns, spawners)
//! - `settings`: Data-driven strip tuning and difficulty presets
//! - `catalog`: Obstacle and item templates with visual footprints
//! - `session`: Collaborator traits for the mover and distance tracking

pub mod catalog;
pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use catalog::{ContentCatalog, ItemTemplates, ObstacleTemplate};
pub use error::StripError;
pub use session::{DistanceTracker, Mover, Runner, StageDistance};
pub use settings::{Difficulty, StripSettings};
pub use sim::{Strip, StripEvent};

/// Fixed tuning constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Chance that an eligible interior pattern slot becomes a gap
    pub const GAP_CHANCE: f64 = 0.3;

    /// Chance that an eligible tile rolls an obstacle
    pub const OBSTACLE_CHANCE: f64 = 0.5;
    /// Hard cap on back-to-back obstacle tiles
    pub const OBSTACLE_CONSECUTIVE_CAP: u8 = 2;

    /// Chance that a placed item sits on the tile top rather than floating
    pub const ITEM_GROUND_BIAS: f64 = 0.8;

    /// Tiles are recycled once the front tile is this many widths behind origin
    pub const RECYCLE_THRESHOLD_TILES: f32 = 5.0;

    /// Notices held for `drain_events` before the oldest are dropped
    pub const EVENT_QUEUE_CAP: usize = 1024;
}
