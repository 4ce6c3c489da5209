//! Deterministic strip simulation
//!
//! All strip logic lives here. This module must stay deterministic:
//! - Seeded RNG only, owned by the strip
//! - Stable tile order (front to back through the ring)
//! - No rendering or platform dependencies

pub mod fit;
pub mod item;
pub mod obstacle;
pub mod pattern;
pub mod pool;
pub mod state;
pub mod tick;

pub use fit::{Fit, fit};
pub use item::{ItemCooldown, ItemSpawner};
pub use obstacle::{ObstacleCooldown, ObstaclePhase, ObstacleSpawner};
pub use pool::TilePool;
pub use state::{
    EntityIds, ItemBand, ItemHandle, ItemKind, ObstacleHandle, RngState, StripSnapshot, Tile,
    TileSnapshot,
};
pub use tick::{Strip, StripEvent};
