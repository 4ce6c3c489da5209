//! Strip settings and difficulty presets
//!
//! Loaded from JSON so level tuning can live outside the binary.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::StripError;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Base scroll speed (units/sec)
    pub fn speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 4.0,
            Difficulty::Normal => 6.0,
            Difficulty::Hard => 8.0,
        }
    }

    /// Speed gain per second of scrolling
    pub fn acceleration(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.0,
            Difficulty::Normal => 0.05,
            Difficulty::Hard => 0.1,
        }
    }

    /// Solid tiles required before a gap may appear
    pub fn max_tiles_between_empty(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Normal => 3,
            Difficulty::Hard => 1,
        }
    }

    /// Rare item chance
    pub fn invincible_item_chance(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.2,
            Difficulty::Normal => 0.1,
            Difficulty::Hard => 0.05,
        }
    }
}

/// Strip configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StripSettings {
    /// Tuning preset these values were derived from
    pub difficulty: Difficulty,

    // === Pool ===
    /// Number of tile slots in the ring
    pub pool_size: usize,
    /// Tile width in world units (also the spacing between tiles)
    pub tile_width: f32,
    pub tile_height: f32,
    /// Scale inherited by every tile from its parent transform
    pub tile_scale: Vec2,

    // === Scrolling ===
    /// Initial scroll speed (units/sec)
    pub speed: f32,
    /// Speed gain per second of scrolling
    pub acceleration: f32,
    pub max_speed: f32,

    // === Layout ===
    /// Solid tiles required before a gap may appear
    pub max_tiles_between_empty: usize,
    /// Vertical offset of obstacles above the tile top
    pub obstacle_offset_y: f32,
    /// Height above the first solid tile where the mover spawns
    pub mover_spawn_height: f32,

    // === Items ===
    /// Chance an item appears on a solid tile (0.0 - 1.0)
    pub item_spawn_percent: f32,
    /// Chance an item is the rare (invincibility) kind (0.0 - 1.0)
    pub invincible_item_chance: f32,
    /// Item offset when resting on the tile top
    pub item_ground_offset: f32,
    /// Item offset when floating
    pub item_float_offset: f32,

    // === Cooldowns ===
    /// Recycles without obstacles after a run of placements
    pub cooldown_after_obstacle: u32,
    /// Recycles before another rare item may appear
    pub invincible_cooldown: u32,
}

impl Default for StripSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            pool_size: 20,
            tile_width: 2.0,
            tile_height: 1.0,
            tile_scale: Vec2::ONE,

            speed: 6.0,
            acceleration: 0.05,
            max_speed: 14.0,

            max_tiles_between_empty: 3,
            obstacle_offset_y: 0.0,
            mover_spawn_height: 1.5,

            item_spawn_percent: 0.4,
            invincible_item_chance: 0.1,
            item_ground_offset: 0.75,
            item_float_offset: 2.5,

            cooldown_after_obstacle: 3,
            invincible_cooldown: 5,
        }
    }
}

impl StripSettings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates preset-dependent settings)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.speed = preset.speed();
        self.acceleration = preset.acceleration();
        self.max_tiles_between_empty = preset.max_tiles_between_empty();
        self.invincible_item_chance = preset.invincible_item_chance();
        self.max_speed = self.max_speed.max(self.speed);
    }

    /// Total width of the laid-out window
    pub fn window_span(&self) -> f32 {
        self.pool_size as f32 * self.tile_width
    }

    /// Front tile x-position below which it gets recycled
    pub fn recycle_threshold(&self) -> f32 {
        -crate::consts::RECYCLE_THRESHOLD_TILES * self.tile_width
    }

    /// Check every option is in range
    pub fn validate(&self) -> Result<(), StripError> {
        if self.pool_size < 2 {
            return Err(StripError::invalid("pool_size", "need at least 2 tiles"));
        }
        if !(self.tile_width > 0.0) {
            return Err(StripError::invalid("tile_width", "must be positive"));
        }
        if !(self.tile_height > 0.0) {
            return Err(StripError::invalid("tile_height", "must be positive"));
        }
        if !(self.tile_scale.x > 0.0 && self.tile_scale.y > 0.0) {
            return Err(StripError::invalid("tile_scale", "components must be positive"));
        }
        if !(self.speed >= 0.0) {
            return Err(StripError::invalid("speed", "must not be negative"));
        }
        if !(self.acceleration >= 0.0) {
            return Err(StripError::invalid("acceleration", "must not be negative"));
        }
        if !(self.max_speed >= self.speed) {
            return Err(StripError::invalid(
                "max_speed",
                format!("{} is below speed {}", self.max_speed, self.speed),
            ));
        }
        for (field, p) in [
            ("item_spawn_percent", self.item_spawn_percent),
            ("invincible_item_chance", self.invincible_item_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(StripError::invalid(field, format!("{p} is not a probability")));
            }
        }
        Ok(())
    }

    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, StripError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StripError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded strip settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StripError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Strip settings saved to {}", path.display());
        Ok(())
    }
}
