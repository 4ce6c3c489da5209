//! Content catalog
//!
//! Visual templates are opaque to the strip beyond their footprint: the
//! intrinsic sprite size plus any non-uniform scale baked into the template.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::ItemKind;

/// An obstacle visual template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    pub name: String,
    /// Intrinsic sprite size (width, height); `None` if the template has no visual
    #[serde(default)]
    pub footprint: Option<Vec2>,
    /// Non-uniform scale baked into the template
    #[serde(default = "unit_scale")]
    pub baked_scale: Vec2,
}

fn unit_scale() -> Vec2 {
    Vec2::ONE
}

impl ObstacleTemplate {
    pub fn new(name: impl Into<String>, footprint: Vec2) -> Self {
        Self {
            name: name.into(),
            footprint: Some(footprint),
            baked_scale: Vec2::ONE,
        }
    }

    pub fn with_baked_scale(mut self, scale: Vec2) -> Self {
        self.baked_scale = scale;
        self
    }

    /// Size the template renders at before any fitting
    pub fn rendered_size(&self) -> Option<Vec2> {
        self.footprint.map(|f| f * self.baked_scale)
    }
}

/// Item template names for the two collectible kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplates {
    pub common: String,
    pub rare: String,
}

impl ItemTemplates {
    pub fn name(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Common => &self.common,
            ItemKind::Rare => &self.rare,
        }
    }
}

impl Default for ItemTemplates {
    fn default() -> Self {
        Self {
            common: "coin".to_string(),
            rare: "invincibility".to_string(),
        }
    }
}

/// Obstacle and item templates available to the spawners
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentCatalog {
    pub obstacles: Vec<ObstacleTemplate>,
    #[serde(default)]
    pub items: ItemTemplates,
}

impl ContentCatalog {
    pub fn new(obstacles: Vec<ObstacleTemplate>) -> Self {
        Self {
            obstacles,
            items: ItemTemplates::default(),
        }
    }

    /// A small built-in catalog for the headless runner and tests
    pub fn builtin() -> Self {
        Self::new(vec![
            ObstacleTemplate::new("crate", Vec2::new(64.0, 64.0)),
            ObstacleTemplate::new("spikes", Vec2::new(128.0, 48.0)),
            ObstacleTemplate::new("cactus", Vec2::new(40.0, 96.0))
                .with_baked_scale(Vec2::new(1.0, 1.25)),
        ])
    }

    pub fn obstacle(&self, index: usize) -> Option<&ObstacleTemplate> {
        self.obstacles.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
