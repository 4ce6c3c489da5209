//! Collaborators the strip talks to
//!
//! The strip owns these from construction; callers that keep their own
//! session can hand in `&mut` handles instead.

use glam::Vec2;

/// The entity running along the strip
pub trait Mover {
    /// True once the mover has spawned and scrolling may begin
    fn is_ready(&self) -> bool;
    /// Horizontal distance the mover has travelled; the strip scrolls to keep up
    fn traveled(&self) -> f32;
    /// Put the mover at a world position
    fn place(&mut self, position: Vec2);
}

/// Accumulates how far the strip has scrolled
pub trait DistanceTracker {
    /// Distance at which the stage ends and recycling stops
    fn stage_length(&self) -> f32;
    /// Battle mode keeps distance across resets
    fn battle_mode(&self) -> bool;
    fn record(&mut self, total: f32);
    fn total(&self) -> f32;
}

impl<T: Mover + ?Sized> Mover for &mut T {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn traveled(&self) -> f32 {
        (**self).traveled()
    }

    fn place(&mut self, position: Vec2) {
        (**self).place(position)
    }
}

impl<T: DistanceTracker + ?Sized> DistanceTracker for &mut T {
    fn stage_length(&self) -> f32 {
        (**self).stage_length()
    }

    fn battle_mode(&self) -> bool {
        (**self).battle_mode()
    }

    fn record(&mut self, total: f32) {
        (**self).record(total)
    }

    fn total(&self) -> f32 {
        (**self).total()
    }
}

/// A mover that runs at a fixed pace once spawned
#[derive(Debug, Clone)]
pub struct Runner {
    pub position: Vec2,
    pub spawned: bool,
    /// Pace (units/sec)
    pub run_speed: f32,
    pub traveled: f32,
}

impl Runner {
    pub fn new(run_speed: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            spawned: false,
            run_speed,
            traveled: 0.0,
        }
    }

    /// Advance the runner's own travel
    pub fn run(&mut self, dt: f32) {
        if self.spawned {
            self.traveled += self.run_speed * dt;
        }
    }
}

impl Mover for Runner {
    fn is_ready(&self) -> bool {
        self.spawned
    }

    fn traveled(&self) -> f32 {
        self.traveled
    }

    fn place(&mut self, position: Vec2) {
        self.position = position;
        self.spawned = true;
    }
}

/// Stage distance counter
#[derive(Debug, Clone, Default)]
pub struct StageDistance {
    pub distance: f32,
    pub stage_length: f32,
    pub battle_mode: bool,
}

impl StageDistance {
    pub fn new(stage_length: f32) -> Self {
        Self {
            distance: 0.0,
            stage_length,
            battle_mode: false,
        }
    }
}

impl DistanceTracker for StageDistance {
    fn stage_length(&self) -> f32 {
        self.stage_length
    }

    fn battle_mode(&self) -> bool {
        self.battle_mode
    }

    fn record(&mut self, total: f32) {
        self.distance = total;
    }

    fn total(&self) -> f32 {
        self.distance
    }
}
