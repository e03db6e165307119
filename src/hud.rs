//! Status panel
//!
//! A [`HudSnapshot`] is the throttled numeric readout shown to the player:
//! distance, downhill speed and health.

use serde::Serialize;

use crate::sim::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    /// Display distance (rounded pixel units)
    pub distance: u64,
    /// Downhill speed in meters per second, rounded
    pub speed: i64,
    pub health: i32,
    pub max_health: i32,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let per_second = state.skier.vel.y * state.tuning.fps as f32;
        Self {
            distance: state.display_distance(),
            speed: per_second.round() as i64,
            health: state.skier.health,
            max_health: state.skier.max_health,
        }
    }

    /// Out of health; the panel flags it
    pub fn health_critical(&self) -> bool {
        self.health <= 0
    }
}

/// Receives HUD refreshes and the game-over notice
pub trait HudSink {
    fn update(&mut self, snapshot: &HudSnapshot);

    fn game_over(&mut self, final_snapshot: &HudSnapshot);
}

/// Keeps everything it is told; handy for headless runs and tests
#[derive(Debug, Default)]
pub struct HudLog {
    pub snapshots: Vec<HudSnapshot>,
    pub game_over: Option<HudSnapshot>,
}

impl HudSink for HudLog {
    fn update(&mut self, snapshot: &HudSnapshot) {
        self.snapshots.push(*snapshot);
    }

    fn game_over(&mut self, final_snapshot: &HudSnapshot) {
        self.game_over = Some(*final_snapshot);
    }
}
