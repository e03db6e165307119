//! SkiFree - an endless downhill skiing simulation
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (world generation, skier physics, collisions)
//! - `tuning`: Data-driven game balance
//! - `input`: Discrete player commands
//! - `view`: Screen projection and visual state for renderers
//! - `hud`: Status panel snapshots
//! - `session`: Frame pump that drives the simulation from wall-clock frames

pub mod hud;
pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod view;

pub use hud::{HudSink, HudSnapshot};
pub use input::Command;
pub use session::Session;
pub use tuning::{Tuning, TuningError};
pub use view::{RenderSink, ScreenOffset};

use glam::Vec2;

/// Game configuration constants
///
/// These are the defaults baked into [`Tuning::default`]; the simulation itself
/// only reads balance values through a `Tuning`.
pub mod consts {
    /// Logical simulation rate
    pub const FPS: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the session will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport dimensions (pixels)
    pub const VIEW_WIDTH: f32 = 640.0;
    pub const VIEW_HEIGHT: f32 = 480.0;
    pub const PIXELS_PER_METER: f32 = 15.0;

    /// Fixed screen anchor of the skier (pixels from the viewport's top-left)
    pub const SKIER_SCREEN_TOP: f32 = 100.0;
    pub const SKIER_SCREEN_LEFT: f32 = VIEW_WIDTH / 2.0;

    /// Direction indices, leftmost to rightmost
    pub const LEFTMOST: i32 = 0;
    pub const FORWARD: i32 = 3;
    pub const RIGHTMOST: i32 = 6;
    pub const MIN_DIR: i32 = LEFTMOST;
    pub const MAX_DIR: i32 = RIGHTMOST;
    pub const INITIAL_DIR: i32 = RIGHTMOST;

    /// Goal angle per direction index (degrees)
    pub const DIR_ANGLES: [f32; 7] = [180.0, 202.0, 227.0, 270.0, 313.0, 338.0, 360.0];

    /// Health cap (the skier starts full)
    pub const MAX_HEALTH: i32 = 3;
}

/// Euclidean distance between two world positions
#[inline]
pub fn vec_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector for an angle in degrees (standard math convention, +y up)
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Move `current` toward `target` by at most `step`, never overshooting
#[inline]
pub fn approach(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else if current > target {
        (current - step).max(target)
    } else {
        current
    }
}
