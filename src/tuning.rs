//! Game balance and world configuration
//!
//! Every number the simulation reads lives here. Defaults reproduce the classic
//! game; a JSON file may override any subset of fields.

use std::path::Path;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::hitbox::PixelBox;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Closed interval used for randomized countdowns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform draw in `[min, max]`, rounded to the nearest whole count
    pub fn draw<R: Rng>(&self, rng: &mut R) -> u32 {
        let value = if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        };
        value.round().max(0.0) as u32
    }

    /// Same interval with both ends multiplied (e.g. seconds -> ticks)
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }

    fn check(&self, what: &str) -> Result<(), TuningError> {
        if self.min < 0.0 || self.max < self.min {
            return Err(TuningError::Invalid(format!(
                "{what}: interval [{}, {}] is inverted or negative",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Obstacle types the chunk generator can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpawnKind {
    TallTree,
    Rock,
    Bush,
    Log,
    Mushroom,
    Tree,
}

/// One row of the world generator's spawn table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnRule {
    pub kind: SpawnKind,
    /// Quadrant visits between spawns of this kind
    pub interval: Interval,
    pub hitbox: PixelBox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTuning {
    pub width: f32,
    pub height: f32,
    pub skier_top: f32,
    pub skier_left: f32,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
            skier_top: SKIER_SCREEN_TOP,
            skier_left: SKIER_SCREEN_LEFT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Chunk extent in meters
    pub chunk_width: f32,
    pub chunk_height: f32,
    /// Quadrant grid inside each chunk
    pub quadrants_x: u32,
    pub quadrants_y: u32,
    /// No obstacle spawns this close to the skier (meters)
    pub min_spawn_distance: f32,
    /// Chunks generated either side of the skier's column
    pub window_columns: i32,
    /// Chunk rows generated ahead of the skier's row
    pub window_rows_ahead: i32,
    /// Obstacles more than this many rows above the skier are pruned
    pub prune_rows_behind: i32,
    pub flaming_bush_probability: f32,
    /// Declared priority order: first kind whose countdown reaches zero wins
    pub obstacles: Vec<SpawnRule>,
}

impl Default for WorldTuning {
    fn default() -> Self {
        let chunk_width = (VIEW_WIDTH / 3.0) / PIXELS_PER_METER;
        let chunk_height = (VIEW_HEIGHT / 2.0) / PIXELS_PER_METER;
        Self {
            chunk_width,
            chunk_height,
            quadrants_x: 1,
            quadrants_y: 1,
            min_spawn_distance: chunk_width.min(chunk_height) / 3.0,
            window_columns: 2,
            window_rows_ahead: 2,
            prune_rows_behind: 1,
            flaming_bush_probability: 0.1,
            obstacles: vec![
                SpawnRule {
                    kind: SpawnKind::TallTree,
                    interval: Interval::new(4.0, 7.0),
                    hitbox: PixelBox::new(43.0, 5.0, 27.0, 21.0),
                },
                SpawnRule {
                    kind: SpawnKind::Rock,
                    interval: Interval::new(7.0, 7.0),
                    hitbox: PixelBox::new(0.0, 0.0, 23.0, 11.0),
                },
                SpawnRule {
                    kind: SpawnKind::Bush,
                    interval: Interval::new(5.0, 8.0),
                    hitbox: PixelBox::new(14.0, 0.0, 22.0, 13.0),
                },
                SpawnRule {
                    kind: SpawnKind::Log,
                    interval: Interval::new(10.0, 12.0),
                    hitbox: PixelBox::new(0.0, 0.0, 16.0, 11.0),
                },
                SpawnRule {
                    kind: SpawnKind::Mushroom,
                    interval: Interval::new(60.0, 100.0),
                    hitbox: PixelBox::new(-5.0, -5.0, 13.0, 16.0),
                },
                SpawnRule {
                    kind: SpawnKind::Tree,
                    interval: Interval::new(1.0, 1.0),
                    hitbox: PixelBox::new(16.0, 5.0, 23.0, 16.0),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkierTuning {
    pub max_health: i32,
    pub initial_direction: i32,
    pub direction_angles: [f32; 7],
    /// Speeds in meters/second
    pub max_speed: f32,
    pub turbo_max_speed: f32,
    /// Speed change per tick, expressed as meters/second gained each tick
    pub accel: f32,
    pub turbo_accel: f32,
    /// Degrees per second the heading can turn toward its goal
    pub turn_rate: f32,
    pub down_duration_ms: u32,
    pub invincibility_duration_ms: u32,
    pub hitbox: PixelBox,
    /// Spawn point: this many pixels left of the first chunk's center column
    pub spawn_offset_px: f32,
    /// Spawn point: fraction of the first chunk's height
    pub spawn_depth_fraction: f32,
}

impl Default for SkierTuning {
    fn default() -> Self {
        Self {
            max_health: MAX_HEALTH,
            initial_direction: INITIAL_DIR,
            direction_angles: DIR_ANGLES,
            max_speed: 20.0,
            turbo_max_speed: 40.0,
            accel: 1.0,
            turbo_accel: 9.0,
            turn_rate: 300.0,
            down_duration_ms: 1000,
            invincibility_duration_ms: 1000,
            hitbox: PixelBox::new(17.0, 2.0, 13.0, 16.0),
            spawn_offset_px: 20.0,
            spawn_depth_fraction: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DogTuning {
    /// Horizontal walking speed (meters/second)
    pub speed: f32,
    /// Seconds between spawns
    pub spawn_interval_secs: Interval,
    /// Vertical distance ahead of the skier at which the dog crosses its lane (meters)
    pub min_spawn_y_distance: f32,
    pub hitbox: PixelBox,
}

impl Default for DogTuning {
    fn default() -> Self {
        Self {
            speed: 10.0,
            spawn_interval_secs: Interval::new(5.0, 20.0),
            min_spawn_y_distance: VIEW_HEIGHT * 2.0 / PIXELS_PER_METER,
            hitbox: PixelBox::new(0.0, 0.0, 22.0, 19.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YetiTuning {
    /// Display-distance between yeti appearances
    pub milestone: u64,
    /// Chase speed (meters/second)
    pub speed: f32,
    /// Candidate horizontal offsets, subtracted from the skier's x (meters)
    pub offsets_x: [f32; 2],
    /// Candidate vertical offsets, added to the skier's y (meters)
    pub offsets_y: [f32; 2],
    pub bite_delay_ms: u32,
    /// Yeti is dropped once its projected screen top is at or above this (pixels)
    pub despawn_screen_top: f32,
    pub hitbox: PixelBox,
}

impl Default for YetiTuning {
    fn default() -> Self {
        Self {
            milestone: 3000,
            speed: 20.0 * 1.5,
            offsets_x: [
                (VIEW_WIDTH * 0.5) / PIXELS_PER_METER,
                (VIEW_WIDTH * -0.5) / PIXELS_PER_METER,
            ],
            offsets_y: [0.0, (VIEW_HEIGHT - SKIER_SCREEN_TOP) / PIXELS_PER_METER],
            bite_delay_ms: 400,
            despawn_screen_top: -100.0,
            hitbox: PixelBox::new(14.0, 10.0, 11.0, 25.0),
        }
    }
}

/// Complete balance sheet for one simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub fps: u32,
    pub pixels_per_meter: f32,
    pub hud_refresh_ms: u32,
    pub view: ViewTuning,
    pub world: WorldTuning,
    pub skier: SkierTuning,
    pub dog: DogTuning,
    pub yeti: YetiTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: FPS,
            pixels_per_meter: PIXELS_PER_METER,
            hud_refresh_ms: 500,
            view: ViewTuning::default(),
            world: WorldTuning::default(),
            skier: SkierTuning::default(),
            dog: DogTuning::default(),
            yeti: YetiTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err::<(), _>(TuningError::Invalid(msg.to_string()));

        if self.fps == 0 {
            return invalid("fps must be positive");
        }
        if self.pixels_per_meter <= 0.0 {
            return invalid("pixels_per_meter must be positive");
        }
        if self.world.chunk_width <= 0.0 || self.world.chunk_height <= 0.0 {
            return invalid("chunk dimensions must be positive");
        }
        if self.world.quadrants_x == 0 || self.world.quadrants_y == 0 {
            return invalid("each chunk needs at least one quadrant");
        }
        if self.world.window_columns < 0 || self.world.window_rows_ahead < 0 {
            return invalid("generation window cannot be negative");
        }
        if !(0.0..=1.0).contains(&self.world.flaming_bush_probability) {
            return invalid("flaming_bush_probability must be within [0, 1]");
        }
        for rule in &self.world.obstacles {
            rule.interval.check(&format!("{:?} spawn interval", rule.kind))?;
        }
        if self.skier.max_health <= 0 {
            return invalid("max_health must be positive");
        }
        if !(MIN_DIR..=MAX_DIR).contains(&self.skier.initial_direction) {
            return invalid("initial_direction out of range");
        }
        if self.skier.accel <= 0.0 || self.skier.turbo_accel <= 0.0 || self.skier.turn_rate <= 0.0 {
            return invalid("accelerations and turn rate must be positive");
        }
        self.dog.spawn_interval_secs.check("dog spawn interval")?;
        if self.yeti.milestone == 0 {
            return invalid("yeti milestone must be positive");
        }
        Ok(())
    }

    /// Convert a per-second quantity to a per-tick one
    #[inline]
    pub fn per_tick(&self, per_second: f32) -> f32 {
        per_second / self.fps as f32
    }

    /// Convert a millisecond duration to whole ticks
    pub fn ms_to_ticks(&self, ms: u32) -> u64 {
        (ms as f64 * self.fps as f64 / 1000.0).round() as u64
    }

    /// Dog spawn countdown range in ticks
    pub fn dog_interval_ticks(&self) -> Interval {
        self.dog.spawn_interval_secs.scaled(self.fps as f32)
    }

    /// Where the skier starts: near the middle of chunk (0, 0), clear of the top edge
    pub fn skier_spawn(&self) -> Vec2 {
        Vec2::new(
            self.world.chunk_width / 2.0 - self.skier.spawn_offset_px / self.pixels_per_meter,
            self.skier.spawn_depth_fraction * self.world.chunk_height,
        )
    }
}
