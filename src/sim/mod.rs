//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod chunks;
pub mod collision;
pub mod hitbox;
pub mod obstacle;
pub mod registry;
pub mod skier;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use chunks::{ChunkCoord, ChunkGenerator, SpawnRateTable};
pub use collision::{CollisionContext, collision_pass, hitboxes_intersect};
pub use hitbox::{Hitbox, PixelBox};
pub use obstacle::{Obstacle, StaticKind, Variant, YetiPose};
pub use registry::{ObstacleRegistry, RemovalQueue};
pub use skier::{Skier, SkierCondition};
pub use spawner::{DogSpawner, YetiSpawner};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
pub use timers::{TimerEvent, TimerQueue};
