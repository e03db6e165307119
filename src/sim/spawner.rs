//! Mobile NPC scheduling
//!
//! Dogs arrive on a randomized timer that only runs while the skier is moving
//! downhill. The yeti appears each time the skier's display distance passes
//! another milestone.

use glam::Vec2;
use rand::Rng;

use super::obstacle::Variant;
use super::registry::ObstacleRegistry;
use super::skier::Skier;
use crate::tuning::Tuning;

/// Dog spawn timer
#[derive(Debug, Clone)]
pub struct DogSpawner {
    /// Ticks of downhill motion until the next dog
    pub countdown: u32,
}

impl DogSpawner {
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            countdown: tuning.dog_interval_ticks().draw(rng),
        }
    }

    /// Count down while the skier heads downhill; spawn a dog when the timer
    /// runs out. Returns the new dog's id.
    pub fn update<R: Rng>(
        &mut self,
        skier: &Skier,
        tuning: &Tuning,
        rng: &mut R,
        registry: &mut ObstacleRegistry,
    ) -> Option<u32> {
        if skier.vel.y <= 0.0 {
            return None;
        }

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return None;
        }

        let id = spawn_dog(skier, tuning, rng, registry);
        self.countdown = tuning.dog_interval_ticks().draw(rng);
        Some(id)
    }
}

/// Place a dog so that, walking at its own speed, it crosses the skier's
/// projected path right when the skier covers the minimum spawn distance
pub fn spawn_dog<R: Rng>(
    skier: &Skier,
    tuning: &Tuning,
    rng: &mut R,
    registry: &mut ObstacleRegistry,
) -> u32 {
    let direction: f32 = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let dog_speed = tuning.per_tick(tuning.dog.speed) * direction;
    let dist_y = tuning.dog.min_spawn_y_distance;

    let ticks_to_dist_y = dist_y / skier.vel.y;
    let skier_drift_x = skier.vel.x * ticks_to_dist_y;
    let dist_x = ticks_to_dist_y * -dog_speed + skier_drift_x;

    let pos = skier.pos + Vec2::new(dist_x, dist_y);
    let id = registry.add(Variant::Dog { direction }, pos, tuning.dog.hitbox);
    log::debug!(
        "Dog {} spawned at ({:.1}, {:.1}) heading {}",
        id,
        pos.x,
        pos.y,
        direction
    );
    id
}

/// Distance-milestone yeti trigger
#[derive(Debug, Clone)]
pub struct YetiSpawner {
    /// Display distance at which the next yeti appears
    pub next_milestone: u64,
}

impl YetiSpawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            next_milestone: tuning.yeti.milestone,
        }
    }

    /// Spawn a yeti if `display_distance` reached the current milestone
    pub fn update<R: Rng>(
        &mut self,
        display_distance: u64,
        skier: &Skier,
        tuning: &Tuning,
        rng: &mut R,
        registry: &mut ObstacleRegistry,
    ) -> Option<u32> {
        if display_distance < self.next_milestone {
            return None;
        }

        let id = spawn_yeti(skier, tuning, rng, registry);
        log::info!(
            "Yeti {} unleashed at distance {} (next at {})",
            id,
            display_distance,
            self.next_milestone + tuning.yeti.milestone
        );
        self.next_milestone += tuning.yeti.milestone;
        Some(id)
    }
}

/// Drop a yeti at one of four spots around the skier
pub fn spawn_yeti<R: Rng>(
    skier: &Skier,
    tuning: &Tuning,
    rng: &mut R,
    registry: &mut ObstacleRegistry,
) -> u32 {
    let yeti = &tuning.yeti;
    let dx = yeti.offsets_x[rng.random_range(0..2)];
    let dy = yeti.offsets_y[rng.random_range(0..2)];
    let pos = Vec2::new(skier.pos.x - dx, skier.pos.y + dy);
    registry.add(Variant::yeti(), pos, yeti.hitbox)
}
