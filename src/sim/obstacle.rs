//! Everything on the slope that is not the skier
//!
//! The set of obstacle behaviours is closed, so each one is a [`Variant`] and
//! every capability (hitbox, collision effect, movement) dispatches with `match`.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::collision::CollisionContext;
use super::hitbox::{Hitbox, PixelBox};
use super::skier::Skier;
use super::state::GameEvent;
use super::timers::TimerEvent;
use crate::tuning::{SpawnKind, Tuning};

/// Inert scenery that only hurts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticKind {
    Tree,
    TallTree,
    Rock,
    Log,
}

/// Yeti sprite phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum YetiPose {
    #[default]
    Run,
    Eat,
    Pick,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Static(StaticKind),
    /// A burning bush hurts twice as much
    Bush { burning: bool },
    /// Restores one health
    Mushroom,
    /// Walks sideways at constant speed; `direction` is -1 or +1
    Dog { direction: f32 },
    /// Chases the skier until it lands its bite
    Yeti { victorious: bool, pose: YetiPose },
}

impl Variant {
    /// Build whatever the world generator rolled
    pub fn from_spawn<R: Rng>(kind: SpawnKind, flaming_probability: f32, rng: &mut R) -> Self {
        match kind {
            SpawnKind::Tree => Variant::Static(StaticKind::Tree),
            SpawnKind::TallTree => Variant::Static(StaticKind::TallTree),
            SpawnKind::Rock => Variant::Static(StaticKind::Rock),
            SpawnKind::Log => Variant::Static(StaticKind::Log),
            SpawnKind::Bush => Variant::Bush {
                burning: rng.random::<f32>() < flaming_probability,
            },
            SpawnKind::Mushroom => Variant::Mushroom,
        }
    }

    pub fn yeti() -> Self {
        Variant::Yeti {
            victorious: false,
            pose: YetiPose::Run,
        }
    }

    /// Sprite name
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Static(StaticKind::Tree) => "tree",
            Variant::Static(StaticKind::TallTree) => "tall-tree",
            Variant::Static(StaticKind::Rock) => "rock",
            Variant::Static(StaticKind::Log) => "log",
            Variant::Bush { burning: false } => "bush",
            Variant::Bush { burning: true } => "flaming-bush",
            Variant::Mushroom => "mushroom",
            Variant::Dog { .. } => "dog",
            Variant::Yeti { .. } => "yeti",
        }
    }

    /// Mushrooms and the yeti can be hit even after the skier is past them
    pub fn ignores_pass_rule(&self) -> bool {
        matches!(self, Variant::Mushroom | Variant::Yeti { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub variant: Variant,
    offsets: PixelBox,
    /// Once consumed the hitbox is [`Hitbox::INVALID`] for good
    consumed: bool,
}

impl Obstacle {
    pub fn new(id: u32, variant: Variant, pos: Vec2, offsets: PixelBox) -> Self {
        Self {
            id,
            pos,
            variant,
            offsets,
            consumed: false,
        }
    }

    pub fn hitbox(&self, pixels_per_meter: f32) -> Hitbox {
        if self.consumed {
            Hitbox::INVALID
        } else {
            Hitbox::translated(self.pos, &self.offsets, pixels_per_meter)
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Apply this obstacle's effect on the skier. The hitbox is invalidated
    /// before anything else so a repeated dispatch can never re-fire.
    pub fn on_collision(&mut self, ctx: &mut CollisionContext<'_>) {
        let name = self.variant.name();
        match &mut self.variant {
            Variant::Static(_) | Variant::Dog { .. } => {
                self.consumed = true;
                strike(ctx, name, 1);
            }
            Variant::Bush { burning } => {
                let damage = if *burning { 2 } else { 1 };
                self.consumed = true;
                strike(ctx, name, damage);
            }
            Variant::Mushroom => {
                self.consumed = true;
                ctx.removals.mark(self.id);
                ctx.skier.add_health(1);
                ctx.events.push(GameEvent::HealthPickup {
                    health: ctx.skier.health,
                });
            }
            Variant::Yeti { victorious, pose } => {
                if *victorious || ctx.skier.dead {
                    return;
                }
                self.consumed = true;
                *victorious = true;
                *pose = YetiPose::Eat;
                ctx.skier.die();
                let delay = ctx.tuning.ms_to_ticks(ctx.tuning.yeti.bite_delay_ms);
                ctx.timers
                    .schedule(ctx.now, delay, TimerEvent::YetiPick { yeti_id: self.id });
                log::info!("Yeti {} caught the skier", self.id);
                ctx.events.push(GameEvent::SkierEaten { yeti_id: self.id });
            }
        }
    }

    /// Per-tick self-propulsion; scenery stays put
    pub fn advance(&mut self, skier: &Skier, tuning: &Tuning) {
        match self.variant {
            Variant::Dog { direction } => {
                self.pos.x += direction * tuning.per_tick(tuning.dog.speed);
            }
            Variant::Yeti { victorious, .. } => {
                if victorious {
                    return;
                }
                let delta = skier.pos - self.pos;
                let bearing = delta.y.atan2(delta.x);
                let speed = tuning.per_tick(tuning.yeti.speed);
                let mut step = Vec2::new(bearing.cos(), bearing.sin()) * speed;

                // Nothing left to chase: run off sideways
                if skier.dead {
                    step.x = -step.x;
                }
                self.pos += step;
            }
            Variant::Static(_) | Variant::Bush { .. } | Variant::Mushroom => {}
        }
    }

    /// Horizontal sprite flip for walkers; `None` for scenery
    pub fn facing(&self, skier: &Skier) -> Option<f32> {
        match self.variant {
            Variant::Dog { direction } => Some(direction.signum()),
            Variant::Yeti { victorious, .. } => {
                let mut dir = skier.pos.x - self.pos.x;
                if skier.dead && !victorious {
                    dir = -dir;
                }
                Some(if dir < 0.0 { -1.0 } else { 1.0 })
            }
            _ => None,
        }
    }
}

fn strike(ctx: &mut CollisionContext<'_>, name: &'static str, damage: i32) {
    if ctx.skier.collide(damage) {
        log::debug!(
            "Skier hit {} for {} (health {})",
            name,
            damage,
            ctx.skier.health
        );
        ctx.events.push(GameEvent::ObstacleHit {
            obstacle: name,
            damage,
        });
    }
}
