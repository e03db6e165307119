//! Skier-versus-obstacle collision detection
//!
//! Plain rectangle overlap with one twist: obstacles the skier has already
//! passed (skier's hitbox bottom strictly below theirs) cannot be hit, so
//! clipping the back of a tree while skiing away never counts. Mushrooms and
//! the yeti are exempt.

use super::hitbox::Hitbox;
use super::registry::{ObstacleRegistry, RemovalQueue};
use super::skier::Skier;
use super::state::GameEvent;
use super::timers::TimerQueue;
use crate::tuning::Tuning;

/// Everything an obstacle's collision effect may touch
pub struct CollisionContext<'a> {
    pub tuning: &'a Tuning,
    pub now: u64,
    pub skier: &'a mut Skier,
    pub removals: &'a mut RemovalQueue,
    pub timers: &'a mut TimerQueue,
    pub events: &'a mut Vec<GameEvent>,
}

/// Whether the skier's hitbox hits an obstacle's hitbox this tick
pub fn hitboxes_intersect(skier: &Hitbox, obstacle: &Hitbox, ignores_pass_rule: bool) -> bool {
    if skier.bottom() > obstacle.bottom() && !ignores_pass_rule {
        return false;
    }
    skier.overlaps(obstacle)
}

/// Test the skier against every live obstacle and fire collision effects.
/// Returns the number of effects dispatched.
pub fn collision_pass(
    obstacles: &mut ObstacleRegistry,
    skier: &mut Skier,
    tuning: &Tuning,
    now: u64,
    timers: &mut TimerQueue,
    events: &mut Vec<GameEvent>,
) -> usize {
    let skier_box = skier.hitbox(tuning);
    let (live, removals) = obstacles.pass_mut();
    let mut ctx = CollisionContext {
        tuning,
        now,
        skier,
        removals,
        timers,
        events,
    };

    let mut dispatched = 0;
    for obstacle in live.iter_mut() {
        let obstacle_box = obstacle.hitbox(tuning.pixels_per_meter);
        let exempt = obstacle.variant.ignores_pass_rule();
        if hitboxes_intersect(&skier_box, &obstacle_box, exempt) {
            obstacle.on_collision(&mut ctx);
            dispatched += 1;
        }
    }
    dispatched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hitbox::PixelBox;
    use crate::sim::obstacle::{StaticKind, Variant};
    use glam::Vec2;

    fn rect(top: f32, left: f32, width: f32, height: f32) -> Hitbox {
        Hitbox {
            top,
            left,
            width,
            height,
        }
    }

    #[test]
    fn test_pass_rule_suppresses_passed_obstacles() {
        let skier = rect(1.0, 0.0, 2.0, 2.0); // bottom 3
        let obstacle = rect(0.0, 0.0, 2.0, 2.5); // bottom 2.5, overlapping
        assert!(skier.overlaps(&obstacle));
        assert!(!hitboxes_intersect(&skier, &obstacle, false));
        assert!(hitboxes_intersect(&skier, &obstacle, true));
    }

    #[test]
    fn test_equal_bottoms_still_collide() {
        let skier = rect(0.0, 0.0, 2.0, 2.0);
        let obstacle = rect(1.0, 1.0, 2.0, 1.0);
        assert!(hitboxes_intersect(&skier, &obstacle, false));
    }

    #[test]
    fn test_obstacle_ahead_collides() {
        let skier = rect(0.0, 0.0, 2.0, 2.0);
        let obstacle = rect(1.5, 0.5, 1.0, 1.0);
        assert!(hitboxes_intersect(&skier, &obstacle, false));
        assert!(!hitboxes_intersect(&skier, &rect(5.0, 0.0, 1.0, 1.0), false));
    }

    fn setup() -> (Tuning, Skier, ObstacleRegistry) {
        let tuning = Tuning::default();
        let mut skier = Skier::new(&tuning);
        skier.face_forward(&tuning);
        (tuning, skier, ObstacleRegistry::new())
    }

    /// Position an obstacle so its hitbox sits right on top of the skier's
    fn overlapping_pos(skier: &Skier, tuning: &Tuning, offsets: &PixelBox, extra_y: f32) -> Vec2 {
        let sb = skier.hitbox(tuning);
        let ppm = tuning.pixels_per_meter;
        Vec2::new(sb.left - offsets.left / ppm, sb.top - offsets.top / ppm + extra_y)
    }

    #[test]
    fn test_pass_fires_each_effect_once() {
        let (tuning, mut skier, mut registry) = setup();
        let offsets = tuning.world.obstacles[1].hitbox;
        let pos = overlapping_pos(&skier, &tuning, &offsets, 0.5);
        let id = registry.add(Variant::Static(StaticKind::Rock), pos, offsets);

        let mut timers = TimerQueue::new();
        let mut events = Vec::new();
        let hits = collision_pass(
            &mut registry,
            &mut skier,
            &tuning,
            0,
            &mut timers,
            &mut events,
        );
        assert_eq!(hits, 1);
        assert_eq!(skier.health, 2);

        // Same tick and later ticks: the consumed rock never fires again
        skier.falling = false;
        for now in 0..3 {
            let hits = collision_pass(
                &mut registry,
                &mut skier,
                &tuning,
                now,
                &mut timers,
                &mut events,
            );
            assert_eq!(hits, 0);
        }
        assert_eq!(skier.health, 2);
        assert!(registry.get(id).is_some_and(|o| o.is_consumed()));
    }

    #[test]
    fn test_mushroom_behind_still_collected() {
        let (tuning, mut skier, mut registry) = setup();
        skier.health = 2;
        let offsets = tuning.world.obstacles[4].hitbox;
        // Mushroom hitbox is short; shift it up so its bottom is above the skier's
        let pos = overlapping_pos(&skier, &tuning, &offsets, -0.2);
        let id = registry.add(Variant::Mushroom, pos, offsets);
        let mb = registry.get(id).map(|o| o.hitbox(tuning.pixels_per_meter));
        assert!(mb.is_some_and(|mb| skier.hitbox(&tuning).bottom() > mb.bottom()));

        let mut timers = TimerQueue::new();
        let mut events = Vec::new();
        collision_pass(
            &mut registry,
            &mut skier,
            &tuning,
            0,
            &mut timers,
            &mut events,
        );
        assert_eq!(skier.health, 3);
        assert!(registry.pending_removals().contains(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_yeti_behind_still_catches() {
        let (tuning, mut skier, mut registry) = setup();
        let offsets = tuning.yeti.hitbox;
        // Tall yeti box lifted a meter: overlapping, but its bottom is above the skier's
        let pos = overlapping_pos(&skier, &tuning, &offsets, -1.0);
        let id = registry.add(Variant::yeti(), pos, offsets);
        let yb = registry.get(id).map(|o| o.hitbox(tuning.pixels_per_meter));
        assert!(yb.is_some_and(|yb| skier.hitbox(&tuning).bottom() > yb.bottom()));

        let mut timers = TimerQueue::new();
        let mut events = Vec::new();
        let hits = collision_pass(
            &mut registry,
            &mut skier,
            &tuning,
            0,
            &mut timers,
            &mut events,
        );
        assert_eq!(hits, 1);
        assert!(skier.dead);
        assert!(skier.eaten);
        assert!(registry.get(id).is_some_and(|o| matches!(
            o.variant,
            Variant::Yeti {
                victorious: true,
                ..
            }
        )));
        assert!(events.contains(&GameEvent::SkierEaten { yeti_id: id }));
    }

    #[test]
    fn test_passed_rock_is_ignored() {
        let (tuning, mut skier, mut registry) = setup();
        let offsets = PixelBox::new(0.0, 0.0, 30.0, 5.0);
        let pos = overlapping_pos(&skier, &tuning, &offsets, 0.0);
        registry.add(Variant::Static(StaticKind::Rock), pos, offsets);

        let mut timers = TimerQueue::new();
        let mut events = Vec::new();
        let hits = collision_pass(
            &mut registry,
            &mut skier,
            &tuning,
            0,
            &mut timers,
            &mut events,
        );
        assert_eq!(hits, 0);
        assert_eq!(skier.health, 3);
        assert!(events.is_empty());
    }
}
