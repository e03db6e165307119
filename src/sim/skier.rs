//! The skier: steering, speed integration, health and the fall/recover cycle
//!
//! Posture is a composition of three flags rather than a single enum:
//! `falling`, `invincible` and `dead`. Collisions knock the skier down, a
//! scheduled get-up grants a short invincibility window, and running out of
//! health (or meeting the yeti) is terminal.

use glam::Vec2;

use super::chunks::ChunkCoord;
use super::hitbox::Hitbox;
use super::timers::{TimerEvent, TimerQueue};
use crate::approach;
use crate::consts::{FORWARD, MAX_DIR, MIN_DIR};
use crate::heading;
use crate::tuning::Tuning;

/// Coarse view of the skier's flags, for presentation and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkierCondition {
    Normal,
    Falling,
    Invincible,
    Dead,
}

#[derive(Debug, Clone)]
pub struct Skier {
    /// World position (meters, +y downhill)
    pub pos: Vec2,
    /// Steering index in `[MIN_DIR, MAX_DIR]`
    pub direction: i32,
    /// Current heading in degrees; lags behind `goal_angle`
    pub angle: f32,
    pub goal_angle: f32,
    /// Meters/tick along the heading
    pub speed: f32,
    pub max_speed: f32,
    /// Per-tick displacement decomposed from heading and speed
    pub vel: Vec2,
    pub turbo: bool,
    pub health: i32,
    pub max_health: i32,
    pub falling: bool,
    pub invincible: bool,
    pub dead: bool,
    /// Dead by the yeti's hand; the sprite is hidden
    pub eaten: bool,
    /// Cumulative downhill distance (meters)
    pub distance_traveled: f32,
    /// Chunk the skier occupied after the last window update
    pub chunk: Option<ChunkCoord>,
    /// A get-up event is queued
    pub get_up_pending: bool,
}

impl Skier {
    pub fn new(tuning: &Tuning) -> Self {
        let direction = tuning.skier.initial_direction;
        let angle = angle_for(tuning, direction);
        Self {
            pos: tuning.skier_spawn(),
            direction,
            angle,
            goal_angle: angle,
            speed: 0.0,
            max_speed: 0.0,
            vel: Vec2::ZERO,
            turbo: false,
            health: tuning.skier.max_health,
            max_health: tuning.skier.max_health,
            falling: false,
            invincible: false,
            dead: false,
            eaten: false,
            distance_traveled: 0.0,
            chunk: None,
            get_up_pending: false,
        }
    }

    pub fn hitbox(&self, tuning: &Tuning) -> Hitbox {
        Hitbox::translated(self.pos, &tuning.skier.hitbox, tuning.pixels_per_meter)
    }

    pub fn condition(&self) -> SkierCondition {
        if self.dead {
            SkierCondition::Dead
        } else if self.falling {
            SkierCondition::Falling
        } else if self.invincible {
            SkierCondition::Invincible
        } else {
            SkierCondition::Normal
        }
    }

    /// Steering and turbo commands are only honoured while upright
    pub fn accepts_input(&self) -> bool {
        !self.falling
    }

    /// Turn by `delta` steps, clamped to the steering range
    pub fn change_direction(&mut self, delta: i32) {
        self.direction = (self.direction + delta).clamp(MIN_DIR, MAX_DIR);
    }

    /// Set the steering index outright (fixed resets such as facing forward)
    pub fn set_direction(&mut self, direction: i32) {
        self.direction = direction;
    }

    /// Face straight downhill, snapping the heading as well
    pub fn face_forward(&mut self, tuning: &Tuning) {
        self.set_direction(FORWARD);
        self.angle = angle_for(tuning, FORWARD);
    }

    pub fn toggle_turbo(&mut self) {
        self.turbo = !self.turbo;
    }

    /// Heal, capped at the maximum
    pub fn add_health(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Take a hit. Returns `false` if the skier was already down or invincible.
    pub fn collide(&mut self, damage: i32) -> bool {
        if self.falling || self.invincible {
            return false;
        }

        self.falling = true;
        self.turbo = false;
        self.health -= damage;

        if self.health <= 0 {
            self.health = 0;
            self.dead = true;
        }
        true
    }

    /// Lethal, unconditional: ignores invincibility
    pub fn die(&mut self) {
        self.falling = true;
        self.dead = true;
        self.eaten = true;
        self.speed = 0.0;
        self.max_speed = 0.0;
    }

    /// Stand back up after a fall. No-op once dead.
    pub fn get_up(&mut self, tuning: &Tuning, now: u64, timers: &mut TimerQueue) -> bool {
        if self.dead {
            return false;
        }

        self.falling = false;
        self.invincible = true;
        self.face_forward(tuning);

        let duration = tuning.ms_to_ticks(tuning.skier.invincibility_duration_ms);
        timers.schedule(now, duration, TimerEvent::EndInvincibility);
        true
    }

    pub fn end_invincibility(&mut self) -> bool {
        let was = self.invincible;
        self.invincible = false;
        was
    }

    /// Advance speed, heading and position by one tick
    pub fn update(&mut self, tuning: &Tuning, now: u64, timers: &mut TimerQueue) {
        self.update_speed(tuning, now, timers);

        self.pos += self.vel;
        self.distance_traveled += self.vel.y;
    }

    fn update_speed(&mut self, tuning: &Tuning, now: u64, timers: &mut TimerQueue) {
        let at_bound = self.direction <= MIN_DIR || self.direction >= MAX_DIR;

        self.max_speed = if at_bound || self.falling {
            0.0
        } else if self.turbo {
            tuning.per_tick(tuning.skier.turbo_max_speed)
        } else {
            tuning.per_tick(tuning.skier.max_speed)
        };

        let accel = if self.turbo {
            tuning.per_tick(tuning.skier.turbo_accel)
        } else {
            tuning.per_tick(tuning.skier.accel)
        };
        self.speed = approach(self.speed, self.max_speed, accel);

        if self.speed != self.max_speed {
            log::trace!("speed change {} -> {}", self.speed, self.max_speed);
        }

        if self.falling && self.speed == 0.0 && !self.get_up_pending && !self.dead {
            let down = tuning.ms_to_ticks(tuning.skier.down_duration_ms);
            timers.schedule(now, down, TimerEvent::GetUp);
            self.get_up_pending = true;
        }

        self.goal_angle = angle_for(tuning, self.direction);
        let turn = tuning.per_tick(tuning.skier.turn_rate);
        self.angle = approach(self.angle, self.goal_angle, turn);

        if self.angle != self.goal_angle {
            log::trace!("angle change {}", self.angle);
        }

        // Screen y grows downhill. Headings on an axis (180, 270, 360) must
        // not leak rounding noise into the other component.
        let dir = heading(self.angle);
        self.vel = Vec2::new(snap_zero(dir.x), -snap_zero(dir.y)) * self.speed;
    }
}

fn snap_zero(component: f32) -> f32 {
    if component.abs() < 1e-6 {
        0.0
    } else {
        component
    }
}

/// Goal heading for a steering index
pub fn angle_for(tuning: &Tuning, direction: i32) -> f32 {
    let index = direction.clamp(MIN_DIR, MAX_DIR) as usize;
    tuning.skier.direction_angles[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LEFTMOST, RIGHTMOST};
    use proptest::prelude::*;

    fn upright(tuning: &Tuning) -> Skier {
        let mut skier = Skier::new(tuning);
        skier.face_forward(tuning);
        skier
    }

    #[test]
    fn test_starts_stationary_at_rightmost() {
        let tuning = Tuning::default();
        let mut skier = Skier::new(&tuning);
        let mut timers = TimerQueue::new();
        assert_eq!(skier.direction, RIGHTMOST);
        for now in 0..30 {
            skier.update(&tuning, now, &mut timers);
            assert_eq!(skier.max_speed, 0.0);
        }
        assert_eq!(skier.speed, 0.0);
        assert_eq!(skier.pos, tuning.skier_spawn());
    }

    #[test]
    fn test_extreme_directions_cannot_accelerate() {
        let tuning = Tuning::default();
        let mut timers = TimerQueue::new();
        for dir in [LEFTMOST, RIGHTMOST] {
            let mut skier = upright(&tuning);
            skier.speed = 0.2;
            skier.set_direction(dir);
            for now in 0..100 {
                skier.update(&tuning, now, &mut timers);
                assert_eq!(skier.max_speed, 0.0);
            }
            assert_eq!(skier.speed, 0.0);
        }
    }

    #[test]
    fn test_forward_converges_to_cap_without_overshoot() {
        let tuning = Tuning::default();
        let mut timers = TimerQueue::new();
        let mut skier = upright(&tuning);
        let cap = tuning.per_tick(tuning.skier.max_speed);
        let mut last = 0.0;
        for now in 0..2000 {
            skier.update(&tuning, now, &mut timers);
            assert!(skier.speed >= last);
            assert!(skier.speed <= cap);
            last = skier.speed;
        }
        assert_eq!(skier.speed, cap);
        // Straight downhill: all motion is +y
        assert!(skier.vel.x.abs() < 1e-5);
        assert!((skier.vel.y - cap).abs() < 1e-5);
        assert!(skier.distance_traveled > 0.0);
    }

    #[test]
    fn test_turbo_uses_bigger_step_and_cap() {
        let tuning = Tuning::default();
        let mut timers = TimerQueue::new();
        let mut skier = upright(&tuning);
        skier.toggle_turbo();
        skier.update(&tuning, 0, &mut timers);
        let first_step = tuning.per_tick(tuning.skier.turbo_accel);
        assert!((skier.speed - first_step).abs() < 1e-6);
        for now in 1..200 {
            skier.update(&tuning, now, &mut timers);
        }
        assert_eq!(skier.speed, tuning.per_tick(tuning.skier.turbo_max_speed));
    }

    #[test]
    fn test_heading_lags_direction() {
        let tuning = Tuning::default();
        let mut timers = TimerQueue::new();
        let mut skier = upright(&tuning);
        skier.change_direction(1);
        skier.update(&tuning, 0, &mut timers);
        // 270 -> 313 at 5 degrees per tick
        assert_eq!(skier.goal_angle, 313.0);
        assert_eq!(skier.angle, 275.0);
        for now in 1..20 {
            skier.update(&tuning, now, &mut timers);
        }
        assert_eq!(skier.angle, 313.0);
    }

    #[test]
    fn test_braking_sideways_has_no_downhill_motion() {
        let tuning = Tuning::default();
        let mut timers = TimerQueue::new();
        for dir in [LEFTMOST, RIGHTMOST] {
            let mut skier = upright(&tuning);
            skier.set_direction(dir);
            skier.angle = angle_for(&tuning, dir);
            skier.speed = tuning.per_tick(tuning.skier.max_speed);
            let y = skier.pos.y;
            skier.update(&tuning, 0, &mut timers);
            assert!(skier.speed > 0.0);
            assert_eq!(skier.vel.y, 0.0);
            assert_eq!(skier.pos.y, y);
        }
    }

    #[test]
    fn test_change_direction_clamps() {
        let tuning = Tuning::default();
        let mut skier = Skier::new(&tuning);
        skier.change_direction(5);
        assert_eq!(skier.direction, MAX_DIR);
        skier.change_direction(-20);
        assert_eq!(skier.direction, MIN_DIR);
    }

    #[test]
    fn test_bush_hit_then_immediate_second_hit() {
        let tuning = Tuning::default();
        let mut skier = upright(&tuning);
        assert!(skier.collide(1));
        assert!(skier.falling);
        assert_eq!(skier.health, 2);
        assert!(!skier.dead);
        assert!(!skier.collide(1));
        assert_eq!(skier.health, 2);
    }

    #[test]
    fn test_flaming_bush_on_last_health_kills() {
        let tuning = Tuning::default();
        let mut skier = upright(&tuning);
        skier.health = 1;
        skier.turbo = true;
        assert!(skier.collide(2));
        assert_eq!(skier.health, 0);
        assert!(skier.dead);
        assert!(skier.falling);
        assert!(!skier.turbo);
    }

    #[test]
    fn test_invincible_ignores_collide_but_not_die() {
        let tuning = Tuning::default();
        let mut skier = upright(&tuning);
        skier.invincible = true;
        assert!(!skier.collide(2));
        assert_eq!(skier.health, 3);
        assert!(!skier.falling);
        skier.speed = 0.3;
        skier.die();
        assert!(skier.dead && skier.falling && skier.eaten);
        assert_eq!(skier.speed, 0.0);
        assert_eq!(skier.condition(), SkierCondition::Dead);
    }

    #[test]
    fn test_fall_and_recover_cycle() {
        let tuning = Tuning::default();
        let mut timers = TimerQueue::new();
        let mut skier = upright(&tuning);
        skier.speed = 2.0 * tuning.per_tick(tuning.skier.accel);
        skier.collide(1);
        assert!(!skier.accepts_input());

        skier.update(&tuning, 0, &mut timers);
        assert!(timers.is_empty());
        skier.update(&tuning, 1, &mut timers);
        assert_eq!(skier.speed, 0.0);
        assert!(skier.get_up_pending);
        assert!(timers.is_scheduled(TimerEvent::GetUp));

        // A pending get-up is never queued twice
        skier.update(&tuning, 2, &mut timers);
        assert_eq!(timers.len(), 1);

        let due = timers.take_due(61);
        assert_eq!(due, vec![TimerEvent::GetUp]);
        skier.get_up_pending = false;
        assert!(skier.get_up(&tuning, 61, &mut timers));
        assert_eq!(skier.condition(), SkierCondition::Invincible);
        assert_eq!(skier.direction, FORWARD);
        assert_eq!(skier.angle, 270.0);
        assert_eq!(timers.take_due(121), vec![TimerEvent::EndInvincibility]);
        assert!(skier.end_invincibility());
        assert_eq!(skier.condition(), SkierCondition::Normal);
    }

    #[test]
    fn test_get_up_after_death_is_noop() {
        let tuning = Tuning::default();
        let mut timers = TimerQueue::new();
        let mut skier = upright(&tuning);
        skier.die();
        assert!(!skier.get_up(&tuning, 0, &mut timers));
        assert!(skier.falling);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_add_health_caps() {
        let tuning = Tuning::default();
        let mut skier = upright(&tuning);
        skier.health = 2;
        skier.add_health(1);
        skier.add_health(1);
        assert_eq!(skier.health, 3);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Collide(i32),
        Heal(i32),
        GetUp,
        EndInvincibility,
        Turn(i32),
        Tick,
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (1..3i32).prop_map(Action::Collide),
            (1..2i32).prop_map(Action::Heal),
            Just(Action::GetUp),
            Just(Action::EndInvincibility),
            (-3..4i32).prop_map(Action::Turn),
            Just(Action::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_health_and_direction_stay_bounded(
            actions in prop::collection::vec(action(), 1..80),
        ) {
            let tuning = Tuning::default();
            let mut timers = TimerQueue::new();
            let mut skier = upright(&tuning);
            for (now, action) in actions.into_iter().enumerate() {
                let now = now as u64;
                match action {
                    Action::Collide(d) => { skier.collide(d); }
                    Action::Heal(h) => skier.add_health(h),
                    Action::GetUp => { skier.get_up(&tuning, now, &mut timers); }
                    Action::EndInvincibility => { skier.end_invincibility(); }
                    Action::Turn(d) => skier.change_direction(d),
                    Action::Tick => skier.update(&tuning, now, &mut timers),
                }
                prop_assert!(skier.health >= 0 && skier.health <= skier.max_health);
                prop_assert!(skier.health > 0 || skier.dead);
                prop_assert!((MIN_DIR..=MAX_DIR).contains(&skier.direction));
            }
        }
    }
}
