//! Fixed timestep simulation tick
//!
//! Every tick runs the same stages in the same order:
//! timers -> chunk window -> skier physics -> NPC spawns -> collision pass ->
//! movement pass (with pruning) -> removal sweep.
//! Both passes only mark obstacles; the sweep is the single point of removal.

use super::chunks::ChunkCoord;
use super::collision::collision_pass;
use super::obstacle::{Variant, YetiPose};
use super::state::{GameEvent, GameState};
use super::timers::TimerEvent;
use crate::input::Command;
use crate::view::project;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands received since the previous tick, oldest first
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn with(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    for command in &input.commands {
        command.apply(&mut state.skier, &state.tuning);
    }

    fire_timers(state);
    update_chunk_window(state);

    let now = state.time_ticks;
    state.skier.update(&state.tuning, now, &mut state.timers);

    spawn_npcs(state);

    collision_pass(
        &mut state.obstacles,
        &mut state.skier,
        &state.tuning,
        now,
        &mut state.timers,
        &mut state.events,
    );

    movement_pass(state);
    for id in state.obstacles.sweep() {
        state.events.push(GameEvent::ObstacleRemoved { id });
    }

    if state.skier.dead && !state.game_over {
        state.game_over = true;
        let distance = state.display_distance();
        log::info!("Game over at {} after {} ticks", distance, state.time_ticks);
        state.events.push(GameEvent::GameOver { distance });
    }
}

/// Run every scheduled event that has come due
fn fire_timers(state: &mut GameState) {
    let now = state.time_ticks;
    for event in state.timers.take_due(now) {
        match event {
            TimerEvent::GetUp => {
                state.skier.get_up_pending = false;
                if state.skier.get_up(&state.tuning, now, &mut state.timers) {
                    log::debug!("Skier got up (health {})", state.skier.health);
                    state.events.push(GameEvent::SkierGotUp);
                }
            }
            TimerEvent::EndInvincibility => {
                if state.skier.end_invincibility() {
                    state.events.push(GameEvent::InvincibilityEnded);
                }
            }
            TimerEvent::YetiPick { yeti_id } => {
                if let Some(yeti) = state.obstacles.get_mut(yeti_id) {
                    if let Variant::Yeti { pose, .. } = &mut yeti.variant {
                        *pose = YetiPose::Pick;
                    }
                }
            }
        }
    }
}

/// Generate the chunk window whenever the skier enters a new chunk
fn update_chunk_window(state: &mut GameState) {
    let current = ChunkCoord::containing(state.skier.pos, &state.tuning);
    if state.skier.chunk == Some(current) {
        return;
    }

    state.skier.chunk = Some(current);
    let spawned = state.chunks.fill_window(
        current,
        state.skier.pos,
        &state.tuning,
        &mut state.rng,
        &mut state.obstacles,
    );
    log::debug!(
        "Skier entered chunk ({}, {}): {} new obstacles, {} live",
        current.x,
        current.y,
        spawned,
        state.obstacles.len()
    );
}

fn spawn_npcs(state: &mut GameState) {
    let distance = state.display_distance();
    if let Some(id) = state.yetis.update(
        distance,
        &state.skier,
        &state.tuning,
        &mut state.rng,
        &mut state.obstacles,
    ) {
        state.events.push(GameEvent::YetiSpawned { id });
    }

    if let Some(id) = state.dogs.update(
        &state.skier,
        &state.tuning,
        &mut state.rng,
        &mut state.obstacles,
    ) {
        state.events.push(GameEvent::DogSpawned { id });
    }
}

/// Move every obstacle, then mark the ones that have left the view behind
fn movement_pass(state: &mut GameState) {
    let tuning = &state.tuning;
    let skier = &state.skier;
    let skier_row = skier
        .chunk
        .unwrap_or_else(|| ChunkCoord::containing(skier.pos, tuning))
        .y;
    let (live, removals) = state.obstacles.pass_mut();

    for obstacle in live.iter_mut() {
        obstacle.advance(skier, tuning);

        let row = ChunkCoord::containing(obstacle.pos, tuning).y;
        if row < skier_row - tuning.world.prune_rows_behind {
            removals.mark(obstacle.id);
        }

        if matches!(obstacle.variant, Variant::Yeti { .. }) {
            let screen = project(obstacle.pos, skier.pos, tuning);
            if screen.top <= tuning.yeti.despawn_screen_top {
                removals.mark(obstacle.id);
            }
        }
    }
}
