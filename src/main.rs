//! SkiFree entry point
//!
//! Runs a headless session with a simple autopilot and prints HUD snapshots
//! as JSON lines. Pass a tuning JSON file as the first argument to override
//! the default balance.

use skifree::consts::FORWARD;
use skifree::hud::{HudSink, HudSnapshot};
use skifree::sim::GameEvent;
use skifree::view::{EntityView, RenderSink};
use skifree::{Command, Session, Tuning};

/// Five minutes of frames at the nominal rate
const MAX_FRAMES: u32 = 60 * 60 * 5;

/// Prints each snapshot as one JSON line
struct JsonLinesHud;

impl JsonLinesHud {
    fn emit(&self, kind: &str, snapshot: &HudSnapshot) {
        match serde_json::to_value(snapshot) {
            Ok(mut value) => {
                value["type"] = serde_json::Value::from(kind);
                println!("{}", value);
            }
            Err(e) => log::warn!("Failed to encode HUD snapshot: {}", e),
        }
    }
}

impl HudSink for JsonLinesHud {
    fn update(&mut self, snapshot: &HudSnapshot) {
        self.emit("hud", snapshot);
    }

    fn game_over(&mut self, final_snapshot: &HudSnapshot) {
        self.emit("game_over", final_snapshot);
    }
}

/// Counts what would have been drawn
#[derive(Default)]
struct HeadlessRenderer {
    entities: usize,
}

impl RenderSink for HeadlessRenderer {
    fn draw(&mut self, _entity: &EntityView) {
        self.entities += 1;
    }
}

/// Ski mostly straight, weaving a little every couple of seconds
fn autopilot(session: &mut Session, frame: u32) {
    let upright = session.state.skier.accepts_input();
    let direction = session.state.skier.direction;
    if !upright {
        return;
    }

    if frame == 0 {
        session.queue(Command::Forward);
        session.queue(Command::ToggleTurbo);
        return;
    }

    match frame % 150 {
        0 => session.queue(if (frame / 150) % 2 == 0 {
            Command::TurnLeft
        } else {
            Command::TurnRight
        }),
        40 if direction != FORWARD => session.queue(Command::Forward),
        _ => {}
    }
}

fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        return Tuning::default();
    };
    match Tuning::load(&path) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Could not use tuning file {}: {}; using defaults", path, e);
            Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("SkiFree (headless) starting...");

    let mut session = Session::with_random_seed(load_tuning());
    let mut renderer = HeadlessRenderer::default();
    let mut hud = JsonLinesHud;
    let frame_dt = 1.0 / session.state.tuning.fps as f32;

    for frame in 0..MAX_FRAMES {
        autopilot(&mut session, frame);
        for event in session.advance(frame_dt, &mut renderer, &mut hud) {
            match event {
                GameEvent::GameOver { distance } => {
                    log::info!("Run ended at distance {}", distance);
                }
                other => log::debug!("{:?}", other),
            }
        }
        if session.is_game_over() {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks, {} entity draws",
        session.state.time_ticks,
        renderer.entities
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser front-ends drive `Session` directly
}
