//! Frame pump
//!
//! Front-ends call [`Session::advance`] once per displayed frame with the wall
//! clock delta. The session converts that into whole simulation ticks, then
//! hands the frame to the renderer and, on its own cadence, to the HUD.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::hud::{HudSink, HudSnapshot};
use crate::input::Command;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::view::{RenderSink, render};

pub struct Session {
    pub state: GameState,
    accumulator: f32,
    /// Commands waiting for the next tick
    pending: Vec<Command>,
    ticks_since_hud: u64,
    game_over_sent: bool,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            pending: Vec::new(),
            ticks_since_hud: 0,
            game_over_sent: false,
        }
    }

    pub fn with_random_seed(tuning: Tuning) -> Self {
        Self::new(GameState::with_random_seed(tuning))
    }

    /// Queue a command for the next tick
    pub fn queue(&mut self, command: Command) {
        self.pending.push(command);
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over_sent
    }

    /// Run as many ticks as `frame_dt` covers, render, and refresh the HUD.
    /// Returns the events raised during this frame.
    pub fn advance(
        &mut self,
        frame_dt: f32,
        renderer: &mut impl RenderSink,
        hud: &mut impl HudSink,
    ) -> Vec<GameEvent> {
        let tick_dt = 1.0 / self.state.tuning.fps as f32;
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= tick_dt && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                commands: std::mem::take(&mut self.pending),
            };
            tick(&mut self.state, &input);
            self.accumulator -= tick_dt;
            substeps += 1;
        }
        self.ticks_since_hud += substeps as u64;

        render(&self.state, renderer);

        let refresh = self
            .state
            .tuning
            .ms_to_ticks(self.state.tuning.hud_refresh_ms)
            .max(1);
        if self.ticks_since_hud >= refresh {
            self.ticks_since_hud = 0;
            hud.update(&HudSnapshot::from_state(&self.state));
        }

        if self.state.game_over && !self.game_over_sent {
            self.game_over_sent = true;
            hud.game_over(&HudSnapshot::from_state(&self.state));
        }

        self.state.drain_events()
    }
}
