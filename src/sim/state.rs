//! Simulation state
//!
//! One `GameState` owns everything a run needs: the skier, the obstacle
//! registry, the chunk generator, spawners, pending timers and the RNG.
//! Independent states never share anything.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::chunks::ChunkGenerator;
use super::registry::ObstacleRegistry;
use super::skier::Skier;
use super::spawner::{DogSpawner, YetiSpawner};
use super::timers::TimerQueue;
use crate::tuning::Tuning;

/// Notable things that happened during a tick, for collaborators to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    ObstacleHit { obstacle: &'static str, damage: i32 },
    HealthPickup { health: i32 },
    SkierGotUp,
    InvincibilityEnded,
    DogSpawned { id: u32 },
    YetiSpawned { id: u32 },
    SkierEaten { yeti_id: u32 },
    /// The obstacle left the registry; renderers drop its sprite
    ObstacleRemoved { id: u32 },
    /// Emitted once, the first tick the skier is seen dead
    GameOver { distance: u64 },
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub skier: Skier,
    pub obstacles: ObstacleRegistry,
    pub chunks: ChunkGenerator,
    pub dogs: DogSpawner,
    pub yetis: YetiSpawner,
    pub timers: TimerQueue,
    pub events: Vec<GameEvent>,
    /// Game over has been announced
    pub game_over: bool,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let chunks = ChunkGenerator::new(&tuning, &mut rng);
        let dogs = DogSpawner::new(&tuning, &mut rng);

        Self {
            skier: Skier::new(&tuning),
            yetis: YetiSpawner::new(&tuning),
            seed,
            rng,
            time_ticks: 0,
            obstacles: ObstacleRegistry::new(),
            chunks,
            dogs,
            timers: TimerQueue::new(),
            events: Vec::new(),
            game_over: false,
            tuning,
        }
    }

    /// Create a new run from a fresh random seed
    pub fn with_random_seed(tuning: Tuning) -> Self {
        let seed = rand::rng().random();
        log::info!("Starting run with seed {}", seed);
        Self::new(tuning, seed)
    }

    /// Distance as shown to the player (rounded, in pixel units)
    pub fn display_distance(&self) -> u64 {
        let px = self.skier.distance_traveled * self.tuning.pixels_per_meter;
        px.round().max(0.0) as u64
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
