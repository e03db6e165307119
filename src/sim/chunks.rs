//! Procedural world generation
//!
//! The slope is an unbounded grid of chunks. A chunk is populated the first
//! time it enters the generation window around the skier and never again.
//! Obstacle placement is rate-limited by one countdown per obstacle kind,
//! shared across the whole world: every quadrant visit ticks every countdown,
//! so each kind spreads out at a controlled average rate regardless of which
//! chunks happen to be generated.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use super::obstacle::Variant;
use super::registry::ObstacleRegistry;
use crate::tuning::{SpawnRule, Tuning};
use crate::vec_distance;

/// Integer chunk coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk containing a world position
    pub fn containing(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            x: (pos.x / tuning.world.chunk_width).floor() as i32,
            y: (pos.y / tuning.world.chunk_height).floor() as i32,
        }
    }

    /// World position of the chunk's top-left corner
    pub fn origin(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(
            self.x as f32 * tuning.world.chunk_width,
            self.y as f32 * tuning.world.chunk_height,
        )
    }

    /// Chunks that must exist while the skier is in this one: the current row
    /// and the rows ahead, a fixed number of columns to either side
    pub fn window(self, tuning: &Tuning) -> impl Iterator<Item = ChunkCoord> {
        let cols = tuning.world.window_columns;
        let rows = tuning.world.window_rows_ahead;
        let columns = self.x - cols..=self.x + cols;
        (self.y..=self.y + rows).flat_map(move |y| {
            columns.clone().map(move |x| ChunkCoord::new(x, y))
        })
    }
}

/// Shared countdown per spawnable kind, in declared priority order
#[derive(Debug, Clone)]
pub struct SpawnRateTable {
    rules: Vec<SpawnRule>,
    countdowns: Vec<u32>,
}

impl SpawnRateTable {
    pub fn new<R: Rng>(rules: &[SpawnRule], rng: &mut R) -> Self {
        let countdowns = rules.iter().map(|rule| rule.interval.draw(rng)).collect();
        Self {
            rules: rules.to_vec(),
            countdowns,
        }
    }

    /// One quadrant visit: tick every countdown, then pick the first kind that
    /// has run out and redraw its countdown
    pub fn select<R: Rng>(&mut self, rng: &mut R) -> Option<&SpawnRule> {
        let mut chosen = None;

        for (i, rule) in self.rules.iter().enumerate() {
            let countdown = &mut self.countdowns[i];
            *countdown = countdown.saturating_sub(1);

            if *countdown == 0 && chosen.is_none() {
                chosen = Some(i);
                *countdown = rule.interval.draw(rng);
            }
        }

        chosen.map(|i| &self.rules[i])
    }

    pub fn countdowns(&self) -> &[u32] {
        &self.countdowns
    }
}

/// Chunk memo plus the global spawn-rate table
#[derive(Debug, Clone)]
pub struct ChunkGenerator {
    generated: HashSet<ChunkCoord>,
    spawn_rates: SpawnRateTable,
}

impl ChunkGenerator {
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            generated: HashSet::new(),
            spawn_rates: SpawnRateTable::new(&tuning.world.obstacles, rng),
        }
    }

    pub fn was_generated(&self, coord: ChunkCoord) -> bool {
        self.generated.contains(&coord)
    }

    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    pub fn spawn_rates(&self) -> &SpawnRateTable {
        &self.spawn_rates
    }

    /// Populate `coord` once. Quadrants whose jittered spawn point falls within
    /// the clearance radius of `anchor` stay empty. Returns the number of
    /// obstacles added.
    pub fn generate_chunk<R: Rng>(
        &mut self,
        coord: ChunkCoord,
        anchor: Vec2,
        tuning: &Tuning,
        rng: &mut R,
        registry: &mut ObstacleRegistry,
    ) -> usize {
        if self.was_generated(coord) {
            return 0;
        }

        let world = &tuning.world;
        let quadrant = Vec2::new(
            world.chunk_width / world.quadrants_x as f32,
            world.chunk_height / world.quadrants_y as f32,
        );
        let half = quadrant / 2.0;
        let top_left = coord.origin(tuning);
        let mut spawned = 0;

        for qy in 0..world.quadrants_y {
            for qx in 0..world.quadrants_x {
                let center = top_left + Vec2::new(qx as f32 + 0.5, qy as f32 + 0.5) * quadrant;
                let spawn_pos = center + Vec2::new(jitter(rng, half.x), jitter(rng, half.y));

                if vec_distance(anchor, spawn_pos) <= world.min_spawn_distance {
                    continue;
                }

                let Some(rule) = self.spawn_rates.select(rng) else {
                    continue;
                };
                let kind = rule.kind;
                let offsets = rule.hitbox;

                let variant = Variant::from_spawn(kind, world.flaming_bush_probability, rng);
                registry.add(variant, spawn_pos, offsets);
                spawned += 1;
            }
        }

        self.generated.insert(coord);
        log::debug!(
            "Generated chunk ({}, {}): {} obstacles",
            coord.x,
            coord.y,
            spawned
        );
        spawned
    }

    /// Make sure every chunk in the window around `center` exists
    pub fn fill_window<R: Rng>(
        &mut self,
        center: ChunkCoord,
        anchor: Vec2,
        tuning: &Tuning,
        rng: &mut R,
        registry: &mut ObstacleRegistry,
    ) -> usize {
        center
            .window(tuning)
            .map(|coord| self.generate_chunk(coord, anchor, tuning, rng, registry))
            .sum()
    }
}

fn jitter<R: Rng>(rng: &mut R, half_extent: f32) -> f32 {
    if half_extent > 0.0 {
        rng.random_range(-half_extent..=half_extent)
    } else {
        0.0
    }
}
