//! Live obstacle set with deferred removal
//!
//! Passes over the live set only ever *mark* obstacles; nothing leaves the
//! registry until [`ObstacleRegistry::sweep`] runs at the end of the tick.

use std::collections::BTreeSet;

use glam::Vec2;

use super::hitbox::PixelBox;
use super::obstacle::{Obstacle, Variant};

/// Ids awaiting removal at the end of the tick
#[derive(Debug, Clone, Default)]
pub struct RemovalQueue {
    ids: BTreeSet<u32>,
}

impl RemovalQueue {
    pub fn mark(&mut self, id: u32) {
        self.ids.insert(id);
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Obstacles in insertion (id) order
#[derive(Debug, Clone)]
pub struct ObstacleRegistry {
    live: Vec<Obstacle>,
    removals: RemovalQueue,
    next_id: u32,
}

impl Default for ObstacleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self {
            live: Vec::new(),
            removals: RemovalQueue::default(),
            next_id: 1,
        }
    }

    /// Register a new obstacle and return its id
    pub fn add(&mut self, variant: Variant, pos: Vec2, offsets: PixelBox) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.live.push(Obstacle::new(id, variant, pos, offsets));
        id
    }

    pub fn mark_for_removal(&mut self, id: u32) {
        self.removals.mark(id);
    }

    /// Drop every marked obstacle. Marks for ids no longer present are ignored.
    /// Returns the ids actually removed, in id order.
    pub fn sweep(&mut self) -> Vec<u32> {
        if self.removals.is_empty() {
            return Vec::new();
        }
        let removals = std::mem::take(&mut self.removals);
        let mut removed = Vec::new();
        self.live.retain(|o| {
            let keep = !removals.contains(o.id);
            if !keep {
                removed.push(o.id);
            }
            keep
        });
        removed
    }

    /// Mutable access to every live obstacle alongside the removal queue, so a
    /// pass can mark while it iterates
    pub fn pass_mut(&mut self) -> (&mut [Obstacle], &mut RemovalQueue) {
        (self.live.as_mut_slice(), &mut self.removals)
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.live.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Obstacle> {
        self.live.iter_mut().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.live.iter()
    }

    pub fn pending_removals(&self) -> &RemovalQueue {
        &self.removals
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
