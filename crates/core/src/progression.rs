//! Depth unlocking, key accounting, and per-room completion rules.
//! This module exists because progression is the one piece of state that
//! outlives a room; everything else is regenerated on entry.

use std::collections::BTreeMap;

use crate::config::CaveConfig;
use crate::types::RoomOutcome;

pub struct ProgressionTracker {
    max_unlocked_depth: u8,
    keys: BTreeMap<u8, u32>,
    completed: BTreeMap<(u8, u8), bool>,
    max_depth: u8,
    rooms_per_level: u8,
}

impl ProgressionTracker {
    pub fn new(config: &CaveConfig) -> Self {
        Self {
            max_unlocked_depth: 1,
            keys: BTreeMap::new(),
            completed: BTreeMap::new(),
            max_depth: config.max_depth,
            rooms_per_level: config.rooms_per_level,
        }
    }

    pub fn max_unlocked_depth(&self) -> u8 {
        self.max_unlocked_depth
    }

    pub fn key_count(&self, depth: u8) -> u32 {
        self.keys.get(&depth).copied().unwrap_or(0)
    }

    pub fn is_completed(&self, depth: u8, room_id: u8) -> bool {
        self.completed.get(&(depth, room_id)).copied().unwrap_or(false)
    }

    /// A room is enterable when its depth is unlocked and every earlier room
    /// at that depth has been completed. Never fails, only answers.
    pub fn can_enter(&self, depth: u8, room_id: u8) -> bool {
        if depth == 0 || room_id >= self.rooms_per_level {
            return false;
        }
        if depth > 1 && depth > self.max_unlocked_depth {
            return false;
        }
        room_id == 0 || self.is_completed(depth, room_id - 1)
    }

    /// Idempotent: re-unlocking an already-unlocked depth is a no-op.
    pub fn unlock_next_depth(&mut self, depth: u8) -> bool {
        if depth >= self.max_unlocked_depth {
            self.max_unlocked_depth = depth + 1;
            return true;
        }
        false
    }

    pub fn add_depth_key(&mut self, depth: u8) -> bool {
        *self.keys.entry(depth).or_insert(0) += 1;
        self.unlock_next_depth(depth)
    }

    /// Marks a room done. Completing the last outstanding room of a depth
    /// grants that depth's key (and the unlock that comes with it) unless the
    /// run is already at the final depth. Re-completing a room never grants a
    /// second key.
    pub fn complete_room(&mut self, depth: u8, room_id: u8) -> RoomOutcome {
        let newly_completed = !self.is_completed(depth, room_id);
        self.completed.insert((depth, room_id), true);

        let cleared = (0..self.rooms_per_level)
            .filter(|&room| self.is_completed(depth, room))
            .count();
        if cleared >= self.rooms_per_level as usize {
            if newly_completed && depth < self.max_depth {
                self.add_depth_key(depth);
            }
            RoomOutcome::LevelCleared
        } else {
            RoomOutcome::RoomCleared
        }
    }
}
