//! High-level room generation: gating, room-type selection, density scaling,
//! and warden placement, composed over the per-type populate strategies.

use crate::config::CaveConfig;
use crate::creature::Creature;
use crate::progression::ProgressionTracker;
use crate::room::{DungeonRoom, RoomType};
use crate::types::{EnterRejected, Pos};

use super::populate::{PopulateContext, populate};
use super::seed::{StreamRoller, derive_room_seed};

const BASE_MONSTER_COUNT: f32 = 8.0;
const BASE_TREASURE_COUNT: f32 = 4.0;
const BASE_MINERAL_COUNT: f32 = 10.0;

const STREAM_ROOM_TYPE: u64 = 100;
const STREAM_WARDEN: u64 = 7000;

/// Minimum distance between the warden and any already-placed creature.
const WARDEN_CLEARANCE: f32 = 100.0;
const WARDEN_PLACEMENT_ATTEMPTS: u64 = 50;
/// Door inset from the far wall.
const DOOR_OFFSET: f32 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SpawnCounts {
    pub(crate) monsters: usize,
    pub(crate) treasures: usize,
    pub(crate) minerals: usize,
}

pub struct RoomGenerator<'a> {
    run_seed: u64,
    config: &'a CaveConfig,
}

impl<'a> RoomGenerator<'a> {
    pub fn new(run_seed: u64, config: &'a CaveConfig) -> Self {
        Self { run_seed, config }
    }

    /// Builds a fully populated room, or rejects without building anything
    /// when the progression invariants forbid entry.
    pub fn generate(
        &self,
        depth: u8,
        room_id: u8,
        progression: &ProgressionTracker,
    ) -> Result<DungeonRoom, EnterRejected> {
        if !progression.can_enter(depth, room_id) {
            return Err(if depth > 1 && depth > progression.max_unlocked_depth() {
                EnterRejected::DepthLocked { depth }
            } else {
                EnterRejected::PreviousRoomIncomplete { depth, room_id }
            });
        }

        let room_seed = derive_room_seed(self.run_seed, depth, room_id);
        let room_type = select_room_type(room_seed, room_id, self.config);
        let counts = spawn_counts(depth, self.config);

        let mut room = DungeonRoom::new(
            depth,
            room_id,
            room_type,
            self.config.room_width,
            self.config.room_height,
        );
        room.darkness_level = self.config.base_darkness;

        let ctx = PopulateContext {
            depth,
            room_seed,
            width: self.config.room_width,
            height: self.config.room_height,
            monsters: counts.monsters,
            treasures: counts.treasures,
            minerals: counts.minerals,
            config: self.config,
        };
        populate(&mut room, &ctx);

        place_warden(&mut room, room_seed, depth, self.config);

        if room_id > 0 {
            let door_pos = Pos::new(
                self.config.room_width - DOOR_OFFSET,
                self.config.room_height / 2.0,
            );
            room.add_door(door_pos, format!("room_key_{depth}_{room_id}"));
        }

        Ok(room)
    }
}

/// Room ids map to roles: the first room of a depth is a combat opener, the
/// second is a resource or utility room, the last is always the boss arena.
fn select_room_type(room_seed: u64, room_id: u8, config: &CaveConfig) -> RoomType {
    let mut roller = StreamRoller::new(room_seed, STREAM_ROOM_TYPE);
    if room_id == config.last_room_id() {
        RoomType::BossChamber
    } else if room_id == 0 {
        *roller.pick(&[RoomType::Standard, RoomType::EliteChamber, RoomType::Maze])
    } else if room_id == 1 {
        if roller.next_f32() < config.enchanting_room_chance {
            RoomType::EnchantingRoom
        } else {
            *roller.pick(&[RoomType::TreasureRoom, RoomType::Armory, RoomType::PuzzleRoom])
        }
    } else {
        RoomType::Standard
    }
}

/// Density scaling: base counts grow 50% per depth level, multiplied by the
/// per-category spawn rates, then by the reward tier the depth falls into.
/// Only the highest matching tier applies.
pub(crate) fn spawn_counts(depth: u8, config: &CaveConfig) -> SpawnCounts {
    let depth_multiplier = 1.0 + (depth.saturating_sub(1)) as f32 * 0.5;
    let mut monsters =
        (BASE_MONSTER_COUNT * depth_multiplier * config.monster_spawn_rate) as usize;
    let mut treasures =
        (BASE_TREASURE_COUNT * depth_multiplier * config.treasure_spawn_rate) as usize;
    let mut minerals =
        (BASE_MINERAL_COUNT * depth_multiplier * config.mineral_spawn_rate) as usize;

    if depth >= config.epic_threshold {
        treasures = (treasures as f32 * config.epic_treasure_multiplier) as usize;
        minerals = (minerals as f32 * config.epic_treasure_multiplier) as usize;
        monsters = (monsters as f32 * 1.5) as usize;
    } else if depth >= config.legendary_threshold {
        treasures = (treasures as f32 * config.legendary_treasure_multiplier) as usize;
        minerals = (minerals as f32 * config.legendary_treasure_multiplier) as usize;
        monsters = (monsters as f32 * 1.3) as usize;
    } else if depth >= config.ultra_deep_threshold {
        treasures = (treasures as f32 * config.ultra_deep_treasure_multiplier) as usize;
        minerals = (minerals as f32 * config.ultra_deep_treasure_multiplier) as usize;
    } else if depth >= config.deep_layer_threshold {
        treasures = (treasures as f32 * config.deep_treasure_multiplier) as usize;
        minerals = (minerals as f32 * config.deep_treasure_multiplier) as usize;
    }

    SpawnCounts { monsters, treasures, minerals }
}

/// Exactly one warden per room: centered in a boss chamber, guarding the far
/// quadrant of a treasure room, otherwise somewhere in the inner half of the
/// room with clearance from the creatures already placed.
fn place_warden(room: &mut DungeonRoom, room_seed: u64, depth: u8, config: &CaveConfig) {
    let pos = match room.room_type {
        RoomType::BossChamber => Pos::new(room.width / 2.0, room.height / 2.0),
        RoomType::TreasureRoom => Pos::new(3.0 * room.width / 4.0, room.height / 2.0),
        _ => {
            let mut roller = StreamRoller::new(room_seed, STREAM_WARDEN);
            let mut candidate = inner_candidate(&mut roller, room);
            for _ in 0..WARDEN_PLACEMENT_ATTEMPTS {
                let clear = room
                    .creatures
                    .iter()
                    .all(|(_, other)| candidate.distance_to(other.pos) >= WARDEN_CLEARANCE);
                if clear {
                    break;
                }
                candidate = inner_candidate(&mut roller, room);
            }
            candidate
        }
    };

    let warden = Creature::warden(
        pos,
        depth,
        config.boss_health_multiplier,
        config.boss_damage_multiplier,
    );
    room.boss = Some(room.add_creature(warden));
}

fn inner_candidate(roller: &mut StreamRoller, room: &DungeonRoom) -> Pos {
    Pos::new(
        roller.next_range_f32(room.width / 4.0, 3.0 * room.width / 4.0),
        roller.next_range_f32(room.height / 4.0, 3.0 * room.height / 4.0),
    )
}
