//! Session orchestration: room entry/exit, the per-frame tick, player
//! interactions, and the perceivability pass handed to the renderer.
//! The controller owns the active room, the progression map, and the light
//! source; nothing here is global, so independent sessions can coexist.

use std::hash::Hasher;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use xxhash_rust::xxh3::Xxh3;

use crate::config::{CaveConfig, ConfigError};
use crate::content::keys;
use crate::creature::{AiContext, roll_unit, update_creature};
use crate::lighting::LightingModel;
use crate::progression::ProgressionTracker;
use crate::room::DungeonRoom;
use crate::roomgen::{RoomGenerator, warden_loot};
use crate::types::{
    Camera, CreatureId, DoorId, GameEvent, Inventory, LootDelivery, PlayerView, Pos, RoomOutcome,
    StrikeOutcome, TreasureId, VisibleObject,
};

// Footprints of the static object kinds, for camera culling.
const CHEST_SIZE: (f32, f32) = (35.0, 30.0);
const MINERAL_SIZE: (f32, f32) = (30.0, 25.0);
const DOOR_SIZE: (f32, f32) = (80.0, 100.0);
const TABLE_SIZE: (f32, f32) = (70.0, 50.0);
/// Chests keep a faint glint near the edge of sight.
const CHEST_GLINT_ALPHA: u8 = 50;

pub struct DungeonController {
    config: CaveConfig,
    run_seed: u64,
    progression: ProgressionTracker,
    lighting: LightingModel,
    rng: ChaCha8Rng,
    clock: f64,
    room: Option<DungeonRoom>,
    // Interaction-driven events held for delivery on the next tick.
    pending_events: Vec<GameEvent>,
}

impl DungeonController {
    /// Validates the configuration up front; a bad config is a programmer
    /// error and refuses to construct a session.
    pub fn new(run_seed: u64, config: CaveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            progression: ProgressionTracker::new(&config),
            lighting: LightingModel::new(),
            rng: ChaCha8Rng::seed_from_u64(run_seed),
            clock: 0.0,
            room: None,
            pending_events: Vec::new(),
            run_seed,
            config,
        })
    }

    pub fn config(&self) -> &CaveConfig {
        &self.config
    }

    pub fn progression(&self) -> &ProgressionTracker {
        &self.progression
    }

    pub fn lighting(&self) -> &LightingModel {
        &self.lighting
    }

    pub fn current_room(&self) -> Option<&DungeonRoom> {
        self.room.as_ref()
    }

    pub fn in_cave(&self) -> bool {
        self.room.is_some()
    }

    /// Generates and enters a room, replacing any active one. Entering the
    /// same `(depth, room_id)` twice builds a fresh room both times; partial
    /// progress inside an uncompleted room does not survive an exit.
    pub fn enter_cave(&mut self, depth: u8, room_id: u8) -> Option<&DungeonRoom> {
        let generator = RoomGenerator::new(self.run_seed, &self.config);
        match generator.generate(depth, room_id, &self.progression) {
            Ok(room) => {
                self.room = Some(room);
                self.room.as_ref()
            }
            Err(_) => None,
        }
    }

    /// Drops the active room unconditionally and snuffs the light.
    pub fn exit_cave(&mut self) {
        self.room = None;
        self.lighting.snuff();
        self.pending_events.clear();
    }

    /// One simulation step. Runs the light source, then every creature's
    /// behavior machine, and returns the events of this step (prefixed by any
    /// events buffered from interactions since the previous tick).
    pub fn tick(&mut self, delta_time: f32, player: &PlayerView) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        let Some(room) = self.room.as_mut() else {
            return events;
        };

        self.clock += delta_time as f64;

        let light = self.lighting.tick(delta_time, &self.config);
        if light.extinguished {
            events.push(GameEvent::TorchExtinguished);
        }
        if let Some(amount) = light.darkness_damage {
            events.push(GameEvent::DarknessDamage { amount });
        }

        let ctx = AiContext {
            clock: self.clock,
            delta_time,
            player_pos: player.pos,
            player_in_darkness: !self.lighting.is_lit(),
            room_width: room.width,
            room_height: room.height,
        };
        let ids: Vec<CreatureId> = room.creatures.keys().collect();
        for id in ids {
            let Some(creature) = room.creatures.get_mut(id) else {
                continue;
            };
            let update = update_creature(creature, &ctx, &mut self.rng);
            if let Some(phase) = update.phase_changed {
                events.push(GameEvent::BossPhaseChanged { phase });
            }
            if let Some(damage) = update.attack_damage {
                events.push(GameEvent::CreatureAttack { damage, source: id });
            }
        }

        events
    }

    pub fn use_torch(&mut self, inventory: &mut impl Inventory) -> bool {
        if inventory.remove_item(keys::TORCH, 1) {
            self.lighting.add_light(self.config.torch_duration);
            return true;
        }
        false
    }

    /// A lamp burns twice as long as a torch.
    pub fn use_cave_lamp(&mut self, inventory: &mut impl Inventory) -> bool {
        if inventory.remove_item(keys::CAVE_LAMP, 1) {
            self.lighting.add_light(self.config.torch_duration * 2.0);
            return true;
        }
        false
    }

    /// Applies player damage to a creature. A kill removes it, delivers any
    /// drops, and, if it emptied the room, feeds completion into progression
    /// (the resulting events arrive with the next tick).
    pub fn strike_creature(
        &mut self,
        id: CreatureId,
        attack_damage: i32,
        inventory: &mut impl Inventory,
    ) -> Option<StrikeOutcome> {
        let room = self.room.as_mut()?;
        let creature = room.creatures.get_mut(id)?;

        creature.health -= attack_damage;
        if creature.health > 0 {
            return Some(StrikeOutcome {
                defeated: false,
                remaining_health: creature.health,
                loot: LootDelivery::default(),
            });
        }

        let was_boss = creature.is_boss();
        room.creatures.remove(id);
        if Some(id) == room.boss {
            room.boss_defeated = true;
        }
        if Some(id) == room.mini_boss {
            room.mini_boss = None;
        }
        let depth = room.depth;
        let room_id = room.room_id;
        let cleared = room.is_cleared();

        let drops = if was_boss { warden_loot(depth, &mut self.rng) } else { Vec::new() };
        let loot = deliver_loot(drops, inventory);

        if cleared {
            self.pending_events.push(GameEvent::RoomCompleted { depth, room_id });
            let outcome = self.progression.complete_room(depth, room_id);
            if outcome == RoomOutcome::LevelCleared && depth < self.config.max_depth {
                self.pending_events
                    .push(GameEvent::DepthUnlocked { depth: depth + 1 });
            }
        }

        Some(StrikeOutcome { defeated: true, remaining_health: 0, loot })
    }

    /// Opens a chest. The first interaction empties it permanently; anything
    /// the inventory cannot hold is reported as undelivered.
    pub fn open_treasure(
        &mut self,
        id: TreasureId,
        inventory: &mut impl Inventory,
    ) -> Option<LootDelivery> {
        let room = self.room.as_mut()?;
        let chest = room.treasures.get_mut(id)?;
        if chest.opened {
            return None;
        }
        chest.opened = true;
        let loot = chest.loot.clone();
        Some(deliver_loot(loot, inventory))
    }

    /// Unlocks a door by consuming its key. Already-open doors pass freely.
    pub fn open_door(&mut self, id: DoorId, inventory: &mut impl Inventory) -> bool {
        let Some(room) = self.room.as_mut() else {
            return false;
        };
        let Some(door) = room.doors.get_mut(id) else {
            return false;
        };
        if !door.locked {
            return true;
        }
        if inventory.remove_item(&door.required_key, 1) {
            door.locked = false;
            return true;
        }
        false
    }

    /// Enchants an item at the current room's table. Requires `level * 5`
    /// experience orbs; failure still burns half of them.
    pub fn enchant_at_table(
        &mut self,
        item_id: &str,
        level: u8,
        inventory: &mut impl Inventory,
    ) -> bool {
        let Some(room) = self.room.as_ref() else {
            return false;
        };
        if room.enchanting_table.is_none() || !(1..=5).contains(&level) {
            return false;
        }

        let orbs_needed = level as u32 * 5;
        if !inventory.has_item(keys::EXPERIENCE_ORB, orbs_needed)
            || !inventory.has_item(item_id, 1)
        {
            return false;
        }

        let success_rate = self.config.enchant_success_rates[(level - 1) as usize];
        if roll_unit(&mut self.rng) < success_rate {
            inventory.remove_item(item_id, 1);
            inventory.remove_item(keys::EXPERIENCE_ORB, orbs_needed);
            inventory.add_item(&format!("enchanted_{item_id}"), 1);
            true
        } else {
            inventory.remove_item(keys::EXPERIENCE_ORB, orbs_needed / 2);
            false
        }
    }

    /// Opacity pass for the renderer: every camera-visible object with a
    /// non-zero perceived opacity, given the current light and distance from
    /// the player's screen position.
    pub fn visible_objects(
        &self,
        camera: &impl Camera,
        player_screen: (f32, f32),
    ) -> Vec<(VisibleObject, u8)> {
        let Some(room) = self.room.as_ref() else {
            return Vec::new();
        };
        let base_darkness = room.darkness_level;
        let mut visible = Vec::new();

        let consider = |object: VisibleObject,
                        pos: Pos,
                        size: (f32, f32),
                            min_alpha: u8,
                            out: &mut Vec<(VisibleObject, u8)>| {
            if !camera.is_visible(pos.x, pos.y, size.0, size.1) {
                return;
            }
            let screen = camera.world_to_screen(pos.x, pos.y);
            let opacity = self.lighting.object_opacity(
                screen,
                player_screen,
                base_darkness,
                &self.config,
                min_alpha,
            );
            if opacity > 0 {
                out.push((object, opacity));
            }
        };

        for (id, creature) in &room.creatures {
            consider(
                VisibleObject::Creature(id),
                creature.pos,
                (creature.width, creature.height),
                0,
                &mut visible,
            );
        }
        for (id, chest) in &room.treasures {
            consider(
                VisibleObject::Treasure(id),
                chest.pos,
                CHEST_SIZE,
                CHEST_GLINT_ALPHA,
                &mut visible,
            );
        }
        for (id, mineral) in &room.minerals {
            consider(VisibleObject::Mineral(id), mineral.pos, MINERAL_SIZE, 0, &mut visible);
        }
        for (id, door) in &room.doors {
            consider(VisibleObject::Door(id), door.pos, DOOR_SIZE, 0, &mut visible);
        }
        if let Some(table) = room.enchanting_table {
            consider(VisibleObject::EnchantingTable, table, TABLE_SIZE, 0, &mut visible);
        }

        visible
    }

    /// Order-stable digest of session state, for determinism checks.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.run_seed);
        hasher.write_u64(self.clock.to_bits());
        hasher.write_u8(self.progression.max_unlocked_depth());
        if let Some(room) = &self.room {
            hasher.write(&room.canonical_bytes());
        }
        hasher.finish()
    }
}

fn deliver_loot(loot: Vec<(&'static str, u32)>, inventory: &mut impl Inventory) -> LootDelivery {
    let mut delivery = LootDelivery::default();
    for (item, qty) in loot {
        let accepted = inventory.add_item(item, qty);
        if accepted > 0 {
            delivery.delivered.push((item, accepted));
        }
        if accepted < qty {
            delivery.undelivered.push((item, qty - accepted));
        }
    }
    delivery
}
