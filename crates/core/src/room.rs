use slotmap::SlotMap;

use crate::content::ChestTier;
use crate::creature::Creature;
use crate::types::{CreatureId, DoorId, MineralId, Pos, TreasureId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomType {
    Standard,
    TreasureRoom,
    BossChamber,
    Maze,
    TrapRoom,
    EnchantingRoom,
    EliteChamber,
    PuzzleRoom,
    Armory,
}

impl RoomType {
    pub fn code(self) -> u8 {
        match self {
            RoomType::Standard => 0,
            RoomType::TreasureRoom => 1,
            RoomType::BossChamber => 2,
            RoomType::Maze => 3,
            RoomType::TrapRoom => 4,
            RoomType::EnchantingRoom => 5,
            RoomType::EliteChamber => 6,
            RoomType::PuzzleRoom => 7,
            RoomType::Armory => 8,
        }
    }
}

/// A chest's loot is rolled once, at construction. Opening is permanent.
#[derive(Clone, Debug, PartialEq)]
pub struct TreasureChest {
    pub id: TreasureId,
    pub pos: Pos,
    pub tier: ChestTier,
    pub opened: bool,
    pub loot: Vec<(&'static str, u32)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MineralNode {
    pub id: MineralId,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LockedDoor {
    pub id: DoorId,
    pub pos: Pos,
    pub required_key: String,
    pub locked: bool,
}

/// One generated room. Owned exclusively by the controller while active and
/// dropped on exit; only progression state survives the transition.
#[derive(Clone, Debug)]
pub struct DungeonRoom {
    pub depth: u8,
    pub room_id: u8,
    pub room_type: RoomType,
    pub width: f32,
    pub height: f32,
    pub creatures: SlotMap<CreatureId, Creature>,
    pub treasures: SlotMap<TreasureId, TreasureChest>,
    pub minerals: SlotMap<MineralId, MineralNode>,
    pub doors: SlotMap<DoorId, LockedDoor>,
    pub boss: Option<CreatureId>,
    pub mini_boss: Option<CreatureId>,
    pub enchanting_table: Option<Pos>,
    pub darkness_level: f32,
    pub boss_defeated: bool,
}

/// Field-by-field equality (the `#[derive(PartialEq)]` equivalent). Spelled
/// out by hand only because `slotmap::SlotMap` does not implement `PartialEq`;
/// the maps are compared by their values in iteration order.
impl PartialEq for DungeonRoom {
    fn eq(&self, other: &Self) -> bool {
        fn maps_eq<K: slotmap::Key, V: PartialEq>(
            a: &SlotMap<K, V>,
            b: &SlotMap<K, V>,
        ) -> bool {
            a.len() == b.len() && a.values().zip(b.values()).all(|(x, y)| x == y)
        }

        self.depth == other.depth
            && self.room_id == other.room_id
            && self.room_type == other.room_type
            && self.width == other.width
            && self.height == other.height
            && maps_eq(&self.creatures, &other.creatures)
            && maps_eq(&self.treasures, &other.treasures)
            && maps_eq(&self.minerals, &other.minerals)
            && maps_eq(&self.doors, &other.doors)
            && self.boss == other.boss
            && self.mini_boss == other.mini_boss
            && self.enchanting_table == other.enchanting_table
            && self.darkness_level == other.darkness_level
            && self.boss_defeated == other.boss_defeated
    }
}

impl DungeonRoom {
    pub fn new(depth: u8, room_id: u8, room_type: RoomType, width: f32, height: f32) -> Self {
        Self {
            depth,
            room_id,
            room_type,
            width,
            height,
            creatures: SlotMap::with_key(),
            treasures: SlotMap::with_key(),
            minerals: SlotMap::with_key(),
            doors: SlotMap::with_key(),
            boss: None,
            mini_boss: None,
            enchanting_table: None,
            darkness_level: 0.8,
            boss_defeated: false,
        }
    }

    pub fn add_creature(&mut self, creature: Creature) -> CreatureId {
        let id = self.creatures.insert(creature);
        self.creatures[id].id = id;
        id
    }

    pub fn add_treasure(&mut self, pos: Pos, tier: ChestTier, loot: Vec<(&'static str, u32)>) {
        let id = self.treasures.insert(TreasureChest {
            id: TreasureId::default(),
            pos,
            tier,
            opened: false,
            loot,
        });
        self.treasures[id].id = id;
    }

    pub fn add_mineral(&mut self, pos: Pos) {
        let id = self.minerals.insert(MineralNode { id: MineralId::default(), pos });
        self.minerals[id].id = id;
    }

    pub fn add_door(&mut self, pos: Pos, required_key: String) {
        let id = self.doors.insert(LockedDoor {
            id: DoorId::default(),
            pos,
            required_key,
            locked: true,
        });
        self.doors[id].id = id;
    }

    /// Cleared means every creature is dead, boss and mini-boss included.
    pub fn is_cleared(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Creatures other than the guardian boss and mini-boss.
    pub fn minion_count(&self) -> usize {
        self.creatures
            .iter()
            .filter(|(id, _)| Some(*id) != self.boss && Some(*id) != self.mini_boss)
            .count()
    }

    /// Stable byte encoding of the generated content, for fingerprinting in
    /// determinism tests. Iteration follows insertion order, which is itself
    /// deterministic for a given seed.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.push(self.depth);
        bytes.push(self.room_id);
        bytes.push(self.room_type.code());
        bytes.extend(self.width.to_le_bytes());
        bytes.extend(self.height.to_le_bytes());

        bytes.extend((self.creatures.len() as u32).to_le_bytes());
        for (_, creature) in &self.creatures {
            bytes.push(creature.kind.code());
            bytes.push(u8::from(creature.is_elite));
            bytes.push(u8::from(creature.is_boss()));
            bytes.extend(creature.pos.x.to_le_bytes());
            bytes.extend(creature.pos.y.to_le_bytes());
            bytes.extend(creature.max_health.to_le_bytes());
        }

        bytes.extend((self.treasures.len() as u32).to_le_bytes());
        for (_, chest) in &self.treasures {
            bytes.push(chest.tier.code());
            bytes.extend(chest.pos.x.to_le_bytes());
            bytes.extend(chest.pos.y.to_le_bytes());
            bytes.extend((chest.loot.len() as u32).to_le_bytes());
            for (item, qty) in &chest.loot {
                bytes.extend((item.len() as u32).to_le_bytes());
                bytes.extend(item.as_bytes());
                bytes.extend(qty.to_le_bytes());
            }
        }

        bytes.extend((self.minerals.len() as u32).to_le_bytes());
        for (_, mineral) in &self.minerals {
            bytes.extend(mineral.pos.x.to_le_bytes());
            bytes.extend(mineral.pos.y.to_le_bytes());
        }

        bytes.extend((self.doors.len() as u32).to_le_bytes());
        for (_, door) in &self.doors {
            bytes.extend((door.required_key.len() as u32).to_le_bytes());
            bytes.extend(door.required_key.as_bytes());
        }

        bytes.push(u8::from(self.enchanting_table.is_some()));
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CreatureKind;

    #[test]
    fn cleared_tracks_all_creatures_including_the_boss() {
        let mut room = DungeonRoom::new(1, 0, RoomType::Standard, 1400.0, 1000.0);
        assert!(room.is_cleared());

        let minion = room.add_creature(Creature::basic(CreatureKind::CaveSpider, Pos::new(100.0, 100.0)));
        let warden = room.add_creature(Creature::warden(Pos::new(700.0, 500.0), 1, 5.0, 3.0));
        room.boss = Some(warden);

        assert!(!room.is_cleared());
        assert_eq!(room.minion_count(), 1);

        room.creatures.remove(minion);
        assert!(!room.is_cleared(), "boss still alive");
        room.creatures.remove(warden);
        assert!(room.is_cleared());
    }

    #[test]
    fn canonical_bytes_differ_when_content_differs() {
        let mut a = DungeonRoom::new(1, 0, RoomType::Standard, 1400.0, 1000.0);
        let mut b = a.clone();
        a.add_mineral(Pos::new(50.0, 60.0));
        b.add_mineral(Pos::new(50.0, 61.0));
        assert_ne!(a.canonical_bytes(), b.canonical_bytes());
    }
}
