use slotmap::new_key_type;

new_key_type! {
    pub struct CreatureId;
    pub struct TreasureId;
    pub struct MineralId;
    pub struct DoorId;
}

/// A point in room pixel space. Rooms span `0.0..width` and `0.0..height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Pos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BossPhase {
    One,
    Two,
    Three,
}

impl BossPhase {
    pub fn rank(self) -> u8 {
        match self {
            BossPhase::One => 1,
            BossPhase::Two => 2,
            BossPhase::Three => 3,
        }
    }
}

/// Events surfaced by one `tick` (or buffered from interactions since the
/// previous tick). Applying damage to the player is the caller's job.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    TorchExtinguished,
    DarknessDamage { amount: i32 },
    CreatureAttack { damage: i32, source: CreatureId },
    BossPhaseChanged { phase: BossPhase },
    RoomCompleted { depth: u8, room_id: u8 },
    DepthUnlocked { depth: u8 },
}

/// Why `enter_cave` refused to build a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnterRejected {
    DepthLocked { depth: u8 },
    PreviousRoomIncomplete { depth: u8, room_id: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomOutcome {
    RoomCleared,
    LevelCleared,
}

/// Loot handed to the inventory, split into what was accepted and what the
/// inventory had no space for. The shortfall is reported, never silently lost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LootDelivery {
    pub delivered: Vec<(&'static str, u32)>,
    pub undelivered: Vec<(&'static str, u32)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrikeOutcome {
    pub defeated: bool,
    pub remaining_health: i32,
    pub loot: LootDelivery,
}

/// Per-tick view of the player supplied by the host game loop.
#[derive(Clone, Copy, Debug)]
pub struct PlayerView {
    pub pos: Pos,
}

/// Entity reference handed to the rendering collaborator together with an
/// opacity. The core never draws; it only reports what is perceivable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibleObject {
    Creature(CreatureId),
    Treasure(TreasureId),
    Mineral(MineralId),
    Door(DoorId),
    EnchantingTable,
}

/// Item storage owned by the host. `add_item` returns how many units were
/// actually accepted so callers can report partial pickups.
pub trait Inventory {
    fn has_item(&self, id: &str, qty: u32) -> bool;
    fn remove_item(&mut self, id: &str, qty: u32) -> bool;
    fn add_item(&mut self, id: &str, qty: u32) -> u32;
}

/// Camera capability owned by the renderer. Used only to decide whether the
/// opacity computation runs at all, never to draw.
pub trait Camera {
    fn world_to_screen(&self, x: f32, y: f32) -> (f32, f32);
    fn is_visible(&self, x: f32, y: f32, width: f32, height: f32) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Pos::new(0.0, 0.0);
        let b = Pos::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn boss_phase_ranks_are_ordered() {
        assert!(BossPhase::One < BossPhase::Two);
        assert!(BossPhase::Two < BossPhase::Three);
        assert_eq!(BossPhase::Three.rank(), 3);
    }
}
