//! Placement strategies, one per room type. Each strategy is a pure function
//! of `(room_type, counts, depth, room_seed)`: all randomness comes from
//! seed streams, so the same inputs populate the same room.

use crate::config::CaveConfig;
use crate::content::{ChestTier, CreatureKind};
use crate::creature::Creature;
use crate::room::{DungeonRoom, RoomType};
use crate::types::Pos;

use super::loot::chest_loot;
use super::seed::StreamRoller;

// Stream bases, one block per strategy so rolls never interleave.
const STREAM_STANDARD: u64 = 1000;
const STREAM_TREASURE_ROOM: u64 = 2000;
const STREAM_BOSS_CHAMBER: u64 = 2200;
const STREAM_MAZE: u64 = 2400;
const STREAM_TRAP_ROOM: u64 = 2600;
const STREAM_ENCHANTING: u64 = 2800;
const STREAM_ELITE_CHAMBER: u64 = 3000;
const STREAM_PUZZLE: u64 = 3200;
const STREAM_ARMORY: u64 = 3400;
const STREAM_CHEST_LOOT: u64 = 6000;
/// Streams reserved per chest for its loot rolls.
const CHEST_LOOT_STRIDE: u64 = 32;

pub(crate) struct PopulateContext<'a> {
    pub(crate) depth: u8,
    pub(crate) room_seed: u64,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) monsters: usize,
    pub(crate) treasures: usize,
    pub(crate) minerals: usize,
    pub(crate) config: &'a CaveConfig,
}

pub(crate) fn populate(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    match room.room_type {
        RoomType::Standard => populate_standard(room, ctx),
        RoomType::TreasureRoom => populate_treasure_room(room, ctx),
        RoomType::BossChamber => populate_boss_chamber(room, ctx),
        RoomType::Maze => populate_maze(room, ctx),
        RoomType::TrapRoom => populate_trap_room(room, ctx),
        RoomType::EnchantingRoom => populate_enchanting_room(room, ctx),
        RoomType::EliteChamber => populate_elite_chamber(room, ctx),
        RoomType::PuzzleRoom => populate_puzzle_room(room, ctx),
        RoomType::Armory => populate_armory(room, ctx),
    }
}

/// Uniform mix of creatures, chests, and minerals across the interior.
fn populate_standard(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    let mut roller = StreamRoller::new(ctx.room_seed, STREAM_STANDARD);
    let pool = basic_pool(ctx.depth, ctx.config);

    for _ in 0..ctx.monsters {
        let pos = roll_point(&mut roller, ctx, 50.0);
        spawn_basic_or_elite(room, ctx, &mut roller, &pool, pos);
    }

    for ordinal in 0..ctx.treasures {
        let pos = roll_point(&mut roller, ctx, 40.0);
        let tier = standard_chest_tier(&mut roller, ctx.depth, ctx.config);
        spawn_chest(room, ctx, pos, tier, ordinal);
    }

    for _ in 0..ctx.minerals {
        let pos = roll_point(&mut roller, ctx, 30.0);
        room.add_mineral(pos);
    }
}

/// Chests cluster near the center; a small guard detail patrols the rest.
fn populate_treasure_room(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    let mut roller = StreamRoller::new(ctx.room_seed, STREAM_TREASURE_ROOM);
    let center_x = ctx.width / 2.0;
    let center_y = ctx.height / 2.0;

    let hoard = ctx.treasures * 3;
    for ordinal in 0..hoard {
        let x = (center_x + roller.next_range_f32(-100.0, 100.0)).clamp(40.0, ctx.width - 40.0);
        let y = (center_y + roller.next_range_f32(-80.0, 80.0)).clamp(40.0, ctx.height - 40.0);
        spawn_chest(room, ctx, Pos::new(x, y), ChestTier::Common, ordinal);
    }

    let guards = (ctx.monsters / 3).max(1);
    for _ in 0..guards {
        let pos = roll_point(&mut roller, ctx, 50.0);
        room.add_creature(Creature::basic(CreatureKind::CaveLurker, pos));
    }
}

/// Minions keep clear of the center where the warden stands; rewards sit at
/// four quadrant points plus two midline points.
fn populate_boss_chamber(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    let mut roller = StreamRoller::new(ctx.room_seed, STREAM_BOSS_CHAMBER);
    let center_x = ctx.width / 2.0;
    let center_y = ctx.height / 2.0;

    let minions = (ctx.monsters / 3).max(2);
    for _ in 0..minions {
        let pos = roll_point(&mut roller, ctx, 80.0);
        if (pos.x - center_x).abs() < 100.0 && (pos.y - center_y).abs() < 100.0 {
            continue;
        }
        room.add_creature(Creature::basic(CreatureKind::CaveLurker, pos));
    }

    let reward_positions = [
        Pos::new(ctx.width / 4.0, ctx.height / 4.0),
        Pos::new(3.0 * ctx.width / 4.0, ctx.height / 4.0),
        Pos::new(ctx.width / 4.0, 3.0 * ctx.height / 4.0),
        Pos::new(3.0 * ctx.width / 4.0, 3.0 * ctx.height / 4.0),
        Pos::new(center_x, ctx.height / 6.0),
        Pos::new(center_x, 5.0 * ctx.height / 6.0),
    ];
    let tier = premium_chest_tier(ctx.depth, ctx.config);
    let rewards = (ctx.treasures * 2).min(reward_positions.len());
    for (ordinal, pos) in reward_positions.into_iter().take(rewards).enumerate() {
        spawn_chest(room, ctx, pos, tier, ordinal);
    }

    for _ in 0..ctx.minerals / 2 {
        let pos = roll_point(&mut roller, ctx, 60.0);
        room.add_mineral(pos);
    }
}

/// Mineral "walls" lean toward the edges, chests hide in the corners, and
/// only a scattering of creatures prowls the lanes.
fn populate_maze(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    let mut roller = StreamRoller::new(ctx.room_seed, STREAM_MAZE);

    for _ in 0..ctx.minerals * 2 {
        let pos = if roller.next_f32() < 0.3 {
            roll_edge_point(&mut roller, ctx)
        } else {
            roll_point(&mut roller, ctx, 30.0)
        };
        room.add_mineral(pos);
    }

    let prowlers = (ctx.monsters / 3).max(1);
    for _ in 0..prowlers {
        let pos = roll_point(&mut roller, ctx, 60.0);
        room.add_creature(Creature::basic(CreatureKind::CaveLurker, pos));
    }

    for ordinal in 0..ctx.treasures {
        let pos = roll_corner_point(&mut roller, ctx);
        spawn_chest(room, ctx, pos, ChestTier::Common, ordinal);
    }
}

/// One bait chest dead-center with exactly four guards at fixed flanking
/// offsets; the remaining chests scatter.
fn populate_trap_room(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    let mut roller = StreamRoller::new(ctx.room_seed, STREAM_TRAP_ROOM);
    let center = Pos::new(ctx.width / 2.0, ctx.height / 2.0);
    spawn_chest(room, ctx, center, ChestTier::Common, 0);

    for (dx, dy) in [(-80.0, -80.0), (80.0, -80.0), (-80.0, 80.0), (80.0, 80.0)] {
        let pos = Pos::new(center.x + dx, center.y + dy);
        room.add_creature(Creature::basic(CreatureKind::CaveLurker, pos));
    }

    for ordinal in 1..ctx.treasures {
        let pos = roll_point(&mut roller, ctx, 40.0);
        spawn_chest(room, ctx, pos, ChestTier::Common, ordinal);
    }
}

/// An enchanting table at the center with elite guardians kept outside an
/// 80 px exclusion box around it.
fn populate_enchanting_room(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    let mut roller = StreamRoller::new(ctx.room_seed, STREAM_ENCHANTING);
    let table = Pos::new(ctx.width / 2.0, ctx.height / 2.0);
    room.enchanting_table = Some(table);

    let guardians = (ctx.monsters / 4).max(1);
    for _ in 0..guardians {
        let pos = roll_point(&mut roller, ctx, 100.0);
        if (pos.x - table.x).abs() < 80.0 && (pos.y - table.y).abs() < 80.0 {
            continue;
        }
        room.add_creature(Creature::elite(CreatureKind::EliteSkeleton, pos, ctx.depth));
    }

    let tier = if ctx.depth >= ctx.config.ultra_deep_threshold {
        ChestTier::Epic
    } else {
        ChestTier::Common
    };
    for ordinal in 0..ctx.treasures / 2 {
        let pos = roll_point(&mut roller, ctx, 60.0);
        spawn_chest(room, ctx, pos, tier, ordinal);
    }

    for _ in 0..ctx.minerals / 2 {
        let pos = roll_point(&mut roller, ctx, 40.0);
        room.add_mineral(pos);
    }
}

/// Every creature is an elite; high-tier rewards match the danger.
fn populate_elite_chamber(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    let mut roller = StreamRoller::new(ctx.room_seed, STREAM_ELITE_CHAMBER);
    let elite_kinds = [CreatureKind::EliteSkeleton, CreatureKind::ShadowBeast];

    let elites = (ctx.monsters / 2).max(2);
    for _ in 0..elites {
        let pos = roll_point(&mut roller, ctx, 80.0);
        let kind = *roller.pick(&elite_kinds);
        room.add_creature(Creature::elite(kind, pos, ctx.depth));
    }

    if roller.next_f32() < ctx.config.mini_boss_rate {
        let x = ctx.width / 2.0 + roller.next_range_f32(-100.0, 100.0);
        let y = ctx.height / 2.0 + roller.next_range_f32(-100.0, 100.0);
        let mini = Creature::warden(
            Pos::new(x, y),
            ctx.depth,
            ctx.config.boss_health_multiplier,
            ctx.config.boss_damage_multiplier,
        );
        room.mini_boss = Some(room.add_creature(mini));
    }

    let tier = premium_chest_tier(ctx.depth, ctx.config);
    for ordinal in 0..ctx.treasures {
        let pos = roll_point(&mut roller, ctx, 50.0);
        spawn_chest(room, ctx, pos, tier, ordinal);
    }
}

/// Three creature clusters at fixed thirds guard a center-clustered reward.
fn populate_puzzle_room(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    let mut roller = StreamRoller::new(ctx.room_seed, STREAM_PUZZLE);
    let cluster_centers = [
        Pos::new(ctx.width / 4.0, ctx.height / 4.0),
        Pos::new(3.0 * ctx.width / 4.0, ctx.height / 4.0),
        Pos::new(ctx.width / 2.0, 3.0 * ctx.height / 4.0),
    ];

    let per_cluster = ctx.monsters / 3;
    for cluster in cluster_centers {
        for _ in 0..per_cluster {
            let x = (cluster.x + roller.next_range_f32(-60.0, 60.0)).clamp(50.0, ctx.width - 50.0);
            let y =
                (cluster.y + roller.next_range_f32(-60.0, 60.0)).clamp(50.0, ctx.height - 50.0);
            room.add_creature(Creature::basic(CreatureKind::CaveLurker, Pos::new(x, y)));
        }
    }

    let center = Pos::new(ctx.width / 2.0, ctx.height / 2.0);
    for ordinal in 0..ctx.treasures {
        let x = center.x + roller.next_range_f32(-40.0, 40.0);
        let y = center.y + roller.next_range_f32(-40.0, 40.0);
        spawn_chest(room, ctx, Pos::new(x, y), ChestTier::Common, ordinal);
    }
}

/// Heavily guarded equipment cache: creatures lean elite, chests sit in a
/// fixed grid and lean toward higher tiers.
fn populate_armory(room: &mut DungeonRoom, ctx: &PopulateContext<'_>) {
    let mut roller = StreamRoller::new(ctx.room_seed, STREAM_ARMORY);
    let elite_kinds = [CreatureKind::EliteSkeleton, CreatureKind::ShadowBeast];

    for _ in 0..ctx.monsters {
        let pos = roll_point(&mut roller, ctx, 60.0);
        if roller.next_f32() < 0.6 {
            let kind = *roller.pick(&elite_kinds);
            room.add_creature(Creature::elite(kind, pos, ctx.depth));
        } else {
            room.add_creature(Creature::basic(CreatureKind::CaveLurker, pos));
        }
    }

    let rows = 3usize;
    let cols = (ctx.treasures / rows).max(1);
    let mut ordinal = 0;
    for row in 0..rows {
        for col in 0..cols {
            let x = if cols > 1 {
                100.0 + col as f32 * (ctx.width - 200.0) / (cols - 1) as f32
            } else {
                ctx.width / 2.0
            };
            let y = if rows > 1 {
                150.0 + row as f32 * (ctx.height - 300.0) / (rows - 1) as f32
            } else {
                ctx.height / 2.0
            };
            let tier = armory_chest_tier(&mut roller, ctx.depth, ctx.config);
            spawn_chest(room, ctx, Pos::new(x, y), tier, ordinal);
            ordinal += 1;
        }
    }

    for _ in 0..ctx.minerals / 2 {
        let pos = roll_point(&mut roller, ctx, 50.0);
        room.add_mineral(pos);
    }
}

/// Basic creature pool for a depth; deeper floors mix in elite kinds as
/// ordinary spawns.
fn basic_pool(depth: u8, config: &CaveConfig) -> Vec<CreatureKind> {
    let mut pool = vec![CreatureKind::CaveLurker, CreatureKind::CaveSpider];
    if depth >= config.deep_layer_threshold {
        pool.push(CreatureKind::EliteSkeleton);
    }
    if depth >= config.ultra_deep_threshold {
        pool.push(CreatureKind::ShadowBeast);
    }
    pool
}

fn spawn_basic_or_elite(
    room: &mut DungeonRoom,
    ctx: &PopulateContext<'_>,
    roller: &mut StreamRoller,
    pool: &[CreatureKind],
    pos: Pos,
) {
    if roller.next_f32() < ctx.config.elite_monster_rate {
        let elite_kinds = [CreatureKind::EliteSkeleton, CreatureKind::ShadowBeast];
        let kind = *roller.pick(&elite_kinds);
        room.add_creature(Creature::elite(kind, pos, ctx.depth));
    } else {
        let kind = *roller.pick(pool);
        room.add_creature(Creature::basic(kind, pos));
    }
}

fn spawn_chest(
    room: &mut DungeonRoom,
    ctx: &PopulateContext<'_>,
    pos: Pos,
    tier: ChestTier,
    ordinal: usize,
) {
    let stream_base = STREAM_CHEST_LOOT + ordinal as u64 * CHEST_LOOT_STRIDE;
    let loot = chest_loot(ctx.depth, ctx.room_seed, stream_base, ctx.config);
    room.add_treasure(pos, tier, loot);
}

fn standard_chest_tier(roller: &mut StreamRoller, depth: u8, config: &CaveConfig) -> ChestTier {
    if depth >= config.legendary_threshold {
        *roller.pick(&[ChestTier::Common, ChestTier::Epic, ChestTier::Legendary])
    } else if depth >= config.ultra_deep_threshold {
        *roller.pick(&[ChestTier::Common, ChestTier::Epic])
    } else {
        ChestTier::Common
    }
}

fn armory_chest_tier(roller: &mut StreamRoller, depth: u8, config: &CaveConfig) -> ChestTier {
    if depth >= config.legendary_threshold {
        *roller.pick(&[ChestTier::Epic, ChestTier::Legendary])
    } else if depth >= config.ultra_deep_threshold {
        ChestTier::Epic
    } else {
        ChestTier::Common
    }
}

fn premium_chest_tier(depth: u8, config: &CaveConfig) -> ChestTier {
    if depth >= config.legendary_threshold {
        ChestTier::Legendary
    } else if depth >= config.ultra_deep_threshold {
        ChestTier::Epic
    } else {
        ChestTier::Common
    }
}

fn roll_point(roller: &mut StreamRoller, ctx: &PopulateContext<'_>, margin: f32) -> Pos {
    let x = roller.next_range_f32(margin, ctx.width - margin);
    let y = roller.next_range_f32(margin, ctx.height - margin);
    Pos::new(x, y)
}

/// A point hugging one of the four room edges, for maze wall lines.
fn roll_edge_point(roller: &mut StreamRoller, ctx: &PopulateContext<'_>) -> Pos {
    if roller.next_f32() < 0.5 {
        let x = if roller.next_f32() < 0.5 {
            roller.next_range_f32(20.0, 60.0)
        } else {
            roller.next_range_f32(ctx.width - 60.0, ctx.width - 20.0)
        };
        Pos::new(x, roller.next_range_f32(30.0, ctx.height - 30.0))
    } else {
        let y = if roller.next_f32() < 0.5 {
            roller.next_range_f32(20.0, 60.0)
        } else {
            roller.next_range_f32(ctx.height - 60.0, ctx.height - 20.0)
        };
        Pos::new(roller.next_range_f32(30.0, ctx.width - 30.0), y)
    }
}

fn roll_corner_point(roller: &mut StreamRoller, ctx: &PopulateContext<'_>) -> Pos {
    let corner = roller.next_usize(0, 3);
    let x = if corner % 2 == 0 {
        roller.next_range_f32(20.0, 80.0)
    } else {
        roller.next_range_f32(ctx.width - 80.0, ctx.width - 20.0)
    };
    let y = if corner < 2 {
        roller.next_range_f32(20.0, 80.0)
    } else {
        roller.next_range_f32(ctx.height - 80.0, ctx.height - 20.0)
    };
    Pos::new(x, y)
}
