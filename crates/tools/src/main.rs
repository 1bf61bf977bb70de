//! Headless delve driver: generates rooms, auto-fights through them with a
//! scripted player, and prints the event stream plus a final snapshot hash.
//! Useful for eyeballing generation output and catching invariant breaks
//! without a renderer.

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use delve_core::{
    CaveConfig, CreatureId, DungeonController, GameEvent, Inventory, PlayerView, Pos, keys,
};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed for dungeon generation
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Deepest level to clear before stopping
    #[arg(short, long, default_value_t = 2)]
    depth: u8,
    /// Player attack damage per strike
    #[arg(short, long, default_value_t = 25)]
    attack: i32,
    /// Path to a JSON file with configuration overrides
    #[arg(short, long)]
    config: Option<String>,
}

/// Unbounded bag inventory for the scripted player.
#[derive(Default)]
struct SimInventory {
    items: BTreeMap<String, u32>,
}

impl SimInventory {
    fn count(&self, id: &str) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }
}

impl Inventory for SimInventory {
    fn has_item(&self, id: &str, qty: u32) -> bool {
        self.count(id) >= qty
    }

    fn remove_item(&mut self, id: &str, qty: u32) -> bool {
        if self.count(id) < qty {
            return false;
        }
        *self.items.get_mut(id).expect("checked above") -= qty;
        true
    }

    fn add_item(&mut self, id: &str, qty: u32) -> u32 {
        *self.items.entry(id.to_string()).or_insert(0) += qty;
        qty
    }
}

fn load_config(path: &str) -> Result<CaveConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {path}"))?;
    let config: CaveConfig =
        serde_json::from_str(&data).with_context(|| format!("bad config JSON in {path}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CaveConfig::default(),
    };
    let rooms_per_level = config.rooms_per_level;

    let mut controller = DungeonController::new(args.seed, config)
        .map_err(|error| anyhow::anyhow!("invalid configuration: {error:?}"))?;
    let mut inventory = SimInventory::default();
    inventory.add_item(keys::TORCH, 999);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("delving with seed {} down to depth {}", args.seed, args.depth);

    for depth in 1..=args.depth {
        for room_id in 0..rooms_per_level {
            run_room(&mut controller, &mut inventory, &mut rng, depth, room_id, args.attack)?;
        }
        println!(
            "depth {depth} cleared (keys held: {})",
            inventory.count(keys::DEPTH_KEY)
        );
    }

    println!("final snapshot hash: {:016x}", controller.snapshot_hash());
    Ok(())
}

fn run_room(
    controller: &mut DungeonController,
    inventory: &mut SimInventory,
    rng: &mut ChaCha8Rng,
    depth: u8,
    room_id: u8,
    attack: i32,
) -> Result<()> {
    let room = controller
        .enter_cave(depth, room_id)
        .with_context(|| format!("depth {depth} room {room_id} refused entry"))?;
    println!(
        "entered depth {depth} room {room_id}: {:?}, {} creatures, {} chests, {} minerals",
        room.room_type,
        room.creatures.len(),
        room.treasures.len(),
        room.minerals.len()
    );
    ensure!(controller.use_torch(inventory), "out of torches");

    let mut attacks_taken = 0_u32;
    let mut damage_taken = 0_i64;

    for step in 0.. {
        if step >= 200_000 {
            bail!("room {depth}-{room_id} did not clear within the step budget");
        }

        let Some(target) = pick_target(controller, rng) else {
            break;
        };
        let player_pos = {
            let room = controller.current_room().expect("in cave");
            room.creatures[target].center()
        };

        // Walk onto the target and trade blows.
        let events =
            controller.tick(0.016, &PlayerView { pos: player_pos });
        report(&events, &mut attacks_taken, &mut damage_taken);

        controller.strike_creature(target, attack, inventory);

        // Keep the light topped up rather than eating darkness damage.
        if controller.lighting().remaining_time() < 1.0 {
            ensure!(controller.use_torch(inventory), "out of torches");
        }

        check_invariants(controller)?;
    }

    // Drain completion events buffered by the last kill.
    let events = controller.tick(0.016, &PlayerView { pos: Pos::new(0.0, 0.0) });
    report(&events, &mut attacks_taken, &mut damage_taken);

    println!("  cleared after taking {attacks_taken} hits ({damage_taken} damage)");
    controller.exit_cave();
    Ok(())
}

fn pick_target(controller: &DungeonController, rng: &mut ChaCha8Rng) -> Option<CreatureId> {
    let room = controller.current_room()?;
    if room.creatures.is_empty() {
        return None;
    }
    let ids: Vec<CreatureId> = room.creatures.keys().collect();
    Some(ids[(rng.next_u64() as usize) % ids.len()])
}

fn report(events: &[GameEvent], attacks_taken: &mut u32, damage_taken: &mut i64) {
    for event in events {
        match event {
            GameEvent::CreatureAttack { damage, .. } => {
                *attacks_taken += 1;
                *damage_taken += *damage as i64;
            }
            GameEvent::DarknessDamage { amount } => {
                *damage_taken += *amount as i64;
            }
            GameEvent::TorchExtinguished => println!("  the torch gutters out"),
            GameEvent::BossPhaseChanged { phase } => {
                println!("  the warden escalates to phase {}", phase.rank());
            }
            GameEvent::RoomCompleted { depth, room_id } => {
                println!("  room {depth}-{room_id} completed");
            }
            GameEvent::DepthUnlocked { depth } => {
                println!("  depth {depth} unlocked");
            }
        }
    }
}

fn check_invariants(controller: &DungeonController) -> Result<()> {
    let Some(room) = controller.current_room() else {
        return Ok(());
    };
    for (_, creature) in &room.creatures {
        ensure!(
            creature.pos.x >= 0.0
                && creature.pos.x <= room.width
                && creature.pos.y >= 0.0
                && creature.pos.y <= room.height,
            "creature escaped the room at {:?}",
            creature.pos
        );
        ensure!(creature.health > 0, "dead creature still in the room");
        ensure!(creature.health <= creature.max_health, "health above max");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn config_overrides_load_from_json() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cave.json");

        let config =
            CaveConfig { max_depth: 5, torch_duration: 30.0, ..CaveConfig::default() };
        fs::write(&path, serde_json::to_string_pretty(&config).expect("serializable"))
            .expect("written");

        let loaded = load_config(path.to_str().expect("utf8 path")).expect("loads");
        assert_eq!(loaded.max_depth, 5);
        assert_eq!(loaded.torch_duration, 30.0);
        assert_eq!(loaded.rooms_per_level, CaveConfig::default().rooms_per_level);
    }

    #[test]
    fn partial_override_files_fall_back_to_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cave.json");
        fs::write(&path, r#"{ "monster_spawn_rate": 0.25 }"#).expect("written");

        let loaded = load_config(path.to_str().expect("utf8 path")).expect("loads");
        assert_eq!(loaded.monster_spawn_rate, 0.25);
        assert_eq!(loaded.max_depth, CaveConfig::default().max_depth);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cave.json");
        fs::write(&path, "not json").expect("written");
        assert!(load_config(path.to_str().expect("utf8 path")).is_err());
    }
}
