//! Creature data and the per-tick behavior state machine.
//! This module exists to keep movement, aggression, and boss phase escalation
//! independent from placement and rendering. Damage events are returned to
//! the caller; applying them to the player happens elsewhere.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::content::{CreatureKind, creature_stats};
use crate::types::{BossPhase, CreatureId, Pos};

/// Movement step scale: speeds are tuned against a 60 ticks/second baseline.
const BASE_TICK_RATE: f32 = 60.0;
/// Darkness widens a regular creature's pursuit radius by this factor.
const DARKNESS_CHASE_FACTOR: f32 = 1.5;
/// The warden hunts even further into the dark.
const WARDEN_DARKNESS_CHASE_FACTOR: f32 = 1.8;
const ENRAGE_CHASE_FACTOR: f32 = 1.5;
/// Depth scaling per level for elites and the warden.
const ELITE_DEPTH_SCALE: f32 = 0.3;
const WARDEN_DEPTH_SCALE: f32 = 0.5;
/// Erratic movement for an enraged warden: rotation band and roll chance.
const ERRATIC_ANGLE: f32 = 0.5;
const ERRATIC_CHANCE: f32 = 0.3;
/// Creatures keep this margin to the room walls.
const WALL_MARGIN: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiState {
    Patrolling,
    Chasing,
    Attacking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossState {
    pub phase: BossPhase,
    pub is_enraged: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    pub id: CreatureId,
    pub kind: CreatureKind,
    pub pos: Pos,
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    pub attack_range: f32,
    pub chase_range: f32,
    pub attack_cooldown: f32,
    pub last_attack_at: f64,
    pub move_speed: f32,
    pub is_elite: bool,
    pub state: AiState,
    pub boss: Option<BossState>,
}

impl Creature {
    pub fn basic(kind: CreatureKind, pos: Pos) -> Self {
        let stats = creature_stats(kind);
        Self {
            id: CreatureId::default(),
            kind,
            pos,
            width: stats.width,
            height: stats.height,
            health: stats.health,
            max_health: stats.health,
            damage: stats.damage,
            attack_range: stats.attack_range,
            chase_range: stats.chase_range,
            attack_cooldown: stats.attack_cooldown,
            last_attack_at: f64::NEG_INFINITY,
            move_speed: stats.move_speed,
            is_elite: false,
            state: AiState::Patrolling,
            boss: None,
        }
    }

    /// Elite variant of a kind, with health and damage scaled by depth.
    pub fn elite(kind: CreatureKind, pos: Pos, depth: u8) -> Self {
        let scale = 1.0 + (depth.saturating_sub(1)) as f32 * ELITE_DEPTH_SCALE;
        let mut creature = Self::basic(kind, pos);
        creature.max_health = (creature.max_health as f32 * scale) as i32;
        creature.health = creature.max_health;
        creature.damage = (creature.damage as f32 * scale) as i32;
        creature.is_elite = true;
        creature
    }

    /// The depth guardian. Health and damage scale with depth and the boss
    /// multipliers from configuration; starts in phase one, not enraged.
    pub fn warden(
        pos: Pos,
        depth: u8,
        health_multiplier: f32,
        damage_multiplier: f32,
    ) -> Self {
        let scale = 1.0 + (depth.saturating_sub(1)) as f32 * WARDEN_DEPTH_SCALE;
        let mut creature = Self::basic(CreatureKind::DepthWarden, pos);
        creature.max_health = (creature.max_health as f32 * scale * health_multiplier) as i32;
        creature.health = creature.max_health;
        creature.damage = (creature.damage as f32 * scale * damage_multiplier) as i32;
        creature.boss = Some(BossState { phase: BossPhase::One, is_enraged: false });
        creature
    }

    pub fn center(&self) -> Pos {
        Pos::new(self.pos.x + self.width / 2.0, self.pos.y + self.height / 2.0)
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }
}

/// Inputs a creature needs for one behavior step.
#[derive(Clone, Copy, Debug)]
pub struct AiContext {
    pub clock: f64,
    pub delta_time: f32,
    pub player_pos: Pos,
    pub player_in_darkness: bool,
    pub room_width: f32,
    pub room_height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CreatureUpdate {
    pub attack_damage: Option<i32>,
    pub phase_changed: Option<BossPhase>,
}

/// Runs one tick of the state machine: phase escalation, distance-gated state
/// transitions, pursuit movement, and cooldown-limited attacks.
pub fn update_creature(
    creature: &mut Creature,
    ctx: &AiContext,
    rng: &mut ChaCha8Rng,
) -> CreatureUpdate {
    let phase_changed = advance_boss_phase(creature);

    let center = creature.center();
    let dx = ctx.player_pos.x - center.x;
    let dy = ctx.player_pos.y - center.y;
    let distance = (dx * dx + dy * dy).sqrt();

    let chase_range = effective_chase_range(creature, ctx.player_in_darkness);
    creature.state = if distance <= creature.attack_range {
        AiState::Attacking
    } else if distance <= chase_range {
        AiState::Chasing
    } else {
        AiState::Patrolling
    };

    if creature.state != AiState::Patrolling && distance > 0.0 {
        step_towards_player(creature, dx, dy, distance, ctx, rng);
    }

    let mut attack_damage = None;
    if creature.state == AiState::Attacking
        && ctx.clock - creature.last_attack_at >= creature.attack_cooldown as f64
    {
        creature.last_attack_at = ctx.clock;
        attack_damage = Some(creature.damage);
    }

    CreatureUpdate { attack_damage, phase_changed }
}

/// Phase transitions are one-directional: once a health-ratio threshold has
/// been crossed the phase sticks, even if the creature were healed.
fn advance_boss_phase(creature: &mut Creature) -> Option<BossPhase> {
    let boss = creature.boss?;
    let health_ratio = creature.health as f32 / creature.max_health.max(1) as f32;

    let next = if health_ratio <= 0.2 && boss.phase < BossPhase::Three {
        BossPhase::Three
    } else if health_ratio <= 0.5 && boss.phase < BossPhase::Two {
        BossPhase::Two
    } else {
        return None;
    };

    creature.boss = Some(BossState { phase: next, is_enraged: true });
    match next {
        BossPhase::Two => {
            creature.move_speed = 2.5;
            creature.attack_cooldown = 0.7;
        }
        BossPhase::Three => {
            creature.move_speed = 3.0;
            creature.attack_cooldown = 0.5;
        }
        BossPhase::One => {}
    }
    Some(next)
}

fn effective_chase_range(creature: &Creature, player_in_darkness: bool) -> f32 {
    let mut range = creature.chase_range;
    if player_in_darkness {
        range *= if creature.is_boss() {
            WARDEN_DARKNESS_CHASE_FACTOR
        } else {
            DARKNESS_CHASE_FACTOR
        };
    }
    if creature.boss.is_some_and(|b| b.is_enraged) {
        range *= ENRAGE_CHASE_FACTOR;
    }
    range
}

fn step_towards_player(
    creature: &mut Creature,
    dx: f32,
    dy: f32,
    distance: f32,
    ctx: &AiContext,
    rng: &mut ChaCha8Rng,
) {
    let step = creature.move_speed * ctx.delta_time * BASE_TICK_RATE;
    let mut move_x = dx / distance * step;
    let mut move_y = dy / distance * step;

    // An enraged warden circles erratically instead of beelining.
    if creature.boss.is_some_and(|b| b.phase >= BossPhase::Two) && roll_unit(rng) < ERRATIC_CHANCE
    {
        let angle = roll_range(rng, -ERRATIC_ANGLE, ERRATIC_ANGLE);
        let (sin, cos) = angle.sin_cos();
        let rotated_x = move_x * cos - move_y * sin;
        let rotated_y = move_x * sin + move_y * cos;
        move_x = rotated_x;
        move_y = rotated_y;
    }

    // Too close: back off so attackers spread around the player.
    if distance < creature.attack_range * 0.5 {
        move_x = -move_x;
        move_y = -move_y;
    }

    creature.pos.x = (creature.pos.x + move_x)
        .clamp(WALL_MARGIN, ctx.room_width - creature.width - WALL_MARGIN);
    creature.pos.y = (creature.pos.y + move_y)
        .clamp(WALL_MARGIN, ctx.room_height - creature.height - WALL_MARGIN);
}

/// Uniform f32 in [0, 1) from the top 24 bits of one RNG draw.
pub(crate) fn roll_unit(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

pub(crate) fn roll_range(rng: &mut ChaCha8Rng, low: f32, high: f32) -> f32 {
    low + roll_unit(rng) * (high - low)
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn ctx_with_player(player_pos: Pos) -> AiContext {
        AiContext {
            clock: 100.0,
            delta_time: 0.016,
            player_pos,
            player_in_darkness: false,
            room_width: 1400.0,
            room_height: 1000.0,
        }
    }

    fn lurker_at(x: f32, y: f32) -> Creature {
        Creature::basic(CreatureKind::CaveLurker, Pos::new(x, y))
    }

    #[test]
    fn state_follows_distance_bands() {
        let mut rng = rng();

        // Lurker center is (520, 517.5); attack range 50, chase range 150.
        let mut far = lurker_at(500.0, 500.0);
        update_creature(&mut far, &ctx_with_player(Pos::new(900.0, 517.5)), &mut rng);
        assert_eq!(far.state, AiState::Patrolling);

        let mut near = lurker_at(500.0, 500.0);
        update_creature(&mut near, &ctx_with_player(Pos::new(620.0, 517.5)), &mut rng);
        assert_eq!(near.state, AiState::Chasing);

        let mut close = lurker_at(500.0, 500.0);
        update_creature(&mut close, &ctx_with_player(Pos::new(560.0, 517.5)), &mut rng);
        assert_eq!(close.state, AiState::Attacking);
    }

    #[test]
    fn darkness_widens_the_chase_band() {
        let mut rng = rng();
        // 180 px out: beyond the lit chase range (150), inside the dark one (225).
        let player = Pos::new(700.0, 517.5);

        let mut lit = lurker_at(500.0, 500.0);
        update_creature(&mut lit, &ctx_with_player(player), &mut rng);
        assert_eq!(lit.state, AiState::Patrolling);

        let mut dark = lurker_at(500.0, 500.0);
        let mut ctx = ctx_with_player(player);
        ctx.player_in_darkness = true;
        update_creature(&mut dark, &ctx, &mut rng);
        assert_eq!(dark.state, AiState::Chasing);
    }

    #[test]
    fn chasing_moves_toward_the_player() {
        let mut rng = rng();
        let mut creature = lurker_at(500.0, 500.0);
        let before = creature.pos;
        update_creature(&mut creature, &ctx_with_player(Pos::new(650.0, 517.5)), &mut rng);
        assert!(creature.pos.x > before.x);
        assert_eq!(creature.pos.y, before.y);
    }

    #[test]
    fn too_close_backs_away_instead_of_stacking() {
        let mut rng = rng();
        let mut creature = lurker_at(500.0, 500.0);
        let before = creature.pos;
        // 10 px out: inside attack_range * 0.5 = 25.
        update_creature(&mut creature, &ctx_with_player(Pos::new(530.0, 517.5)), &mut rng);
        assert_eq!(creature.state, AiState::Attacking);
        assert!(creature.pos.x < before.x, "should nudge backward");
    }

    #[test]
    fn attack_respects_cooldown_measured_on_the_sim_clock() {
        let mut rng = rng();
        let mut creature = lurker_at(500.0, 500.0);
        let player = Pos::new(540.0, 517.5);

        let mut ctx = ctx_with_player(player);
        let first = update_creature(&mut creature, &ctx, &mut rng);
        assert_eq!(first.attack_damage, Some(creature.damage));

        ctx.clock += 0.5;
        let second = update_creature(&mut creature, &ctx, &mut rng);
        assert_eq!(second.attack_damage, None, "cooldown is 1.5s");

        ctx.clock += 1.2;
        let third = update_creature(&mut creature, &ctx, &mut rng);
        assert!(third.attack_damage.is_some());
    }

    #[test]
    fn warden_phases_escalate_and_never_revert() {
        let mut rng = rng();
        let mut warden = Creature::warden(Pos::new(700.0, 500.0), 1, 5.0, 3.0);
        let ctx = ctx_with_player(Pos::new(100.0, 100.0));
        assert_eq!(warden.boss.unwrap().phase, BossPhase::One);

        warden.health = warden.max_health / 2;
        let update = update_creature(&mut warden, &ctx, &mut rng);
        assert_eq!(update.phase_changed, Some(BossPhase::Two));
        assert!(warden.boss.unwrap().is_enraged);
        assert_eq!(warden.move_speed, 2.5);
        assert_eq!(warden.attack_cooldown, 0.7);

        warden.health = warden.max_health / 5 - 1;
        let update = update_creature(&mut warden, &ctx, &mut rng);
        assert_eq!(update.phase_changed, Some(BossPhase::Three));
        assert_eq!(warden.move_speed, 3.0);
        assert_eq!(warden.attack_cooldown, 0.5);

        // Healing back does not demote the phase.
        warden.health = (warden.max_health as f32 * 0.8) as i32;
        let update = update_creature(&mut warden, &ctx, &mut rng);
        assert_eq!(update.phase_changed, None);
        assert_eq!(warden.boss.unwrap().phase, BossPhase::Three);
    }

    #[test]
    fn phase_skips_straight_to_three_on_a_heavy_hit() {
        let mut rng = rng();
        let mut warden = Creature::warden(Pos::new(700.0, 500.0), 3, 5.0, 3.0);
        warden.health = warden.max_health / 10;
        let update = update_creature(&mut warden, &ctx_with_player(Pos::new(0.0, 0.0)), &mut rng);
        assert_eq!(update.phase_changed, Some(BossPhase::Three));
    }

    #[test]
    fn movement_stays_inside_the_room_walls() {
        let mut rng = rng();
        let mut creature = lurker_at(12.0, 12.0);
        let mut ctx = ctx_with_player(Pos::new(0.0, 0.0));
        ctx.delta_time = 1.0;
        for _ in 0..50 {
            update_creature(&mut creature, &ctx, &mut rng);
            assert!(creature.pos.x >= 10.0);
            assert!(creature.pos.y >= 10.0);
        }
    }

    #[test]
    fn elite_scaling_grows_with_depth() {
        let shallow = Creature::elite(CreatureKind::EliteSkeleton, Pos::new(0.0, 0.0), 1);
        let deep = Creature::elite(CreatureKind::EliteSkeleton, Pos::new(0.0, 0.0), 6);
        assert_eq!(shallow.max_health, 40);
        assert_eq!(deep.max_health, 100);
        assert!(deep.damage > shallow.damage);
        assert!(deep.is_elite);
    }
}
