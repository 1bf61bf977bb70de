pub mod keys {
    pub const DEPTH_KEY: &str = "depth_key";
    pub const TORCH: &str = "torch";
    pub const CAVE_LAMP: &str = "cave_lamp";
    pub const EXPERIENCE_ORB: &str = "experience_orb";

    pub const IRON_INGOT: &str = "iron_ingot";
    pub const STEEL_INGOT: &str = "steel_ingot";
    pub const COPPER_INGOT: &str = "copper_ingot";
    pub const MYTHRIL_INGOT: &str = "mythril_ingot";
    pub const DIAMOND: &str = "diamond";
    pub const RARE_GEM: &str = "rare_gem";
    pub const LEGENDARY_GEM: &str = "legendary_gem";
    pub const COSMIC_CRYSTAL: &str = "cosmic_crystal";
    pub const PHOENIX_FEATHER: &str = "phoenix_feather";
    pub const TREASURE: &str = "treasure";

    pub const STEEL_SWORD: &str = "steel_sword";
    pub const STEEL_ARMOR: &str = "steel_armor";
    pub const DIAMOND_PICKAXE: &str = "diamond_pickaxe";
    pub const ENCHANTED_SWORD: &str = "enchanted_sword";
    pub const DRAGON_ARMOR: &str = "dragon_armor";
    pub const LEGENDARY_SWORD: &str = "legendary_sword";
    pub const ANCIENT_ARMOR: &str = "ancient_armor";
    pub const MAGIC_ORB: &str = "magic_orb";
    pub const DRAGON_SCALE: &str = "dragon_scale";

    pub const HEALTH_POTION: &str = "health_potion";
    pub const ENERGY_POTION: &str = "energy_potion";
    pub const GREATER_HEALTH_POTION: &str = "greater_health_potion";
    pub const GREATER_ENERGY_POTION: &str = "greater_energy_potion";
    pub const LEGENDARY_HEALTH_POTION: &str = "legendary_health_potion";
    pub const ULTIMATE_ENERGY_POTION: &str = "ultimate_energy_potion";
    pub const INVINCIBILITY_POTION: &str = "invincibility_potion";

    pub const BOSS_TROPHY: &str = "boss_trophy";
    pub const ANCIENT_ARTIFACT: &str = "ancient_artifact";
    pub const MAGIC_CRYSTAL: &str = "magic_crystal";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CreatureKind {
    CaveLurker,
    CaveSpider,
    EliteSkeleton,
    ShadowBeast,
    DepthWarden,
}

impl CreatureKind {
    pub fn code(self) -> u8 {
        match self {
            CreatureKind::CaveLurker => 0,
            CreatureKind::CaveSpider => 1,
            CreatureKind::EliteSkeleton => 2,
            CreatureKind::ShadowBeast => 3,
            CreatureKind::DepthWarden => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreatureStats {
    pub health: i32,
    pub damage: i32,
    pub attack_range: f32,
    pub chase_range: f32,
    pub attack_cooldown: f32,
    pub move_speed: f32,
    pub width: f32,
    pub height: f32,
}

pub fn creature_stats(kind: CreatureKind) -> CreatureStats {
    match kind {
        CreatureKind::CaveLurker => CreatureStats {
            health: 25,
            damage: 12,
            attack_range: 50.0,
            chase_range: 150.0,
            attack_cooldown: 1.5,
            move_speed: 1.5,
            width: 40.0,
            height: 35.0,
        },
        CreatureKind::CaveSpider => CreatureStats {
            health: 8,
            damage: 5,
            attack_range: 30.0,
            chase_range: 80.0,
            attack_cooldown: 1.0,
            move_speed: 1.5,
            width: 25.0,
            height: 20.0,
        },
        CreatureKind::EliteSkeleton => CreatureStats {
            health: 40,
            damage: 18,
            attack_range: 55.0,
            chase_range: 180.0,
            attack_cooldown: 1.3,
            move_speed: 1.8,
            width: 45.0,
            height: 40.0,
        },
        CreatureKind::ShadowBeast => CreatureStats {
            health: 35,
            damage: 20,
            attack_range: 45.0,
            chase_range: 160.0,
            attack_cooldown: 1.0,
            move_speed: 1.8,
            width: 50.0,
            height: 35.0,
        },
        CreatureKind::DepthWarden => CreatureStats {
            health: 75,
            damage: 25,
            attack_range: 60.0,
            chase_range: 200.0,
            attack_cooldown: 1.8,
            move_speed: 2.0,
            width: 60.0,
            height: 50.0,
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChestTier {
    Common,
    Epic,
    Legendary,
}

impl ChestTier {
    pub fn code(self) -> u8 {
        match self {
            ChestTier::Common => 0,
            ChestTier::Epic => 1,
            ChestTier::Legendary => 2,
        }
    }
}
