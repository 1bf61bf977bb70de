//! Injected dungeon configuration and its startup validation.
//! This module exists so tuning values reach the generator and lighting model
//! as read-only inputs instead of hardcoded constants.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    pub max_depth: u8,
    pub rooms_per_level: u8,
    pub room_width: f32,
    pub room_height: f32,

    pub monster_spawn_rate: f32,
    pub treasure_spawn_rate: f32,
    pub mineral_spawn_rate: f32,
    pub elite_monster_rate: f32,
    pub mini_boss_rate: f32,
    pub enchanting_room_chance: f32,

    pub torch_duration: f32,
    pub darkness_damage: i32,
    pub base_darkness: f32,
    pub light_radius: f32,
    pub darkness_visibility: f32,
    pub max_visibility: f32,

    pub deep_layer_threshold: u8,
    pub ultra_deep_threshold: u8,
    pub legendary_threshold: u8,
    pub epic_threshold: u8,
    pub deep_treasure_multiplier: f32,
    pub ultra_deep_treasure_multiplier: f32,
    pub legendary_treasure_multiplier: f32,
    pub epic_treasure_multiplier: f32,

    pub boss_health_multiplier: f32,
    pub boss_damage_multiplier: f32,

    /// Success probability per enchantment level 1..=5.
    pub enchant_success_rates: [f32; 5],
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            rooms_per_level: 3,
            room_width: 1400.0,
            room_height: 1000.0,
            monster_spawn_rate: 1.2,
            treasure_spawn_rate: 0.8,
            mineral_spawn_rate: 1.0,
            elite_monster_rate: 0.3,
            mini_boss_rate: 0.4,
            enchanting_room_chance: 0.15,
            torch_duration: 240.0,
            darkness_damage: 2,
            base_darkness: 0.8,
            light_radius: 120.0,
            darkness_visibility: 30.0,
            max_visibility: 250.0,
            deep_layer_threshold: 5,
            ultra_deep_threshold: 10,
            legendary_threshold: 15,
            epic_threshold: 20,
            deep_treasure_multiplier: 2.5,
            ultra_deep_treasure_multiplier: 4.0,
            legendary_treasure_multiplier: 8.0,
            epic_treasure_multiplier: 15.0,
            boss_health_multiplier: 5.0,
            boss_damage_multiplier: 3.0,
            enchant_success_rates: [0.9, 0.7, 0.5, 0.3, 0.1],
        }
    }
}

/// A misconfiguration is a programmer error: callers validate once at startup
/// and treat failure as fatal rather than recovering at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NoDepths,
    TooFewRooms,
    RoomTooSmall,
    NegativeSpawnRate,
    NonPositiveLighting,
    UnorderedDepthThresholds,
    NonPositiveMultiplier,
    ProbabilityOutOfRange,
}

impl CaveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::NoDepths);
        }
        // Room ids 0, 1, and last have distinct generation roles.
        if self.rooms_per_level < 2 {
            return Err(ConfigError::TooFewRooms);
        }
        if self.room_width < 400.0 || self.room_height < 400.0 {
            return Err(ConfigError::RoomTooSmall);
        }
        if self.monster_spawn_rate < 0.0
            || self.treasure_spawn_rate < 0.0
            || self.mineral_spawn_rate < 0.0
        {
            return Err(ConfigError::NegativeSpawnRate);
        }
        if self.torch_duration <= 0.0
            || self.light_radius <= 0.0
            || self.darkness_visibility <= 0.0
            || self.max_visibility <= 0.0
            || !(0.0..=1.0).contains(&self.base_darkness)
        {
            return Err(ConfigError::NonPositiveLighting);
        }
        if !(self.deep_layer_threshold < self.ultra_deep_threshold
            && self.ultra_deep_threshold < self.legendary_threshold
            && self.legendary_threshold < self.epic_threshold)
        {
            return Err(ConfigError::UnorderedDepthThresholds);
        }
        if self.deep_treasure_multiplier <= 0.0
            || self.ultra_deep_treasure_multiplier <= 0.0
            || self.legendary_treasure_multiplier <= 0.0
            || self.epic_treasure_multiplier <= 0.0
            || self.boss_health_multiplier <= 0.0
            || self.boss_damage_multiplier <= 0.0
        {
            return Err(ConfigError::NonPositiveMultiplier);
        }
        let probabilities = [
            self.elite_monster_rate,
            self.mini_boss_rate,
            self.enchanting_room_chance,
        ];
        if probabilities
            .iter()
            .chain(self.enchant_success_rates.iter())
            .any(|p| !(0.0..=1.0).contains(p))
        {
            return Err(ConfigError::ProbabilityOutOfRange);
        }
        Ok(())
    }

    pub fn last_room_id(&self) -> u8 {
        self.rooms_per_level - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(CaveConfig::default().validate(), Ok(()));
    }

    #[test]
    fn unordered_thresholds_are_rejected() {
        let config = CaveConfig { deep_layer_threshold: 12, ..CaveConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::UnorderedDepthThresholds));
    }

    #[test]
    fn negative_spawn_rate_is_rejected() {
        let config = CaveConfig { mineral_spawn_rate: -0.1, ..CaveConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::NegativeSpawnRate));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let config = CaveConfig { elite_monster_rate: 1.5, ..CaveConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::ProbabilityOutOfRange));
    }

    #[test]
    fn single_room_levels_are_rejected() {
        let config = CaveConfig { rooms_per_level: 1, ..CaveConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::TooFewRooms));
    }
}
