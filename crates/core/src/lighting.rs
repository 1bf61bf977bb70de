//! Light-source decay, darkness damage cadence, and perceivability.
//! This module exists to keep every sight-related fact (darkness level,
//! visibility radius, per-object opacity) in one deterministic place.
//! It does not own rendering or player damage application.

use crate::config::CaveConfig;

/// Seconds of remaining light over which brightness fades back toward the
/// room's base darkness.
const LIGHT_FADE_WINDOW: f32 = 60.0;
/// Fraction of base darkness a fresh light source can cancel.
const LIGHT_STRENGTH_CAP: f32 = 0.7;
/// Darkness level maps onto a 0..=200 shroud alpha, leaving objects faintly
/// silhouetted even in full dark.
const SHROUD_ALPHA_SPAN: f32 = 200.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightingTick {
    pub extinguished: bool,
    pub darkness_damage: Option<i32>,
}

/// Player-carried light plus the darkness damage timer.
#[derive(Clone, Debug, Default)]
pub struct LightingModel {
    remaining_time: f32,
    damage_timer: f32,
}

impl LightingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining_time(&self) -> f32 {
        self.remaining_time
    }

    pub fn is_lit(&self) -> bool {
        self.remaining_time > 0.0
    }

    pub fn add_light(&mut self, seconds: f32) {
        self.remaining_time += seconds;
    }

    /// Resets light and timers on room exit.
    pub fn snuff(&mut self) {
        self.remaining_time = 0.0;
        self.damage_timer = 0.0;
    }

    /// Advances the light by `delta_time` seconds. The extinguish flag fires
    /// exactly once, on the tick the light crosses zero. Darkness damage runs
    /// at a strict 1 Hz cadence: at most one application per accumulated
    /// second, with sub-second remainder carried over between ticks.
    pub fn tick(&mut self, delta_time: f32, config: &CaveConfig) -> LightingTick {
        let mut result = LightingTick::default();

        if self.remaining_time > 0.0 {
            self.remaining_time -= delta_time;
            if self.remaining_time <= 0.0 {
                self.remaining_time = 0.0;
                result.extinguished = true;
            }
        }

        if self.remaining_time <= 0.0 {
            self.damage_timer += delta_time;
            if self.damage_timer >= 1.0 {
                self.damage_timer -= 1.0;
                result.darkness_damage = Some(config.darkness_damage);
            }
        } else {
            self.damage_timer = 0.0;
        }

        result
    }

    /// Effective darkness in `0.0..=base_darkness`: light cancels up to 70% of
    /// the room's base darkness, at full strength while at least
    /// `LIGHT_FADE_WINDOW` seconds remain.
    pub fn darkness_level(&self, base_darkness: f32) -> f32 {
        let light_strength = (self.remaining_time / LIGHT_FADE_WINDOW).clamp(0.0, 1.0);
        base_darkness * (1.0 - light_strength * LIGHT_STRENGTH_CAP)
    }

    pub fn effective_visibility_radius(&self, config: &CaveConfig) -> f32 {
        if self.is_lit() { config.light_radius } else { config.darkness_visibility }
    }

    /// Opacity of an object at `object_screen` as perceived from
    /// `player_screen`: the lesser of the ambient light alpha and a linear
    /// distance falloff that reaches zero at the visibility radius.
    /// `min_distance_alpha` lets shiny objects keep a faint glint near the
    /// edge of sight.
    pub fn object_opacity(
        &self,
        object_screen: (f32, f32),
        player_screen: (f32, f32),
        base_darkness: f32,
        config: &CaveConfig,
        min_distance_alpha: u8,
    ) -> u8 {
        let radius = self.effective_visibility_radius(config);
        let dx = object_screen.0 - player_screen.0;
        let dy = object_screen.1 - player_screen.1;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > radius {
            return 0;
        }

        let distance_alpha =
            ((255.0 * (1.0 - distance / radius)) as i32).clamp(min_distance_alpha as i32, 255);
        let light_alpha = 255 - (self.darkness_level(base_darkness) * SHROUD_ALPHA_SPAN) as i32;
        distance_alpha.min(light_alpha).clamp(0, 255) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CaveConfig {
        CaveConfig::default()
    }

    #[test]
    fn extinguish_event_fires_exactly_once() {
        let mut lighting = LightingModel::new();
        lighting.add_light(1.0);

        assert!(!lighting.tick(0.6, &config()).extinguished);
        assert!(lighting.tick(0.6, &config()).extinguished);
        assert!(!lighting.tick(0.6, &config()).extinguished);
        assert_eq!(lighting.remaining_time(), 0.0);
    }

    #[test]
    fn darkness_damage_carries_sub_second_remainder() {
        let mut lighting = LightingModel::new();
        let mut hits = 0;
        for _ in 0..4 {
            if lighting.tick(0.3, &config()).darkness_damage.is_some() {
                hits += 1;
            }
        }
        // 1.2 accumulated seconds: one hit at the 1.0 boundary, 0.2 carried.
        assert_eq!(hits, 1);
        assert!((lighting.damage_timer - 0.2).abs() < 1e-6);
    }

    #[test]
    fn darkness_damage_rate_is_frame_rate_independent() {
        let mut fine = LightingModel::new();
        let mut coarse = LightingModel::new();

        let mut fine_hits = 0;
        for _ in 0..625 {
            if fine.tick(0.016, &config()).darkness_damage.is_some() {
                fine_hits += 1;
            }
        }
        let mut coarse_hits = 0;
        for _ in 0..10 {
            if coarse.tick(1.0, &config()).darkness_damage.is_some() {
                coarse_hits += 1;
            }
        }

        // 10 simulated seconds either way; never more than one hit per second.
        assert_eq!(coarse_hits, 10);
        assert!((9..=10).contains(&fine_hits), "got {fine_hits} hits");
    }

    #[test]
    fn being_lit_suppresses_and_resets_darkness_damage() {
        let mut lighting = LightingModel::new();
        lighting.tick(0.9, &config());
        lighting.add_light(10.0);
        assert_eq!(lighting.tick(0.5, &config()).darkness_damage, None);
        // Timer restarted from zero once the light went out.
        lighting.snuff();
        assert_eq!(lighting.tick(0.9, &config()).darkness_damage, None);
        assert!(lighting.tick(0.2, &config()).darkness_damage.is_some());
    }

    #[test]
    fn fresh_light_cancels_most_of_base_darkness() {
        let mut lighting = LightingModel::new();
        assert!((lighting.darkness_level(0.8) - 0.8).abs() < 1e-6);

        lighting.add_light(120.0);
        // Full strength: 0.8 * (1 - 0.7)
        assert!((lighting.darkness_level(0.8) - 0.24).abs() < 1e-6);

        // Below the fade window the cancellation shrinks proportionally.
        let mut waning = LightingModel::new();
        waning.add_light(30.0);
        assert!((waning.darkness_level(0.8) - 0.8 * (1.0 - 0.5 * 0.7)).abs() < 1e-6);
    }

    #[test]
    fn visibility_radius_switches_with_light() {
        let mut lighting = LightingModel::new();
        assert_eq!(lighting.effective_visibility_radius(&config()), 30.0);
        lighting.add_light(5.0);
        assert_eq!(lighting.effective_visibility_radius(&config()), 120.0);
    }

    #[test]
    fn opacity_fades_linearly_and_cuts_off_at_radius() {
        let mut lighting = LightingModel::new();
        lighting.add_light(120.0);
        let player = (400.0, 300.0);

        let near = lighting.object_opacity((405.0, 300.0), player, 0.8, &config(), 0);
        let mid = lighting.object_opacity((460.0, 300.0), player, 0.8, &config(), 0);
        let outside = lighting.object_opacity((521.0, 300.0), player, 0.8, &config(), 0);

        assert!(near > mid, "near {near} should exceed mid {mid}");
        assert!(mid > 0);
        assert_eq!(outside, 0);
    }

    #[test]
    fn opacity_is_capped_by_ambient_light_alpha() {
        let lighting = LightingModel::new();
        // Unlit: darkness 0.8 -> shroud alpha 160 -> cap at 95.
        let player = (100.0, 100.0);
        let opacity = lighting.object_opacity((101.0, 100.0), player, 0.8, &config(), 0);
        assert_eq!(opacity, 95);
    }

    #[test]
    fn glint_floor_applies_inside_radius_only() {
        let lighting = LightingModel::new();
        let player = (0.0, 0.0);
        // 29 px away, radius 30 unlit: raw distance alpha would be ~8.
        let with_floor = lighting.object_opacity((29.0, 0.0), player, 0.0, &config(), 50);
        assert_eq!(with_floor, 50);
        let outside = lighting.object_opacity((31.0, 0.0), player, 0.0, &config(), 50);
        assert_eq!(outside, 0);
    }
}
