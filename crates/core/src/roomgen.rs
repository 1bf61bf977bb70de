//! Procedural room generation split into coherent submodules.

mod generator;
mod loot;
mod populate;
mod seed;

pub use generator::RoomGenerator;

pub(crate) use loot::warden_loot;

#[cfg(test)]
mod tests {
    use crate::config::CaveConfig;
    use crate::progression::ProgressionTracker;

    use super::RoomGenerator;

    #[test]
    fn generator_is_reusable_across_rooms() {
        let config = CaveConfig::default();
        let mut progression = ProgressionTracker::new(&config);
        let generator = RoomGenerator::new(11, &config);

        let first = generator.generate(1, 0, &progression).expect("room 0");
        progression.complete_room(1, 0);
        let second = generator.generate(1, 1, &progression).expect("room 1");

        assert_ne!(first.canonical_bytes(), second.canonical_bytes());
    }
}
