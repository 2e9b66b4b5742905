//! Urchin spawning with difficulty scaling

use rand::Rng;

use super::state::FallingObject;
use crate::tuning::Tuning;

/// Hands out new falling objects with sequential ids
#[derive(Debug, Clone)]
pub struct Spawner<R> {
    rng: R,
    next_id: u32,
}

impl<R: Rng> Spawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, next_id: 0 }
    }

    /// Id the next spawn will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Restart id numbering (new session only)
    pub fn reset(&mut self) {
        self.next_id = 0;
    }

    /// Create an object above the playfield; faster as `score` grows
    pub fn spawn(&mut self, score: u32, tuning: &Tuning) -> FallingObject {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let x = self.rng.random_range(tuning.spawn_x_min..=tuning.spawn_x_max);
        let jitter = self.rng.random_range(tuning.speed_min..=tuning.speed_max);
        let speed = jitter + tuning.speed_per_point * score as f32;
        let rotation = self.rng.random_range(0.0..360.0);

        FallingObject::new(id, x, tuning.spawn_y, speed, rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawner(seed: u64) -> Spawner<Pcg32> {
        Spawner::new(Pcg32::seed_from_u64(seed))
    }

    #[test]
    fn test_ids_are_sequential_and_reset() {
        let tuning = Tuning::default();
        let mut spawner = spawner(1);
        let ids: Vec<u32> = (0..4).map(|_| spawner.spawn(0, &tuning).id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        spawner.reset();
        assert_eq!(spawner.next_id(), 0);
        assert_eq!(spawner.spawn(0, &tuning).id(), 0);
    }

    #[test]
    fn test_same_seed_same_objects() {
        let tuning = Tuning::default();
        let mut a = spawner(99);
        let mut b = spawner(99);
        for score in 0..20 {
            assert_eq!(a.spawn(score, &tuning), b.spawn(score, &tuning));
        }
    }

    #[test]
    fn test_starts_above_view() {
        let tuning = Tuning::default();
        let obj = spawner(5).spawn(0, &tuning);
        assert_eq!(obj.y(), -10.0);
    }

    proptest! {
        #[test]
        fn spawned_fields_in_range(seed in any::<u64>(), score in 0u32..10_000) {
            let tuning = Tuning::default();
            let obj = spawner(seed).spawn(score, &tuning);
            let bonus = 0.025 * score as f32;

            prop_assert!((10.0..=90.0).contains(&obj.x()));
            prop_assert!(obj.speed() >= 0.8 + bonus - 1e-3);
            prop_assert!(obj.speed() <= 1.2 + bonus + 1e-3);
            prop_assert!((0.0..360.0).contains(&obj.rotation()));
        }

        #[test]
        fn higher_score_falls_faster(seed in any::<u64>(), score in 0u32..1_000, extra in 1u32..1_000) {
            let tuning = Tuning::default();
            // Same seed, so the random jitter is identical
            let slow = spawner(seed).spawn(score, &tuning);
            let fast = spawner(seed).spawn(score + extra, &tuning);
            prop_assert!(fast.speed() > slow.speed());
        }
    }
}
