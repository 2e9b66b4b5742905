//! Fixed timestep simulation tick
//!
//! Each tick advances every object, sorts it into caught, missed or still
//! falling, then applies the effects in that order.

use super::collision::CaptureRegion;
use super::scoring::{ScoreUpdate, apply_outcome};
use super::state::{FallingObject, SessionState};
use crate::tuning::Tuning;

/// Disjoint split of the active objects after one tick's movement
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub caught: Vec<FallingObject>,
    /// Crossed the bottom without being caught
    pub missed: Vec<FallingObject>,
    /// Carried into the next tick
    pub falling: Vec<FallingObject>,
}

/// Advance `objects` one tick and classify them
///
/// The catch test uses the post-move position, so a fast object is caught if
/// it lands anywhere in the band on this tick. A catch wins over a miss.
pub fn partition(objects: Vec<FallingObject>, region: &CaptureRegion, miss_line: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    for mut obj in objects {
        obj.advance();
        if region.contains(obj.pos()) {
            outcome.caught.push(obj);
        } else if obj.y() > miss_line {
            outcome.missed.push(obj);
        } else {
            outcome.falling.push(obj);
        }
    }
    outcome
}

/// Advance the session state by one fixed timestep
///
/// `width_px` is the measured playfield width (0 if unknown). The caller
/// owns phase transitions; this only reports depletion.
pub fn tick(state: &mut SessionState, width_px: f32, tuning: &Tuning) -> ScoreUpdate {
    let region = CaptureRegion::around(state.catcher.position(), width_px, tuning);
    let objects = std::mem::take(&mut state.objects);
    let mut outcome = partition(objects, &region, tuning.miss_line);

    let update = apply_outcome(state, &outcome);
    state.objects = std::mem::take(&mut outcome.falling);
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state_with(objects: Vec<FallingObject>) -> SessionState {
        let mut state = SessionState::new(0);
        state.objects = objects;
        state
    }

    #[test]
    fn test_catch_scenario_exact_tick() {
        let tuning = Tuning::default();
        let mut state = state_with(vec![FallingObject::new(0, 50.0, -10.0, 5.0, 0.0)]);

        for _ in 0..15 {
            let update = tick(&mut state, 400.0, &tuning);
            assert_eq!(update.caught, 0);
        }
        assert_eq!(state.objects[0].y(), 65.0);

        // Tick 16 lands on y = 70, the top of the band
        let update = tick(&mut state, 400.0, &tuning);
        assert_eq!(update.caught, 1);
        assert_eq!(state.score, 1);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_three_misses_one_life() {
        let tuning = Tuning::default();
        // Far from the catcher, one step from the bottom
        let objects = (0..3)
            .map(|id| FallingObject::new(id, 90.0, 99.5, 1.0, 0.0))
            .collect();
        let mut state = state_with(objects);

        let update = tick(&mut state, 400.0, &tuning);
        assert!(update.life_lost);
        assert_eq!(state.lives, 2);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_catch_beats_miss_on_same_tick() {
        let mut tuning = Tuning::default();
        // Band reaching past the miss line
        tuning.catch_band_below = 40.0;
        let mut state = state_with(vec![FallingObject::new(0, 50.0, 99.0, 3.0, 0.0)]);

        let update = tick(&mut state, 400.0, &tuning);
        assert_eq!(update.caught, 1);
        assert!(!update.life_lost);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_survivors_keep_order_and_move() {
        let tuning = Tuning::default();
        let mut state = state_with(vec![
            FallingObject::new(4, 20.0, 0.0, 1.0, 10.0),
            FallingObject::new(7, 80.0, 10.0, 2.0, 20.0),
        ]);
        tick(&mut state, 400.0, &tuning);

        let ids: Vec<u32> = state.objects.iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![4, 7]);
        assert_eq!(state.objects[0].y(), 1.0);
        assert_eq!(state.objects[1].y(), 12.0);
        assert_eq!(state.objects[1].rotation(), 22.0);
    }

    proptest! {
        #[test]
        fn every_object_leaves_exactly_once(
            layouts in prop::collection::vec((10.0f32..90.0, -10.0f32..100.0, 0.8f32..4.0), 0..30),
            catcher in 5.0f32..95.0,
        ) {
            let tuning = Tuning::default();
            let objects: Vec<FallingObject> = layouts
                .iter()
                .enumerate()
                .map(|(id, &(x, y, speed))| FallingObject::new(id as u32, x, y, speed, 0.0))
                .collect();
            let total = objects.len();
            let region = CaptureRegion::around(catcher, 400.0, &tuning);
            let outcome = partition(objects, &region, tuning.miss_line);

            prop_assert_eq!(outcome.caught.len() + outcome.missed.len() + outcome.falling.len(), total);
            let mut ids: Vec<u32> = outcome
                .caught
                .iter()
                .chain(&outcome.missed)
                .chain(&outcome.falling)
                .map(|o| o.id())
                .collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
        }

        #[test]
        fn survivors_strictly_descend(
            layouts in prop::collection::vec((10.0f32..90.0, -10.0f32..60.0, 0.8f32..4.0), 1..20),
            ticks in 1usize..80,
        ) {
            let tuning = Tuning::default();
            let objects = layouts
                .iter()
                .enumerate()
                .map(|(id, &(x, y, speed))| FallingObject::new(id as u32, x, y, speed, 0.0))
                .collect();
            let mut state = state_with(objects);

            for _ in 0..ticks {
                let before: Vec<(u32, f32)> = state.objects.iter().map(|o| (o.id(), o.y())).collect();
                let score_before = state.score;
                let update = tick(&mut state, 400.0, &tuning);

                prop_assert_eq!(state.score - score_before, update.caught);
                for obj in &state.objects {
                    let prev = before.iter().find(|(id, _)| *id == obj.id()).map(|(_, y)| *y);
                    prop_assert!(prev.is_some());
                    prop_assert!(obj.y() > prev.unwrap_or(f32::MAX));
                }
            }
        }
    }
}
