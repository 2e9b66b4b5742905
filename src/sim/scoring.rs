//! Score and lives bookkeeping

use super::state::SessionState;
use super::tick::TickOutcome;

/// What one tick did to score and lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreUpdate {
    pub caught: u32,
    pub life_lost: bool,
    /// Lives hit zero on this tick
    pub depleted: bool,
}

/// Apply a tick's catches and misses to `state`
///
/// Every catch scores a point. Any number of misses in the same tick costs a
/// single life.
pub fn apply_outcome(state: &mut SessionState, outcome: &TickOutcome) -> ScoreUpdate {
    let caught = outcome.caught.len() as u32;
    state.score = state.score.saturating_add(caught);

    let life_lost = !outcome.missed.is_empty();
    if life_lost {
        state.lives = state.lives.saturating_sub(1);
    }

    ScoreUpdate {
        caught,
        life_lost,
        depleted: life_lost && state.lives == 0,
    }
}
