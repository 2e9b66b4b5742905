//! Session state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Timers running, objects falling
    Playing,
    /// Lives exhausted, waiting for restart
    Ended,
}

/// A falling urchin
///
/// `x` is fixed at spawn; only `y` and the cosmetic rotation change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    id: u32,
    pos: Vec2,
    speed: f32,
    /// Degrees, cosmetic only
    rotation: f32,
}

impl FallingObject {
    pub fn new(id: u32, x: f32, y: f32, speed: f32, rotation: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            speed,
            rotation,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Move down by one tick's worth of fall and spin
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
        self.rotation = (self.rotation + ROTATION_PER_TICK).rem_euclid(360.0);
    }
}

/// The player's diver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Catcher {
    position: f32,
}

impl Default for Catcher {
    fn default() -> Self {
        Self {
            position: CATCHER_START,
        }
    }
}

impl Catcher {
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Move to `percent`, kept inside the travel limits
    pub fn set_position(&mut self, percent: f32) {
        if percent.is_finite() {
            self.position = percent.clamp(CATCHER_MIN, CATCHER_MAX);
        }
    }
}

/// Notable things that happened, drained by the host for sound and UI cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh session began (start or restart)
    Started,
    Spawned { id: u32 },
    Caught { count: u32 },
    /// One or more objects got past; `lives` is what remains
    LifeLost { lives: u8 },
    Ended { score: u32, new_high_score: bool },
}

/// Mutable state of the current session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: GamePhase,
    pub score: u32,
    /// Never below zero
    pub lives: u8,
    /// Best score seen by the store, updated when a session ends
    pub high_score: u32,
    pub catcher: Catcher,
    /// Active objects, in spawn (id) order
    pub objects: Vec<FallingObject>,
}

impl SessionState {
    pub fn new(high_score: u32) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            lives: START_LIVES,
            high_score,
            catcher: Catcher::default(),
            objects: Vec::new(),
        }
    }

    /// Clear per-session data; the phase and high score are left alone
    pub fn reset(&mut self, start_lives: u8) {
        self.score = 0;
        self.lives = start_lives;
        self.catcher = Catcher::default();
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_down_only() {
        let mut obj = FallingObject::new(0, 42.0, -10.0, 1.5, 359.0);
        obj.advance();
        assert_eq!(obj.x(), 42.0);
        assert_eq!(obj.y(), -8.5);
        assert_eq!(obj.rotation(), 1.0);
    }

    #[test]
    fn test_catcher_clamped() {
        let mut catcher = Catcher::default();
        assert_eq!(catcher.position(), 50.0);
        catcher.set_position(-20.0);
        assert_eq!(catcher.position(), 5.0);
        catcher.set_position(130.0);
        assert_eq!(catcher.position(), 95.0);
        catcher.set_position(f32::NAN);
        assert_eq!(catcher.position(), 95.0);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut state = SessionState::new(17);
        state.score = 9;
        state.lives = 1;
        state.catcher.set_position(80.0);
        state.objects.push(FallingObject::new(3, 50.0, 20.0, 1.0, 0.0));

        state.reset(START_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.catcher.position(), 50.0);
        assert!(state.objects.is_empty());
        assert_eq!(state.high_score, 17);
    }
}
