//! Platform abstraction layer
//!
//! Turns pointer and touch samples into catcher moves. The conversion is
//! plain Rust so it runs natively; the browser wiring lives in `web`.

use glam::Vec2;
use rand::Rng;

use crate::session::Session;
use crate::sim::{GamePhase, Playfield};

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Source of a pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    TouchStart,
    TouchMove,
}

impl PointerKind {
    pub fn is_touch(&self) -> bool {
        matches!(self, PointerKind::TouchStart | PointerKind::TouchMove)
    }
}

/// One pointer position in client pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub kind: PointerKind,
    pub client: Vec2,
}

impl PointerSample {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            client: Vec2::new(x, y),
        }
    }

    /// Touch gestures (scroll, zoom) are blocked only during play
    pub fn suppress_default(&self, phase: GamePhase) -> bool {
        self.kind.is_touch() && phase == GamePhase::Playing
    }
}

/// Feed a sample to the session; returns whether the browser default
/// should be prevented
pub fn handle_pointer<R: Rng>(
    session: &mut Session<R>,
    sample: PointerSample,
    playfield: Playfield,
) -> bool {
    session.set_position(sample.client.x, playfield);
    sample.suppress_default(session.phase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;

    #[test]
    fn test_touch_suppressed_only_while_playing() {
        let touch = PointerSample::new(PointerKind::TouchMove, 10.0, 10.0);
        let mouse = PointerSample::new(PointerKind::Mouse, 10.0, 10.0);
        assert!(touch.suppress_default(GamePhase::Playing));
        assert!(!touch.suppress_default(GamePhase::Idle));
        assert!(!touch.suppress_default(GamePhase::Ended));
        assert!(!mouse.suppress_default(GamePhase::Playing));
    }

    #[test]
    fn test_handle_pointer_moves_catcher() {
        let mut session = Session::new(3, Box::new(MemoryStore::new()));
        let field = Playfield::new(20.0, 200.0);
        let start = PointerSample::new(PointerKind::TouchStart, 170.0, 500.0);

        // Idle: nothing moves, default allowed
        assert!(!handle_pointer(&mut session, start, field));
        assert_eq!(session.catcher_position(), 50.0);

        session.start();
        assert!(handle_pointer(&mut session, start, field));
        assert_eq!(session.catcher_position(), 75.0);
    }
}
