//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - Stable iteration order (by spawn id)
//! - No timers, rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CaptureRegion, effective_width, intersects};
pub use input::Playfield;
pub use scoring::{ScoreUpdate, apply_outcome};
pub use spawner::Spawner;
pub use state::{Catcher, FallingObject, GameEvent, GamePhase, SessionState};
pub use tick::{TickOutcome, partition, tick};
