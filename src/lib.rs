//! Urchin Catcher - a falling-object arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, score and lives)
//! - `scheduler`: Virtual-time driver for the simulation and spawn ticks
//! - `session`: Phase state machine that owns the simulation and scheduler
//! - `highscores`: Best-score persistence behind a key-value store
//! - `platform`: Browser/native input translation
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod highscores;
pub mod platform;
pub mod scheduler;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscores::{HighScores, KeyValueStore, MemoryStore};
pub use scheduler::{Scheduler, TickToken, Timer};
pub use session::{Session, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Positions are percentages of the playfield (0 = left/top, 100 = right/bottom).
/// Times are milliseconds of virtual time.
pub mod consts {
    /// Fixed simulation period (~60 Hz)
    pub const SIM_TICK_MS: u64 = 16;
    /// Largest elapsed time accepted per `advance` call
    pub const MAX_FRAME_MS: u64 = 250;

    /// Spawn cadence at score 0
    pub const SPAWN_BASE_MS: u64 = 600;
    /// Cadence shrinks by this much per point
    pub const SPAWN_STEP_MS: u64 = 10;
    /// Cadence never drops below this
    pub const SPAWN_FLOOR_MS: u64 = 250;

    /// Spawn column range
    pub const SPAWN_X_MIN: f32 = 10.0;
    pub const SPAWN_X_MAX: f32 = 90.0;
    /// Objects start just above the visible top
    pub const SPAWN_Y: f32 = -10.0;
    /// Base fall speed range (percent per tick)
    pub const SPEED_MIN: f32 = 0.8;
    pub const SPEED_MAX: f32 = 1.2;
    /// Extra fall speed per point scored
    pub const SPEED_PER_POINT: f32 = 0.025;
    /// Cosmetic spin per tick (degrees)
    pub const ROTATION_PER_TICK: f32 = 2.0;

    /// Catch line, measured from the top
    pub const CATCH_LINE: f32 = 75.0;
    /// Band above the catch line that still counts
    pub const CATCH_BAND_ABOVE: f32 = 5.0;
    /// Band below the catch line that still counts
    pub const CATCH_BAND_BELOW: f32 = 10.0;
    /// Horizontal slack on each side of the catcher
    pub const CATCH_MARGIN: f32 = 5.0;
    /// Anything below this has been missed
    pub const MISS_LINE: f32 = 100.0;

    /// Catcher sprite width in pixels
    pub const CATCHER_WIDTH_PX: f32 = 120.0;
    /// Playfield width used before the host has measured it
    pub const DEFAULT_PLAYFIELD_WIDTH_PX: f32 = 400.0;
    /// Catcher travel limits
    pub const CATCHER_MIN: f32 = 5.0;
    pub const CATCHER_MAX: f32 = 95.0;
    /// Catcher spawn position
    pub const CATCHER_START: f32 = 50.0;

    /// Lives at the start of a session
    pub const START_LIVES: u8 = 3;
}
