//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! JSON file only needs the values it wants to override.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Tunable balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    pub sim_tick_ms: u64,
    pub max_frame_ms: u64,
    pub spawn_base_ms: u64,
    pub spawn_step_ms: u64,
    pub spawn_floor_ms: u64,

    // === Spawning ===
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    pub spawn_y: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub speed_per_point: f32,

    // === Catching ===
    pub catch_line: f32,
    pub catch_band_above: f32,
    pub catch_band_below: f32,
    pub catch_margin: f32,
    pub miss_line: f32,
    pub catcher_width_px: f32,
    pub default_playfield_width_px: f32,

    // === Session ===
    pub start_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sim_tick_ms: SIM_TICK_MS,
            max_frame_ms: MAX_FRAME_MS,
            spawn_base_ms: SPAWN_BASE_MS,
            spawn_step_ms: SPAWN_STEP_MS,
            spawn_floor_ms: SPAWN_FLOOR_MS,

            spawn_x_min: SPAWN_X_MIN,
            spawn_x_max: SPAWN_X_MAX,
            spawn_y: SPAWN_Y,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            speed_per_point: SPEED_PER_POINT,

            catch_line: CATCH_LINE,
            catch_band_above: CATCH_BAND_ABOVE,
            catch_band_below: CATCH_BAND_BELOW,
            catch_margin: CATCH_MARGIN,
            miss_line: MISS_LINE,
            catcher_width_px: CATCHER_WIDTH_PX,
            default_playfield_width_px: DEFAULT_PLAYFIELD_WIDTH_PX,

            start_lives: START_LIVES,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<()> {
        let floats = [
            (self.spawn_x_min, "spawn_x_min must be finite"),
            (self.spawn_x_max, "spawn_x_max must be finite"),
            (self.spawn_y, "spawn_y must be finite"),
            (self.speed_min, "speed_min must be finite"),
            (self.speed_max, "speed_max must be finite"),
            (self.speed_per_point, "speed_per_point must be finite"),
            (self.catch_line, "catch_line must be finite"),
            (self.catch_band_above, "catch_band_above must be finite"),
            (self.catch_band_below, "catch_band_below must be finite"),
            (self.catch_margin, "catch_margin must be finite"),
            (self.miss_line, "miss_line must be finite"),
            (self.catcher_width_px, "catcher_width_px must be finite"),
            (self.default_playfield_width_px, "default_playfield_width_px must be finite"),
        ];
        if let Some(&(_, msg)) = floats.iter().find(|(value, _)| !value.is_finite()) {
            return Err(Error::InvalidTuning(msg));
        }
        if self.sim_tick_ms == 0 {
            return Err(Error::InvalidTuning("sim_tick_ms must be positive"));
        }
        if self.spawn_floor_ms == 0 {
            return Err(Error::InvalidTuning("spawn_floor_ms must be positive"));
        }
        if self.spawn_base_ms < self.spawn_floor_ms {
            return Err(Error::InvalidTuning("spawn_base_ms is below spawn_floor_ms"));
        }
        if !(self.spawn_x_min < self.spawn_x_max) {
            return Err(Error::InvalidTuning("spawn_x range is empty"));
        }
        // Fall speed must stay positive or objects never leave the field
        if !(self.speed_min > 0.0 && self.speed_min <= self.speed_max) {
            return Err(Error::InvalidTuning("speed range must be positive"));
        }
        if self.speed_per_point < 0.0 {
            return Err(Error::InvalidTuning("speed_per_point is negative"));
        }
        // A negative band or margin turns the capture region inside out
        if self.catch_band_above < 0.0 || self.catch_band_below < 0.0 {
            return Err(Error::InvalidTuning("catch band is negative"));
        }
        if self.catch_margin < 0.0 {
            return Err(Error::InvalidTuning("catch_margin is negative"));
        }
        if !(self.default_playfield_width_px > 0.0) {
            return Err(Error::InvalidTuning("default_playfield_width_px must be positive"));
        }
        if self.start_lives == 0 {
            return Err(Error::InvalidTuning("start_lives must be at least 1"));
        }
        Ok(())
    }

    /// Spawn period for the given score: shrinks with score, floored
    pub fn spawn_interval_ms(&self, score: u32) -> u64 {
        let shrink = self.spawn_step_ms.saturating_mul(score as u64);
        self.spawn_base_ms
            .saturating_sub(shrink)
            .max(self.spawn_floor_ms)
    }
}
