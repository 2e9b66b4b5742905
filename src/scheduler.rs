//! Virtual-time driver for the two periodic game tasks
//!
//! The host feeds elapsed milliseconds in; the scheduler hands back each due
//! timer in order. Nothing fires between `stop` and the next `start`, and a
//! [`TickToken`] from an earlier run is never current again, so a stale timer
//! cannot reach a fresh session.

use crate::error::{Error, Result};

/// Which periodic task is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Fixed-rate simulation step
    Simulation,
    /// Score-dependent spawn
    Spawn,
}

/// Identifies one start..stop run of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub timer: Timer,
    pub at_ms: u64,
    pub token: TickToken,
}

#[derive(Debug, Clone)]
struct Armed {
    token: TickToken,
    tick_period_ms: u64,
    next_tick_ms: u64,
    next_spawn_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    generation: u64,
    armed: Option<Armed>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    /// True only for the token of the run in progress
    pub fn is_current(&self, token: TickToken) -> bool {
        self.armed.as_ref().is_some_and(|a| a.token == token)
    }

    /// Arm both timers relative to now
    ///
    /// Starting twice without a `stop` in between is refused.
    pub fn start(&mut self, tick_period_ms: u64, first_spawn_ms: u64) -> Result<TickToken> {
        if self.armed.is_some() {
            return Err(Error::SchedulerAlreadyRunning);
        }
        self.generation += 1;
        let token = TickToken(self.generation);
        let tick_period_ms = tick_period_ms.max(1);
        self.armed = Some(Armed {
            token,
            tick_period_ms,
            next_tick_ms: self.now_ms + tick_period_ms,
            next_spawn_ms: self.now_ms + first_spawn_ms.max(1),
        });
        log::debug!("Scheduler run {} started at {} ms", self.generation, self.now_ms);
        Ok(token)
    }

    /// Cancel both timers; returns whether anything was running
    pub fn stop(&mut self) -> bool {
        match self.armed.take() {
            Some(armed) => {
                log::debug!("Scheduler run {} stopped at {} ms", armed.token.0, self.now_ms);
                true
            }
            None => false,
        }
    }

    /// Pop the earliest timer due at or before `until_ms`
    ///
    /// The clock moves to the fired timer's due time. A fired spawn is re-armed
    /// `spawn_period_ms` later, so the caller passes the cadence for the current
    /// score on every call. On equal due times the simulation step goes first.
    pub fn next_due(&mut self, until_ms: u64, spawn_period_ms: u64) -> Option<Fired> {
        let armed = self.armed.as_mut()?;
        let (timer, at_ms) = if armed.next_tick_ms <= armed.next_spawn_ms {
            (Timer::Simulation, armed.next_tick_ms)
        } else {
            (Timer::Spawn, armed.next_spawn_ms)
        };
        if at_ms > until_ms {
            return None;
        }

        match timer {
            Timer::Simulation => armed.next_tick_ms = at_ms + armed.tick_period_ms,
            Timer::Spawn => armed.next_spawn_ms = at_ms + spawn_period_ms.max(1),
        }
        self.now_ms = self.now_ms.max(at_ms);
        Some(Fired {
            timer,
            at_ms,
            token: armed.token,
        })
    }

    /// Move the clock forward without firing anything
    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }
}
