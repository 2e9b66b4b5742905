//! Session state machine
//!
//! Owns the simulation state, the spawner, the scheduler and the high score
//! store. Phases move Idle -> Playing -> Ended -> Playing ...; the scheduler
//! runs exactly while the phase is `Playing`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::error::Result;
use crate::highscores::{HighScores, KeyValueStore};
use crate::scheduler::{Scheduler, Timer};
use crate::sim::{self, FallingObject, GameEvent, GamePhase, Playfield, SessionState, Spawner};
use crate::tuning::Tuning;

/// Read-only view of a session for renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    pub high_score: u32,
    pub catcher: f32,
    pub objects: Vec<FallingObject>,
}

/// A game session and everything that drives it
pub struct Session<R = Pcg32> {
    state: SessionState,
    spawner: Spawner<R>,
    scheduler: Scheduler,
    high_scores: HighScores,
    tuning: Tuning,
    playfield: Playfield,
    events: Vec<GameEvent>,
}

impl Session<Pcg32> {
    /// Session with default tuning and an RNG seeded from `seed`
    pub fn new(seed: u64, store: Box<dyn KeyValueStore>) -> Self {
        Self::build(Pcg32::seed_from_u64(seed), store, Tuning::default())
    }

    /// Session with custom tuning; fails if the tuning does not validate
    pub fn with_tuning(seed: u64, store: Box<dyn KeyValueStore>, tuning: Tuning) -> Result<Self> {
        Self::with_rng(Pcg32::seed_from_u64(seed), store, tuning)
    }
}

impl<R: Rng> Session<R> {
    /// Build an idle session; reads the stored high score once
    pub fn with_rng(rng: R, store: Box<dyn KeyValueStore>, tuning: Tuning) -> Result<Self> {
        tuning.validate()?;
        Ok(Self::build(rng, store, tuning))
    }

    fn build(rng: R, store: Box<dyn KeyValueStore>, tuning: Tuning) -> Self {
        let high_scores = HighScores::new(store);
        let mut state = SessionState::new(high_scores.load());
        state.lives = tuning.start_lives;
        Self {
            state,
            spawner: Spawner::new(rng),
            scheduler: Scheduler::new(),
            high_scores,
            tuning,
            playfield: Playfield::default(),
            events: Vec::new(),
        }
    }

    // === Transitions ===

    /// Idle -> Playing. Ignored while already playing.
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::Playing {
            log::warn!("start ignored: session already playing");
            return;
        }
        self.begin();
    }

    /// Ended -> Playing, through the same reset as `start`
    pub fn restart(&mut self) {
        if self.state.phase == GamePhase::Playing {
            log::warn!("restart ignored: session still playing");
            return;
        }
        self.begin();
    }

    fn begin(&mut self) {
        // Any previous run must be dead before the reset
        self.scheduler.stop();
        self.state.reset(self.tuning.start_lives);
        self.spawner.reset();

        let first_spawn = self.tuning.spawn_interval_ms(self.state.score);
        if let Err(e) = self.scheduler.start(self.tuning.sim_tick_ms, first_spawn) {
            log::error!("Could not start scheduler: {}", e);
            return;
        }
        self.state.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Session started (high score {})", self.state.high_score);
    }

    /// Playing -> Ended
    fn end(&mut self) {
        self.scheduler.stop();
        self.state.phase = GamePhase::Ended;

        let score = self.state.score;
        let previous = self.state.high_score;
        if score > previous {
            self.state.high_score = score;
            self.high_scores.save(score);
        }
        let new_high_score = score > 0 && score >= self.state.high_score;
        self.events.push(GameEvent::Ended {
            score,
            new_high_score,
        });
        log::info!(
            "Session ended: score {}, best {} (was {})",
            score,
            self.state.high_score,
            previous
        );
    }

    // === Time ===

    /// Run every timer due within the next `elapsed_ms` of virtual time
    ///
    /// Long gaps are clamped to `Tuning::max_frame_ms`.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let elapsed_ms = elapsed_ms.min(self.tuning.max_frame_ms);
        let until_ms = self.scheduler.now_ms() + elapsed_ms;

        loop {
            let spawn_period = self.tuning.spawn_interval_ms(self.state.score);
            let Some(fired) = self.scheduler.next_due(until_ms, spawn_period) else {
                break;
            };
            if !self.scheduler.is_current(fired.token) {
                log::warn!("Dropped {:?} timer from a stopped run", fired.timer);
                continue;
            }
            match fired.timer {
                Timer::Simulation => self.simulate_tick(),
                Timer::Spawn => self.spawn_tick(),
            }
        }
        self.scheduler.advance_clock(until_ms);
    }

    /// One simulation step. No-op unless playing.
    pub fn simulate_tick(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        let update = sim::tick(&mut self.state, self.playfield.width, &self.tuning);

        if update.caught > 0 {
            self.events.push(GameEvent::Caught {
                count: update.caught,
            });
        }
        if update.life_lost {
            self.events.push(GameEvent::LifeLost {
                lives: self.state.lives,
            });
            log::info!("Life lost, {} left", self.state.lives);
        }
        if update.depleted {
            self.end();
        }
    }

    /// Spawn one object. No-op unless playing.
    pub fn spawn_tick(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        let obj = self.spawner.spawn(self.state.score, &self.tuning);
        log::debug!(
            "Spawned {} at x={:.1} speed={:.2}",
            obj.id(),
            obj.x(),
            obj.speed()
        );
        self.events.push(GameEvent::Spawned { id: obj.id() });
        self.state.objects.push(obj);
    }

    // === Input ===

    /// Record the playfield's measured extent
    pub fn set_playfield(&mut self, playfield: Playfield) {
        self.playfield = playfield;
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Move the catcher to a raw client x coordinate
    ///
    /// Ignored outside `Playing` or before the playfield is measured.
    pub fn set_pointer(&mut self, raw_x: f32) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        if let Some(percent) = self.playfield.catcher_percent(raw_x) {
            self.state.catcher.set_position(percent);
        }
    }

    /// Update the playfield and move the catcher in one go
    pub fn set_position(&mut self, raw_x: f32, playfield: Playfield) {
        self.set_playfield(playfield);
        self.set_pointer(raw_x);
    }

    // === Persistence ===

    /// Wipe stored data and forget the high score
    pub fn clear_high_score(&mut self) {
        self.high_scores.clear();
        self.state.high_score = 0;
    }

    // === Read access ===

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    pub fn catcher_position(&self) -> f32 {
        self.state.catcher.position()
    }

    pub fn objects(&self) -> &[FallingObject] {
        &self.state.objects
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Spawn id the next object will get
    pub fn next_object_id(&self) -> u32 {
        self.spawner.next_id()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            score: self.state.score,
            lives: self.state.lives,
            high_score: self.state.high_score,
            catcher: self.state.catcher.position(),
            objects: self.state.objects.clone(),
        }
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
