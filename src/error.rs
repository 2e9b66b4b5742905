//! Crate error type
//!
//! Only the adapters at the edges (storage, tuning files, the scheduler's
//! start guard) can fail. The simulation itself is infallible.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),
    #[error("scheduler started while already running")]
    SchedulerAlreadyRunning,
}

pub type Result<T> = std::result::Result<T, Error>;
