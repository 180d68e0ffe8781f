//! Run orchestration: pacing policy, state tracking, and the sequential
//! harvest loop.

pub mod orchestrator;
pub mod pacing;
pub mod state;

pub use orchestrator::Orchestrator;
pub use pacing::{Pacing, Sleeper, TokioSleeper};
pub use state::{HandleState, PlatformState};
