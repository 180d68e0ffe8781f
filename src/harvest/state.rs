//! Run state tracking.

use std::fmt;

/// Lifecycle of one platform within a run.
///
/// `Failed` is sticky: the orchestrator skips a failed platform for the
/// remainder of the run unless it is explicitly re-initialized (TikTok
/// proxy rotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformState {
    #[default]
    NotStarted,
    Initializing,
    Ready,
    Failed,
}

impl PlatformState {
    pub fn is_ready(&self) -> bool {
        matches!(self, PlatformState::Ready)
    }
}

impl fmt::Display for PlatformState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformState::NotStarted => write!(f, "not started"),
            PlatformState::Initializing => write!(f, "initializing"),
            PlatformState::Ready => write!(f, "ready"),
            PlatformState::Failed => write!(f, "failed"),
        }
    }
}

/// Lifecycle of one handle within a ready platform. A handle always ends
/// `Done`, whether it produced zero posts or many: a handle never fails the
/// run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleState {
    #[default]
    Pending,
    Fetching,
    Done,
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleState::Pending => write!(f, "pending"),
            HandleState::Fetching => write!(f, "fetching"),
            HandleState::Done => write!(f, "done"),
        }
    }
}
