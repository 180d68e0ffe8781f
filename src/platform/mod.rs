//! Platform adapters: translate platform-native responses into the unified
//! post model.

pub mod instagram;
pub mod tiktok;

use async_trait::async_trait;

use crate::post::{Platform, Post};

pub use instagram::InstagramAdapter;
pub use tiktok::TikTokAdapter;

/// Outcome of adapter initialization. Never an error: an adapter that
/// cannot establish a session reports `NotReady` and logs the reason, and
/// the orchestrator skips the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Capability every platform adapter implements.
#[async_trait]
pub trait PlatformAdapter: Send {
    fn platform(&self) -> Platform;

    /// Establish session/auth, optionally through a proxy.
    async fn initialize(&mut self, proxy: Option<&str>) -> Readiness;

    /// Return as many normalized posts as could be produced for a handle.
    /// A failed list fetch yields an empty sequence; a failure processing
    /// one post is caught and that post skipped, the rest of the batch
    /// proceeds.
    async fn fetch_recent_posts(&mut self, handle: &str, limit: usize) -> Vec<Post>;
}
