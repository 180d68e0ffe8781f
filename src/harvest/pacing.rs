//! Rate-limit pacing.
//!
//! The intervals are correctness requirements, not tuning knobs: violating
//! them risks account suspension (Instagram) or bot detection (TikTok,
//! which tolerates less, hence the larger delays). Sleeping goes through a
//! trait so tests can run without wall-clock waits.

use std::time::Duration;

use async_trait::async_trait;

/// Cooperative sleep capability.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real wall-clock sleeper.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Fixed minimum intervals between requests.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// After each Instagram post.
    pub instagram_inter_post: Duration,
    /// After each TikTok post.
    pub tiktok_inter_post: Duration,
    /// After each Instagram handle.
    pub instagram_inter_user: Duration,
    /// After each TikTok handle.
    pub tiktok_inter_user: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            instagram_inter_post: Duration::from_secs(1),
            tiktok_inter_post: Duration::from_secs(2),
            instagram_inter_user: Duration::from_secs(3),
            tiktok_inter_user: Duration::from_secs(5),
        }
    }
}
