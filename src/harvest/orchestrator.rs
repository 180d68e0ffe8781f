//! Sequential harvest orchestration.
//!
//! A single logical worker drives both platforms and all handles in order.
//! Failures are contained at the smallest unit (asset, post, handle,
//! platform); only "both platforms unusable" escalates to a run-level
//! abort.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::harvest::pacing::{Pacing, Sleeper};
use crate::harvest::state::{HandleState, PlatformState};
use crate::platform::PlatformAdapter;
use crate::proxy::ProxyPool;
use crate::store::ResultStore;

/// Drives the run: platform initialization, per-handle fetching, proxy
/// rotation, and pacing between accounts.
pub struct Orchestrator {
    instagram: Box<dyn PlatformAdapter>,
    instagram_handles: Vec<String>,
    tiktok: Box<dyn PlatformAdapter>,
    tiktok_handles: Vec<String>,
    proxies: ProxyPool,
    pacing: Pacing,
    sleeper: Arc<dyn Sleeper>,
    posts_per_user: usize,
}

impl Orchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        instagram: Box<dyn PlatformAdapter>,
        instagram_handles: Vec<String>,
        tiktok: Box<dyn PlatformAdapter>,
        tiktok_handles: Vec<String>,
        proxies: ProxyPool,
        pacing: Pacing,
        sleeper: Arc<dyn Sleeper>,
        posts_per_user: usize,
    ) -> Self {
        Self {
            instagram,
            instagram_handles,
            tiktok,
            tiktok_handles,
            proxies,
            pacing,
            sleeper,
            posts_per_user,
        }
    }

    /// Run the full harvest. Errors only when neither platform could be
    /// initialized.
    pub async fn run(mut self) -> Result<ResultStore> {
        let mut store = ResultStore::new();

        // Instagram: one session for the whole run, never proxied.
        tracing::debug!("Instagram: {}", PlatformState::Initializing);
        let instagram_state = if self.instagram.initialize(None).await.is_ready() {
            PlatformState::Ready
        } else {
            PlatformState::Failed
        };

        // TikTok: first session, with a randomly chosen proxy if any.
        tracing::debug!("TikTok: {}", PlatformState::Initializing);
        let first_proxy = self.proxies.pick_random().map(str::to_string);
        let tiktok_state = if self.tiktok.initialize(first_proxy.as_deref()).await.is_ready() {
            PlatformState::Ready
        } else {
            PlatformState::Failed
        };

        if !instagram_state.is_ready() && !tiktok_state.is_ready() {
            tracing::error!("Neither Instagram nor TikTok could be initialized");
            return Err(Error::NoPlatformAvailable);
        }

        tracing::info!(
            "Starting data collection (instagram: {}, tiktok: {})",
            instagram_state,
            tiktok_state
        );

        if instagram_state.is_ready() {
            self.harvest_instagram(&mut store).await;
        }

        if tiktok_state.is_ready() {
            self.harvest_tiktok(&mut store).await;
        }

        Ok(store)
    }

    async fn harvest_instagram(&mut self, store: &mut ResultStore) {
        let handles = self.instagram_handles.clone();
        for handle in &handles {
            tracing::debug!("Instagram @{}: {}", handle, HandleState::Fetching);
            let posts = self
                .instagram
                .fetch_recent_posts(handle, self.posts_per_user)
                .await;
            store.extend(posts);
            tracing::debug!("Instagram @{}: {}", handle, HandleState::Done);

            // Bound burstiness at the account level.
            self.sleeper.sleep(self.pacing.instagram_inter_user).await;
        }
    }

    async fn harvest_tiktok(&mut self, store: &mut ResultStore) {
        let handles = self.tiktok_handles.clone();
        for (index, handle) in handles.iter().enumerate() {
            // Rotate exposure per account: a fresh proxy-bound session
            // before every handle after the first. A failed rotation skips
            // the handle rather than reusing a session bound to a
            // possibly-burned proxy; the next handle rotates again.
            if index > 0 && !self.proxies.is_empty() {
                tracing::info!("Rotating proxy for @{}", handle);
                let proxy = self.proxies.pick_random().map(str::to_string);
                if !self.tiktok.initialize(proxy.as_deref()).await.is_ready() {
                    tracing::warn!(
                        "Proxy rotation failed, skipping TikTok @{}",
                        handle
                    );
                    continue;
                }
            }

            tracing::debug!("TikTok @{}: {}", handle, HandleState::Fetching);
            let posts = self
                .tiktok
                .fetch_recent_posts(handle, self.posts_per_user)
                .await;
            store.extend(posts);
            tracing::debug!("TikTok @{}: {}", handle, HandleState::Done);

            self.sleeper.sleep(self.pacing.tiktok_inter_user).await;
        }
    }
}
