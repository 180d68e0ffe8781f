//! TikTok client capability and native item shapes.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

/// User feed response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtFeed {
    #[serde(default)]
    pub item_list: Vec<TtItem>,
}

/// One feed item. Every field may be absent; the adapter destructures
/// defensively.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtItem {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub desc: Option<String>,

    /// Creation time as a unix epoch in seconds.
    #[serde(default)]
    pub create_time: Option<i64>,

    #[serde(default)]
    pub stats: Option<TtStats>,

    #[serde(default)]
    pub video: Option<TtVideo>,
}

/// Engagement counters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtStats {
    #[serde(default)]
    pub digg_count: Option<u64>,

    #[serde(default)]
    pub comment_count: Option<u64>,

    #[serde(default)]
    pub play_count: Option<u64>,

    #[serde(default)]
    pub share_count: Option<u64>,
}

/// Video addresses. TikTok frequently blocks the primary addresses, leaving
/// only the cover images reachable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtVideo {
    #[serde(default)]
    pub download_addr: Option<String>,

    #[serde(default)]
    pub play_addr: Option<String>,

    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default)]
    pub origin_cover: Option<String>,
}

impl TtVideo {
    /// Primary video address: prefer the direct-download address, fall back
    /// to the play address.
    pub fn primary_url(&self) -> Option<&str> {
        self.download_addr
            .as_deref()
            .or(self.play_addr.as_deref())
            .filter(|u| !u.is_empty())
    }

    /// Cover/thumbnail address used when the primary is blocked.
    pub fn cover_url(&self) -> Option<&str> {
        self.cover
            .as_deref()
            .or(self.origin_cover.as_deref())
            .filter(|u| !u.is_empty())
    }
}

/// TikTok service capability. The session is bound to the proxy it was
/// opened with; changing proxy requires a fresh `open_session`.
#[async_trait]
pub trait TikTokClient: Send + Sync {
    /// Establish a session, optionally through a proxy.
    async fn open_session(&self, proxy: Option<&str>) -> Result<()>;

    /// One-shot lookup of the secondary user id for a handle. `None` when
    /// the handle cannot be resolved.
    async fn resolve_sec_uid(&self, handle: &str) -> Result<Option<String>>;

    /// Request up to `count` recent items for a secondary user id.
    async fn user_feed(&self, sec_uid: &str, count: usize) -> Result<TtFeed>;
}
