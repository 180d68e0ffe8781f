//! TikTok platform adapter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::client::tiktok::{TikTokClient, TtItem};
use crate::download::MediaDownloader;
use crate::fs::{ensure_dir, handle_dir, post_filename, thumbnail_filename};
use crate::harvest::pacing::Sleeper;
use crate::platform::{PlatformAdapter, Readiness};
use crate::post::{MediaKind, Platform, Post};

/// Note attached when the primary video could not be fetched and a cover
/// image was written instead.
pub const THUMBNAIL_NOTE: &str = "primary media blocked, thumbnail substituted";

/// Harvests recent TikTok posts for configured handles.
///
/// The session is proxy-bound: rotating the proxy requires re-running
/// `initialize`, which the orchestrator does before every handle after the
/// first.
pub struct TikTokAdapter {
    client: Arc<dyn TikTokClient>,
    downloader: Arc<MediaDownloader>,
    sleeper: Arc<dyn Sleeper>,
    output_root: PathBuf,
    /// Applied after every processed post. TikTok's anti-bot tolerance is
    /// stricter than Instagram's.
    inter_post_delay: Duration,
}

impl TikTokAdapter {
    pub fn new(
        client: Arc<dyn TikTokClient>,
        downloader: Arc<MediaDownloader>,
        sleeper: Arc<dyn Sleeper>,
        output_root: PathBuf,
        inter_post_delay: Duration,
    ) -> Self {
        Self {
            client,
            downloader,
            sleeper,
            output_root,
            inter_post_delay,
        }
    }

    /// Build a post from one feed item and acquire its media with the
    /// two-tier fallback: primary video, then cover thumbnail.
    async fn process_item(&self, handle: &str, item: &TtItem, user_dir: &PathBuf) -> Option<Post> {
        let id = match item.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                tracing::warn!("TikTok item for @{} has no id, skipped", handle);
                return None;
            }
        };

        let stats = item.stats.clone().unwrap_or_default();

        let mut post = Post {
            platform: Platform::TikTok,
            username: handle.to_string(),
            post_id: id.clone(),
            post_url: Post::tiktok_url(handle, &id),
            timestamp: epoch_to_utc(item.create_time.unwrap_or(0)),
            caption: item.desc.clone().unwrap_or_default(),
            likes: stats.digg_count.unwrap_or(0),
            comments: stats.comment_count.unwrap_or(0),
            views: Some(stats.play_count.unwrap_or(0)),
            shares: Some(stats.share_count.unwrap_or(0)),
            media_type: MediaKind::Video,
            media_files: Vec::new(),
            download_note: None,
        };

        let video = item.video.clone().unwrap_or_default();

        // Tier 1: primary video address.
        if let Some(url) = video.primary_url() {
            let dest = user_dir.join(post_filename(&id, "mp4"));
            match self.downloader.fetch(url, &dest).await {
                Ok(()) => {
                    post.media_files.push(dest);
                    return Some(post);
                }
                Err(e) => {
                    tracing::warn!("Primary video download failed for {}: {}", id, e);
                }
            }
        }

        // Tier 2: cover thumbnail instead.
        if let Some(url) = video.cover_url() {
            let dest = user_dir.join(thumbnail_filename(&id));
            match self.downloader.fetch(url, &dest).await {
                Ok(()) => {
                    tracing::info!("Downloaded thumbnail for video {} (video blocked)", id);
                    post.media_files.push(dest);
                    post.download_note = Some(THUMBNAIL_NOTE.to_string());
                }
                Err(e) => {
                    tracing::warn!("Thumbnail download failed for {}: {}", id, e);
                }
            }
        } else if post.media_files.is_empty() {
            tracing::warn!("No video or thumbnail URL available for {}", id);
        }

        Some(post)
    }
}

fn epoch_to_utc(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[async_trait]
impl PlatformAdapter for TikTokAdapter {
    fn platform(&self) -> Platform {
        Platform::TikTok
    }

    async fn initialize(&mut self, proxy: Option<&str>) -> Readiness {
        if let Some(uri) = proxy {
            // Log without the credential part of the URI.
            let visible = uri.split('@').nth(1).unwrap_or(uri);
            tracing::info!("Opening TikTok session via proxy {}", visible);
        }

        match self.client.open_session(proxy).await {
            Ok(()) => {
                tracing::info!("TikTok session initialized");
                Readiness::Ready
            }
            Err(e) => {
                tracing::error!("TikTok session setup failed: {}", e);
                Readiness::NotReady
            }
        }
    }

    async fn fetch_recent_posts(&mut self, handle: &str, limit: usize) -> Vec<Post> {
        tracing::info!("Harvesting TikTok @{}...", handle);

        let sec_uid = match self.client.resolve_sec_uid(handle).await {
            Ok(Some(sec_uid)) => sec_uid,
            Ok(None) => {
                tracing::error!("Could not resolve secUid for @{}", handle);
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("secUid lookup failed for @{}: {}", handle, e);
                return Vec::new();
            }
        };

        let feed = match self.client.user_feed(&sec_uid, limit).await {
            Ok(feed) => feed,
            Err(e) => {
                tracing::error!("Failed to fetch TikTok feed for @{}: {}", handle, e);
                return Vec::new();
            }
        };

        let user_dir = handle_dir(&self.output_root, Platform::TikTok, handle);
        if let Err(e) = ensure_dir(&user_dir) {
            tracing::warn!("Could not create {}: {}", user_dir.display(), e);
        }

        let mut posts = Vec::new();
        for item in feed.item_list.iter().take(limit) {
            if let Some(post) = self.process_item(handle, item, &user_dir).await {
                posts.push(post);
            }

            self.sleeper.sleep(self.inter_post_delay).await;
        }

        tracing::info!("TikTok @{}: {} posts harvested", handle, posts.len());
        posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tiktok::{TtFeed, TtStats, TtVideo};
    use crate::error::{Error, Result};
    use crate::harvest::pacing::testing::RecordingSleeper;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct MockTikTok {
        session_ok: bool,
        sec_uid: Option<String>,
        items: Vec<TtItem>,
        sessions: Mutex<Vec<Option<String>>>,
    }

    impl MockTikTok {
        fn new(items: Vec<TtItem>) -> Self {
            Self {
                session_ok: true,
                sec_uid: Some("sec-1".into()),
                items,
                sessions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TikTokClient for MockTikTok {
        async fn open_session(&self, proxy: Option<&str>) -> Result<()> {
            self.sessions
                .lock()
                .unwrap()
                .push(proxy.map(str::to_string));
            if self.session_ok {
                Ok(())
            } else {
                Err(Error::Authentication("proxy refused".into()))
            }
        }

        async fn resolve_sec_uid(&self, _handle: &str) -> Result<Option<String>> {
            Ok(self.sec_uid.clone())
        }

        async fn user_feed(&self, _sec_uid: &str, count: usize) -> Result<TtFeed> {
            Ok(TtFeed {
                item_list: self.items.iter().take(count).cloned().collect(),
            })
        }
    }

    fn item(id: &str, video: TtVideo) -> TtItem {
        TtItem {
            id: Some(id.into()),
            desc: Some("clip".into()),
            create_time: Some(1_700_000_000),
            stats: Some(TtStats {
                digg_count: Some(10),
                comment_count: Some(2),
                play_count: Some(500),
                share_count: Some(3),
            }),
            video: Some(video),
        }
    }

    fn adapter(
        client: Arc<dyn TikTokClient>,
        root: PathBuf,
    ) -> (TikTokAdapter, Arc<RecordingSleeper>) {
        let sleeper = Arc::new(RecordingSleeper::default());
        let adapter = TikTokAdapter::new(
            client,
            Arc::new(MediaDownloader::new().unwrap().quiet()),
            sleeper.clone(),
            root,
            Duration::from_secs(2),
        );
        (adapter, sleeper)
    }

    #[tokio::test]
    async fn test_failed_session_is_not_ready() {
        let client = Arc::new(MockTikTok {
            session_ok: false,
            ..MockTikTok::new(vec![])
        });
        let dir = tempfile::tempdir().unwrap();
        let (mut adapter, _) = adapter(client, dir.path().to_path_buf());
        assert_eq!(adapter.initialize(Some("http://u:p@h:1")).await, Readiness::NotReady);
    }

    #[tokio::test]
    async fn test_unresolved_sec_uid_yields_empty() {
        let client = Arc::new(MockTikTok {
            sec_uid: None,
            ..MockTikTok::new(vec![item("1", TtVideo::default())])
        });
        let dir = tempfile::tempdir().unwrap();
        let (mut adapter, _) = adapter(client, dir.path().to_path_buf());

        assert!(adapter.fetch_recent_posts("ghost", 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_primary_video_downloaded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"vid".to_vec()))
            .mount(&server)
            .await;

        let video = TtVideo {
            download_addr: Some(format!("{}/v.mp4", server.uri())),
            cover: Some(format!("{}/never.jpg", server.uri())),
            ..Default::default()
        };

        let dir = tempfile::tempdir().unwrap();
        let (mut adapter, sleeper) = adapter(
            Arc::new(MockTikTok::new(vec![item("789", video)])),
            dir.path().to_path_buf(),
        );

        let posts = adapter.fetch_recent_posts("brandB", 10).await;
        assert_eq!(posts.len(), 1);

        let post = &posts[0];
        assert_eq!(post.post_id, "789");
        assert_eq!(post.views, Some(500));
        assert_eq!(post.shares, Some(3));
        assert_eq!(post.media_files.len(), 1);
        assert!(post.media_files[0].ends_with("tiktok/brandB/789.mp4"));
        assert!(post.download_note.is_none());

        assert_eq!(
            *sleeper.slept.lock().unwrap(),
            vec![Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn test_thumbnail_fallback_sets_note() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cover.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
            .mount(&server)
            .await;

        // No primary URL at all, valid cover.
        let video = TtVideo {
            cover: Some(format!("{}/cover.jpg", server.uri())),
            ..Default::default()
        };

        let dir = tempfile::tempdir().unwrap();
        let (mut adapter, _) = adapter(
            Arc::new(MockTikTok::new(vec![item("42", video)])),
            dir.path().to_path_buf(),
        );

        let posts = adapter.fetch_recent_posts("brandB", 10).await;
        let post = &posts[0];
        assert_eq!(post.media_files.len(), 1);
        assert!(post.media_files[0].ends_with("tiktok/brandB/42_thumb.jpg"));
        assert_eq!(post.download_note.as_deref(), Some(THUMBNAIL_NOTE));
    }

    #[tokio::test]
    async fn test_blocked_video_falls_back_to_thumbnail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blocked.mp4"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cover.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
            .mount(&server)
            .await;

        let video = TtVideo {
            play_addr: Some(format!("{}/blocked.mp4", server.uri())),
            origin_cover: Some(format!("{}/cover.jpg", server.uri())),
            ..Default::default()
        };

        let dir = tempfile::tempdir().unwrap();
        let (mut adapter, _) = adapter(
            Arc::new(MockTikTok::new(vec![item("43", video)])),
            dir.path().to_path_buf(),
        );

        let posts = adapter.fetch_recent_posts("brandB", 10).await;
        let post = &posts[0];
        assert_eq!(post.media_files.len(), 1);
        assert!(post.media_files[0].ends_with("tiktok/brandB/43_thumb.jpg"));
        assert_eq!(post.download_note.as_deref(), Some(THUMBNAIL_NOTE));
    }

    #[tokio::test]
    async fn test_no_urls_emits_post_without_note() {
        let dir = tempfile::tempdir().unwrap();
        let (mut adapter, _) = adapter(
            Arc::new(MockTikTok::new(vec![item("44", TtVideo::default())])),
            dir.path().to_path_buf(),
        );

        let posts = adapter.fetch_recent_posts("brandB", 10).await;
        assert_eq!(posts.len(), 1);
        assert!(posts[0].media_files.is_empty());
        assert!(posts[0].download_note.is_none());
    }

    #[tokio::test]
    async fn test_item_without_id_is_skipped_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        let items = vec![
            TtItem::default(),
            item("45", TtVideo::default()),
        ];
        let (mut adapter, _) = adapter(
            Arc::new(MockTikTok::new(items)),
            dir.path().to_path_buf(),
        );

        let posts = adapter.fetch_recent_posts("brandB", 10).await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].post_id, "45");
    }
}
