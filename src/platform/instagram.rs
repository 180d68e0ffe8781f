//! Instagram platform adapter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::client::instagram::{IgMedia, IgResource, InstagramClient};
use crate::download::MediaDownloader;
use crate::fs::{carousel_child_filename, ensure_dir, handle_dir, post_filename};
use crate::harvest::pacing::Sleeper;
use crate::platform::{PlatformAdapter, Readiness};
use crate::post::{MediaKind, Platform, Post};

/// Harvests recent Instagram posts for configured handles.
///
/// One session serves the whole run; Instagram sessions are account-bound,
/// not proxy-bound, so the orchestrator never rotates proxies here.
pub struct InstagramAdapter {
    client: Arc<dyn InstagramClient>,
    downloader: Arc<MediaDownloader>,
    sleeper: Arc<dyn Sleeper>,
    output_root: PathBuf,
    username: Option<String>,
    password: Option<String>,
    session_id: Option<String>,
    /// Applied after every processed post. Violating this risks account
    /// suspension.
    inter_post_delay: Duration,
}

impl InstagramAdapter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client: Arc<dyn InstagramClient>,
        downloader: Arc<MediaDownloader>,
        sleeper: Arc<dyn Sleeper>,
        output_root: PathBuf,
        username: Option<String>,
        password: Option<String>,
        session_id: Option<String>,
        inter_post_delay: Duration,
    ) -> Self {
        Self {
            client,
            downloader,
            sleeper,
            output_root,
            username,
            password,
            session_id,
            inter_post_delay,
        }
    }

    /// Process one media item into a post. Download failures are data, not
    /// errors: the post is emitted with whatever files were written.
    async fn process_media(&self, handle: &str, media: &IgMedia, user_dir: &PathBuf) -> Post {
        let kind = media
            .media_type
            .as_ref()
            .map(|t| t.classify())
            .unwrap_or(MediaKind::Unknown);

        let mut post = Post {
            platform: Platform::Instagram,
            username: handle.to_string(),
            post_id: media.id.clone(),
            post_url: Post::instagram_url(&media.code),
            timestamp: media.taken_at.unwrap_or_else(Utc::now),
            caption: media.caption_text.clone().unwrap_or_default(),
            likes: media.like_count.unwrap_or(0),
            comments: media.comment_count.unwrap_or(0),
            views: None,
            shares: None,
            media_type: kind,
            media_files: Vec::new(),
            download_note: None,
        };

        match kind {
            MediaKind::Photo => {
                if let Some(url) = media.thumbnail_url.as_deref() {
                    let dest = user_dir.join(post_filename(&media.id, kind.extension()));
                    if self.fetch_logged(url, &dest, &media.id).await {
                        post.media_files.push(dest);
                    }
                }
            }
            MediaKind::Video => {
                if let Some(url) = media.video_url.as_deref() {
                    let dest = user_dir.join(post_filename(&media.id, kind.extension()));
                    if self.fetch_logged(url, &dest, &media.id).await {
                        post.media_files.push(dest);
                    }
                }
            }
            MediaKind::Carousel => {
                for (index, resource) in media.resources.iter().enumerate() {
                    self.process_carousel_child(&mut post, &media.id, index, resource, user_dir)
                        .await;
                }
            }
            MediaKind::Unknown => {
                tracing::debug!("Post {} has unknown media type, nothing to download", media.id);
            }
        }

        post
    }

    /// Download one carousel child. Failure of child i never prevents
    /// child i+1 from being attempted.
    async fn process_carousel_child(
        &self,
        post: &mut Post,
        post_id: &str,
        index: usize,
        resource: &IgResource,
        user_dir: &PathBuf,
    ) {
        let kind = resource
            .media_type
            .as_ref()
            .map(|t| t.classify())
            .unwrap_or(MediaKind::Unknown);

        let (url, extension) = match kind {
            MediaKind::Photo => (resource.thumbnail_url.as_deref(), kind.extension()),
            MediaKind::Video => (resource.video_url.as_deref(), kind.extension()),
            _ => {
                tracing::debug!("Carousel child {}/{} has unknown type, skipped", post_id, index);
                return;
            }
        };

        if let Some(url) = url {
            let dest = user_dir.join(carousel_child_filename(post_id, index, extension));
            if self.fetch_logged(url, &dest, post_id).await {
                post.media_files.push(dest);
            }
        }
    }

    async fn fetch_logged(&self, url: &str, dest: &PathBuf, post_id: &str) -> bool {
        match self.downloader.fetch(url, dest).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to download media for post {}: {}", post_id, e);
                false
            }
        }
    }
}

#[async_trait]
impl PlatformAdapter for InstagramAdapter {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn initialize(&mut self, _proxy: Option<&str>) -> Readiness {
        let (username, password) = match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => {
                tracing::warn!("Instagram credentials not configured, platform skipped");
                return Readiness::NotReady;
            }
        };

        // Try the saved session first; a stale session falls back to a
        // fresh credential login without failing the caller.
        if let Some(session_id) = self.session_id.as_deref() {
            tracing::info!("Using existing Instagram session");
            match self
                .client
                .login_with_session(username, password, session_id)
                .await
            {
                Ok(()) => {
                    tracing::info!("Instagram login successful for @{}", username);
                    return Readiness::Ready;
                }
                Err(e) => {
                    tracing::warn!("Session login failed, trying fresh login: {}", e);
                }
            }
        }

        match self.client.login(username, password).await {
            Ok(()) => {
                tracing::info!("Instagram login successful for @{}", username);
                if self.session_id.is_none() {
                    tracing::info!(
                        "Tip: save the session id as instagram.session_id to skip full login next run"
                    );
                }
                Readiness::Ready
            }
            Err(e) => {
                tracing::error!("Instagram login failed: {}", e);
                Readiness::NotReady
            }
        }
    }

    async fn fetch_recent_posts(&mut self, handle: &str, limit: usize) -> Vec<Post> {
        tracing::info!("Harvesting Instagram @{}...", handle);

        let user_id = match self.client.user_id_from_username(handle).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("Failed to resolve Instagram @{}: {}", handle, e);
                return Vec::new();
            }
        };

        let medias = match self.client.user_medias(&user_id, limit).await {
            Ok(medias) => medias,
            Err(e) => {
                tracing::error!("Failed to list media for @{}: {}", handle, e);
                return Vec::new();
            }
        };

        let user_dir = handle_dir(&self.output_root, Platform::Instagram, handle);
        if let Err(e) = ensure_dir(&user_dir) {
            tracing::warn!("Could not create {}: {}", user_dir.display(), e);
        }

        let mut posts = Vec::new();
        for media in medias.iter().take(limit) {
            let post = self.process_media(handle, media, &user_dir).await;
            posts.push(post);

            self.sleeper.sleep(self.inter_post_delay).await;
        }

        tracing::info!("Instagram @{}: {} posts harvested", handle, posts.len());
        posts
    }
}
