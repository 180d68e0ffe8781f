//! Instagram client capability and native media shapes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Result;
use crate::post::MediaTypeField;

/// A media item as the Instagram service reports it. The client library is
/// inconsistent about which fields it populates, so everything beyond the
/// identifiers is optional and destructured defensively.
#[derive(Debug, Clone, Deserialize)]
pub struct IgMedia {
    pub id: String,

    /// Short code used in the canonical post URL.
    pub code: String,

    #[serde(default)]
    pub taken_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub caption_text: Option<String>,

    #[serde(default)]
    pub like_count: Option<u64>,

    #[serde(default)]
    pub comment_count: Option<u64>,

    /// Numeric code or symbolic name, depending on the library's mood.
    #[serde(default)]
    pub media_type: Option<MediaTypeField>,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub video_url: Option<String>,

    /// Carousel children, in display order.
    #[serde(default)]
    pub resources: Vec<IgResource>,
}

/// One carousel child. Independently typed and independently failable.
#[derive(Debug, Clone, Deserialize)]
pub struct IgResource {
    #[serde(default)]
    pub media_type: Option<MediaTypeField>,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub video_url: Option<String>,
}

/// Instagram service capability: login, handle lookup, media listing.
#[async_trait]
pub trait InstagramClient: Send + Sync {
    /// Full credential login.
    async fn login(&self, username: &str, password: &str) -> Result<()>;

    /// Login primed with a saved session id. Callers fall back to
    /// [`InstagramClient::login`] when this fails.
    async fn login_with_session(
        &self,
        username: &str,
        password: &str,
        session_id: &str,
    ) -> Result<()>;

    /// Resolve a handle to the platform-internal user id.
    async fn user_id_from_username(&self, handle: &str) -> Result<String>;

    /// List up to `amount` most recent media items for a user id.
    async fn user_medias(&self, user_id: &str, amount: usize) -> Result<Vec<IgMedia>>;
}
