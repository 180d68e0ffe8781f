//! The normalized post record persisted to the aggregate result file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::post::kind::MediaKind;

/// Source platform of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    TikTok,
}

impl Platform {
    /// Directory name under the output root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Instagram => write!(f, "instagram"),
            Platform::TikTok => write!(f, "tiktok"),
        }
    }
}

/// A single harvested post, normalized across platforms.
///
/// `post_id` together with `platform` identifies the post. A post with zero
/// `media_files` is valid: download failures are recorded as data, not
/// dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub platform: Platform,
    pub username: String,
    pub post_id: String,
    pub post_url: String,
    pub timestamp: DateTime<Utc>,
    pub caption: String,
    pub likes: u64,
    pub comments: u64,

    /// View count (TikTok only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,

    /// Share count (TikTok only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,

    pub media_type: MediaKind,

    /// Local paths of successfully written media files, in platform order.
    pub media_files: Vec<PathBuf>,

    /// Set when primary media access was blocked and a thumbnail was
    /// substituted instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_note: Option<String>,
}

impl Post {
    /// Canonical post URL for an Instagram media code.
    pub fn instagram_url(code: &str) -> String {
        format!("https://www.instagram.com/p/{}/", code)
    }

    /// Canonical post URL for a TikTok video.
    pub fn tiktok_url(username: &str, id: &str) -> String {
        format!("https://www.tiktok.com/@{}/video/{}", username, id)
    }
}
