//! Media kind classification.
//!
//! Platform client libraries are inconsistent about how they report a media
//! type: the same field arrives either as a numeric code (1, 2, 8) or as a
//! symbolic name ("photo", "video", "carousel"). Both paths funnel through
//! one total classification here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified media type of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    Carousel,
    Unknown,
}

impl MediaKind {
    /// Classify from a numeric platform code.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => MediaKind::Photo,
            2 => MediaKind::Video,
            8 => MediaKind::Carousel,
            _ => MediaKind::Unknown,
        }
    }

    /// Classify from a symbolic name (case-insensitive).
    pub fn from_symbol(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "photo" => MediaKind::Photo,
            "video" => MediaKind::Video,
            "carousel" => MediaKind::Carousel,
            _ => MediaKind::Unknown,
        }
    }

    /// File extension for a single representative asset of this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Photo => "jpg",
            MediaKind::Video | MediaKind::Carousel => "mp4",
            MediaKind::Unknown => "bin",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Carousel => write!(f, "carousel"),
            MediaKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A media type field as the client library actually delivers it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MediaTypeField {
    Code(i64),
    Name(String),
}

impl MediaTypeField {
    /// Total classification over either representation.
    pub fn classify(&self) -> MediaKind {
        match self {
            MediaTypeField::Code(code) => MediaKind::from_code(*code),
            MediaTypeField::Name(name) => MediaKind::from_symbol(name),
        }
    }
}
