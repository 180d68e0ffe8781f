//! Social Harvester - collect recent posts and media from social platforms.
//!
//! This library harvests recent posts for a fixed set of account handles on
//! Instagram and TikTok, normalizes the heterogeneous per-platform post
//! schemas into one record format, and persists both the media files and a
//! structured result set to disk.
//!
//! # Features
//!
//! - Two platform adapters (Instagram, TikTok) behind one capability trait
//! - Streamed media downloads with bounded memory use
//! - Proxy rotation between TikTok accounts
//! - Rate-limit pacing between posts and between accounts
//! - Failure isolation: one bad asset/post/handle never aborts the run
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use social_harvester::config::Config;
//!
//! let config = Config::load(Path::new("config.toml"))?;
//! assert!(!config.instagram.handles.is_empty() || !config.tiktok.handles.is_empty());
//! # Ok::<(), social_harvester::error::Error>(())
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod harvest;
pub mod output;
pub mod platform;
pub mod post;
pub mod proxy;
pub mod store;

// Re-exports for convenience
pub use config::Config;
pub use download::MediaDownloader;
pub use error::{Error, Result};
pub use harvest::{Orchestrator, Pacing};
pub use platform::{InstagramAdapter, PlatformAdapter, Readiness, TikTokAdapter};
pub use post::{MediaKind, Platform, Post};
pub use proxy::ProxyPool;
pub use store::{ResultStore, RunSummary};
