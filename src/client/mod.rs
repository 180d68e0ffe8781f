//! Platform client capabilities.
//!
//! The underlying platform services are opaque collaborators: login, handle
//! lookup, and recent-item listing. They are expressed as traits so the
//! adapters can be exercised against mocks, with thin reqwest-backed
//! implementations for the real run.

pub mod http;
pub mod instagram;
pub mod tiktok;

pub use http::{HttpInstagramClient, HttpTikTokClient};
pub use instagram::{IgMedia, IgResource, InstagramClient};
pub use tiktok::{TikTokClient, TtFeed, TtItem, TtStats, TtVideo};
