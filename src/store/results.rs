//! In-memory result set written out once at run end.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::post::{Platform, Post};

/// Per-platform post counts. Computed at flush time, never maintained
/// incrementally, so it cannot drift from the post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub instagram: usize,
    pub tiktok: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.instagram + self.tiktok
    }
}

/// Ordered collection of harvested posts. Owned exclusively by the
/// orchestrating worker; no synchronization needed while the run is
/// sequential.
#[derive(Debug, Default)]
pub struct ResultStore {
    posts: Vec<Post>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, post: Post) {
        self.posts.push(post);
    }

    pub fn extend(&mut self, posts: Vec<Post>) {
        self.posts.extend(posts);
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Count posts grouped by platform.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            instagram: self
                .posts
                .iter()
                .filter(|p| p.platform == Platform::Instagram)
                .count(),
            tiktok: self
                .posts
                .iter()
                .filter(|p| p.platform == Platform::TikTok)
                .count(),
        }
    }

    /// Serialize the full collection. Struct field order is fixed, so the
    /// same store always produces byte-identical output.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.posts)?)
    }

    /// Write the full collection to `path` and return the summary.
    pub async fn flush(&self, path: &Path) -> Result<RunSummary> {
        let json = self.to_json()?;
        tokio::fs::write(path, json).await?;
        tracing::info!("Results saved to {}", path.display());
        Ok(self.summary())
    }
}
