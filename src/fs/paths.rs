//! Path and directory management.
//!
//! Media lands under `root/<platform>/<handle>/` with names that preserve
//! the (post_id, child_index) ordering for carousel children.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::post::Platform;

/// Directory for one handle's media.
pub fn handle_dir(root: &Path, platform: Platform, handle: &str) -> PathBuf {
    root.join(platform.dir_name()).join(handle)
}

/// Filename for a post's single representative asset.
pub fn post_filename(post_id: &str, extension: &str) -> String {
    format!("{}.{}", post_id, extension)
}

/// Filename for carousel child `index` of a post.
pub fn carousel_child_filename(post_id: &str, index: usize, extension: &str) -> String {
    format!("{}_{}.{}", post_id, index, extension)
}

/// Filename for a fallback thumbnail.
pub fn thumbnail_filename(post_id: &str) -> String {
    format!("{}_thumb.jpg", post_id)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Create the full output tree for the configured handles at run start.
pub fn bootstrap_output_tree(
    root: &Path,
    instagram_handles: &[String],
    tiktok_handles: &[String],
) -> Result<()> {
    ensure_dir(root)?;
    for handle in instagram_handles {
        ensure_dir(&handle_dir(root, Platform::Instagram, handle))?;
    }
    for handle in tiktok_handles {
        ensure_dir(&handle_dir(root, Platform::TikTok, handle))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_dir_layout() {
        let path = handle_dir(Path::new("social_data"), Platform::Instagram, "samsunguk");
        assert_eq!(path, PathBuf::from("social_data/instagram/samsunguk"));

        let path = handle_dir(Path::new("social_data"), Platform::TikTok, "apple");
        assert_eq!(path, PathBuf::from("social_data/tiktok/apple"));
    }

    #[test]
    fn test_filenames() {
        assert_eq!(post_filename("123", "jpg"), "123.jpg");
        assert_eq!(carousel_child_filename("123", 0, "mp4"), "123_0.mp4");
        assert_eq!(carousel_child_filename("123", 7, "jpg"), "123_7.jpg");
        assert_eq!(thumbnail_filename("789"), "789_thumb.jpg");
    }

    #[test]
    fn test_bootstrap_creates_tree() {
        let dir = tempfile::tempdir().unwrap();
        bootstrap_output_tree(
            dir.path(),
            &["brandA".to_string()],
            &["brandB".to_string()],
        )
        .unwrap();

        assert!(dir.path().join("instagram/brandA").is_dir());
        assert!(dir.path().join("tiktok/brandB").is_dir());
    }
}
