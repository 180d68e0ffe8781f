//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub instagram: InstagramConfig,

    #[serde(default)]
    pub tiktok: TikTokConfig,

    #[serde(default)]
    pub proxy: ProxyConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Instagram account and target configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstagramConfig {
    /// Instagram login username.
    #[serde(default)]
    pub username: Option<String>,

    /// Instagram login password.
    #[serde(default)]
    pub password: Option<String>,

    /// Saved session id to skip full login.
    #[serde(default)]
    pub session_id: Option<String>,

    /// Account handles to harvest.
    #[serde(default)]
    pub handles: Vec<String>,
}

impl InstagramConfig {
    /// Credentials present (both username and password)?
    pub fn has_credentials(&self) -> bool {
        matches!((&self.username, &self.password), (Some(u), Some(p)) if !u.is_empty() && !p.is_empty())
    }
}

/// TikTok target configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TikTokConfig {
    /// Account handles to harvest.
    #[serde(default)]
    pub handles: Vec<String>,
}

/// Proxy configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Path to a JSON file with a list of {host, port, username, password}
    /// records.
    #[serde(default)]
    pub list_file: Option<PathBuf>,

    /// Single fallback proxy URI, used when the list is absent or empty.
    #[serde(default)]
    pub fallback: Option<String>,
}

/// Run options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Root directory for downloaded media and the result file.
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// Maximum recent posts fetched per handle.
    #[serde(default = "default_posts_per_user")]
    pub posts_per_user: usize,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            posts_per_user: default_posts_per_user(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("social_data")
}

fn default_posts_per_user() -> usize {
    10
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Path of the aggregate result file under the output root.
    pub fn result_file(&self) -> PathBuf {
        self.options.output_directory.join("social_posts.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[instagram]
username = "me"
password = "secret"
handles = ["samsunguk", "apple"]

[tiktok]
handles = ["googlepixel"]

[proxy]
fallback = "http://u:p@proxy:3128"

[options]
posts_per_user = 5
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.instagram.has_credentials());
        assert_eq!(config.instagram.handles, vec!["samsunguk", "apple"]);
        assert_eq!(config.tiktok.handles, vec!["googlepixel"]);
        assert_eq!(config.options.posts_per_user, 5);
        assert_eq!(
            config.result_file(),
            PathBuf::from("social_data/social_posts.json")
        );
    }

    #[test]
    fn test_missing_sections_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[tiktok]\nhandles = [\"apple\"]\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.instagram.has_credentials());
        assert!(config.instagram.handles.is_empty());
        assert_eq!(config.options.posts_per_user, 10);
    }
}
