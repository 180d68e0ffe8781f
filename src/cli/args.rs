//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Social media harvesting CLI.
#[derive(Parser, Debug)]
#[command(
    name = "social-harvester",
    version,
    about = "Harvest recent posts and media from Instagram and TikTok accounts",
    long_about = "Collects the most recent posts for a fixed set of account handles, \
                  downloads their media, and writes a normalized JSON result set."
)]
pub struct Args {
    /// Instagram handle(s) to harvest.
    #[arg(long = "instagram", value_delimiter = ',', num_args = 1..)]
    pub instagram_handles: Option<Vec<String>>,

    /// TikTok handle(s) to harvest.
    #[arg(long = "tiktok", value_delimiter = ',', num_args = 1..)]
    pub tiktok_handles: Option<Vec<String>>,

    /// Instagram login username.
    #[arg(long, env = "IG_USERNAME")]
    pub ig_username: Option<String>,

    /// Instagram login password.
    #[arg(long, env = "IG_PASSWORD")]
    pub ig_password: Option<String>,

    /// Saved Instagram session id (skips full login when valid).
    #[arg(long, env = "IG_SESSIONID")]
    pub ig_session_id: Option<String>,

    /// Single fallback proxy URI for TikTok.
    #[arg(long, env = "TIKTOK_PROXY")]
    pub proxy: Option<String>,

    /// Path to a JSON proxy list file.
    #[arg(long)]
    pub proxy_file: Option<PathBuf>,

    /// Root directory for downloaded media and the result file.
    #[arg(short = 'o', long = "output")]
    pub output_directory: Option<PathBuf>,

    /// Maximum recent posts fetched per handle.
    #[arg(short = 'n', long)]
    pub posts_per_user: Option<usize>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where
    /// specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(handles) = self.instagram_handles {
            config.instagram.handles = handles;
        }

        if let Some(handles) = self.tiktok_handles {
            config.tiktok.handles = handles;
        }

        if let Some(username) = self.ig_username {
            config.instagram.username = Some(username);
        }

        if let Some(password) = self.ig_password {
            config.instagram.password = Some(password);
        }

        if let Some(session_id) = self.ig_session_id {
            config.instagram.session_id = Some(session_id);
        }

        if let Some(proxy) = self.proxy {
            config.proxy.fallback = Some(proxy);
        }

        if let Some(file) = self.proxy_file {
            config.proxy.list_file = Some(file);
        }

        if let Some(dir) = self.output_directory {
            config.options.output_directory = dir;
        }

        if let Some(n) = self.posts_per_user {
            config.options.posts_per_user = n;
        }
    }
}
