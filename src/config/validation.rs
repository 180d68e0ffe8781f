//! Configuration validation logic.
//!
//! Missing Instagram credentials are deliberately not a validation error:
//! the run degrades to whatever platforms remain usable. Validation only
//! rejects values that are malformed.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Minimum handle length (after stripping a leading '@').
const MIN_HANDLE_LENGTH: usize = 2;

/// Maximum handle length.
const MAX_HANDLE_LENGTH: usize = 30;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_handles(&config.instagram.handles)?;
    validate_handles(&config.tiktok.handles)?;

    if config.instagram.handles.is_empty() && config.tiktok.handles.is_empty() {
        return Err(Error::MissingConfig(
            "handles (at least one Instagram or TikTok handle required)".to_string(),
        ));
    }

    if config.options.posts_per_user == 0 {
        return Err(Error::ConfigValidation {
            field: "posts_per_user".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if let Some(fallback) = &config.proxy.fallback {
        url::Url::parse(fallback).map_err(|e| Error::ConfigValidation {
            field: "proxy.fallback".to_string(),
            message: format!("not a valid URI: {}", e),
        })?;
    }

    Ok(())
}

/// Validate account handles.
pub fn validate_handles<S: AsRef<str>, I: IntoIterator<Item = S>>(handles: I) -> Result<()> {
    // Handle pattern: alphanumeric, dots, hyphens, underscores
    let handle_pattern = Regex::new(r"^[a-zA-Z0-9._-]{2,30}$").unwrap();

    for handle in handles {
        let handle = handle.as_ref();
        let clean = handle.trim_start_matches('@');

        if clean.len() < MIN_HANDLE_LENGTH {
            return Err(Error::ConfigValidation {
                field: "handles".to_string(),
                message: format!(
                    "Handle '{}' is too short (minimum {} characters)",
                    handle, MIN_HANDLE_LENGTH
                ),
            });
        }

        if clean.len() > MAX_HANDLE_LENGTH {
            return Err(Error::ConfigValidation {
                field: "handles".to_string(),
                message: format!(
                    "Handle '{}' is too long (maximum {} characters)",
                    handle, MAX_HANDLE_LENGTH
                ),
            });
        }

        if !handle_pattern.is_match(clean) {
            return Err(Error::ConfigValidation {
                field: "handles".to_string(),
                message: format!(
                    "Handle '{}' contains invalid characters. Only alphanumeric, dots, hyphens, and underscores allowed.",
                    handle
                ),
            });
        }

        let lower = clean.to_lowercase();
        if lower == "replaceme" || lower == "handle" || lower == "username" {
            return Err(Error::ConfigValidation {
                field: "handles".to_string(),
                message: format!(
                    "Handle '{}' appears to be a placeholder. Please provide actual account handles.",
                    handle
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{InstagramConfig, OptionsConfig, ProxyConfig, TikTokConfig};

    fn make_config() -> Config {
        Config {
            instagram: InstagramConfig {
                handles: vec!["samsunguk".into()],
                ..Default::default()
            },
            tiktok: TikTokConfig::default(),
            proxy: ProxyConfig::default(),
            options: OptionsConfig::default(),
        }
    }

    #[test]
    fn test_valid_handles() {
        assert!(validate_handles(&["samsunguk"]).is_ok());
        assert!(validate_handles(&["@googlepixel"]).is_ok());
        assert!(validate_handles(&["some.brand_uk"]).is_ok());
    }

    #[test]
    fn test_invalid_handle_too_short() {
        assert!(validate_handles(&["a"]).is_err());
    }

    #[test]
    fn test_invalid_handle_characters() {
        assert!(validate_handles(&["bad handle"]).is_err());
        assert!(validate_handles(&["emoji🙂"]).is_err());
    }

    #[test]
    fn test_placeholder_rejected() {
        assert!(validate_handles(&["replaceme"]).is_err());
    }

    #[test]
    fn test_no_handles_at_all_rejected() {
        let mut config = make_config();
        config.instagram.handles.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_credentials_not_fatal() {
        let config = make_config();
        assert!(!config.instagram.has_credentials());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_posts_per_user_rejected() {
        let mut config = make_config();
        config.options.posts_per_user = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_fallback_proxy_rejected() {
        let mut config = make_config();
        config.proxy.fallback = Some("not a uri".into());
        assert!(validate_config(&config).is_err());
    }
}
