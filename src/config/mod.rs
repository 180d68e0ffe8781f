//! Configuration loading and validation.

pub mod loader;
pub mod validation;

pub use loader::{Config, InstagramConfig, OptionsConfig, ProxyConfig, TikTokConfig};
pub use validation::validate_config;
