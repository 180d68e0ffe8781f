//! Proxy list loading and random selection.

pub mod pool;

pub use pool::{ProxyEntry, ProxyPool};
