//! Unified post model shared by all platform adapters.

pub mod kind;
pub mod model;

pub use kind::{MediaKind, MediaTypeField};
pub use model::{Platform, Post};
