//! Result accumulation and serialization.

pub mod results;

pub use results::{ResultStore, RunSummary};
