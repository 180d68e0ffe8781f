//! Media file downloading.

pub mod media;

pub use media::MediaDownloader;
