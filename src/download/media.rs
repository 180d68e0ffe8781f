//! Streamed media downloads.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Per-request timeout for a single media download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimum file size to show a progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Downloads binary media by URL to a destination path.
///
/// The body is streamed in chunks so memory stays bounded regardless of
/// media size, and written to a `.part` sibling that is renamed into place
/// only on success, so a failed download never leaves a partial final
/// artifact. No retry happens at this layer.
pub struct MediaDownloader {
    client: Client,
    show_progress: bool,
}

impl MediaDownloader {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
        Ok(Self {
            client,
            show_progress: true,
        })
    }

    /// Disable the progress bar (tests, quiet mode).
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Fetch `url` into `dest`. Creates exactly one file on success.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download(format!(
                "HTTP {} fetching {}",
                status, url
            )));
        }

        let content_length = response.content_length();
        let progress = if self.show_progress
            && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false)
        {
            let pb = ProgressBar::new(content_length.unwrap_or(0));
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let part_path = dest.with_extension(match dest.extension() {
            Some(ext) => format!("{}.part", ext.to_string_lossy()),
            None => "part".to_string(),
        });

        let write_result = async {
            let mut file = File::create(&part_path).await?;
            let mut stream = response.bytes_stream();
            let mut downloaded: u64 = 0;

            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
                file.write_all(&chunk).await?;
                downloaded += chunk.len() as u64;

                if let Some(ref pb) = progress {
                    pb.set_position(downloaded);
                }
            }

            file.flush().await?;
            Ok::<(), Error>(())
        }
        .await;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        if let Err(e) = write_result {
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(e);
        }

        tokio::fs::rename(&part_path, dest).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_writes_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpegdata".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("123.jpg");

        let downloader = MediaDownloader::new().unwrap().quiet();
        downloader
            .fetch(&format!("{}/media.jpg", server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"jpegdata");
        assert!(!dir.path().join("123.jpg.part").exists());
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_leaves_no_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.mp4"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("456.mp4");

        let downloader = MediaDownloader::new().unwrap().quiet();
        let result = downloader
            .fetch(&format!("{}/gone.mp4", server.uri()), &dest)
            .await;

        assert!(matches!(result, Err(Error::Download(_))));
        assert!(!dest.exists());
        assert!(!dir.path().join("456.mp4.part").exists());
    }

    #[tokio::test]
    async fn test_fetch_network_error_is_contained() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("789.jpg");

        let downloader = MediaDownloader::new().unwrap().quiet();
        let result = downloader
            .fetch("http://127.0.0.1:1/unreachable.jpg", &dest)
            .await;

        assert!(result.is_err());
        assert!(!dest.exists());
    }
}
