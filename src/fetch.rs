use anyhow::Result;
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};

use crate::{
    config::FetchConfig, constants, error::TunerError, model::channel::Channel, parsers::m3u,
};

/// Downloads remote playlists.
pub struct Fetcher {
    client: Client,
    download_copy: Option<PathBuf>,
}

impl Fetcher {
    pub fn try_new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            download_copy: config.download_copy.clone(),
        })
    }

    /// Downloads and parses the playlist at `url`.
    /// Returns no channels if the url is invalid or the server can't be reached,
    /// if the download breaks off midway the complete lines received so far are parsed.
    pub async fn parse_from_url(&self, url: &str) -> Vec<Channel> {
        let body = match self.download(url).await {
            Ok(body) => body,
            Err(e) => {
                log::error!("error fetching playlist from `{}`: {}", url, e);
                return Vec::new();
            }
        };
        log::debug!(
            "first {} characters of the playlist: {}",
            constants::PREVIEW_CHARS,
            String::from_utf8_lossy(&body)
                .chars()
                .take(constants::PREVIEW_CHARS)
                .collect::<String>()
        );
        if let Some(path) = &self.download_copy {
            save_copy(path, &body).await;
        }

        m3u::parse(body.as_slice())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let url =
            Url::parse(url).map_err(|e| TunerError::Network(format!("invalid url: {}", e)))?;
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TunerError::Network(format!("HTTP {}", status)).into());
        }

        let mut body = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => body.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => {
                    log::error!("download interrupted after {} bytes: {}", body.len(), e);
                    // drop the line that was cut off
                    let end = body
                        .iter()
                        .rposition(|&b| b == b'\n' || b == b'\r')
                        .map_or(0, |i| i + 1);
                    body.truncate(end);
                    break;
                }
            }
        }
        log::info!("downloaded {} bytes", body.len());

        Ok(body)
    }
}

async fn save_copy(path: &Path, content: &[u8]) {
    match tokio::fs::write(path, content).await {
        Ok(()) => log::debug!("playlist saved to `{}`", path.to_string_lossy()),
        Err(e) => log::error!(
            "error saving playlist to `{}`: {}",
            path.to_string_lossy(),
            e
        ),
    }
}
