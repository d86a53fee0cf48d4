use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::ServerSettings;

use super::model::Track;

/// Why a catalog fetch produced no usable listing.
///
/// All variants are recoverable: the caller keeps its previous catalog
/// and playback state and may simply retry.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("catalog service returned HTTP {0}")]
    BadStatus(u16),

    #[error("malformed catalog listing: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid server base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Read-only HTTP client for the listing service.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    catalog_path: String,
}

impl CatalogClient {
    pub fn new(settings: &ServerSettings) -> Result<Self, CatalogError> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidBaseUrl(settings.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            .user_agent(concat!("remotune/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            catalog_path: settings.catalog_path.clone(),
        })
    }

    /// Fetch the current catalog from the listing service.
    ///
    /// Purely a read; on failure the caller keeps whatever catalog it
    /// already has.
    pub fn fetch_catalog(&self) -> Result<Vec<Track>, CatalogError> {
        let url = join_url(&self.base_url, &self.catalog_path);
        let response = self.http.get(&url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CatalogError::Unreachable(e)
            } else {
                CatalogError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::BadStatus(status.as_u16()));
        }

        let body = response.text()?;
        parse_catalog(&body)
    }

    /// Build the URL the audio worker uses to stream a track's bytes.
    pub fn media_url(&self, track: &Track) -> String {
        join_url(&self.base_url, &track.path)
    }
}

/// Parse the listing service's response: an ordered JSON array of
/// `{id, name, path}` objects. Array order is fetch order and is kept.
pub fn parse_catalog(body: &str) -> Result<Vec<Track>, CatalogError> {
    Ok(serde_json::from_str(body)?)
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
