//! Street-view imagery adapters.
//!
//! Two sources: bundled imagery resolved through the graph data's
//! segment-image table, and a remote image host reached over HTTP.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ImageError;
use crate::traits::{GraphDataProvider, ImageFetcher};

#[derive(Debug, Clone)]
pub struct StreetViewConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for StreetViewConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/street-view".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Fetches segment imagery over HTTP.
///
/// The image body is pulled eagerly so the bytes are decoded and warm in
/// the HTTP cache by the time the rendering layer displays the URL.
#[derive(Debug, Clone)]
pub struct StreetViewClient {
    config: StreetViewConfig,
    client: reqwest::Client,
}

impl StreetViewClient {
    pub fn new(config: StreetViewConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

/// Resolves segment keys through the provider's segment-image table.
///
/// Used when imagery ships with the building data instead of living on
/// an image host. Segments without a table entry are expected; the cache
/// shows the placeholder for them.
pub struct StaticImageFetcher<G> {
    graph: Arc<G>,
}

impl<G> StaticImageFetcher<G> {
    pub fn new(graph: Arc<G>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl<G: GraphDataProvider + Send + Sync + 'static> ImageFetcher for StaticImageFetcher<G> {
    async fn fetch(&self, key: &str) -> Result<String, ImageError> {
        let unknown = || ImageError::Unknown(key.to_string());

        let (from, to) = key.split_once('-').ok_or_else(unknown)?;
        let from: usize = from.parse().map_err(|_| unknown())?;
        let to: usize = to.parse().map_err(|_| unknown())?;

        self.graph
            .segment_image(from, to)
            .map(str::to_string)
            .ok_or_else(unknown)
    }
}

#[async_trait]
impl ImageFetcher for StreetViewClient {
    async fn fetch(&self, key: &str) -> Result<String, ImageError> {
        let url = format!("{}/{}.jpg", self.config.base_url, key);

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?;
        response.bytes().await?;

        Ok(url)
    }
}
