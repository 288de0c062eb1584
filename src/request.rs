use std::time::Duration;

use reqwest::Client;
use scraper::Html;

use crate::{error_time, Result, REQUEST_TIMEOUT_SECS};

/// Downloads pages one at a time with a fixed timeout.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Requests a page and returns a `Result<String>` containing the HTML.
    /// Any non-success status is turned into an error.
    pub async fn request_page_html(&self, url: &str) -> Result<String> {
        let res = self.client.get(url).send().await?.error_for_status()?;
        let html = res.text().await?;
        Ok(html)
    }

    /// Downloads and parses the page. Failures are logged and reported as `None`,
    /// the caller decides whether that is fatal.
    pub async fn fetch_page(&self, url: &str) -> Option<Html> {
        match self.request_page_html(url).await {
            Ok(html) => Some(Html::parse_document(&html)),
            Err(e) => {
                error_time!("Download error: {e}");
                None
            }
        }
    }
}
