//! HTTP fetching for the article page and the card background image.
//!
//! Neither fetch retries. A failed page fetch ends the run early and cleanly;
//! a failed image fetch is fatal.

use crate::error::{Error, Result};
use crate::models::NewsPage;
use image::DynamicImage;
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

/// Derive the display label for a URL: its host (and port, if any) with one
/// leading `www.` removed.
///
/// The label is purely syntactic. Anything that does not parse as an absolute
/// URL yields an empty string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(source_label("https://www.example.com/a"), "example.com");
/// assert_eq!(source_label("https://example.com/a"), "example.com");
/// ```
pub fn source_label(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };
    let host = host.strip_prefix("www.").unwrap_or(host);
    match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Fetch the raw HTML of an article.
///
/// # Errors
///
/// [`Error::Http`] on transport failure, [`Error::Status`] on a non-success
/// status.
#[instrument(level = "info", skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<NewsPage> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let html = response.text().await?;
    let source = source_label(url);
    info!(bytes = html.len(), %source, "Fetched article page");

    Ok(NewsPage {
        url: url.to_string(),
        source,
        html,
    })
}

/// Download and decode the card background image.
#[instrument(level = "info", skip(client))]
pub async fn fetch_image(client: &Client, url: &str) -> Result<DynamicImage> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    let image = image::load_from_memory(&bytes)?;
    debug!(bytes = bytes.len(), "Downloaded image body");
    info!(width = image.width(), height = image.height(), "Decoded background image");
    Ok(image)
}
