//! Data models for fetched pages and parsed model replies.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`NewsPage`]: Raw HTML fetched from the article URL
//! - [`ParsedReply`]: The model's four-line reply, split into typed fields
//!
//! The reply template the model is asked to follow looks like:
//!
//! ```text
//! Summary: {Summary}
//! URL Image: {Image URL from HTML Element}
//! Source: {source}
//! Caption: {Caption for social media post}
//! ```

use crate::error::ReplyError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const SUMMARY_PREFIX: &str = "Summary:";
pub const URL_IMAGE_PREFIX: &str = "URL Image:";
pub const SOURCE_PREFIX: &str = "Source:";
pub const CAPTION_PREFIX: &str = "Caption:";

/// A news page as fetched from the user-supplied URL.
///
/// # Fields
///
/// * `url` - The URL the page was fetched from
/// * `source` - Display label derived from the URL host (e.g. `"example.com"`)
/// * `html` - The raw HTML body
#[derive(Debug, Clone)]
pub struct NewsPage {
    /// The URL of the article.
    pub url: String,
    /// Host-derived display label.
    pub source: String,
    /// Raw HTML body of the article page.
    pub html: String,
}

/// The model reply, parsed into named fields.
///
/// `summary`, `url_image` and `source` are required; a reply lacking any of
/// them fails to parse. The caption is kept for completeness but the card
/// renderer never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReply {
    /// Headline-style summary drawn on the card.
    pub summary: String,
    /// Image URL the model picked out of the HTML.
    pub url_image: String,
    /// Source label echoed back by the model.
    pub source: String,
    /// Suggested social-media caption.
    pub caption: Option<String>,
}

impl ParsedReply {
    /// Parse a raw reply.
    ///
    /// Each line is checked for a recognized prefix at its start; the rest of
    /// the line, trimmed, becomes the field value. Unrecognized lines (code
    /// fences, chatter) are ignored and a repeated prefix overrides the
    /// earlier value.
    pub fn parse(text: &str) -> Result<Self, ReplyError> {
        let mut summary = None;
        let mut url_image = None;
        let mut source = None;
        let mut caption = None;

        for line in text.trim().lines() {
            if let Some(rest) = line.strip_prefix(SUMMARY_PREFIX) {
                summary = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(URL_IMAGE_PREFIX) {
                url_image = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(SOURCE_PREFIX) {
                source = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(CAPTION_PREFIX) {
                caption = Some(rest.trim().to_string());
            }
        }

        Ok(ParsedReply {
            summary: summary.ok_or(ReplyError::MissingField(SUMMARY_PREFIX))?,
            url_image: url_image.ok_or(ReplyError::MissingField(URL_IMAGE_PREFIX))?,
            source: source.ok_or(ReplyError::MissingField(SOURCE_PREFIX))?,
            caption,
        })
    }
}

impl FromStr for ParsedReply {
    type Err = ReplyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
