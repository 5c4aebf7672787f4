//! The end-to-end run: fetch → summarize → save reply → parse → render → save card.
//!
//! Steps run strictly one after another. The reply is parsed and the font is
//! loaded before the background image is requested, so a malformed reply or
//! a missing font never costs an image download.

use crate::api::{AskAsync, summarize};
use crate::config::Settings;
use crate::error::Result;
use crate::fetch::{fetch_image, fetch_page};
use crate::models::ParsedReply;
use crate::outputs::{png::save_png, text::save_text};
use crate::render::{CardLayout, OverlayFont, render_card};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// How a run ended, short of a fatal error.
#[derive(Debug)]
pub enum RunOutcome {
    /// Both output files were written.
    Completed {
        reply: ParsedReply,
        text_path: PathBuf,
        image_path: PathBuf,
    },
    /// The article page could not be fetched; nothing was written.
    PageUnavailable,
}

/// Produce a news card for `url`.
///
/// A failed page fetch is logged and reported as
/// [`RunOutcome::PageUnavailable`]. Every later failure (model call, reply
/// parsing, font, image download, file writes) is returned as an error.
#[instrument(level = "info", skip(http, asker, settings))]
pub async fn run<A>(http: &Client, asker: &A, settings: &Settings, url: &str) -> Result<RunOutcome>
where
    A: AskAsync<Response = String>,
{
    let page = match fetch_page(http, url).await {
        Ok(page) => page,
        Err(e) => {
            error!(error = %e, "Error occurred while fetching the website");
            return Ok(RunOutcome::PageUnavailable);
        }
    };

    let reply_text = summarize(asker, &page).await?;
    let text_path = settings.text_output_path();
    save_text(&reply_text, &text_path).await?;

    let reply = ParsedReply::parse(&reply_text).inspect_err(|e| {
        warn!(
            error = %e,
            reply_preview = %truncate_for_log(&reply_text, 300),
            "Model reply does not follow the template"
        );
    })?;
    info!(url_image = %reply.url_image, source = %reply.source, "Parsed model reply");

    let font = OverlayFont::load(&settings.font_path).await?;
    let background = fetch_image(http, &reply.url_image).await?;
    let canvas = render_card(
        &reply.summary,
        &reply.source,
        &background,
        &font,
        &CardLayout::default(),
    );

    let image_path = settings.image_output_path();
    save_png(&canvas, &image_path).await?;

    Ok(RunOutcome::Completed {
        reply,
        text_path,
        image_path,
    })
}
