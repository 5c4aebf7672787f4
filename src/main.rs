//! # News Card
//!
//! Turns a news article into a square social-media card. The article HTML is
//! sent to Gemini, which answers with a headline-style summary, an image URL
//! from the page and a caption. The image is cover-cropped to 1080×1080 and
//! the summary is drawn over a white plate in its lower band.
//!
//! ## Usage
//!
//! ```sh
//! export GEMINI_API_KEY=...
//! news_card
//! Enter News Link: https://www.example.com/news/123
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pipeline:
//! 1. **Fetching**: Download the article HTML and derive the source label
//! 2. **Summarizing**: One Gemini `generateContent` call with a fixed prompt
//! 3. **Persisting**: Write the raw reply to `scraping_result.txt`
//! 4. **Composing**: Parse the reply, download the image, render the card
//!    and write `scraping_result.png`

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod render;
mod template;
mod utils;

use api::GeminiClient;
use cli::Cli;
use config::Settings;
use pipeline::RunOutcome;
use utils::ensure_writable_dir;

const USER_AGENT: &str = concat!("news_card/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; the key may come from the environment or --api-key.
    let _ = dotenvy::dotenv();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_card starting up");

    // Parse CLI and resolve settings before touching the network
    let args = Cli::parse();
    let settings = Settings::from_cli(&args).await.inspect_err(|e| {
        error!(error = %e, "Startup configuration is invalid");
    })?;
    debug!(?settings, "Resolved settings");

    if let Err(e) = ensure_writable_dir(&settings.output_dir).await {
        error!(
            path = %settings.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let url = args.resolve_url(&mut std::io::stdin().lock(), &mut std::io::stdout())?;
    if url.is_empty() {
        error!("No news link given");
        return Ok(());
    }

    let http = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(settings.generation.timeout())
        .build()?;
    let gemini = GeminiClient::new(
        http.clone(),
        settings.api_key.clone(),
        settings.generation.clone(),
    );

    match pipeline::run(&http, &gemini, &settings, &url).await {
        Ok(RunOutcome::Completed {
            reply,
            text_path,
            image_path,
        }) => {
            info!(
                summary = %reply.summary,
                text = %text_path.display(),
                image = %image_path.display(),
                "News card written"
            );
        }
        Ok(RunOutcome::PageUnavailable) => {
            error!(%url, "Failed to retrieve website content.");
        }
        Err(e) => {
            error!(%url, error = %e, "Run failed");
            return Err(e.into());
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
