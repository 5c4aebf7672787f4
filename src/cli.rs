//! Command-line interface definitions for News Card.
//!
//! Every argument is optional. Run without flags, the program prompts for the
//! article URL on stdin and reads the API key from `GEMINI_API_KEY`.

use clap::Parser;
use std::io::{self, BufRead, Write};

pub const URL_PROMPT: &str = "Enter News Link: ";

/// Command-line arguments for the News Card application.
///
/// # Examples
///
/// ```sh
/// # Interactive: prompts for the article URL
/// news_card
///
/// # Non-interactive, custom font and output directory
/// news_card --url https://example.com/story -f fonts/Inter.ttf -o ./out
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Article URL (prompted for on stdin when omitted)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Optional path to a YAML file overriding model and generation settings
    #[arg(short, long)]
    pub config: Option<String>,

    /// TrueType font used for the overlay text
    #[arg(short, long, default_value = "fonts/Arial.ttf")]
    pub font: String,

    /// Directory receiving scraping_result.txt and scraping_result.png
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,
}

impl Cli {
    /// The article URL: the `--url` flag if given, otherwise one line read
    /// from `input` after writing the prompt to `output`.
    pub fn resolve_url<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> io::Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.trim().to_string());
        }
        write!(output, "{URL_PROMPT}")?;
        output.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
