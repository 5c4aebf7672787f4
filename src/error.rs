//! Error types for the news card pipeline.
//!
//! Every stage reports failures through [`Error`]. Parsing the model reply has
//! its own [`ReplyError`] so callers can tell exactly which template field was
//! missing.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing a news card.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure (DNS, TLS, timeout, connection reset).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The Gemini backend answered but the answer was unusable.
    #[error("Gemini request failed: {0}")]
    Gemini(String),

    /// The model reply did not follow the four-line template.
    #[error("Malformed model reply: {0}")]
    Reply(#[from] ReplyError),

    /// Decoding, resizing or encoding an image failed.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// The overlay font could not be read or parsed.
    #[error("Failed to load font {path}: {reason}")]
    Font { path: String, reason: String },

    /// Invalid configuration (missing API key, bad YAML, ...).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Local filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while parsing the model reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    /// A required `Prefix:` line was absent.
    #[error("reply has no `{0}` line")]
    MissingField(&'static str),
}
