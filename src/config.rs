//! Runtime configuration.
//!
//! [`GenerationConfig`] holds the model name, endpoint and sampling
//! parameters. It defaults to the values the card prompt was tuned for and
//! can be overridden with a YAML file passed via `--config`:
//!
//! ```yaml
//! model: gemini-1.5-pro
//! temperature: 0.7
//! timeout_secs: 60
//! ```
//!
//! [`Settings`] is the fully resolved configuration for one run. It is built
//! once in `main` and passed explicitly to every stage.

use crate::cli::Cli;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const TEXT_OUTPUT_FILE: &str = "scraping_result.txt";
pub const IMAGE_OUTPUT_FILE: &str = "scraping_result.png";

/// Model selection and sampling parameters for the Gemini request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Gemini model name, e.g. `gemini-1.5-pro`.
    pub model: String,
    /// Base URL of the Generative Language API.
    pub endpoint: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
    /// Timeout applied to every outbound HTTP request.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 2048,
            response_mime_type: "text/plain".to_string(),
            timeout_secs: 120,
        }
    }
}

impl GenerationConfig {
    /// Load a YAML override file. Keys missing from the file keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&raw)?;
        info!(model = %config.model, "Loaded generation config");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything one run needs, resolved up front.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub generation: GenerationConfig,
    pub font_path: PathBuf,
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("generation", &self.generation)
            .field("font_path", &self.font_path)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl Settings {
    /// Resolve settings from parsed CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no API key was given (flag or
    /// `GEMINI_API_KEY`) or the config file is not valid YAML.
    pub async fn from_cli(args: &Cli) -> Result<Self> {
        let api_key = args
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::Config("no Gemini API key; set GEMINI_API_KEY or pass --api-key".into())
            })?
            .to_string();

        let generation = match &args.config {
            Some(path) => GenerationConfig::load(Path::new(path)).await?,
            None => GenerationConfig::default(),
        };

        Ok(Settings {
            api_key,
            generation,
            font_path: PathBuf::from(&args.font),
            output_dir: PathBuf::from(&args.output_dir),
        })
    }

    pub fn text_output_path(&self) -> PathBuf {
        self.output_dir.join(TEXT_OUTPUT_FILE)
    }

    pub fn image_output_path(&self) -> PathBuf {
        self.output_dir.join(IMAGE_OUTPUT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_generation_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.top_k, 64);
        assert_eq!(config.max_output_tokens, 2048);
        assert_eq!(config.response_mime_type, "text/plain");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GenerationConfig::from_yaml("model: gemini-2.0-flash\ntop_k: 40\n").unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.top_k, 40);
        assert_eq!(config.max_output_tokens, 2048);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = GenerationConfig::from_yaml("top_k: [not a number").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_settings_require_api_key() {
        let args = Cli::parse_from(["news_card", "--api-key", "  "]);
        let err = Settings::from_cli(&args).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_settings_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "model: test-model\ntimeout_secs: 5\n").unwrap();

        let args = Cli::parse_from([
            "news_card",
            "--api-key",
            "key",
            "--config",
            path.to_str().unwrap(),
            "--output-dir",
            "/tmp/cards",
        ]);
        let settings = Settings::from_cli(&args).await.unwrap();
        assert_eq!(settings.api_key, "key");
        assert_eq!(settings.generation.model, "test-model");
        assert_eq!(settings.generation.timeout(), Duration::from_secs(5));
        assert_eq!(
            settings.image_output_path(),
            PathBuf::from("/tmp/cards/scraping_result.png")
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = Settings {
            api_key: "secret".to_string(),
            generation: GenerationConfig::default(),
            font_path: PathBuf::from("fonts/Arial.ttf"),
            output_dir: PathBuf::from("."),
        };
        assert!(!format!("{settings:?}").contains("secret"));
    }
}
