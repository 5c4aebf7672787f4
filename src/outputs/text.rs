//! Raw reply persistence.

use crate::error::Result;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `content` to `path` as UTF-8, replacing any existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = content.len()))]
pub async fn save_text(content: &str, path: &Path) -> Result<()> {
    fs::write(path, content).await?;
    info!("Output successfully saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_text_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraping_result.txt");

        save_text("a much longer first reply", &path).await.unwrap();
        save_text("Summary: Gempa M5,2 guncang Cianjur", &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Summary: Gempa M5,2 guncang Cianjur");
    }

    #[tokio::test]
    async fn test_save_text_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope/scraping_result.txt");
        assert!(save_text("x", &path).await.is_err());
    }
}
