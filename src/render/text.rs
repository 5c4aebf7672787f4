//! Text measurement, wrapping and the adaptive font-size search.

use super::CardLayout;
use crate::error::{Error, Result};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use std::path::Path;
use tracing::{debug, instrument};

/// Measures rendered text at a given pixel size.
///
/// The fit search only needs widths and line heights, so it runs against
/// this trait rather than a concrete font.
pub trait TextMeasure {
    /// Horizontal advance of a single line.
    fn line_width(&self, size: f32, line: &str) -> f32;

    /// Distance from the top of one line to the top of the next, without spacing.
    fn line_height(&self, size: f32) -> f32;

    /// Bounding box `(width, height)` of a block of lines separated by `spacing` pixels.
    fn block_size(&self, size: f32, lines: &[String], spacing: f32) -> (f32, f32) {
        if lines.is_empty() {
            return (0.0, 0.0);
        }
        let width = lines
            .iter()
            .map(|l| self.line_width(size, l))
            .fold(0.0, f32::max);
        let count = lines.len() as f32;
        let height = count * self.line_height(size) + (count - 1.0) * spacing;
        (width, height)
    }
}

/// A TrueType/OpenType font loaded from disk.
pub struct OverlayFont {
    font: FontVec,
}

impl OverlayFont {
    /// Load a font file.
    ///
    /// # Errors
    ///
    /// [`Error::Font`] when the file cannot be read or is not a usable font.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let font_error = |reason: String| Error::Font {
            path: path.display().to_string(),
            reason,
        };
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| font_error(e.to_string()))?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| font_error(e.to_string()))?;
        debug!(glyphs = font.glyph_count(), "Loaded overlay font");
        Ok(Self { font })
    }

    pub fn font(&self) -> &FontVec {
        &self.font
    }
}

impl TextMeasure for OverlayFont {
    fn line_width(&self, size: f32, line: &str) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut prev = None;
        for c in line.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    fn line_height(&self, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        scaled.ascent() - scaled.descent()
    }
}

/// Outcome of the font-size search.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFit {
    /// Chosen pixel size.
    pub size: u32,
    /// Wrapped lines, in drawing order.
    pub lines: Vec<String>,
    /// Block width at `size`.
    pub width: f32,
    /// Block height at `size`.
    pub height: f32,
    /// False when even the minimum size overflows the plate.
    pub fits: bool,
}

/// Word-wrap `text` to `columns` characters.
///
/// Words longer than a line are broken and hyphens are allowed break points.
pub fn wrap_summary(text: &str, columns: usize) -> Vec<String> {
    textwrap::wrap(text, columns)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Find the largest font size at which the wrapped summary fits the plate.
///
/// The text is wrapped once at the layout's fixed column width; only the font
/// size changes. Sizes step down from `start_size` by `size_step`. If nothing
/// at or above `min_size` fits, `min_size` is returned with `fits == false`
/// and the block is expected to be drawn overflowing.
pub fn fit_text<M: TextMeasure + ?Sized>(measure: &M, text: &str, layout: &CardLayout) -> TextFit {
    let lines = wrap_summary(text, layout.wrap_columns);
    let max_width = layout.text_max_width();
    let max_height = layout.text_max_height();
    let step = layout.size_step.max(1);

    let mut size = layout.start_size.max(layout.min_size);
    loop {
        let (width, height) = measure.block_size(size as f32, &lines, layout.line_spacing);
        if width <= max_width && height <= max_height {
            return TextFit {
                size,
                lines,
                width,
                height,
                fits: true,
            };
        }
        if size < layout.min_size + step {
            break;
        }
        size -= step;
    }

    let size = layout.min_size;
    let (width, height) = measure.block_size(size as f32, &lines, layout.line_spacing);
    TextFit {
        size,
        lines,
        width,
        height,
        fits: false,
    }
}

/// Pixel size of the source label for a given summary size.
pub fn source_font_size(summary_size: u32, layout: &CardLayout) -> u32 {
    let scaled = (summary_size as f32 * layout.source_ratio) as u32;
    scaled.max(layout.min_source_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character advances `advance * size` pixels; lines are `size` tall.
    struct Monospace {
        advance: f32,
    }

    impl TextMeasure for Monospace {
        fn line_width(&self, size: f32, line: &str) -> f32 {
            line.chars().count() as f32 * self.advance * size
        }

        fn line_height(&self, size: f32) -> f32 {
            size
        }
    }

    const NARROW: Monospace = Monospace { advance: 0.5 };

    #[test]
    fn wrap_at_thirty_columns() {
        let lines = wrap_summary(
            "Pemerintah umumkan kebijakan baru yang bikin warganet heboh hari ini",
            30,
        );
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 30));
        assert_eq!(
            lines.join(" "),
            "Pemerintah umumkan kebijakan baru yang bikin warganet heboh hari ini"
        );
    }

    #[test]
    fn wrap_breaks_overlong_words() {
        let lines = wrap_summary(&"x".repeat(75), 30);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 30);
        assert_eq!(lines[2].len(), 15);
    }

    #[test]
    fn short_text_fits_at_start_size() {
        // 10 chars * 0.5 * 120 = 600 wide, 120 tall.
        let fit = fit_text(&NARROW, "Short news", &CardLayout::default());
        assert!(fit.fits);
        assert_eq!(fit.size, 120);
        assert_eq!(fit.lines, vec!["Short news".to_string()]);
    }

    #[test]
    fn longer_text_steps_down_in_even_sizes() {
        let layout = CardLayout::default();
        let text = "Harga BBM naik lagi mulai besok pagi, cek daftar lengkap harga terbaru di seluruh SPBU";
        let fit = fit_text(&NARROW, text, &layout);
        assert!(fit.fits);
        assert!(fit.size < layout.start_size);
        assert_eq!((layout.start_size - fit.size) % layout.size_step, 0);
        assert!(fit.width <= layout.text_max_width());
        assert!(fit.height <= layout.text_max_height());

        // The next size up must not fit, otherwise the search stopped too late.
        let (w, h) = NARROW.block_size((fit.size + 2) as f32, &fit.lines, layout.line_spacing);
        assert!(w > layout.text_max_width() || h > layout.text_max_height());
    }

    #[test]
    fn overflow_settles_on_floor() {
        let layout = CardLayout::default();
        let fit = fit_text(&NARROW, &"kata ".repeat(200), &layout);
        assert!(!fit.fits);
        assert_eq!(fit.size, layout.min_size);
        assert!(fit.height > layout.text_max_height());
    }

    #[test]
    fn fit_terminates_and_respects_floor_for_any_length() {
        let layout = CardLayout::default();
        for len in [0usize, 1, 29, 30, 31, 120, 200, 500, 2000] {
            let text = "ab ".repeat(len / 3) + &"z".repeat(len % 3);
            let fit = fit_text(&NARROW, &text, &layout);
            assert!(fit.size >= layout.min_size, "len {len}");
            assert!(fit.size <= layout.start_size, "len {len}");
            if fit.fits {
                assert!(fit.width <= layout.text_max_width(), "len {len}");
            }
        }
    }

    #[test]
    fn odd_start_size_still_clamps_to_floor() {
        let layout = CardLayout {
            start_size: 41,
            ..CardLayout::default()
        };
        let fit = fit_text(&NARROW, &"overflow ".repeat(300), &layout);
        assert_eq!(fit.size, 36);
        assert!(!fit.fits);
    }

    #[test]
    fn empty_text_fits_immediately() {
        let fit = fit_text(&NARROW, "", &CardLayout::default());
        assert!(fit.fits);
        assert_eq!(fit.size, 120);
        assert!(fit.lines.iter().all(|l| l.is_empty()));
    }

    #[test]
    fn block_size_adds_spacing_between_lines() {
        let lines = vec!["ab".to_string(), "abcd".to_string(), "a".to_string()];
        let (w, h) = NARROW.block_size(10.0, &lines, 4.0);
        assert_eq!(w, 20.0);
        assert_eq!(h, 3.0 * 10.0 + 2.0 * 4.0);
    }

    #[test]
    fn source_size_is_sixty_percent_with_floor() {
        let layout = CardLayout::default();
        assert_eq!(source_font_size(120, &layout), 72);
        assert_eq!(source_font_size(58, &layout), 34);
        assert_eq!(source_font_size(36, &layout), 24);
    }

    #[tokio::test]
    async fn missing_font_file_is_font_error() {
        let err = OverlayFont::load(Path::new("/nonexistent/fonts/Arial.ttf"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, Error::Font { .. }));
    }

    #[tokio::test]
    async fn invalid_font_bytes_is_font_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let err = OverlayFont::load(&path).await.err().unwrap();
        assert!(matches!(err, Error::Font { .. }));
    }
}
