//! News card composition.
//!
//! A card is a 1080×1080 canvas: the cover-cropped background fills it, a
//! white plate covers the lower band, the summary is drawn on the plate at
//! the largest size that fits, and a smaller `Source: ...` label sits in the
//! plate's bottom-right corner.
//!
//! ```text
//! (0,0) ┌───────────────────────────┐
//!       │        background         │
//!       │   ┌───────────────────┐   │ y=600
//!       │   │ summary text      │   │
//!       │   │                   │   │
//!       │   │     Source: label │   │
//!       │   └───────────────────┘   │ y=1040
//!       └───────────────────────────┘ (1080,1080)
//!          x=40               x=1040
//! ```
//!
//! The source label is not checked against the summary block; with long
//! summaries at the minimum size the two can overlap.

pub mod cover;
pub mod text;

use ab_glyph::PxScale;
use image::{DynamicImage, Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::{info, instrument, warn};

pub use cover::cover_crop;
pub use text::{OverlayFont, TextFit, TextMeasure, fit_text, source_font_size};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Geometry and sizing rules for a card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    /// Side length of the square canvas.
    pub canvas_size: u32,
    /// Plate edges, inclusive.
    pub plate_left: u32,
    pub plate_top: u32,
    pub plate_right: u32,
    pub plate_bottom: u32,
    /// Inset of both text anchors from the plate edges.
    pub text_inset: f32,
    /// Subtracted from the plate width to get the text width limit.
    pub horizontal_padding: f32,
    /// Subtracted from the plate height before applying `height_fill`.
    pub vertical_padding: f32,
    pub height_fill: f32,
    pub wrap_columns: usize,
    pub start_size: u32,
    pub size_step: u32,
    pub min_size: u32,
    pub source_ratio: f32,
    pub min_source_size: u32,
    /// Extra pixels between wrapped lines.
    pub line_spacing: f32,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            canvas_size: 1080,
            plate_left: 40,
            plate_top: 600,
            plate_right: 1040,
            plate_bottom: 1040,
            text_inset: 20.0,
            horizontal_padding: 40.0,
            vertical_padding: 80.0,
            height_fill: 0.9,
            wrap_columns: 30,
            start_size: 120,
            size_step: 2,
            min_size: 36,
            source_ratio: 0.6,
            min_source_size: 24,
            line_spacing: 4.0,
        }
    }
}

impl CardLayout {
    pub fn text_max_width(&self) -> f32 {
        (self.plate_right - self.plate_left) as f32 - self.horizontal_padding
    }

    pub fn text_max_height(&self) -> f32 {
        ((self.plate_bottom - self.plate_top) as f32 - self.vertical_padding) * self.height_fill
    }

    /// Top-left corner of the summary block.
    pub fn summary_origin(&self) -> (f32, f32) {
        (
            self.plate_left as f32 + self.text_inset,
            self.plate_top as f32 + self.text_inset,
        )
    }

    /// Top-left corner of a source label measuring `width`×`height`, so that
    /// it ends `text_inset` pixels inside the plate's bottom-right corner.
    pub fn source_origin(&self, width: f32, height: f32) -> (f32, f32) {
        (
            self.plate_right as f32 - width - self.text_inset,
            self.plate_bottom as f32 - height - self.text_inset,
        )
    }
}

/// Compose a news card.
///
/// `background` is cover-cropped onto a white canvas, the plate is filled,
/// then the summary and `Source: {source}` label are drawn in black.
#[instrument(level = "info", skip_all, fields(summary_chars = summary.chars().count(), %source))]
pub fn render_card(
    summary: &str,
    source: &str,
    background: &DynamicImage,
    font: &OverlayFont,
    layout: &CardLayout,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(layout.canvas_size, layout.canvas_size, WHITE);
    let cover = cover_crop(background, layout.canvas_size).to_rgba8();
    imageops::overlay(&mut canvas, &cover, 0, 0);
    draw_plate(&mut canvas, layout);

    let fit = fit_text(font, summary, layout);
    if fit.fits {
        info!(size = fit.size, lines = fit.lines.len(), "Summary fitted");
    } else {
        warn!(
            size = fit.size,
            lines = fit.lines.len(),
            height = fit.height,
            max_height = layout.text_max_height(),
            "Summary overflows the plate at minimum size; drawing anyway"
        );
    }
    let (x, y) = layout.summary_origin();
    draw_block(&mut canvas, font, &fit, x, y, layout.line_spacing);

    let source_size = source_font_size(fit.size, layout) as f32;
    let source_text = format!("Source: {source}");
    let width = font.line_width(source_size, &source_text);
    let height = font.line_height(source_size);
    let (sx, sy) = layout.source_origin(width, height);
    draw_text_mut(
        &mut canvas,
        BLACK,
        sx.round() as i32,
        sy.round() as i32,
        PxScale::from(source_size),
        font.font(),
        &source_text,
    );

    canvas
}

/// Fill the text plate with opaque white.
fn draw_plate(canvas: &mut RgbaImage, layout: &CardLayout) {
    let rect = Rect::at(layout.plate_left as i32, layout.plate_top as i32).of_size(
        layout.plate_right - layout.plate_left + 1,
        layout.plate_bottom - layout.plate_top + 1,
    );
    draw_filled_rect_mut(canvas, rect, WHITE);
}

fn draw_block(canvas: &mut RgbaImage, font: &OverlayFont, fit: &TextFit, x: f32, y: f32, spacing: f32) {
    let size = fit.size as f32;
    let advance = font.line_height(size) + spacing;
    for (i, line) in fit.lines.iter().enumerate() {
        let line_y = y + advance * i as f32;
        draw_text_mut(
            canvas,
            BLACK,
            x.round() as i32,
            line_y.round() as i32,
            PxScale::from(size),
            font.font(),
            line,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let layout = CardLayout::default();
        assert_eq!(layout.text_max_width(), 960.0);
        assert!((layout.text_max_height() - 324.0).abs() < 1e-3);
        assert_eq!(layout.summary_origin(), (60.0, 620.0));
    }

    #[test]
    fn source_anchor_is_inset_from_bottom_right() {
        let layout = CardLayout::default();
        assert_eq!(layout.source_origin(300.0, 40.0), (720.0, 980.0));
    }

    #[test]
    fn plate_covers_exact_band() {
        let layout = CardLayout::default();
        let mut canvas = RgbaImage::from_pixel(1080, 1080, BLACK);
        draw_plate(&mut canvas, &layout);

        assert_eq!(*canvas.get_pixel(40, 600), WHITE);
        assert_eq!(*canvas.get_pixel(1040, 1040), WHITE);
        assert_eq!(*canvas.get_pixel(540, 800), WHITE);
        assert_eq!(*canvas.get_pixel(39, 800), BLACK);
        assert_eq!(*canvas.get_pixel(1041, 800), BLACK);
        assert_eq!(*canvas.get_pixel(540, 599), BLACK);
        assert_eq!(*canvas.get_pixel(540, 1041), BLACK);
    }
}
