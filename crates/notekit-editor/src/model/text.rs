//! Text measurement seam.

use super::TextItem;

/// Measures the laid-out size of a text item in item units.
///
/// Hosts with a real font stack plug in their own implementation; the
/// engine only needs sizes for hit testing, bounds and erasing.
pub trait TextMetrics: Send + Sync {
    /// Width and height of the rendered text block.
    fn measure(&self, text: &TextItem) -> (f64, f64);
}

/// Font-agnostic estimate based on average glyph proportions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateTextMetrics;

impl ApproximateTextMetrics {
    const CHAR_WIDTH: f64 = 0.6;
    const LINE_HEIGHT: f64 = 1.2;
}

impl TextMetrics for ApproximateTextMetrics {
    fn measure(&self, text: &TextItem) -> (f64, f64) {
        let size = text.font_size as f64;
        let lines = text.content.lines().count().max(1);
        let longest = text
            .content
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);
        (
            longest as f64 * size * Self::CHAR_WIDTH,
            lines as f64 * size * Self::LINE_HEIGHT,
        )
    }
}
