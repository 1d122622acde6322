//! Font metrics consumed by inline layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use crate::style::FontSpec;

/// Vertical metrics of one font at one size.
///
/// Offsets are measured downward from the baseline, so a strikethrough
/// that sits above the baseline has a negative offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineMetrics {
    /// Height above the baseline.
    pub ascent: f32,
    /// Depth below the baseline.
    pub descent: f32,
    /// Distance from the baseline to the top of the underline.
    pub underline_offset: f32,
    /// Underline stroke thickness.
    pub underline_thickness: f32,
    /// Distance from the baseline to the strikethrough.
    pub strikethrough_offset: f32,
    /// Strikethrough stroke thickness.
    pub strikethrough_thickness: f32,
}

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide the actual per-glyph advance widths and vertical
/// metrics. Layout only ever asks for these two things.
pub trait FontMetrics {
    /// Vertical metrics for `font`.
    fn line_metrics(&self, font: &FontSpec) -> LineMetrics;

    /// Total advance width of `text` set in `font`.
    ///
    /// This should sum the advance width of each glyph in the string,
    /// matching the cursor advancement used during text rendering.
    fn text_width(&self, text: &str, font: &FontSpec) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// Implementation note: Without access to actual font data, we use fixed
/// ratio approximations. The average advance width of Latin glyphs in a
/// proportional font is approximately 0.6× the font size (typical for
/// Helvetica/Arial body text). Ascent and descent split the em square 4:1.
///
/// This is used as a fallback when no font is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const ASCENT_RATIO: f32 = 0.8;
    const DESCENT_RATIO: f32 = 0.2;
}

impl FontMetrics for ApproximateFontMetrics {
    fn line_metrics(&self, font: &FontSpec) -> LineMetrics {
        let size = font.size;
        let thickness = (size / 16.0).max(1.0);
        LineMetrics {
            ascent: size * Self::ASCENT_RATIO,
            descent: size * Self::DESCENT_RATIO,
            underline_offset: size * 0.075,
            underline_thickness: thickness,
            strikethrough_offset: -size * 0.3,
            strikethrough_thickness: thickness,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * Self::CHAR_WIDTH_RATIO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_metrics_fill_the_em_square() {
        let font = FontSpec {
            size: 20.0,
            ..FontSpec::default()
        };
        let lm = ApproximateFontMetrics.line_metrics(&font);
        assert!((lm.ascent + lm.descent - 20.0).abs() < 0.001);
        assert!(lm.strikethrough_offset < 0.0);
        assert!((ApproximateFontMetrics.text_width("abcde", &font) - 60.0).abs() < 0.001);
    }
}
