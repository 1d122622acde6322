//! Computed style for inline layout.
//!
//! [CSS Cascading Level 4 § 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//!
//! Cascade and inheritance happen upstream. `InlineStyle` carries the
//! already-computed properties the inline formatting context reads, one
//! instance per element, shared by `Rc` across the line boxes it produces.

mod values;

pub use values::{
    LengthPercentage, LineHeight, TextAlign, TextDecorationLine, TextTransform, VerticalAlign,
    WhiteSpace,
};

use serde::{Deserialize, Serialize};

use crate::layout::box_model::EdgeSizes;
use crate::layout::float::ClearSide;

/// Font size used when none is specified.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// [§ 15.3 Font family](https://www.w3.org/TR/CSS2/fonts.html#font-family-prop)
///
/// The font selection handed to [`FontMetrics`](crate::layout::FontMetrics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FontSpec {
    /// Family name as written in the style.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "serif".to_string(),
            size: DEFAULT_FONT_SIZE_PX,
        }
    }
}

/// The computed properties inline layout reads for one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InlineStyle {
    /// Font family and size.
    pub font: FontSpec,
    /// `line-height`.
    pub line_height: LineHeight,
    /// `white-space`.
    pub white_space: WhiteSpace,
    /// `vertical-align`.
    pub vertical_align: VerticalAlign,
    /// `text-decoration-line`.
    pub text_decoration: TextDecorationLine,
    /// `text-align`, read from the container.
    pub text_align: TextAlign,
    /// `text-indent`, read from the container.
    pub text_indent: LengthPercentage,
    /// `text-transform`.
    pub text_transform: TextTransform,
    /// `clear`, read from the container. `None` means `clear: none`.
    pub clear: Option<ClearSide>,
    /// Margin widths.
    pub margin: EdgeSizes,
    /// Border widths.
    pub border: EdgeSizes,
    /// Padding widths.
    pub padding: EdgeSizes,
}

impl InlineStyle {
    /// Used `line-height` in pixels.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.line_height.resolve(self.font.size)
    }

    /// Margin + border + padding on the left side.
    #[must_use]
    pub fn left_reserve(&self) -> f32 {
        self.margin.left + self.border.left + self.padding.left
    }

    /// Margin + border + padding on the right side.
    #[must_use]
    pub fn right_reserve(&self) -> f32 {
        self.margin.right + self.border.right + self.padding.right
    }

    /// Used `text-indent` for a line box of `available_width`.
    ///
    /// [§ 16.1 Indentation](https://www.w3.org/TR/CSS2/text.html#indentation-prop)
    ///
    /// "<percentage> The indentation is a percentage of the containing
    /// block width."
    #[must_use]
    pub fn text_indent(&self, available_width: f32) -> f32 {
        self.text_indent.resolve(available_width)
    }

    /// The effective `text-align`.
    ///
    /// [§ 16.2](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
    ///
    /// "If an element has a computed value for 'white-space' of 'pre' or
    /// 'pre-wrap', then neither the glyphs of that element's text content
    /// nor its white space may be altered by any justification algorithm."
    #[must_use]
    pub fn used_text_align(&self) -> TextAlign {
        match (self.text_align, self.white_space) {
            (TextAlign::Justify, WhiteSpace::Pre | WhiteSpace::PreWrap) => TextAlign::Left,
            (align, _) => align,
        }
    }
}
