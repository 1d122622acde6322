//! Keyword and length values read by inline layout.
//!
//! Every keyword type deserializes from (and displays as) its CSS keyword,
//! e.g. `"pre-wrap"` or `"line-through"`.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// [§ 3 White Space Processing](https://www.w3.org/TR/CSS2/text.html#white-space-prop)
///
/// "This property declares how white space inside the element is handled."
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WhiteSpace {
    /// "This value directs user agents to collapse sequences of white space,
    /// and break lines as necessary to fill line boxes."
    #[default]
    Normal,
    /// "This value prevents user agents from collapsing sequences of white
    /// space. Lines are only broken at preserved newline characters."
    Pre,
    /// "This value collapses white space as for 'normal', but suppresses line
    /// breaks within text."
    Nowrap,
    /// "This value prevents user agents from collapsing sequences of white
    /// space. Lines are broken at preserved newline characters, and as
    /// necessary to fill line boxes."
    PreWrap,
    /// "This value directs user agents to collapse sequences of white space.
    /// Lines are broken at preserved newline characters, and as necessary to
    /// fill line boxes."
    PreLine,
}

impl WhiteSpace {
    /// Whether a single leading space may be dropped at the start of a line.
    #[must_use]
    pub const fn trims_leading_space(self) -> bool {
        matches!(self, Self::Normal | Self::Nowrap)
    }

    /// Whether preserved newlines force a line break.
    #[must_use]
    pub const fn preserves_newlines(self) -> bool {
        matches!(self, Self::Pre | Self::PreWrap | Self::PreLine)
    }

    /// Whether text may wrap at soft break opportunities.
    #[must_use]
    pub const fn wraps(self) -> bool {
        matches!(self, Self::Normal | Self::PreWrap | Self::PreLine)
    }
}

/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "The 'vertical-align' property affects the vertical positioning inside a
/// line box of the boxes generated by an inline-level element."
///
/// `Top` and `Bottom` are accepted but laid out as `Baseline`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAlign {
    /// "Align the baseline of the box with the baseline of the parent box."
    #[default]
    Baseline,
    /// "Align the vertical midpoint of the box with the baseline of the
    /// parent box plus half the x-height of the parent."
    Middle,
    /// "Lower the baseline of the box to the proper position for subscripts
    /// of the parent's box."
    Sub,
    /// "Raise the baseline of the box to the proper position for
    /// superscripts of the parent's box."
    Super,
    /// "Align the top of the box with the top of the parent's content area."
    TextTop,
    /// "Align the bottom of the box with the bottom of the parent's content
    /// area."
    TextBottom,
    /// "Align the top of the aligned subtree with the top of the line box."
    Top,
    /// "Align the bottom of the aligned subtree with the bottom of the line
    /// box."
    Bottom,
    /// "Raise (positive value) or lower (negative value) the box by this
    /// distance."
    Length(f32),
    /// "Raise (positive value) or lower (negative value) the box by this
    /// distance (a percentage of the 'line-height' value)."
    Percentage(f32),
}

/// [§ 16.3.1 Underlining, overlining, striking, and blinking](https://www.w3.org/TR/CSS2/text.html#lining-striking-props)
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TextDecorationLine {
    /// "Produces no text decoration."
    #[default]
    None,
    /// "Each line of text is underlined."
    Underline,
    /// "Each line of text has a line above it."
    Overline,
    /// "Each line of text has a line through the middle."
    LineThrough,
}

/// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
///
/// "This property describes how inline-level content of a block container is
/// aligned."
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TextAlign {
    /// Content starts at the left edge of the line box.
    #[default]
    Left,
    /// Content ends at the right edge of the line box.
    Right,
    /// Content is centered within the line box.
    Center,
    /// Content is stretched to both edges, except on the last line and
    /// before forced breaks.
    Justify,
}

/// [§ 16.5 Capitalization: the 'text-transform' property](https://www.w3.org/TR/CSS2/text.html#caps-prop)
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TextTransform {
    /// "No capitalization effects."
    #[default]
    None,
    /// "Puts the first character of each word in uppercase."
    Capitalize,
    /// "Puts all characters of each word in uppercase."
    Uppercase,
    /// "Puts all characters of each word in lowercase."
    Lowercase,
}

impl TextTransform {
    /// Apply this transform to `text`, producing the master buffer that
    /// line breaking and painting address by offset.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::None => text.to_string(),
            Self::Uppercase => text.to_uppercase(),
            Self::Lowercase => text.to_lowercase(),
            Self::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut at_word_start = true;
                for ch in text.chars() {
                    if at_word_start && ch.is_alphabetic() {
                        out.extend(ch.to_uppercase());
                    } else {
                        out.push(ch);
                    }
                    at_word_start = ch.is_whitespace();
                }
                out
            }
        }
    }
}

/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineHeight {
    /// "Tells user agents to set the used value to a 'reasonable' value based
    /// on the font of the element. We recommend a used value for 'normal'
    /// between 1.0 to 1.2."
    #[default]
    Normal,
    /// "The used value of the property is this number multiplied by the
    /// element's font size."
    Number(f32),
    /// "The specified length is used in the calculation of the line box
    /// height."
    Px(f32),
}

impl LineHeight {
    /// Ratio used for `line-height: normal`.
    pub const NORMAL_RATIO: f32 = 1.2;

    /// Resolve to pixels for an element with the given font size.
    #[must_use]
    pub fn resolve(self, font_size: f32) -> f32 {
        match self {
            Self::Normal => font_size * Self::NORMAL_RATIO,
            Self::Number(n) => font_size * n,
            Self::Px(px) => px,
        }
    }
}

/// A pixel length or a percentage of some basis (used by `text-indent`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthPercentage {
    /// An absolute length in pixels.
    Px(f32),
    /// A percentage (0-100) of the basis.
    Percent(f32),
}

impl Default for LengthPercentage {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl LengthPercentage {
    /// Resolve against `basis`.
    #[must_use]
    pub fn resolve(self, basis: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => basis * pct / 100.0,
        }
    }
}
