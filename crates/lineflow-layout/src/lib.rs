//! Inline formatting context layout for the lineflow engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Line breaking** ([§ 5 Line Breaking](https://www.w3.org/TR/css-text-3/#line-breaking))
//!   - A per-run cursor that extends a pending break to fill a width budget
//!   - Forced breaks at preserved newlines, soft breaks at spaces
//!
//! - **Inline flow assembly** ([§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting))
//!   - Nested inline boxes split across lines, with continuation across sibling containers
//!   - Floats, absolutely positioned content and inline-blocks interleaved with text
//!   - `text-indent`, `text-align`, `clear`, shrink-to-fit containers
//!
//! - **Line box geometry** ([§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height))
//!   - Horizontal rollup of reserves and fragment widths
//!   - Baseline-relative `vertical-align` resolution and text decorations
//!
//! - **Justification** ([§ 7.3 Justification](https://www.w3.org/TR/css-text-3/#justification))
//!   - Word splitting and slack distribution for `text-align: justify`
//!
//! # Not Yet Implemented
//!
//! - Bidirectional text
//! - Hyphenation
//! - `vertical-align: top | bottom` (laid out as `baseline`)

/// Errors reported by inline layout.
pub mod error;
/// Inline layout: content model, line breaking, line boxes and geometry.
pub mod layout;
/// The computed-style subset read by inline layout.
pub mod style;

pub use error::LayoutError;
pub use layout::{
    ApproximateFontMetrics, AtomicBox, BlockFormattingContext, BlockLayout, ContentEvent,
    ElementRef, ElementStack, FloatContext, FloatManager, FontMetrics, InlineBox, InlineChild,
    InlineContainer, InlineLayout, InlineText, IntrinsicBlockLayout, LayoutContext, LineBox,
    TextBreaker, WhitespaceBreaker, justify_line, layout_inline_content,
};
pub use style::InlineStyle;
