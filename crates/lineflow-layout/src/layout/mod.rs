//! Inline Layout Engine
//!
//! This module implements the inline formatting context: it turns a block
//! container's flattened inline content into positioned line boxes.
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Visual Formatting Model Details](https://www.w3.org/TR/CSS2/visudet.html)
//! - [CSS 2.1 Text](https://www.w3.org/TR/CSS2/text.html)
//! - [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - Rectangles, points and edge sizes
//! - [`content`] - The flattened inline content stream
//! - [`font`] - Font metrics interface and a ratio-based fallback
//! - [`line_break`] - Break finding and the per-run line break cursor
//! - [`line_box`] - Line boxes, inline boxes, text fragments, atomic boxes
//! - [`float`] - Float placement and float distances
//! - [`formatting_context`] - Collaborator traits and block stacking
//! - [`inline`] - The inline flow assembler
//! - [`horizontal`] - Horizontal rollup of a finished line
//! - [`vertical`] - Vertical alignment of a finished line
//! - [`justify`] - `text-align: justify`

pub mod box_model;
pub mod content;
pub mod float;
pub mod font;
pub mod formatting_context;
pub mod horizontal;
pub mod inline;
pub mod justify;
pub mod line_box;
pub mod line_break;
pub mod vertical;

// Re-exports for convenience
pub use box_model::{EdgeSizes, Point, Rect};
pub use content::{
    AbsoluteContent, ContentEvent, ElementRef, FloatContent, InlineBlockContent,
};
pub use float::{ClearSide, FloatContext, FloatManager, FloatPlacement, FloatSide, PlacedFloat};
pub use font::{ApproximateFontMetrics, FontMetrics, LineMetrics};
pub use formatting_context::{
    BlockFormattingContext, BlockLayout, IntrinsicBlockLayout, LayoutContext,
};
pub use horizontal::position_horizontally;
pub use inline::{
    InlineContainer, InlineLayout, MISPLACED_PSEUDO_MARKER, PseudoStyles, layout_inline_content,
};
pub use justify::justify_line;
pub use line_box::{
    AtomicBox, ElementStack, FloatDistances, InlineBox, InlineChild, InlineText, LayerId, LineBox,
    OpenBoxTemplate, TextDecoration,
};
pub use line_break::{BreakOpportunity, LineBreakContext, TextBreaker, WhitespaceBreaker};
pub use vertical::{Measurements, position_vertically};
