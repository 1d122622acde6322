//! The flattened inline content stream.
//!
//! [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
//!
//! Upstream flattening turns a block container's inline descendants into a
//! linear sequence of events: element start/end markers bracket nested
//! inline elements, text runs carry the already white-space-processed text,
//! and out-of-flow or atomic content appears at its position in the flow.
//!
//! In JSON every event is an object tagged by `"type"`:
//!
//! ```json
//! [
//!   { "type": "style-push", "element": 1, "style": { "padding": { "left": 2 } } },
//!   { "type": "text", "text": "Hello world" },
//!   { "type": "style-pop" }
//! ]
//! ```

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::float::FloatSide;
use crate::style::InlineStyle;

/// Opaque identity of the source element that generated a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(pub usize);

/// One event of the inline content stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentEvent {
    /// [§ 5.12.1 The :first-line pseudo-element](https://www.w3.org/TR/CSS2/selector.html#first-line-pseudo)
    ///
    /// Only honoured as the first event of the stream.
    FirstLine {
        /// Style of the first formatted line.
        style: Rc<InlineStyle>,
    },
    /// [§ 5.12.2 The :first-letter pseudo-element](https://www.w3.org/TR/CSS2/selector.html#first-letter)
    ///
    /// Only honoured first, or directly after a `FirstLine` marker.
    FirstLetter {
        /// Style of the first letter.
        style: Rc<InlineStyle>,
    },
    /// An inline element starts.
    StylePush {
        /// The element being opened.
        element: ElementRef,
        /// Its computed style.
        #[serde(default)]
        style: Rc<InlineStyle>,
    },
    /// The most recently opened inline element ends.
    StylePop,
    /// A run of text in the current style.
    Text {
        /// The run's text, before `text-transform`.
        text: String,
    },
    /// A floated box.
    Float(FloatContent),
    /// An absolutely positioned box. It takes no room on the line.
    Absolute(AbsoluteContent),
    /// An `inline-block` or other atomic inline-level box.
    InlineBlock(InlineBlockContent),
}

impl ContentEvent {
    /// A text run.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Open `element` with `style`.
    #[must_use]
    pub const fn push(element: ElementRef, style: Rc<InlineStyle>) -> Self {
        Self::StylePush { element, style }
    }
}

/// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
///
/// A float already laid out by the block formatting context, described by
/// its margin box size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FloatContent {
    /// The floated element.
    pub element: ElementRef,
    /// Which side it floats to.
    pub side: FloatSide,
    /// Margin box width.
    pub width: f32,
    /// Margin box height.
    pub height: f32,
}

/// [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
///
/// Only its static position is determined by inline layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AbsoluteContent {
    /// The positioned element.
    pub element: ElementRef,
}

/// [§ 10.3.9 'Inline-block', non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#inlineblock-width)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InlineBlockContent {
    /// The inline-block element.
    pub element: ElementRef,
    /// Its computed style (used for `vertical-align`).
    #[serde(default)]
    pub style: Rc<InlineStyle>,
    /// Declared margin box width.
    pub width: f32,
    /// Declared margin box height.
    pub height: f32,
    /// Whether laying it out attaches a rendering layer (positioned or
    /// otherwise stacking content).
    #[serde(default)]
    pub creates_layer: bool,
}
