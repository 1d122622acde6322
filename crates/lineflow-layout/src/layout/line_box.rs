//! Line boxes and the inline-level boxes they contain.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "The rectangular area that contains the boxes that form a line is called
//! a line box."
//!
//! Coordinates: a line's `x`/`y` are relative to its container's origin.
//! Everything inside a line is relative to the line: child `x` from the
//! line's left edge, child `y` from the line's top.

use std::rc::Rc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::content::ElementRef;
use crate::style::{InlineStyle, TextDecorationLine};

/// [§ 16.3.1 Underlining, overlining, striking, and blinking](https://www.w3.org/TR/CSS2/text.html#lining-striking-props)
///
/// A decoration line resolved against a box's own baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextDecoration {
    /// Which line is drawn.
    pub line: TextDecorationLine,
    /// Offset of the stroke from the top of the decorated box.
    pub offset: f32,
    /// Stroke thickness.
    pub thickness: f32,
}

/// Horizontal space taken by floats beside a line, bound when it is saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FloatDistances {
    /// Width taken by left floats.
    pub left: f32,
    /// Width taken by right floats.
    pub right: f32,
}

/// A rendering layer handed out for positioned or stacking inline-blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LayerId(pub u32);

/// One line of laid-out inline content.
///
/// "The height of a line box is determined by the rules given in the
/// section on line height calculations."
#[derive(Debug, Clone, Default, Serialize)]
pub struct LineBox {
    /// Left edge, after float distance, indent and alignment.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Sum of the widths of the top-level children.
    pub content_width: f32,
    /// Distance between the uppermost box top and the lowermost box bottom.
    pub height: f32,
    /// Top of the painted area, relative to the line's top.
    pub painting_top: f32,
    /// Height of the painted area.
    pub painting_height: f32,
    /// The container's own decoration, positioned on the strut baseline.
    pub text_decoration: Option<TextDecoration>,
    /// Some text or atomic box was placed.
    pub contains_content: bool,
    /// An atomic inline-level box was placed.
    pub contains_block_level_content: bool,
    /// The line ended on a preserved newline.
    pub ended_by_forced_break: bool,
    /// Float distances bound when the line was saved.
    pub float_distances: Option<FloatDistances>,
    /// Top-level boxes in order.
    pub children: Vec<InlineChild>,
}

impl LineBox {
    /// An empty line at `y`.
    #[must_use]
    pub fn new(y: f32) -> Self {
        Self {
            y,
            ..Self::default()
        }
    }

    /// No boxes were placed on this line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The y coordinate just below the line.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A box that can sit inside a line or an inline box.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InlineChild {
    /// A nested inline element fragment.
    Inline(InlineBox),
    /// A text fragment.
    Text(InlineText),
    /// An inline-block or other atomic box.
    Atomic(AtomicBox),
}

impl InlineChild {
    /// The horizontal advance of this child.
    #[must_use]
    pub const fn width(&self) -> f32 {
        match self {
            Self::Inline(b) => b.inline_width,
            Self::Text(t) => t.width,
            Self::Atomic(a) => a.width,
        }
    }

    /// The starting x of this child.
    #[must_use]
    pub const fn x(&self) -> f32 {
        match self {
            Self::Inline(b) => b.x,
            Self::Text(t) => t.x,
            Self::Atomic(a) => a.x,
        }
    }

    /// Move this child, and everything inside it, horizontally.
    pub fn translate_x(&mut self, dx: f32) {
        match self {
            Self::Inline(b) => {
                b.x += dx;
                for child in &mut b.children {
                    child.translate_x(dx);
                }
            }
            Self::Text(t) => t.x += dx,
            Self::Atomic(a) => a.x += dx,
        }
    }

    /// Move this child, and everything inside it, vertically. Text has no
    /// vertical position of its own.
    pub fn translate_y(&mut self, dy: f32) {
        match self {
            Self::Inline(b) => {
                b.y += dy;
                for child in &mut b.children {
                    child.translate_y(dy);
                }
            }
            Self::Text(_) => {}
            Self::Atomic(a) => a.y += dy,
        }
    }
}

/// [§ 9.4.2](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
///
/// "When an inline box exceeds the width of a line box, it is split into
/// several boxes and these boxes are distributed across several line boxes."
///
/// One element's fragment on one line.
#[derive(Debug, Clone, Serialize)]
pub struct InlineBox {
    /// The element this fragment belongs to.
    pub element: ElementRef,
    /// The element's style.
    #[serde(skip)]
    pub style: Rc<InlineStyle>,
    /// Nested boxes in order.
    pub children: Vec<InlineChild>,
    /// Left margin edge.
    pub x: f32,
    /// Top of the content area.
    pub y: f32,
    /// Content area height (ascent + descent).
    pub height: f32,
    /// Baseline offset from `y`.
    pub baseline: f32,
    /// Left reserve + children + right reserve.
    pub inline_width: f32,
    /// Margin + border + padding carried on the left of this fragment.
    pub left_reserve: f32,
    /// Margin + border + padding carried on the right of this fragment.
    pub right_reserve: f32,
    /// The element closes on this line.
    pub ends_here: bool,
    /// Decoration positioned against this box's baseline.
    pub text_decoration: Option<TextDecoration>,
}

impl InlineBox {
    /// An empty, unpositioned fragment of `element`.
    #[must_use]
    pub const fn new(element: ElementRef, style: Rc<InlineStyle>, left_reserve: f32) -> Self {
        Self {
            element,
            style,
            children: Vec::new(),
            x: 0.0,
            y: 0.0,
            height: 0.0,
            baseline: 0.0,
            inline_width: 0.0,
            left_reserve,
            right_reserve: 0.0,
            ends_here: false,
            text_decoration: None,
        }
    }
}

/// A fragment of a text run.
///
/// It addresses the shared master text of its run by byte offsets, so every
/// fragment of one run shares a single buffer.
#[derive(Debug, Clone)]
pub struct InlineText {
    /// The transformed text of the whole run.
    pub master: Rc<str>,
    /// Start byte offset into `master`.
    pub start: usize,
    /// End byte offset into `master` (exclusive).
    pub end: usize,
    /// Starting x.
    pub x: f32,
    /// Advance width.
    pub width: f32,
    /// The style the run was measured with.
    pub style: Rc<InlineStyle>,
}

impl InlineText {
    /// The fragment's text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.master[self.start..self.end]
    }
}

impl Serialize for InlineText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("InlineText", 5)?;
        state.serialize_field("text", self.text())?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("width", &self.width)?;
        state.end()
    }
}

/// [§ 10.3.9 'Inline-block', non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#inlineblock-width)
///
/// An inline-level box laid out as a unit.
#[derive(Debug, Clone, Serialize)]
pub struct AtomicBox {
    /// The element that generated the box.
    pub element: ElementRef,
    /// The element's style.
    #[serde(skip)]
    pub style: Rc<InlineStyle>,
    /// Left margin edge within the line.
    pub x: f32,
    /// Top margin edge within the line.
    pub y: f32,
    /// Margin box width.
    pub width: f32,
    /// Margin box height.
    pub height: f32,
    /// Layer attached when the box was laid out, if any.
    pub layer: Option<LayerId>,
}

/// One open inline element at a line boundary.
#[derive(Debug, Clone, Serialize)]
pub struct OpenBoxTemplate {
    /// The open element.
    pub element: ElementRef,
    /// Its style.
    #[serde(skip)]
    pub style: Rc<InlineStyle>,
    /// A fragment of the element has already been placed, so later
    /// fragments carry no left reserve.
    pub started: bool,
}

/// The inline ancestry still open at a line boundary, outermost first.
///
/// Produced when a line is closed and consumed when the next line opens. A
/// stack left over at the end of a container is exported so a sibling
/// container can resume the same elements.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ElementStack(Vec<OpenBoxTemplate>);

impl ElementStack {
    /// Build from templates ordered outermost first.
    #[must_use]
    pub const fn new(templates: Vec<OpenBoxTemplate>) -> Self {
        Self(templates)
    }

    /// No element is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of open elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Templates, outermost first.
    #[must_use]
    pub fn templates(&self) -> &[OpenBoxTemplate] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(master: &Rc<str>, start: usize, end: usize) -> InlineChild {
        InlineChild::Text(InlineText {
            master: Rc::clone(master),
            start,
            end,
            x: 0.0,
            width: 10.0,
            style: Rc::default(),
        })
    }

    #[test]
    fn test_fragments_share_master_text() {
        let master: Rc<str> = Rc::from("hello world");
        let (a, b) = (text(&master, 0, 5), text(&master, 6, 11));
        match (&a, &b) {
            (InlineChild::Text(a), InlineChild::Text(b)) => {
                assert_eq!(a.text(), "hello");
                assert_eq!(b.text(), "world");
                assert!(Rc::ptr_eq(&a.master, &b.master));
            }
            _ => unreachable!(),
        }
        assert_eq!(Rc::strong_count(&master), 3);
    }

    #[test]
    fn test_translate_carries_descendants() {
        let master: Rc<str> = Rc::from("ab");
        let mut inner = InlineBox::new(ElementRef(1), Rc::default(), 0.0);
        inner.children.push(text(&master, 0, 2));
        let mut outer = InlineChild::Inline(inner);
        outer.translate_x(7.0);
        outer.translate_y(3.0);
        let InlineChild::Inline(b) = &outer else {
            unreachable!()
        };
        assert!((b.x - 7.0).abs() < f32::EPSILON);
        assert!((b.y - 3.0).abs() < f32::EPSILON);
        assert!((b.children[0].x() - 7.0).abs() < f32::EPSILON);
    }
}
