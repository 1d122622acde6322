//! CSS Formatting Contexts.
//!
//! [§ 9.4 Normal flow](https://www.w3.org/TR/CSS2/visuren.html#normal-flow)
//!
//! Inline layout runs inside a block formatting context that owns the
//! floats and lays out block-level content. [`LayoutContext`] is the bundle
//! of collaborators inline layout calls into; [`BlockFormattingContext`]
//! stacks sibling inline containers and threads open elements between them.

use std::rc::Rc;

use super::box_model::Point;
use super::content::{AbsoluteContent, ContentEvent, ElementRef, InlineBlockContent};
use super::float::{FloatContext, FloatManager};
use super::font::FontMetrics;
use super::inline::{InlineContainer, InlineLayout, layout_inline_content};
use super::line_box::{AtomicBox, ElementStack, LayerId, LineBox};
use super::line_break::TextBreaker;
use crate::error::LayoutError;
use crate::style::InlineStyle;

/// Block-level layout, as needed by inline layout.
pub trait BlockLayout {
    /// [§ 10.3.9 'Inline-block', non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#inlineblock-width)
    ///
    /// Lay out an inline-block against `containing_width`. May be called a
    /// second time for the same content after the line it was meant for
    /// overflowed; the first result is detached before that.
    fn layout_inline_block(
        &mut self,
        content: &InlineBlockContent,
        containing_width: f32,
    ) -> AtomicBox;

    /// Undo any layer attachment made when `atomic` was laid out.
    fn detach_layer(&mut self, atomic: &AtomicBox);

    /// [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
    ///
    /// Lay out absolutely positioned content whose static position is on
    /// `line`.
    fn layout_absolute(&mut self, content: &AbsoluteContent, line: &LineBox, origin: Point);
}

/// The collaborators of one inline layout invocation.
pub struct LayoutContext<'a> {
    /// Vertical metrics for alignment and decorations.
    pub metrics: &'a dyn FontMetrics,
    /// Break finder and text measurement.
    pub breaker: &'a dyn TextBreaker,
    /// Floats of the enclosing block formatting context.
    pub floats: &'a mut dyn FloatManager,
    /// Layout of inline-blocks and absolutely positioned content.
    pub blocks: &'a mut dyn BlockLayout,
}

/// Sizes inline-blocks from their declared size.
///
/// Layers are numbered from 1 in attachment order. Detached layers are
/// forgotten, their numbers are not reused.
#[derive(Debug, Default)]
pub struct IntrinsicBlockLayout {
    next_layer: u32,
    attached: Vec<LayerId>,
    absolutes: Vec<(ElementRef, Point)>,
}

impl IntrinsicBlockLayout {
    /// Create an empty block layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers currently attached, in attachment order.
    #[must_use]
    pub fn attached_layers(&self) -> &[LayerId] {
        &self.attached
    }

    /// Static positions recorded for absolutely positioned elements.
    #[must_use]
    pub fn absolute_positions(&self) -> &[(ElementRef, Point)] {
        &self.absolutes
    }
}

impl BlockLayout for IntrinsicBlockLayout {
    fn layout_inline_block(
        &mut self,
        content: &InlineBlockContent,
        _containing_width: f32,
    ) -> AtomicBox {
        let layer = content.creates_layer.then(|| {
            self.next_layer += 1;
            let id = LayerId(self.next_layer);
            self.attached.push(id);
            id
        });
        AtomicBox {
            element: content.element,
            style: Rc::clone(&content.style),
            x: 0.0,
            y: 0.0,
            width: content.width,
            height: content.height,
            layer,
        }
    }

    fn detach_layer(&mut self, atomic: &AtomicBox) {
        if let Some(id) = atomic.layer {
            self.attached.retain(|attached| *attached != id);
        }
    }

    fn layout_absolute(&mut self, content: &AbsoluteContent, line: &LineBox, origin: Point) {
        let position = origin.offset(line.x, line.y);
        log::debug!(
            "static position of absolute {:?} is ({}, {})",
            content.element,
            position.x,
            position.y
        );
        self.absolutes.push((content.element, position));
    }
}

/// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
///
/// "In a block formatting context, boxes are laid out one after the other,
/// vertically, beginning at the top of a containing block."
///
/// Each call to [`layout_container`](Self::layout_container) lays out one
/// inline container below the previous one. Elements left open at the end
/// of a container are resumed at the start of the next.
pub struct BlockFormattingContext {
    /// Current Y position for laying out the next container.
    pub current_y: f32,
    /// Width of the containing block.
    pub containing_width: f32,
    /// Floats placed so far.
    pub floats: FloatContext,
    /// Inline-block and absolute layout.
    pub blocks: IntrinsicBlockLayout,
    pending: Option<ElementStack>,
}

impl BlockFormattingContext {
    /// An empty formatting context `containing_width` wide.
    #[must_use]
    pub fn new(containing_width: f32) -> Self {
        Self {
            current_y: 0.0,
            containing_width,
            floats: FloatContext::new(containing_width),
            blocks: IntrinsicBlockLayout::new(),
            pending: None,
        }
    }

    /// Elements still open after the last container.
    #[must_use]
    pub const fn pending_elements(&self) -> Option<&ElementStack> {
        self.pending.as_ref()
    }

    /// Lay out one inline container at the current position.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutError`] from inline layout; the context is left
    /// unchanged in that case except for floats already placed.
    pub fn layout_container(
        &mut self,
        style: Rc<InlineStyle>,
        content: &[ContentEvent],
        shrink_wrap: bool,
        metrics: &dyn FontMetrics,
        breaker: &dyn TextBreaker,
    ) -> Result<InlineLayout, LayoutError> {
        // STEP 1: Apply clearance.
        // [§ 9.5.2](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
        //
        // "Requires that the top border edge of the box be below the bottom
        // outer edge of any left-floating boxes..."
        if let Some(clear) = style.clear {
            self.current_y = self.floats.clear(clear, self.current_y);
        }

        // STEP 2: Lay out the inline content, resuming open elements.
        let container = InlineContainer {
            style,
            available_width: self.containing_width,
            origin: Point::new(0.0, self.current_y),
            shrink_wrap,
        };
        let mut ctx = LayoutContext {
            metrics,
            breaker,
            floats: &mut self.floats,
            blocks: &mut self.blocks,
        };
        let layout = layout_inline_content(&mut ctx, &container, content, self.pending.as_ref())?;

        // STEP 3: Advance past the container.
        self.current_y += layout.height;
        self.pending.clone_from(&layout.pending_elements);
        Ok(layout)
    }
}
