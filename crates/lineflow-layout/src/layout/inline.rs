//! CSS Inline Layout and Line Box construction.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block. Horizontal
//! margins, borders, and padding are respected between these boxes."
//!
//! [`layout_inline_content`] walks the flattened content stream once. Text
//! runs are broken with a [`LineBreakContext`]; inline elements become one
//! [`InlineBox`] per line they touch; floats, absolutely positioned content
//! and inline-blocks are handed to the collaborators in [`LayoutContext`].
//!
//! While a line is being filled, the chain of open inline elements is kept
//! as a stack of detached fragments. Content always goes into the innermost
//! open fragment, and a fragment is attached to its parent when its element
//! closes or when the line is saved. Saving a line therefore runs in two
//! phases: first the open chain is closed onto the line, then the finished
//! line is positioned (horizontal rollup, vertical alignment, float
//! distances, `text-align`).

use std::rc::Rc;

use lineflow_common::warning::warn_once;
use serde::Serialize;

use super::box_model::Point;
use super::content::{ContentEvent, FloatContent, InlineBlockContent};
use super::float::{FloatPlacement, FloatSide};
use super::formatting_context::LayoutContext;
use super::horizontal::position_horizontally;
use super::justify::justify_line;
use super::line_box::{
    ElementStack, FloatDistances, InlineBox, InlineChild, InlineText, LineBox, OpenBoxTemplate,
};
use super::line_break::LineBreakContext;
use super::vertical::position_vertically;
use crate::error::LayoutError;
use crate::style::{InlineStyle, TextAlign};

/// Warning logged (once) when a `:first-line` or `:first-letter` marker
/// appears anywhere but the start of the content stream.
pub const MISPLACED_PSEUDO_MARKER: &str =
    "pseudo-element style marker after the start of the content stream ignored";

/// The block container whose inline content is being laid out.
#[derive(Debug, Clone)]
pub struct InlineContainer {
    /// The container's computed style: strut font, `line-height`,
    /// `text-align`, `text-indent`, `clear` and its own text decoration.
    pub style: Rc<InlineStyle>,
    /// Width of the container's content box.
    pub available_width: f32,
    /// Top-left of the content box in block formatting context coordinates.
    pub origin: Point,
    /// [§ 10.3.5 Floating, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#float-width)
    ///
    /// The container is being sized to its contents: lines are not aligned
    /// or justified and ignore floats.
    pub shrink_wrap: bool,
}

/// Styles of `:first-line` and `:first-letter` markers consumed at the start
/// of the content stream. Layout does not apply them; they are kept for
/// painting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PseudoStyles {
    /// `:first-line` style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_line: Option<Rc<InlineStyle>>,
    /// `:first-letter` style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_letter: Option<Rc<InlineStyle>>,
}

/// The result of laying out one container's inline content.
#[derive(Debug, Clone, Serialize)]
pub struct InlineLayout {
    /// Line boxes, top to bottom. Line coordinates are relative to the
    /// container's origin.
    pub lines: Vec<LineBox>,
    /// Elements still open at the end, to be resumed by the next sibling
    /// container.
    pub pending_elements: Option<ElementStack>,
    /// Widest line when shrink-wrapping, otherwise the available width.
    pub content_width: f32,
    /// Bottom of the last line.
    pub height: f32,
    /// Pseudo-element styles consumed from the stream.
    pub pseudo_styles: PseudoStyles,
}

/// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
///
/// Lay out `content` into line boxes inside `container`.
///
/// `resumed` is the element stack exported by a previous sibling container;
/// its elements are reopened at the start of the first line.
///
/// # Errors
///
/// [`LayoutError::UnmatchedStylePop`] when the stream closes more elements
/// than it (and `resumed`) opened.
pub fn layout_inline_content(
    ctx: &mut LayoutContext<'_>,
    container: &InlineContainer,
    content: &[ContentEvent],
    resumed: Option<&ElementStack>,
) -> Result<InlineLayout, LayoutError> {
    // STEP 1: Consume leading pseudo-element markers.
    // [§ 5.12.1](https://www.w3.org/TR/CSS2/selector.html#first-line-pseudo)
    let (pseudo_styles, start) = take_pseudo_styles(content);

    let mut assembler = InlineAssembler::new(ctx, container, resumed);

    // STEP 2: Walk the content stream.
    for (index, event) in content.iter().enumerate().skip(start) {
        match event {
            ContentEvent::FirstLine { .. } | ContentEvent::FirstLetter { .. } => {
                log::debug!("ignoring pseudo-element marker at content index {index}");
                warn_once("inline", MISPLACED_PSEUDO_MARKER);
            }
            ContentEvent::StylePush { element, style } => {
                assembler.push_element(OpenBoxTemplate {
                    element: *element,
                    style: Rc::clone(style),
                    started: false,
                });
            }
            ContentEvent::StylePop => assembler.pop_element(index)?,
            ContentEvent::Text { text } => assembler.layout_text(text),
            ContentEvent::Float(float) => assembler.place_float(float),
            ContentEvent::Absolute(absolute) => {
                let origin = assembler.container.origin;
                assembler
                    .ctx
                    .blocks
                    .layout_absolute(absolute, &assembler.line, origin);
            }
            ContentEvent::InlineBlock(block) => assembler.layout_inline_block(block),
        }
    }

    // STEP 3: Save the final line and justify the lines before it.
    Ok(assembler.finish(pseudo_styles))
}

/// Markers are honoured at index 0 (`:first-line` or `:first-letter`) and at
/// index 1 (`:first-letter` after `:first-line`). Returns the styles and
/// the index of the first event that is not a consumed marker.
fn take_pseudo_styles(content: &[ContentEvent]) -> (PseudoStyles, usize) {
    let mut styles = PseudoStyles::default();
    match content {
        [ContentEvent::FirstLine { style }, rest @ ..] => {
            styles.first_line = Some(Rc::clone(style));
            if let [ContentEvent::FirstLetter { style }, ..] = rest {
                styles.first_letter = Some(Rc::clone(style));
                (styles, 2)
            } else {
                (styles, 1)
            }
        }
        [ContentEvent::FirstLetter { style }, ..] => {
            styles.first_letter = Some(Rc::clone(style));
            (styles, 1)
        }
        _ => (styles, 0),
    }
}

/// An element that is open on the current line, with the fragment that is
/// collecting its content.
struct OpenBox {
    template: OpenBoxTemplate,
    fragment: InlineBox,
}

impl OpenBox {
    fn instantiate(template: OpenBoxTemplate) -> Self {
        let left_reserve = if template.started {
            0.0
        } else {
            template.style.left_reserve()
        };
        let fragment = InlineBox::new(template.element, Rc::clone(&template.style), left_reserve);
        Self { template, fragment }
    }
}

/// All mutable state of one layout invocation.
struct InlineAssembler<'c, 'a> {
    ctx: &'c mut LayoutContext<'a>,
    container: &'c InlineContainer,
    lines: Vec<LineBox>,
    line: LineBox,
    /// Open elements, outermost first.
    open: Vec<OpenBox>,
    /// Width left on the current line.
    remaining: f32,
    /// Left reserves of opened elements not yet paid for with content.
    pending_left: f32,
    /// Right reserves of elements still open.
    pending_right: f32,
    /// Floats that did not fit beside the current line.
    pending_floats: Vec<FloatContent>,
    /// Justification target of each saved line, `None` when it is not
    /// justified.
    justify_targets: Vec<Option<f32>>,
    /// Used `text-indent`, applied to the first line only.
    indent: f32,
    /// The container's `line-height`.
    min_line_height: f32,
}

impl<'c, 'a> InlineAssembler<'c, 'a> {
    fn new(
        ctx: &'c mut LayoutContext<'a>,
        container: &'c InlineContainer,
        resumed: Option<&ElementStack>,
    ) -> Self {
        let indent = container.style.text_indent(container.available_width);
        let mut assembler = Self {
            ctx,
            container,
            lines: Vec::new(),
            line: LineBox::new(0.0),
            open: Vec::new(),
            remaining: 0.0,
            pending_left: 0.0,
            pending_right: 0.0,
            pending_floats: Vec::new(),
            justify_targets: Vec::new(),
            indent,
            min_line_height: container.style.line_height(),
        };
        assembler.line.x = indent;

        // Reopen elements carried over from a previous container.
        if let Some(stack) = resumed {
            assembler.reopen(stack.templates().to_vec());
        }
        assembler.remaining = assembler.line_budget();
        assembler
    }

    fn is_first_line(&self) -> bool {
        self.lines.is_empty()
    }

    /// The container origin moved down to the current line.
    fn line_origin(&self) -> Point {
        self.container.origin.offset(0.0, self.line.y)
    }

    /// Available width for the current line: the container width minus the
    /// first-line indent and the floats beside the line.
    fn line_budget(&self) -> f32 {
        let mut budget = self.container.available_width;
        if self.is_first_line() {
            budget -= self.indent;
        }
        if self.container.style.clear.is_none() {
            let origin = self.line_origin();
            let available = self.container.available_width;
            budget -= self.ctx.floats.float_distance(origin, available, FloatSide::Left);
            budget -= self.ctx.floats.float_distance(origin, available, FloatSide::Right);
        }
        budget
    }

    fn current_style(&self) -> Rc<InlineStyle> {
        self.open.last().map_or_else(
            || Rc::clone(&self.container.style),
            |open| Rc::clone(&open.fragment.style),
        )
    }

    /// Add `child` to the innermost open element, or to the line.
    fn append(&mut self, child: InlineChild) {
        match self.open.last_mut() {
            Some(open) => open.fragment.children.push(child),
            None => self.line.children.push(child),
        }
    }

    /// Pay for placed content of `width` and any pending left reserve.
    fn consume(&mut self, width: f32) {
        self.remaining -= width + self.pending_left;
        self.pending_left = 0.0;
    }

    /// Reopen `templates` on the current line, outermost first.
    fn reopen(&mut self, templates: Vec<OpenBoxTemplate>) {
        for template in templates {
            if !template.started {
                self.pending_left += template.style.left_reserve();
            }
            self.pending_right += template.style.right_reserve();
            self.open.push(OpenBox::instantiate(template));
        }
    }

    fn push_element(&mut self, template: OpenBoxTemplate) {
        self.pending_left += template.style.left_reserve();
        self.pending_right += template.style.right_reserve();
        self.open.push(OpenBox::instantiate(template));
    }

    fn pop_element(&mut self, index: usize) -> Result<(), LayoutError> {
        let Some(OpenBox { mut fragment, .. }) = self.open.pop() else {
            return Err(LayoutError::UnmatchedStylePop { index });
        };
        let right = fragment.style.right_reserve();
        fragment.right_reserve = right;
        fragment.ends_here = true;
        self.pending_right -= right;
        self.remaining -= right;
        self.append(InlineChild::Inline(fragment));
        Ok(())
    }

    /// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
    ///
    /// "The current and subsequent line boxes created next to the float are
    /// shortened as necessary to make room for the margin box of the float."
    fn place_float(&mut self, float: &FloatContent) {
        let origin = self.container.origin;
        match self
            .ctx
            .floats
            .place_float(float, self.remaining, &self.line, origin)
        {
            FloatPlacement::Placed(rect) => {
                if rect.y <= origin.y + self.line.y {
                    self.remaining -= rect.width;
                }
            }
            FloatPlacement::Pending => self.pending_floats.push(float.clone()),
        }
    }

    /// [§ 10.3.9 'Inline-block', non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#inlineblock-width)
    fn layout_inline_block(&mut self, block: &InlineBlockContent) {
        let available = self.container.available_width;
        let mut atomic = self.ctx.blocks.layout_inline_block(block, available);

        // An atomic box cannot be split: if it overflows a line that
        // already has content, it moves to the next line and is laid out
        // again there.
        if atomic.width > self.remaining - self.pending_left && self.line.contains_content {
            log::debug!(
                "inline-block {:?} ({}px) overflows {}px, relaying out on a new line",
                block.element,
                atomic.width,
                self.remaining - self.pending_left
            );
            self.break_line();
            self.ctx.blocks.detach_layer(&atomic);
            atomic = self.ctx.blocks.layout_inline_block(block, available);
        }

        let width = atomic.width;
        self.append(InlineChild::Atomic(atomic));
        self.line.contains_content = true;
        self.line.contains_block_level_content = true;
        self.consume(width);
    }

    /// [§ 5.5.1 Line Breaking Details](https://www.w3.org/TR/css-text-3/#line-break-details)
    fn layout_text(&mut self, text: &str) {
        let style = self.current_style();
        let master: Rc<str> = Rc::from(style.text_transform.apply(text));
        let mut cursor = LineBreakContext::new(Rc::clone(&master));

        loop {
            cursor.reset();

            // [§ 4.1.2 Phase II](https://www.w3.org/TR/css-text-3/#white-space-phase-2)
            //
            // "A sequence of collapsible spaces at the beginning of a line is
            // removed."
            if !self.line.contains_content && style.white_space.trims_leading_space() {
                cursor.skip_leading_space();
            }
            cursor.save_end();
            cursor.measure(
                self.ctx.breaker,
                &style.font,
                self.remaining - self.pending_left,
                style.white_space,
            );

            if !cursor.is_unbreakable() || !self.line.contains_content {
                // Empty fragments only matter when they carry a forced break,
                // so a blank preformatted line keeps its height.
                if cursor.end() > cursor.start() || cursor.ended_by_forced_break() {
                    self.append(InlineChild::Text(InlineText {
                        master: Rc::clone(&master),
                        start: cursor.start(),
                        end: cursor.end(),
                        x: 0.0,
                        width: cursor.width(),
                        style: Rc::clone(&style),
                    }));
                    self.line.contains_content = true;
                    self.consume(cursor.width());
                }
                if cursor.ended_by_forced_break() {
                    self.line.ended_by_forced_break = true;
                }
                cursor.commit();
            } else {
                cursor.reset_end();
            }

            if cursor.needs_new_line() {
                self.break_line();
            }
            if cursor.is_finished() {
                break;
            }
        }
    }

    /// Save the current line and start the next one with the open chain.
    fn break_line(&mut self) {
        let templates = self.save_line(false);
        let y = self.lines.last().map_or(0.0, LineBox::bottom);
        self.line = LineBox::new(y);
        self.pending_left = 0.0;
        self.pending_right = 0.0;
        self.reopen(templates);
        self.remaining = self.line_budget();
    }

    /// Finish the current line and push it onto `lines`. Returns the
    /// templates of the elements still open, outermost first.
    fn save_line(&mut self, last: bool) -> Vec<OpenBoxTemplate> {
        // PHASE 1: Close the open chain onto the line, deepest first.
        // Fragments that received nothing are pruned; their elements have not
        // started, so the next line's fragment still carries the left
        // reserve.
        let mut templates = Vec::with_capacity(self.open.len());
        let mut inner: Option<InlineBox> = None;
        for OpenBox {
            mut template,
            mut fragment,
        } in std::mem::take(&mut self.open).into_iter().rev()
        {
            if let Some(child) = inner.take() {
                fragment.children.push(InlineChild::Inline(child));
            }
            if !fragment.children.is_empty() {
                template.started = true;
                inner = Some(fragment);
            }
            templates.push(template);
        }
        templates.reverse();
        if let Some(outermost) = inner {
            self.line.children.push(InlineChild::Inline(outermost));
        }

        // PHASE 2: Position the finished line.
        let mut line = std::mem::take(&mut self.line);
        let container = self.container;
        let style = &container.style;
        let first = self.is_first_line();

        // STEP 1: Horizontal rollup.
        let content_width = position_horizontally(&mut line);

        // STEP 2: Vertical alignment.
        // [§ 10.8](https://www.w3.org/TR/CSS2/visudet.html#line-height)
        position_vertically(&mut line, style, self.ctx.metrics);

        // STEP 3: Bind float distances.
        let distances = if container.shrink_wrap {
            FloatDistances::default()
        } else {
            let origin = container.origin.offset(0.0, line.y);
            let available = container.available_width;
            FloatDistances {
                left: self.ctx.floats.float_distance(origin, available, FloatSide::Left),
                right: self
                    .ctx
                    .floats
                    .float_distance(origin, available, FloatSide::Right),
            }
        };
        line.float_distances = Some(distances);

        // STEP 4: Align.
        // [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
        //
        // "This property describes how inline-level content of a block
        // container is aligned."
        let indent = if first { self.indent } else { 0.0 };
        let band_start = if style.clear.is_some_and(|clear| clear.clears_left()) {
            0.0
        } else {
            distances.left
        };
        let band_width = container.available_width - distances.left - distances.right;
        let free = (band_width - indent - content_width).max(0.0);
        let text_align = style.used_text_align();
        let offset = if container.shrink_wrap {
            0.0
        } else {
            match text_align {
                TextAlign::Left | TextAlign::Justify => 0.0,
                TextAlign::Center => free / 2.0,
                TextAlign::Right => free,
            }
        };
        line.x = band_start + indent + offset;

        // Justification waits for `finish`, which knows the last line with
        // content.
        let justify_target = (text_align == TextAlign::Justify
            && !container.shrink_wrap
            && !last
            && !line.ended_by_forced_break)
            .then_some(band_width - indent);

        // STEP 5: Minimum line height. Empty lines stay at zero.
        if line.height > 0.0 && line.height < self.min_line_height {
            line.height = self.min_line_height;
        }

        // STEP 6: Floats deferred on this line go below it.
        if !self.pending_floats.is_empty() {
            let floats = std::mem::take(&mut self.pending_floats);
            self.ctx
                .floats
                .float_pending(floats, container.origin.y + line.bottom());
        }

        log::debug!(
            "saved line {} at y={} x={}: {} children, width {}, height {}, {} open, {}px right reserve pending",
            self.lines.len(),
            line.y,
            line.x,
            line.children.len(),
            line.content_width,
            line.height,
            templates.len(),
            self.pending_right
        );
        #[cfg(feature = "layout-trace")]
        log::trace!("[INLINE SAVE] {line:#?}");

        self.lines.push(line);
        self.justify_targets.push(justify_target);
        templates
    }

    fn finish(mut self, pseudo_styles: PseudoStyles) -> InlineLayout {
        let templates = self.save_line(true);
        let pending_elements = (!templates.is_empty()).then(|| ElementStack::new(templates));

        // [§ 16.2](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
        //
        // "If an element's content is justified, the last line and lines
        // ending in a forced break are aligned as for 'left'."
        //
        // Empty lines left behind by a trailing break do not count as the
        // last line.
        let last_with_content = self.lines.iter().rposition(|line| line.contains_content);
        for (index, line) in self.lines.iter_mut().enumerate() {
            if Some(index) == last_with_content {
                continue;
            }
            if let Some(target) = self.justify_targets[index] {
                justify_line(line, target, self.ctx.metrics);
            }
        }

        let content_width = if self.container.shrink_wrap {
            self.lines
                .iter()
                .map(|line| line.content_width)
                .fold(0.0_f32, f32::max)
        } else {
            self.container.available_width
        };
        let height = self.lines.last().map_or(0.0, LineBox::bottom);

        InlineLayout {
            lines: self.lines,
            pending_elements,
            content_width,
            height,
            pseudo_styles,
        }
    }
}
