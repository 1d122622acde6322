//! Vertical alignment of a finished line.
//!
//! [§ 10.8 Line height calculations: the 'line-height' and 'vertical-align' properties](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "The height of each inline-level box in the line box is calculated. For
//! replaced elements, inline-block elements, and inline-table elements, this
//! is the height of their margin box; for inline boxes, this is their
//! 'line-height'."
//!
//! "The inline-level boxes are aligned vertically according to their
//! 'vertical-align' property."
//!
//! "The line box height is the distance between the uppermost box top and
//! the lowermost box bottom."
//!
//! All positions here are relative to the line's top. Alignment first runs
//! against the container's strut with the strut's inline top at 0; boxes
//! raised above that produce a negative minimum, and the whole line is then
//! shifted down so nothing starts above 0.

use super::font::{FontMetrics, LineMetrics};
use super::line_box::{InlineChild, LineBox, TextDecoration};
use crate::style::{InlineStyle, TextDecorationLine, VerticalAlign};

/// Reference positions of one nesting level.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measurements {
    /// Baseline.
    pub baseline: f32,
    /// Top of the line-height box.
    pub inline_top: f32,
    /// Bottom of the line-height box.
    pub inline_bottom: f32,
    /// Top of the content area.
    pub text_top: f32,
    /// Bottom of the content area.
    pub text_bottom: f32,
    /// Top of the painted area (content plus top border and padding).
    pub painting_top: f32,
    /// Bottom of the painted area.
    pub painting_bottom: f32,
}

impl Measurements {
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// "Since the value of 'line-height' may be different from the height of
    /// the content area there may be space above and below rendered glyphs.
    /// The difference between these two heights is the leading. Half the
    /// leading is called the half-leading."
    ///
    /// The strut: the container's own font and line-height, as if an empty
    /// inline box started the line.
    #[must_use]
    pub fn strut(style: &InlineStyle, lm: &LineMetrics) -> Self {
        let line_height = style.line_height();
        let half_leading = (line_height - style.font.size) / 2.0;
        let baseline = half_leading + lm.ascent;
        let text_bottom = baseline + lm.descent;
        Self {
            baseline,
            inline_top: 0.0,
            inline_bottom: line_height,
            text_top: half_leading,
            text_bottom,
            painting_top: half_leading,
            painting_bottom: text_bottom,
        }
    }
}

/// The stack of enclosing measurements plus the running extremes over
/// everything pushed so far.
struct VerticalAlignContext {
    stack: Vec<Measurements>,
    inline_top: f32,
    inline_bottom: f32,
    painting_top: f32,
    painting_bottom: f32,
}

impl VerticalAlignContext {
    fn new(strut: Measurements) -> Self {
        Self {
            stack: vec![strut],
            inline_top: strut.inline_top,
            inline_bottom: strut.inline_bottom,
            painting_top: strut.painting_top,
            painting_bottom: strut.painting_bottom,
        }
    }

    fn parent(&self) -> Measurements {
        self.stack.last().copied().unwrap_or_default()
    }

    fn push(&mut self, m: Measurements) {
        self.include_inline(m.inline_top, m.inline_bottom);
        self.include_painting(m.painting_top, m.painting_bottom);
        self.stack.push(m);
    }

    fn pop(&mut self) {
        let _ = self.stack.pop();
    }

    fn include_inline(&mut self, top: f32, bottom: f32) {
        self.inline_top = self.inline_top.min(top);
        self.inline_bottom = self.inline_bottom.max(bottom);
    }

    fn include_painting(&mut self, top: f32, bottom: f32) {
        self.painting_top = self.painting_top.min(top);
        self.painting_bottom = self.painting_bottom.max(bottom);
    }

    fn line_height(&self) -> f32 {
        self.inline_bottom - self.inline_top
    }
}

/// Resolve the top of a box from its `vertical-align` against the parent's
/// measurements. `top` and `bottom` are laid out as `baseline`.
fn align_top(
    align: VerticalAlign,
    parent: &Measurements,
    ascent: f32,
    descent: f32,
    line_height: f32,
) -> f32 {
    match align {
        VerticalAlign::Baseline | VerticalAlign::Top | VerticalAlign::Bottom => {
            parent.baseline - ascent
        }
        // "Raise (positive value) or lower (negative value) the box by this
        // distance."
        VerticalAlign::Length(len) => parent.baseline - ascent - len,
        VerticalAlign::Percentage(pct) => parent.baseline - ascent - pct / 100.0 * line_height,
        VerticalAlign::TextTop => parent.text_top,
        VerticalAlign::TextBottom => parent.text_bottom - descent - ascent,
        VerticalAlign::Middle => (parent.text_top - parent.baseline) / 2.0 - ascent / 2.0,
        VerticalAlign::Super => (parent.text_top - parent.baseline) / 2.0 - ascent,
        VerticalAlign::Sub => parent.baseline + ascent / 2.0,
    }
}

/// [§ 16.3.1](https://www.w3.org/TR/CSS2/text.html#lining-striking-props)
///
/// A decoration for a box whose baseline sits `baseline` below its top.
fn decoration(line: TextDecorationLine, baseline: f32, lm: &LineMetrics) -> Option<TextDecoration> {
    let (offset, thickness) = match line {
        TextDecorationLine::None => return None,
        TextDecorationLine::Underline => (
            baseline + lm.underline_offset + lm.underline_thickness,
            lm.underline_thickness,
        ),
        TextDecorationLine::LineThrough => (
            baseline + lm.strikethrough_offset,
            lm.strikethrough_thickness,
        ),
        TextDecorationLine::Overline => (0.0, lm.underline_thickness),
    };
    Some(TextDecoration {
        line,
        offset,
        thickness,
    })
}

/// Align every box of `line` vertically against the strut of `container`,
/// then set the line's height, painting bounds and decoration.
pub fn position_vertically(line: &mut LineBox, container: &InlineStyle, metrics: &dyn FontMetrics) {
    // An empty line takes no room.
    if line.is_empty() {
        line.height = 0.0;
        line.painting_top = 0.0;
        line.painting_height = 0.0;
        return;
    }

    // STEP 1: The strut.
    let strut_lm = metrics.line_metrics(&container.font);
    let strut = Measurements::strut(container, &strut_lm);
    line.text_decoration = decoration(container.text_decoration, strut.baseline, &strut_lm);

    // STEP 2: Align children, nesting level by nesting level.
    let mut ctx = VerticalAlignContext::new(strut);
    align_children(&mut line.children, &mut ctx, metrics);

    // STEP 3: The line box height.
    // "The line box height is the distance between the uppermost box top
    // and the lowermost box bottom."
    line.height = ctx.line_height();
    let mut painting_top = ctx.painting_top;
    let mut painting_bottom = ctx.painting_bottom;

    // STEP 4: Move everything below the line's top.
    if ctx.inline_top < 0.0 {
        let dy = -ctx.inline_top;
        for child in &mut line.children {
            child.translate_y(dy);
        }
        if let Some(decoration) = &mut line.text_decoration {
            decoration.offset += dy;
        }
        painting_top += dy;
        painting_bottom += dy;
    }

    line.painting_top = painting_top;
    line.painting_height = painting_bottom - painting_top;
}

fn align_children(
    children: &mut [InlineChild],
    ctx: &mut VerticalAlignContext,
    metrics: &dyn FontMetrics,
) {
    for child in children {
        match child {
            InlineChild::Inline(b) => {
                let style = &b.style;
                let lm = metrics.line_metrics(&style.font);
                let line_height = style.line_height();
                let half_leading = (line_height - style.font.size) / 2.0;

                let parent = ctx.parent();
                let y = align_top(style.vertical_align, &parent, lm.ascent, lm.descent, line_height);
                b.y = y;
                b.baseline = lm.ascent;
                b.height = lm.ascent + lm.descent;
                b.text_decoration = decoration(style.text_decoration, b.baseline, &lm);

                let inline_top = y - half_leading;
                let baseline = y + lm.ascent;
                let text_bottom = baseline + lm.descent;
                let m = Measurements {
                    baseline,
                    inline_top,
                    inline_bottom: inline_top + line_height,
                    text_top: y,
                    text_bottom,
                    painting_top: y - style.border.top - style.padding.top,
                    painting_bottom: text_bottom + style.border.bottom + style.padding.bottom,
                };

                ctx.push(m);
                align_children(&mut b.children, ctx, metrics);
                ctx.pop();
            }
            InlineChild::Atomic(a) => {
                // The margin box stands on the baseline: all ascent.
                let parent = ctx.parent();
                let y = align_top(
                    a.style.vertical_align,
                    &parent,
                    a.height,
                    0.0,
                    a.style.line_height(),
                );
                a.y = y;
                ctx.include_inline(y, y + a.height);
                ctx.include_painting(y, y + a.height);
            }
            InlineChild::Text(_) => {}
        }
    }
}
