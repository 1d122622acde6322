//! Shared fixtures for the layout integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use lineflow_layout::layout::{LineMetrics, Point};
use lineflow_layout::style::{FontSpec, LineHeight};
use lineflow_layout::{
    ContentEvent, ElementRef, ElementStack, FloatContext, FontMetrics, InlineBox, InlineChild,
    InlineContainer, InlineLayout, InlineStyle, IntrinsicBlockLayout, LayoutContext, LayoutError,
    LineBox, WhitespaceBreaker, layout_inline_content,
};

/// Every glyph advances 10px, a space 5px, at any font size. Vertical
/// metrics follow the font size: ascent 0.8, descent 0.2.
pub struct FixedMetrics;

impl FontMetrics for FixedMetrics {
    fn line_metrics(&self, font: &FontSpec) -> LineMetrics {
        LineMetrics {
            ascent: font.size * 0.8,
            descent: font.size * 0.2,
            underline_offset: 1.0,
            underline_thickness: 1.0,
            strikethrough_offset: -3.0,
            strikethrough_thickness: 1.0,
        }
    }

    fn text_width(&self, text: &str, _font: &FontSpec) -> f32 {
        text.chars().map(|c| if c == ' ' { 5.0 } else { 10.0 }).sum()
    }
}

/// Font size 10, line-height 12px.
pub fn style() -> InlineStyle {
    InlineStyle {
        font: FontSpec {
            size: 10.0,
            ..FontSpec::default()
        },
        line_height: LineHeight::Px(12.0),
        ..InlineStyle::default()
    }
}

/// A container of `width` at the origin using [`style`].
pub fn container(width: f32) -> InlineContainer {
    container_with(width, style())
}

/// A container of `width` at the origin.
pub fn container_with(width: f32, style: InlineStyle) -> InlineContainer {
    InlineContainer {
        style: Rc::new(style),
        available_width: width,
        origin: Point::default(),
        shrink_wrap: false,
    }
}

/// Collaborators that outlive a single layout call.
pub struct Harness {
    pub floats: FloatContext,
    pub blocks: IntrinsicBlockLayout,
}

impl Harness {
    pub fn new(width: f32) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            floats: FloatContext::new(width),
            blocks: IntrinsicBlockLayout::new(),
        }
    }

    pub fn layout(
        &mut self,
        container: &InlineContainer,
        content: &[ContentEvent],
        resumed: Option<&ElementStack>,
    ) -> Result<InlineLayout, LayoutError> {
        let breaker = WhitespaceBreaker::new(FixedMetrics);
        let mut ctx = LayoutContext {
            metrics: &FixedMetrics,
            breaker: &breaker,
            floats: &mut self.floats,
            blocks: &mut self.blocks,
        };
        layout_inline_content(&mut ctx, container, content, resumed)
    }
}

/// Lay out `content` in a fresh formatting context as wide as the container.
pub fn layout(container: &InlineContainer, content: &[ContentEvent]) -> InlineLayout {
    Harness::new(container.available_width)
        .layout(container, content, None)
        .unwrap()
}

pub fn text(s: &str) -> ContentEvent {
    ContentEvent::text(s)
}

pub fn push(element: usize, style: InlineStyle) -> ContentEvent {
    ContentEvent::push(ElementRef(element), Rc::new(style))
}

pub fn pop() -> ContentEvent {
    ContentEvent::StylePop
}

/// The text of every fragment on `line`, in order, descending into inline
/// boxes.
pub fn line_texts(line: &LineBox) -> Vec<String> {
    fn collect(children: &[InlineChild], out: &mut Vec<String>) {
        for child in children {
            match child {
                InlineChild::Inline(b) => collect(&b.children, out),
                InlineChild::Text(t) => out.push(t.text().to_string()),
                InlineChild::Atomic(_) => out.push("[atomic]".to_string()),
            }
        }
    }
    let mut out = Vec::new();
    collect(&line.children, &mut out);
    out
}

/// All inline boxes of `element` on `line`, outermost first.
pub fn boxes_of(line: &LineBox, element: usize) -> Vec<&InlineBox> {
    fn collect<'l>(
        children: &'l [InlineChild],
        element: usize,
        out: &mut Vec<&'l InlineBox>,
    ) {
        for child in children {
            if let InlineChild::Inline(b) = child {
                if b.element == ElementRef(element) {
                    out.push(b);
                }
                collect(&b.children, element, out);
            }
        }
    }
    let mut out = Vec::new();
    collect(&line.children, element, &mut out);
    out
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.001
}
