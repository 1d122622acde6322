//! Line box geometry: horizontal rollup and vertical alignment of laid out
//! lines.

mod common;

use common::{approx, boxes_of, container, container_with, layout, pop, push, style, text};
use lineflow_layout::layout::{EdgeSizes, position_horizontally};
use lineflow_layout::style::{LineHeight, TextDecorationLine, VerticalAlign};
use lineflow_layout::{InlineBox, InlineChild, InlineStyle, LineBox};

/// Lay out `aa` inside element 1 styled by `f`, and return the line.
fn aligned(f: impl FnOnce(&mut InlineStyle)) -> LineBox {
    let mut s = style();
    f(&mut s);
    let mut result = layout(&container(100.0), &[push(1, s), text("aa"), pop()]);
    result.lines.remove(0)
}

fn only_box(line: &LineBox) -> &InlineBox {
    boxes_of(line, 1)[0]
}

// =============================================================================
// Vertical alignment
// =============================================================================
//
// Container and child both use font size 10 and line-height 12: half-leading
// 1, ascent 8, descent 2. The strut's baseline sits at 9, its text top at 1
// and its text bottom at 11.

#[test]
fn test_baseline_aligned_box_matches_strut() {
    let line = aligned(|_| {});
    let b = only_box(&line);

    assert!(approx(b.y, 1.0));
    assert!(approx(b.baseline, 8.0));
    assert!(approx(b.height, 10.0));
    assert!(approx(line.height, 12.0));
}

#[test]
fn test_text_top_and_text_bottom() {
    let top = aligned(|s| s.vertical_align = VerticalAlign::TextTop);
    assert!(approx(only_box(&top).y, 1.0));
    assert!(approx(top.height, 12.0));

    let bottom = aligned(|s| s.vertical_align = VerticalAlign::TextBottom);
    assert!(approx(only_box(&bottom).y, 1.0));
    assert!(approx(bottom.height, 12.0));
}

#[test]
fn test_sub_lowers_the_box() {
    let line = aligned(|s| s.vertical_align = VerticalAlign::Sub);

    // Top at 9 + 4: the line grows downward, nothing moves.
    assert!(approx(only_box(&line).y, 13.0));
    assert!(approx(line.height, 24.0));
}

#[test]
fn test_super_raises_the_box() {
    let line = aligned(|s| s.vertical_align = VerticalAlign::Super);

    // Top at (1 - 9) / 2 - 8 = -12, inline top -13: shifted down by 13.
    assert!(approx(only_box(&line).y, 1.0));
    assert!(approx(line.height, 25.0));
}

#[test]
fn test_middle() {
    let line = aligned(|s| s.vertical_align = VerticalAlign::Middle);

    // Top at (1 - 9) / 2 - 4 = -8, inline top -9.
    assert!(approx(only_box(&line).y, 1.0));
    assert!(approx(line.height, 21.0));
}

#[test]
fn test_length_and_percentage_raise() {
    let length = aligned(|s| s.vertical_align = VerticalAlign::Length(3.0));
    // Top at 9 - 8 - 3 = -2, inline top -3.
    assert!(approx(length.height, 15.0));
    assert!(approx(only_box(&length).y, 1.0));

    let percentage = aligned(|s| s.vertical_align = VerticalAlign::Percentage(50.0));
    // 50% of the 12px line-height.
    assert!(approx(percentage.height, 18.0));
    assert!(approx(only_box(&percentage).y, 1.0));
}

#[test]
fn test_top_and_bottom_fall_back_to_baseline() {
    for align in [VerticalAlign::Top, VerticalAlign::Bottom] {
        let line = aligned(|s| s.vertical_align = align);
        assert!(approx(only_box(&line).y, 1.0));
        assert!(approx(line.height, 12.0));
    }
}

#[test]
fn test_taller_child_line_height_grows_line() {
    let line = aligned(|s| s.line_height = LineHeight::Px(20.0));

    // Half-leading 5: inline top -4, inline bottom 16.
    assert!(approx(line.height, 20.0));
    assert!(approx(only_box(&line).y, 5.0));
}

#[test]
fn test_lines_stack_by_height() {
    let mut s = style();
    s.vertical_align = VerticalAlign::Sub;
    let result = layout(
        &container(45.0),
        &[text("aa bb "), push(1, s), text("cc"), pop()],
    );

    assert_eq!(result.lines.len(), 2);
    assert!(approx(result.lines[0].height, 12.0));
    assert!(approx(result.lines[1].y, 12.0));
    assert!(approx(result.lines[1].height, 24.0));
    assert!(approx(result.height, 36.0));
}

// =============================================================================
// Painting bounds and decorations
// =============================================================================

#[test]
fn test_padding_and_border_extend_painting_area() {
    let line = aligned(|s| {
        s.padding = EdgeSizes {
            top: 2.0,
            ..EdgeSizes::default()
        };
        s.border = EdgeSizes {
            bottom: 3.0,
            ..EdgeSizes::default()
        };
    });

    // Painting runs from 1 - 2 to 11 + 3; the line height is unaffected.
    assert!(approx(line.painting_top, -1.0));
    assert!(approx(line.painting_height, 15.0));
    assert!(approx(line.height, 12.0));
}

#[test]
fn test_box_decorations() {
    let underline = aligned(|s| s.text_decoration = TextDecorationLine::Underline);
    let decoration = only_box(&underline).text_decoration.unwrap();
    assert_eq!(decoration.line, TextDecorationLine::Underline);
    // Baseline 8 + offset 1 + thickness 1.
    assert!(approx(decoration.offset, 10.0));
    assert!(approx(decoration.thickness, 1.0));

    let strike = aligned(|s| s.text_decoration = TextDecorationLine::LineThrough);
    let decoration = only_box(&strike).text_decoration.unwrap();
    assert!(approx(decoration.offset, 5.0));

    let overline = aligned(|s| s.text_decoration = TextDecorationLine::Overline);
    let decoration = only_box(&overline).text_decoration.unwrap();
    assert!(approx(decoration.offset, 0.0));
}

#[test]
fn test_container_decoration_follows_line_shift() {
    let mut container_style = style();
    container_style.text_decoration = TextDecorationLine::Underline;
    let mut raised = style();
    raised.vertical_align = VerticalAlign::Length(3.0);
    let result = layout(
        &container_with(100.0, container_style),
        &[text("aa "), push(1, raised), text("bb"), pop()],
    );

    // Strut underline at 9 + 1 + 1, then the line moves down by 3.
    let decoration = result.lines[0].text_decoration.unwrap();
    assert!(approx(decoration.offset, 14.0));
    assert!(only_box(&result.lines[0]).text_decoration.is_none());
}

// =============================================================================
// Horizontal rollup
// =============================================================================

fn assert_widths_conserved(children: &[InlineChild]) -> f32 {
    let mut sum = 0.0;
    for child in children {
        if let InlineChild::Inline(b) = child {
            let inner = assert_widths_conserved(&b.children);
            assert!(approx(b.inline_width, b.left_reserve + inner + b.right_reserve));
        }
        sum += child.width();
    }
    sum
}

#[test]
fn test_widths_roll_up_through_nesting() {
    let mut outer = style();
    outer.margin = EdgeSizes::uniform(2.0);
    let mut inner = style();
    inner.border = EdgeSizes::uniform(1.0);
    let result = layout(
        &container(60.0),
        &[
            text("aa "),
            push(1, outer),
            text("bb "),
            push(2, inner),
            text("cc dd ee"),
            pop(),
            pop(),
        ],
    );

    assert!(result.lines.len() > 1);
    for line in &result.lines {
        let sum = assert_widths_conserved(&line.children);
        assert!(approx(line.content_width, sum));
    }
}

#[test]
fn test_horizontal_pass_is_idempotent() {
    let result = layout(
        &container(45.0),
        &[push(1, style()), text("aa bb cc dd"), pop()],
    );

    for line in &result.lines {
        let mut again = line.clone();
        let width = position_horizontally(&mut again);
        assert!(approx(width, line.content_width));
        let before: Vec<f32> = line.children.iter().map(InlineChild::x).collect();
        let after: Vec<f32> = again.children.iter().map(InlineChild::x).collect();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            assert!(approx(*a, *b));
        }
    }
}
