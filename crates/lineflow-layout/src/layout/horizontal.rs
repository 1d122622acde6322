//! Horizontal rollup of a finished line.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "Horizontal margins, borders, and padding are respected between these
//! boxes."
//!
//! Descending, every child gets its starting x; an inline box's children
//! start after its left reserve. Ascending, the box adds its right reserve
//! and records its total inline width. Running the pass twice gives the
//! same result.

use super::line_box::{InlineChild, LineBox};

/// Assign x positions within `line` and return its content width.
pub fn position_horizontally(line: &mut LineBox) -> f32 {
    let width = position_children(&mut line.children, 0.0);
    line.content_width = width;
    width
}

/// Lay `children` out left to right from `start_x`; returns the end x.
fn position_children(children: &mut [InlineChild], start_x: f32) -> f32 {
    let mut x = start_x;
    for child in children {
        match child {
            InlineChild::Inline(b) => {
                b.x = x;
                let inner_end = position_children(&mut b.children, x + b.left_reserve);
                b.inline_width = inner_end + b.right_reserve - x;
                x += b.inline_width;
            }
            InlineChild::Text(t) => {
                t.x = x;
                x += t.width;
            }
            InlineChild::Atomic(a) => {
                a.x = x;
                x += a.width;
            }
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::layout::content::ElementRef;
    use crate::layout::line_box::{InlineBox, InlineText};

    fn text(width: f32) -> InlineChild {
        InlineChild::Text(InlineText {
            master: Rc::from("x"),
            start: 0,
            end: 1,
            x: 0.0,
            width,
            style: Rc::default(),
        })
    }

    #[test]
    fn test_reserves_wrap_children() {
        let mut inner = InlineBox::new(ElementRef(1), Rc::default(), 3.0);
        inner.right_reserve = 4.0;
        inner.children.push(text(20.0));
        let mut line = LineBox::new(0.0);
        line.children = vec![text(10.0), InlineChild::Inline(inner), text(5.0)];

        let width = position_horizontally(&mut line);
        assert!((width - 42.0).abs() < f32::EPSILON);

        let InlineChild::Inline(b) = &line.children[1] else {
            unreachable!()
        };
        assert!((b.x - 10.0).abs() < f32::EPSILON);
        assert!((b.inline_width - 27.0).abs() < f32::EPSILON);
        assert!((b.children[0].x() - 13.0).abs() < f32::EPSILON);
        assert!((line.children[2].x() - 37.0).abs() < f32::EPSILON);

        let again = position_horizontally(&mut line);
        assert!((again - width).abs() < f32::EPSILON);
    }
}
