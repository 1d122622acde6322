//! `text-align: justify`.
//!
//! [§ 7.3 Justification](https://www.w3.org/TR/css-text-3/#justification)
//!
//! "When justifying text, the user agent takes the remaining space between
//! the ends of a line's contents and the edges of its line box, and
//! distributes that space throughout its contents so that the contents
//! exactly fill the line box."
//!
//! Runs after a line has been positioned. Top-level text fragments are
//! re-split into one fragment per word, and the slack is spread evenly over
//! the gaps between fragments. Everything else on the line moves as a unit.

use std::rc::Rc;

use super::font::FontMetrics;
use super::line_box::{InlineChild, InlineText, LineBox};

/// Byte ranges of the words of `text`, delimited by ASCII whitespace so a
/// no-break space stays inside its word.
fn word_ranges(text: &str) -> Vec<(usize, usize)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, ch) in text.char_indices() {
        if ch.is_ascii_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s, text.len()));
    }
    words
}

/// Split a text fragment into word fragments, re-measured with its font.
/// Fragments with fewer than two words come back unchanged.
fn split_words(text: InlineText, metrics: &dyn FontMetrics, out: &mut Vec<InlineChild>) {
    let words = word_ranges(text.text());
    if words.len() < 2 {
        out.push(InlineChild::Text(text));
        return;
    }
    for (start, end) in words {
        let start = text.start + start;
        let end = text.start + end;
        let width = metrics.text_width(&text.master[start..end], &text.style.font);
        out.push(InlineChild::Text(InlineText {
            master: Rc::clone(&text.master),
            start,
            end,
            x: 0.0,
            width,
            style: Rc::clone(&text.style),
        }));
    }
}

/// Stretch `line` to `target_width`.
///
/// Does nothing when the line is already at least that wide or ends up with
/// fewer than two fragments. Fragment `i` starts at the sum of the widths
/// before it plus `floor(spacer * i)`, where `spacer` is the slack divided
/// by the number of gaps.
#[allow(clippy::cast_precision_loss)]
pub fn justify_line(line: &mut LineBox, target_width: f32, metrics: &dyn FontMetrics) {
    if line.content_width >= target_width {
        return;
    }

    // STEP 1: One fragment per word.
    let mut fragments = Vec::with_capacity(line.children.len());
    for child in std::mem::take(&mut line.children) {
        match child {
            InlineChild::Text(text) => split_words(text, metrics, &mut fragments),
            other => fragments.push(other),
        }
    }
    if fragments.len() < 2 {
        line.children = fragments;
        return;
    }

    // STEP 2: Distribute the slack.
    let total: f32 = fragments.iter().map(InlineChild::width).sum();
    let gaps = (fragments.len() - 1) as f32;
    let spacer = (target_width - total) / gaps;

    let mut preceding = 0.0;
    for (i, fragment) in fragments.iter_mut().enumerate() {
        let x = preceding + (spacer * i as f32).floor();
        fragment.translate_x(x - fragment.x());
        preceding += fragment.width();
    }

    log::trace!(
        "justified {} fragments to {target_width} (spacer {spacer})",
        fragments.len()
    );
    line.children = fragments;
    line.content_width = total;
}
