//! Line breaking over one text run.
//!
//! [§ 5 Line Breaking and Word Boundaries](https://www.w3.org/TR/css-text-3/#line-breaking)
//!
//! "When inline-level content is laid out into lines, it is broken across
//! line boxes. Such a break is called a line break."
//!
//! A [`LineBreakContext`] is the cursor the inline assembler keeps for each
//! text run. Every attempt resets it, asks a [`TextBreaker`] how much of the
//! remaining run fits the current budget, and either commits the resulting
//! span or rolls it back.

use std::rc::Rc;

use crate::style::{FontSpec, WhiteSpace};

use super::font::FontMetrics;

/// The answer of a [`TextBreaker`] for the text it was handed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BreakOpportunity {
    /// Byte offset, relative to the text handed in, where the fragment ends.
    /// A forced break ends before the newline.
    pub end: usize,
    /// Advance width of the fragment.
    pub width: f32,
    /// The rest of the run belongs on a later line.
    pub needs_new_line: bool,
    /// The fragment ended on a preserved newline.
    pub forced_break: bool,
    /// No soft wrap opportunity fit; the fragment is the shortest unbreakable
    /// prefix and is wider than the budget.
    pub unbreakable: bool,
}

/// Finds break opportunities and measures fragments.
pub trait TextBreaker {
    /// Find how much of `text` fits in `available_width` under `white_space`.
    fn break_text(
        &self,
        text: &str,
        font: &FontSpec,
        available_width: f32,
        white_space: WhiteSpace,
    ) -> BreakOpportunity;
}

/// [§ 5.2 Breaking Rules for Letters](https://www.w3.org/TR/css-text-3/#word-breaking)
///
/// Breaks at U+0020 spaces and, when white space is preserved, at U+000A
/// line feeds. Measurement is delegated to a [`FontMetrics`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceBreaker<M> {
    metrics: M,
}

impl<M: FontMetrics> WhitespaceBreaker<M> {
    /// Create a breaker measuring with `metrics`.
    #[must_use]
    pub const fn new(metrics: M) -> Self {
        Self { metrics }
    }

    fn width(&self, text: &str, font: &FontSpec) -> f32 {
        self.metrics.text_width(text, font)
    }

    fn whole(&self, text: &str, font: &FontSpec) -> BreakOpportunity {
        BreakOpportunity {
            end: text.len(),
            width: self.width(text, font),
            ..BreakOpportunity::default()
        }
    }

    fn forced(&self, text: &str, newline: usize, font: &FontSpec) -> BreakOpportunity {
        BreakOpportunity {
            end: newline,
            width: self.width(&text[..newline], font),
            needs_new_line: true,
            forced_break: true,
            unbreakable: false,
        }
    }

    /// Greedy fill: walk word by word, where each word after the first
    /// includes its leading space, and stop at the last space that still
    /// fits.
    fn soft_break(&self, text: &str, font: &FontSpec, available_width: f32) -> BreakOpportunity {
        let next_space = |from: usize| {
            text.as_bytes()
                .get(from..)
                .and_then(|rest| rest.iter().position(|&b| b == b' '))
                .map(|i| from + i)
        };

        let mut left = 0;
        let mut right = next_space(1);
        let mut width = 0.0;
        let mut last_wrap = 0;
        let mut last_width = 0.0;

        while let Some(r) = right {
            if width > available_width {
                break;
            }
            last_width = width;
            width += self.width(&text[left..r], font);
            last_wrap = left;
            left = r;
            right = next_space(left + 1);
        }

        if width <= available_width {
            last_wrap = left;
            last_width = width;
            width += self.width(&text[left..], font);
        }

        if width <= available_width {
            return BreakOpportunity {
                end: text.len(),
                width,
                ..BreakOpportunity::default()
            };
        }

        if last_wrap != 0 {
            return BreakOpportunity {
                end: last_wrap,
                width: last_width,
                needs_new_line: true,
                ..BreakOpportunity::default()
            };
        }

        // Nothing fits, even with a zero or negative budget: the first word
        // goes out whole.
        let end = next_space(1).unwrap_or(text.len());
        BreakOpportunity {
            end,
            width: self.width(&text[..end], font),
            needs_new_line: true,
            forced_break: false,
            unbreakable: true,
        }
    }
}

impl<M: FontMetrics> TextBreaker for WhitespaceBreaker<M> {
    fn break_text(
        &self,
        text: &str,
        font: &FontSpec,
        available_width: f32,
        white_space: WhiteSpace,
    ) -> BreakOpportunity {
        let newline = if white_space.preserves_newlines() {
            text.find('\n')
        } else {
            None
        };
        match newline {
            Some(newline)
                if !white_space.wraps()
                    || self.width(&text[..newline], font) <= available_width =>
            {
                self.forced(text, newline, font)
            }
            Some(newline) => self.soft_break(&text[..newline], font, available_width),
            None if white_space.wraps() => self.soft_break(text, font, available_width),
            None => self.whole(text, font),
        }
    }
}

/// Cursor over one text run.
///
/// `start` and `end` are byte offsets into the shared master text. Offsets
/// only move forward; a rejected attempt rolls `end` back to the value saved
/// before the attempt.
#[derive(Debug, Clone)]
pub struct LineBreakContext {
    master: Rc<str>,
    start: usize,
    end: usize,
    saved_end: usize,
    width: f32,
    needs_new_line: bool,
    unbreakable: bool,
    forced_break: bool,
}

impl LineBreakContext {
    /// A cursor at the start of `master`.
    #[must_use]
    pub const fn new(master: Rc<str>) -> Self {
        Self {
            master,
            start: 0,
            end: 0,
            saved_end: 0,
            width: 0.0,
            needs_new_line: false,
            unbreakable: false,
            forced_break: false,
        }
    }

    /// Start of the pending fragment.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End of the pending fragment.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Width of the pending fragment.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// The run continues on a later line.
    #[must_use]
    pub const fn needs_new_line(&self) -> bool {
        self.needs_new_line
    }

    /// The pending fragment could not be broken to fit.
    #[must_use]
    pub const fn is_unbreakable(&self) -> bool {
        self.unbreakable
    }

    /// The pending fragment ended on a preserved newline.
    #[must_use]
    pub const fn ended_by_forced_break(&self) -> bool {
        self.forced_break
    }

    /// The whole master text has been consumed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end >= self.master.len()
    }

    /// The text not yet committed.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.master[self.start..]
    }

    /// Clear the result of the previous attempt.
    pub const fn reset(&mut self) {
        self.end = self.start;
        self.width = 0.0;
        self.needs_new_line = false;
        self.unbreakable = false;
        self.forced_break = false;
    }

    /// Skip one leading U+0020 of the remaining text, if present.
    pub fn skip_leading_space(&mut self) {
        if self.remaining().starts_with(' ') {
            self.start += 1;
            self.end = self.end.max(self.start);
        }
    }

    /// Remember the current end so a rejected attempt can be undone.
    pub const fn save_end(&mut self) {
        self.saved_end = self.end;
    }

    /// Undo the attempt since [`save_end`](Self::save_end).
    pub const fn reset_end(&mut self) {
        self.end = self.saved_end;
    }

    /// Run `breaker` over the remaining text and record its answer.
    pub fn measure(
        &mut self,
        breaker: &dyn TextBreaker,
        font: &FontSpec,
        available_width: f32,
        white_space: WhiteSpace,
    ) {
        let found = breaker.break_text(self.remaining(), font, available_width, white_space);
        self.end = self.start + found.end;
        self.width = found.width;
        self.needs_new_line = found.needs_new_line;
        self.unbreakable = found.unbreakable;
        self.forced_break = found.forced_break;
    }

    /// Accept the pending fragment: the next one starts where it ended,
    /// past the newline of a forced break.
    pub fn commit(&mut self) {
        self.start = if self.forced_break {
            (self.end + 1).min(self.master.len())
        } else {
            self.end
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font::LineMetrics;

    /// Every glyph is 10px wide, a space is 5px.
    struct FixedMetrics;

    impl FontMetrics for FixedMetrics {
        fn line_metrics(&self, _font: &FontSpec) -> LineMetrics {
            LineMetrics::default()
        }

        fn text_width(&self, text: &str, _font: &FontSpec) -> f32 {
            text.chars().map(|c| if c == ' ' { 5.0 } else { 10.0 }).sum()
        }
    }

    fn breaker() -> WhitespaceBreaker<FixedMetrics> {
        WhitespaceBreaker::new(FixedMetrics)
    }

    #[test]
    fn test_everything_fits() {
        let found = breaker().break_text("aa bb cc", &FontSpec::default(), 100.0, WhiteSpace::Normal);
        assert_eq!(found.end, 8);
        assert!((found.width - 70.0).abs() < f32::EPSILON);
        assert!(!found.needs_new_line);
    }

    #[test]
    fn test_breaks_at_last_fitting_space() {
        let found = breaker().break_text("aa bb cc", &FontSpec::default(), 45.0, WhiteSpace::Normal);
        assert_eq!(found.end, 5);
        assert!((found.width - 45.0).abs() < f32::EPSILON);
        assert!(found.needs_new_line);
        assert!(!found.unbreakable);
    }

    #[test]
    fn test_long_first_word_is_unbreakable() {
        let found = breaker().break_text("aaaaaa bb", &FontSpec::default(), 30.0, WhiteSpace::Normal);
        assert_eq!(found.end, 6);
        assert!((found.width - 60.0).abs() < f32::EPSILON);
        assert!(found.unbreakable);
        assert!(found.needs_new_line);
    }

    #[test]
    fn test_single_word_without_spaces_is_unbreakable() {
        let found = breaker().break_text("aaaaaa", &FontSpec::default(), 30.0, WhiteSpace::Normal);
        assert_eq!(found.end, 6);
        assert!(found.unbreakable);
    }

    #[test]
    fn test_negative_budget_breaks_after_first_word() {
        let found = breaker().break_text("aa bb cc", &FontSpec::default(), -10.0, WhiteSpace::Normal);
        assert_eq!(found.end, 2);
        assert!((found.width - 20.0).abs() < f32::EPSILON);
        assert!(found.unbreakable);
        assert!(found.needs_new_line);
    }

    #[test]
    fn test_pre_breaks_only_at_newlines() {
        let found = breaker().break_text("aa bb\ncc", &FontSpec::default(), 10.0, WhiteSpace::Pre);
        assert_eq!(found.end, 5);
        assert!(found.forced_break);
        assert!(found.needs_new_line);

        let found = breaker().break_text("aa bb cc", &FontSpec::default(), 10.0, WhiteSpace::Pre);
        assert_eq!(found.end, 8);
        assert!(!found.needs_new_line);
    }

    #[test]
    fn test_pre_wrap_soft_wraps_before_the_newline() {
        let found = breaker().break_text("aa bb\ncc", &FontSpec::default(), 30.0, WhiteSpace::PreWrap);
        assert_eq!(found.end, 2);
        assert!(!found.forced_break);
        assert!(found.needs_new_line);
    }

    #[test]
    fn test_cursor_skips_newline_after_forced_break() {
        let mut cursor = LineBreakContext::new(Rc::from("ab\ncd"));
        cursor.reset();
        cursor.measure(&breaker(), &FontSpec::default(), 100.0, WhiteSpace::Pre);
        assert_eq!(cursor.end(), 2);
        assert!(cursor.ended_by_forced_break());
        assert!(!cursor.is_finished());
        cursor.commit();
        assert_eq!(cursor.remaining(), "cd");

        cursor.reset();
        cursor.measure(&breaker(), &FontSpec::default(), 100.0, WhiteSpace::Pre);
        assert!(cursor.is_finished());
    }

    #[test]
    fn test_cursor_rollback() {
        let mut cursor = LineBreakContext::new(Rc::from(" aaaaaa"));
        cursor.reset();
        cursor.skip_leading_space();
        assert_eq!(cursor.start(), 1);
        cursor.save_end();
        cursor.measure(&breaker(), &FontSpec::default(), 10.0, WhiteSpace::Normal);
        assert!(cursor.is_unbreakable());
        cursor.reset_end();
        assert_eq!(cursor.end(), 1);
    }
}
