//! CSS Float Layout.
//!
//! [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
//!
//! "A float is a box that is shifted to the left or right on the current line.
//! The most interesting characteristic of a float is that content may flow along
//! its side (or be prohibited from doing so by the 'clear' property)."
//!
//! Inline layout talks to floats through [`FloatManager`]; [`FloatContext`]
//! is the manager for one block formatting context.

use serde::{Deserialize, Serialize};

use super::box_model::{Point, Rect};
use super::content::FloatContent;
use super::line_box::LineBox;

/// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
///
/// "Values have the following meanings:
///
/// left
///   The element generates a block box that is floated to the left.
///
/// right
///   The element generates a block box that is floated to the right."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FloatSide {
    /// "The element generates a block box that is floated to the left."
    Left,
    /// "The element generates a block box that is floated to the right."
    Right,
}

/// [§ 9.5.2 Controlling flow next to floats: the 'clear' property](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
///
/// "This property indicates which sides of an element's box(es) may not
/// be adjacent to an earlier floating box."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearSide {
    /// "Requires the top border edge be below any left-floating boxes."
    Left,
    /// "Requires the top border edge be below any right-floating boxes."
    Right,
    /// "Requires the top border edge be below any floating boxes."
    Both,
}

impl ClearSide {
    /// Whether left floats are cleared.
    #[must_use]
    pub const fn clears_left(self) -> bool {
        matches!(self, Self::Left | Self::Both)
    }

    /// Whether right floats are cleared.
    #[must_use]
    pub const fn clears_right(self) -> bool {
        matches!(self, Self::Right | Self::Both)
    }
}

/// Outcome of [`FloatManager::place_float`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatPlacement {
    /// The float was placed at this margin box, in block formatting context
    /// coordinates.
    Placed(Rect),
    /// The float does not fit beside the current line's content and waits
    /// for the line to be saved.
    Pending,
}

/// The float manager of a block formatting context, as seen from inline
/// layout.
///
/// `origin` is always the inline container's origin in the formatting
/// context; line coordinates are relative to it.
pub trait FloatManager {
    /// Width taken by floats on `side` at the vertical position `origin.y`,
    /// within a container band of `available_width` starting at `origin.x`.
    fn float_distance(&self, origin: Point, available_width: f32, side: FloatSide) -> f32;

    /// Place `content` next to `line`, or defer it.
    ///
    /// `available_width` is the room left on the line.
    fn place_float(
        &mut self,
        content: &FloatContent,
        available_width: f32,
        line: &LineBox,
        origin: Point,
    ) -> FloatPlacement;

    /// Place deferred floats at `y`, the bottom of the line that deferred
    /// them, in formatting context coordinates.
    fn float_pending(&mut self, floats: Vec<FloatContent>, y: f32);
}

/// A single float that has been placed in the flow.
///
/// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
#[derive(Debug, Clone, Serialize)]
pub struct PlacedFloat {
    /// Which side this float is on.
    pub side: FloatSide,
    /// The margin box of the float (absolute coordinates).
    pub margin_box: Rect,
}

/// Tracks placed floats within a block formatting context.
///
/// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
///
/// "Since a float is not in the flow, non-positioned block boxes created
/// before and after the float box flow vertically as if the float did not
/// exist. However, the current and subsequent line boxes created next to
/// the float are shortened as necessary to make room for the margin box
/// of the float."
#[derive(Debug, Clone, Serialize)]
pub struct FloatContext {
    /// All left floats that have been placed.
    pub left_floats: Vec<PlacedFloat>,
    /// All right floats that have been placed.
    pub right_floats: Vec<PlacedFloat>,
    /// Width of the containing block.
    pub containing_width: f32,
}

impl FloatContext {
    /// Create a new float context for a containing block.
    #[must_use]
    pub const fn new(containing_width: f32) -> Self {
        Self {
            left_floats: Vec::new(),
            right_floats: Vec::new(),
            containing_width,
        }
    }

    /// Returns true if there are no placed floats in this context.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left_floats.is_empty() && self.right_floats.is_empty()
    }

    /// Return the maximum bottom edge of all placed floats.
    ///
    /// [§ 10.6.7](https://www.w3.org/TR/CSS2/visudet.html#root-height)
    ///
    /// "If the element has any floating descendants whose bottom margin edge
    /// is below the element's bottom content edge, then the height is
    /// increased to include those edges."
    #[must_use]
    pub fn max_float_bottom(&self) -> f32 {
        self.left_floats
            .iter()
            .chain(&self.right_floats)
            .map(|f| f.margin_box.bottom())
            .fold(0.0_f32, f32::max)
    }

    /// [§ 9.5.1 Positioning the float: the 'float' property](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    ///
    /// Place a float within this context.
    ///
    /// "A floated box is shifted to the left or right until its outer edge
    /// touches the containing block edge or the outer edge of another float."
    ///
    /// - Rule 1: Float cannot extend past containing block edges.
    /// - Rules 4, 5, 8: Float is placed as high as possible (at or below `current_y`).
    /// - Rule 9: Left floats go as far left as possible; right floats as far right.
    /// - Rules 2, 3, 7: Floats do not overlap each other.
    pub fn place(
        &mut self,
        side: FloatSide,
        box_width: f32,
        box_height: f32,
        current_y: f32,
    ) -> Rect {
        // STEP 1: Start at the highest allowed position.
        // [§ 9.5.1 Rule 8](https://www.w3.org/TR/CSS2/visuren.html#float-position)
        //
        // "A floating box must be placed as high as possible."
        let mut y = current_y.max(0.0);

        // STEP 2: Scan downward, one float bottom edge at a time, until the
        // float fits or no float is left to clear.
        loop {
            let (left_offset, avail_width) = self.available_width_at(y, box_height);
            let next_y = self.next_float_bottom_after(y);

            if avail_width >= box_width || avail_width >= self.containing_width || next_y <= y {
                // STEP 3: Place the float.
                // [§ 9.5.1 Rule 9](https://www.w3.org/TR/CSS2/visuren.html#float-position)
                //
                // "A left-floating box must be put as far to the left as possible,
                // a right-floating box as far to the right as possible."
                let x = match side {
                    FloatSide::Left => left_offset,
                    FloatSide::Right => (left_offset + avail_width - box_width).max(0.0),
                };
                let rect = Rect {
                    x,
                    y,
                    width: box_width,
                    height: box_height,
                };
                let placed = PlacedFloat {
                    side,
                    margin_box: rect,
                };
                match side {
                    FloatSide::Left => self.left_floats.push(placed),
                    FloatSide::Right => self.right_floats.push(placed),
                }
                log::debug!("placed {side:?} float at ({x}, {y}) {box_width}x{box_height}");
                return rect;
            }

            y = next_y;
        }
    }

    /// [§ 9.5.2 Controlling flow next to floats: the 'clear' property](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
    ///
    /// Returns the Y position that the element should be moved to in order
    /// to clear past the relevant floats.
    #[must_use]
    pub fn clear(&self, clear_side: ClearSide, current_y: f32) -> f32 {
        let left = self.left_floats.iter().filter(|_| clear_side.clears_left());
        let right = self.right_floats.iter().filter(|_| clear_side.clears_right());
        left.chain(right)
            .map(|f| f.margin_box.bottom())
            .fold(current_y, f32::max)
    }

    /// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
    ///
    /// "The current and subsequent line boxes created next to the float are
    /// shortened as necessary to make room for the margin box of the float."
    ///
    /// Returns `(left_offset, available_width)` for content in the band
    /// `[y, y + height)`.
    #[must_use]
    pub fn available_width_at(&self, y: f32, height: f32) -> (f32, f32) {
        let (left_edge, right_edge) = self.edges(|r| r.overlaps_band(y, y + height));
        (left_edge, (right_edge - left_edge).max(0.0))
    }

    /// Inner edges of the floats active at exactly `y`: the rightmost right
    /// edge of left floats and the leftmost left edge of right floats.
    #[must_use]
    pub fn edges_at(&self, y: f32) -> (f32, f32) {
        self.edges(|r| r.y <= y && y < r.bottom())
    }

    fn edges(&self, active: impl Fn(&Rect) -> bool) -> (f32, f32) {
        let left_edge = self
            .left_floats
            .iter()
            .filter(|f| active(&f.margin_box))
            .map(|f| f.margin_box.right())
            .fold(0.0_f32, f32::max);
        let right_edge = self
            .right_floats
            .iter()
            .filter(|f| active(&f.margin_box))
            .map(|f| f.margin_box.x)
            .fold(self.containing_width, f32::min);
        (left_edge, right_edge)
    }

    /// Find the smallest float bottom edge that is strictly greater than `y`,
    /// or `y` itself when there is none.
    fn next_float_bottom_after(&self, y: f32) -> f32 {
        self.left_floats
            .iter()
            .chain(&self.right_floats)
            .map(|f| f.margin_box.bottom())
            .filter(|&bottom| bottom > y)
            .reduce(f32::min)
            .unwrap_or(y)
    }
}

impl FloatManager for FloatContext {
    fn float_distance(&self, origin: Point, available_width: f32, side: FloatSide) -> f32 {
        let (left_edge, right_edge) = self.edges_at(origin.y);
        match side {
            FloatSide::Left => (left_edge - origin.x).max(0.0),
            FloatSide::Right => (origin.x + available_width - right_edge).max(0.0),
        }
    }

    fn place_float(
        &mut self,
        content: &FloatContent,
        available_width: f32,
        line: &LineBox,
        origin: Point,
    ) -> FloatPlacement {
        if content.width > available_width && line.contains_content {
            return FloatPlacement::Pending;
        }
        FloatPlacement::Placed(self.place(
            content.side,
            content.width,
            content.height,
            origin.y + line.y,
        ))
    }

    fn float_pending(&mut self, floats: Vec<FloatContent>, y: f32) {
        for float in floats {
            let _ = self.place(float.side, float.width, float.height, y);
        }
    }
}
