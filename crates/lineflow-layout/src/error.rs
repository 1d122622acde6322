use thiserror::Error;

/// A precondition of the content stream was violated.
///
/// Everything else the engine meets (zero width, overflowing words, stray
/// pseudo-style markers) is recovered from during layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A `StylePop` arrived while no inline element was open.
    #[error("style pop at content index {index} has no matching style push")]
    UnmatchedStylePop {
        /// Position of the offending event in the content stream.
        index: usize,
    },
}
