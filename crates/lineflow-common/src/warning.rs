//! Layout warnings routed through the `log` facade.
//!
//! Provides deduplication to avoid spamming the same warning once per line
//! or once per content event. Used by the layout engine to report input it
//! tolerates but does not honour (for example a misplaced pseudo-style
//! marker in a content stream).

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about tolerated input (logged once per unique message)
///
/// Messages are logged under the `lineflow` target with the component as a
/// bracketed prefix, so `RUST_LOG=lineflow=warn` shows all of them.
///
/// # Example
/// ```ignore
/// warn_once("inline", "first-line marker at content index 4 ignored");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: "lineflow", "[{component}] {message}");
    }
}

/// Returns true if `message` has already been reported for `component`.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}
