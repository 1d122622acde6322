//! Common utilities for the lineflow layout engine.
//!
//! This crate provides shared infrastructure used by the layout crates and
//! the command line front-end:
//! - **Warning System** - deduplicated diagnostics for malformed input that
//!   layout recovers from

pub mod warning;
