//! Binary-local application orchestration helpers.
//!
//! `main.rs` only parses arguments and exits with the code `entry::run`
//! returns; command wiring lives here.

pub(crate) mod entry;
pub(crate) mod insights;
