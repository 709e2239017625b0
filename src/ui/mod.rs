//! Terminal front-end.
//!
//! `renderer` owns line formatting, `summary` turns status payloads into
//! renderer-independent rows, `view` is the `StatusView` the poller drives,
//! and `watch` runs one poller to completion for the CLI.

pub mod renderer;
pub mod settings;
pub mod summary;
pub mod view;
pub mod watch;

pub use renderer::Renderer;
pub use summary::{insights_lines, StatusSummary, Summarize};
pub use view::{TerminalView, ViewSignal};
pub use watch::{watch_status, WatchExit, WatchSession, WatchStep};
