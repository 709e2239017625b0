//! Sitewatch: poll long-running site jobs and keep per-site dashboard state.
//!
//! A poller owns one status object, renders it through a [`view::StatusView`],
//! and re-fetches on a fixed interval only while the job is in progress.
//! Security scans and downloadable backups are the two built-in subject kinds.
//!
//! # Quick start
//!
//! ```no_run
//! use sitewatch::config::load_config;
//! use sitewatch::service::HttpStatusService;
//! use sitewatch::status::{ScanStatus, SubjectId};
//! use sitewatch::ui::{watch_status, Renderer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None)?;
//! let service = HttpStatusService::<ScanStatus>::new(&config.service, "scan");
//! let exit = watch_status::<ScanStatus, _, _>(
//!     config.poller.options(),
//!     SubjectId::new("example.com"),
//!     service,
//!     Renderer::new(true),
//!     false,
//!     std::future::pending(),
//! )
//! .await?;
//! println!("{exit:?}");
//! # Ok(())
//! # }
//! ```

pub mod build_info;
pub mod config;
pub mod error;
pub mod logging;
pub mod poller;
pub mod preferences;
pub mod service;
pub mod status;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
pub mod view;

pub use poller::{spawn_poller, PollPhase, PollerHandle, PollerOptions, PollerSnapshot};
pub use status::{StatusObject, SubjectId, TerminalOutcome};
pub use view::StatusView;
