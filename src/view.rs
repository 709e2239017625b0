//! View contract driven by the poller.
//!
//! Only `render` is required. The remaining callbacks are optional
//! capabilities with empty default bodies so a view implements just what it
//! can display.

use crate::error::PollError;
use crate::status::StatusObject;

/// Injectable rendering interface for one subject kind.
///
/// All callbacks are invoked from the poller actor, one at a time.
pub trait StatusView<S: StatusObject>: Send + 'static {
    /// Render the latest known status.
    fn render(&mut self, status: &S);

    /// Show a loading indicator before the first fetch resolves.
    fn show_loading(&mut self) {}

    /// Surface a fetch or trigger failure.
    fn show_error(&mut self, error: &PollError) {
        let _ = error;
    }

    /// Route a status that finished successfully.
    fn show_complete(&mut self, status: &S) {
        let _ = status;
    }

    /// Route a status that finished with a failure.
    fn show_failed(&mut self, status: &S) {
        let _ = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{BackupState, BackupStatus};

    struct RenderOnly {
        rendered: Vec<BackupState>,
    }

    impl StatusView<BackupStatus> for RenderOnly {
        fn render(&mut self, status: &BackupStatus) {
            self.rendered.push(status.state);
        }
    }

    #[test]
    fn optional_callbacks_default_to_noops() {
        let mut view = RenderOnly {
            rendered: Vec::new(),
        };
        let status = BackupStatus {
            state: BackupState::Complete,
            ..BackupStatus::default()
        };
        view.show_loading();
        view.show_complete(&status);
        view.show_failed(&status);
        view.render(&status);
        assert_eq!(view.rendered, vec![BackupState::Complete]);
    }
}
