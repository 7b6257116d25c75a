//! Notifier that writes notices to the log.

use tracing::{info, warn};

use till_core::traits::{Notice, NoticeLevel, Notifier};

/// Logs each notice at a level matching its severity. Used by the CLI,
/// which has no toast surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(target: "till::notice", message = %notice.message, "Success"),
            NoticeLevel::Warning => warn!(target: "till::notice", message = %notice.message, "Warning"),
        }
    }
}
