//! RAII guard that flags a blocking transfer as cancelled when dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked by the transfer's progress callback.
#[derive(Debug, Clone, Default)]
pub(super) struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub(super) fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(super) fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Cancels the flag when dropped, unless disarmed after the transfer finished.
pub(super) struct CancelOnDrop {
    pub(super) flag: CancelFlag,
    pub(super) armed: bool,
}

impl CancelOnDrop {
    pub(super) fn new(flag: CancelFlag) -> Self {
        Self { flag, armed: true }
    }

    pub(super) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.flag.cancel();
        }
    }
}
