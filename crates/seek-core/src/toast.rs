//! Toast notifications.
//!
//! A toast slides over the bottom of the main window. Only one toast is on
//! screen at a time: showing another removes the previous one immediately.
//! The slot lives in `SeekApplication`.
//!
//! Auto-closing toasts are dismissed by a timer thread. The thread never
//! touches the view tree; it sends [`UiEvent::ToastExpired`] and the
//! orchestrator applies it on the UI thread during `pump()`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::application::UiEvent;

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a toast instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

/// A short notification message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    id: ToastId,
    message: String,
    auto_close: bool,
    duration: Duration,
}

impl Toast {
    /// 1 second.
    pub const DURATION_SHORT: Duration = Duration::from_millis(1000);
    /// 3 seconds.
    pub const DURATION_LONG: Duration = Duration::from_millis(3000);

    /// Create a toast. Without `auto_close` it stays until dismissed.
    pub fn make(message: impl Into<String>, auto_close: bool, duration: Duration) -> Self {
        Self {
            id: ToastId(NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed)),
            message: message.into(),
            auto_close,
            duration,
        }
    }

    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn auto_close(&self) -> bool {
        self.auto_close
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Schedule the expiry of an auto-closing toast on a timer thread.
pub(crate) fn spawn_auto_close(toast: &Toast, sender: Sender<UiEvent>) {
    let id = toast.id();
    let duration = toast.duration();
    std::thread::spawn(move || {
        std::thread::sleep(duration);
        // The receiver is gone once the application is dropped.
        let _ = sender.send(UiEvent::ToastExpired(id));
    });
}
