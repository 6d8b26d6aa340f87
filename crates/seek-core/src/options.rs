//! Options supplied by the host application.

use serde::{Deserialize, Serialize};

/// Default title of the main window.
pub const DEFAULT_TITLE: &str = "Seek Application";
/// Default (minimum) main window width.
pub const DEFAULT_WIDTH: f64 = 600.0;
/// Default (minimum) main window height.
pub const DEFAULT_HEIGHT: f64 = 400.0;
/// Default size of a windowed Activity.
pub const ACTIVITY_WINDOW_SIZE: (f64, f64) = (400.0, 500.0);

/// Main window setup passed to `SeekApplication::initialize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub maximized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            maximized: false,
        }
    }
}

impl WindowConfig {
    /// Window with the given title and default size.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }
}

/// How `FragmentManager::on_stop` picks the fragments to stop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopBroadcast {
    /// Stop fragments that are neither stopped nor destroyed.
    #[default]
    Guarded,
    /// Stop every registered fragment, whatever its state.
    Unconditional,
}

/// Tunables of the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleOptions {
    pub stop_broadcast: StopBroadcast,
    /// Upper bound of queued requests drained by a single entry point.
    pub max_chained_requests: usize,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            stop_broadcast: StopBroadcast::default(),
            max_chained_requests: 64,
        }
    }
}
