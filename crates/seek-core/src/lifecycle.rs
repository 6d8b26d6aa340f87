//! The lifecycle contract and state-change notifications.

use std::fmt;

use serde::Serialize;

use crate::activity::ActivityKey;
use crate::fragment::FragmentKey;
use crate::state::State;

/// Capability of every lifecycle-bound unit.
///
/// Each call sets the unit's [`State`] to the matching stage; that is the only
/// guaranteed side effect. Implementors run their hooks after the write.
///
/// The contract does not reject illegal transitions. Only the orchestrator
/// drives units, and it only issues valid sequences:
///
/// ```text
/// NOT_DEFINED -> CREATED -> STARTED -> RESUMED <-> PAUSED -> STOPPED -> STARTED
///                                         any non-terminal stage -> DESTROYED
/// ```
pub trait Stateful {
    /// Current lifecycle stage.
    fn state(&self) -> State;

    /// Called once, right after the unit is instantiated.
    fn on_create(&mut self);

    /// Called after `on_create`, or when shown again after `on_stop`.
    fn on_start(&mut self);

    /// Called after `on_start` or `on_pause`; the unit is on screen.
    fn on_resume(&mut self);

    /// Called when another unit is requested to be visible.
    fn on_pause(&mut self);

    /// Called when the unit is requested to stop.
    fn on_stop(&mut self);

    /// Called on forced destruction or application teardown.
    fn on_destroy(&mut self);
}

/// Identity of a lifecycle-bound unit in notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitId {
    Activity {
        key: ActivityKey,
    },
    FragmentManager {
        activity: ActivityKey,
    },
    Fragment {
        activity: Option<ActivityKey>,
        key: FragmentKey,
    },
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activity { key } => write!(f, "{key}"),
            Self::FragmentManager { activity } => write!(f, "{activity}/fragments"),
            Self::Fragment {
                activity: Some(activity),
                key,
            } => write!(f, "{activity}/{key}"),
            Self::Fragment {
                activity: None,
                key,
            } => write!(f, "?/{key}"),
        }
    }
}

/// A state write, emitted synchronously after it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateChange {
    pub unit: UnitId,
    pub from: State,
    pub to: State,
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.unit, self.from, self.to)
    }
}

/// Consumer of state-change notifications (e.g. view bindings).
///
/// Observers must not issue navigation or subscribe other observers from
/// inside the callback.
pub trait StateObserver {
    fn state_changed(&mut self, change: &StateChange);
}

impl<F> StateObserver for F
where
    F: FnMut(&StateChange),
{
    fn state_changed(&mut self, change: &StateChange) {
        self(change);
    }
}
