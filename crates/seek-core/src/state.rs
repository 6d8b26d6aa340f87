//! Lifecycle stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of an Activity, Fragment or FragmentManager.
///
/// Transitions are constrained by the orchestrator, not by this type.
/// `Destroyed` is reachable from every stage and is terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    /// Never went through `on_create`.
    #[default]
    NotDefined,
    Created,
    Started,
    Paused,
    Resumed,
    Stopped,
    Destroyed,
}

impl State {
    /// Upper-case name, as shown in logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotDefined => "NOT_DEFINED",
            Self::Created => "CREATED",
            Self::Started => "STARTED",
            Self::Paused => "PAUSED",
            Self::Resumed => "RESUMED",
            Self::Stopped => "STOPPED",
            Self::Destroyed => "DESTROYED",
        }
    }

    /// All stages in declaration order.
    pub const fn all() -> &'static [State] {
        &[
            Self::NotDefined,
            Self::Created,
            Self::Started,
            Self::Paused,
            Self::Resumed,
            Self::Stopped,
            Self::Destroyed,
        ]
    }

    /// Check if the unit can never be driven again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Destroyed)
    }

    /// Check if the unit went through `on_create` and is not destroyed.
    pub fn is_alive(&self) -> bool {
        !matches!(self, Self::NotDefined | Self::Destroyed)
    }

    /// Check if the unit may be displayed by a navigation request.
    pub fn is_displayable(&self) -> bool {
        self.is_alive()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
