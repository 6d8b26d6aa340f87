//! Scripted headless navigation session.
//!
//! A tour is a list of steps run against the demo application, e.g.
//! `main fragment:details next back settings back`. After every step queued
//! requests and expired toasts are pumped, and the resulting screen is
//! recorded for the summary.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{Context as _, Result, anyhow, bail};

use seek_core::{ActivityKey, Context, SeekApplication, State, StateChange, Stateful, Toast};

use crate::demo::{self, BODY, MAIN, NEXT, SETTINGS};
use crate::settings::Settings;

/// Steps run when none are given.
pub const DEFAULT_TOUR: &[&str] = &[
    "main",
    "fragment:details",
    "next",
    "toast",
    "back",
    "fragment:greeting",
    "settings",
    "back",
    "home",
];

/// One tour instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Start the main activity.
    Main,
    /// Start the next activity with the current one as parent.
    Next,
    /// Start the windowed settings activity with the current one as parent.
    Settings,
    Back,
    Home,
    /// Show a toast over the current screen.
    Toast,
    /// Show a fragment in the main activity's body.
    Fragment(String),
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let step = match s.trim() {
            "main" => Self::Main,
            "next" => Self::Next,
            "settings" | "windowed" => Self::Settings,
            "back" => Self::Back,
            "home" => Self::Home,
            "toast" => Self::Toast,
            other => match other.strip_prefix("fragment:") {
                Some(name) if demo::FRAGMENT_NAMES.contains(&name) => {
                    Self::Fragment(name.to_string())
                }
                Some(name) => bail!(
                    "unknown fragment '{name}' (expected one of: {})",
                    demo::FRAGMENT_NAMES.join(", ")
                ),
                None => bail!("unknown tour step '{other}'"),
            },
        };
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Next => f.write_str("next"),
            Self::Settings => f.write_str("settings"),
            Self::Back => f.write_str("back"),
            Self::Home => f.write_str("home"),
            Self::Toast => f.write_str("toast"),
            Self::Fragment(name) => write!(f, "fragment:{name}"),
        }
    }
}

/// Parse tour steps, falling back to [`DEFAULT_TOUR`] when empty.
pub fn parse_steps(raw: &[String]) -> Result<Vec<Step>> {
    if raw.is_empty() {
        return DEFAULT_TOUR.iter().map(|step| step.parse()).collect();
    }
    raw.iter().map(|step| step.parse()).collect()
}

// =============================================================================
// REPORT
// =============================================================================

/// Screen after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: String,
    pub current: Option<ActivityKey>,
    pub back_stack: Vec<ActivityKey>,
    pub toast: Option<String>,
}

/// Final state of a registered activity, before teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub key: ActivityKey,
    pub name: String,
    pub state: State,
    pub parent: Option<ActivityKey>,
    pub windowed: bool,
    pub fragments: Vec<(String, State)>,
    pub current_fragment: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TourReport {
    pub steps: Vec<StepRecord>,
    pub activities: Vec<ActivityRow>,
    /// State writes observed while the tour ran.
    pub transitions: usize,
    /// State writes observed during teardown.
    pub teardown_transitions: usize,
}

// =============================================================================
// RUNNER
// =============================================================================

/// Run `steps` against a fresh demo application configured by `settings`.
///
/// # Errors
///
/// Fails when the application reports an invalid state, e.g. navigation
/// after teardown.
pub fn run_tour(steps: &[Step], settings: &Settings) -> Result<TourReport> {
    let mut app = SeekApplication::with_options(
        demo::view_layer(),
        demo::registry(),
        settings.lifecycle.clone(),
    );
    let transitions = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&transitions);
    app.subscribe(move |_: &StateChange| counter.set(counter.get() + 1));

    app.initialize(settings.window.clone());
    app.show().context("show main window")?;

    let mut report = TourReport::default();
    for step in steps {
        tracing::info!(%step, "Running tour step");
        run_step(&mut app, step).with_context(|| format!("tour step '{step}'"))?;
        app.pump().with_context(|| format!("pump after '{step}'"))?;
        report.steps.push(StepRecord {
            step: step.to_string(),
            current: app.current_key(),
            back_stack: app.back_stack().to_vec(),
            toast: app.current_toast().map(|toast| toast.message().to_string()),
        });
    }

    report.activities = activity_rows(&app);
    report.transitions = transitions.get();

    app.close();
    report.teardown_transitions = transitions.get() - report.transitions;
    Ok(report)
}

fn run_step(app: &mut SeekApplication, step: &Step) -> Result<()> {
    match step {
        Step::Main => app.start_activity(MAIN.into())?,
        Step::Next => start_from_current(app, NEXT)?,
        Step::Settings => start_from_current(app, SETTINGS)?,
        Step::Back => app.back_pressed()?,
        Step::Home => app.home_pressed()?,
        Step::Toast => app.show_toast(Toast::make(
            "Hello from the tour",
            true,
            Toast::DURATION_SHORT,
        )),
        Step::Fragment(name) => {
            let fragment =
                demo::fragment(name).ok_or_else(|| anyhow!("unknown fragment '{name}'"))?;
            app.replace_fragment(MAIN, BODY, fragment)?;
        }
    }
    Ok(())
}

fn start_from_current(app: &mut SeekApplication, target: ActivityKey) -> Result<()> {
    match app.current_key() {
        Some(parent) if parent != target => {
            app.start_activity_from_parent(target.into(), parent)?;
        }
        _ => app.start_activity(target.into())?,
    }
    Ok(())
}

fn activity_rows(app: &SeekApplication) -> Vec<ActivityRow> {
    app.registered_activities()
        .map(|activity| {
            let manager = app.find_fragment_manager(activity.key());
            ActivityRow {
                key: activity.key(),
                name: activity.name().to_string(),
                state: activity.state(),
                parent: activity.parent(),
                windowed: activity.is_windowed(),
                fragments: manager
                    .map(|manager| {
                        manager
                            .fragments()
                            .map(|fragment| (fragment.name().to_string(), fragment.state()))
                            .collect()
                    })
                    .unwrap_or_default(),
                current_fragment: manager
                    .and_then(|manager| manager.current_fragment())
                    .map(|fragment| fragment.name().to_string()),
            }
        })
        .collect()
}
