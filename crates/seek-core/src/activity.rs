//! Activities - the navigable screens of an application.
//!
//! An Activity encapsulates a single task or a group of tasks. User logic is
//! written per lifecycle stage in an [`ActivityHandler`]: build fields and load
//! the view in `on_create`, open resources in `on_start`, refresh in
//! `on_resume`, release in `on_pause`/`on_stop`, clean up in `on_destroy`.
//! When the hooks run is decided by [`SeekApplication`](crate::SeekApplication),
//! the only writer of an Activity's state.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Default)]
//! struct NextActivity;
//!
//! impl ActivityHandler for NextActivity {
//!     fn on_create(&mut self, activity: &mut Activity) -> Result<()> {
//!         activity.set_content_view("activity_next.view")?;
//!         activity.set_show_home_enabled(true);
//!         activity.set_display_home_as_up(true);
//!         Ok(())
//!     }
//! }
//! ```

use std::fmt;

use serde::Serialize;

use crate::context::{ActivityTarget, ApplicationContext, Context, Request};
use crate::error::{Result, SeekError};
use crate::fragment::FragmentTarget;
use crate::lifecycle::{StateChange, Stateful, UnitId};
use crate::options::ACTIVITY_WINDOW_SIZE;
use crate::state::State;
use crate::toast::Toast;
use crate::view::{ContainerId, ViewDescriptor, ViewHandle};

// =============================================================================
// KEY
// =============================================================================

/// Stable type key of an Activity. One live instance exists per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActivityKey(&'static str);

impl ActivityKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ActivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// =============================================================================
// HOOKS
// =============================================================================

/// Per-stage user logic of an Activity.
///
/// Hooks run after the state was written. A returned error is logged; the
/// transition stands.
pub trait ActivityHandler {
    fn on_create(&mut self, _activity: &mut Activity) -> Result<()> {
        Ok(())
    }

    fn on_start(&mut self, _activity: &mut Activity) -> Result<()> {
        Ok(())
    }

    fn on_resume(&mut self, _activity: &mut Activity) -> Result<()> {
        Ok(())
    }

    fn on_pause(&mut self, _activity: &mut Activity) -> Result<()> {
        Ok(())
    }

    fn on_stop(&mut self, _activity: &mut Activity) -> Result<()> {
        Ok(())
    }

    fn on_destroy(&mut self, _activity: &mut Activity) -> Result<()> {
        Ok(())
    }
}

/// An Activity without custom logic.
impl ActivityHandler for () {}

type Hook = fn(&mut dyn ActivityHandler, &mut Activity) -> Result<()>;

/// Action run when home is pressed on an Activity without a parent.
pub type HomeAction = Box<dyn FnMut(ActivityKey)>;

// =============================================================================
// ACTIVITY
// =============================================================================

/// A navigable unit with its own lifecycle.
pub struct Activity {
    key: ActivityKey,
    name: Option<String>,
    state: State,
    parent: Option<ActivityKey>,
    windowed: bool,
    window_size: (f64, f64),
    window_open: bool,
    content_view: Option<ViewHandle>,
    show_home_enabled: bool,
    display_home_as_up: bool,
    home_action: Option<HomeAction>,
    context: Option<ApplicationContext>,
    handler: Option<Box<dyn ActivityHandler>>,
}

impl Activity {
    /// Create an Activity in `NOT_DEFINED` state.
    pub fn new(key: ActivityKey, handler: impl ActivityHandler + 'static) -> Self {
        Self {
            key,
            name: None,
            state: State::NotDefined,
            parent: None,
            windowed: false,
            window_size: ACTIVITY_WINDOW_SIZE,
            window_open: false,
            content_view: None,
            show_home_enabled: false,
            display_home_as_up: false,
            home_action: None,
            context: None,
            handler: Some(Box::new(handler)),
        }
    }

    pub fn key(&self) -> ActivityKey {
        self.key
    }

    /// Display name; the key unless set explicitly.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.key.name())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Activity that back navigation returns to.
    pub fn parent(&self) -> Option<ActivityKey> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ActivityKey>) {
        self.parent = parent;
    }

    /// Whether the Activity is presented in its own native window.
    pub fn is_windowed(&self) -> bool {
        self.windowed
    }

    pub fn set_windowed(&mut self, windowed: bool) {
        self.windowed = windowed;
    }

    pub fn window_size(&self) -> (f64, f64) {
        self.window_size
    }

    pub fn set_window_size(&mut self, width: f64, height: f64) {
        self.window_size = (width, height);
    }

    pub fn is_window_open(&self) -> bool {
        self.window_open
    }

    pub fn content_view(&self) -> Option<&ViewHandle> {
        self.content_view.as_ref()
    }

    pub fn show_home_enabled(&self) -> bool {
        self.show_home_enabled
    }

    /// Show the action bar with its home button.
    pub fn set_show_home_enabled(&mut self, enabled: bool) {
        self.show_home_enabled = enabled;
    }

    pub fn display_home_as_up(&self) -> bool {
        self.display_home_as_up
    }

    /// Make the home button act as "back".
    pub fn set_display_home_as_up(&mut self, home_as_up: bool) {
        self.display_home_as_up = home_as_up;
    }

    pub fn set_home_action(&mut self, action: impl FnMut(ActivityKey) + 'static) {
        self.home_action = Some(Box::new(action));
    }

    /// Handle of the owning application, once registered.
    pub fn context(&self) -> Option<&ApplicationContext> {
        self.context.as_ref()
    }

    pub(crate) fn bind(&mut self, context: ApplicationContext) {
        self.context = Some(context);
    }

    /// Load and attach the layout view of this Activity.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the Activity is not bound to an application
    /// (no view loader), `ViewLoad` when the view layer cannot load the
    /// descriptor.
    pub fn set_content_view(&mut self, descriptor: impl Into<ViewDescriptor>) -> Result<()> {
        let descriptor = descriptor.into();
        let context = self.context.as_ref().ok_or_else(|| {
            SeekError::invalid_argument(format!(
                "activity '{}' has no view loader; it is not bound to an application",
                self.key
            ))
        })?;
        let view = context.load_view(&descriptor, self.name())?;
        self.content_view = Some(view);
        Ok(())
    }

    /// Present the Activity in its native window.
    ///
    /// Does nothing for Activities that are not windowed.
    ///
    /// # Errors
    ///
    /// `InvalidState` when no view is attached.
    pub fn show_window(&mut self) -> Result<()> {
        let view = self.content_view.as_ref().ok_or_else(|| {
            SeekError::invalid_state(format!(
                "activity '{}' has no content view to show in a window",
                self.key
            ))
        })?;
        if !self.windowed {
            return Ok(());
        }
        let context = self.context.as_ref().ok_or_else(|| {
            SeekError::invalid_argument(format!("activity '{}' is not bound", self.key))
        })?;
        let (width, height) = self.window_size;
        context.present_window(self.key, view, width, height)?;
        self.window_open = true;
        Ok(())
    }

    /// Close the native window, if open.
    pub fn close_window(&mut self) {
        if !self.window_open {
            return;
        }
        if let Some(context) = &self.context {
            context.close_window(self.key);
        }
        self.window_open = false;
    }

    /// Return to the parent Activity, or run the home action without one.
    ///
    /// The navigation is queued; it runs on the next `pump()` of the
    /// application (immediately when called through
    /// `SeekApplication::back_pressed`).
    pub fn on_back_pressed(&mut self) {
        match self.parent {
            Some(parent) => {
                if self.windowed {
                    self.close_window();
                }
                if let Err(error) = self.start_activity(parent.into()) {
                    tracing::error!(activity = %self.key, %error, "Back navigation failed");
                }
            }
            None => self.run_home_action(),
        }
    }

    /// Action bar home button.
    pub fn home_pressed(&mut self) {
        if self.display_home_as_up || self.windowed {
            self.on_back_pressed();
        } else {
            self.run_home_action();
        }
    }

    fn run_home_action(&mut self) {
        match self.home_action.as_mut() {
            Some(action) => action(self.key),
            None => tracing::debug!(activity = %self.key, "No home action set"),
        }
    }

    /// Queue a fragment replacement inside this Activity.
    pub fn replace_fragment(
        &mut self,
        container: ContainerId,
        fragment: impl Into<FragmentTarget>,
    ) -> Result<()> {
        match &self.context {
            Some(context) => {
                context.enqueue(Request::ReplaceFragment {
                    activity: self.key,
                    container,
                    fragment: fragment.into(),
                });
                Ok(())
            }
            None => Err(SeekError::invalid_argument(format!(
                "activity '{}' is not bound; no fragment manager",
                self.key
            ))),
        }
    }

    /// Queue a toast notification.
    pub fn show_toast(&mut self, toast: Toast) {
        match &self.context {
            Some(context) => context.enqueue(Request::ShowToast(toast)),
            None => tracing::warn!(activity = %self.key, "Toast dropped; activity is not bound"),
        }
    }

    fn transition(&mut self, to: State, hook: Hook) {
        let from = self.state;
        self.state = to;
        tracing::debug!(activity = %self.key, %from, %to, "Activity state changed");
        if let Some(context) = &self.context {
            context.notify(&StateChange {
                unit: UnitId::Activity { key: self.key },
                from,
                to,
            });
        }
        if let Some(mut handler) = self.handler.take() {
            if let Err(error) = hook(handler.as_mut(), self) {
                tracing::error!(activity = %self.key, stage = %to, %error, "Activity hook failed");
            }
            self.handler = Some(handler);
        }
    }
}

impl Stateful for Activity {
    fn state(&self) -> State {
        self.state
    }

    fn on_create(&mut self) {
        self.transition(State::Created, |handler, activity| handler.on_create(activity));
    }

    fn on_start(&mut self) {
        self.transition(State::Started, |handler, activity| handler.on_start(activity));
    }

    fn on_resume(&mut self) {
        self.transition(State::Resumed, |handler, activity| handler.on_resume(activity));
    }

    fn on_pause(&mut self) {
        self.transition(State::Paused, |handler, activity| handler.on_pause(activity));
    }

    fn on_stop(&mut self) {
        self.transition(State::Stopped, |handler, activity| handler.on_stop(activity));
    }

    fn on_destroy(&mut self) {
        self.transition(State::Destroyed, |handler, activity| {
            handler.on_destroy(activity)
        });
    }
}

impl Context for Activity {
    fn start_activity(&mut self, target: ActivityTarget) -> Result<()> {
        match self.context.as_mut() {
            Some(context) => context.start_activity(target),
            None => {
                tracing::warn!(activity = %self.key, "Navigation ignored; activity is not bound");
                Ok(())
            }
        }
    }

    fn start_activity_from_parent(
        &mut self,
        target: ActivityTarget,
        parent: ActivityKey,
    ) -> Result<()> {
        match self.context.as_mut() {
            Some(context) => context.start_activity_from_parent(target, parent),
            None => {
                tracing::warn!(activity = %self.key, "Navigation ignored; activity is not bound");
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activity")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("parent", &self.parent)
            .field("windowed", &self.windowed)
            .field("window_open", &self.window_open)
            .field("content_view", &self.content_view)
            .finish_non_exhaustive()
    }
}
