//! Fragments - lifecycle-bound units nested inside an Activity.
//!
//! Like an Activity, a Fragment has its own lifecycle and its own view. Unlike
//! an Activity, its lifecycle follows the Activity it resides in, driven by
//! that Activity's [`FragmentManager`](crate::FragmentManager). Heavy work
//! belongs in the Activity; fragments display things or run small tasks that
//! help the Activity serve its purpose.

use std::fmt;

use serde::Serialize;

use crate::activity::ActivityKey;
use crate::context::{ActivityTarget, ApplicationContext, Context};
use crate::error::{Result, SeekError};
use crate::lifecycle::{StateChange, Stateful, UnitId};
use crate::state::State;
use crate::view::{ViewDescriptor, ViewHandle};

/// Stable type key of a Fragment, unique within its Activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FragmentKey(&'static str);

impl FragmentKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Per-stage user logic of a Fragment. Errors are logged.
pub trait FragmentHandler {
    fn on_create(&mut self, _fragment: &mut Fragment) -> Result<()> {
        Ok(())
    }

    fn on_start(&mut self, _fragment: &mut Fragment) -> Result<()> {
        Ok(())
    }

    fn on_resume(&mut self, _fragment: &mut Fragment) -> Result<()> {
        Ok(())
    }

    fn on_pause(&mut self, _fragment: &mut Fragment) -> Result<()> {
        Ok(())
    }

    fn on_stop(&mut self, _fragment: &mut Fragment) -> Result<()> {
        Ok(())
    }

    fn on_destroy(&mut self, _fragment: &mut Fragment) -> Result<()> {
        Ok(())
    }
}

impl FragmentHandler for () {}

type Hook = fn(&mut dyn FragmentHandler, &mut Fragment) -> Result<()>;

/// Which fragment a replacement shows.
#[derive(Debug)]
pub enum FragmentTarget {
    /// A fragment already registered under the Activity.
    Key(FragmentKey),
    /// A new instance; the registered one wins if the key is already known.
    Instance(Box<Fragment>),
}

impl FragmentTarget {
    pub fn key(&self) -> FragmentKey {
        match self {
            Self::Key(key) => *key,
            Self::Instance(fragment) => fragment.key(),
        }
    }
}

impl From<FragmentKey> for FragmentTarget {
    fn from(key: FragmentKey) -> Self {
        Self::Key(key)
    }
}

impl From<Fragment> for FragmentTarget {
    fn from(fragment: Fragment) -> Self {
        Self::Instance(Box::new(fragment))
    }
}

/// A lifecycle-bound unit inside exactly one Activity.
pub struct Fragment {
    key: FragmentKey,
    name: Option<String>,
    state: State,
    activity: Option<ActivityKey>,
    content_view: Option<ViewHandle>,
    context: Option<ApplicationContext>,
    handler: Option<Box<dyn FragmentHandler>>,
}

impl Fragment {
    pub fn new(key: FragmentKey, handler: impl FragmentHandler + 'static) -> Self {
        Self {
            key,
            name: None,
            state: State::NotDefined,
            activity: None,
            content_view: None,
            context: None,
            handler: Some(Box::new(handler)),
        }
    }

    pub fn key(&self) -> FragmentKey {
        self.key
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.key.name())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Activity the fragment resides in, once attached.
    pub fn activity(&self) -> Option<ActivityKey> {
        self.activity
    }

    pub fn content_view(&self) -> Option<&ViewHandle> {
        self.content_view.as_ref()
    }

    pub(crate) fn bind(&mut self, context: ApplicationContext) {
        self.context = Some(context);
    }

    /// Attach to the owning Activity. Only the first attach sticks.
    pub(crate) fn attach(&mut self, activity: ActivityKey) {
        match self.activity {
            None => self.activity = Some(activity),
            Some(owner) if owner == activity => {}
            Some(owner) => tracing::warn!(
                fragment = %self.key,
                %owner,
                requested = %activity,
                "Fragment already belongs to another activity"
            ),
        }
    }

    /// Load the view of this fragment. The view is attached once.
    ///
    /// # Errors
    ///
    /// `InvalidState` when a view is already attached, `InvalidArgument` when
    /// the fragment has no view loader, `ViewLoad` on load failure.
    pub fn set_content_view(&mut self, descriptor: impl Into<ViewDescriptor>) -> Result<()> {
        if self.content_view.is_some() {
            return Err(SeekError::invalid_state(format!(
                "fragment '{}' already has a content view",
                self.key
            )));
        }
        let descriptor = descriptor.into();
        let context = self.context.as_ref().ok_or_else(|| {
            SeekError::invalid_argument(format!("fragment '{}' has no view loader", self.key))
        })?;
        self.content_view = Some(context.load_view(&descriptor, self.name())?);
        Ok(())
    }

    fn transition(&mut self, to: State, hook: Hook) {
        let from = self.state;
        self.state = to;
        let unit = UnitId::Fragment {
            activity: self.activity,
            key: self.key,
        };
        tracing::debug!(fragment = %unit, %from, %to, "Fragment state changed");
        if let Some(context) = &self.context {
            context.notify(&StateChange { unit, from, to });
        }
        if let Some(mut handler) = self.handler.take() {
            if let Err(error) = hook(handler.as_mut(), self) {
                tracing::error!(fragment = %unit, stage = %to, %error, "Fragment hook failed");
            }
            self.handler = Some(handler);
        }
    }

    /// Handle of the owning Activity's application, if attached.
    fn owner_context(&mut self) -> Option<&mut ApplicationContext> {
        if self.activity.is_none() {
            return None;
        }
        self.context.as_mut()
    }
}

impl Stateful for Fragment {
    fn state(&self) -> State {
        self.state
    }

    fn on_create(&mut self) {
        self.transition(State::Created, |handler, fragment| handler.on_create(fragment));
    }

    fn on_start(&mut self) {
        self.transition(State::Started, |handler, fragment| handler.on_start(fragment));
    }

    fn on_resume(&mut self) {
        self.transition(State::Resumed, |handler, fragment| handler.on_resume(fragment));
    }

    fn on_pause(&mut self) {
        self.transition(State::Paused, |handler, fragment| handler.on_pause(fragment));
    }

    fn on_stop(&mut self) {
        self.transition(State::Stopped, |handler, fragment| handler.on_stop(fragment));
    }

    fn on_destroy(&mut self) {
        self.transition(State::Destroyed, |handler, fragment| {
            handler.on_destroy(fragment)
        });
    }
}

/// Navigation goes through the owning Activity; a detached fragment cannot
/// navigate.
impl Context for Fragment {
    fn start_activity(&mut self, target: ActivityTarget) -> Result<()> {
        let key = self.key;
        match self.owner_context() {
            Some(context) => context.start_activity(target),
            None => {
                tracing::warn!(fragment = %key, "Navigation ignored; fragment is not attached");
                Ok(())
            }
        }
    }

    fn start_activity_from_parent(
        &mut self,
        target: ActivityTarget,
        parent: ActivityKey,
    ) -> Result<()> {
        let key = self.key;
        match self.owner_context() {
            Some(context) => context.start_activity_from_parent(target, parent),
            None => {
                tracing::warn!(fragment = %key, "Navigation ignored; fragment is not attached");
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("activity", &self.activity)
            .field("content_view", &self.content_view)
            .finish_non_exhaustive()
    }
}
