//! The root orchestrator.
//!
//! [`SeekApplication`] owns every Activity and FragmentManager, the back-stack
//! and the current toast. It is the only component that drives lifecycles:
//! navigation pauses the current Activity, swaps the visible content and
//! resumes (or starts) the target, then updates the back-stack.
//!
//! Units never call back into the application directly. Their navigation,
//! fragment and toast requests are queued on the shared
//! [`ApplicationContext`] and drained by the application once the running
//! entry point has finished its transition.

use std::collections::BTreeMap;
use std::fmt;

use crossbeam_channel::{Receiver, Sender};

use crate::activity::{Activity, ActivityKey};
use crate::context::{ActivityTarget, ApplicationContext, Context, Request};
use crate::error::{Result, SeekError};
use crate::fragment::FragmentTarget;
use crate::fragment_manager::FragmentManager;
use crate::lifecycle::{StateObserver, Stateful};
use crate::options::{LifecycleOptions, WindowConfig};
use crate::registry::ActivityRegistry;
use crate::state::State;
use crate::toast::{Toast, ToastId, spawn_auto_close};
use crate::view::{ContainerId, ViewLayer};

/// Events marshaled onto the UI thread, applied by [`SeekApplication::pump`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The auto-close timer of a toast fired.
    ToastExpired(ToastId),
    /// The main window was asked to close.
    CloseRequested,
}

/// Root orchestrator of a Seek application.
pub struct SeekApplication {
    context: ApplicationContext,
    registry: ActivityRegistry,
    options: LifecycleOptions,
    activities: BTreeMap<ActivityKey, Activity>,
    fragment_managers: BTreeMap<ActivityKey, FragmentManager>,
    back_stack: Vec<ActivityKey>,
    current: Option<ActivityKey>,
    current_toast: Option<Toast>,
    window: Option<WindowConfig>,
    closed: bool,
    ui_sender: Sender<UiEvent>,
    ui_receiver: Receiver<UiEvent>,
}

impl SeekApplication {
    pub fn new(views: impl ViewLayer + 'static, registry: ActivityRegistry) -> Self {
        Self::with_options(views, registry, LifecycleOptions::default())
    }

    pub fn with_options(
        views: impl ViewLayer + 'static,
        registry: ActivityRegistry,
        options: LifecycleOptions,
    ) -> Self {
        let (ui_sender, ui_receiver) = crossbeam_channel::unbounded();
        Self {
            context: ApplicationContext::new(views),
            registry,
            options,
            activities: BTreeMap::new(),
            fragment_managers: BTreeMap::new(),
            back_stack: Vec::new(),
            current: None,
            current_toast: None,
            window: None,
            closed: false,
            ui_sender,
            ui_receiver,
        }
    }

    // =========================================================================
    // HOST SHELL
    // =========================================================================

    /// Bind the main window to the root content container.
    pub fn initialize(&mut self, config: WindowConfig) {
        tracing::info!(
            title = %config.title,
            width = config.width,
            height = config.height,
            maximized = config.maximized,
            "Initializing main window"
        );
        self.context
            .with_views(|views| views.bind_main_window(&config));
        self.window = Some(config);
    }

    /// Make the main window visible.
    ///
    /// # Errors
    ///
    /// `NotInitialized` when called before [`initialize`](Self::initialize).
    pub fn show(&mut self) -> Result<()> {
        if self.window.is_none() {
            tracing::error!("Application window was never initialized");
            return Err(SeekError::NotInitialized);
        }
        self.context.with_views(|views| views.show_main_window());
        Ok(())
    }

    /// Tear the application down: stop and destroy every FragmentManager,
    /// then every Activity. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        tracing::info!(
            activities = self.activities.len(),
            "Closing application"
        );
        let dropped = self.context.clear_requests();
        if dropped > 0 {
            tracing::warn!(dropped, "Dropping queued requests on close");
        }
        self.dismiss_toast();

        for manager in self.fragment_managers.values_mut() {
            stop_and_destroy(manager);
        }
        for activity in self.activities.values_mut() {
            stop_and_destroy(activity);
            activity.close_window();
        }

        // Teardown hooks cannot navigate anymore.
        self.context.clear_requests();
        self.current = None;
        self.back_stack.clear();
        self.closed = true;
    }

    /// Apply marshaled UI events, then run queued requests.
    ///
    /// # Errors
    ///
    /// Invalid-state errors raised by queued requests.
    pub fn pump(&mut self) -> Result<()> {
        while let Ok(event) = self.ui_receiver.try_recv() {
            self.handle_ui_event(event);
        }
        if self.closed {
            return Ok(());
        }
        self.drain_requests()
    }

    fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ToastExpired(id) => {
                if self.current_toast.as_ref().is_some_and(|toast| toast.id() == id) {
                    self.dismiss_toast();
                } else {
                    tracing::debug!(?id, "Ignoring expiry of a replaced toast");
                }
            }
            UiEvent::CloseRequested => self.close(),
        }
    }

    /// Sender for events produced off the UI thread.
    pub fn ui_sender(&self) -> Sender<UiEvent> {
        self.ui_sender.clone()
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Press back on the current Activity.
    ///
    /// # Errors
    ///
    /// Invalid-state errors raised by the resulting navigation.
    pub fn back_pressed(&mut self) -> Result<()> {
        self.ensure_open()?;
        match self.current_activity_mut() {
            Some(activity) => activity.on_back_pressed(),
            None => tracing::debug!("Back pressed without a current activity"),
        }
        self.drain_requests()
    }

    /// Press the action bar home button of the current Activity.
    ///
    /// # Errors
    ///
    /// Invalid-state errors raised by the resulting navigation.
    pub fn home_pressed(&mut self) -> Result<()> {
        self.ensure_open()?;
        if let Some(activity) = self.current_activity_mut() {
            activity.home_pressed();
        }
        self.drain_requests()
    }

    /// Force the destruction of a registered Activity that is not current.
    ///
    /// The Activity and its FragmentManager are stopped and destroyed, then
    /// forgotten. A later navigation to the key builds a new instance.
    ///
    /// # Errors
    ///
    /// `InvalidState` for the current Activity or a closed application.
    pub fn destroy_activity(&mut self, key: ActivityKey) -> Result<()> {
        self.ensure_open()?;
        if self.current == Some(key) {
            return Err(SeekError::invalid_state(format!(
                "activity '{key}' is current and cannot be destroyed"
            )));
        }
        let Some(mut activity) = self.activities.remove(&key) else {
            return self.absorb(Err(SeekError::invalid_argument(format!(
                "activity '{key}' is not registered"
            ))));
        };
        tracing::info!(activity = %key, "Destroying activity");
        if let Some(mut manager) = self.fragment_managers.remove(&key) {
            stop_and_destroy(&mut manager);
        }
        stop_and_destroy(&mut activity);
        activity.close_window();
        self.back_stack.retain(|entry| *entry != key);
        self.drain_requests()
    }

    fn navigate(&mut self, target: ActivityTarget, parent: Option<ActivityKey>) -> Result<()> {
        self.ensure_open()?;
        let key = target.key();
        let mut staged = self.resolve(target)?;

        if let Some(parent) = parent {
            if let Some(activity) = staged.as_mut().or(self.activities.get_mut(&key)) {
                activity.set_parent(Some(parent));
            }
        }

        let (prior, missing_window_view) = match staged.as_ref().or(self.activities.get(&key)) {
            Some(activity) => (
                activity.state(),
                activity.is_windowed() && activity.content_view().is_none(),
            ),
            None => (State::NotDefined, false),
        };
        if prior.is_displayable() && missing_window_view {
            return Err(SeekError::invalid_state(format!(
                "windowed activity '{key}' has no content view"
            )));
        }

        let previous = self.current;
        if let Some(previous) = previous {
            self.pause_unit(previous);
        }
        // Navigating to the current activity reads the state it was just
        // paused to.
        let prior = match staged.as_ref().or(self.activities.get(&key)) {
            Some(activity) => activity.state(),
            None => prior,
        };

        if !prior.is_displayable() {
            tracing::warn!(
                activity = %key,
                state = %prior,
                "Activity is not created; keeping the current activity"
            );
            if let Some(previous) = previous {
                self.resume_unit(previous);
            }
            return Ok(());
        }

        if let Some(activity) = staged {
            self.activities.insert(key, activity);
        }

        if let Err(error) = self.swap_content(key) {
            if let Some(previous) = previous {
                self.resume_unit(previous);
            }
            return Err(error);
        }

        self.enter(key, prior);

        match previous {
            Some(previous) if self.back_stack.is_empty() => {
                if previous != key {
                    self.back_stack.push(previous);
                }
            }
            _ => {
                if self.back_stack.last() == Some(&key) {
                    self.back_stack.pop();
                }
            }
        }

        self.current = Some(key);
        tracing::info!(
            activity = %key,
            from = previous.map(|previous| previous.name()),
            back_stack = self.back_stack.len(),
            "Activity displayed"
        );
        Ok(())
    }

    /// Resolve the target to a registered Activity, or stage a new instance.
    fn resolve(&mut self, target: ActivityTarget) -> Result<Option<Activity>> {
        match target {
            ActivityTarget::Key(key) => {
                if !self.activities.contains_key(&key) {
                    let mut activity = self.registry.instantiate(key)?;
                    activity.bind(self.context.clone());
                    tracing::debug!(activity = %key, "Instantiated activity");
                    activity.on_create();
                    self.activities.insert(key, activity);
                }
                Ok(None)
            }
            ActivityTarget::Instance(activity) => {
                let key = activity.key();
                if self.activities.contains_key(&key) {
                    tracing::warn!(
                        activity = %key,
                        "Activity already registered; using the registered instance"
                    );
                    return Ok(None);
                }
                let mut activity = *activity;
                activity.bind(self.context.clone());
                Ok(Some(activity))
            }
        }
    }

    fn swap_content(&mut self, key: ActivityKey) -> Result<()> {
        let activity = self.activities.get_mut(&key).ok_or_else(|| {
            SeekError::invalid_argument(format!("activity '{key}' is not registered"))
        })?;
        if activity.is_windowed() {
            return activity.show_window();
        }
        if activity.content_view().is_none() {
            tracing::warn!(activity = %key, "Activity has no content view; clearing the root");
        }
        let children = activity.content_view().cloned().into_iter().collect();
        self.context.set_children(ContainerId::ROOT, children)?;
        Ok(())
    }

    /// Drive the target and its FragmentManager according to its prior state.
    fn enter(&mut self, key: ActivityKey, prior: State) {
        let Some(activity) = self.activities.get_mut(&key) else {
            return;
        };
        match prior {
            State::Created => {
                activity.on_start();
                activity.on_resume();
                if let Some(manager) = self.fragment_manager(key) {
                    if manager.state() == State::NotDefined {
                        manager.on_create();
                    }
                    manager.on_start();
                    manager.on_resume();
                }
            }
            State::Paused | State::Started => {
                activity.on_resume();
                self.reenter_fragment_manager(key, false);
            }
            State::Stopped => {
                activity.on_start();
                activity.on_resume();
                self.reenter_fragment_manager(key, true);
            }
            State::Resumed => tracing::debug!(activity = %key, "Activity already resumed"),
            State::NotDefined | State::Destroyed => {}
        }
    }

    /// Bring an existing manager back to RESUMED. One the host created but
    /// never drove runs its create and start first.
    fn reenter_fragment_manager(&mut self, key: ActivityKey, restart: bool) {
        let Some(manager) = self.fragment_managers.get_mut(&key) else {
            return;
        };
        if manager.state() == State::NotDefined {
            manager.on_create();
            manager.on_start();
        } else if restart {
            manager.on_start();
        }
        manager.on_resume();
    }

    fn pause_unit(&mut self, key: ActivityKey) {
        if let Some(manager) = self.fragment_managers.get_mut(&key) {
            if manager.state() == State::Resumed {
                manager.on_pause();
            }
        }
        if let Some(activity) = self.activities.get_mut(&key) {
            if activity.state().is_alive() {
                activity.on_pause();
            }
        }
    }

    fn resume_unit(&mut self, key: ActivityKey) {
        if let Some(activity) = self.activities.get_mut(&key) {
            if activity.state() == State::Paused {
                activity.on_resume();
            }
        }
        if let Some(manager) = self.fragment_managers.get_mut(&key) {
            if manager.state() == State::Paused {
                manager.on_resume();
            }
        }
    }

    // =========================================================================
    // FRAGMENTS
    // =========================================================================

    /// FragmentManager of a registered Activity, created on first use.
    pub fn fragment_manager(&mut self, key: ActivityKey) -> Option<&mut FragmentManager> {
        if !self.activities.contains_key(&key) {
            return None;
        }
        let manager = self.fragment_managers.entry(key).or_insert_with(|| {
            tracing::debug!(activity = %key, "Creating fragment manager");
            FragmentManager::new(key, self.context.clone(), self.options.stop_broadcast)
        });
        Some(manager)
    }

    /// FragmentManager of `key`, if it exists already.
    pub fn find_fragment_manager(&self, key: ActivityKey) -> Option<&FragmentManager> {
        self.fragment_managers.get(&key)
    }

    /// Show a fragment inside `container` of a registered Activity.
    ///
    /// Unknown containers, activities or fragments are logged and ignored.
    ///
    /// # Errors
    ///
    /// Invalid-state errors raised by requests queued from fragment hooks.
    pub fn replace_fragment(
        &mut self,
        activity: ActivityKey,
        container: ContainerId,
        fragment: impl Into<FragmentTarget>,
    ) -> Result<()> {
        self.ensure_open()?;
        let outcome = self.replace_fragment_now(activity, container, fragment.into());
        self.absorb(outcome)?;
        self.drain_requests()
    }

    fn replace_fragment_now(
        &mut self,
        activity: ActivityKey,
        container: ContainerId,
        fragment: FragmentTarget,
    ) -> Result<()> {
        self.ensure_open()?;
        let manager = self.fragment_manager(activity).ok_or_else(|| {
            SeekError::invalid_argument(format!("activity '{activity}' is not registered"))
        })?;
        manager.replace_fragment(container, fragment)
    }

    // =========================================================================
    // TOASTS
    // =========================================================================

    /// Show a toast, replacing the one on screen. Auto-closing toasts are
    /// dismissed by a later [`pump`](Self::pump) once their duration elapsed.
    pub fn show_toast(&mut self, toast: Toast) {
        if self.closed {
            tracing::warn!(toast = toast.message(), "Toast dropped; application is closed");
            return;
        }
        self.dismiss_toast();
        tracing::debug!(toast = toast.message(), "Showing toast");
        self.context.with_views(|views| views.present_toast(&toast));
        if toast.auto_close() {
            spawn_auto_close(&toast, self.ui_sender.clone());
        }
        self.current_toast = Some(toast);
    }

    /// Dismiss the toast on screen, if any.
    pub fn dismiss_toast(&mut self) {
        if let Some(toast) = self.current_toast.take() {
            self.context.with_views(|views| views.dismiss_toast(toast.id()));
        }
    }

    pub fn current_toast(&self) -> Option<&Toast> {
        self.current_toast.as_ref()
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn context(&self) -> &ApplicationContext {
        &self.context
    }

    /// Register a state observer for every unit of this application.
    pub fn subscribe(&self, observer: impl StateObserver + 'static) {
        self.context.subscribe(observer);
    }

    pub fn registry(&self) -> &ActivityRegistry {
        &self.registry
    }

    pub fn options(&self) -> &LifecycleOptions {
        &self.options
    }

    pub fn window_config(&self) -> Option<&WindowConfig> {
        self.window.as_ref()
    }

    pub fn current_key(&self) -> Option<ActivityKey> {
        self.current
    }

    pub fn current_activity(&self) -> Option<&Activity> {
        self.current.and_then(|key| self.activities.get(&key))
    }

    fn current_activity_mut(&mut self) -> Option<&mut Activity> {
        self.current.and_then(|key| self.activities.get_mut(&key))
    }

    pub fn activity(&self, key: ActivityKey) -> Option<&Activity> {
        self.activities.get(&key)
    }

    pub fn activity_mut(&mut self, key: ActivityKey) -> Option<&mut Activity> {
        self.activities.get_mut(&key)
    }

    /// Registered activities, in key order.
    pub fn registered_activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.values()
    }

    pub fn back_stack(&self) -> &[ActivityKey] {
        &self.back_stack
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // =========================================================================
    // REQUEST PROCESSING
    // =========================================================================

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(SeekError::invalid_state("application is closed"));
        }
        Ok(())
    }

    /// Log and drop recoverable failures; pass the rest to the caller.
    fn absorb(&self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Err(error) if error.is_recoverable() => {
                tracing::error!(%error, "Request dropped");
                Ok(())
            }
            other => other,
        }
    }

    fn drain_requests(&mut self) -> Result<()> {
        let mut handled = 0;
        while let Some(request) = self.context.take_request() {
            if handled == self.options.max_chained_requests {
                let dropped = self.context.clear_requests() + 1;
                tracing::warn!(
                    handled,
                    dropped,
                    "Request chain exceeded its bound; dropping the rest"
                );
                break;
            }
            handled += 1;
            let outcome = match request {
                Request::StartActivity { target, parent } => self.navigate(target, parent),
                Request::ReplaceFragment {
                    activity,
                    container,
                    fragment,
                } => self.replace_fragment_now(activity, container, fragment),
                Request::ShowToast(toast) => {
                    self.show_toast(toast);
                    Ok(())
                }
            };
            if let Err(error) = self.absorb(outcome) {
                let dropped = self.context.clear_requests();
                if dropped > 0 {
                    tracing::warn!(
                        dropped,
                        %error,
                        "Dropping queued requests after a failed request"
                    );
                }
                return Err(error);
            }
        }
        Ok(())
    }
}

/// Stop the unit unless it is stopped or destroyed, then destroy it unless
/// it is destroyed.
fn stop_and_destroy(unit: &mut impl Stateful) {
    if !matches!(unit.state(), State::Stopped | State::Destroyed) {
        unit.on_stop();
    }
    if unit.state() != State::Destroyed {
        unit.on_destroy();
    }
}

impl Context for SeekApplication {
    fn start_activity(&mut self, target: ActivityTarget) -> Result<()> {
        let outcome = self.navigate(target, None);
        self.absorb(outcome)?;
        self.drain_requests()
    }

    fn start_activity_from_parent(
        &mut self,
        target: ActivityTarget,
        parent: ActivityKey,
    ) -> Result<()> {
        let outcome = self.navigate(target, Some(parent));
        self.absorb(outcome)?;
        self.drain_requests()
    }
}

impl fmt::Debug for SeekApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeekApplication")
            .field("current", &self.current)
            .field("back_stack", &self.back_stack)
            .field("activities", &self.activities.keys().collect::<Vec<_>>())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
