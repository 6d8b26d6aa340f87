//! The navigation contract and the application handle.
//!
//! A [`Context`] and its delegates are the only ones allowed to start an
//! Activity. [`SeekApplication`](crate::SeekApplication) runs requests
//! immediately; Activities, Fragments and the [`ApplicationContext`] handle
//! queue them for the orchestrator, which drains the queue once the running
//! transition has completed.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::activity::{Activity, ActivityKey};
use crate::error::Result;
use crate::fragment::FragmentTarget;
use crate::lifecycle::{StateChange, StateObserver};
use crate::toast::Toast;
use crate::view::{ContainerId, ViewDescriptor, ViewError, ViewHandle, ViewLayer};

/// What a navigation request points at.
#[derive(Debug)]
pub enum ActivityTarget {
    /// Resolve the singleton for this key, creating it through its factory
    /// on first use.
    Key(ActivityKey),
    /// A host-constructed instance. It is displayed only if it went through
    /// `on_create`.
    Instance(Box<Activity>),
}

impl ActivityTarget {
    pub fn key(&self) -> ActivityKey {
        match self {
            Self::Key(key) => *key,
            Self::Instance(activity) => activity.key(),
        }
    }
}

impl From<ActivityKey> for ActivityTarget {
    fn from(key: ActivityKey) -> Self {
        Self::Key(key)
    }
}

impl From<Activity> for ActivityTarget {
    fn from(activity: Activity) -> Self {
        Self::Instance(Box::new(activity))
    }
}

/// Capability of issuing navigation requests.
///
/// Only invalid-state errors reach the caller. Unknown types, failing
/// factories and view-load failures are logged and the request is dropped,
/// leaving the current Activity on screen.
pub trait Context {
    /// Start an Activity.
    fn start_activity(&mut self, target: ActivityTarget) -> Result<()>;

    /// Start an Activity and make `parent` the target of its back navigation.
    fn start_activity_from_parent(
        &mut self,
        target: ActivityTarget,
        parent: ActivityKey,
    ) -> Result<()>;
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Work queued by bound units for the orchestrator.
#[derive(Debug)]
pub enum Request {
    StartActivity {
        target: ActivityTarget,
        parent: Option<ActivityKey>,
    },
    ReplaceFragment {
        activity: ActivityKey,
        container: ContainerId,
        fragment: FragmentTarget,
    },
    ShowToast(Toast),
}

// =============================================================================
// APPLICATION CONTEXT
// =============================================================================

/// Shared handle to the application, held by every bound unit.
///
/// Carries the request queue, the state observers and the view layer.
/// Cloning is cheap; all clones refer to the same application. The handle is
/// single-threaded (`!Send`).
#[derive(Clone)]
pub struct ApplicationContext {
    shared: Rc<Shared>,
}

struct Shared {
    requests: RefCell<VecDeque<Request>>,
    observers: RefCell<Vec<Box<dyn StateObserver>>>,
    views: RefCell<Box<dyn ViewLayer>>,
}

impl ApplicationContext {
    pub fn new(views: impl ViewLayer + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                requests: RefCell::new(VecDeque::new()),
                observers: RefCell::new(Vec::new()),
                views: RefCell::new(Box::new(views)),
            }),
        }
    }

    /// Queue a request for the orchestrator.
    pub fn enqueue(&self, request: Request) {
        self.shared.requests.borrow_mut().push_back(request);
    }

    pub fn pending_requests(&self) -> usize {
        self.shared.requests.borrow().len()
    }

    pub(crate) fn take_request(&self) -> Option<Request> {
        self.shared.requests.borrow_mut().pop_front()
    }

    /// Drop every queued request, returning how many were dropped.
    pub(crate) fn clear_requests(&self) -> usize {
        let mut requests = self.shared.requests.borrow_mut();
        let dropped = requests.len();
        requests.clear();
        dropped
    }

    /// Register a state observer.
    pub fn subscribe(&self, observer: impl StateObserver + 'static) {
        self.shared.observers.borrow_mut().push(Box::new(observer));
    }

    pub(crate) fn notify(&self, change: &StateChange) {
        match self.shared.observers.try_borrow_mut() {
            Ok(mut observers) => {
                for observer in observers.iter_mut() {
                    observer.state_changed(change);
                }
            }
            Err(_) => tracing::warn!(
                unit = %change.unit,
                "State change emitted from inside an observer; not delivered"
            ),
        }
    }

    /// Run `f` against the view layer.
    ///
    /// `f` must not call back into this handle's view layer.
    pub fn with_views<R>(&self, f: impl FnOnce(&mut dyn ViewLayer) -> R) -> R {
        let mut views = self.shared.views.borrow_mut();
        f(&mut **views)
    }

    pub fn load_view(
        &self,
        descriptor: &ViewDescriptor,
        controller: &str,
    ) -> std::result::Result<ViewHandle, ViewError> {
        self.with_views(|views| views.load_view(descriptor, controller))
    }

    pub fn has_container(&self, container: ContainerId) -> bool {
        self.with_views(|views| views.has_container(container))
    }

    pub fn set_children(
        &self,
        container: ContainerId,
        children: Vec<ViewHandle>,
    ) -> std::result::Result<(), ViewError> {
        self.with_views(|views| views.set_children(container, children))
    }

    pub fn present_window(
        &self,
        owner: ActivityKey,
        view: &ViewHandle,
        width: f64,
        height: f64,
    ) -> std::result::Result<(), ViewError> {
        self.with_views(|views| views.present_window(owner, view, width, height))
    }

    pub fn close_window(&self, owner: ActivityKey) {
        self.with_views(|views| views.close_window(owner));
    }
}

impl Context for ApplicationContext {
    fn start_activity(&mut self, target: ActivityTarget) -> Result<()> {
        self.enqueue(Request::StartActivity {
            target,
            parent: None,
        });
        Ok(())
    }

    fn start_activity_from_parent(
        &mut self,
        target: ActivityTarget,
        parent: ActivityKey,
    ) -> Result<()> {
        self.enqueue(Request::StartActivity {
            target,
            parent: Some(parent),
        });
        Ok(())
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("pending_requests", &self.pending_requests())
            .finish_non_exhaustive()
    }
}
