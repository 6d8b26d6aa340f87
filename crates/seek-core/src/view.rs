//! Boundary to the view layer.
//!
//! The core never renders anything. Loading view descriptors, presenting
//! native windows and mutating containers are delegated to a [`ViewLayer`].
//! Every container follows a single-child contract: `set_children` replaces
//! whatever was shown before.
//!
//! [`MemoryViewLayer`] is a headless implementation that records the scene in
//! memory. It is used by the demo shell and the test suites.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::activity::ActivityKey;
use crate::options::WindowConfig;
use crate::toast::{Toast, ToastId};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Reference to a view descriptor (e.g. a layout resource path).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewDescriptor(String);

impl ViewDescriptor {
    pub fn new(resource: impl Into<String>) -> Self {
        Self(resource.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewDescriptor {
    fn from(resource: &str) -> Self {
        Self::new(resource)
    }
}

impl fmt::Display for ViewDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a container inside the view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(&'static str);

impl ContainerId {
    /// Shared content area of the main window.
    pub const ROOT: ContainerId = ContainerId("root");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Attachable view returned by [`ViewLayer::load_view`]. Opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHandle {
    id: u64,
    descriptor: ViewDescriptor,
    controller: String,
}

impl ViewHandle {
    pub fn new(id: u64, descriptor: ViewDescriptor, controller: impl Into<String>) -> Self {
        Self {
            id,
            descriptor,
            controller: controller.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn descriptor(&self) -> &ViewDescriptor {
        &self.descriptor
    }

    /// Name of the Activity or Fragment the view was bound to.
    pub fn controller(&self) -> &str {
        &self.controller
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Failures reported by a view layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("View descriptor not found: {descriptor}")]
    DescriptorNotFound { descriptor: String },

    #[error("Container not found: {container}")]
    UnknownContainer { container: String },

    #[error("Window error: {reason}")]
    Window { reason: String },
}

// =============================================================================
// VIEW LAYER
// =============================================================================

/// Operations the core consumes from the presentation toolkit.
///
/// All calls happen on the UI thread.
pub trait ViewLayer {
    /// Load a view descriptor and bind it to `controller`.
    fn load_view(
        &mut self,
        descriptor: &ViewDescriptor,
        controller: &str,
    ) -> Result<ViewHandle, ViewError>;

    /// Check if `container` exists in the current view tree.
    fn has_container(&self, container: ContainerId) -> bool;

    /// Replace the children of `container`.
    fn set_children(
        &mut self,
        container: ContainerId,
        children: Vec<ViewHandle>,
    ) -> Result<(), ViewError>;

    /// Present `view` in a separate native window owned by `owner`.
    fn present_window(
        &mut self,
        owner: ActivityKey,
        view: &ViewHandle,
        width: f64,
        height: f64,
    ) -> Result<(), ViewError>;

    /// Close the native window owned by `owner`, if open.
    fn close_window(&mut self, owner: ActivityKey);

    /// Bind the main native window to the root content container.
    fn bind_main_window(&mut self, config: &WindowConfig);

    /// Make the main native window visible.
    fn show_main_window(&mut self);

    /// Slide a toast notification over the root container.
    fn present_toast(&mut self, toast: &Toast);

    /// Remove a toast notification.
    fn dismiss_toast(&mut self, id: ToastId);
}

// =============================================================================
// HEADLESS VIEW LAYER
// =============================================================================

/// In-memory view layer.
///
/// Cloning yields another handle to the same scene, so a test can keep one
/// clone to inspect what the application displayed.
#[derive(Debug, Clone, Default)]
pub struct MemoryViewLayer {
    scene: Rc<RefCell<MemoryScene>>,
}

#[derive(Debug, Default)]
struct MemoryScene {
    /// Known descriptors and the containers their views declare.
    descriptors: HashMap<ViewDescriptor, Vec<ContainerId>>,
    containers: BTreeMap<ContainerId, Vec<ViewHandle>>,
    windows: BTreeMap<ActivityKey, ViewHandle>,
    main_window: Option<WindowConfig>,
    main_window_shown: bool,
    toast: Option<(ToastId, String)>,
    next_view_id: u64,
}

impl MemoryViewLayer {
    /// Create an empty scene with only the root container.
    pub fn new() -> Self {
        let layer = Self::default();
        layer
            .scene
            .borrow_mut()
            .containers
            .insert(ContainerId::ROOT, Vec::new());
        layer
    }

    /// Declare a loadable descriptor and the containers its view provides.
    #[must_use]
    pub fn with_descriptor(self, descriptor: &str, containers: &[ContainerId]) -> Self {
        self.declare(descriptor, containers);
        self
    }

    /// Declare a loadable descriptor and the containers its view provides.
    pub fn declare(&self, descriptor: &str, containers: &[ContainerId]) {
        self.scene
            .borrow_mut()
            .descriptors
            .insert(ViewDescriptor::new(descriptor), containers.to_vec());
    }

    /// Children currently shown in `container`.
    pub fn children(&self, container: ContainerId) -> Vec<ViewHandle> {
        self.scene
            .borrow()
            .containers
            .get(&container)
            .cloned()
            .unwrap_or_default()
    }

    /// Descriptor of the single child of `container`, if any.
    pub fn shown_descriptor(&self, container: ContainerId) -> Option<String> {
        self.children(container)
            .first()
            .map(|view| view.descriptor().as_str().to_string())
    }

    /// Owners of every open native window, in key order.
    pub fn open_windows(&self) -> Vec<ActivityKey> {
        self.scene.borrow().windows.keys().copied().collect()
    }

    /// Configuration of the bound main window.
    pub fn main_window(&self) -> Option<WindowConfig> {
        self.scene.borrow().main_window.clone()
    }

    pub fn is_main_window_shown(&self) -> bool {
        self.scene.borrow().main_window_shown
    }

    /// Message of the toast currently on screen.
    pub fn toast_message(&self) -> Option<String> {
        self.scene
            .borrow()
            .toast
            .as_ref()
            .map(|(_, message)| message.clone())
    }
}

impl ViewLayer for MemoryViewLayer {
    fn load_view(
        &mut self,
        descriptor: &ViewDescriptor,
        controller: &str,
    ) -> Result<ViewHandle, ViewError> {
        let mut scene = self.scene.borrow_mut();
        let containers = scene.descriptors.get(descriptor).cloned().ok_or_else(|| {
            ViewError::DescriptorNotFound {
                descriptor: descriptor.to_string(),
            }
        })?;
        for container in containers {
            scene.containers.entry(container).or_default();
        }
        scene.next_view_id += 1;
        Ok(ViewHandle::new(
            scene.next_view_id,
            descriptor.clone(),
            controller,
        ))
    }

    fn has_container(&self, container: ContainerId) -> bool {
        self.scene.borrow().containers.contains_key(&container)
    }

    fn set_children(
        &mut self,
        container: ContainerId,
        children: Vec<ViewHandle>,
    ) -> Result<(), ViewError> {
        let mut scene = self.scene.borrow_mut();
        let slot = scene
            .containers
            .get_mut(&container)
            .ok_or_else(|| ViewError::UnknownContainer {
                container: container.to_string(),
            })?;
        *slot = children;
        Ok(())
    }

    fn present_window(
        &mut self,
        owner: ActivityKey,
        view: &ViewHandle,
        width: f64,
        height: f64,
    ) -> Result<(), ViewError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(ViewError::Window {
                reason: format!("invalid window size {width}x{height}"),
            });
        }
        self.scene.borrow_mut().windows.insert(owner, view.clone());
        Ok(())
    }

    fn close_window(&mut self, owner: ActivityKey) {
        self.scene.borrow_mut().windows.remove(&owner);
    }

    fn bind_main_window(&mut self, config: &WindowConfig) {
        self.scene.borrow_mut().main_window = Some(config.clone());
    }

    fn show_main_window(&mut self) {
        self.scene.borrow_mut().main_window_shown = true;
    }

    fn present_toast(&mut self, toast: &Toast) {
        self.scene.borrow_mut().toast = Some((toast.id(), toast.message().to_string()));
    }

    fn dismiss_toast(&mut self, id: ToastId) {
        let mut scene = self.scene.borrow_mut();
        if scene.toast.as_ref().is_some_and(|(shown, _)| *shown == id) {
            scene.toast = None;
        }
    }
}
