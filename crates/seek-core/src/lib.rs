//! Seek - activity lifecycle orchestration for desktop applications.
//!
//! A single or a group of tasks is encapsulated in an [`Activity`]. Each
//! Activity has a lifecycle driven by the root orchestrator,
//! [`SeekApplication`]: it is created on first navigation, started, resumed,
//! paused when another Activity takes the screen, and finally stopped and
//! destroyed when the application closes. Activities may host
//! [`Fragment`]s, coordinated per Activity by a [`FragmentManager`].
//!
//! Activities must not be driven manually. Register a factory per
//! [`ActivityKey`] in an [`ActivityRegistry`], hand it to the application and
//! navigate with [`Context::start_activity`]. All user logic lives in
//! [`ActivityHandler`] / [`FragmentHandler`] hooks.
//!
//! ```ignore
//! use seek_core::{ActivityKey, ActivityRegistry, Activity, Context, SeekApplication};
//! use seek_core::view::MemoryViewLayer;
//!
//! const MAIN: ActivityKey = ActivityKey::new("main");
//!
//! let mut registry = ActivityRegistry::new();
//! registry.register(MAIN, || Ok(Activity::new(MAIN, MainActivity::default())));
//!
//! let mut app = SeekApplication::new(MemoryViewLayer::new(), registry);
//! app.initialize(WindowConfig::default());
//! app.start_activity(MAIN.into())?;
//! app.show()?;
//! ```

pub mod activity;
pub mod application;
pub mod context;
pub mod error;
pub mod fragment;
pub mod fragment_manager;
pub mod lifecycle;
pub mod options;
pub mod registry;
pub mod state;
pub mod toast;
pub mod view;

pub use activity::{Activity, ActivityHandler, ActivityKey, HomeAction};
pub use application::{SeekApplication, UiEvent};
pub use context::{ActivityTarget, ApplicationContext, Context, Request};
pub use error::{Result, SeekError};
pub use fragment::{Fragment, FragmentHandler, FragmentKey, FragmentTarget};
pub use fragment_manager::FragmentManager;
pub use lifecycle::{StateChange, StateObserver, Stateful, UnitId};
pub use options::{LifecycleOptions, StopBroadcast, WindowConfig};
pub use registry::ActivityRegistry;
pub use state::State;
pub use toast::{Toast, ToastId};
pub use view::{ContainerId, MemoryViewLayer, ViewDescriptor, ViewError, ViewHandle, ViewLayer};
