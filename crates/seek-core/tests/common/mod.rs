#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use seek_core::{
    Activity, ActivityHandler, ActivityKey, ActivityRegistry, ContainerId, Context, Fragment,
    FragmentHandler, FragmentKey, LifecycleOptions, MemoryViewLayer, Result, SeekApplication,
    SeekError, State, StateChange, UnitId,
};

pub const MAIN: ActivityKey = ActivityKey::new("main");
pub const NEXT: ActivityKey = ActivityKey::new("next");
pub const WINDOWED: ActivityKey = ActivityKey::new("windowed");
pub const SPLASH: ActivityKey = ActivityKey::new("splash");
pub const BLANK: ActivityKey = ActivityKey::new("blank");
pub const BROKEN: ActivityKey = ActivityKey::new("broken");

pub const BODY: ContainerId = ContainerId::new("body");
pub const GREETING: FragmentKey = FragmentKey::new("greeting");
pub const DETAILS: FragmentKey = FragmentKey::new("details");

/// Activity showing a single layout.
pub struct Screen {
    pub view: &'static str,
    pub home_as_up: bool,
}

impl ActivityHandler for Screen {
    fn on_create(&mut self, activity: &mut Activity) -> Result<()> {
        activity.set_content_view(self.view)?;
        activity.set_show_home_enabled(self.home_as_up);
        activity.set_display_home_as_up(self.home_as_up);
        Ok(())
    }
}

/// Moves on to the main activity as soon as it is started.
pub struct Splash;

impl ActivityHandler for Splash {
    fn on_create(&mut self, activity: &mut Activity) -> Result<()> {
        activity.set_content_view("splash.view")
    }

    fn on_start(&mut self, activity: &mut Activity) -> Result<()> {
        activity.start_activity(MAIN.into())
    }
}

/// Fragment showing a single layout.
pub struct Panel(pub &'static str);

impl FragmentHandler for Panel {
    fn on_create(&mut self, fragment: &mut Fragment) -> Result<()> {
        fragment.set_content_view(self.0)
    }
}

pub fn greeting() -> Fragment {
    Fragment::new(GREETING, Panel("greeting.view"))
}

pub fn details() -> Fragment {
    Fragment::new(DETAILS, Panel("details.view"))
}

pub fn layer() -> MemoryViewLayer {
    MemoryViewLayer::new()
        .with_descriptor("main.view", &[BODY])
        .with_descriptor("next.view", &[])
        .with_descriptor("windowed.view", &[])
        .with_descriptor("splash.view", &[])
        .with_descriptor("greeting.view", &[])
        .with_descriptor("details.view", &[])
}

pub fn registry() -> ActivityRegistry {
    let mut registry = ActivityRegistry::new();
    registry.register(MAIN, || {
        Ok(Activity::new(
            MAIN,
            Screen {
                view: "main.view",
                home_as_up: false,
            },
        ))
    });
    registry.register(NEXT, || {
        Ok(Activity::new(
            NEXT,
            Screen {
                view: "next.view",
                home_as_up: true,
            },
        ))
    });
    registry.register(WINDOWED, || {
        let mut activity = Activity::new(
            WINDOWED,
            Screen {
                view: "windowed.view",
                home_as_up: false,
            },
        );
        activity.set_windowed(true);
        Ok(activity)
    });
    registry.register(SPLASH, || Ok(Activity::new(SPLASH, Splash)));
    registry.register(BLANK, || {
        let mut activity = Activity::new(BLANK, ());
        activity.set_windowed(true);
        Ok(activity)
    });
    registry.register(BROKEN, || {
        Err(SeekError::invalid_state("resources unavailable"))
    });
    registry
}

pub fn app() -> (SeekApplication, MemoryViewLayer) {
    app_with(LifecycleOptions::default())
}

pub fn app_with(options: LifecycleOptions) -> (SeekApplication, MemoryViewLayer) {
    let layer = layer();
    let app = SeekApplication::with_options(layer.clone(), registry(), options);
    (app, layer)
}

/// Records every state change of an application.
#[derive(Clone, Default)]
pub struct Transcript {
    changes: Rc<RefCell<Vec<StateChange>>>,
}

impl Transcript {
    pub fn attach(app: &SeekApplication) -> Self {
        let transcript = Self::default();
        let sink = Rc::clone(&transcript.changes);
        app.subscribe(move |change: &StateChange| sink.borrow_mut().push(*change));
        transcript
    }

    pub fn changes(&self) -> Vec<StateChange> {
        self.changes.borrow().clone()
    }

    /// One line per change.
    pub fn render(&self) -> String {
        self.changes
            .borrow()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of writes of `to` on `unit`.
    pub fn count(&self, unit: UnitId, to: State) -> usize {
        self.changes
            .borrow()
            .iter()
            .filter(|change| change.unit == unit && change.to == to)
            .count()
    }

    pub fn clear(&self) {
        self.changes.borrow_mut().clear();
    }
}

pub fn activity_unit(key: ActivityKey) -> UnitId {
    UnitId::Activity { key }
}

pub fn fragment_unit(activity: ActivityKey, key: FragmentKey) -> UnitId {
    UnitId::Fragment {
        activity: Some(activity),
        key,
    }
}
