//! The demo application: three activities and two fragments over a headless
//! view layer.
//!
//! - `main` hosts the fragments in its `body` container and greets on start.
//! - `next` is a plain screen whose home button acts as back.
//! - `settings` opens in its own window.

use seek_core::options::ACTIVITY_WINDOW_SIZE;
use seek_core::{
    Activity, ActivityHandler, ActivityKey, ActivityRegistry, ContainerId, Fragment,
    FragmentHandler, FragmentKey, MemoryViewLayer, Result, Toast,
};

pub const MAIN: ActivityKey = ActivityKey::new("main");
pub const NEXT: ActivityKey = ActivityKey::new("next");
pub const SETTINGS: ActivityKey = ActivityKey::new("settings");

/// Container of the main layout that hosts fragments.
pub const BODY: ContainerId = ContainerId::new("body");

pub const GREETING: FragmentKey = FragmentKey::new("greeting");
pub const DETAILS: FragmentKey = FragmentKey::new("details");

// =============================================================================
// ACTIVITIES
// =============================================================================

struct MainActivity;

impl ActivityHandler for MainActivity {
    fn on_create(&mut self, activity: &mut Activity) -> Result<()> {
        activity.set_name("Main");
        activity.set_content_view("activity_main.view")?;
        activity.set_show_home_enabled(true);
        activity.set_home_action(|key| tracing::info!(activity = %key, "Home pressed"));
        activity.replace_fragment(BODY, greeting())
    }
}

struct NextActivity;

impl ActivityHandler for NextActivity {
    fn on_create(&mut self, activity: &mut Activity) -> Result<()> {
        activity.set_name("Next");
        activity.set_content_view("activity_next.view")?;
        activity.set_show_home_enabled(true);
        activity.set_display_home_as_up(true);
        Ok(())
    }

    fn on_resume(&mut self, activity: &mut Activity) -> Result<()> {
        activity.show_toast(Toast::make(
            "Welcome to the next activity",
            true,
            Toast::DURATION_SHORT,
        ));
        Ok(())
    }
}

struct SettingsActivity;

impl ActivityHandler for SettingsActivity {
    fn on_create(&mut self, activity: &mut Activity) -> Result<()> {
        activity.set_name("Settings");
        activity.set_content_view("activity_settings.view")
    }

    fn on_pause(&mut self, activity: &mut Activity) -> Result<()> {
        tracing::debug!(activity = %activity.key(), "Settings left open in the background");
        Ok(())
    }
}

// =============================================================================
// FRAGMENTS
// =============================================================================

struct Panel {
    view: &'static str,
    name: &'static str,
}

impl FragmentHandler for Panel {
    fn on_create(&mut self, fragment: &mut Fragment) -> Result<()> {
        fragment.set_name(self.name);
        fragment.set_content_view(self.view)
    }

    fn on_resume(&mut self, fragment: &mut Fragment) -> Result<()> {
        tracing::info!(fragment = %fragment.key(), "Fragment on screen");
        Ok(())
    }
}

pub fn greeting() -> Fragment {
    Fragment::new(
        GREETING,
        Panel {
            view: "fragment_greeting.view",
            name: "Greeting",
        },
    )
}

pub fn details() -> Fragment {
    Fragment::new(
        DETAILS,
        Panel {
            view: "fragment_details.view",
            name: "Details",
        },
    )
}

/// Build a demo fragment by key name.
pub fn fragment(name: &str) -> Option<Fragment> {
    match name {
        "greeting" => Some(greeting()),
        "details" => Some(details()),
        _ => None,
    }
}

/// Names accepted by [`fragment`].
pub const FRAGMENT_NAMES: &[&str] = &["greeting", "details"];

// =============================================================================
// WIRING
// =============================================================================

/// Registry of every demo activity.
pub fn registry() -> ActivityRegistry {
    let mut registry = ActivityRegistry::new();
    registry.register(MAIN, || Ok(Activity::new(MAIN, MainActivity)));
    registry.register(NEXT, || Ok(Activity::new(NEXT, NextActivity)));
    registry.register(SETTINGS, || {
        let mut activity = Activity::new(SETTINGS, SettingsActivity);
        let (width, height) = ACTIVITY_WINDOW_SIZE;
        activity.set_windowed(true);
        activity.set_window_size(width, height);
        Ok(activity)
    });
    registry
}

/// Headless view layer declaring every demo layout.
pub fn view_layer() -> MemoryViewLayer {
    MemoryViewLayer::new()
        .with_descriptor("activity_main.view", &[BODY])
        .with_descriptor("activity_next.view", &[])
        .with_descriptor("activity_settings.view", &[])
        .with_descriptor("fragment_greeting.view", &[])
        .with_descriptor("fragment_details.view", &[])
}

/// Short description of each demo activity, in key order.
pub fn describe(key: ActivityKey) -> &'static str {
    match key.name() {
        "main" => "Hosts the greeting and details fragments",
        "next" => "Plain screen; home acts as back",
        "settings" => "Opens in its own window",
        _ => "",
    }
}
