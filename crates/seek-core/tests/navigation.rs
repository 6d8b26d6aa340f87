mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{
    BLANK, BODY, BROKEN, MAIN, NEXT, SPLASH, Transcript, WINDOWED, activity_unit, app, greeting,
};
use seek_core::{
    Activity, ActivityKey, ContainerId, Context, Request, SeekError, State, Stateful, UnitId,
    WindowConfig,
};

#[test]
fn forward_and_back_scenario() {
    let (mut app, layer) = app();

    app.start_activity(MAIN.into()).unwrap();
    assert_eq!(app.current_key(), Some(MAIN));
    assert_eq!(app.activity(MAIN).unwrap().state(), State::Resumed);
    assert!(app.back_stack().is_empty());

    app.start_activity_from_parent(NEXT.into(), MAIN).unwrap();
    assert_eq!(app.current_key(), Some(NEXT));
    assert_eq!(app.activity(NEXT).unwrap().state(), State::Resumed);
    assert_eq!(app.activity(NEXT).unwrap().parent(), Some(MAIN));
    assert_eq!(app.activity(MAIN).unwrap().state(), State::Paused);
    assert_eq!(app.back_stack(), &[MAIN]);
    assert_eq!(
        layer.shown_descriptor(ContainerId::ROOT).as_deref(),
        Some("next.view")
    );

    app.back_pressed().unwrap();
    assert_eq!(app.current_key(), Some(MAIN));
    assert_eq!(app.activity(MAIN).unwrap().state(), State::Resumed);
    assert_eq!(app.activity(NEXT).unwrap().state(), State::Paused);
    assert!(app.back_stack().is_empty());
    assert_eq!(
        layer.shown_descriptor(ContainerId::ROOT).as_deref(),
        Some("main.view")
    );
}

#[test]
fn scenario_transcript() {
    let (mut app, _layer) = app();
    let transcript = Transcript::attach(&app);

    app.start_activity(MAIN.into()).unwrap();
    app.start_activity_from_parent(NEXT.into(), MAIN).unwrap();
    app.back_pressed().unwrap();
    app.close();

    insta::assert_snapshot!(transcript.render(), @r"
    main: NOT_DEFINED -> CREATED
    main: CREATED -> STARTED
    main: STARTED -> RESUMED
    main/fragments: NOT_DEFINED -> CREATED
    main/fragments: CREATED -> STARTED
    main/fragments: STARTED -> RESUMED
    next: NOT_DEFINED -> CREATED
    main/fragments: RESUMED -> PAUSED
    main: RESUMED -> PAUSED
    next: CREATED -> STARTED
    next: STARTED -> RESUMED
    next/fragments: NOT_DEFINED -> CREATED
    next/fragments: CREATED -> STARTED
    next/fragments: STARTED -> RESUMED
    next/fragments: RESUMED -> PAUSED
    next: RESUMED -> PAUSED
    main: PAUSED -> RESUMED
    main/fragments: PAUSED -> RESUMED
    main/fragments: RESUMED -> STOPPED
    main/fragments: STOPPED -> DESTROYED
    next/fragments: PAUSED -> STOPPED
    next/fragments: STOPPED -> DESTROYED
    main: RESUMED -> STOPPED
    main: STOPPED -> DESTROYED
    next: PAUSED -> STOPPED
    next: STOPPED -> DESTROYED
    ");
}

#[test]
fn stopped_activity_is_restarted_with_its_fragments() {
    let (mut app, _layer) = app();
    let transcript = Transcript::attach(&app);
    app.start_activity(MAIN.into()).unwrap();
    app.replace_fragment(MAIN, BODY, greeting()).unwrap();
    app.start_activity(NEXT.into()).unwrap();
    app.fragment_manager(MAIN).unwrap().on_stop();
    app.activity_mut(MAIN).unwrap().on_stop();
    transcript.clear();

    app.start_activity(MAIN.into()).unwrap();

    insta::assert_snapshot!(transcript.render(), @r"
    next/fragments: RESUMED -> PAUSED
    next: RESUMED -> PAUSED
    main: STOPPED -> STARTED
    main: STARTED -> RESUMED
    main/greeting: STOPPED -> STARTED
    main/fragments: STOPPED -> STARTED
    main/greeting: STARTED -> RESUMED
    main/fragments: STARTED -> RESUMED
    ");
    assert_eq!(app.current_key(), Some(MAIN));
    assert!(app.back_stack().is_empty());
}

#[test]
fn started_activity_is_only_resumed() {
    let (mut app, _layer) = app();
    let transcript = Transcript::attach(&app);
    app.start_activity(MAIN.into()).unwrap();
    app.start_activity(NEXT.into()).unwrap();
    let main = app.activity_mut(MAIN).unwrap();
    main.on_stop();
    main.on_start();
    transcript.clear();

    app.start_activity(MAIN.into()).unwrap();

    insta::assert_snapshot!(transcript.render(), @r"
    next/fragments: RESUMED -> PAUSED
    next: RESUMED -> PAUSED
    main: STARTED -> RESUMED
    main/fragments: PAUSED -> RESUMED
    ");
}

#[test]
fn fragment_manager_created_while_away_is_brought_up_on_return() {
    let (mut app, _layer) = app();
    let transcript = Transcript::attach(&app);
    let late = ActivityKey::new("late");
    let mut activity = Activity::new(late, ());
    activity.on_create();
    activity.on_start();
    activity.on_resume();
    activity.on_pause();
    app.start_activity(MAIN.into()).unwrap();
    app.start_activity(activity.into()).unwrap();
    assert_eq!(app.current_key(), Some(late));
    assert!(app.find_fragment_manager(late).is_none());

    assert_eq!(app.fragment_manager(late).unwrap().state(), State::NotDefined);
    app.start_activity(MAIN.into()).unwrap();
    app.start_activity(late.into()).unwrap();

    let manager = UnitId::FragmentManager { activity: late };
    assert_eq!(app.find_fragment_manager(late).unwrap().state(), State::Resumed);
    assert_eq!(transcript.count(manager, State::Created), 1);
    assert_eq!(transcript.count(manager, State::Started), 1);
    assert_eq!(transcript.count(manager, State::Resumed), 1);
}

#[test]
fn a_key_resolves_to_one_singleton() {
    let (mut app, _layer) = app();
    let transcript = Transcript::attach(&app);

    app.start_activity(MAIN.into()).unwrap();
    let view = app.activity(MAIN).unwrap().content_view().unwrap().id();
    app.start_activity(NEXT.into()).unwrap();
    app.start_activity(MAIN.into()).unwrap();

    assert_eq!(app.activity(MAIN).unwrap().content_view().unwrap().id(), view);
    assert_eq!(transcript.count(activity_unit(MAIN), State::Created), 1);
    assert_eq!(app.registered_activities().count(), 2);
    // Returning to the entry that was pushed pops it.
    assert!(app.back_stack().is_empty());
}

#[test]
fn deeper_navigation_pushes_only_once() {
    let (mut app, _layer) = app();

    app.start_activity(MAIN.into()).unwrap();
    app.start_activity(NEXT.into()).unwrap();
    app.start_activity(WINDOWED.into()).unwrap();

    assert_eq!(app.back_stack(), &[MAIN]);
}

#[test]
fn instance_without_create_is_not_displayed() {
    let (mut app, layer) = app();
    let stray = ActivityKey::new("stray");
    app.start_activity(MAIN.into()).unwrap();

    app.start_activity(Activity::new(stray, ()).into()).unwrap();

    assert_eq!(app.current_key(), Some(MAIN));
    assert_eq!(app.activity(MAIN).unwrap().state(), State::Resumed);
    assert_eq!(
        app.find_fragment_manager(MAIN).unwrap().state(),
        State::Resumed
    );
    assert!(app.activity(stray).is_none());
    assert!(app.back_stack().is_empty());
    assert_eq!(
        layer.shown_descriptor(ContainerId::ROOT).as_deref(),
        Some("main.view")
    );
}

#[test]
fn instance_of_a_registered_key_uses_the_singleton() {
    let (mut app, _layer) = app();
    app.start_activity(MAIN.into()).unwrap();
    let view = app.activity(MAIN).unwrap().content_view().unwrap().id();
    app.start_activity(NEXT.into()).unwrap();

    app.start_activity(Activity::new(MAIN, ()).into()).unwrap();

    assert_eq!(app.current_key(), Some(MAIN));
    assert_eq!(app.activity(MAIN).unwrap().content_view().unwrap().id(), view);
}

#[test]
fn instantiation_failures_keep_the_current_activity() {
    let (mut app, _layer) = app();
    app.start_activity(MAIN.into()).unwrap();

    app.start_activity(BROKEN.into()).unwrap();
    app.start_activity(ActivityKey::new("unregistered").into()).unwrap();

    assert_eq!(app.current_key(), Some(MAIN));
    assert_eq!(app.activity(MAIN).unwrap().state(), State::Resumed);
    assert!(app.activity(BROKEN).is_none());
    assert_eq!(app.registered_activities().count(), 1);
}

#[test]
fn windowed_activity_gets_its_own_window() {
    let (mut app, layer) = app();
    app.start_activity(MAIN.into()).unwrap();

    app.start_activity_from_parent(WINDOWED.into(), MAIN).unwrap();

    assert_eq!(app.current_key(), Some(WINDOWED));
    assert_eq!(layer.open_windows(), vec![WINDOWED]);
    // The shared root keeps showing the main layout.
    assert_eq!(
        layer.shown_descriptor(ContainerId::ROOT).as_deref(),
        Some("main.view")
    );

    app.back_pressed().unwrap();

    assert_eq!(app.current_key(), Some(MAIN));
    assert!(layer.open_windows().is_empty());
    assert!(!app.activity(WINDOWED).unwrap().is_window_open());
}

#[test]
fn windowed_activity_without_view_is_rejected() {
    let (mut app, _layer) = app();
    app.start_activity(MAIN.into()).unwrap();

    let error = app.start_activity(BLANK.into()).unwrap_err();

    assert!(matches!(error, SeekError::InvalidState { .. }));
    assert_eq!(app.current_key(), Some(MAIN));
    assert_eq!(app.activity(MAIN).unwrap().state(), State::Resumed);
}

#[test]
fn failed_queued_request_drops_the_rest_of_the_queue() {
    let (mut app, _layer) = app();
    app.start_activity(MAIN.into()).unwrap();
    app.context().enqueue(Request::StartActivity {
        target: BLANK.into(),
        parent: None,
    });
    app.context().enqueue(Request::StartActivity {
        target: NEXT.into(),
        parent: None,
    });

    assert!(matches!(app.pump(), Err(SeekError::InvalidState { .. })));
    assert_eq!(app.context().pending_requests(), 0);
    assert_eq!(app.current_key(), Some(MAIN));

    app.home_pressed().unwrap();
    assert_eq!(app.current_key(), Some(MAIN));
    assert!(app.activity(NEXT).is_none());
}

#[test]
fn navigation_from_hooks_runs_after_the_transition() {
    let (mut app, layer) = app();

    app.start_activity(SPLASH.into()).unwrap();

    assert_eq!(app.current_key(), Some(MAIN));
    assert_eq!(app.activity(SPLASH).unwrap().state(), State::Paused);
    assert_eq!(app.back_stack(), &[SPLASH]);
    assert_eq!(app.context().pending_requests(), 0);
    assert_eq!(
        layer.shown_descriptor(ContainerId::ROOT).as_deref(),
        Some("main.view")
    );
}

#[test]
fn home_runs_the_home_action_without_a_parent() {
    let (mut app, _layer) = app();
    let pressed = Rc::new(RefCell::new(Vec::new()));
    app.start_activity(MAIN.into()).unwrap();
    let sink = Rc::clone(&pressed);
    app.activity_mut(MAIN)
        .unwrap()
        .set_home_action(move |key| sink.borrow_mut().push(key));

    app.home_pressed().unwrap();
    app.back_pressed().unwrap();

    assert_eq!(*pressed.borrow(), vec![MAIN, MAIN]);
    assert_eq!(app.current_key(), Some(MAIN));
}

#[test]
fn home_as_up_returns_to_the_parent() {
    let (mut app, _layer) = app();
    app.start_activity(MAIN.into()).unwrap();
    app.start_activity_from_parent(NEXT.into(), MAIN).unwrap();

    app.home_pressed().unwrap();

    assert_eq!(app.current_key(), Some(MAIN));
    assert!(app.back_stack().is_empty());
}

#[test]
fn destroyed_activity_is_rebuilt_on_next_navigation() {
    let (mut app, _layer) = app();
    let transcript = Transcript::attach(&app);
    app.start_activity(MAIN.into()).unwrap();
    app.start_activity(NEXT.into()).unwrap();
    app.start_activity(MAIN.into()).unwrap();

    app.destroy_activity(NEXT).unwrap();

    assert!(app.activity(NEXT).is_none());
    assert!(app.find_fragment_manager(NEXT).is_none());
    assert_eq!(transcript.count(activity_unit(NEXT), State::Stopped), 1);
    assert_eq!(transcript.count(activity_unit(NEXT), State::Destroyed), 1);

    app.start_activity(NEXT.into()).unwrap();
    assert_eq!(app.activity(NEXT).unwrap().state(), State::Resumed);
    assert_eq!(transcript.count(activity_unit(NEXT), State::Created), 2);
}

#[test]
fn destroying_an_unknown_activity_is_ignored() {
    let (mut app, _layer) = app();
    app.start_activity(MAIN.into()).unwrap();
    app.destroy_activity(NEXT).unwrap();
    assert_eq!(app.current_key(), Some(MAIN));
}

#[test]
fn main_window_defaults() {
    let (mut app, layer) = app();
    assert!(matches!(app.show(), Err(SeekError::NotInitialized)));

    app.initialize(WindowConfig::default());
    app.show().unwrap();

    let window = layer.main_window().unwrap();
    assert_eq!(window.title, "Seek Application");
    assert_eq!((window.width, window.height), (600.0, 400.0));
    assert!(!window.maximized);
    assert!(layer.is_main_window_shown());
}
