mod common;

use common::{
    BODY, DETAILS, GREETING, MAIN, NEXT, Transcript, WINDOWED, activity_unit, app, app_with,
    details, fragment_unit, greeting,
};
use seek_core::{
    Context, LifecycleOptions, SeekError, State, Stateful, StopBroadcast, Toast, UnitId,
};

#[test]
fn every_unit_is_stopped_and_destroyed_exactly_once() {
    let (mut app, layer) = app();
    let transcript = Transcript::attach(&app);
    app.start_activity(MAIN.into()).unwrap();
    app.replace_fragment(MAIN, BODY, greeting()).unwrap();
    app.replace_fragment(MAIN, BODY, details()).unwrap();
    app.start_activity_from_parent(NEXT.into(), MAIN).unwrap();
    app.start_activity_from_parent(WINDOWED.into(), NEXT).unwrap();

    app.close();
    app.close();

    let units = [
        activity_unit(MAIN),
        activity_unit(NEXT),
        activity_unit(WINDOWED),
        UnitId::FragmentManager { activity: MAIN },
        UnitId::FragmentManager { activity: NEXT },
        UnitId::FragmentManager { activity: WINDOWED },
        fragment_unit(MAIN, GREETING),
        fragment_unit(MAIN, DETAILS),
    ];
    for unit in units {
        assert_eq!(transcript.count(unit, State::Stopped), 1, "{unit} stopped");
        assert_eq!(transcript.count(unit, State::Destroyed), 1, "{unit} destroyed");
    }
    assert!(app.registered_activities().all(|a| a.state() == State::Destroyed));
    assert!(layer.open_windows().is_empty());
    assert!(app.is_closed());
}

#[test]
fn fragment_managers_go_down_before_activities() {
    let (mut app, _layer) = app();
    let transcript = Transcript::attach(&app);
    app.start_activity(MAIN.into()).unwrap();
    app.start_activity(NEXT.into()).unwrap();
    transcript.clear();

    app.close();

    let changes = transcript.changes();
    let last_manager = changes
        .iter()
        .rposition(|change| matches!(change.unit, UnitId::FragmentManager { .. }))
        .unwrap();
    let first_activity = changes
        .iter()
        .position(|change| matches!(change.unit, UnitId::Activity { .. }))
        .unwrap();
    assert!(last_manager < first_activity);
}

#[test]
fn already_stopped_units_are_only_destroyed() {
    let (mut app, _layer) = app();
    let transcript = Transcript::attach(&app);
    app.start_activity(MAIN.into()).unwrap();
    app.replace_fragment(MAIN, BODY, greeting()).unwrap();
    app.fragment_manager(MAIN)
        .unwrap()
        .fragment_mut(GREETING)
        .unwrap()
        .on_stop();

    app.close();

    assert_eq!(transcript.count(fragment_unit(MAIN, GREETING), State::Stopped), 1);
    assert_eq!(transcript.count(fragment_unit(MAIN, GREETING), State::Destroyed), 1);
}

#[test]
fn legacy_broadcast_stops_every_fragment_again() {
    let options = LifecycleOptions {
        stop_broadcast: StopBroadcast::Unconditional,
        ..LifecycleOptions::default()
    };
    let (mut app, _layer) = app_with(options);
    let transcript = Transcript::attach(&app);
    app.start_activity(MAIN.into()).unwrap();
    app.replace_fragment(MAIN, BODY, greeting()).unwrap();
    app.fragment_manager(MAIN)
        .unwrap()
        .fragment_mut(GREETING)
        .unwrap()
        .on_stop();

    app.close();

    assert_eq!(transcript.count(fragment_unit(MAIN, GREETING), State::Stopped), 2);
    assert_eq!(transcript.count(fragment_unit(MAIN, GREETING), State::Destroyed), 1);
}

#[test]
fn close_dismisses_the_toast_and_blocks_navigation() {
    let (mut app, layer) = app();
    app.start_activity(MAIN.into()).unwrap();
    app.show_toast(Toast::make("bye", false, Toast::DURATION_LONG));

    app.close();

    assert!(layer.toast_message().is_none());
    assert!(app.current_key().is_none());
    assert!(app.back_stack().is_empty());
    assert!(matches!(
        app.start_activity(NEXT.into()),
        Err(SeekError::InvalidState { .. })
    ));
    assert!(matches!(app.back_pressed(), Err(SeekError::InvalidState { .. })));
    // Pumping a closed application is harmless.
    app.pump().unwrap();
}
