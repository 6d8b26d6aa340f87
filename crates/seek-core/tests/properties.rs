mod common;

use std::collections::HashSet;

use proptest::prelude::*;

use common::{BODY, BROKEN, MAIN, NEXT, SPLASH, Transcript, WINDOWED, app, details, greeting};
use seek_core::{ActivityKey, Context, SeekApplication, State, Stateful, UnitId};

const KEYS: [ActivityKey; 6] = [
    MAIN,
    NEXT,
    WINDOWED,
    SPLASH,
    BROKEN,
    ActivityKey::new("ghost"),
];

#[derive(Debug, Clone)]
enum Op {
    Start(usize),
    StartFromParent(usize, usize),
    Back,
    Home,
    Fragment(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..KEYS.len()).prop_map(Op::Start),
        (0..KEYS.len(), 0..KEYS.len())
            .prop_map(|(target, parent)| Op::StartFromParent(target, parent)),
        Just(Op::Back),
        Just(Op::Home),
        any::<bool>().prop_map(Op::Fragment),
    ]
}

fn apply(app: &mut SeekApplication, op: &Op) -> seek_core::Result<()> {
    match *op {
        Op::Start(target) => app.start_activity(KEYS[target].into()),
        Op::StartFromParent(target, parent) => {
            app.start_activity_from_parent(KEYS[target].into(), KEYS[parent])
        }
        Op::Back => app.back_pressed(),
        Op::Home => app.home_pressed(),
        Op::Fragment(first) => {
            let fragment = if first { greeting() } else { details() };
            app.replace_fragment(MAIN, BODY, fragment)
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn navigation_invariants_hold(ops in prop::collection::vec(op(), 1..40)) {
        let (mut app, _layer) = app();
        let transcript = Transcript::attach(&app);

        for op in &ops {
            let before = app.back_stack().len();
            prop_assert!(apply(&mut app, op).is_ok(), "{op:?} failed");
            let after = app.back_stack().len();

            // At most one entry is pushed or popped per call.
            prop_assert!(before.abs_diff(after) <= 1);
            prop_assert!(after <= 1);

            let resumed: Vec<_> = app
                .registered_activities()
                .filter(|activity| activity.state() == State::Resumed)
                .map(|activity| activity.key())
                .collect();
            prop_assert!(resumed.len() <= 1);
            if let Some(current) = app.current_key() {
                prop_assert_eq!(resumed, vec![current]);
                prop_assert!(!app.back_stack().contains(&current));
            }

            prop_assert!(app
                .registered_activities()
                .all(|activity| activity.state() != State::NotDefined));
            for activity in app.registered_activities() {
                let unit = UnitId::Activity { key: activity.key() };
                prop_assert_eq!(transcript.count(unit, State::Created), 1);
            }
        }
    }

    #[test]
    fn teardown_reaches_every_unit_once(ops in prop::collection::vec(op(), 0..30)) {
        let (mut app, _layer) = app();
        let transcript = Transcript::attach(&app);
        for op in &ops {
            prop_assert!(apply(&mut app, op).is_ok());
        }

        app.close();

        // Fragments report their creation before they are attached.
        let units: HashSet<UnitId> = transcript
            .changes()
            .iter()
            .map(|change| change.unit)
            .filter(|unit| !matches!(unit, UnitId::Fragment { activity: None, .. }))
            .collect();
        for unit in units {
            prop_assert_eq!(transcript.count(unit, State::Stopped), 1, "{} stopped", unit);
            prop_assert_eq!(transcript.count(unit, State::Destroyed), 1, "{} destroyed", unit);
        }
    }
}
