//! Per-Activity coordinator of Fragments.
//!
//! A FragmentManager owns every Fragment ever shown under its Activity and
//! remembers which one is current. It has its own lifecycle, driven by the
//! application alongside the Activity, and forwards it to the current
//! Fragment. Stopping and destroying reach every registered Fragment.

use std::collections::BTreeMap;
use std::fmt;

use crate::activity::ActivityKey;
use crate::context::ApplicationContext;
use crate::error::{Result, SeekError};
use crate::fragment::{Fragment, FragmentKey, FragmentTarget};
use crate::lifecycle::{StateChange, Stateful, UnitId};
use crate::options::StopBroadcast;
use crate::state::State;
use crate::view::ContainerId;

pub struct FragmentManager {
    activity: ActivityKey,
    state: State,
    fragments: BTreeMap<FragmentKey, Fragment>,
    current: Option<FragmentKey>,
    context: ApplicationContext,
    stop_broadcast: StopBroadcast,
}

impl FragmentManager {
    pub fn new(
        activity: ActivityKey,
        context: ApplicationContext,
        stop_broadcast: StopBroadcast,
    ) -> Self {
        Self {
            activity,
            state: State::NotDefined,
            fragments: BTreeMap::new(),
            current: None,
            context,
            stop_broadcast,
        }
    }

    /// Activity this manager belongs to.
    pub fn activity(&self) -> ActivityKey {
        self.activity
    }

    pub fn current_key(&self) -> Option<FragmentKey> {
        self.current
    }

    pub fn current_fragment(&self) -> Option<&Fragment> {
        self.current.and_then(|key| self.fragments.get(&key))
    }

    pub fn fragment(&self, key: FragmentKey) -> Option<&Fragment> {
        self.fragments.get(&key)
    }

    pub fn fragment_mut(&mut self, key: FragmentKey) -> Option<&mut Fragment> {
        self.fragments.get_mut(&key)
    }

    /// Registered fragments, in key order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.values()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Show `fragment` as the only child of `container`.
    ///
    /// The current fragment is paused, the new one is started if it was
    /// created or stopped, then resumed, registered and made current. A
    /// fragment that never went through `on_create` is created first.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the container is not part of the view tree, the
    /// key is not registered, or the fragment is destroyed. `ViewLoad` when
    /// the view layer rejects the swap. The current fragment keeps its state
    /// in both cases.
    pub fn replace_fragment(
        &mut self,
        container: ContainerId,
        fragment: impl Into<FragmentTarget>,
    ) -> Result<()> {
        let target = fragment.into();
        self.validate(container, &target)?;

        let (mut fragment, registered) = match target {
            FragmentTarget::Key(key) => {
                let fragment = self.fragments.remove(&key).ok_or_else(|| {
                    SeekError::invalid_argument(format!("fragment '{key}' is not registered"))
                })?;
                (fragment, true)
            }
            FragmentTarget::Instance(fragment) => match self.fragments.remove(&fragment.key()) {
                Some(existing) => {
                    tracing::debug!(
                        fragment = %existing.key(),
                        "Fragment already registered; showing the registered instance"
                    );
                    (existing, true)
                }
                None => {
                    let mut fragment = *fragment;
                    fragment.bind(self.context.clone());
                    (fragment, false)
                }
            },
        };
        let key = fragment.key();

        if fragment.state() == State::NotDefined {
            fragment.on_create();
        }

        let children = fragment.content_view().cloned().into_iter().collect();
        if let Err(error) = self.context.set_children(container, children) {
            if registered {
                self.fragments.insert(key, fragment);
            }
            return Err(error.into());
        }

        if self.current == Some(key) {
            tracing::debug!(fragment = %key, "Pausing current fragment");
            fragment.on_pause();
        } else if let Some(current) = self.current_fragment_mut() {
            tracing::debug!(fragment = %current.key(), "Pausing current fragment");
            current.on_pause();
        }

        match fragment.state() {
            State::Created => {
                tracing::debug!(fragment = %key, activity = %self.activity, "Attaching and starting fragment");
                fragment.attach(self.activity);
                fragment.on_start();
            }
            State::Stopped => {
                tracing::debug!(fragment = %key, "Restarting fragment");
                fragment.on_start();
            }
            _ => {}
        }
        fragment.on_resume();

        self.fragments.entry(key).or_insert(fragment);
        self.current = Some(key);
        Ok(())
    }

    fn validate(&self, container: ContainerId, target: &FragmentTarget) -> Result<()> {
        if !self.context.has_container(container) {
            return Err(SeekError::invalid_argument(format!(
                "container '{container}' is not part of the view tree"
            )));
        }
        let state = match target {
            FragmentTarget::Key(key) => self
                .fragments
                .get(key)
                .map(Stateful::state)
                .ok_or_else(|| {
                    SeekError::invalid_argument(format!(
                        "fragment '{key}' is not registered under activity '{}'",
                        self.activity
                    ))
                })?,
            FragmentTarget::Instance(fragment) => self
                .fragments
                .get(&fragment.key())
                .map_or(fragment.state(), Stateful::state),
        };
        if state.is_terminal() {
            return Err(SeekError::invalid_argument(format!(
                "fragment '{}' is destroyed",
                target.key()
            )));
        }
        Ok(())
    }

    /// Current fragment, unless it was destroyed.
    fn current_fragment_mut(&mut self) -> Option<&mut Fragment> {
        self.current
            .and_then(|key| self.fragments.get_mut(&key))
            .filter(|fragment| !fragment.state().is_terminal())
    }

    fn set_state(&mut self, to: State) {
        let from = self.state;
        self.state = to;
        tracing::debug!(activity = %self.activity, %from, %to, "FragmentManager state changed");
        self.context.notify(&StateChange {
            unit: UnitId::FragmentManager {
                activity: self.activity,
            },
            from,
            to,
        });
    }
}

impl Stateful for FragmentManager {
    fn state(&self) -> State {
        self.state
    }

    fn on_create(&mut self) {
        self.set_state(State::Created);
    }

    fn on_start(&mut self) {
        if let Some(current) = self.current_fragment_mut() {
            current.on_start();
        }
        self.set_state(State::Started);
    }

    fn on_resume(&mut self) {
        if let Some(current) = self.current_fragment_mut() {
            current.on_resume();
        }
        self.set_state(State::Resumed);
    }

    fn on_pause(&mut self) {
        if let Some(current) = self.current_fragment_mut() {
            if current.state() == State::Resumed {
                current.on_pause();
            }
        }
        self.set_state(State::Paused);
    }

    /// Stops every registered fragment.
    fn on_stop(&mut self) {
        let broadcast = self.stop_broadcast;
        for fragment in self.fragments.values_mut() {
            let state = fragment.state();
            let stop = match broadcast {
                StopBroadcast::Guarded => state != State::Stopped && state != State::Destroyed,
                StopBroadcast::Unconditional => true,
            };
            if stop {
                tracing::debug!(fragment = %fragment.key(), "Stopping fragment");
                fragment.on_stop();
            }
        }
        self.set_state(State::Stopped);
    }

    /// Destroys every registered fragment.
    fn on_destroy(&mut self) {
        for fragment in self.fragments.values_mut() {
            if fragment.state() != State::Destroyed {
                tracing::debug!(fragment = %fragment.key(), "Destroying fragment");
                fragment.on_destroy();
            }
        }
        self.set_state(State::Destroyed);
    }
}

impl fmt::Debug for FragmentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentManager")
            .field("activity", &self.activity)
            .field("state", &self.state)
            .field("current", &self.current)
            .field("fragments", &self.fragments.keys().collect::<Vec<_>>())
            .finish()
    }
}
