//! Activity factories indexed by type key.
//!
//! The host application registers one factory per Activity type at startup.
//! The orchestrator calls a factory the first time its key is navigated to
//! and keeps the instance for the rest of the run.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = ActivityRegistry::new();
//! registry.register(MAIN, || Ok(Activity::new(MAIN, MainActivity::default())));
//! registry.register(NEXT, || Ok(Activity::new(NEXT, NextActivity)));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::activity::{Activity, ActivityKey};
use crate::error::{Result, SeekError};

/// Parameterless constructor of an Activity.
pub type ActivityFactory = Box<dyn Fn() -> Result<Activity>>;

/// Registry of Activity factories.
#[derive(Default)]
pub struct ActivityRegistry {
    factories: HashMap<ActivityKey, ActivityFactory>,
}

impl ActivityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the factory for `key`, replacing any previous one.
    pub fn register(&mut self, key: ActivityKey, factory: impl Fn() -> Result<Activity> + 'static) {
        if self.factories.insert(key, Box::new(factory)).is_some() {
            tracing::debug!(activity = %key, "Replaced activity factory");
        }
    }

    pub fn contains(&self, key: ActivityKey) -> bool {
        self.factories.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered keys, sorted by name.
    pub fn keys(&self) -> Vec<ActivityKey> {
        let mut keys: Vec<_> = self.factories.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Build a fresh instance for `key`.
    ///
    /// # Errors
    ///
    /// `Instantiation` when no factory is registered, the factory fails, or it
    /// builds an Activity with another key.
    pub fn instantiate(&self, key: ActivityKey) -> Result<Activity> {
        let factory = self
            .factories
            .get(&key)
            .ok_or_else(|| SeekError::instantiation(key.name(), "no factory registered"))?;
        let activity = factory().map_err(|error| match error {
            SeekError::Instantiation { .. } => error,
            other => SeekError::instantiation(key.name(), other.to_string()),
        })?;
        if activity.key() != key {
            return Err(SeekError::instantiation(
                key.name(),
                format!("factory built activity '{}'", activity.key()),
            ));
        }
        Ok(activity)
    }
}

impl fmt::Debug for ActivityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
