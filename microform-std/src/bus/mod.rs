//! The hook bus: named actions and filters with priority ordering.
//!
//! Subscribers run in ascending priority; equal priorities run in
//! registration order. Filters fold: each receives the previous filter's
//! output. The first callback error aborts the chain and is returned to the
//! caller.
//!
//! Registration takes `&self`, so a bus can be shared behind an `Arc`
//! between a host and the capabilities attached to it. Dispatch copies the
//! subscriber list before running any callback and never holds the lock
//! while a callback runs, so callbacks may register or remove subscribers
//! without affecting the dispatch in progress.

mod registry;

pub use registry::HookTable;

use microform_core::{Action, ActionRef, Filter, FilterRef, HookError, Message};
use parking_lot::RwLock;

/// A per-form registry of actions and filters.
///
/// # Example
///
/// ```rust
/// use microform_std::bus::HookBus;
/// use microform_core::{Callback, DEFAULT_PRIORITY};
///
/// let bus = HookBus::<String>::new();
/// let shout = Callback::filter(|v: String, _: &String| Ok(v.to_uppercase()));
/// bus.add_filter("title", &shout, DEFAULT_PRIORITY);
///
/// let out = bus.apply_filters("title", "hello".into(), &String::new()).unwrap();
/// assert_eq!(out, "HELLO");
///
/// bus.remove_filter("title", &shout);
/// let out = bus.apply_filters("title", "hello".into(), &String::new()).unwrap();
/// assert_eq!(out, "hello");
/// ```
pub struct HookBus<V: Message> {
    actions: RwLock<HookTable<dyn Action<V>>>,
    filters: RwLock<HookTable<dyn Filter<V>>>,
}

impl<V: Message> HookBus<V> {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            actions: RwLock::new(HookTable::new()),
            filters: RwLock::new(HookTable::new()),
        }
    }

    /// Register an action under `tag`. Duplicates coexist.
    pub fn add_action(&self, tag: &str, callback: &ActionRef<V>, priority: i32) {
        #[cfg(feature = "tracing")]
        tracing::debug!(tag, priority, "action registered");
        self.actions.write().add(tag, callback.clone(), priority);
    }

    /// Register a filter under `tag`. Duplicates coexist.
    pub fn add_filter(&self, tag: &str, callback: &FilterRef<V>, priority: i32) {
        #[cfg(feature = "tracing")]
        tracing::debug!(tag, priority, "filter registered");
        self.filters.write().add(tag, callback.clone(), priority);
    }

    /// Remove every registration of `callback` under `tag`.
    ///
    /// Unknown tags and callbacks are ignored.
    pub fn remove_action(&self, tag: &str, callback: &ActionRef<V>) {
        let _removed = self.actions.write().remove(tag, callback);
        #[cfg(feature = "tracing")]
        tracing::debug!(tag, removed = _removed, "action removed");
    }

    /// Remove every registration of `callback` under `tag`.
    ///
    /// Unknown tags and callbacks are ignored.
    pub fn remove_filter(&self, tag: &str, callback: &FilterRef<V>) {
        let _removed = self.filters.write().remove(tag, callback);
        #[cfg(feature = "tracing")]
        tracing::debug!(tag, removed = _removed, "filter removed");
    }

    /// Run every action under `tag` with `options`.
    ///
    /// Does nothing if `tag` has no actions.
    pub fn run_action(&self, tag: &str, options: &V) -> Result<(), HookError> {
        let subscribers = self.actions.read().snapshot(tag);
        #[cfg(feature = "tracing")]
        tracing::trace!(tag, subscribers = subscribers.len(), "running actions");

        for action in &subscribers {
            action.get().run(options).map_err(|err| {
                #[cfg(feature = "tracing")]
                tracing::warn!(tag, error = %err, "action failed, aborting chain");
                HookError::callback(tag, err)
            })?;
        }
        Ok(())
    }

    /// Fold `value` through every filter under `tag`.
    ///
    /// Returns `value` unchanged if `tag` has no filters.
    pub fn apply_filters(&self, tag: &str, value: V, options: &V) -> Result<V, HookError> {
        let subscribers = self.filters.read().snapshot(tag);
        #[cfg(feature = "tracing")]
        tracing::trace!(tag, subscribers = subscribers.len(), "applying filters");

        subscribers.iter().try_fold(value, |acc, filter| {
            filter.get().apply(acc, options).map_err(|err| {
                #[cfg(feature = "tracing")]
                tracing::warn!(tag, error = %err, "filter failed, aborting chain");
                HookError::callback(tag, err)
            })
        })
    }

    /// Returns `true` if `tag` has at least one action.
    pub fn has_actions(&self, tag: &str) -> bool {
        self.action_count(tag) > 0
    }

    /// Returns `true` if `tag` has at least one filter.
    pub fn has_filters(&self, tag: &str) -> bool {
        self.filter_count(tag) > 0
    }

    /// Number of action registrations under `tag`.
    pub fn action_count(&self, tag: &str) -> usize {
        self.actions.read().count(tag)
    }

    /// Number of filter registrations under `tag`.
    pub fn filter_count(&self, tag: &str) -> usize {
        self.filters.read().count(tag)
    }

    /// Drop every action and filter under `tag`.
    pub fn clear(&self, tag: &str) {
        self.actions.write().clear(tag);
        self.filters.write().clear(tag);
    }
}

impl<V: Message> Default for HookBus<V> {
    fn default() -> Self {
        Self::new()
    }
}
