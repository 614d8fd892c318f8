//! # Hook callbacks
//!
//! The two interception styles of the hook bus:
//!
//! - [`Action`]: invoked for side effects only.
//! - [`Filter`]: receives a value and returns a (possibly transformed) value;
//!   filters on one tag compose as a fold.
//!
//! Callbacks are registered and removed through [`Callback`] handles. A
//! handle is a shared pointer, and two handles refer to the same callback
//! exactly when they were cloned from one another. That identity is what
//! removal matches on.

use crate::{error::BoxError, message::Message};
use std::{fmt, sync::Arc};

/// Priority used when a caller does not pick one.
///
/// Lower priorities run first.
pub const DEFAULT_PRIORITY: i32 = 10;

/// A side-effecting callback.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Action<{V}>`",
    label = "missing `Action` implementation",
    note = "Actions must implement `run` for the option type `{V}`, or be a closure `Fn(&{V}) -> Result<(), BoxError>`."
)]
pub trait Action<V: Message>: Send + Sync + 'static {
    /// Called when the tag the action is registered under runs.
    fn run(&self, options: &V) -> Result<(), BoxError>;
}

/// A value-transforming callback.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Filter<{V}>`",
    label = "missing `Filter` implementation",
    note = "Filters must implement `apply` for the value type `{V}`, or be a closure `Fn({V}, &{V}) -> Result<{V}, BoxError>`."
)]
pub trait Filter<V: Message>: Send + Sync + 'static {
    /// Receives the previous filter's output and returns the next value.
    fn apply(&self, value: V, options: &V) -> Result<V, BoxError>;
}

// Blanket implementations: plain closures are callbacks.
impl<V, F> Action<V> for F
where
    V: Message,
    F: Fn(&V) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn run(&self, options: &V) -> Result<(), BoxError> {
        self(options)
    }
}

impl<V, F> Filter<V> for F
where
    V: Message,
    F: Fn(V, &V) -> Result<V, BoxError> + Send + Sync + 'static,
{
    fn apply(&self, value: V, options: &V) -> Result<V, BoxError> {
        self(value, options)
    }
}

/// A shared handle to a registered callback.
///
/// Cloning is cheap and keeps identity; see [`Callback::same`].
pub struct Callback<C: ?Sized>(Arc<C>);

/// Handle to an [`Action`].
pub type ActionRef<V> = Callback<dyn Action<V>>;

/// Handle to a [`Filter`].
pub type FilterRef<V> = Callback<dyn Filter<V>>;

impl<C: ?Sized> Callback<C> {
    /// Returns `true` if both handles point at the same callback.
    pub fn same(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    /// Borrows the callback.
    pub fn get(&self) -> &C {
        &self.0
    }
}

impl<V: Message> Callback<dyn Action<V>> {
    /// Wraps a closure as an action.
    pub fn action<F>(f: F) -> Self
    where
        F: Fn(&V) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wraps an [`Action`] implementation.
    pub fn from_action<A: Action<V>>(action: A) -> Self {
        Self(Arc::new(action))
    }
}

impl<V: Message> Callback<dyn Filter<V>> {
    /// Wraps a closure as a filter.
    pub fn filter<F>(f: F) -> Self
    where
        F: Fn(V, &V) -> Result<V, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wraps a [`Filter`] implementation.
    pub fn from_filter<T: Filter<V>>(filter: T) -> Self {
        Self(Arc::new(filter))
    }
}

impl<C: ?Sized> Clone for Callback<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C: ?Sized> PartialEq for Callback<C> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<C: ?Sized> Eq for Callback<C> {}

impl<C: ?Sized> fmt::Debug for Callback<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}
