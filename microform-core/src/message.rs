//! Message trait for values carried through the hook bus.

use crate::value::FieldValue;

/// A marker trait for values and options that flow through hook callbacks.
///
/// Messages must be `Send + Sync + 'static` so a bus can be shared between a
/// host and the capabilities attached to it.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct Payload { name: String }
///
/// impl Message for Payload {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Values dispatched through a HookBus must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

// Common Message implementations
impl Message for () {}
impl Message for String {}
impl Message for &'static str {}
impl Message for i64 {}
impl Message for f64 {}
impl Message for FieldValue {}
impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
