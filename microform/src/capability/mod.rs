//! Optional behavior attached to a form through its [`FormApi`].
//!
//! A capability owns its own state and registers filters or actions on the
//! form's bus when the host connects it. The host knows nothing about what
//! a capability does.
//!
//! - [`Validation`]: rule-based field and submit validation
//! - [`Translation`]: locale-scoped labels and texts
//! - [`RemoteDefinition`]: a JSON bundle carrying a definition, rules and messages

mod i18n;
mod remote;
mod validate;

pub use i18n::Translation;
pub use remote::{DEFAULT_REMOTE_SCOPE, RemoteDefinition};
pub use validate::Validation;

use crate::api::FormApi;
use microform_core::MicroformError;

/// Something a form host can connect.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a form capability",
    label = "missing `Capability` implementation",
    note = "Capabilities implement `attach` and register their callbacks through the `FormApi`."
)]
pub trait Capability: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Registers this capability's callbacks.
    fn attach(&self, api: &FormApi) -> Result<(), MicroformError>;
}
