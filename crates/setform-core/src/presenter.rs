//! Modal presenter boundary.
//!
//! The presenter owns the window/dialog mechanism. While the dialog is open
//! it drives the [`ValidationSession`] it was handed: every field-level
//! edit-commit goes through [`ValidationSession::field_edited`] (flagging
//! the control on [`FieldStatus::Invalid`]), and the save affordance must
//! stay inert while [`ValidationSession::save_permitted`] is false. On close
//! it reports the outcome together with the extracted form values.
//!
//! [`FieldStatus::Invalid`]: crate::session::FieldStatus::Invalid
//! [`ValidationSession::field_edited`]: crate::session::ValidationSession::field_edited
//! [`ValidationSession::save_permitted`]: crate::session::ValidationSession::save_permitted

use crate::errors::PresentError;
use crate::session::ValidationSession;

/// How the dialog was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseAction {
    /// The designated save action.
    Save,
    /// Any other close path (cancel button, escape, window close, ...),
    /// carrying the presenter's result tag. Always treated as cancel.
    Dismiss(String),
}

/// Outcome of one dialog presentation.
#[derive(Debug, Clone)]
pub struct FormSubmission {
    pub action: CloseAction,
    /// `(name, value)` pairs of every interactive control at close time, in
    /// form order. Meaningful only for [`CloseAction::Save`].
    pub entries: Vec<(String, String)>,
}

/// Blocking modal dialog supplied by the host.
///
/// `present` returns once the user closes the dialog; the panel facade
/// treats the call as the cooperative suspend of the whole presentation.
pub trait DialogPresenter {
    fn present(
        &mut self,
        markup: &str,
        session: &mut ValidationSession,
    ) -> Result<FormSubmission, PresentError>;
}
