//! Per-presentation validation state.
//!
//! A [`ValidationSession`] exists for exactly one open dialog: created when
//! the controls are bound, dropped when they are torn down. The error set
//! lives inside the session value, so errors cannot leak into the next
//! presentation.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use setform_schema::Field;

/// Result of validating one committed field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Value accepted; the presenter should clear any error affordance.
    Valid,
    /// Value rejected; the presenter should flag the control.
    Invalid,
}

/// Tracks which fields currently fail validation while a dialog is open.
pub struct ValidationSession {
    schema: Arc<Vec<Field>>,
    errors: BTreeSet<String>,
}

impl ValidationSession {
    pub fn new(schema: Arc<Vec<Field>>) -> Self {
        Self {
            schema,
            errors: BTreeSet::new(),
        }
    }

    /// Validate a committed field value.
    ///
    /// Looks up the field by name and runs its validator. A `false` return
    /// puts the field into the error set; `true`, a missing validator, or an
    /// unknown name clears it. Validators are pure predicates; one that
    /// panics is a caller bug and is not caught here.
    pub fn field_edited(&mut self, name: &str, value: &str) -> FieldStatus {
        let validator = self
            .schema
            .iter()
            .find(|field| field.name.as_deref() == Some(name))
            .and_then(|field| field.validator.as_ref());

        let accepted = match validator {
            Some(validator) => validator(value),
            None => true,
        };

        if accepted {
            self.errors.remove(name);
            debug!(
                event = "setform.session.field_valid",
                field = %name,
                error_count = self.errors.len()
            );
            FieldStatus::Valid
        } else {
            self.errors.insert(name.to_string());
            debug!(
                event = "setform.session.field_invalid",
                field = %name,
                error_count = self.errors.len()
            );
            FieldStatus::Invalid
        }
    }

    /// Whether a save may proceed right now: true iff no field is in error.
    pub fn save_permitted(&self) -> bool {
        self.errors.is_empty()
    }

    /// Names of the fields currently failing validation.
    pub fn error_fields(&self) -> Vec<String> {
        self.errors.iter().cloned().collect()
    }
}
