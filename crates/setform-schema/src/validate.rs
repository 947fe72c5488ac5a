//! Schema validation lint.
//!
//! setform itself never rejects a malformed schema: a broken field renders
//! as an inert control, which is the documented failure mode for caller
//! bugs. Hosts that want to catch authoring mistakes early (in tests, or at
//! startup) run [`validate_schema`] themselves.

use std::collections::BTreeSet;

use crate::errors::SchemaError;
use crate::field::Field;
use crate::kind::FieldKind;

/// Validate a schema, returning the first authoring mistake found.
///
/// # Validation Rules
///
/// - Every interactive field must carry a name
/// - Interactive names must be unique within the schema
/// - Every `Select` field must have at least one option
///
/// Multiple default-flagged options on one select are deliberately accepted:
/// default resolution is defined as last-flagged-wins.
///
/// # Errors
///
/// Returns `SchemaError::MissingName`, `SchemaError::DuplicateName`, or
/// `SchemaError::MissingOptions` for the first offending field.
pub fn validate_schema(schema: &[Field]) -> Result<(), SchemaError> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for (index, field) in schema.iter().enumerate() {
        if !field.kind.is_interactive() {
            continue;
        }

        let name = field.name.as_deref().ok_or_else(|| SchemaError::MissingName {
            index,
            kind: field.kind.to_string(),
        })?;

        if !seen.insert(name) {
            return Err(SchemaError::DuplicateName {
                name: name.to_string(),
            });
        }

        if field.kind == FieldKind::Select && field.options.is_empty() {
            return Err(SchemaError::MissingOptions {
                name: name.to_string(),
            });
        }
    }

    Ok(())
}
