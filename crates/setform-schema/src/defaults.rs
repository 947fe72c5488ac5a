//! Effective default resolution.
//!
//! Folds a schema into the map of author-supplied defaults. The result is
//! what seeds a fresh backing store: stored values always override it, so
//! resolution runs once per panel construction and never again.

use std::collections::BTreeMap;

use tracing::debug;

use crate::field::Field;
use crate::kind::FieldKind;

/// Resolved current values, keyed by field name.
///
/// Values are strings on the wire; numeric or boolean interpretation is up
/// to validators and callers.
pub type SettingsMap = BTreeMap<String, String>;

/// Compute the default value map for a schema.
///
/// - `Select` fields take the value of the default-flagged option; when
///   several options are flagged the last one in declaration order wins.
/// - Other interactive fields contribute their `default` attribute, if any.
/// - Non-interactive fields and fields without a default contribute nothing.
///
/// Defaults are trusted as author-supplied and are not validated.
pub fn resolve_defaults(schema: &[Field]) -> SettingsMap {
    let mut defaults = SettingsMap::new();

    for field in schema {
        let Some(name) = field.name.as_deref() else {
            continue;
        };

        match field.kind {
            FieldKind::Select => {
                for option in &field.options {
                    if option.default {
                        // Last flagged option wins
                        defaults.insert(name.to_string(), option.value.clone());
                    }
                }
            }
            kind if kind.is_interactive() => {
                if let Some(default) = &field.default {
                    defaults.insert(name.to_string(), default.clone());
                }
            }
            _ => {}
        }
    }

    debug!(
        event = "setform.schema.defaults_resolved",
        fields = schema.len(),
        defaults = defaults.len()
    );

    defaults
}
