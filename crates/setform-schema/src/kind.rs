//! The closed set of supported field kinds.
//!
//! Templating layers branch on a per-field predicate ("is this field a
//! select?") to pick a control widget. Instead of ad hoc string comparison,
//! the kind is a tagged enum and the predicate set is a fixed flag table
//! ([`KindFlags`]) derived from it once per field.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of a settings field, deciding which control the dialog renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Checkbox control.
    Boolean,
    /// Free-form text input.
    Input,
    /// Drop-down with a fixed option list.
    Select,
    /// Horizontal rule, purely visual.
    Separator,
    /// Static descriptive text, purely visual.
    Text,
}

impl FieldKind {
    /// All supported kinds, in declaration order.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Boolean,
        FieldKind::Input,
        FieldKind::Select,
        FieldKind::Separator,
        FieldKind::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Input => "input",
            FieldKind::Select => "select",
            FieldKind::Separator => "separator",
            FieldKind::Text => "text",
        }
    }

    /// Whether fields of this kind carry a name and a value.
    ///
    /// Non-interactive kinds (`Separator`, `Text`) never appear in persisted
    /// state and are never validated.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, FieldKind::Separator | FieldKind::Text)
    }

    /// The template predicate flags for this kind.
    pub fn flags(&self) -> KindFlags {
        KindFlags {
            boolean: *self == FieldKind::Boolean,
            input: *self == FieldKind::Input,
            select: *self == FieldKind::Select,
            separator: *self == FieldKind::Separator,
            text: *self == FieldKind::Text,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(FieldKind::Boolean),
            "input" => Ok(FieldKind::Input),
            "select" => Ok(FieldKind::Select),
            "separator" => Ok(FieldKind::Separator),
            "text" => Ok(FieldKind::Text),
            other => Err(format!("Unknown field kind '{other}'")),
        }
    }
}

/// One boolean per supported kind, exactly one set.
///
/// Serialized flat into each view-model field so a template engine can pick
/// the control with plain conditional sections, no type logic of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindFlags {
    pub boolean: bool,
    pub input: bool,
    pub select: bool,
    pub separator: bool,
    pub text: bool,
}
