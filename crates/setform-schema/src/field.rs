//! Field schema types.
//!
//! A schema is a `Vec<Field>` in display order. Fields are built with the
//! per-kind constructors and chainable setters:
//!
//! ```
//! use setform_schema::{Field, SelectOption};
//!
//! let schema = vec![
//!     Field::text("Configure the demo plugin"),
//!     Field::separator(),
//!     Field::input("executable")
//!         .title("Path to executable")
//!         .default_value("/usr/local/bin/karma"),
//!     Field::select(
//!         "channel",
//!         vec![
//!             SelectOption::new("Stable", "stable").default(),
//!             SelectOption::new("Nightly", "nightly"),
//!         ],
//!     ),
//! ];
//! ```

use std::sync::Arc;

use crate::kind::FieldKind;

/// Per-field validation predicate.
///
/// Receives the raw string value the user committed and returns `true` when
/// it is acceptable. Validators are expected to be pure; a panicking
/// validator is a caller bug and is not caught anywhere in setform.
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// One entry of a select field's option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Display label.
    pub title: String,
    /// The value persisted when this option is chosen.
    pub value: String,
    /// Whether this option supplies the field default.
    pub default: bool,
}

impl SelectOption {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            default: false,
        }
    }

    /// Flag this option as the field default.
    ///
    /// When several options in one field are flagged, the last one in
    /// declaration order wins during default resolution.
    pub fn default(mut self) -> Self {
        self.default = true;
        self
    }
}

/// Declarative description of one configurable setting.
///
/// Interactive kinds (`Boolean`, `Input`, `Select`) carry a `name` that keys
/// their persisted value. Non-interactive kinds (`Separator`, `Text`) are
/// presentation-only: no name, never persisted, never validated.
#[derive(Clone)]
pub struct Field {
    pub kind: FieldKind,
    pub name: Option<String>,
    pub title: Option<String>,
    pub default: Option<String>,
    pub validator: Option<Validator>,
    pub options: Vec<SelectOption>,
}

impl Field {
    fn new(kind: FieldKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            title: None,
            default: None,
            validator: None,
            options: Vec::new(),
        }
    }

    /// A checkbox field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Boolean, Some(name.into()))
    }

    /// A free-form text input field.
    pub fn input(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Input, Some(name.into()))
    }

    /// A drop-down field with a fixed option list.
    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut field = Self::new(FieldKind::Select, Some(name.into()));
        field.options = options;
        field
    }

    /// A purely visual horizontal rule.
    pub fn separator() -> Self {
        Self::new(FieldKind::Separator, None)
    }

    /// A purely visual block of descriptive text.
    pub fn text(title: impl Into<String>) -> Self {
        let mut field = Self::new(FieldKind::Text, None);
        field.title = Some(title.into());
        field
    }

    /// Set the display label shown next to the control.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the default value recorded when no stored value exists yet.
    ///
    /// Ignored for `Select` fields; their default comes from the
    /// default-flagged option.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attach a validation predicate, run on every edit-commit.
    pub fn validator(mut self, validator: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("title", &self.title)
            .field("default", &self.default)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_builder() {
        let field = Field::input("a_text")
            .title("A simple text input")
            .default_value("Some value");
        assert_eq!(field.kind, FieldKind::Input);
        assert_eq!(field.name.as_deref(), Some("a_text"));
        assert_eq!(field.title.as_deref(), Some("A simple text input"));
        assert_eq!(field.default.as_deref(), Some("Some value"));
        assert!(field.validator.is_none());
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_select_builder_keeps_option_order() {
        let field = Field::select(
            "a_select",
            vec![
                SelectOption::new("One", "one"),
                SelectOption::new("Two", "two").default(),
                SelectOption::new("Three", "three"),
            ],
        );
        assert_eq!(field.kind, FieldKind::Select);
        let values: Vec<&str> = field.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["one", "two", "three"]);
        assert!(field.options[1].default);
        assert!(!field.options[0].default);
    }

    #[test]
    fn test_non_interactive_builders_have_no_name() {
        assert!(Field::separator().name.is_none());
        let text = Field::text("Some explanation");
        assert!(text.name.is_none());
        assert_eq!(text.title.as_deref(), Some("Some explanation"));
    }

    #[test]
    fn test_validator_is_invoked() {
        let field = Field::input("a_number").validator(|value| value.parse::<i64>().is_ok());
        let validator = field.validator.as_ref().unwrap();
        assert!(validator("42"));
        assert!(!validator("abc"));
    }

    #[test]
    fn test_field_clone_shares_validator() {
        let field = Field::input("a").validator(|v| !v.is_empty());
        let cloned = field.clone();
        assert!(cloned.validator.as_ref().unwrap()("x"));
    }

    #[test]
    fn test_debug_hides_validator_body() {
        let field = Field::input("a").validator(|_| true);
        let debug = format!("{field:?}");
        assert!(debug.contains("<fn>"));
    }
}
