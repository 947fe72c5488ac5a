//! View-model construction.
//!
//! Merges stored values over the schema into fresh, serializable structures.
//! The caller's schema is never aliased or mutated; each presentation builds
//! its own view and discards it after rendering.

use serde::Serialize;

use setform_schema::{Field, FieldKind, KindFlags, SettingsMap};

/// One option of a select field, with the current selection marked.
#[derive(Debug, Clone, Serialize)]
pub struct ViewOption {
    pub title: String,
    pub value: String,
    pub selected: bool,
}

/// One render-ready field.
#[derive(Debug, Clone, Serialize)]
pub struct ViewField {
    pub kind: FieldKind,
    #[serde(flatten)]
    pub flags: KindFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Current value for scalar fields: the stored value when present,
    /// otherwise the schema default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ViewOption>,
}

/// The serializable root handed to the template renderer.
#[derive(Debug, Clone, Serialize)]
pub struct DialogView {
    pub id: String,
    pub title: String,
    pub fields: Vec<ViewField>,
}

/// Build the view model for a schema and the current effective settings.
///
/// For selects, `selected` is set on every option whose value equals the
/// stored value; with no stored value or no matching option, nothing is
/// selected and the presentation layer must tolerate that.
pub fn build_view(schema: &[Field], settings: &SettingsMap) -> Vec<ViewField> {
    schema
        .iter()
        .map(|field| {
            let stored = field
                .name
                .as_deref()
                .and_then(|name| settings.get(name))
                .map(String::as_str);

            let (value, options) = match field.kind {
                FieldKind::Select => {
                    let options = field
                        .options
                        .iter()
                        .map(|option| ViewOption {
                            title: option.title.clone(),
                            value: option.value.clone(),
                            selected: stored == Some(option.value.as_str()),
                        })
                        .collect();
                    (None, options)
                }
                kind if kind.is_interactive() => {
                    let value = stored
                        .map(str::to_string)
                        .or_else(|| field.default.clone());
                    (value, Vec::new())
                }
                _ => (None, Vec::new()),
            };

            ViewField {
                kind: field.kind,
                flags: field.kind.flags(),
                name: field.name.clone(),
                title: field.title.clone(),
                value,
                options,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use setform_schema::SelectOption;

    fn settings(pairs: &[(&str, &str)]) -> SettingsMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn select_field() -> Field {
        Field::select(
            "a_select",
            vec![
                SelectOption::new("One", "one"),
                SelectOption::new("Two", "two").default(),
                SelectOption::new("Three", "three"),
            ],
        )
        .title("Pick your choice")
    }

    #[test]
    fn test_stored_value_injected_for_input() {
        let schema = vec![Field::input("a_text").default_value("Some value")];
        let view = build_view(&schema, &settings(&[("a_text", "edited")]));
        assert_eq!(view[0].value.as_deref(), Some("edited"));
    }

    #[test]
    fn test_default_shown_when_no_stored_value() {
        let schema = vec![Field::input("a_text").default_value("Some value")];
        let view = build_view(&schema, &SettingsMap::new());
        assert_eq!(view[0].value.as_deref(), Some("Some value"));
    }

    #[test]
    fn test_no_value_without_default_or_stored() {
        let schema = vec![Field::input("a_text")];
        let view = build_view(&schema, &SettingsMap::new());
        assert!(view[0].value.is_none());
    }

    #[test]
    fn test_select_marks_exactly_stored_option() {
        let schema = vec![select_field()];
        let view = build_view(&schema, &settings(&[("a_select", "two")]));
        let selected: Vec<&str> = view[0]
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, ["two"]);
    }

    #[test]
    fn test_select_with_unmatched_stored_value_marks_nothing() {
        let schema = vec![select_field()];
        let view = build_view(&schema, &settings(&[("a_select", "missing")]));
        assert!(view[0].options.iter().all(|o| !o.selected));
    }

    #[test]
    fn test_select_without_stored_value_marks_nothing() {
        let schema = vec![select_field()];
        let view = build_view(&schema, &SettingsMap::new());
        assert!(view[0].options.iter().all(|o| !o.selected));
    }

    #[test]
    fn test_schema_not_mutated_by_build() {
        let schema = vec![select_field()];
        let _ = build_view(&schema, &settings(&[("a_select", "three")]));
        // The schema's own option flags are untouched by selection marking
        assert!(schema[0].options[1].default);
        assert!(!schema[0].options[2].default);
    }

    #[test]
    fn test_non_interactive_fields_pass_through() {
        let schema = vec![Field::text("Read me"), Field::separator()];
        let view = build_view(&schema, &SettingsMap::new());
        assert_eq!(view[0].title.as_deref(), Some("Read me"));
        assert!(view[0].value.is_none());
        assert_eq!(view[1].kind, FieldKind::Separator);
    }

    #[test]
    fn test_view_serializes_with_flat_kind_flags() {
        let schema = vec![select_field()];
        let view = DialogView {
            id: "demo".to_string(),
            title: "Demo".to_string(),
            fields: build_view(&schema, &SettingsMap::new()),
        };
        let value = serde_json::to_value(&view).unwrap();
        let field = &value["fields"][0];
        assert_eq!(field["select"], true);
        assert_eq!(field["input"], false);
        assert_eq!(field["options"][0]["selected"], false);
    }
}
