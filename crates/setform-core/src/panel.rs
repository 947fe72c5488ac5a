//! The settings panel facade.
//!
//! One [`SettingsPanel`] is bound to one settings id and owns the cached
//! effective settings for it. Construction seeds and opens the backing
//! store; [`SettingsPanel::present`] runs a full dialog round trip.

use std::sync::Arc;

use tracing::{debug, info, warn};

use setform_schema::{Field, SettingsMap, resolve_defaults};

use crate::errors::{RenderError, SettingsError};
use crate::presenter::{CloseAction, DialogPresenter};
use crate::render::TemplateRenderer;
use crate::session::ValidationSession;
use crate::store::{SettingsStore, StoreProvider};
use crate::view::{DialogView, build_view};

/// How a presentation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    /// The user saved and the store was updated.
    Saved,
    /// The dialog was dismissed, or the save was suppressed; nothing was
    /// written.
    Cancelled,
}

/// Characters not allowed in a storage key, each replaced with `-`.
const KEY_FORBIDDEN: [char; 4] = ['.', '#', '>', '?'];

/// Settings facade bound to one id/namespace.
///
/// The schema is supplied at construction and treated as immutable: the
/// panel only reads it and builds per-presentation copies for rendering.
pub struct SettingsPanel {
    id: String,
    title: String,
    schema: Arc<Vec<Field>>,
    template: String,
    store: Box<dyn SettingsStore>,
    settings: SettingsMap,
    presenting: bool,
}

impl SettingsPanel {
    /// Open (or create) the settings namespace `id`.
    ///
    /// The id is normalized into a safe storage key, the display title is
    /// derived from the id when not given, defaults are resolved from the
    /// schema, and the store is opened seeded with them. The effective
    /// settings are loaded into the cache before returning.
    ///
    /// # Errors
    ///
    /// Fails only when the backing store cannot be opened or read.
    pub fn open(
        id: &str,
        schema: Vec<Field>,
        title: Option<&str>,
        template: impl Into<String>,
        provider: &dyn StoreProvider,
    ) -> Result<Self, SettingsError> {
        let key = sanitize_key(id);
        let title = title.map(str::to_string).unwrap_or_else(|| derive_title(id));

        let defaults = resolve_defaults(&schema);
        let store = provider.open(&key, &defaults)?;

        let mut panel = Self {
            id: key,
            title,
            schema: Arc::new(schema),
            template: template.into(),
            store,
            settings: SettingsMap::new(),
            presenting: false,
        };
        panel.load()?;

        debug!(
            event = "setform.panel.opened",
            panel = %panel.id,
            fields = panel.schema.len(),
            settings = panel.settings.len()
        );

        Ok(panel)
    }

    /// Render the dialog, present it, and commit a valid save.
    ///
    /// Blocks until the presenter reports the dialog closed. On a save
    /// submission with an empty error set the extracted form values replace
    /// the stored set wholesale (keys absent from the form are dropped) and
    /// the cache is reloaded. Every other close path writes nothing.
    ///
    /// # Errors
    ///
    /// `SettingsError::DialogBusy` on re-entrant calls while a dialog is
    /// already open; renderer, presenter, and store failures propagate.
    pub fn present(
        &mut self,
        renderer: &dyn TemplateRenderer,
        presenter: &mut dyn DialogPresenter,
    ) -> Result<PresentOutcome, SettingsError> {
        if self.presenting {
            return Err(SettingsError::DialogBusy);
        }

        self.presenting = true;
        let result = self.present_inner(renderer, presenter);
        self.presenting = false;
        result
    }

    fn present_inner(
        &mut self,
        renderer: &dyn TemplateRenderer,
        presenter: &mut dyn DialogPresenter,
    ) -> Result<PresentOutcome, SettingsError> {
        let view = DialogView {
            id: self.id.clone(),
            title: self.title.clone(),
            fields: build_view(&self.schema, &self.settings),
        };
        let view = serde_json::to_value(&view).map_err(|e| RenderError::Failed {
            message: e.to_string(),
        })?;
        let markup = renderer.render(&self.template, &view)?;

        // Session lifetime == dialog lifetime; the error set dies with it
        let mut session = ValidationSession::new(Arc::clone(&self.schema));
        let submission = presenter.present(&markup, &mut session)?;
        let save_permitted = session.save_permitted();
        let error_fields = session.error_fields();
        drop(session);

        match submission.action {
            CloseAction::Save if save_permitted => {
                let values: SettingsMap = submission.entries.into_iter().collect();
                self.store.set_all(&values)?;
                self.load()?;
                info!(
                    event = "setform.panel.saved",
                    panel = %self.id,
                    values = self.settings.len()
                );
                Ok(PresentOutcome::Saved)
            }
            CloseAction::Save => {
                // The presenter let a save through despite a non-empty error
                // set; the gating invariant holds here regardless.
                warn!(
                    event = "setform.panel.save_suppressed",
                    panel = %self.id,
                    error_fields = ?error_fields
                );
                Ok(PresentOutcome::Cancelled)
            }
            CloseAction::Dismiss(tag) => {
                debug!(event = "setform.panel.cancelled", panel = %self.id, tag = %tag);
                Ok(PresentOutcome::Cancelled)
            }
        }
    }

    /// Current value of one setting; `None` for unknown or never-set names.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.settings.get(name).map(String::as_str)
    }

    /// Snapshot of all effective settings. Returned by value so callers
    /// cannot corrupt the cache.
    pub fn get_all(&self) -> SettingsMap {
        self.settings.clone()
    }

    /// The normalized storage key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display title used in the dialog.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Re-read the backing store into the cache.
    fn load(&mut self) -> Result<(), SettingsError> {
        self.settings = self.store.get_all()?;
        Ok(())
    }
}

fn sanitize_key(id: &str) -> String {
    id.chars()
        .map(|c| if KEY_FORBIDDEN.contains(&c) { '-' } else { c })
        .collect()
}

/// Turn an id into a readable title by blanking out non-word characters.
fn derive_title(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{PresentError, StoreError};
    use crate::presenter::FormSubmission;
    use crate::store::MemoryProvider;

    const TEMPLATE: &str = "<form>{{fields}}</form>";

    struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(&self, template: &str, _view: &serde_json::Value) -> Result<String, RenderError> {
            Ok(template.to_string())
        }
    }

    struct SaveEverything(Vec<(String, String)>);

    impl DialogPresenter for SaveEverything {
        fn present(
            &mut self,
            _markup: &str,
            _session: &mut ValidationSession,
        ) -> Result<FormSubmission, PresentError> {
            Ok(FormSubmission {
                action: CloseAction::Save,
                entries: self.0.clone(),
            })
        }
    }

    struct WriteFailsProvider;

    #[derive(Debug)]
    struct WriteFailsStore;

    impl SettingsStore for WriteFailsStore {
        fn get_all(&self) -> Result<SettingsMap, StoreError> {
            Ok(SettingsMap::new())
        }

        fn set_all(&mut self, _values: &SettingsMap) -> Result<(), StoreError> {
            Err(StoreError::WriteFailed {
                key: "broken".to_string(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    impl StoreProvider for WriteFailsProvider {
        fn open(
            &self,
            _key: &str,
            _seed: &SettingsMap,
        ) -> Result<Box<dyn SettingsStore>, StoreError> {
            Ok(Box::new(WriteFailsStore))
        }
    }

    fn open_panel(schema: Vec<Field>) -> SettingsPanel {
        SettingsPanel::open("org.demo.plugin", schema, Some("Demo"), TEMPLATE, &MemoryProvider::new())
            .unwrap()
    }

    #[test]
    fn test_sanitize_key_replaces_forbidden_characters() {
        assert_eq!(sanitize_key("org.demo#a>b?c"), "org-demo-a-b-c");
        assert_eq!(sanitize_key("plain_id"), "plain_id");
    }

    #[test]
    fn test_derive_title_blanks_non_word_characters() {
        assert_eq!(derive_title("org.demo.plugin"), "org demo plugin");
        assert_eq!(derive_title("my_plugin"), "my_plugin");
    }

    #[test]
    fn test_open_uses_derived_title_when_none_given() {
        let panel = SettingsPanel::open(
            "org.demo",
            vec![],
            None,
            TEMPLATE,
            &MemoryProvider::new(),
        )
        .unwrap();
        assert_eq!(panel.title(), "org demo");
        assert_eq!(panel.id(), "org-demo");
    }

    #[test]
    fn test_defaults_visible_immediately_after_construction() {
        let panel = open_panel(vec![Field::input("a_text").default_value("Some value")]);
        assert_eq!(panel.get("a_text"), Some("Some value"));
        let all = panel.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all.get("a_text").map(String::as_str), Some("Some value"));
    }

    #[test]
    fn test_get_unknown_name_is_none() {
        let panel = open_panel(vec![Field::input("a_text")]);
        assert_eq!(panel.get("a_text"), None);
        assert_eq!(panel.get("nope"), None);
    }

    #[test]
    fn test_get_all_returns_detached_copy() {
        let panel = open_panel(vec![Field::input("a").default_value("1")]);
        let mut snapshot = panel.get_all();
        snapshot.insert("a".to_string(), "tampered".to_string());
        assert_eq!(panel.get("a"), Some("1"));
    }

    #[test]
    fn test_store_write_failure_propagates_from_present() {
        let mut panel = SettingsPanel::open(
            "broken",
            vec![Field::input("a")],
            None,
            TEMPLATE,
            &WriteFailsProvider,
        )
        .unwrap();

        let mut presenter = SaveEverything(vec![("a".to_string(), "1".to_string())]);
        let result = panel.present(&EchoRenderer, &mut presenter);
        assert!(matches!(
            result.unwrap_err(),
            SettingsError::Store(StoreError::WriteFailed { .. })
        ));
    }

    #[test]
    fn test_busy_guard_clears_after_failed_presentation() {
        let mut panel = SettingsPanel::open(
            "broken",
            vec![Field::input("a")],
            None,
            TEMPLATE,
            &WriteFailsProvider,
        )
        .unwrap();

        let mut presenter = SaveEverything(vec![("a".to_string(), "1".to_string())]);
        assert!(panel.present(&EchoRenderer, &mut presenter).is_err());
        // The guard was released on the error path; a second call reaches
        // the store again instead of failing with DialogBusy
        let second = panel.present(&EchoRenderer, &mut presenter);
        assert!(matches!(second.unwrap_err(), SettingsError::Store(_)));
    }

    #[test]
    fn test_sequential_presentations_allowed() {
        let mut panel = open_panel(vec![Field::input("a")]);
        let mut presenter = SaveEverything(vec![("a".to_string(), "1".to_string())]);
        assert!(panel.present(&EchoRenderer, &mut presenter).is_ok());
        let mut presenter = SaveEverything(vec![("a".to_string(), "2".to_string())]);
        assert!(panel.present(&EchoRenderer, &mut presenter).is_ok());
        assert_eq!(panel.get("a"), Some("2"));
    }
}
