//! setform-core: schema-driven settings dialogs for host applications
//!
//! Given a declarative schema (from `setform-schema`), this crate resolves
//! effective defaults, merges persisted values into a render-ready view
//! model, tracks per-field validation errors across a dialog session, and
//! persists only syntactically valid values back to a key-value store.
//!
//! The host supplies the boundaries as trait objects: a [`StoreProvider`]
//! for persistence, a [`TemplateRenderer`] for markup, and a
//! [`DialogPresenter`] for the modal itself. [`SettingsPanel`] orchestrates
//! load → present → validate → save → reload across them.
//!
//! # Main Entry Points
//!
//! - [`SettingsPanel`] - The facade a host constructs per settings namespace
//! - [`store`] - Store traits plus in-memory and JSON-file backends
//! - [`session`] - Per-presentation validation state
//! - [`view`] - View-model construction

pub mod errors;
pub mod panel;
pub mod presenter;
pub mod render;
pub mod session;
pub mod store;
pub mod view;

// Re-export schema types so hosts can depend on setform-core alone
pub use setform_schema::{
    Field, FieldKind, KindFlags, SchemaError, SelectOption, SettingsMap, Validator,
    resolve_defaults, validate_schema,
};

pub use errors::{PresentError, RenderError, SettingsError, StoreError};
pub use panel::{PresentOutcome, SettingsPanel};
pub use presenter::{CloseAction, DialogPresenter, FormSubmission};
pub use render::TemplateRenderer;
pub use session::{FieldStatus, ValidationSession};
pub use store::{JsonFileProvider, MemoryProvider, SettingsStore, StoreProvider};
pub use view::{DialogView, ViewField, ViewOption, build_view};
