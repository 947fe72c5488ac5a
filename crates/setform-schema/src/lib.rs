//! # setform-schema
//!
//! Declarative field schemas for setform settings dialogs.
//!
//! A schema is a plain `Vec<Field>` describing the settings a host wants to
//! expose: the field kind, name, display title, default value, optional
//! validator, and (for selects) the option list. This crate is data-only and
//! has no opinion about storage or presentation; `setform-core` consumes it.
//!
//! - [`kind`] - The closed set of field kinds and the template predicate table
//! - [`field`] - `Field`, `SelectOption`, and validator types
//! - [`defaults`] - Effective default resolution over a schema
//! - [`validate`] - Opt-in schema lint for catching authoring mistakes early

pub mod defaults;
pub mod errors;
pub mod field;
pub mod kind;
pub mod validate;

// Public API re-exports
pub use defaults::{SettingsMap, resolve_defaults};
pub use errors::SchemaError;
pub use field::{Field, SelectOption, Validator};
pub use kind::{FieldKind, KindFlags};
pub use validate::validate_schema;
