//! Template renderer boundary.

use serde_json::Value;

use crate::errors::RenderError;

/// Pure markup renderer supplied by the host.
///
/// The view is handed over as JSON so the engine stays opaque; it must
/// support conditional sections driven by the five kind flags present on
/// every field (`boolean`, `input`, `select`, `separator`, `text`).
pub trait TemplateRenderer {
    fn render(&self, template: &str, view: &Value) -> Result<String, RenderError>;
}
