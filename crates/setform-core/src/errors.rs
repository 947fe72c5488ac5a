//! Error types for the stateful layer.
//!
//! Validation failures never appear here: a rejected field value is dialog
//! session state, not an error. These types cover the boundaries (store,
//! renderer, presenter) and facade misuse.

/// Backing store failures. Propagated, never recovered internally.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open settings store '{key}': {source}")]
    OpenFailed {
        key: String,
        source: std::io::Error,
    },

    #[error("Failed to read settings store '{key}': {source}")]
    ReadFailed {
        key: String,
        source: std::io::Error,
    },

    #[error("Failed to write settings store '{key}': {source}")]
    WriteFailed {
        key: String,
        source: std::io::Error,
    },

    #[error("Failed to encode settings store '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

/// Template rendering failure reported by the host's renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render settings template: {message}")]
    Failed { message: String },
}

/// Modal presentation failure reported by the host's presenter.
#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    #[error("Failed to present settings dialog: {message}")]
    Failed { message: String },
}

/// Failures of `SettingsPanel` operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Present(#[from] PresentError),

    #[error("Settings dialog is already open for this panel")]
    DialogBusy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_message_includes_key() {
        let err = StoreError::OpenFailed {
            key: "my-plugin".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("my-plugin"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_settings_error_from_store_error() {
        let store_err = StoreError::ReadFailed {
            key: "k".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let err: SettingsError = store_err.into();
        assert!(matches!(err, SettingsError::Store(_)));
    }
}
