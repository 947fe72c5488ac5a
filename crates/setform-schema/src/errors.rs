#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Field #{index} ({kind}) is interactive but has no name")]
    MissingName { index: usize, kind: String },

    #[error("Duplicate field name '{name}'")]
    DuplicateName { name: String },

    #[error("Select field '{name}' has no options")]
    MissingOptions { name: String },
}
