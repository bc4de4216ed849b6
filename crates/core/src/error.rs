#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown {entity}: '{value}'")]
    UnknownValue { entity: &'static str, value: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Dictionary error: {0}")]
    Dictionary(String),
}
