#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing column: {column} in {source_name}")]
    MissingColumn {
        source_name: &'static str,
        column: &'static str,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
