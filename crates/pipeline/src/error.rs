use tubelens_core::error::CoreError;

/// Errors that stop a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("No videos found for {0}")]
    NoVideos(String),

    #[error("Could not open {path}: {message}")]
    Open { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = PipelineError::NoVideos("https://www.youtube.com/@x/videos".to_string());
        assert_eq!(
            err.to_string(),
            "No videos found for https://www.youtube.com/@x/videos"
        );

        let err = PipelineError::from(CoreError::Validation("empty".to_string()));
        assert_eq!(err.to_string(), "Validation failed: empty");
    }
}
