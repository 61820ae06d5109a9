use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocsError>;

#[derive(Debug, Error)]
pub enum DocsError {
    /// Two navigation nodes claim the same location. Fatal at startup.
    #[error("duplicate navigation path: {path}")]
    DuplicatePath { path: String },
    #[error("navigation node {path} has an empty title")]
    EmptyTitle { path: String },
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error: {0}")]
    Generic(String),
}

impl From<String> for DocsError {
    fn from(error: String) -> Self {
        DocsError::Generic(error)
    }
}

impl From<&str> for DocsError {
    fn from(error: &str) -> Self {
        DocsError::Generic(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_duplicate_path_message_names_the_path() {
        let err = DocsError::DuplicatePath {
            path: "/docs/installation".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate navigation path: /docs/installation"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DocsError = io.into();
        assert_matches!(err, DocsError::Io(_));
    }

    #[test]
    fn test_string_converts_to_generic() {
        let err: DocsError = "boom".into();
        assert_matches!(err, DocsError::Generic(ref msg) if msg == "boom");
    }
}
