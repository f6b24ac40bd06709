use std::path::PathBuf;

/// Top-level error carried to `main`, which prints it and exits with its code.
///
/// Exit codes:
/// - `2`: bad input or file I/O (exports)
/// - `3`: model/scaler artifacts failed to load
/// - `4`: terminal/TUI failures
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure to load the price model or one of the scalers.
///
/// Any of these is fatal: no estimate is produced without all three artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read {what} '{}': {source}", path.display())]
    Io {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {what} JSON: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{what} has an invalid shape: {detail}")]
    Shape { what: &'static str, detail: String },

    #[error("{what} contains a non-finite parameter ({field})")]
    NonFinite { what: &'static str, field: String },
}

impl From<ArtifactError> for AppError {
    fn from(err: ArtifactError) -> Self {
        AppError::new(3, format!("Artifact load failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_errors_are_fatal_with_code_3() {
        let err: AppError = ArtifactError::Shape {
            what: "price model",
            detail: "final layer has 2 units, expected 1".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.to_string(),
            "Artifact load failed: price model has an invalid shape: final layer has 2 units, expected 1"
        );
    }
}
