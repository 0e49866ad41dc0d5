use std::path::PathBuf;
use thiserror::Error;

/// Define a convenient Result type
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Malformed report: {0}")]
    Structural(String),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// I/O and parse failures are reported and end the run; structural
    /// failures escape to the process boundary.
    pub fn is_handled(&self) -> bool {
        matches!(self, AppError::Io { .. } | AppError::Parse(_))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Structural(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_parse_are_handled_structural_is_not() {
        let io = AppError::io("x.json", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(io.is_handled());

        let parse = AppError::Parse(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(parse.is_handled());

        let structural = AppError::Structural("missing field `issueInfo`".into());
        assert!(!structural.is_handled());
    }

    #[test]
    fn io_message_names_path_and_cause() {
        let err = AppError::io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn anyhow_errors_become_structural() {
        let err: AppError = anyhow::anyhow!("issueInfo is not a list").into();
        assert!(matches!(err, AppError::Structural(ref m) if m == "issueInfo is not a list"));
    }
}
