use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimetableError {
    /// Rejected user input; nothing was changed.
    #[error("{0}")]
    Validation(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl TimetableError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TimetableError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TimetableError::Validation(_))
    }
}

pub type TimetableResult<T> = Result<T, TimetableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = TimetableError::validation("Please enter a subject.");
        assert_eq!(err.to_string(), "Please enter a subject.");
        assert!(err.is_validation());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TimetableError = io.into();
        assert!(!err.is_validation());
        assert!(err.to_string().starts_with("io error:"));
    }
}
