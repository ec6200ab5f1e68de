use thiserror::Error;

/// Top-level error type for the Tembea system.
///
/// Subsystem crates define their own error types and implement
/// `From<TembeaError>` so that the `?` operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TembeaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for TembeaError {
    fn from(err: toml::de::Error) -> Self {
        TembeaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TembeaError {
    fn from(err: toml::ser::Error) -> Self {
        TembeaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TembeaError {
    fn from(err: serde_json::Error) -> Self {
        TembeaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Tembea operations.
pub type Result<T> = std::result::Result<T, TembeaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let cases: Vec<(TembeaError, &str)> = vec![
            (
                TembeaError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                TembeaError::Catalog("duplicate id".to_string()),
                "Catalog error: duplicate id",
            ),
            (
                TembeaError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TembeaError = io_err.into();
        assert!(matches!(err, TembeaError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let err: TembeaError = err.unwrap_err().into();
        assert!(matches!(err, TembeaError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let err: TembeaError = err.unwrap_err().into();
        assert!(matches!(err, TembeaError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(value.to_string())
        }

        assert_eq!(inner().unwrap(), "42");
    }
}
