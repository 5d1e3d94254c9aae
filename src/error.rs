use thiserror::Error;

/// Errors raised while configuring the analyzer or loading its inputs.
///
/// Analysis itself never fails: degenerate books (empty sides, zero totals,
/// empty history) resolve to defined fallback values instead.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    pub fn error_type(&self) -> &'static str {
        match self {
            AnalyzerError::InvalidConfig(_) => "invalid_config",
            AnalyzerError::Json(_) => "json_error",
            AnalyzerError::Io(_) => "io_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_type_labels() {
        let err = AnalyzerError::InvalidConfig("lookback must be positive".to_string());
        assert_eq!(err.error_type(), "invalid_config");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: lookback must be positive"
        );

        let json_err: AnalyzerError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert_eq!(json_err.error_type(), "json_error");
    }
}
