use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("No reference profile for neighborhood '{neighborhood_id}'")]
    NotFound { neighborhood_id: String },

    #[error("Invalid value for '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Missing required field '{field}'")]
    MissingFieldError { field: String },

    #[error("Invalid reference profile for neighborhood '{neighborhood_id}': {reason}")]
    InvalidProfileError {
        neighborhood_id: String,
        reason: String,
    },

    #[error("Reference data error: {message}")]
    ReferenceDataError { message: String },

    #[error("Reference data request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value '{field}'")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Configuration,
    ReferenceData,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimateError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::MissingFieldError {
            field: field.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::ValidationError { .. } | Self::MissingFieldError { .. } => {
                ErrorCategory::Validation
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::InvalidProfileError { .. }
            | Self::ReferenceDataError { .. }
            | Self::HttpError(_)
            | Self::CsvError(_) => ErrorCategory::ReferenceData,
            Self::IoError(_) | Self::SerializationError(_) | Self::InternalError { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound | ErrorCategory::Validation => ErrorSeverity::High,
            // 參考資料服務可能只是暫時無法連線
            ErrorCategory::ReferenceData => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// HTTP status surfaced to callers of the estimate endpoint.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::NotFound => 404,
            ErrorCategory::Validation => 400,
            _ => 500,
        }
    }

    /// Message safe to return to a caller. Internal failures are reduced to a
    /// generic sentence; the detailed error only goes to the server log.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::NotFound | ErrorCategory::Validation => self.to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::ReferenceData | ErrorCategory::Internal => {
                "An unexpected error occurred while computing the estimate".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => {
                "Check the selected neighborhood id against the reference data"
            }
            Self::ValidationError { .. } | Self::MissingFieldError { .. } => {
                "Fix the request fields for the chosen building category and finish tier"
            }
            Self::InvalidProfileError { .. } => {
                "Correct the land-use coefficient in the reference data (expected 0 < c <= 100)"
            }
            Self::HttpError(_) | Self::ReferenceDataError { .. } => {
                "Check that the reference data service is reachable and retry"
            }
            Self::CsvError(_) => "Check the reference CSV header and column values",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the configuration file or CLI flags",
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "Check that the input is valid JSON",
            Self::InternalError { .. } => "Report the issue with the server log excerpt",
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_category() {
        let not_found = EstimateError::NotFound {
            neighborhood_id: "42".to_string(),
        };
        assert_eq!(not_found.status_code(), 404);
        assert_eq!(EstimateError::missing("pieces").status_code(), 400);
        assert_eq!(EstimateError::internal("boom").status_code(), 500);
        assert_eq!(
            EstimateError::ReferenceDataError {
                message: "503".to_string()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_internal_details_hidden_from_caller() {
        let err = EstimateError::internal("table row missing for rooms=7");
        assert!(!err.user_friendly_message().contains("rooms=7"));

        let err = EstimateError::validation("pieces", "expected 2..10");
        assert!(err.user_friendly_message().contains("pieces"));
    }
}
