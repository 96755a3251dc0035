use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Directory request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Directory responded with status {status}")]
    StatusError { status: u16 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected directory payload: {message}")]
    PayloadError { message: String },

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::ApiError(_) | FinderError::StatusError { .. } => ErrorCategory::Network,
            FinderError::SerializationError(_)
            | FinderError::PayloadError { .. }
            | FinderError::CsvError(_)
            | FinderError::ValidationError { .. } => ErrorCategory::Data,
            FinderError::ConfigError { .. } | FinderError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            FinderError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FinderError::ApiError(_) => "Check network connectivity and the directory endpoint",
            FinderError::StatusError { .. } => "Verify the endpoint URL or try again later",
            FinderError::SerializationError(_) | FinderError::PayloadError { .. } => {
                "The endpoint must return a JSON array of doctor records"
            }
            FinderError::CsvError(_) => "Try a different output format",
            FinderError::IoError(_) => "Check file paths and permissions",
            FinderError::ConfigError { .. } => "Review the configuration file and command-line flags",
            FinderError::InvalidConfigValueError { .. } => "Correct the value named above",
            FinderError::ValidationError { .. } => "Check the input values",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the doctor directory: {}", self),
            ErrorCategory::Data => format!("Could not process directory data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
