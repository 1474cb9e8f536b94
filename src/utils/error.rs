use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {status} {status_text}")]
    TransportError { status: u16, status_text: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Cache error: {message}")]
    CacheError { message: String },

    /// 多個等待者共用同一次失敗的請求
    #[error(transparent)]
    Shared(Arc<ClientError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Validation,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::ValidationError {
            message: message.into(),
        }
    }

    /// 取回共用錯誤；最後一個持有者拿回原始錯誤
    pub fn from_shared(error: Arc<ClientError>) -> Self {
        Arc::try_unwrap(error).unwrap_or_else(ClientError::Shared)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Shared(inner) => inner.category(),
            ClientError::TransportError { .. } | ClientError::HttpError(_) => ErrorCategory::Network,
            ClientError::ValidationError { .. } | ClientError::SerializationError(_) => {
                ErrorCategory::Validation
            }
            ClientError::ConfigValidationError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ClientError::IoError(_) | ClientError::CacheError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息（不含內部細節）
    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::Shared(inner) => inner.user_friendly_message(),
            ClientError::TransportError { status, .. } if *status == 404 => {
                "The requested record was not found".to_string()
            }
            ClientError::TransportError { status, status_text } => {
                format!("The server rejected the request ({} {})", status, status_text)
            }
            ClientError::HttpError(_) => "Could not reach the backend".to_string(),
            ClientError::ValidationError { message } => {
                format!("The server returned unexpected data: {}", message)
            }
            ClientError::SerializationError(_) => "Failed to encode or decode JSON".to_string(),
            ClientError::ConfigValidationError { field, .. }
            | ClientError::InvalidConfigValueError { field, .. } => {
                format!("Configuration problem with '{}'", field)
            }
            ClientError::MissingConfigError { field } => {
                format!("Required configuration '{}' is not set", field)
            }
            ClientError::IoError(e) => format!("File access failed: {}", e),
            ClientError::CacheError { message } => format!("Query cache failure: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClientError::Shared(inner) => inner.recovery_suggestion(),
            ClientError::TransportError { status, .. } if *status >= 500 => {
                "Check the backend logs; the selected database may be unavailable"
            }
            ClientError::TransportError { .. } => "Check the record id and request fields",
            ClientError::HttpError(_) => "Verify --base-url and that the backend is running",
            ClientError::ValidationError { .. } | ClientError::SerializationError(_) => {
                "Make sure the client and backend versions match"
            }
            ClientError::ConfigValidationError { .. }
            | ClientError::InvalidConfigValueError { .. } => "Fix the configuration file or CLI flags",
            ClientError::MissingConfigError { .. } => {
                "Export the environment variable referenced by the configuration file"
            }
            ClientError::IoError(_) => "Check the file path and permissions",
            ClientError::CacheError { .. } => "Clear the query cache and retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_message() {
        let err = ClientError::TransportError {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API request failed: 404 Not Found");
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "The requested record was not found");
    }

    #[test]
    fn test_severity_by_category() {
        assert_eq!(
            ClientError::validation("bad").severity(),
            ErrorSeverity::High
        );
        let err = ClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: "expected a table".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        let err = ClientError::CacheError {
            message: "type mismatch".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        let err = ClientError::MissingConfigError {
            field: "ASM3_BASE_URL".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_shared_error_delegates_to_inner() {
        let inner = Arc::new(ClientError::TransportError {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        });
        let held = inner.clone();

        let err = ClientError::from_shared(inner);
        assert!(matches!(err, ClientError::Shared(_)));
        assert_eq!(err.to_string(), "API request failed: 503 Service Unavailable");
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(
            err.recovery_suggestion(),
            "Check the backend logs; the selected database may be unavailable"
        );

        drop(err);
        let last = ClientError::from_shared(held);
        assert!(matches!(last, ClientError::TransportError { status: 503, .. }));
    }
}
