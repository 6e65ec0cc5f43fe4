use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MigralyzerError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Queue message errors
    MalformedMessage {
        message_id: String,
        reason: String,
    },
    QueueError {
        operation: String,
        reason: String,
    },

    // LLM generation errors
    GenerationError {
        analyzer: String,
        file_path: String,
        reason: String,
    },

    // Result store errors
    PersistenceError {
        analysis_id: String,
        operation: String,
        reason: String,
    },

    // Repository errors
    RepositoryError {
        repository: String,
        operation: String,
        reason: String,
    },

    // Validation errors
    ValidationError {
        field: String,
        value: String,
        constraint: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl MigralyzerError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn malformed_message(message_id: &str, reason: &str) -> Self {
        Self::MalformedMessage {
            message_id: message_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn queue_error(operation: &str, reason: &str) -> Self {
        Self::QueueError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn generation_error(analyzer: &str, file_path: &str, reason: &str) -> Self {
        Self::GenerationError {
            analyzer: analyzer.to_string(),
            file_path: file_path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn persistence_error(analysis_id: &str, operation: &str, reason: &str) -> Self {
        Self::PersistenceError {
            analysis_id: analysis_id.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn repo_error(repository: &str, operation: &str, reason: &str) -> Self {
        Self::RepositoryError {
            repository: repository.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn validation_error(field: &str, value: &str, constraint: &str) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Recoverable errors leave the message on the queue for redelivery;
    /// the rest either discard the message or abort the command.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::GenerationError { .. } => true,
            Self::PersistenceError { .. } => true,
            Self::QueueError { .. } => true,
            Self::RepositoryError { .. } => true,
            Self::MalformedMessage { .. } => false,
            Self::ValidationError { .. } => false,
            Self::ConfigurationError { .. } => false,
            Self::ConfigurationFileError { .. } => false,
            Self::SystemError { .. } => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::MalformedMessage { message_id, reason } => {
                format!("Malformed queue message '{}': {}\n💡 The message was discarded and will not be retried", message_id, reason)
            }
            Self::QueueError { operation, reason } => {
                format!("Queue operation '{}' failed: {}", operation, reason)
            }
            Self::GenerationError { analyzer, file_path, reason } => {
                format!("Analyzer '{}' failed on '{}': {}\n💡 The message stays queued and will be redelivered", analyzer, file_path, reason)
            }
            Self::PersistenceError { analysis_id, operation, reason } => {
                format!("Store operation '{}' failed for analysis '{}': {}", operation, analysis_id, reason)
            }
            Self::RepositoryError { repository, operation, reason } => {
                format!("Repository '{}' error during {}: {}\n💡 Check repository path and permissions", repository, operation, reason)
            }
            Self::ValidationError { field, value, constraint } => {
                format!("Validation error for field '{}': value '{}' violates constraint '{}'", field, value, constraint)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }
}

impl fmt::Display for MigralyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for MigralyzerError {}

/// Result type alias for migralyzer operations
pub type MigralyzerResult<T> = Result<T, MigralyzerError>;

/// Convert from standard library errors
impl From<std::io::Error> for MigralyzerError {
    fn from(error: std::io::Error) -> Self {
        MigralyzerError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for MigralyzerError {
    fn from(error: serde_json::Error) -> Self {
        MigralyzerError::SystemError {
            operation: "JSON serialization".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for MigralyzerError {
    fn from(error: toml::de::Error) -> Self {
        MigralyzerError::ConfigurationFileError {
            path: "config.toml".to_string(),
            reason: error.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for MigralyzerError {
    fn from(error: reqwest::Error) -> Self {
        MigralyzerError::SystemError {
            operation: "HTTP request".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<rusqlite::Error> for MigralyzerError {
    fn from(error: rusqlite::Error) -> Self {
        MigralyzerError::PersistenceError {
            analysis_id: String::new(),
            operation: "sqlite".to_string(),
            reason: error.to_string(),
        }
    }
}
