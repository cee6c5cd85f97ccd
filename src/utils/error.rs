use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Listing service returned {status} for {url}")]
    Transport { status: u16, url: String },

    #[error("University not found: {id}")]
    NotFound { id: String },

    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Lookup,
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
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Transport { .. } => ErrorCategory::Network,
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::Decode(_) => ErrorCategory::Data,
            Self::InvalidUrl(_) | Self::Config { .. } | Self::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            Self::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Http(_) => "Could not reach the listing service".to_string(),
            Self::Transport { status, .. } => {
                format!("The listing service answered with status {}", status)
            }
            Self::NotFound { id } => format!("No university with id '{}'", id),
            Self::Decode(_) => "The listing service sent an unexpected response".to_string(),
            Self::InvalidUrl(e) => format!("The listing service URL is invalid: {}", e),
            Self::Io(e) => format!("File access failed: {}", e),
            Self::Config { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the listing service is running and --api-url / UNI_FINDER_API_URL points at it"
            }
            ErrorCategory::Lookup => "Run `uni-finder search` to list valid university ids",
            ErrorCategory::Data => "Make sure the API URL points at a university listing service",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let not_found = FinderError::NotFound { id: "x".into() };
        assert_eq!(not_found.category(), ErrorCategory::Lookup);
        assert_eq!(not_found.severity(), ErrorSeverity::Low);

        let transport = FinderError::Transport {
            status: 503,
            url: "http://localhost:3001/api/filters".into(),
        };
        assert_eq!(transport.severity(), ErrorSeverity::Medium);

        let config = FinderError::config("bad");
        assert_eq!(config.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_user_friendly_messages() {
        let err = FinderError::Transport {
            status: 500,
            url: "http://x/api/universities".into(),
        };
        assert!(err.user_friendly_message().contains("500"));
        assert!(err.to_string().contains("http://x/api/universities"));
    }
}
