use thiserror::Error;

/// Business-rule failures raised by the allocation engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("No providers provided.")]
    NoProviders,

    #[error("No topics provided.")]
    NoTopics,

    #[error("No topics matched.")]
    NoTopicsMatched,

    #[error("Quote is out of range.")]
    QuoteOverflow,
}

#[derive(Error, Debug)]
pub enum BundlerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{message}")]
    Repository { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("File {path} not found.")]
    TopicsFileNotFound { path: String },

    #[error("File {path} contains no topics.")]
    EmptyTopicsRequest { path: String },

    #[error("Topic '{topic}' has a negative weight: {weight}")]
    InvalidTopicWeight { topic: String, weight: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Empty result")]
    EmptyOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Domain,
    Infrastructure,
    Configuration,
    Request,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BundlerError {
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Domain,
            Self::Repository { .. }
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::Cancelled => ErrorCategory::Infrastructure,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::TopicsFileNotFound { .. }
            | Self::EmptyTopicsRequest { .. }
            | Self::InvalidTopicWeight { .. } => ErrorCategory::Request,
            Self::EmptyOutcome => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Domain | ErrorCategory::Request => ErrorSeverity::Medium,
            ErrorCategory::Infrastructure if matches!(self, Self::Cancelled) => ErrorSeverity::Medium,
            ErrorCategory::Infrastructure | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::NoProviders) => {
                "Check that the provider catalog lists at least one provider"
            }
            Self::Domain(DomainError::NoTopics) => "Request at least one topic",
            Self::Domain(DomainError::NoTopicsMatched) => {
                "Request topics that at least one provider supports"
            }
            Self::Domain(DomainError::QuoteOverflow) => "Use smaller topic weights",
            Self::Repository { .. } => "Check the provider catalog path and its contents",
            Self::IoError(_) => "Check file permissions and that the paths exist",
            Self::SerializationError(_) => "Make sure the file is valid JSON",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the command line flags and config file"
            }
            Self::TopicsFileNotFound { .. } => "Pass an existing file with --topics-path",
            Self::EmptyTopicsRequest { .. } => {
                "Add entries to the \"topics\" object of the request file"
            }
            Self::InvalidTopicWeight { .. } => "Topic weights must be zero or greater",
            Self::Cancelled => "Re-run the command to completion",
            Self::EmptyOutcome => "This is a bug; please report it",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Domain => format!("Bundling resulted in error: {}", self),
            ErrorCategory::Infrastructure => format!("Data access failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Request => format!("Invalid topics request: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

// io and serde_json errors are not comparable, so equality falls back to the
// variant plus its rendered message.
impl PartialEq for BundlerError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.to_string() == other.to_string()
    }
}

pub type Result<T> = std::result::Result<T, BundlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_messages_are_transparent() {
        let err: BundlerError = DomainError::NoProviders.into();
        assert_eq!(err.to_string(), "No providers provided.");
        assert_eq!(
            BundlerError::from(DomainError::NoTopics).to_string(),
            "No topics provided."
        );
        assert_eq!(
            BundlerError::from(DomainError::NoTopicsMatched).to_string(),
            "No topics matched."
        );
        assert_eq!(
            BundlerError::from(DomainError::QuoteOverflow).to_string(),
            "Quote is out of range."
        );
    }

    #[test]
    fn test_category_and_severity() {
        let domain = BundlerError::from(DomainError::NoTopicsMatched);
        assert_eq!(domain.category(), ErrorCategory::Domain);
        assert_eq!(domain.severity(), ErrorSeverity::Medium);

        let repo = BundlerError::repository("JSON file not found. Path: x.json");
        assert_eq!(repo.category(), ErrorCategory::Infrastructure);
        assert_eq!(repo.severity(), ErrorSeverity::High);

        assert_eq!(BundlerError::Cancelled.severity(), ErrorSeverity::Medium);
        assert_eq!(BundlerError::EmptyOutcome.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_equality_by_variant_and_message() {
        assert_eq!(
            BundlerError::repository("boom"),
            BundlerError::repository("boom")
        );
        assert_ne!(
            BundlerError::repository("boom"),
            BundlerError::ConfigError {
                message: "boom".to_string()
            }
        );
        assert_ne!(
            BundlerError::repository("boom"),
            BundlerError::repository("bang")
        );
    }
}
