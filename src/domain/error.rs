use std::time::Duration;

use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The delegated classifier answered, but its reply could not be parsed
    #[error("Classification error: {message}")]
    ClassificationError { message: String, raw_reply: String },

    /// The delegated classifier's backend could not be reached or rejected us
    #[error("Classifier unavailable: {backend} - {message}")]
    ClassifierUnavailable { backend: String, message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Timeout: {operation} exceeded {timeout:?}")]
    Timeout { operation: String, timeout: Duration },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn classification(message: impl Into<String>, raw_reply: impl Into<String>) -> Self {
        Self::ClassificationError {
            message: message.into(),
            raw_reply: raw_reply.into(),
        }
    }

    pub fn classifier_unavailable(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ClassifierUnavailable {
            backend: backend.into(),
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Raw external reply attached to a classification failure, if any
    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            Self::ClassificationError { raw_reply, .. } => Some(raw_reply),
            _ => None,
        }
    }
}
