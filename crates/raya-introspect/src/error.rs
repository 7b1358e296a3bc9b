//! Introspection errors

use thiserror::Error;

/// Result type for introspection queries
pub type IntrospectResult<T> = Result<T, IntrospectError>;

/// Errors raised by introspection queries and descriptor construction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntrospectError {
    /// A required argument was absent
    #[error("Invalid argument `{param}`: {message}")]
    InvalidArgument {
        /// Name of the offending parameter
        param: &'static str,
        /// Human-readable message
        message: String,
    },

    /// The type's metadata cannot answer the query
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the missing or inconsistent metadata
        message: String,
    },
}

impl IntrospectError {
    /// Error for an absent instance argument
    pub fn null_argument(param: &'static str) -> Self {
        IntrospectError::InvalidArgument {
            param,
            message: "The object cannot be null.".to_string(),
        }
    }

    /// Error for metadata that is missing or inconsistent
    pub fn invalid_state(message: impl Into<String>) -> Self {
        IntrospectError::InvalidState {
            message: message.into(),
        }
    }
}

/// Errors that can occur while loading an introspection config
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_argument_carries_param() {
        let err = IntrospectError::null_argument("obj");
        match &err {
            IntrospectError::InvalidArgument { param, message } => {
                assert_eq!(*param, "obj");
                assert_eq!(message, "The object cannot be null.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Invalid argument `obj`: The object cannot be null."
        );
    }

    #[test]
    fn test_invalid_state_message() {
        let err = IntrospectError::invalid_state("no full name for `List<T>`");
        assert_eq!(err.to_string(), "Invalid state: no full name for `List<T>`");
    }
}
