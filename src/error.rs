/*!
 * Error types for the connector
 */

use std::fmt;

/// Result type alias for connector operations
pub type Result<T> = std::result::Result<T, ConnectorError>;

/// Unified error type for connector operations
#[derive(Debug)]
pub enum ConnectorError {
    /// Network-level failure talking to the identity or a service endpoint
    Http {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The identity service rejected the supplied credentials
    AuthenticationFailed { message: String },

    /// A service returned an unexpected HTTP status
    UnexpectedStatus { status: u16, body: String },

    /// A response body could not be parsed
    InvalidResponse { message: String },

    /// Invalid connector or registry configuration
    InvalidConfig { message: String },

    /// A defined-style client could not find its own endpoint in the catalog
    EndpointNotFound { service: String },
}

impl ConnectorError {
    /// Check if this error is retriable (transient)
    pub fn is_retriable(&self) -> bool {
        match self {
            ConnectorError::Http { .. } => true,
            ConnectorError::UnexpectedStatus { status, .. } => *status >= 500,
            ConnectorError::AuthenticationFailed { .. } => false,
            ConnectorError::InvalidResponse { .. } => false,
            ConnectorError::InvalidConfig { .. } => false,
            ConnectorError::EndpointNotFound { .. } => false,
        }
    }

    /// Check if this error is related to authentication
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ConnectorError::AuthenticationFailed { .. })
    }
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorError::Http { message, source } => {
                if let Some(src) = source {
                    write!(f, "HTTP error: {} ({})", message, src)
                } else {
                    write!(f, "HTTP error: {}", message)
                }
            }
            ConnectorError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            ConnectorError::UnexpectedStatus { status, body } => {
                write!(f, "Unexpected HTTP status {}: {}", status, body)
            }
            ConnectorError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            ConnectorError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            ConnectorError::EndpointNotFound { service } => {
                write!(f, "No endpoint for service '{}' in catalog", service)
            }
        }
    }
}

impl std::error::Error for ConnectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectorError::Http {
                source: Some(src), ..
            } => Some(&**src),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        ConnectorError::Http {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<url::ParseError> for ConnectorError {
    fn from(err: url::ParseError) -> Self {
        ConnectorError::InvalidConfig {
            message: format!("invalid URL: {}", err),
        }
    }
}

impl From<serde_json::Error> for ConnectorError {
    fn from(err: serde_json::Error) -> Self {
        ConnectorError::InvalidResponse {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retriable() {
        let err = ConnectorError::Http {
            message: "connection reset".to_string(),
            source: None,
        };
        assert!(err.is_retriable());

        let err = ConnectorError::AuthenticationFailed {
            message: "bad credentials".to_string(),
        };
        assert!(!err.is_retriable());

        let err = ConnectorError::UnexpectedStatus {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_retriable());

        let err = ConnectorError::UnexpectedStatus {
            status: 404,
            body: String::new(),
        };
        assert!(!err.is_retriable());
    }

    #[test]
    fn test_error_display() {
        let err = ConnectorError::AuthenticationFailed {
            message: "invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Authentication failed: invalid credentials");

        let err = ConnectorError::EndpointNotFound {
            service: "compute".to_string(),
        };
        assert_eq!(err.to_string(), "No endpoint for service 'compute' in catalog");
    }

    #[test]
    fn test_auth_error_classification() {
        let err = ConnectorError::AuthenticationFailed {
            message: "expired".to_string(),
        };
        assert!(err.is_auth_error());

        let err = ConnectorError::InvalidConfig {
            message: "missing field".to_string(),
        };
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_url_error_conversion() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: ConnectorError = url_err.into();
        assert!(matches!(err, ConnectorError::InvalidConfig { .. }));
    }
}
