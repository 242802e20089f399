//! Credential shapes for service client construction
//!
//! Service clients accept one of two credential shapes: `Defined` carries the
//! raw identity credentials and lets the client authenticate itself, `Token`
//! carries a pre-issued token plus the target endpoint. The style is a closed
//! enum so adding a third shape is a compile-time-checked change.

use secrecy::SecretString;
use std::fmt;
use std::str::FromStr;

use crate::error::ConnectorError;

/// Which credential shape a service client's constructor expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStyle {
    /// Raw auth URL, username, password, and tenant
    Defined,
    /// Pre-issued auth token plus target endpoint
    Token,
}

impl fmt::Display for CredentialStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialStyle::Defined => write!(f, "defined"),
            CredentialStyle::Token => write!(f, "token"),
        }
    }
}

impl FromStr for CredentialStyle {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "defined" => Ok(CredentialStyle::Defined),
            "token" => Ok(CredentialStyle::Token),
            other => Err(ConnectorError::InvalidConfig {
                message: format!("authentication type '{}' not supported", other),
            }),
        }
    }
}

/// Raw identity credentials, endpoint-independent
///
/// Cloned verbatim for every endpoint of a defined-style service.
#[derive(Clone)]
pub struct DefinedCredentials {
    /// Identity service URL (e.g. `http://keystone:5000/v2.0`)
    pub auth_url: String,

    /// Username
    pub username: String,

    /// Password
    pub password: SecretString,

    /// Tenant (project) name
    pub tenant_name: String,
}

impl fmt::Debug for DefinedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinedCredentials")
            .field("auth_url", &self.auth_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tenant_name", &self.tenant_name)
            .finish()
    }
}

/// Pre-issued token plus target endpoint, filled in per endpoint
#[derive(Clone)]
pub struct TokenCredentials {
    /// Public URL of the target endpoint
    pub endpoint: String,

    /// Auth token issued by the identity service
    pub token: String,
}

impl fmt::Debug for TokenCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCredentials")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Credentials handed to a service factory
///
/// The style discriminator lives in the enum tag; the payload itself carries
/// no style field.
#[derive(Debug, Clone)]
pub enum ServiceCredentials {
    Defined(DefinedCredentials),
    Token(TokenCredentials),
}

impl ServiceCredentials {
    /// The style this credential payload corresponds to
    pub fn style(&self) -> CredentialStyle {
        match self {
            ServiceCredentials::Defined(_) => CredentialStyle::Defined,
            ServiceCredentials::Token(_) => CredentialStyle::Token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_style_parse() {
        assert_eq!(
            "defined".parse::<CredentialStyle>().unwrap(),
            CredentialStyle::Defined
        );
        assert_eq!(
            "token".parse::<CredentialStyle>().unwrap(),
            CredentialStyle::Token
        );
        assert!("oauth".parse::<CredentialStyle>().is_err());
    }

    #[test]
    fn test_style_display_roundtrip() {
        for style in [CredentialStyle::Defined, CredentialStyle::Token] {
            assert_eq!(style.to_string().parse::<CredentialStyle>().unwrap(), style);
        }
    }

    #[test]
    fn test_defined_debug_redacts_password() {
        let creds = DefinedCredentials {
            auth_url: "http://keystone:5000/v2.0".to_string(),
            username: "admin".to_string(),
            password: SecretString::new("hunter2".to_string().into_boxed_str()),
            tenant_name: "demo".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("admin"));
        assert_eq!(creds.password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_token_debug_redacts_token() {
        let creds = TokenCredentials {
            endpoint: "http://glance:9292".to_string(),
            token: "secret-token".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("glance"));
    }

    #[test]
    fn test_service_credentials_style() {
        let creds = ServiceCredentials::Token(TokenCredentials {
            endpoint: "http://glance:9292".to_string(),
            token: "tok".to_string(),
        });
        assert_eq!(creds.style(), CredentialStyle::Token);
    }
}
