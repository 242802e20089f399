//! Identity service client
//!
//! The identity client is the trust anchor: it authenticates once with the
//! raw credentials, holds the issued token, and exposes the service catalog
//! used to discover every other service.

pub mod catalog;
mod wire;

pub use catalog::{CatalogEntry, Endpoint, ServiceCatalog};

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use std::any::Any;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::credentials::{CredentialStyle, DefinedCredentials};
use crate::error::{ConnectorError, Result};
use crate::service::ServiceClient;

/// Grace period before expiry during which a token is treated as invalid
const EXPIRY_BUFFER: Duration = Duration::from_secs(120);

/// An issued token together with the catalog it was issued with
#[derive(Clone)]
pub struct AccessInfo {
    /// The auth token (X-Auth-Token value)
    pub token: String,

    /// Token expiry, if the identity service reported one
    pub expires_at: Option<DateTime<Utc>>,

    /// The service catalog advertised alongside the token
    pub catalog: ServiceCatalog,
}

impl AccessInfo {
    /// Check whether the token is still usable
    ///
    /// Tokens expiring within the grace period are treated as invalid.
    pub fn is_valid(&self) -> bool {
        if self.token.is_empty() {
            return false;
        }

        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::TimeDelta::from_std(EXPIRY_BUFFER)
                    .unwrap_or_else(|_| chrono::TimeDelta::zero());
                Utc::now() < expires_at - buffer
            }
            None => true,
        }
    }
}

impl fmt::Debug for AccessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessInfo")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("catalog", &self.catalog)
            .finish()
    }
}

/// Authenticate against the identity service with password credentials
///
/// Performs a POST to `{auth_url}/tokens` and returns the issued token and
/// service catalog. Failures propagate unmodified; no retry is attempted.
pub(crate) async fn authenticate(
    http: &reqwest::Client,
    credentials: &DefinedCredentials,
) -> Result<AccessInfo> {
    let url = format!("{}/tokens", credentials.auth_url.trim_end_matches('/'));

    let request = wire::TokenRequest {
        auth: wire::Auth {
            password_credentials: wire::PasswordCredentials {
                username: credentials.username.clone(),
                password: credentials.password.expose_secret().to_string(),
            },
            tenant_name: credentials.tenant_name.clone(),
        },
    };

    debug!(
        auth_url = %credentials.auth_url,
        username = %credentials.username,
        tenant = %credentials.tenant_name,
        "authenticating with identity service"
    );

    let response = http.post(&url).json(&request).send().await?;
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let body = response.text().await.unwrap_or_default();
        return Err(ConnectorError::AuthenticationFailed {
            message: format!("identity service rejected credentials: {}", body),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ConnectorError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }

    let access: wire::AccessResponse = response.json().await?;

    debug!(
        services = access.access.service_catalog.len(),
        expires = ?access.access.token.expires,
        "authentication successful"
    );

    Ok(AccessInfo {
        token: access.access.token.id,
        expires_at: access.access.token.expires,
        catalog: ServiceCatalog::new(access.access.service_catalog),
    })
}

/// Authenticated identity client
///
/// Holds the credentials it was built with, the issued token, and the
/// service catalog. Immutable once constructed.
pub struct IdentityClient {
    http: reqwest::Client,
    credentials: DefinedCredentials,
    access: AccessInfo,
}

impl IdentityClient {
    /// Authenticate and construct the client
    pub async fn authenticate(
        http: reqwest::Client,
        credentials: DefinedCredentials,
    ) -> Result<Self> {
        let access = authenticate(&http, &credentials).await?;
        Ok(Self {
            http,
            credentials,
            access,
        })
    }

    /// Construct the client from a previously issued token and catalog
    ///
    /// No network I/O is performed; useful for delegated tokens.
    pub fn from_access(
        http: reqwest::Client,
        credentials: DefinedCredentials,
        access: AccessInfo,
    ) -> Self {
        Self {
            http,
            credentials,
            access,
        }
    }

    /// The current auth token
    pub fn auth_token(&self) -> &str {
        &self.access.token
    }

    /// Token expiry, if reported
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.access.expires_at
    }

    /// The service catalog obtained at authentication time
    pub fn service_catalog(&self) -> &ServiceCatalog {
        &self.access.catalog
    }

    /// The credentials this client authenticated with
    pub fn credentials(&self) -> &DefinedCredentials {
        &self.credentials
    }

    /// The shared HTTP client
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

impl fmt::Debug for IdentityClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityClient")
            .field("credentials", &self.credentials)
            .field("access", &self.access)
            .finish()
    }
}

impl ServiceClient for IdentityClient {
    fn service_type(&self) -> &str {
        "identity"
    }

    fn credential_style(&self) -> CredentialStyle {
        CredentialStyle::Defined
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn dummy_access(expires_at: Option<DateTime<Utc>>) -> AccessInfo {
        AccessInfo {
            token: "tok".to_string(),
            expires_at,
            catalog: ServiceCatalog::default(),
        }
    }

    #[test]
    fn test_access_valid_without_expiry() {
        assert!(dummy_access(None).is_valid());
    }

    #[test]
    fn test_access_invalid_with_empty_token() {
        let access = AccessInfo {
            token: String::new(),
            expires_at: None,
            catalog: ServiceCatalog::default(),
        };
        assert!(!access.is_valid());
    }

    #[test]
    fn test_access_valid_with_future_expiry() {
        let access = dummy_access(Some(Utc::now() + chrono::TimeDelta::hours(1)));
        assert!(access.is_valid());
    }

    #[test]
    fn test_access_invalid_within_grace_period() {
        let access = dummy_access(Some(Utc::now() + chrono::TimeDelta::seconds(30)));
        assert!(!access.is_valid());
    }

    #[test]
    fn test_access_invalid_when_expired() {
        let access = dummy_access(Some(Utc::now() - chrono::TimeDelta::hours(1)));
        assert!(!access.is_valid());
    }

    #[test]
    fn test_debug_redacts_token() {
        let access = dummy_access(None);
        let debug = format!("{:?}", access);
        assert!(!debug.contains("tok\""));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_identity_client_from_access() {
        let credentials = DefinedCredentials {
            auth_url: "http://keystone:5000/v2.0".to_string(),
            username: "admin".to_string(),
            password: SecretString::new("pw".to_string().into_boxed_str()),
            tenant_name: "demo".to_string(),
        };
        let client =
            IdentityClient::from_access(reqwest::Client::new(), credentials, dummy_access(None));

        assert_eq!(client.auth_token(), "tok");
        assert_eq!(client.service_type(), "identity");
        assert_eq!(client.credential_style(), CredentialStyle::Defined);
        assert!(client.service_catalog().is_empty());
    }
}
