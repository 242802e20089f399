//! Connector configuration
//!
//! The connector takes four inputs: the identity service URL, a username, a
//! password, and a tenant name. They can be supplied directly or loaded from
//! the standard `OS_*` environment variables.

use secrecy::SecretString;

use crate::credentials::DefinedCredentials;
use crate::error::{ConnectorError, Result};

/// Configuration for connector construction
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Identity service URL (e.g. `http://keystone:5000/v2.0`)
    pub auth_url: String,

    /// Username
    pub username: String,

    /// Password
    pub password: SecretString,

    /// Tenant (project) name
    pub tenant_name: String,
}

impl ConnectorConfig {
    /// Create a new configuration from the four identity inputs
    pub fn new(
        auth_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        tenant_name: impl Into<String>,
    ) -> Self {
        Self {
            auth_url: auth_url.into(),
            username: username.into(),
            password: SecretString::new(password.into().into_boxed_str()),
            tenant_name: tenant_name.into(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads the standard OpenStack client variables:
    /// - `OS_AUTH_URL` - Identity service URL
    /// - `OS_USERNAME` - Username
    /// - `OS_PASSWORD` - Password
    /// - `OS_TENANT_NAME` - Tenant name
    pub fn from_env() -> Result<Self> {
        let auth_url = require_env("OS_AUTH_URL")?;
        let username = require_env("OS_USERNAME")?;
        let password = require_env("OS_PASSWORD")?;
        let tenant_name = require_env("OS_TENANT_NAME")?;

        Ok(Self::new(auth_url, username, password, tenant_name))
    }

    /// Validate the configuration
    ///
    /// Checks that the auth URL parses and that no field is empty.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.auth_url)?;

        if self.username.is_empty() {
            return Err(ConnectorError::InvalidConfig {
                message: "username must not be empty".to_string(),
            });
        }

        if self.tenant_name.is_empty() {
            return Err(ConnectorError::InvalidConfig {
                message: "tenant name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Build the defined-style credential template from this configuration
    pub fn defined_credentials(&self) -> DefinedCredentials {
        DefinedCredentials {
            auth_url: self.auth_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            tenant_name: self.tenant_name.clone(),
        }
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ConnectorError::InvalidConfig {
        message: format!("{} not set", name),
    })
}
