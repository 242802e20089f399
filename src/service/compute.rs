//! Compute service client (defined credential style)
//!
//! Constructed with the raw credential template and no endpoint: like the
//! v2-era compute clients, it authenticates itself on first use and resolves
//! its own public endpoint from the catalog issued with its token. Serves
//! both the "compute" and "computev3" catalog types.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use tokio::sync::OnceCell;

use super::{endpoint_url, get_json, ServiceClient};
use crate::credentials::{CredentialStyle, DefinedCredentials};
use crate::error::{ConnectorError, Result};
use crate::identity;

/// A compute flavor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flavor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vcpus: u32,
    #[serde(default)]
    pub ram: u64,
    #[serde(default)]
    pub disk: u64,
}

/// A compute server instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Server {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize)]
struct Flavors {
    flavors: Vec<Flavor>,
}

#[derive(Deserialize)]
struct Servers {
    servers: Vec<Server>,
}

/// Resolved session for a defined-style client
struct Session {
    token: String,
    endpoint: String,
}

/// Client for a compute service endpoint
pub struct ComputeClient {
    http: reqwest::Client,
    service_type: String,
    credentials: DefinedCredentials,
    session: OnceCell<Session>,
}

impl ComputeClient {
    pub(crate) fn new(
        http: reqwest::Client,
        service_type: impl Into<String>,
        credentials: DefinedCredentials,
    ) -> Self {
        Self {
            http,
            service_type: service_type.into(),
            credentials,
            session: OnceCell::new(),
        }
    }

    /// The credential template this client was constructed with
    pub fn credentials(&self) -> &DefinedCredentials {
        &self.credentials
    }

    /// Authenticate on first use and resolve the service endpoint
    async fn session(&self) -> Result<&Session> {
        self.session
            .get_or_try_init(|| async {
                let access = identity::authenticate(&self.http, &self.credentials).await?;
                let endpoint = access
                    .catalog
                    .public_url(&self.service_type)
                    .ok_or_else(|| ConnectorError::EndpointNotFound {
                        service: self.service_type.clone(),
                    })?
                    .to_string();
                Ok(Session {
                    token: access.token,
                    endpoint,
                })
            })
            .await
    }

    /// List all flavors
    pub async fn list_flavors(&self) -> Result<Vec<Flavor>> {
        let session = self.session().await?;
        let url = endpoint_url(&session.endpoint, "flavors/detail");
        let body: Flavors = get_json(&self.http, &url, &session.token).await?;
        Ok(body.flavors)
    }

    /// List all servers
    pub async fn list_servers(&self) -> Result<Vec<Server>> {
        let session = self.session().await?;
        let url = endpoint_url(&session.endpoint, "servers/detail");
        let body: Servers = get_json(&self.http, &url, &session.token).await?;
        Ok(body.servers)
    }
}

impl fmt::Debug for ComputeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeClient")
            .field("service_type", &self.service_type)
            .field("credentials", &self.credentials)
            .field("authenticated", &self.session.initialized())
            .finish()
    }
}

impl ServiceClient for ComputeClient {
    fn service_type(&self) -> &str {
        &self.service_type
    }

    fn credential_style(&self) -> CredentialStyle {
        CredentialStyle::Defined
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
