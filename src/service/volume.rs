//! Volume service client (defined credential style)
//!
//! Self-authenticating like the compute client. Serves both the "volume"
//! and "volumev2" catalog types; the endpoint URL carries the API version.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use tokio::sync::OnceCell;

use super::{endpoint_url, get_json, ServiceClient};
use crate::credentials::{CredentialStyle, DefinedCredentials};
use crate::error::{ConnectorError, Result};
use crate::identity;

/// A volume record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Volume {
    pub id: String,
    #[serde(default, alias = "display_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize)]
struct Volumes {
    volumes: Vec<Volume>,
}

struct Session {
    token: String,
    endpoint: String,
}

/// Client for a volume service endpoint
pub struct VolumeClient {
    http: reqwest::Client,
    service_type: String,
    credentials: DefinedCredentials,
    session: OnceCell<Session>,
}

impl VolumeClient {
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

    /// List all volumes
    pub async fn list_volumes(&self) -> Result<Vec<Volume>> {
        let session = self.session().await?;
        let url = endpoint_url(&session.endpoint, "volumes/detail");
        let body: Volumes = get_json(&self.http, &url, &session.token).await?;
        Ok(body.volumes)
    }
}

impl fmt::Debug for VolumeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeClient")
            .field("service_type", &self.service_type)
            .field("credentials", &self.credentials)
            .field("authenticated", &self.session.initialized())
            .finish()
    }
}

impl ServiceClient for VolumeClient {
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
