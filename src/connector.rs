//! The connector: identity bootstrap, catalog discovery, client instantiation
//!
//! Construction authenticates once against the identity service, then walks
//! the advertised catalog and builds one client handle per (service type,
//! endpoint) pair. Unsupported services are skipped with a warning; a
//! failing identity bootstrap aborts construction with no clients built.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ConnectorConfig;
use crate::credentials::{CredentialStyle, ServiceCredentials, TokenCredentials};
use crate::error::Result;
use crate::identity::{AccessInfo, IdentityClient};
use crate::service::{ServiceClient, ServiceEntry, ServiceRegistry};

/// The identity service's reserved type name
const IDENTITY_SERVICE: &str = "identity";

/// Connector holding one client handle per discovered service endpoint
///
/// All handles are created during construction and live for the connector's
/// lifetime; the connector never mutates or revokes them.
pub struct Connector {
    identity: Arc<IdentityClient>,
    clients: HashMap<String, Vec<Arc<dyn ServiceClient>>>,
    discovered: Vec<String>,
    skipped: Vec<String>,
}

impl Connector {
    /// Authenticate and build clients using the built-in service registry
    pub async fn connect(config: ConnectorConfig) -> Result<Self> {
        Self::connect_with_registry(config, &ServiceRegistry::builtin()).await
    }

    /// Authenticate and build clients using a caller-supplied registry
    pub async fn connect_with_registry(
        config: ConnectorConfig,
        registry: &ServiceRegistry,
    ) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::new();
        let identity =
            IdentityClient::authenticate(http.clone(), config.defined_credentials()).await?;

        Self::assemble(Arc::new(identity), registry)
    }

    /// Build clients from a previously issued token and catalog
    ///
    /// Skips the identity round trip entirely; no network I/O is performed.
    pub fn from_access(
        config: ConnectorConfig,
        registry: &ServiceRegistry,
        access: AccessInfo,
    ) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::new();
        let identity = IdentityClient::from_access(http, config.defined_credentials(), access);

        Self::assemble(Arc::new(identity), registry)
    }

    /// Walk the catalog and instantiate one client per endpoint
    fn assemble(identity: Arc<IdentityClient>, registry: &ServiceRegistry) -> Result<Self> {
        let mut clients: HashMap<String, Vec<Arc<dyn ServiceClient>>> = HashMap::new();
        let mut discovered = vec![IDENTITY_SERVICE.to_string()];
        let mut skipped: Vec<String> = Vec::new();

        // The identity client is the trust anchor: exactly one entry,
        // created during bootstrap, never rebuilt by the loop below.
        clients.insert(
            IDENTITY_SERVICE.to_string(),
            vec![identity.clone() as Arc<dyn ServiceClient>],
        );

        let http = identity.http().clone();
        let template = identity.credentials().clone();
        let catalog = identity.service_catalog().clone();

        for entry in catalog.entries() {
            let service = entry.service_type.as_str();

            clients.entry(service.to_string()).or_default();
            if !discovered.iter().any(|s| s == service) {
                discovered.push(service.to_string());
            }

            if service == IDENTITY_SERVICE {
                continue;
            }

            let (factory, style) = match registry.get(service) {
                Some(ServiceEntry::Supported { factory, style }) => (factory, *style),
                Some(ServiceEntry::Unsupported) | None => {
                    if !skipped.iter().any(|s| s == service) {
                        warn!(service, "service not yet implemented, skipping");
                        skipped.push(service.to_string());
                    }
                    continue;
                }
            };

            let mut handles: Vec<Arc<dyn ServiceClient>> =
                Vec::with_capacity(entry.endpoints.len());

            for endpoint in &entry.endpoints {
                let credentials = match style {
                    CredentialStyle::Token => ServiceCredentials::Token(TokenCredentials {
                        endpoint: endpoint.public_url.clone(),
                        token: identity.auth_token().to_string(),
                    }),
                    CredentialStyle::Defined => ServiceCredentials::Defined(template.clone()),
                };

                let client = factory(&http, service, credentials)?;
                debug!(service, endpoint = %endpoint.public_url, %style, "service client created");
                handles.push(client);
            }

            if let Some(list) = clients.get_mut(service) {
                list.extend(handles);
            }
        }

        info!(
            services = discovered.len(),
            skipped = skipped.len(),
            "connector initialized"
        );

        Ok(Self {
            identity,
            clients,
            discovered,
            skipped,
        })
    }

    /// Client handles for a service type, in catalog order
    ///
    /// Returns an empty slice for service types that were never discovered.
    pub fn clients(&self, service_type: &str) -> &[Arc<dyn ServiceClient>] {
        self.clients
            .get(service_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Client handles for a service type, downcast to a concrete client type
    pub fn typed_clients<'a, T: ServiceClient>(
        &'a self,
        service_type: &'a str,
    ) -> impl Iterator<Item = &'a T> {
        self.clients(service_type)
            .iter()
            .filter_map(|client| client.as_any().downcast_ref::<T>())
    }

    /// The identity client (trust anchor)
    pub fn identity(&self) -> &IdentityClient {
        &self.identity
    }

    /// The identity client's current auth token
    pub fn auth_token(&self) -> &str {
        self.identity.auth_token()
    }

    /// Discovered service types, identity first, then catalog order
    pub fn service_types(&self) -> impl Iterator<Item = &str> {
        self.discovered.iter().map(String::as_str)
    }

    /// Service types present in the catalog but skipped as unsupported
    pub fn skipped_services(&self) -> &[String] {
        &self.skipped
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("discovered", &self.discovered)
            .field("skipped", &self.skipped)
            .finish()
    }
}
