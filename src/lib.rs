/*!
 * osconnect - OpenStack service connector
 *
 * Authenticates once against an OpenStack identity service, discovers the
 * advertised service catalog, and builds one API client per (service type,
 * endpoint) pair:
 * - Identity v2.0 password authentication with token + catalog retrieval
 * - Registry-driven dispatch from service-type names to client factories
 * - Two credential shapes: raw credentials ("defined") or token + endpoint
 * - Per-endpoint client handles stored in catalog order
 * - Aggregate listings flattened across every endpoint of a service
 */

pub mod aggregate;
pub mod config;
pub mod connector;
pub mod credentials;
pub mod error;
pub mod identity;
pub mod logging;
pub mod service;

// Re-export commonly used types
pub use config::ConnectorConfig;
pub use connector::Connector;
pub use credentials::{CredentialStyle, DefinedCredentials, ServiceCredentials, TokenCredentials};
pub use error::{ConnectorError, Result};
pub use identity::{AccessInfo, CatalogEntry, Endpoint, IdentityClient, ServiceCatalog};
pub use service::{
    ComputeClient, Flavor, Image, ImageClient, Server, ServiceClient, ServiceEntry,
    ServiceRegistry, Volume, VolumeClient,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
