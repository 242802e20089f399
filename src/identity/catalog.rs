//! Service catalog types
//!
//! The catalog is the list of service types and their endpoints advertised by
//! the identity service after authentication. Entry order is preserved; it
//! drives the order in which service clients are constructed.

use serde::Deserialize;

/// A single endpoint within a catalog entry
#[derive(Debug, Clone, Deserialize)]
pub struct Endpoint {
    /// Public URL, the address clients are expected to use
    #[serde(rename = "publicURL")]
    pub public_url: String,

    /// Internal URL, if advertised
    #[serde(rename = "internalURL", default)]
    pub internal_url: Option<String>,

    /// Admin URL, if advertised
    #[serde(rename = "adminURL", default)]
    pub admin_url: Option<String>,

    /// Region identifier
    #[serde(default)]
    pub region: Option<String>,
}

/// A service entry from the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// Service type (e.g. "compute", "image", "identity")
    #[serde(rename = "type")]
    pub service_type: String,

    /// Service name (e.g. "nova", "glance")
    #[serde(default)]
    pub name: String,

    /// Endpoints for this service, in catalog order
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// The full service catalog, in the order the identity service advertised it
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
}

impl ServiceCatalog {
    /// Build a catalog from entries
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// All entries, in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Advertised service types, in catalog order
    pub fn service_types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.service_type.as_str())
    }

    /// Endpoints for a service type, or an empty slice if not advertised
    pub fn endpoints(&self, service_type: &str) -> &[Endpoint] {
        self.entries
            .iter()
            .find(|e| e.service_type == service_type)
            .map(|e| e.endpoints.as_slice())
            .unwrap_or(&[])
    }

    /// Public URL of the first endpoint for a service type
    pub fn public_url(&self, service_type: &str) -> Option<&str> {
        self.endpoints(service_type)
            .first()
            .map(|e| e.public_url.as_str())
    }

    /// Check whether a service type is advertised
    pub fn contains(&self, service_type: &str) -> bool {
        self.entries.iter().any(|e| e.service_type == service_type)
    }

    /// Number of catalog entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
