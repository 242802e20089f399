//! Service registry and factories
//!
//! Maps each service-type name to a client factory plus the credential style
//! its constructor expects, or to an explicit `Unsupported` marker for
//! catalog entries the connector deliberately does not wire up. The registry
//! is passed into the connector's constructor and never mutated afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{ComputeClient, ImageClient, ServiceClient, VolumeClient};
use crate::credentials::{CredentialStyle, ServiceCredentials};
use crate::error::{ConnectorError, Result};

/// Factory function type for creating service clients
///
/// Arguments are the shared HTTP client, the service-type name, and the
/// credential payload. Factories perform no network I/O.
pub type ServiceFactory =
    Arc<dyn Fn(&reqwest::Client, &str, ServiceCredentials) -> Result<Arc<dyn ServiceClient>> + Send + Sync>;

/// Registry entry for one service type
#[derive(Clone)]
pub enum ServiceEntry {
    /// Wired-up service: factory plus the credential style it expects
    Supported {
        factory: ServiceFactory,
        style: CredentialStyle,
    },

    /// Advertised by deployments but deliberately not wired up
    Unsupported,
}

impl ServiceEntry {
    /// Whether this entry has a factory
    pub fn is_supported(&self) -> bool {
        matches!(self, ServiceEntry::Supported { .. })
    }

    /// The credential style, if supported
    pub fn style(&self) -> Option<CredentialStyle> {
        match self {
            ServiceEntry::Supported { style, .. } => Some(*style),
            ServiceEntry::Unsupported => None,
        }
    }
}

impl fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceEntry::Supported { style, .. } => {
                f.debug_struct("Supported").field("style", style).finish()
            }
            ServiceEntry::Unsupported => write!(f, "Unsupported"),
        }
    }
}

/// Registry of service types the connector knows how to instantiate
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    entries: HashMap<String, ServiceEntry>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry with the built-in service table
    ///
    /// Wires up identity, compute, computev3, volume, volumev2 (defined
    /// style) and image (token style). The s3, ec2, metering, object-store,
    /// orchestration, and cloudformation types are marked unsupported.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        // The identity client is the trust anchor and is constructed during
        // bootstrap, never through the generic loop.
        registry.register(
            "identity",
            CredentialStyle::Defined,
            Arc::new(|_, _, _| {
                Err(ConnectorError::InvalidConfig {
                    message: "identity client is constructed during bootstrap".to_string(),
                })
            }),
        );

        for service_type in ["compute", "computev3"] {
            registry.register(
                service_type,
                CredentialStyle::Defined,
                Arc::new(|http, service_type, credentials| match credentials {
                    ServiceCredentials::Defined(creds) => Ok(Arc::new(ComputeClient::new(
                        http.clone(),
                        service_type,
                        creds,
                    ))
                        as Arc<dyn ServiceClient>),
                    other => Err(mismatch(service_type, CredentialStyle::Defined, &other)),
                }),
            );
        }

        for service_type in ["volume", "volumev2"] {
            registry.register(
                service_type,
                CredentialStyle::Defined,
                Arc::new(|http, service_type, credentials| match credentials {
                    ServiceCredentials::Defined(creds) => Ok(Arc::new(VolumeClient::new(
                        http.clone(),
                        service_type,
                        creds,
                    ))
                        as Arc<dyn ServiceClient>),
                    other => Err(mismatch(service_type, CredentialStyle::Defined, &other)),
                }),
            );
        }

        registry.register(
            "image",
            CredentialStyle::Token,
            Arc::new(|http, service_type, credentials| match credentials {
                ServiceCredentials::Token(creds) => {
                    Ok(Arc::new(ImageClient::new(http.clone(), creds)) as Arc<dyn ServiceClient>)
                }
                other => Err(mismatch(service_type, CredentialStyle::Token, &other)),
            }),
        );

        for service_type in [
            "s3",
            "ec2",
            "metering",
            "object-store",
            "orchestration",
            "cloudformation",
        ] {
            registry.register_unsupported(service_type);
        }

        registry
    }

    /// Register a service factory
    pub fn register(
        &mut self,
        service_type: impl Into<String>,
        style: CredentialStyle,
        factory: ServiceFactory,
    ) {
        self.entries
            .insert(service_type.into(), ServiceEntry::Supported { factory, style });
    }

    /// Mark a service type as advertised-but-unsupported
    pub fn register_unsupported(&mut self, service_type: impl Into<String>) {
        self.entries
            .insert(service_type.into(), ServiceEntry::Unsupported);
    }

    /// Remove a service type
    pub fn unregister(&mut self, service_type: &str) -> bool {
        self.entries.remove(service_type).is_some()
    }

    /// Look up the entry for a service type
    pub fn get(&self, service_type: &str) -> Option<&ServiceEntry> {
        self.entries.get(service_type)
    }

    /// Check if a service type has a factory
    pub fn is_supported(&self, service_type: &str) -> bool {
        self.get(service_type)
            .map(ServiceEntry::is_supported)
            .unwrap_or(false)
    }

    /// The credential style configured for a service type
    pub fn style(&self, service_type: &str) -> Option<CredentialStyle> {
        self.get(service_type).and_then(ServiceEntry::style)
    }

    /// All registered service-type names, sorted
    pub fn service_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

fn mismatch(
    service_type: &str,
    expected: CredentialStyle,
    got: &ServiceCredentials,
) -> ConnectorError {
    ConnectorError::InvalidConfig {
        message: format!(
            "service '{}' expects {} credentials, got {}",
            service_type,
            expected,
            got.style()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::TokenCredentials;

    #[test]
    fn test_builtin_table() {
        let registry = ServiceRegistry::builtin();

        assert_eq!(registry.style("compute"), Some(CredentialStyle::Defined));
        assert_eq!(registry.style("computev3"), Some(CredentialStyle::Defined));
        assert_eq!(registry.style("volume"), Some(CredentialStyle::Defined));
        assert_eq!(registry.style("volumev2"), Some(CredentialStyle::Defined));
        assert_eq!(registry.style("image"), Some(CredentialStyle::Token));
        assert_eq!(registry.style("identity"), Some(CredentialStyle::Defined));

        for unsupported in ["s3", "ec2", "metering", "object-store", "orchestration", "cloudformation"] {
            assert!(registry.get(unsupported).is_some());
            assert!(!registry.is_supported(unsupported));
        }

        assert!(registry.get("unknown-service").is_none());
    }

    #[test]
    fn test_image_factory_builds_token_client() {
        let registry = ServiceRegistry::builtin();
        let http = reqwest::Client::new();

        let Some(ServiceEntry::Supported { factory, .. }) = registry.get("image") else {
            panic!("image should be supported");
        };

        let client = factory(
            &http,
            "image",
            ServiceCredentials::Token(TokenCredentials {
                endpoint: "http://glance:9292".to_string(),
                token: "tok".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(client.service_type(), "image");
        assert!(client.as_any().downcast_ref::<ImageClient>().is_some());
    }

    #[test]
    fn test_factory_rejects_mismatched_style() {
        let registry = ServiceRegistry::builtin();
        let http = reqwest::Client::new();

        let Some(ServiceEntry::Supported { factory, .. }) = registry.get("compute") else {
            panic!("compute should be supported");
        };

        let err = factory(
            &http,
            "compute",
            ServiceCredentials::Token(TokenCredentials {
                endpoint: "http://nova:8774".to_string(),
                token: "tok".to_string(),
            }),
        )
        .unwrap_err();

        assert!(matches!(err, ConnectorError::InvalidConfig { .. }));
    }

    #[test]
    fn test_register_custom_service() {
        let mut registry = ServiceRegistry::new();
        registry.register(
            "dns",
            CredentialStyle::Token,
            Arc::new(|http, _, credentials| match credentials {
                ServiceCredentials::Token(creds) => {
                    Ok(Arc::new(ImageClient::new(http.clone(), creds)) as Arc<dyn ServiceClient>)
                }
                other => Err(mismatch("dns", CredentialStyle::Token, &other)),
            }),
        );

        assert!(registry.is_supported("dns"));
        assert!(registry.unregister("dns"));
        assert!(registry.get("dns").is_none());
    }

    #[test]
    fn test_service_types_sorted() {
        let registry = ServiceRegistry::builtin();
        let types = registry.service_types();
        let mut sorted = types.clone();
        sorted.sort_unstable();
        assert_eq!(types, sorted);
        assert!(types.contains(&"compute"));
    }
}
