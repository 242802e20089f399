//! Service client abstraction and implementations
//!
//! Every discovered service endpoint is wrapped in a client handle
//! implementing [`ServiceClient`]. Handles are opaque to the connector;
//! callers downcast to the concrete client type for domain operations.

mod compute;
mod image;
mod registry;
mod volume;

pub use compute::{ComputeClient, Flavor, Server};
pub use image::{Image, ImageClient};
pub use registry::{ServiceEntry, ServiceFactory, ServiceRegistry};
pub use volume::{Volume, VolumeClient};

use serde::de::DeserializeOwned;
use std::any::Any;
use std::fmt;

use crate::credentials::CredentialStyle;
use crate::error::{ConnectorError, Result};

/// Opaque handle to one service endpoint
///
/// The connector never invokes domain operations through this trait; those
/// live on the concrete client types, reached via [`ServiceClient::as_any`].
pub trait ServiceClient: fmt::Debug + Send + Sync + 'static {
    /// Service type this client serves (e.g. "compute", "image")
    fn service_type(&self) -> &str;

    /// Credential shape this client was constructed with
    fn credential_style(&self) -> CredentialStyle;

    /// Downcasting support for typed access
    fn as_any(&self) -> &dyn Any;
}

/// GET a JSON resource with an auth token header
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    token: &str,
) -> Result<T> {
    let response = http.get(url).header("X-Auth-Token", token).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ConnectorError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

/// Join an endpoint URL and a resource path
pub(crate) fn endpoint_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
