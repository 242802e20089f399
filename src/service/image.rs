//! Image service client (token credential style)
//!
//! Constructed per endpoint with a pre-issued token and the catalog's public
//! URL; ready to call without further authentication.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use super::{endpoint_url, get_json, ServiceClient};
use crate::credentials::{CredentialStyle, TokenCredentials};
use crate::error::Result;

/// An image record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Deserialize)]
struct Images {
    images: Vec<Image>,
}

/// Client for an image service endpoint
pub struct ImageClient {
    http: reqwest::Client,
    credentials: TokenCredentials,
}

impl ImageClient {
    pub(crate) fn new(http: reqwest::Client, credentials: TokenCredentials) -> Self {
        Self { http, credentials }
    }

    /// The endpoint this client targets
    pub fn endpoint(&self) -> &str {
        &self.credentials.endpoint
    }

    /// The token this client was constructed with
    pub fn token(&self) -> &str {
        &self.credentials.token
    }

    /// List all images
    pub async fn list_images(&self) -> Result<Vec<Image>> {
        let url = endpoint_url(&self.credentials.endpoint, "v2/images");
        let body: Images = get_json(&self.http, &url, &self.credentials.token).await?;
        Ok(body.images)
    }
}

impl fmt::Debug for ImageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageClient")
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl ServiceClient for ImageClient {
    fn service_type(&self) -> &str {
        "image"
    }

    fn credential_style(&self) -> CredentialStyle {
        CredentialStyle::Token
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_exposes_endpoint_and_token() {
        let client = ImageClient::new(
            reqwest::Client::new(),
            TokenCredentials {
                endpoint: "http://glance:9292".to_string(),
                token: "tok".to_string(),
            },
        );
        assert_eq!(client.endpoint(), "http://glance:9292");
        assert_eq!(client.token(), "tok");
        assert_eq!(client.service_type(), "image");
        assert_eq!(client.credential_style(), CredentialStyle::Token);
    }

    #[test]
    fn test_images_deserialize() {
        let json = r#"{
            "images": [
                {"id": "img-1", "name": "cirros", "status": "active", "size": 13267968},
                {"id": "img-2", "name": null, "status": "queued"}
            ],
            "schema": "/v2/schemas/images",
            "first": "/v2/images"
        }"#;
        let body: Images = serde_json::from_str(json).unwrap();
        assert_eq!(body.images.len(), 2);
        assert_eq!(body.images[0].name.as_deref(), Some("cirros"));
        assert_eq!(body.images[1].name, None);
        assert_eq!(body.images[1].size, None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = ImageClient::new(
            reqwest::Client::new(),
            TokenCredentials {
                endpoint: "http://glance:9292".to_string(),
                token: "super-secret".to_string(),
            },
        );
        assert!(!format!("{:?}", client).contains("super-secret"));
    }
}
