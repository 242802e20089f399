//! Identity v2.0 token request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;

/// Top-level token request body
#[derive(Serialize)]
pub(crate) struct TokenRequest {
    pub(crate) auth: Auth,
}

/// The auth block with password credentials and tenant scope
#[derive(Serialize)]
pub(crate) struct Auth {
    #[serde(rename = "passwordCredentials")]
    pub(crate) password_credentials: PasswordCredentials,
    #[serde(rename = "tenantName")]
    pub(crate) tenant_name: String,
}

/// Username and password
#[derive(Serialize)]
pub(crate) struct PasswordCredentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

/// The top-level token response
#[derive(Deserialize)]
pub(crate) struct AccessResponse {
    pub(crate) access: Access,
}

/// The access block with the token and the service catalog
#[derive(Deserialize)]
pub(crate) struct Access {
    pub(crate) token: Token,
    #[serde(rename = "serviceCatalog", default)]
    pub(crate) service_catalog: Vec<CatalogEntry>,
}

/// The issued token
#[derive(Deserialize)]
pub(crate) struct Token {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) expires: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_shape() {
        let req = TokenRequest {
            auth: Auth {
                password_credentials: PasswordCredentials {
                    username: "admin".to_string(),
                    password: "pw".to_string(),
                },
                tenant_name: "demo".to_string(),
            },
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["auth"]["passwordCredentials"]["username"], "admin");
        assert_eq!(json["auth"]["passwordCredentials"]["password"], "pw");
        assert_eq!(json["auth"]["tenantName"], "demo");
    }

    #[test]
    fn test_access_response_deserialize() {
        let json = r#"{
            "access": {
                "token": {
                    "id": "abc123",
                    "expires": "2026-01-01T00:00:00Z",
                    "tenant": {"id": "t1", "name": "demo"}
                },
                "serviceCatalog": [
                    {
                        "type": "compute",
                        "name": "nova",
                        "endpoints": [{"publicURL": "http://nova:8774/v2/t", "region": "RegionOne"}],
                        "endpoints_links": []
                    },
                    {
                        "type": "identity",
                        "name": "keystone",
                        "endpoints": [{"publicURL": "http://keystone:5000/v2.0"}]
                    }
                ],
                "user": {"id": "u1", "name": "admin"}
            }
        }"#;

        let resp: AccessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access.token.id, "abc123");
        assert!(resp.access.token.expires.is_some());
        assert_eq!(resp.access.service_catalog.len(), 2);
        assert_eq!(resp.access.service_catalog[0].service_type, "compute");
        assert_eq!(resp.access.service_catalog[1].service_type, "identity");
    }

    #[test]
    fn test_access_response_without_catalog() {
        let json = r#"{"access": {"token": {"id": "abc123"}}}"#;
        let resp: AccessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access.token.id, "abc123");
        assert!(resp.access.token.expires.is_none());
        assert!(resp.access.service_catalog.is_empty());
    }
}
