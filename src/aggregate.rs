//! Aggregate listings across every endpoint of a service
//!
//! Convenience layer over the per-endpoint client lists: each method walks
//! the handles for one service type and concatenates the listing results in
//! catalog order.

use crate::connector::Connector;
use crate::error::Result;
use crate::service::{ComputeClient, Flavor, Image, ImageClient, Volume, VolumeClient};

impl Connector {
    /// All flavors from every compute endpoint
    pub async fn flavors(&self) -> Result<Vec<Flavor>> {
        let mut all = Vec::new();
        for service_type in ["compute", "computev3"] {
            for client in self.typed_clients::<ComputeClient>(service_type) {
                all.extend(client.list_flavors().await?);
            }
        }
        Ok(all)
    }

    /// All images from every image endpoint
    pub async fn images(&self) -> Result<Vec<Image>> {
        let mut all = Vec::new();
        for client in self.typed_clients::<ImageClient>("image") {
            all.extend(client.list_images().await?);
        }
        Ok(all)
    }

    /// All volumes from every volume endpoint, v1 and v2 alike
    pub async fn volumes(&self) -> Result<Vec<Volume>> {
        let mut all = Vec::new();
        for service_type in ["volume", "volumev2"] {
            for client in self.typed_clients::<VolumeClient>(service_type) {
                all.extend(client.list_volumes().await?);
            }
        }
        Ok(all)
    }
}
