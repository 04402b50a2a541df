//! VRF bindings (`/vrf/`).

use crate::client::{encode_segment, PhpIpamClient};
use crate::models::{CustomFields, Subnet, Vrf};
use crate::Result;
use reqwest::Method;

/// VRF operations.
#[derive(Debug, Clone, Copy)]
pub struct Vrfs<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> Vrfs<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    /// List VRFs.
    pub async fn list(&self) -> Result<Vec<Vrf>> {
        self.client.fetch_or_default("vrf", &[]).await
    }

    /// List every VRF.
    pub async fn all(&self) -> Result<Vec<Vrf>> {
        self.client.fetch_or_default("vrf/all", &[]).await
    }

    /// Fetch a VRF by id.
    pub async fn get(&self, id: &str) -> Result<Vrf> {
        let path = format!("vrf/{}", encode_segment(id));
        self.client.fetch(&path, &[]).await
    }

    /// Subnets inside a VRF.
    pub async fn subnets(&self, id: &str) -> Result<Vec<Subnet>> {
        let path = format!("vrf/{}/subnets", encode_segment(id));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Custom field definitions for VRFs.
    pub async fn custom_fields(&self) -> Result<CustomFields> {
        self.client.fetch_or_default("vrf/custom_fields", &[]).await
    }

    /// Create a VRF.
    pub async fn create(&self, vrf: &Vrf) -> Result<Vrf> {
        self.client.create_resource("vrf", Some(vrf), "vrf").await
    }

    /// Update a VRF; its id must be set.
    pub async fn update(&self, vrf: &Vrf) -> Result<Vrf> {
        self.client.update_resource("vrf", vrf, "vrf").await
    }

    /// Delete a VRF.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("vrf/{}", encode_segment(id));
        self.client
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }
}
