//! VLAN bindings (`/vlan/`).

use crate::client::{encode_segment, PhpIpamClient};
use crate::models::{CustomFields, Subnet, Vlan};
use crate::Result;
use reqwest::Method;

/// VLAN operations.
///
/// Updates are sent to the collection path with the id in the body.
#[derive(Debug, Clone, Copy)]
pub struct Vlans<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> Vlans<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    /// List VLANs.
    pub async fn list(&self) -> Result<Vec<Vlan>> {
        self.client.fetch_or_default("vlan", &[]).await
    }

    /// List VLANs in every L2 domain.
    pub async fn all(&self) -> Result<Vec<Vlan>> {
        self.client.fetch_or_default("vlan/all", &[]).await
    }

    /// Fetch a VLAN by id.
    pub async fn get(&self, id: &str) -> Result<Vlan> {
        let path = format!("vlan/{}", encode_segment(id));
        self.client.fetch(&path, &[]).await
    }

    /// Subnets attached to a VLAN.
    pub async fn subnets(&self, id: &str) -> Result<Vec<Subnet>> {
        let path = format!("vlan/{}/subnets", encode_segment(id));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Subnets attached to a VLAN within one section.
    pub async fn subnets_in_section(&self, id: &str, section_id: &str) -> Result<Vec<Subnet>> {
        let path = format!(
            "vlan/{}/subnets/{}",
            encode_segment(id),
            encode_segment(section_id)
        );
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Custom field definitions for VLANs.
    pub async fn custom_fields(&self) -> Result<CustomFields> {
        self.client
            .fetch_or_default("vlan/custom_fields", &[])
            .await
    }

    /// VLANs with the given 802.1Q number.
    pub async fn search(&self, number: u16) -> Result<Vec<Vlan>> {
        let path = format!("vlan/search/{number}");
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Create a VLAN.
    pub async fn create(&self, vlan: &Vlan) -> Result<Vlan> {
        self.client.create_resource("vlan", Some(vlan), "vlan").await
    }

    /// Update a VLAN; its id must be set.
    pub async fn update(&self, vlan: &Vlan) -> Result<Vlan> {
        self.client.update_resource("vlan", vlan, "vlan").await
    }

    /// Delete a VLAN.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("vlan/{}", encode_segment(id));
        self.client
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }
}
