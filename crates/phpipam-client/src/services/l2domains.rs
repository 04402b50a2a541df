//! L2 domain bindings (`/l2domains/`).

use crate::client::{encode_segment, PhpIpamClient};
use crate::models::{CustomFields, L2Domain, Vlan};
use crate::Result;
use reqwest::Method;

/// L2 domain operations.
#[derive(Debug, Clone, Copy)]
pub struct L2Domains<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> L2Domains<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    /// List L2 domains.
    pub async fn list(&self) -> Result<Vec<L2Domain>> {
        self.client.fetch_or_default("l2domains", &[]).await
    }

    /// List every L2 domain.
    pub async fn all(&self) -> Result<Vec<L2Domain>> {
        self.client.fetch_or_default("l2domains/all", &[]).await
    }

    /// Fetch an L2 domain by id.
    pub async fn get(&self, id: &str) -> Result<L2Domain> {
        let path = format!("l2domains/{}", encode_segment(id));
        self.client.fetch(&path, &[]).await
    }

    /// VLANs in an L2 domain.
    pub async fn vlans(&self, id: &str) -> Result<Vec<Vlan>> {
        let path = format!("l2domains/{}/vlans", encode_segment(id));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Custom field definitions for L2 domains.
    pub async fn custom_fields(&self) -> Result<CustomFields> {
        self.client
            .fetch_or_default("l2domains/custom_fields", &[])
            .await
    }

    /// Create an L2 domain.
    pub async fn create(&self, domain: &L2Domain) -> Result<L2Domain> {
        self.client
            .create_resource("l2domains", Some(domain), "l2domains")
            .await
    }

    /// Update an L2 domain; its id must be set.
    pub async fn update(&self, domain: &L2Domain) -> Result<L2Domain> {
        self.client
            .update_resource("l2domains", domain, "l2domains")
            .await
    }

    /// Delete an L2 domain.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("l2domains/{}", encode_segment(id));
        self.client
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }
}
