//! Section bindings (`/sections/`).

use crate::client::{encode_segment, require_id, PhpIpamClient};
use crate::models::{CustomFields, Section, Subnet};
use crate::Result;
use reqwest::Method;

/// Section operations.
#[derive(Debug, Clone, Copy)]
pub struct Sections<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> Sections<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    /// List all sections.
    pub async fn list(&self) -> Result<Vec<Section>> {
        self.client.fetch_or_default("sections", &[]).await
    }

    /// Fetch a section by id.
    pub async fn get(&self, id: &str) -> Result<Section> {
        let path = format!("sections/{}", encode_segment(id));
        self.client.fetch(&path, &[]).await
    }

    /// Fetch a section by name.
    pub async fn get_by_name(&self, name: &str) -> Result<Section> {
        let path = format!("sections/{}", encode_segment(name));
        self.client.fetch(&path, &[]).await
    }

    /// Create a section and return it as stored by phpIPAM.
    pub async fn create(&self, section: &Section) -> Result<Section> {
        self.client
            .create_resource("sections", Some(section), "sections")
            .await
    }

    /// Update a section; its id must be set.
    pub async fn update(&self, section: &Section) -> Result<Section> {
        let id = require_id(section)?;
        let path = format!("sections/{}", encode_segment(id));
        self.client
            .update_resource(&path, section, "sections")
            .await
    }

    /// Delete a section.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("sections/{}", encode_segment(id));
        self.client
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }

    /// Subnets belonging to a section.
    pub async fn subnets(&self, id: &str) -> Result<Vec<Subnet>> {
        let path = format!("sections/{}/subnets", encode_segment(id));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Subnets belonging to a section, with their addresses.
    pub async fn subnets_with_addresses(&self, id: &str) -> Result<Vec<Subnet>> {
        let path = format!("sections/{}/subnets/addresses", encode_segment(id));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Custom field definitions for sections.
    pub async fn custom_fields(&self) -> Result<CustomFields> {
        self.client
            .fetch_or_default("sections/custom_fields", &[])
            .await
    }
}
