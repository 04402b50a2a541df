//! Device bindings (`/devices/`).

use crate::client::{encode_segment, PhpIpamClient};
use crate::models::{Address, Device, Subnet};
use crate::Result;
use reqwest::Method;

/// Device operations.
#[derive(Debug, Clone, Copy)]
pub struct Devices<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> Devices<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    /// List devices.
    pub async fn list(&self) -> Result<Vec<Device>> {
        self.client.fetch_or_default("devices", &[]).await
    }

    /// List every device.
    pub async fn all(&self) -> Result<Vec<Device>> {
        self.client.fetch_or_default("devices/all", &[]).await
    }

    /// Fetch a device by id.
    pub async fn get(&self, id: &str) -> Result<Device> {
        let path = format!("devices/{}", encode_segment(id));
        self.client.fetch(&path, &[]).await
    }

    /// Subnets attached to a device.
    pub async fn subnets(&self, id: &str) -> Result<Vec<Subnet>> {
        let path = format!("devices/{}/subnets", encode_segment(id));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Addresses attached to a device.
    pub async fn addresses(&self, id: &str) -> Result<Vec<Address>> {
        let path = format!("devices/{}/addresses", encode_segment(id));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Devices matching a search string.
    pub async fn search(&self, query: &str) -> Result<Vec<Device>> {
        let path = format!("devices/search/{}", encode_segment(query));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Create a device.
    pub async fn create(&self, device: &Device) -> Result<Device> {
        self.client
            .create_resource("devices", Some(device), "devices")
            .await
    }

    /// Update a device; its id must be set.
    pub async fn update(&self, device: &Device) -> Result<Device> {
        self.client
            .update_resource("devices", device, "devices")
            .await
    }

    /// Delete a device.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("devices/{}", encode_segment(id));
        self.client
            .send_empty::<()>(Method::DELETE, &path, None)
            .await
    }
}
