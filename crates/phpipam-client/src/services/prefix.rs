//! Prefix bindings (`/prefix/`).
//!
//! The prefix controller allocates subnets and addresses from pools tagged
//! with a customer type, without the caller knowing the parent subnet.

use crate::client::{encode_segment, PhpIpamClient};
use crate::models::{Address, IpVersion, Subnet};
use crate::Result;

/// Prefix allocation operations.
#[derive(Debug, Clone, Copy)]
pub struct Prefix<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> Prefix<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    /// Subnets tagged with a customer type.
    pub async fn subnets(&self, customer_type: &str) -> Result<Vec<Subnet>> {
        let path = format!("prefix/{}", encode_segment(customer_type));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// Subnets of one IP version tagged with a customer type.
    pub async fn subnets_for_version(
        &self,
        customer_type: &str,
        version: IpVersion,
    ) -> Result<Vec<Subnet>> {
        self.client
            .fetch_or_default(&version_path(customer_type, version), &[])
            .await
    }

    /// Subnets of one IP version and mask tagged with a customer type.
    ///
    /// phpIPAM serves this from the same path as
    /// [`Prefix::first_available_subnet`]; the server decides which payload
    /// it returns.
    pub async fn subnets_for_mask(
        &self,
        customer_type: &str,
        version: IpVersion,
        mask: u8,
    ) -> Result<Vec<Subnet>> {
        self.client
            .fetch_or_default(&mask_path(customer_type, version, mask), &[])
            .await
    }

    /// Subnets carrying an external identifier.
    pub async fn subnets_by_external_id(&self, external_id: &str) -> Result<Vec<Subnet>> {
        let path = format!("prefix/external_id/{}", encode_segment(external_id));
        self.client.fetch_or_default(&path, &[]).await
    }

    /// First free subnet of `mask` bits in the customer type's pools, as CIDR.
    pub async fn first_available_subnet(
        &self,
        customer_type: &str,
        version: IpVersion,
        mask: u8,
    ) -> Result<String> {
        self.client
            .fetch(&mask_path(customer_type, version, mask), &[])
            .await
    }

    /// First free address in the customer type's pools.
    pub async fn first_available_address(
        &self,
        customer_type: &str,
        version: IpVersion,
    ) -> Result<String> {
        let path = format!("{}/address", version_path(customer_type, version));
        self.client.fetch(&path, &[]).await
    }

    /// Allocate the first free subnet of `mask` bits.
    ///
    /// `subnet` carries optional attributes for the new record.
    pub async fn create_first_available_subnet(
        &self,
        customer_type: &str,
        version: IpVersion,
        mask: u8,
        subnet: Option<&Subnet>,
    ) -> Result<Subnet> {
        self.client
            .create_resource(&mask_path(customer_type, version, mask), subnet, "subnets")
            .await
    }

    /// Allocate the first free address.
    ///
    /// `address` carries optional attributes for the new record.
    pub async fn create_first_available_address(
        &self,
        customer_type: &str,
        version: IpVersion,
        address: Option<&Address>,
    ) -> Result<Address> {
        let path = format!("{}/address", version_path(customer_type, version));
        self.client
            .create_resource(&path, address, "addresses")
            .await
    }
}

fn version_path(customer_type: &str, version: IpVersion) -> String {
    format!("prefix/{}/{version}", encode_segment(customer_type))
}

fn mask_path(customer_type: &str, version: IpVersion, mask: u8) -> String {
    format!("{}/{mask}", version_path(customer_type, version))
}
