//! Tools controller bindings (`/tools/`).
//!
//! The tools controller groups the auxiliary phpIPAM objects: address tags,
//! device types, nameserver sets, scan agents, locations, racks and NAT
//! rules. It also offers read-only views of VLANs and VRFs.

use crate::client::{encode_segment, require_id, PhpIpamClient};
use crate::models::{
    Address, Device, DeviceType, Location, Nameserver, Nat, Rack, Resource, ScanAgent, Subnet,
    Tag, Vlan, Vrf,
};
use crate::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

const TAGS: &str = "tools/tags";
const DEVICE_TYPES: &str = "tools/device_types";
const VLANS: &str = "tools/vlans";
const VRFS: &str = "tools/vrfs";
const NAMESERVERS: &str = "tools/nameservers";
const SCAN_AGENTS: &str = "tools/scanagents";
const LOCATIONS: &str = "tools/locations";
const RACKS: &str = "tools/racks";
const NAT: &str = "tools/nat";

/// Tools controller operations.
#[derive(Debug, Clone, Copy)]
pub struct Tools<'a> {
    client: &'a PhpIpamClient,
}

impl<'a> Tools<'a> {
    pub(crate) const fn new(client: &'a PhpIpamClient) -> Self {
        Self { client }
    }

    // Tags

    /// List address tags.
    pub async fn tags(&self) -> Result<Vec<Tag>> {
        self.list(TAGS).await
    }

    /// Fetch an address tag.
    pub async fn tag(&self, id: &str) -> Result<Tag> {
        self.get(TAGS, id).await
    }

    /// Create an address tag.
    pub async fn create_tag(&self, tag: &Tag) -> Result<Tag> {
        self.create(TAGS, tag).await
    }

    /// Update an address tag; its id must be set.
    pub async fn update_tag(&self, tag: &Tag) -> Result<Tag> {
        self.update(TAGS, tag).await
    }

    /// Delete an address tag.
    pub async fn delete_tag(&self, id: &str) -> Result<()> {
        self.delete(TAGS, id).await
    }

    // Device types

    /// List device types.
    pub async fn device_types(&self) -> Result<Vec<DeviceType>> {
        self.list(DEVICE_TYPES).await
    }

    /// Fetch a device type.
    pub async fn device_type(&self, id: &str) -> Result<DeviceType> {
        self.get(DEVICE_TYPES, id).await
    }

    /// Devices of a given type.
    pub async fn devices_by_type(&self, id: &str) -> Result<Vec<Device>> {
        self.children(DEVICE_TYPES, id, "devices").await
    }

    /// Create a device type.
    pub async fn create_device_type(&self, device_type: &DeviceType) -> Result<DeviceType> {
        self.create(DEVICE_TYPES, device_type).await
    }

    /// Update a device type; its id must be set.
    pub async fn update_device_type(&self, device_type: &DeviceType) -> Result<DeviceType> {
        self.update(DEVICE_TYPES, device_type).await
    }

    /// Delete a device type.
    pub async fn delete_device_type(&self, id: &str) -> Result<()> {
        self.delete(DEVICE_TYPES, id).await
    }

    // VLANs and VRFs

    /// List VLANs through the tools controller.
    pub async fn vlans(&self) -> Result<Vec<Vlan>> {
        self.list(VLANS).await
    }

    /// Fetch a VLAN through the tools controller.
    pub async fn vlan(&self, id: &str) -> Result<Vlan> {
        self.get(VLANS, id).await
    }

    /// Subnets attached to a VLAN.
    pub async fn vlan_subnets(&self, id: &str) -> Result<Vec<Subnet>> {
        self.children(VLANS, id, "subnets").await
    }

    /// List VRFs through the tools controller.
    pub async fn vrfs(&self) -> Result<Vec<Vrf>> {
        self.list(VRFS).await
    }

    /// Fetch a VRF through the tools controller.
    pub async fn vrf(&self, id: &str) -> Result<Vrf> {
        self.get(VRFS, id).await
    }

    /// Subnets inside a VRF.
    pub async fn vrf_subnets(&self, id: &str) -> Result<Vec<Subnet>> {
        self.children(VRFS, id, "subnets").await
    }

    // Nameservers

    /// List nameserver sets.
    pub async fn nameservers(&self) -> Result<Vec<Nameserver>> {
        self.list(NAMESERVERS).await
    }

    /// Fetch a nameserver set.
    pub async fn nameserver(&self, id: &str) -> Result<Nameserver> {
        self.get(NAMESERVERS, id).await
    }

    /// Create a nameserver set.
    pub async fn create_nameserver(&self, nameserver: &Nameserver) -> Result<Nameserver> {
        self.create(NAMESERVERS, nameserver).await
    }

    /// Update a nameserver set; its id must be set.
    pub async fn update_nameserver(&self, nameserver: &Nameserver) -> Result<Nameserver> {
        self.update(NAMESERVERS, nameserver).await
    }

    /// Delete a nameserver set.
    pub async fn delete_nameserver(&self, id: &str) -> Result<()> {
        self.delete(NAMESERVERS, id).await
    }

    // Scan agents

    /// List scan agents.
    pub async fn scan_agents(&self) -> Result<Vec<ScanAgent>> {
        self.list(SCAN_AGENTS).await
    }

    /// Fetch a scan agent.
    pub async fn scan_agent(&self, id: &str) -> Result<ScanAgent> {
        self.get(SCAN_AGENTS, id).await
    }

    // Locations

    /// List locations.
    pub async fn locations(&self) -> Result<Vec<Location>> {
        self.list(LOCATIONS).await
    }

    /// Fetch a location.
    pub async fn location(&self, id: &str) -> Result<Location> {
        self.get(LOCATIONS, id).await
    }

    /// Subnets at a location.
    pub async fn location_subnets(&self, id: &str) -> Result<Vec<Subnet>> {
        self.children(LOCATIONS, id, "subnets").await
    }

    /// Devices at a location.
    pub async fn location_devices(&self, id: &str) -> Result<Vec<Device>> {
        self.children(LOCATIONS, id, "devices").await
    }

    /// Racks at a location.
    pub async fn location_racks(&self, id: &str) -> Result<Vec<Rack>> {
        self.children(LOCATIONS, id, "racks").await
    }

    /// Addresses at a location.
    pub async fn location_addresses(&self, id: &str) -> Result<Vec<Address>> {
        self.children(LOCATIONS, id, "ipaddresses").await
    }

    /// Create a location.
    pub async fn create_location(&self, location: &Location) -> Result<Location> {
        self.create(LOCATIONS, location).await
    }

    /// Update a location; its id must be set.
    pub async fn update_location(&self, location: &Location) -> Result<Location> {
        self.update(LOCATIONS, location).await
    }

    /// Delete a location.
    pub async fn delete_location(&self, id: &str) -> Result<()> {
        self.delete(LOCATIONS, id).await
    }

    // Racks

    /// List racks.
    pub async fn racks(&self) -> Result<Vec<Rack>> {
        self.list(RACKS).await
    }

    /// Fetch a rack.
    pub async fn rack(&self, id: &str) -> Result<Rack> {
        self.get(RACKS, id).await
    }

    /// Devices mounted in a rack.
    pub async fn rack_devices(&self, id: &str) -> Result<Vec<Device>> {
        self.children(RACKS, id, "devices").await
    }

    /// Create a rack.
    pub async fn create_rack(&self, rack: &Rack) -> Result<Rack> {
        self.create(RACKS, rack).await
    }

    /// Update a rack; its id must be set.
    pub async fn update_rack(&self, rack: &Rack) -> Result<Rack> {
        self.update(RACKS, rack).await
    }

    /// Delete a rack.
    pub async fn delete_rack(&self, id: &str) -> Result<()> {
        self.delete(RACKS, id).await
    }

    // NAT

    /// List NAT rules.
    pub async fn nats(&self) -> Result<Vec<Nat>> {
        self.list(NAT).await
    }

    /// Fetch a NAT rule.
    pub async fn nat(&self, id: &str) -> Result<Nat> {
        self.get(NAT, id).await
    }

    /// Objects referenced by a NAT rule, as returned by phpIPAM.
    pub async fn nat_objects(&self, id: &str) -> Result<Vec<Value>> {
        self.children(NAT, id, "objects").await
    }

    /// Objects referenced by a NAT rule with full details, keyed by kind.
    pub async fn nat_objects_full(&self, id: &str) -> Result<Map<String, Value>> {
        self.children(NAT, id, "objects_full").await
    }

    /// Create a NAT rule.
    pub async fn create_nat(&self, nat: &Nat) -> Result<Nat> {
        self.create(NAT, nat).await
    }

    /// Update a NAT rule; its id must be set.
    pub async fn update_nat(&self, nat: &Nat) -> Result<Nat> {
        self.update(NAT, nat).await
    }

    /// Delete a NAT rule.
    pub async fn delete_nat(&self, id: &str) -> Result<()> {
        self.delete(NAT, id).await
    }
}

impl Tools<'_> {
    async fn list<T>(&self, controller: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.client.fetch_or_default(controller, &[]).await
    }

    async fn get<T>(&self, controller: &str, id: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.client.fetch(&item_path(controller, id), &[]).await
    }

    async fn children<T>(&self, controller: &str, id: &str, child: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = format!("{}/{child}", item_path(controller, id));
        self.client.fetch_or_default(&path, &[]).await
    }

    async fn create<T>(&self, controller: &str, entity: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Resource,
    {
        self.client
            .create_resource(controller, Some(entity), controller)
            .await
    }

    async fn update<T>(&self, controller: &str, entity: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Resource,
    {
        let id = require_id(entity)?;
        self.client
            .update_resource(&item_path(controller, id), entity, controller)
            .await
    }

    async fn delete(&self, controller: &str, id: &str) -> Result<()> {
        self.client
            .send_empty::<()>(Method::DELETE, &item_path(controller, id), None)
            .await
    }
}

fn item_path(controller: &str, id: &str) -> String {
    format!("{controller}/{}", encode_segment(id))
}
