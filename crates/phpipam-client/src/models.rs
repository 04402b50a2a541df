//! phpIPAM entity models.
//!
//! Entities mirror the phpIPAM JSON schema field for field. phpIPAM returns
//! identifiers and counters as strings on some endpoints and numbers on
//! others; every such field is an `Option<String>` here and `0`/`1` switches
//! are `Option<bool>`. Unset fields are omitted when an entity is sent back.

use crate::Result;
use phpipam_core::types::lenient;
use phpipam_core::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An entity addressed by a phpIPAM identifier.
pub trait Resource {
    /// Human readable kind used in error messages.
    const KIND: &'static str;

    /// The entity identifier, if it has been assigned.
    fn id(&self) -> Option<&str>;
}

macro_rules! impl_resource {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Resource for $ty {
                const KIND: &'static str = $kind;

                fn id(&self) -> Option<&str> {
                    self.id.as_deref()
                }
            }
        )*
    };
}

impl_resource! {
    Section => "Section",
    Subnet => "Subnet",
    Address => "Address",
    Tag => "Tag",
    Vlan => "VLAN",
    L2Domain => "L2 domain",
    Vrf => "VRF",
    Device => "Device",
    DeviceType => "Device type",
    Nameserver => "Nameserver",
    ScanAgent => "Scan agent",
    Location => "Location",
    Rack => "Rack",
    Nat => "NAT",
}

/// Section, the top-level container for subnets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    /// Section identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Section name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent section identifier (`0` for root sections).
    #[serde(
        rename = "masterSection",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub master_section: Option<String>,
    /// Group permissions, as the JSON-encoded string phpIPAM stores.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    /// Reject overlapping subnets.
    #[serde(rename = "strictMode", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub strict_mode: Option<bool>,
    /// Subnet ordering mode.
    #[serde(
        rename = "subnetOrdering",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub subnet_ordering: Option<String>,
    /// Display order.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// Last modification timestamp.
    #[serde(
        rename = "editDate",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_date: Option<String>,
    /// Show VLANs in the subnet list.
    #[serde(rename = "showVLAN", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub show_vlan: Option<bool>,
    /// Show VRFs in the subnet list.
    #[serde(rename = "showVRF", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub show_vrf: Option<bool>,
    /// Show only supernets in the subnet list.
    #[serde(
        rename = "showSupernetOnly",
        with = "lenient::flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_supernet_only: Option<bool>,
    /// Nameserver set identifier.
    #[serde(
        rename = "DNS",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub dns: Option<String>,
}

impl Section {
    /// A new section with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Custom field definition, keyed by field name in phpIPAM responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    /// Column name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// SQL column type.
    #[serde(
        rename = "type",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub field_type: Option<String>,
    /// Field comment shown in the UI.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Default value.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether a value is mandatory.
    #[serde(with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Visibility permissions.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

/// Custom field definitions keyed by field name.
pub type CustomFields = BTreeMap<String, CustomField>;

/// Subnet or folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subnet {
    /// Subnet identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Network address.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    /// Prefix length.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    /// Owning section.
    #[serde(
        rename = "sectionId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_id: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Linked IPv6/IPv4 subnet.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub linked_subnet: Option<String>,
    /// Firewall address object name.
    #[serde(
        rename = "firewallAddressObject",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub firewall_address_object: Option<String>,
    /// VRF identifier.
    #[serde(
        rename = "vrfId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub vrf_id: Option<String>,
    /// Parent subnet identifier (`0` for top-level subnets).
    #[serde(
        rename = "masterSubnetId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub master_subnet_id: Option<String>,
    /// Allow address requests.
    #[serde(rename = "allowRequests", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub allow_requests: Option<bool>,
    /// VLAN identifier.
    #[serde(
        rename = "vlanId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub vlan_id: Option<String>,
    /// Show the subnet name instead of the network address.
    #[serde(rename = "showName", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub show_name: Option<bool>,
    /// Device identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Group permissions, either a JSON object or its string encoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Value>,
    /// Periodically ping addresses.
    #[serde(rename = "pingSubnet", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub ping_subnet: Option<bool>,
    /// Discover new hosts.
    #[serde(
        rename = "discoverSubnet",
        with = "lenient::flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub discover_subnet: Option<bool>,
    /// Resolve DNS names.
    #[serde(rename = "resolveDNS", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub resolve_dns: Option<bool>,
    /// Create reverse DNS zone.
    #[serde(rename = "DNSrecursive", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub dns_recursive: Option<bool>,
    /// Show DNS records.
    #[serde(rename = "DNSrecords", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub dns_records: Option<bool>,
    /// Nameserver set identifier.
    #[serde(
        rename = "nameserverId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nameserver_id: Option<String>,
    /// Scan agent identifier.
    #[serde(
        rename = "scanAgent",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub scan_agent: Option<String>,
    /// Customer identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Folder rather than subnet.
    #[serde(rename = "isFolder", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub is_folder: Option<bool>,
    /// Marked as full.
    #[serde(rename = "isFull", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub is_full: Option<bool>,
    /// Marked as pool.
    #[serde(rename = "isPool", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub is_pool: Option<bool>,
    /// Subnet state tag identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Usage alert threshold in percent.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub threshold: Option<String>,
    /// Location identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Last modification timestamp.
    #[serde(
        rename = "editDate",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_date: Option<String>,
    /// Last ping scan timestamp.
    #[serde(
        rename = "lastScan",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_scan: Option<String>,
    /// Last discovery timestamp.
    #[serde(
        rename = "lastDiscovery",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_discovery: Option<String>,
    /// Server-side subnet calculation; read only.
    #[serde(skip_serializing)]
    pub calculation: Option<Value>,
}

impl Subnet {
    /// A new subnet `network/mask` inside the given section.
    pub fn new(
        section_id: impl Into<String>,
        network: impl Into<String>,
        mask: impl Into<String>,
    ) -> Self {
        Self {
            section_id: Some(section_id.into()),
            subnet: Some(network.into()),
            mask: Some(mask.into()),
            ..Self::default()
        }
    }

    /// The subnet in CIDR notation, if both network and mask are known.
    #[must_use]
    pub fn cidr(&self) -> Option<String> {
        match (&self.subnet, &self.mask) {
            (Some(subnet), Some(mask)) => Some(format!("{subnet}/{mask}")),
            _ => None,
        }
    }

    /// Permissions as a group-id to level map.
    ///
    /// phpIPAM returns permissions either as an object or as a string holding
    /// the JSON encoding of one; both forms are accepted. Unset permissions
    /// yield an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] when the value is neither form.
    pub fn permissions_map(&self) -> Result<BTreeMap<String, String>> {
        let parsed;
        let object = match &self.permissions {
            None | Some(Value::Null) => return Ok(BTreeMap::new()),
            Some(Value::String(raw)) if raw.trim().is_empty() => return Ok(BTreeMap::new()),
            Some(Value::String(raw)) => {
                parsed = serde_json::from_str::<Value>(raw).map_err(|err| {
                    Error::ParseError(format!("Invalid subnet permissions: {err}"))
                })?;
                &parsed
            }
            Some(value) => value,
        };

        let Value::Object(entries) = object else {
            return Err(Error::ParseError(
                "Subnet permissions are not an object".to_string(),
            ));
        };

        Ok(entries
            .iter()
            .map(|(group, level)| {
                let level = match level {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (group.clone(), level)
            })
            .collect())
    }

    /// Permissions encoded as the JSON string phpIPAM stores.
    #[must_use]
    pub fn permissions_string(&self) -> Option<String> {
        match &self.permissions {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(raw.clone()),
            Some(value) => Some(value.to_string()),
        }
    }

    /// Replace the permissions with the given group-id to level map.
    pub fn set_permissions_map(&mut self, permissions: &BTreeMap<String, String>) {
        let object = permissions
            .iter()
            .map(|(group, level)| (group.clone(), Value::String(level.clone())))
            .collect();
        self.permissions = Some(Value::Object(object));
    }
}

/// Address usage of a subnet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubnetUsage {
    /// Number of used addresses.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub used: Option<String>,
    /// Number of usable host addresses.
    #[serde(
        rename = "maxhosts",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_hosts: Option<String>,
    /// Number of free addresses.
    #[serde(
        rename = "freehosts",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub free_hosts: Option<String>,
    /// Free addresses in percent.
    #[serde(
        rename = "freehosts_percent",
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub free_hosts_percent: Option<f64>,
}

/// IP address record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Address identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning subnet.
    #[serde(
        rename = "subnetId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub subnet_id: Option<String>,
    /// IP address.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Address is the subnet gateway.
    #[serde(with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub is_gateway: Option<bool>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hostname.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// MAC address.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    /// Owner.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Address state tag identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Skip PTR record creation.
    #[serde(rename = "PTRignore", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub ptr_ignore: Option<bool>,
    /// PTR record identifier.
    #[serde(
        rename = "PTR",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ptr: Option<String>,
    /// Device identifier.
    #[serde(
        rename = "deviceId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_id: Option<String>,
    /// Device port.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// Note.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Last time the address answered a scan.
    #[serde(
        rename = "lastSeen",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen: Option<String>,
    /// Exclude from ping scans.
    #[serde(rename = "excludePing", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub exclude_ping: Option<bool>,
    /// Last modification timestamp.
    #[serde(
        rename = "editDate",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_date: Option<String>,
}

impl Address {
    /// A new address record inside the given subnet.
    pub fn new(subnet_id: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            subnet_id: Some(subnet_id.into()),
            ip: Some(ip.into()),
            ..Self::default()
        }
    }
}

/// Address state tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Tag identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tag type name.
    #[serde(
        rename = "type",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag_type: Option<String>,
    /// Show the tag in address lists.
    #[serde(rename = "showtag", with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub show_tag: Option<bool>,
    /// Background color.
    #[serde(
        rename = "bgcolor",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bg_color: Option<String>,
    /// Foreground color.
    #[serde(
        rename = "fgcolor",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fg_color: Option<String>,
    /// Display name.
    #[serde(
        rename = "displayname",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// VLAN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vlan {
    /// VLAN identifier; phpIPAM also reports it as `vlanId`.
    #[serde(
        alias = "vlanId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// L2 domain identifier.
    #[serde(
        rename = "domainId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub domain_id: Option<String>,
    /// VLAN name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 802.1Q VLAN number.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Last modification timestamp.
    #[serde(
        rename = "editDate",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_date: Option<String>,
}

/// Layer 2 domain grouping VLANs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct L2Domain {
    /// Domain identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Domain name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sections the domain is available in.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

/// Virtual routing and forwarding instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrf {
    /// VRF identifier; phpIPAM also reports it as `vrfId`.
    #[serde(
        alias = "vrfId",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// VRF name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Route distinguisher.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub rd: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Semicolon separated section identifiers.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub sections: Option<String>,
    /// Last modification timestamp.
    #[serde(
        rename = "editDate",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_date: Option<String>,
}

/// Network device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    /// Device identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Hostname.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Management IP address.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub ip_addr: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Semicolon separated section identifiers.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub sections: Option<String>,
    /// Rack identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub rack: Option<String>,
    /// First rack unit.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub rack_start: Option<String>,
    /// Height in rack units.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub rack_size: Option<String>,
    /// Location identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Last modification timestamp.
    #[serde(
        rename = "editDate",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_date: Option<String>,
}

/// Device type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceType {
    /// Device type identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Type name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Nameserver set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nameserver {
    /// Nameserver set identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Set name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sections the set is available in.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    /// Primary nameserver.
    #[serde(
        rename = "namesrv1",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nameserver1: Option<String>,
    /// Secondary nameserver.
    #[serde(
        rename = "namesrv2",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nameserver2: Option<String>,
    /// Tertiary nameserver.
    #[serde(
        rename = "namesrv3",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nameserver3: Option<String>,
}

/// Scan agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanAgent {
    /// Agent identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Agent name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Agent type (`mysql` or `api`).
    #[serde(
        rename = "type",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_type: Option<String>,
    /// Agent code.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Last reported status.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Physical location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Location identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Location name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Postal address.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    /// Longitude.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
}

/// Equipment rack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rack {
    /// Rack identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Rack name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Location identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Height in rack units.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// NAT translation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat {
    /// NAT identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// NAT name.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Translation type (`source`, `static`, `destination`).
    #[serde(
        rename = "type",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nat_type: Option<String>,
    /// Device identifier.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Source objects, JSON encoded.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Destination objects, JSON encoded.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub dst: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Policy NAT flag.
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

/// Results of a global search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    /// Matching subnets.
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub subnets: Vec<Subnet>,
    /// Matching addresses.
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub addresses: Vec<Address>,
    /// Matching VLANs.
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub vlans: Vec<Vlan>,
    /// Matching VRFs.
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub vrfs: Vec<Vrf>,
}

impl SearchResult {
    /// Returns true when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty()
            && self.addresses.is_empty()
            && self.vlans.is_empty()
            && self.vrfs.is_empty()
    }
}

/// IP protocol version used by the prefix endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl IpVersion {
    /// Path segment used by phpIPAM.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V4 => "v4",
            Self::V6 => "v6",
        }
    }
}

impl std::fmt::Display for IpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
