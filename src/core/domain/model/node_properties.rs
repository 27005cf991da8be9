//! Emulator-specific node properties.
//!
//! Every emulator accepts its own subset of node properties and rejects the
//! others, so [`NodeProperties`] keeps the full superset in memory but only
//! ever encodes the projection selected by its node type. Decoding always
//! targets the superset.

use crate::core::domain::model::node::NodeType;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

/// One port of an Ethernet switch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct EthernetPortMapping {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub port_number: u32,
    /// Port mode: `access`, `dot1q` or `qinq`.
    #[serde(rename = "type", default)]
    pub port_type: String,
    #[serde(default)]
    pub vlan: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethertype: Option<String>,
}

impl EthernetPortMapping {
    /// An access port untagged in `vlan`.
    pub fn access(name: impl Into<String>, port_number: u32, vlan: u32) -> Self {
        Self::with_type(name, port_number, "access", vlan)
    }

    /// An 802.1Q trunk port with `vlan` as native VLAN.
    pub fn dot1q(name: impl Into<String>, port_number: u32, vlan: u32) -> Self {
        Self::with_type(name, port_number, "dot1q", vlan)
    }

    /// A QinQ tunnel port with outer tag `vlan`.
    pub fn qinq(
        name: impl Into<String>,
        port_number: u32,
        vlan: u32,
        ethertype: impl Into<String>,
    ) -> Self {
        Self {
            ethertype: Some(ethertype.into()),
            ..Self::with_type(name, port_number, "qinq", vlan)
        }
    }

    fn with_type(name: impl Into<String>, port_number: u32, port_type: &str, vlan: u32) -> Self {
        Self {
            name: name.into(),
            port_number,
            port_type: port_type.to_string(),
            vlan,
            ethertype: None,
        }
    }
}

/// Superset of the properties of every supported emulator.
///
/// The type tag is copied from the owning node before encoding; while it is
/// unset the properties encode as an empty object.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct NodeProperties {
    #[serde(skip_deserializing)]
    node_type: Option<NodeType>,

    // Ethernet switch
    pub ports_mapping: Option<Vec<EthernetPortMapping>>,

    // QEMU
    pub adapter_type: Option<String>,
    pub adapters: Option<u32>,
    pub bios_image: Option<String>,
    pub boot_priority: Option<String>,
    pub cdrom_image: Option<String>,
    pub cpu_throttling: Option<u32>,
    pub cpus: Option<u32>,
    pub hda_disk_image: Option<String>,
    pub hda_disk_interface: Option<String>,
    pub hdb_disk_image: Option<String>,
    pub hdb_disk_interface: Option<String>,
    pub initrd: Option<String>,
    pub kernel_command_line: Option<String>,
    pub kernel_image: Option<String>,
    pub legacy_networking: Option<bool>,
    pub linked_clone: Option<bool>,
    pub mac_address: Option<String>,
    pub on_close: Option<String>,
    pub options: Option<String>,
    pub platform: Option<String>,
    pub process_priority: Option<String>,
    /// RAM in MB.
    pub ram: Option<u32>,
    pub usage: Option<String>,

    // VPCS
    pub startup_script: Option<String>,

    // Docker
    pub image: Option<String>,
    pub start_command: Option<String>,
    pub environment: Option<String>,
    pub console_resolution: Option<String>,
    pub extra_hosts: Option<String>,
}

impl NodeProperties {
    /// Returns the properties tagged with `node_type`, which selects the
    /// fields that get encoded.
    pub fn with_node_type(mut self, node_type: NodeType) -> Self {
        self.node_type = Some(node_type);
        self
    }

    pub fn node_type(&self) -> Option<NodeType> {
        self.node_type
    }

    pub(crate) fn set_node_type(&mut self, node_type: NodeType) {
        self.node_type = Some(node_type);
    }
}

impl Serialize for NodeProperties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.node_type {
            Some(NodeType::EthernetSwitch) => {
                EthernetSwitchProjection::from(self).serialize(serializer)
            }
            Some(NodeType::Qemu) => QemuProjection::from(self).serialize(serializer),
            Some(NodeType::Vpcs) => VpcsProjection::from(self).serialize(serializer),
            Some(NodeType::Docker) => DockerProjection::from(self).serialize(serializer),
            _ => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

#[derive(Serialize)]
struct EthernetSwitchProjection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    ports_mapping: Option<&'a [EthernetPortMapping]>,
}

impl<'a> From<&'a NodeProperties> for EthernetSwitchProjection<'a> {
    fn from(p: &'a NodeProperties) -> Self {
        Self {
            ports_mapping: p.ports_mapping.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct QemuProjection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    adapter_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adapters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bios_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boot_priority: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cdrom_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpu_throttling: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpus: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hda_disk_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hda_disk_interface: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hdb_disk_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hdb_disk_interface: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    initrd: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kernel_command_line: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kernel_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legacy_networking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linked_clone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mac_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_close: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    platform: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    process_priority: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ram: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<&'a str>,
}

impl<'a> From<&'a NodeProperties> for QemuProjection<'a> {
    fn from(p: &'a NodeProperties) -> Self {
        Self {
            adapter_type: p.adapter_type.as_deref(),
            adapters: p.adapters,
            bios_image: p.bios_image.as_deref(),
            boot_priority: p.boot_priority.as_deref(),
            cdrom_image: p.cdrom_image.as_deref(),
            cpu_throttling: p.cpu_throttling,
            cpus: p.cpus,
            hda_disk_image: p.hda_disk_image.as_deref(),
            hda_disk_interface: p.hda_disk_interface.as_deref(),
            hdb_disk_image: p.hdb_disk_image.as_deref(),
            hdb_disk_interface: p.hdb_disk_interface.as_deref(),
            initrd: p.initrd.as_deref(),
            kernel_command_line: p.kernel_command_line.as_deref(),
            kernel_image: p.kernel_image.as_deref(),
            legacy_networking: p.legacy_networking,
            linked_clone: p.linked_clone,
            mac_address: p.mac_address.as_deref(),
            on_close: p.on_close.as_deref(),
            options: p.options.as_deref(),
            platform: p.platform.as_deref(),
            process_priority: p.process_priority.as_deref(),
            ram: p.ram,
            usage: p.usage.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct VpcsProjection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    startup_script: Option<&'a str>,
}

impl<'a> From<&'a NodeProperties> for VpcsProjection<'a> {
    fn from(p: &'a NodeProperties) -> Self {
        Self {
            startup_script: p.startup_script.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct DockerProjection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adapters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_command: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    console_resolution: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra_hosts: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mac_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<&'a str>,
}

impl<'a> From<&'a NodeProperties> for DockerProjection<'a> {
    fn from(p: &'a NodeProperties) -> Self {
        Self {
            image: p.image.as_deref(),
            adapters: p.adapters,
            start_command: p.start_command.as_deref(),
            environment: p.environment.as_deref(),
            console_resolution: p.console_resolution.as_deref(),
            extra_hosts: p.extra_hosts.as_deref(),
            mac_address: p.mac_address.as_deref(),
            usage: p.usage.as_deref(),
        }
    }
}
