//! Domain model for nodes, the emulated devices of a project.

use crate::core::{
    application::resource::{self, Resource},
    domain::{
        error::{Gns3Result, ValidationError},
        model::{label::Label, node_properties::NodeProperties, project::ProjectScope},
        value_object::serde_helpers::null_as_default,
    },
    infrastructure::api_client::ApiClient,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compute on which nodes run unless told otherwise: the server itself.
pub const LOCAL_COMPUTE: &str = "local";

/// Emulator (or builtin device) backing a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Cloud,
    Nat,
    EthernetHub,
    EthernetSwitch,
    FrameRelaySwitch,
    AtmSwitch,
    Docker,
    Dynamips,
    Vpcs,
    Traceng,
    #[serde(rename = "virtualbox")]
    VirtualBox,
    Vmware,
    Iou,
    Qemu,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Cloud => "cloud",
            NodeType::Nat => "nat",
            NodeType::EthernetHub => "ethernet_hub",
            NodeType::EthernetSwitch => "ethernet_switch",
            NodeType::FrameRelaySwitch => "frame_relay_switch",
            NodeType::AtmSwitch => "atm_switch",
            NodeType::Docker => "docker",
            NodeType::Dynamips => "dynamips",
            NodeType::Vpcs => "vpcs",
            NodeType::Traceng => "traceng",
            NodeType::VirtualBox => "virtualbox",
            NodeType::Vmware => "vmware",
            NodeType::Iou => "iou",
            NodeType::Qemu => "qemu",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a GNS3 project.
///
/// Nodes are looked up by name within their project. The `properties`
/// only encode the fields accepted by `node_type`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Node {
    /// Identifier assigned by the server on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Compute the node runs on (`"local"` for the server itself).
    #[serde(default, deserialize_with = "null_as_default")]
    pub compute_id: String,
    pub node_type: NodeType,
    /// Console TCP port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<u16>,
    /// Console type (e.g., "telnet", "vnc", "none").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_auto_start: Option<bool>,
    /// Command line used to start the emulator, reported by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_port_name: Option<String>,
    /// Port name format (e.g., "Ethernet{0}", "eth{port0}").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_name_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_segment_size: Option<u32>,
    /// Current status (e.g., "started", "stopped", "suspended").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Symbol path (e.g., ":/symbols/ethernet_switch.svg").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub x: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub z: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default)]
    pub properties: NodeProperties,
    #[serde(skip)]
    scope: Option<ProjectScope>,
}

impl Node {
    /// Creates an in-memory node of `project`, running on the local compute.
    ///
    /// Nothing is sent to the server until [`Node::create`] is called.
    pub fn new(project: &ProjectScope, name: impl Into<String>, node_type: NodeType) -> Self {
        Self::blank(name.into(), node_type, Some(project.clone()))
    }

    fn blank(name: String, node_type: NodeType, scope: Option<ProjectScope>) -> Self {
        Self {
            node_id: None,
            name,
            compute_id: LOCAL_COMPUTE.to_string(),
            node_type,
            console: None,
            console_type: None,
            console_auto_start: None,
            command_line: None,
            first_port_name: None,
            port_name_format: None,
            port_segment_size: None,
            status: None,
            symbol: None,
            x: 0,
            y: 0,
            z: 0,
            locked: None,
            label: None,
            properties: NodeProperties::default().with_node_type(node_type),
            scope,
        }
    }

    /// Project the node belongs to, if attached.
    pub fn scope(&self) -> Option<&ProjectScope> {
        self.scope.as_ref()
    }

    pub(crate) fn attached(mut self, scope: &ProjectScope) -> Self {
        self.scope = Some(scope.clone());
        self.properties.set_node_type(self.node_type);
        self
    }

    fn require_scope(&self) -> Gns3Result<&ProjectScope> {
        self.scope.as_ref().ok_or_else(|| {
            ValidationError::field("project", "The node is not attached to a project").into()
        })
    }

    /// Creates the node in its project and returns it as stored by the server.
    pub async fn create(&self) -> Gns3Result<Node> {
        resource::create(self).await
    }

    /// Reads the node of the same name from its project.
    ///
    /// # Errors
    /// A server error with status 404 if no node has that name.
    pub async fn read(&self) -> Gns3Result<Node> {
        resource::read(self).await
    }

    /// Checks whether a node of the same name exists in the project.
    pub async fn exists(&self) -> Gns3Result<bool> {
        resource::exists(self).await
    }

    /// Pushes the local field values to the server.
    pub async fn update(&self) -> Gns3Result<Node> {
        resource::update(self).await
    }

    /// Deletes the node, reading it by name first when its id is unknown.
    pub async fn delete(&self) -> Gns3Result<()> {
        resource::delete(self).await
    }

    /// Starts the emulator.
    pub async fn start(&self) -> Gns3Result<Node> {
        resource::act(self, "start").await
    }

    /// Stops the emulator.
    pub async fn stop(&self) -> Gns3Result<Node> {
        resource::act(self, "stop").await
    }
}

#[async_trait]
impl Resource for Node {
    const KIND: &'static str = "node";
    const NOT_FOUND: &'static str = "Node does not exist in the project";
    const READ_BEFORE_DELETE: bool = true;

    fn api_client(&self) -> Gns3Result<&ApiClient> {
        Ok(self.require_scope()?.server().api_client())
    }

    fn collection_url(&self) -> Gns3Result<String> {
        Ok(self.require_scope()?.nodes_url())
    }

    fn id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    fn without_id(&self) -> Self {
        Self {
            node_id: None,
            ..self.clone()
        }
    }

    fn adopt_parent(&mut self, origin: &Self) {
        self.scope = origin.scope.clone();
        self.properties.set_node_type(self.node_type);
    }

    fn lookup_key(&self) -> Self {
        Node::blank(self.name.clone(), self.node_type, self.scope.clone())
    }

    fn is_match(&self, candidate: &Self) -> bool {
        candidate.name == self.name
    }

    async fn list(&self) -> Gns3Result<Vec<Self>> {
        let scope = self.require_scope()?;
        let nodes: Vec<Node> = scope.server().api_client().get(&scope.nodes_url()).await?;
        Ok(nodes.into_iter().map(|n| n.attached(scope)).collect())
    }

    fn payload(&self) -> Self {
        let mut payload = self.without_id();
        payload.properties.set_node_type(self.node_type);
        payload
    }
}
