pub mod gns3_connection;
pub mod label;
pub mod link;
pub mod node;
pub mod node_properties;
pub mod project;
