mod gns3_host;
mod gns3_port;
mod gns3_url;
pub(crate) mod serde_helpers;

pub use gns3_host::Gns3Host;
pub use gns3_port::{DEFAULT_GNS3_PORT, Gns3Port};
pub use gns3_url::Gns3Url;

// Re-export validation functions for internal use
pub(crate) use gns3_host::validate_host;
pub(crate) use gns3_port::{parse_port, validate_port};
