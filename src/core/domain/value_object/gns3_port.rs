use crate::core::domain::error::ValidationError;

/// Port the GNS3 server listens on unless configured otherwise.
pub const DEFAULT_GNS3_PORT: u16 = 3080;

/// A validated GNS3 server port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gns3Port(u16);

impl Gns3Port {
    /// Creates a new port without validation.
    pub(crate) fn new_unchecked(port: u16) -> Self {
        Self(port)
    }

    /// Returns the port number.
    pub fn get(&self) -> u16 {
        self.0
    }
}

impl Default for Gns3Port {
    fn default() -> Self {
        Self(DEFAULT_GNS3_PORT)
    }
}

/// Validates a port number.
pub(crate) fn validate_port(port: u16) -> Result<(), ValidationError> {
    if port == 0 {
        return Err(ValidationError::Field {
            field: "port".to_string(),
            message: "Port cannot be 0".to_string(),
        });
    }
    Ok(())
}

/// Parses a port number from its textual form (environment, config files).
pub(crate) fn parse_port(raw: &str) -> Result<u16, ValidationError> {
    let port = raw.trim().parse::<u16>().map_err(|e| ValidationError::Field {
        field: "port".to_string(),
        message: format!("Invalid port '{}': {}", raw, e),
    })?;
    validate_port(port)?;
    Ok(port)
}
