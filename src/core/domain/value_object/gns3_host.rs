use crate::core::domain::error::ValidationError;
use std::net::{IpAddr, Ipv6Addr};

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// A validated GNS3 server host: an RFC 1035 hostname or an IP address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gns3Host(String);

impl Gns3Host {
    /// Creates a new host without validation.
    pub(crate) fn new_unchecked(host: String) -> Self {
        Self(host)
    }

    /// Returns the host as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the host as it must appear in the authority part of a URL.
    ///
    /// IPv6 literals are wrapped in brackets.
    pub(crate) fn to_authority(&self) -> String {
        if self.0.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.0)
        } else {
            self.0.clone()
        }
    }
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return Err(ValidationError::Format(format!(
            "Label must be between 1 and {} characters",
            MAX_LABEL_LENGTH
        )));
    }

    // Underscores are not RFC 1035 but resolvers accept them (container service names).
    if !label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::Format(
            "Label can only contain alphanumeric characters, hyphens and underscores"
                .to_string(),
        ));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(ValidationError::Format(
            "Label cannot start or end with hyphen".to_string(),
        ));
    }

    Ok(())
}

/// Validates a host name or IP address.
pub(crate) fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host.is_empty() {
        return Err(ValidationError::Field {
            field: "host".to_string(),
            message: "Host cannot be empty".to_string(),
        });
    }

    if host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    if host.len() > MAX_HOSTNAME_LENGTH {
        return Err(ValidationError::ConstraintViolation(format!(
            "Host length exceeds maximum of {} characters",
            MAX_HOSTNAME_LENGTH
        )));
    }

    // A single trailing dot marks a fully qualified name.
    let host = host.strip_suffix('.').unwrap_or(host);
    host.split('.').try_for_each(validate_label)
}
