use crate::core::domain::{
    error::ValidationError,
    value_object::{Gns3Host, Gns3Port, Gns3Url},
};
use std::time::Duration;

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection target of a GNS3 server: where to reach it and how long to wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gns3Connection {
    host: Gns3Host,
    port: Gns3Port,
    timeout: Duration,
    url: Gns3Url,
}

impl Gns3Connection {
    pub fn new(host: Gns3Host, port: Gns3Port, timeout: Duration) -> Result<Self, ValidationError> {
        if timeout.is_zero() {
            return Err(ValidationError::field("timeout", "Timeout cannot be zero"));
        }
        let url = Gns3Url::new(&host, &port)?;
        Ok(Self {
            host,
            port,
            timeout,
            url,
        })
    }

    pub fn host(&self) -> &Gns3Host {
        &self.host
    }

    pub fn port(&self) -> &Gns3Port {
        &self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url(&self) -> &Gns3Url {
        &self.url
    }
}
