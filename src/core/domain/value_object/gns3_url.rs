use crate::core::domain::{
    error::ValidationError,
    value_object::{gns3_host::Gns3Host, gns3_port::Gns3Port},
};
use std::fmt;

/// Path of the project collection on every GNS3 v2 server.
pub(crate) const PROJECTS_PATH: &str = "/v2/projects";

const MAX_URL_LENGTH: usize = 2083;

/// The validated base URL of a GNS3 server's project collection,
/// `http://{host}:{port}/v2/projects`.
///
/// Every other endpoint (nodes, links) hangs off this URL, so it is built
/// once per connection and joined with path segments afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gns3Url(String);

impl Gns3Url {
    /// Builds and validates the base URL for a host and port.
    pub(crate) fn new(host: &Gns3Host, port: &Gns3Port) -> Result<Self, ValidationError> {
        let url = format!(
            "http://{}:{}{}",
            host.to_authority(),
            port.get(),
            PROJECTS_PATH
        );
        validate_url(&url)?;
        Ok(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends path segments to the base URL.
    ///
    /// Empty segments are kept, so joining an empty identifier yields a
    /// trailing slash rather than silently addressing the collection.
    pub(crate) fn join<I, S>(&self, segments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments.into_iter().fold(self.0.clone(), |mut url, segment| {
            url.push('/');
            url.push_str(segment.as_ref());
            url
        })
    }
}

impl fmt::Display for Gns3Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates a base URL against the shape GNS3 expects.
pub(crate) fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let parsed = url::Url::parse(url)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if parsed.scheme() != "http" {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme '{}'. Must be http",
            parsed.scheme()
        )));
    }

    if parsed.path() != PROJECTS_PATH {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid API path '{}'. Must be {}",
            parsed.path(),
            PROJECTS_PATH
        )));
    }

    Ok(())
}
