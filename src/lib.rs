//! Async client for the REST API of a GNS3 network emulation server.
//!
//! A [`Gns3Server`] points at `http://{host}:{port}/v2/projects`. Projects,
//! nodes and links mirror the server-side resources and expose the same
//! CRUD contract: every operation returns a fresh value decoded from the
//! server and never mutates the value it was called on.

mod core;


pub use crate::core::domain::{
    error::{Gns3Error, Gns3Result, ServerError, ValidationError},
    model::{
        gns3_connection::{DEFAULT_TIMEOUT, Gns3Connection},
        label::Label,
        link::{Link, LinkEndpoint},
        node::{LOCAL_COMPUTE, Node, NodeType},
        node_properties::{EthernetPortMapping, NodeProperties},
        project::{Project, ProjectScope},
    },
    value_object::{DEFAULT_GNS3_PORT, Gns3Host, Gns3Port, Gns3Url},
};
pub use reqwest::Method;

use crate::core::{
    domain::value_object::{parse_port, validate_host, validate_port},
    infrastructure::api_client::ApiClient,
};
use std::{env, time::Duration};
use tracing::{debug, instrument};

/// Environment variable holding the server host for [`Gns3Server::from_env`].
pub const ENV_GNS3_HOST: &str = "GNS3_HOST";
/// Environment variable holding the server port for [`Gns3Server::from_env`].
pub const ENV_GNS3_PORT: &str = "GNS3_PORT";

/// A GNS3 server reachable over HTTP.
///
/// The server value is cheap to clone: projects, nodes and links each keep
/// their own copy as a parent reference.
///
/// # Examples
///
/// ```no_run
/// use gns3_client::{Gns3Result, Gns3Server, Project};
///
/// #[tokio::main]
/// async fn main() -> Gns3Result<()> {
///     let server = Gns3Server::builder()
///         .host("192.168.56.101")?
///         .port(3080)?
///         .build()?;
///
///     server.test().await?;
///     let lab = Project::new(&server, "lab").create().await?;
///     println!("created {:?}", lab.project_id);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gns3Server {
    api_client: ApiClient,
}

/// Builder for [`Gns3Server`] configuration
#[derive(Debug, Default)]
pub struct Gns3ServerBuilder {
    host: Option<String>,
    port: Option<u16>,
    timeout: Option<Duration>,
}

impl Gns3ServerBuilder {
    /// Sets the server host (DNS name, IPv4 or IPv6 address).
    pub fn host(mut self, host: impl Into<String>) -> Gns3Result<Self> {
        let host = host.into();
        validate_host(&host)?;
        self.host = Some(host);
        Ok(self)
    }

    /// Sets the server port. Defaults to [`DEFAULT_GNS3_PORT`].
    pub fn port(mut self, port: u16) -> Gns3Result<Self> {
        validate_port(port)?;
        self.port = Some(port);
        Ok(self)
    }

    /// Sets the per-request timeout. Defaults to [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Gns3Result<Gns3Server> {
        let host = self
            .host
            .ok_or_else(|| ValidationError::field("host", "Host is required"))?;
        let host = Gns3Host::new_unchecked(host);
        let port = self.port.map(Gns3Port::new_unchecked).unwrap_or_default();

        let connection =
            Gns3Connection::new(host, port, self.timeout.unwrap_or(DEFAULT_TIMEOUT))?;
        Ok(Gns3Server {
            api_client: ApiClient::new(connection),
        })
    }
}

impl Gns3Server {
    /// Creates a new builder for Gns3Server configuration
    pub fn builder() -> Gns3ServerBuilder {
        Gns3ServerBuilder::default()
    }

    /// Shorthand for a builder with `host` and `port` and default timeout.
    pub fn new(host: impl Into<String>, port: u16) -> Gns3Result<Self> {
        Self::builder().host(host)?.port(port)?.build()
    }

    /// Reads the server location from `GNS3_HOST` and `GNS3_PORT`.
    ///
    /// The port defaults to 3080 when `GNS3_PORT` is unset.
    ///
    /// # Errors
    /// A validation error if `GNS3_HOST` is unset or either value is invalid.
    pub fn from_env() -> Gns3Result<Self> {
        let host = env::var(ENV_GNS3_HOST)
            .map_err(|_| ValidationError::field("host", "GNS3_HOST is not set"))?;
        let builder = Self::builder().host(host)?;
        let builder = match env::var(ENV_GNS3_PORT) {
            Ok(raw) => builder.port(parse_port(&raw)?)?,
            Err(_) => builder,
        };
        builder.build()
    }

    pub fn host(&self) -> &Gns3Host {
        self.api_client.connection().host()
    }

    pub fn port(&self) -> &Gns3Port {
        self.api_client.connection().port()
    }

    pub fn timeout(&self) -> Duration {
        self.api_client.connection().timeout()
    }

    /// Base URL of the project collection, `http://{host}:{port}/v2/projects`.
    pub fn base_url(&self) -> &Gns3Url {
        self.api_client.connection().url()
    }

    /// Executes one HTTP request against the server and returns the raw
    /// status code and body. Status codes are not interpreted.
    ///
    /// # Errors
    /// Returns `Gns3Error::Connection` if the server cannot be reached or the
    /// request times out.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Gns3Result<(u16, Vec<u8>)> {
        self.api_client.request(method, url, body).await
    }

    /// Liveness probe: GETs the base URL.
    ///
    /// Any HTTP answer counts as alive; only transport failures are errors.
    #[instrument(level = "debug", skip(self), fields(url = %self.base_url()))]
    pub async fn test(&self) -> Gns3Result<()> {
        let (status, _) = self
            .request(Method::GET, self.base_url().as_str(), None)
            .await?;
        debug!(status, "server answered");
        Ok(())
    }

    /// Lists every project of the server.
    pub async fn projects(&self) -> Gns3Result<Vec<Project>> {
        let projects: Vec<Project> = self.api_client.get(self.base_url().as_str()).await?;
        Ok(projects.into_iter().map(|p| p.attached(self)).collect())
    }

    pub(crate) fn api_client(&self) -> &ApiClient {
        &self.api_client
    }
}
