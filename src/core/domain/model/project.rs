//! Domain model for GNS3 projects.

use crate::{
    Gns3Server,
    core::{
        application::resource::{self, Resource},
        domain::{
            error::{Gns3Result, ValidationError},
            model::{link::Link, node::Node},
            value_object::serde_helpers::null_as_default,
        },
        infrastructure::api_client::ApiClient,
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A project (topology) on a GNS3 server.
///
/// Projects are looked up by name. The `server` is a back-reference used to
/// build URLs; it is never serialized.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Project {
    /// Identifier assigned by the server on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Close the project when the last client disconnects.
    #[serde(default)]
    pub auto_close: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_start: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_width: Option<u32>,
    #[serde(default)]
    pub show_grid: bool,
    #[serde(default)]
    pub show_interface_labels: bool,
    #[serde(default)]
    pub show_layers: bool,
    #[serde(default)]
    pub snap_to_grid: bool,
    /// Zoom level in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u32>,
    /// Current status ("opened" or "closed"), reported by the server.
    #[serde(default, skip_serializing)]
    pub status: Option<String>,
    /// Project directory on the server, reported by the server.
    #[serde(default, skip_serializing)]
    pub path: Option<String>,
    /// Project file name (e.g., "lab.gns3"), reported by the server.
    #[serde(default, skip_serializing)]
    pub filename: Option<String>,
    #[serde(skip)]
    server: Option<Gns3Server>,
}

impl Project {
    /// Creates an in-memory project on `server`.
    ///
    /// Nothing is sent to the server until [`Project::create`] is called.
    pub fn new(server: &Gns3Server, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: Some(server.clone()),
            ..Default::default()
        }
    }

    /// Server the project belongs to, if attached.
    pub fn server(&self) -> Option<&Gns3Server> {
        self.server.as_ref()
    }

    pub(crate) fn attached(mut self, server: &Gns3Server) -> Self {
        self.server = Some(server.clone());
        self
    }

    fn require_server(&self) -> Gns3Result<&Gns3Server> {
        self.server.as_ref().ok_or_else(|| {
            ValidationError::field("server", "The project is not attached to a server").into()
        })
    }

    /// Parent reference for the nodes and links of this project.
    ///
    /// # Errors
    /// Returns a validation error if the project has no server or no
    /// identifier yet.
    pub fn scope(&self) -> Gns3Result<ProjectScope> {
        let server = self.require_server()?;
        let project_id = resource::known_id(self)
            .ok_or_else(|| {
                ValidationError::field(
                    "project_id",
                    "The project has no identifier; create or read it first",
                )
            })?;
        Ok(ProjectScope::new(server, project_id))
    }

    /// Creates the project and returns it as stored by the server.
    pub async fn create(&self) -> Gns3Result<Project> {
        resource::create(self).await
    }

    /// Reads the project of the same name from the server.
    ///
    /// # Errors
    /// A server error with status 404 if no project has that name.
    pub async fn read(&self) -> Gns3Result<Project> {
        resource::read(self).await
    }

    /// Checks whether a project of the same name exists on the server.
    pub async fn exists(&self) -> Gns3Result<bool> {
        resource::exists(self).await
    }

    /// Pushes the local field values to the server.
    pub async fn update(&self) -> Gns3Result<Project> {
        resource::update(self).await
    }

    /// Deletes the project, reading it by name first when its id is unknown.
    pub async fn delete(&self) -> Gns3Result<()> {
        resource::delete(self).await
    }

    /// Opens the project on the server.
    pub async fn open(&self) -> Gns3Result<Project> {
        resource::act(self, "open").await
    }

    /// Closes the project on the server.
    pub async fn close(&self) -> Gns3Result<()> {
        resource::act_without_body(self, "close").await
    }

    /// Lists the nodes of the project.
    pub async fn nodes(&self) -> Gns3Result<Vec<Node>> {
        let scope = self.scope()?;
        let nodes: Vec<Node> = scope.server().api_client().get(&scope.nodes_url()).await?;
        Ok(nodes.into_iter().map(|n| n.attached(&scope)).collect())
    }

    /// Lists the links of the project.
    pub async fn links(&self) -> Gns3Result<Vec<Link>> {
        let scope = self.scope()?;
        let links: Vec<Link> = scope.server().api_client().get(&scope.links_url()).await?;
        Ok(links.into_iter().map(|l| l.attached(&scope)).collect())
    }
}

#[async_trait]
impl Resource for Project {
    const KIND: &'static str = "project";
    const NOT_FOUND: &'static str = "Project does not exist on server";
    const READ_BEFORE_DELETE: bool = true;

    fn api_client(&self) -> Gns3Result<&ApiClient> {
        Ok(self.require_server()?.api_client())
    }

    fn collection_url(&self) -> Gns3Result<String> {
        Ok(self.require_server()?.base_url().to_string())
    }

    fn id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    fn without_id(&self) -> Self {
        Self {
            project_id: None,
            ..self.clone()
        }
    }

    fn adopt_parent(&mut self, origin: &Self) {
        self.server = origin.server.clone();
    }

    fn lookup_key(&self) -> Self {
        Self {
            name: self.name.clone(),
            server: self.server.clone(),
            ..Default::default()
        }
    }

    fn is_match(&self, candidate: &Self) -> bool {
        candidate.name == self.name
    }

    async fn list(&self) -> Gns3Result<Vec<Self>> {
        self.require_server()?.projects().await
    }
}

/// Parent reference of nodes and links: a server and a project identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScope {
    server: Gns3Server,
    project_id: String,
}

impl ProjectScope {
    pub fn new(server: &Gns3Server, project_id: impl Into<String>) -> Self {
        Self {
            server: server.clone(),
            project_id: project_id.into(),
        }
    }

    pub fn server(&self) -> &Gns3Server {
        &self.server
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// `{base}/{project_id}`
    pub fn url(&self) -> String {
        self.server.base_url().join([self.project_id.as_str()])
    }

    /// `{base}/{project_id}/nodes`
    pub fn nodes_url(&self) -> String {
        self.server
            .base_url()
            .join([self.project_id.as_str(), "nodes"])
    }

    /// `{base}/{project_id}/links`
    pub fn links_url(&self) -> String {
        self.server
            .base_url()
            .join([self.project_id.as_str(), "links"])
    }
}
