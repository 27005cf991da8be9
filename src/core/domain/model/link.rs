use crate::core::{
    application::resource::{self, Resource},
    domain::{
        error::{Gns3Result, ValidationError},
        model::{label::Label, project::ProjectScope},
    },
    infrastructure::api_client::ApiClient,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One end of a link: a port on a node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct LinkEndpoint {
    #[serde(default)]
    pub adapter_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub node_id: String,
    #[serde(default)]
    pub port_number: u32,
}

impl LinkEndpoint {
    pub fn new(node_id: impl Into<String>, adapter_number: u32, port_number: u32) -> Self {
        Self {
            adapter_number,
            label: None,
            node_id: node_id.into(),
            port_number,
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}

/// A link between node ports of a project.
///
/// Links have no name: they are looked up by `link_id` only.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_file_path: Option<String>,
    #[serde(default)]
    pub capturing: bool,
    /// Link type (e.g., "ethernet", "serial").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<LinkEndpoint>,
    #[serde(default)]
    pub suspend: bool,
    #[serde(skip)]
    scope: Option<ProjectScope>,
}

impl Link {
    /// Creates an in-memory link of `project` between `nodes`.
    pub fn new(project: &ProjectScope, nodes: Vec<LinkEndpoint>) -> Self {
        Self {
            nodes,
            scope: Some(project.clone()),
            ..Default::default()
        }
    }

    /// Project the link belongs to, if attached.
    pub fn scope(&self) -> Option<&ProjectScope> {
        self.scope.as_ref()
    }

    pub(crate) fn attached(mut self, scope: &ProjectScope) -> Self {
        self.scope = Some(scope.clone());
        self
    }

    fn require_scope(&self) -> Gns3Result<&ProjectScope> {
        self.scope.as_ref().ok_or_else(|| {
            ValidationError::field("project", "The link is not attached to a project").into()
        })
    }

    pub async fn create(&self) -> Gns3Result<Link> {
        resource::create(self).await
    }

    /// Reads the link with the same `link_id` from its project.
    ///
    /// # Errors
    /// A validation error if `link_id` is unset, a server error with status
    /// 404 if the project has no such link.
    pub async fn read(&self) -> Gns3Result<Link> {
        resource::read(self).await
    }

    pub async fn exists(&self) -> Gns3Result<bool> {
        resource::exists(self).await
    }

    pub async fn update(&self) -> Gns3Result<Link> {
        resource::update(self).await
    }

    /// Deletes the link. Requires a `link_id`.
    pub async fn delete(&self) -> Gns3Result<()> {
        resource::delete(self).await
    }
}

#[async_trait]
impl Resource for Link {
    const KIND: &'static str = "link";
    const NOT_FOUND: &'static str = "Link does not exist in the project";
    const READ_BEFORE_DELETE: bool = false;

    fn api_client(&self) -> Gns3Result<&ApiClient> {
        Ok(self.require_scope()?.server().api_client())
    }

    fn collection_url(&self) -> Gns3Result<String> {
        Ok(self.require_scope()?.links_url())
    }

    fn id(&self) -> Option<&str> {
        self.link_id.as_deref()
    }

    fn without_id(&self) -> Self {
        Self {
            link_id: None,
            ..self.clone()
        }
    }

    fn adopt_parent(&mut self, origin: &Self) {
        self.scope = origin.scope.clone();
    }

    fn lookup_key(&self) -> Self {
        Self {
            link_id: self.link_id.clone(),
            scope: self.scope.clone(),
            ..Default::default()
        }
    }

    fn is_match(&self, candidate: &Self) -> bool {
        candidate.link_id.is_some() && candidate.link_id == self.link_id
    }

    fn check_key(&self) -> Gns3Result<()> {
        match resource::known_id(self) {
            Some(_) => Ok(()),
            None => Err(ValidationError::field(
                "link_id",
                "A link can only be looked up by its identifier",
            )
            .into()),
        }
    }

    async fn list(&self) -> Gns3Result<Vec<Self>> {
        let scope = self.require_scope()?;
        let links: Vec<Link> = scope.server().api_client().get(&scope.links_url()).await?;
        Ok(links.into_iter().map(|l| l.attached(scope)).collect())
    }
}
