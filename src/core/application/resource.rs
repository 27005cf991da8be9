//! CRUD operations shared by every GNS3 resource (projects, nodes, links).
//!
//! Each resource describes where it lives and how it is looked up through
//! [`Resource`]; the generic functions below implement the common contract:
//!
//! - 2xx is success, anything else is decoded as a [`ServerError`];
//! - operations never mutate their input: they return the value decoded
//!   from the server with the parent reference carried over;
//! - identifiers are never part of outgoing bodies.

use crate::core::{
    domain::error::{Gns3Error, Gns3Result, ServerError, ValidationError},
    infrastructure::api_client::ApiClient,
};
use async_trait::async_trait;
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// A server-side resource mirrored by a local value.
#[async_trait]
pub(crate) trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Resource kind, used in log events and error messages.
    const KIND: &'static str;

    /// Message of the 404 produced when a lookup finds no match.
    const NOT_FOUND: &'static str;

    /// Whether a delete without identifier first reads the resource to
    /// discover it.
    const READ_BEFORE_DELETE: bool;

    /// Client of the server the parent reference points at.
    fn api_client(&self) -> Gns3Result<&ApiClient>;

    /// URL of the collection the resource belongs to.
    fn collection_url(&self) -> Gns3Result<String>;

    /// Server-assigned identifier, if known.
    fn id(&self) -> Option<&str>;

    /// Copy of the value without its identifier.
    fn without_id(&self) -> Self;

    /// Copies the parent reference of `origin` onto this value.
    fn adopt_parent(&mut self, origin: &Self);

    /// Throwaway value carrying only the lookup key and the parent reference.
    fn lookup_key(&self) -> Self;

    /// Whether `candidate` is the resource this value designates.
    fn is_match(&self, candidate: &Self) -> bool;

    /// Fails when this value carries no usable lookup key.
    fn check_key(&self) -> Gns3Result<()> {
        Ok(())
    }

    /// Lists the whole parent collection, parent references set.
    async fn list(&self) -> Gns3Result<Vec<Self>>;

    /// Body sent on create and update.
    fn payload(&self) -> Self {
        self.without_id()
    }
}

/// Server-assigned identifier, ignoring empty strings.
pub(crate) fn known_id<R: Resource>(resource: &R) -> Option<&str> {
    resource.id().filter(|id| !id.is_empty())
}

fn missing_id<R: Resource>() -> Gns3Error {
    ValidationError::Field {
        field: format!("{}_id", R::KIND),
        message: format!("The {} has no identifier; create or read it first", R::KIND),
    }
    .into()
}

fn carry_parent<R: Resource>(mut fresh: R, origin: &R) -> R {
    fresh.adopt_parent(origin);
    fresh
}

fn member_url<R: Resource>(resource: &R, id: &str) -> Gns3Result<String> {
    Ok(format!("{}/{}", resource.collection_url()?, id))
}

/// POSTs the resource to its collection and returns what the server stored.
pub(crate) async fn create<R: Resource>(resource: &R) -> Gns3Result<R> {
    let client = resource.api_client()?;
    let url = resource.collection_url()?;
    debug!(kind = R::KIND, %url, "creating resource");

    let created: R = client.post(&url, &resource.payload()).await?;
    Ok(carry_parent(created, resource))
}

/// Finds the resource in its parent collection by lookup key.
pub(crate) async fn read<R: Resource>(resource: &R) -> Gns3Result<R> {
    resource.check_key()?;
    let found = resource
        .list()
        .await?
        .into_iter()
        .find(|candidate| resource.is_match(candidate));

    match found {
        Some(found) => Ok(carry_parent(found, resource)),
        None => Err(ServerError::new(404, R::NOT_FOUND).into()),
    }
}

/// Looks the resource up by key without touching the caller's value.
///
/// A 404 (from the server or from an unmatched lookup) is `Ok(false)`;
/// any other failure is returned as is.
pub(crate) async fn exists<R: Resource>(resource: &R) -> Gns3Result<bool> {
    match read(&resource.lookup_key()).await {
        Ok(_) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

/// PUTs the local field values to `{collection}/{id}`.
pub(crate) async fn update<R: Resource>(resource: &R) -> Gns3Result<R> {
    let id = known_id(resource).ok_or_else(missing_id::<R>)?;
    let client = resource.api_client()?;
    let url = member_url(resource, id)?;
    debug!(kind = R::KIND, %url, "updating resource");

    let updated: R = client.put(&url, &resource.payload()).await?;
    Ok(carry_parent(updated, resource))
}

/// DELETEs `{collection}/{id}`, discovering the identifier first if allowed.
pub(crate) async fn delete<R: Resource>(resource: &R) -> Gns3Result<()> {
    let id = match known_id(resource) {
        Some(id) => id.to_string(),
        None if R::READ_BEFORE_DELETE => {
            let stored = read(resource).await?;
            known_id(&stored).ok_or_else(missing_id::<R>)?.to_string()
        }
        None => return Err(missing_id::<R>()),
    };

    let client = resource.api_client()?;
    let url = member_url(resource, &id)?;
    debug!(kind = R::KIND, %url, "deleting resource");
    client.delete(&url).await
}

/// POSTs an empty object to `{collection}/{id}/{action}` and decodes the
/// resource from the answer.
pub(crate) async fn act<R: Resource>(resource: &R, action: &str) -> Gns3Result<R> {
    let id = known_id(resource).ok_or_else(missing_id::<R>)?;
    let client = resource.api_client()?;
    let url = format!("{}/{}", member_url(resource, id)?, action);
    debug!(kind = R::KIND, %url, action, "resource action");

    let acted: R = client.post(&url, &serde_json::json!({})).await?;
    Ok(carry_parent(acted, resource))
}

/// Same as [`act`] for actions answered without a resource body.
pub(crate) async fn act_without_body<R: Resource>(resource: &R, action: &str) -> Gns3Result<()> {
    let id = known_id(resource).ok_or_else(missing_id::<R>)?;
    let client = resource.api_client()?;
    let url = format!("{}/{}", member_url(resource, id)?, action);
    debug!(kind = R::KIND, %url, action, "resource action");

    client
        .send(Method::POST, &url, Some(&serde_json::json!({})))
        .await
}
