//! Action factory.
//!
//! Builds the request and receive actions dispatched through the
//! [`ApiMiddleware`](crate::middleware::ApiMiddleware). Request actions carry
//! resources already prepared for the wire.

mod kind;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::codec;
use crate::mvi::Intent;
use crate::resource::Resource;

pub use kind::{ActionKind, Method, ACTION_NAMESPACE};

/// An action understood by the store and its middleware.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiAction {
    Request(RequestAction),
    Receive(ReceiveAction),
}

impl ApiAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            ApiAction::Request(request) => request.method.kind(),
            ApiAction::Receive(_) => ActionKind::Receive,
        }
    }

    pub fn resources(&self) -> &[Resource] {
        match self {
            ApiAction::Request(request) => &request.resources,
            ApiAction::Receive(receive) => &receive.resources,
        }
    }

    pub fn meta(&self) -> &Map<String, Value> {
        match self {
            ApiAction::Request(request) => &request.meta,
            ApiAction::Receive(receive) => &receive.meta,
        }
    }
}

impl Intent for ApiAction {
    fn action_type(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Read, write or remove request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestAction {
    pub method: Method,
    /// Batch resources; the first one determines the endpoint.
    pub resources: Vec<Resource>,
    pub options: RequestOptions,
    pub meta: Map<String, Value>,
}

/// Resources to fold into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiveAction {
    /// Method of the request that produced the resources.
    pub method: Option<Method>,
    pub resources: Vec<Resource>,
    pub meta: Map<String, Value>,
}

/// Per-call request options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Query parameters; nested objects and arrays use bracket notation.
    pub params: Map<String, Value>,
    /// Headers overriding the defaults.
    pub headers: BTreeMap<String, String>,
    /// Absolute URL used instead of the one derived from the resources.
    pub endpoint: Option<String>,
    /// Moved to the action's `meta`.
    pub meta: Map<String, Value>,
}

impl RequestOptions {
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_meta(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(name.into(), value.into());
        self
    }
}

/// One or more resources handed to a builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resources {
    items: Vec<Resource>,
    bypass_prepare_resources: bool,
}

impl Resources {
    pub fn new(items: Vec<Resource>) -> Self {
        Self {
            items,
            bypass_prepare_resources: false,
        }
    }

    /// Send the resources exactly as given, skipping wire preparation.
    pub fn bypass_prepare(mut self) -> Self {
        self.bypass_prepare_resources = true;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn prepare(self) -> Vec<Resource> {
        if self.bypass_prepare_resources {
            return self.items;
        }
        self.items.iter().map(codec::prepare).collect()
    }
}

impl From<Resource> for Resources {
    fn from(resource: Resource) -> Self {
        Resources::new(vec![resource])
    }
}

impl From<&Resource> for Resources {
    fn from(resource: &Resource) -> Self {
        Resources::new(vec![resource.clone()])
    }
}

impl From<Vec<Resource>> for Resources {
    fn from(items: Vec<Resource>) -> Self {
        Resources::new(items)
    }
}

fn request(method: Method, resources: Vec<Resource>, mut options: RequestOptions) -> ApiAction {
    let meta = std::mem::take(&mut options.meta);
    ApiAction::Request(RequestAction {
        method,
        resources,
        options,
        meta,
    })
}

/// GET the given resources.
pub fn read(resources: impl Into<Resources>, options: RequestOptions) -> ApiAction {
    request(Method::Get, resources.into().prepare(), options)
}

/// PATCH when the last resource has an id, POST otherwise.
///
/// Only the last resource is inspected, so a mixed batch is classified as a
/// whole by its final element.
pub fn write(resources: impl Into<Resources>, options: RequestOptions) -> ApiAction {
    let resources = resources.into();
    let method = match resources.items.last() {
        Some(last) if last.id.is_some() => Method::Patch,
        _ => Method::Post,
    };
    request(method, resources.prepare(), options)
}

/// DELETE the given resources.
pub fn remove(resources: impl Into<Resources>, options: RequestOptions) -> ApiAction {
    request(Method::Delete, resources.into().prepare(), options)
}

/// Fold resources into the store.
pub fn receive(
    resources: Vec<Resource>,
    method: Option<Method>,
    meta: Map<String, Value>,
) -> ApiAction {
    ApiAction::Receive(ReceiveAction {
        method,
        resources,
        meta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_of(action: ApiAction) -> RequestAction {
        match action {
            ApiAction::Request(request) => request,
            ApiAction::Receive(_) => panic!("Expected request action"),
        }
    }

    #[test]
    fn write_without_id_is_create() {
        let action = write(Resource::new("articles"), RequestOptions::default());
        assert_eq!(action.kind(), ActionKind::Post);
    }

    #[test]
    fn write_with_id_is_update() {
        let action = write(Resource::new("articles").with_id("1"), RequestOptions::default());
        assert_eq!(action.kind(), ActionKind::Patch);
    }

    #[test]
    fn write_classifies_batch_by_last_element() {
        let batch = vec![
            Resource::new("articles").with_id("1"),
            Resource::new("articles"),
        ];
        assert_eq!(write(batch, RequestOptions::default()).kind(), ActionKind::Post);

        let batch = vec![
            Resource::new("articles"),
            Resource::new("articles").with_id("2"),
        ];
        assert_eq!(write(batch, RequestOptions::default()).kind(), ActionKind::Patch);
    }

    #[test]
    fn empty_write_is_create() {
        let action = write(Vec::new(), RequestOptions::default());
        assert_eq!(action.kind(), ActionKind::Post);
    }

    #[test]
    fn builders_prepare_resources_for_the_wire() {
        let request = request_of(read(Resource::new("blogPosts"), RequestOptions::default()));
        assert_eq!(request.resources[0].resource_type, "blog-posts");
    }

    #[test]
    fn bypass_keeps_resources_verbatim() {
        let resources = Resources::from(Resource::new("blogPosts").with_id("3")).bypass_prepare();
        let request = request_of(write(resources, RequestOptions::default()));
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.resources[0].resource_type, "blogPosts");
    }

    #[test]
    fn options_meta_moves_to_action_meta() {
        let options = RequestOptions::default()
            .with_param("include", "author")
            .with_meta("origin", "sidebar");
        let request = request_of(remove(Resource::new("articles").with_id("1"), options));

        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.meta["origin"], "sidebar");
        assert!(request.options.meta.is_empty());
        assert_eq!(request.options.params["include"], "author");
    }

    #[test]
    fn receive_is_tagged_receive() {
        let action = receive(vec![Resource::new("articles").with_id("1")], None, Map::new());
        assert_eq!(action.kind(), ActionKind::Receive);
        assert_eq!(action.action_type(), "@@jsonapi-store/RECEIVE");
        assert_eq!(action.resources().len(), 1);
    }
}
