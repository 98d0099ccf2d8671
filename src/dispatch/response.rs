//! Response normalization.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::codec::{normalize_resource, PrimaryData, WireDocument};
use crate::resource::Resource;

use super::error::ApiError;

/// Store-ready shape of a response document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedPayload {
    /// Primary resources first, then included ones.
    pub resources: Vec<Resource>,
    /// Which of `resources` are primary.
    pub result: Option<DocumentResult>,
    pub meta: Map<String, Value>,
    /// Length of the primary prefix of `resources`, id or not.
    #[serde(skip)]
    primary_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DocumentResult {
    One(String),
    Many(Vec<String>),
}

impl NormalizedPayload {
    /// Primary resources, in document order.
    pub fn primary(&self) -> &[Resource] {
        &self.resources[..self.primary_count.min(self.resources.len())]
    }
}

/// Parse a response body. An empty body is an empty document.
pub fn parse_document(body: &[u8]) -> Result<WireDocument, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(WireDocument::default());
    }
    serde_json::from_slice(body).map_err(|source| ApiError::MalformedResponse { source })
}

/// Flatten a document into `[primary..., included...]` with its result ids.
pub fn normalize(document: WireDocument) -> NormalizedPayload {
    let WireDocument {
        data,
        included,
        meta,
    } = document;

    let (primary, result) = match data {
        None => (Vec::new(), None),
        Some(PrimaryData::One(resource)) => {
            let result = resource.id.clone().map(DocumentResult::One);
            (vec![*resource], result)
        }
        Some(PrimaryData::Many(resources)) => {
            let ids = resources.iter().filter_map(|r| r.id.clone()).collect();
            (resources, Some(DocumentResult::Many(ids)))
        }
    };

    let primary_count = primary.len();
    let resources = primary
        .into_iter()
        .chain(included)
        .map(normalize_resource)
        .collect();

    NormalizedPayload {
        resources,
        result,
        meta,
        primary_count,
    }
}
