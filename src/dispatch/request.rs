//! Pure request building: URL, headers and body from a request action.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::action::{Method, RequestAction};
use crate::codec::WireDocument;
use crate::resource::dasherize;

use super::error::ApiError;

/// JSON:API media type.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// A fully built request, ready to execute.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Correlates log lines of one exchange.
    pub request_id: Uuid,
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Build the request for `action` against `host`.
///
/// Header precedence, lowest first: JSON:API defaults, `default_headers`,
/// the action's own headers.
pub fn build_request(
    host: &str,
    default_headers: &BTreeMap<String, String>,
    action: &RequestAction,
) -> Result<ApiRequest, ApiError> {
    let url = build_url(host, action)?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
    for (name, value) in default_headers.iter().chain(action.options.headers.iter()) {
        let (name, value) = header_pair(name, value)?;
        headers.insert(name, value);
    }

    let body = if action.method.has_body() {
        let document = WireDocument::from_resources(action.resources.clone());
        Some(serde_json::to_string(&document).map_err(|source| ApiError::Encode { source })?)
    } else {
        None
    };

    Ok(ApiRequest {
        request_id: Uuid::new_v4(),
        method: action.method,
        url,
        headers,
        body,
    })
}

/// `host/dashed-type/id?query`, or the explicit endpoint plus query.
///
/// Only the first resource of a batch shapes the path. A relative endpoint
/// resolves against the host.
pub fn build_url(host: &str, action: &RequestAction) -> Result<Url, ApiError> {
    let base = action.options.endpoint.as_deref().unwrap_or(host);
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: base.to_string(),
        reason,
    };

    let parsed = match action.options.endpoint.as_deref() {
        Some(endpoint) => Url::parse(endpoint)
            .or_else(|_| Url::parse(host).and_then(|root| root.join(endpoint))),
        None => Url::parse(host),
    };
    let mut url = parsed.map_err(|e| invalid(e.to_string()))?;

    if action.options.endpoint.is_none() {
        if let Some(first) = action.resources.first() {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid("URL cannot have path segments".to_string()))?;
            segments.pop_if_empty();
            if !first.resource_type.is_empty() {
                segments.push(&dasherize(&first.resource_type));
            }
            if let Some(id) = &first.id {
                segments.push(id);
            }
        }
    }

    let pairs = encode_query(&action.options.params);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
}

/// Flatten nested parameters into `key[child][0]=value` pairs.
///
/// Arrays use indices, `null` encodes as an empty value, and empty
/// objects or arrays produce nothing.
pub fn encode_query(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten(prefix: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(format!("{prefix}[{key}]"), child, pairs);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(format!("{prefix}[{index}]"), child, pairs);
            }
        }
        Value::Null => pairs.push((prefix, String::new())),
        Value::String(s) => pairs.push((prefix, s.clone())),
        Value::Bool(b) => pairs.push((prefix, b.to_string())),
        Value::Number(n) => pairs.push((prefix, n.to_string())),
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ApiError> {
    let invalid = || ApiError::InvalidHeader {
        name: name.to_string(),
    };
    let name_parsed = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
    let value_parsed = HeaderValue::from_str(value).map_err(|_| invalid())?;
    Ok((name_parsed, value_parsed))
}
