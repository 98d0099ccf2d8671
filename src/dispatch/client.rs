use std::collections::BTreeMap;

use reqwest::Client;

use crate::action::RequestAction;
use crate::config::ClientConfig;

use super::error::ApiError;
use super::request::{build_request, ApiRequest};
use super::response::{normalize, parse_document, NormalizedPayload};

/// Performs JSON:API exchanges against one host.
///
/// Building a request is pure; [`Dispatcher::execute`] is the only step that
/// touches the network. There is no retry: the caller owns retry policy.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    host: String,
    default_headers: BTreeMap<String, String>,
}

impl Dispatcher {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            host: config.host.clone(),
            default_headers: config.headers.clone(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn build_request(&self, action: &RequestAction) -> Result<ApiRequest, ApiError> {
        build_request(&self.host, &self.default_headers, action)
    }

    /// Send the request and normalize the response document.
    pub async fn execute(&self, request: ApiRequest) -> Result<NormalizedPayload, ApiError> {
        let ApiRequest {
            request_id,
            method,
            url,
            headers,
            body,
        } = request;

        tracing::debug!(%request_id, %method, %url, "Request pending");

        let mut builder = self.client.request(method.into(), url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%request_id, %url, error = %e, "Request failed to connect");
            ApiError::Connection {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            tracing::warn!(
                %request_id,
                status = status.as_u16(),
                status_text = %status_text,
                "Request failed"
            );
            return Err(ApiError::Transport {
                status: status.as_u16(),
                status_text,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Body(e.to_string()))?;

        let payload = normalize(parse_document(&bytes)?);

        tracing::debug!(
            %request_id,
            status = status.as_u16(),
            resources = payload.resources.len(),
            "Request succeeded"
        );

        Ok(payload)
    }
}
