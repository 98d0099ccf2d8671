//! Request dispatcher.
//!
//! Two phases: [`build_request`] turns a request action into an
//! [`ApiRequest`] without side effects, and [`Dispatcher::execute`] performs
//! the exchange and normalizes the response.

mod client;
mod error;
mod request;
mod response;

pub use client::Dispatcher;
pub use error::ApiError;
pub use request::{build_request, build_url, encode_query, ApiRequest, MEDIA_TYPE};
pub use response::{normalize, parse_document, DocumentResult, NormalizedPayload};
