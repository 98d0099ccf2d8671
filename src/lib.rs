//! Client-side reconciling cache for JSON:API resources.
//!
//! Request actions built by [`action`] are performed by the
//! [`middleware::ApiMiddleware`], whose responses are normalized and folded
//! into the [`store::Store`] by [`store::ApiReducer`]. Dirty resources are
//! never overwritten by server data. [`resolver::resolve`] loads missing
//! relationships on demand.

pub mod action;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod middleware;
pub mod mvi;
pub mod resolver;
pub mod resource;
pub mod store;
