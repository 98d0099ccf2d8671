//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use jsonapi_store::config::ClientConfig;
use jsonapi_store::dispatch::Dispatcher;
use jsonapi_store::middleware::ApiMiddleware;
use jsonapi_store::resource::{Relationship, Resource, ResourceIdentifier};
use jsonapi_store::store::Store;
use std::path::PathBuf;
use tempfile::TempDir;

/// Client config pointing at `host` with short timeouts.
pub fn client_config(host: &str) -> ClientConfig {
    ClientConfig {
        host: host.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
        ..ClientConfig::default()
    }
}

/// Middleware with an empty store wired to `host`.
pub fn middleware_for(host: &str) -> ApiMiddleware {
    middleware_with_store(host, Store::new())
}

pub fn middleware_with_store(host: &str, store: Store) -> ApiMiddleware {
    let dispatcher = Dispatcher::new(&client_config(host)).expect("Failed to build dispatcher");
    ApiMiddleware::new(dispatcher, store)
}

pub fn article(id: &str, title: &str) -> Resource {
    Resource::new("articles")
        .with_id(id)
        .with_attribute("title", title)
}

/// Article with an author (to-one) and tags (to-many) relationship.
pub fn linked_article(id: &str, author: &str, tags: &[&str]) -> Resource {
    article(id, "Linked")
        .with_relationship(
            "author",
            Relationship::to_one(ResourceIdentifier::new("people", author)),
        )
        .with_relationship(
            "tags",
            Relationship::to_many(
                tags.iter()
                    .map(|t| ResourceIdentifier::new("tags", *t))
                    .collect(),
            ),
        )
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
