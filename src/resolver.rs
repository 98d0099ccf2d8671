//! Relationship resolver.
//!
//! Fetches every relationship of a resource that the store cannot satisfy
//! yet, then hydrates the resource against the updated store. Relationships
//! that are already loaded are never refetched.

use std::collections::BTreeMap;

use futures::future::join_all;
use serde_json::{json, Map};

use crate::action::{self, ApiAction, RequestOptions};
use crate::codec::{self, HydratedResource};
use crate::dispatch::{ApiError, DocumentResult, NormalizedPayload};
use crate::middleware::ApiMiddleware;
use crate::resource::{Linkage, RelationshipDescriptor, RelationshipKind, Resource};
use crate::store::ApiState;

/// A read issued for one relationship.
struct RelationshipRead {
    /// Set when the relationship has no linkage and takes it from the response.
    adopts_linkage: Option<String>,
    action: ApiAction,
}

/// Hydrate `resource`, loading its unloaded relationships first.
///
/// The store's version of the resource is used when it holds one. All reads
/// run concurrently and are awaited together. When one or more fail, the
/// first failure is returned once every read has settled.
pub async fn resolve(
    middleware: &ApiMiddleware,
    resource: &Resource,
    options: RequestOptions,
) -> Result<HydratedResource, ApiError> {
    let snapshot = middleware.store().state();
    let hydrated = codec::deserialize(current_version(resource, &snapshot), &snapshot);

    let reads: Vec<RelationshipRead> = hydrated
        .descriptors()
        .filter(|descriptor| !descriptor.loaded)
        .flat_map(|descriptor| {
            let adopts_linkage = (!descriptor.has_linkage).then(|| descriptor.name.clone());
            relationship_reads(descriptor, &options)
                .into_iter()
                .map(move |action| RelationshipRead {
                    adopts_linkage: adopts_linkage.clone(),
                    action,
                })
        })
        .collect();

    if reads.is_empty() {
        return Ok(hydrated);
    }

    tracing::debug!(
        resource_type = %hydrated.resource_type(),
        id = ?hydrated.id(),
        reads = reads.len(),
        "Resolving relationships"
    );

    let (adopting, actions): (Vec<_>, Vec<_>) = reads
        .into_iter()
        .map(|read| (read.adopts_linkage, read.action))
        .unzip();
    let results = join_all(actions.into_iter().map(|read| middleware.dispatch(read))).await;

    let mut adopted = Vec::new();
    let mut first_error = None;
    for (name, result) in adopting.into_iter().zip(results) {
        match (name, result) {
            (Some(name), Ok(Some(payload))) => adopted.push((name, response_linkage(&payload))),
            (_, Ok(_)) => {}
            (_, Err(e)) => {
                first_error.get_or_insert(e);
            }
        }
    }

    // The store moved on while we waited; hydrate against a fresh snapshot.
    let mut current = current_version(hydrated.resource(), &middleware.store().state()).clone();
    if !adopted.is_empty() {
        for (name, linkage) in adopted {
            current.relationships.entry(name).or_default().data = Some(linkage);
        }
        // Persist the linkage so the next resolve sees the relationship loaded.
        middleware
            .store()
            .dispatch(&action::receive(vec![current.clone()], None, Map::new()));
    }

    if let Some(err) = first_error {
        return Err(err);
    }
    Ok(codec::deserialize(&current, &middleware.store().state()))
}

fn current_version<'a>(resource: &'a Resource, snapshot: &'a ApiState) -> &'a Resource {
    resource
        .id
        .as_deref()
        .and_then(|id| snapshot.get(&resource.resource_type, id))
        .unwrap_or(resource)
}

/// Linkage equivalent of a response's primary data.
fn response_linkage(payload: &NormalizedPayload) -> Linkage {
    let mut identifiers = payload.primary().iter().filter_map(Resource::identifier);
    match payload.result {
        Some(DocumentResult::Many(_)) => Linkage::Many(identifiers.collect()),
        _ => Linkage::One(identifiers.next()),
    }
}

/// Reads for one unloaded relationship; empty if it cannot be fetched.
///
/// A `related` link wins. Otherwise to-one reads `type/id` and to-many reads
/// each target type's collection filtered by the missing ids.
fn relationship_reads(
    descriptor: &RelationshipDescriptor,
    options: &RequestOptions,
) -> Vec<ApiAction> {
    if let Some(related) = &descriptor.related {
        let targets: Vec<Resource> = descriptor.targets.iter().map(Resource::from).collect();
        return vec![action::read(
            targets,
            options.clone().with_endpoint(related.clone()),
        )];
    }

    match descriptor.kind {
        RelationshipKind::ToOne => descriptor
            .missing
            .first()
            .map(|target| action::read(Resource::from(target), options.clone()))
            .into_iter()
            .collect(),
        RelationshipKind::ToMany => {
            let mut ids_by_type: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
            for target in &descriptor.missing {
                ids_by_type
                    .entry(target.resource_type.as_str())
                    .or_default()
                    .push(target.id.as_str());
            }
            ids_by_type
                .into_iter()
                .map(|(resource_type, ids)| {
                    action::read(
                        Resource::new(resource_type),
                        options
                            .clone()
                            .with_param("filter", json!({ "id": ids.join(",") })),
                    )
                })
                .collect()
        }
    }
}
