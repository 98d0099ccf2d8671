//! Middleware connecting actions, the store and the dispatcher.
//!
//! Request actions are forwarded to the store first, so readers see a
//! consistent pre-request snapshot while the exchange is in flight. The
//! response is folded in with a RECEIVE strictly after it is fully parsed.

use crate::action::{self, ApiAction, Method, RequestAction};
use crate::dispatch::{ApiError, Dispatcher, NormalizedPayload};
use crate::mvi::Intent;
use crate::store::Store;

#[derive(Debug)]
enum Phase {
    Pending,
    Succeeded,
    Failed,
}

/// Intercepts request actions and performs them over HTTP.
#[derive(Clone)]
pub struct ApiMiddleware {
    dispatcher: Dispatcher,
    store: Store,
}

impl ApiMiddleware {
    pub fn new(dispatcher: Dispatcher, store: Store) -> Self {
        Self { dispatcher, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatch an action.
    ///
    /// Request actions resolve to the normalized response payload; every
    /// other action is passed to the store and resolves to `None`.
    pub async fn dispatch(&self, action: ApiAction) -> Result<Option<NormalizedPayload>, ApiError> {
        self.store.dispatch(&action);

        match &action {
            ApiAction::Request(request) => self.perform(request).await.map(Some),
            ApiAction::Receive(_) => Ok(None),
        }
    }

    async fn perform(&self, request: &RequestAction) -> Result<NormalizedPayload, ApiError> {
        let action_type = request.method.kind().as_str();
        tracing::debug!(action = action_type, phase = ?Phase::Pending, "Dispatching");

        let result = match self.dispatcher.build_request(request) {
            Ok(built) => self.dispatcher.execute(built).await,
            Err(e) => Err(e),
        };

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(
                    action = action_type,
                    phase = ?Phase::Failed,
                    error_type = e.error_type(),
                    "Dispatch finished"
                );
                return Err(e);
            }
        };

        // A delete acknowledgment rarely echoes the resource, so the
        // request's own resources are what gets tombstoned.
        let received = match request.method {
            Method::Delete => request.resources.clone(),
            _ => payload.resources.clone(),
        };
        let receive = action::receive(received, Some(request.method), payload.meta.clone());
        self.store.dispatch(&receive);

        tracing::debug!(
            action = action_type,
            receive = receive.action_type(),
            phase = ?Phase::Succeeded,
            "Dispatch finished"
        );
        Ok(payload)
    }
}
