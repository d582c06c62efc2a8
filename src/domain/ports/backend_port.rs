//! Backend port definition.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::entities::{BackendKind, LookupStatus, PageUrl, RequestId};

/// Port over a source of thumbnail bytes.
///
/// Both backing stores implement this; the gateway picks one at construction
/// and stays agnostic afterwards. Asynchronous results arrive as
/// [`crate::domain::entities::LookupCompletion`]s on the completion channel
/// the implementation was built with, exactly once per accepted lookup unless
/// the lookup is cancelled first.
#[async_trait]
pub trait BackendPort: Send + Sync {
    /// Attempts to answer a lookup in-line.
    async fn probe(&self, url: &PageUrl) -> LookupStatus;

    /// Starts the asynchronous path for a lookup that probed
    /// [`LookupStatus::Pending`].
    async fn begin_lookup(&self, url: PageUrl, request_id: RequestId);

    /// Tells the backend to stop notifying for the given ids.
    ///
    /// Best-effort: completions already in flight may still be delivered and
    /// are dropped on the receiving side.
    async fn cancel_all(&self, ids: HashSet<RequestId>);

    /// Identifies the backend in logs.
    fn kind(&self) -> BackendKind;
}
