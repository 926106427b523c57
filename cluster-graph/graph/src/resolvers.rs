//! Field resolvers over live cluster state.
//!
//! Every resolver that touches the cluster follows one protocol: obtain a
//! client scoped to the caller's credentials, perform the read, map the
//! result. Failures are recorded against the current field path in the
//! query's [`ResponseContext`] and the field resolves to its zero value; a
//! resolver never returns an error to the engine, so sibling fields and the
//! rest of the query proceed regardless.

pub mod response;

mod composite;
mod managed;
mod query;

pub use self::query::Query;

use self::response::ResponseContext;
use async_graphql::{Context, EmptyMutation, EmptySubscription, Schema};
use cluster_graph_clients::{Credentials, SharedClients};
use std::fmt::Display;

pub(crate) const ERR_GET_CLIENT: &str = "could not get client";
pub(crate) const ERR_LIST_CRDS: &str = "could not list CustomResourceDefinitions";
pub(crate) const ERR_LIST_XRDS: &str = "could not list CompositeResourceDefinitions";
pub(crate) const ERR_GET_SECRET: &str = "could not get secret";
pub(crate) const ERR_GET_COMPOSITION: &str = "could not get Composition";
pub(crate) const ERR_LIST_EVENTS: &str = "could not list Events";
pub(crate) const ERR_GET_RESOURCE: &str = "could not get resource";

/// Bounds how many events a single field resolution will fetch.
pub(crate) const EVENTS_LIMIT: u32 = 500;

pub type ClusterGraphSchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Builds the schema over a shared client source. Per-query state (the
/// caller's [`Credentials`] and the [`ResponseContext`]) is attached to each
/// request by the server.
pub fn schema(clients: SharedClients) -> ClusterGraphSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(clients)
        .finish()
}

/// Records a field-scoped failure against the current field path.
pub(crate) fn record(ctx: &Context<'_>, summary: &str, cause: impl Display) {
    let path = ctx
        .path_node
        .as_ref()
        .map(|node| node.to_string_vec().join("."))
        .unwrap_or_default();
    let message = format!("{summary}: {cause}");
    tracing::debug!(%path, %message, "field resolution failed");
    match ctx.data_opt::<ResponseContext>() {
        Some(rsp) => rsp.add_error(path, message),
        None => tracing::warn!(%path, %message, "no response context; field error dropped"),
    }
}

/// Obtains a client for the caller's credentials, recording a field error on
/// failure. `None` means the field must resolve to its zero value.
pub(crate) async fn client_for(ctx: &Context<'_>) -> Option<kube::Client> {
    let clients = match ctx.data_opt::<SharedClients>() {
        Some(clients) => clients,
        None => {
            record(ctx, ERR_GET_CLIENT, "no client source configured");
            return None;
        }
    };
    let creds = ctx.data_opt::<Credentials>().cloned().unwrap_or_default();
    match clients.get(&creds).await {
        Ok(client) => Some(client),
        Err(error) => {
            record(ctx, ERR_GET_CLIENT, error);
            None
        }
    }
}
