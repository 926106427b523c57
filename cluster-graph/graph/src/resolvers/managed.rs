use super::{client_for, record, ERR_GET_SECRET, ERR_LIST_CRDS, ERR_LIST_EVENTS, EVENTS_LIMIT};
use crate::model::{self, ManagedResource, ManagedResourceSpec};
use async_graphql::{ComplexObject, Context, Result};
use cluster_graph_k8s_api as k8s;

#[ComplexObject]
impl ManagedResource {
    /// The CustomResourceDefinition that defines this managed resource's
    /// kind. Absent if the definition is not installed.
    async fn definition(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Option<model::CustomResourceDefinition>> {
        let Some(client) = client_for(ctx).await else {
            return Ok(None);
        };

        let api = k8s::Api::<k8s::CustomResourceDefinition>::all(client);
        let crds = match api.list(&k8s::ListParams::default()).await {
            Ok(crds) => crds,
            Err(error) => {
                record(ctx, ERR_LIST_CRDS, error);
                return Ok(None);
            }
        };

        let group = model::api_group(&self.api_version);
        Ok(crds
            .items
            .iter()
            .find(|crd| crd.spec.group == group && crd.spec.names.kind == self.kind)
            .map(model::CustomResourceDefinition::from))
    }

    /// Events recorded against this managed resource.
    async fn events(&self, ctx: &Context<'_>) -> Result<Option<Vec<model::Event>>> {
        events_for(ctx, self.metadata.uid.as_deref(), self.metadata.namespace.as_deref()).await
    }
}

#[ComplexObject]
impl ManagedResourceSpec {
    /// The connection secret this resource writes, if it references one and
    /// the secret exists.
    async fn connection_secret(&self, ctx: &Context<'_>) -> Result<Option<model::Secret>> {
        let Some(secret_ref) = &self.writes_connection_secret_to_ref else {
            return Ok(None);
        };
        let Some(client) = client_for(ctx).await else {
            return Ok(None);
        };

        let api = k8s::Api::<k8s::Secret>::namespaced(client, &secret_ref.namespace);
        match api.get_opt(&secret_ref.name).await {
            Ok(secret) => Ok(secret.as_ref().map(model::Secret::from)),
            Err(error) => {
                record(ctx, ERR_GET_SECRET, error);
                Ok(None)
            }
        }
    }
}

/// Lists the events involving the object with the given uid. Shared by the
/// managed and composite resolvers; an object without a uid has nothing to
/// look up.
pub(super) async fn events_for(
    ctx: &Context<'_>,
    uid: Option<&str>,
    namespace: Option<&str>,
) -> Result<Option<Vec<model::Event>>> {
    let Some(uid) = uid else {
        return Ok(None);
    };
    let Some(client) = client_for(ctx).await else {
        return Ok(None);
    };

    let api = match namespace {
        Some(ns) => k8s::Api::<k8s::Event>::namespaced(client, ns),
        None => k8s::Api::<k8s::Event>::all(client),
    };
    let params = k8s::ListParams::default()
        .fields(&format!("involvedObject.uid={uid}"))
        .limit(EVENTS_LIMIT);
    match api.list(&params).await {
        Ok(events) => Ok(Some(events.items.iter().map(model::Event::from).collect())),
        Err(error) => {
            record(ctx, ERR_LIST_EVENTS, error);
            Ok(None)
        }
    }
}
