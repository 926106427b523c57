use super::{client_for, record, ERR_GET_RESOURCE, ERR_LIST_CRDS};
use crate::model;
use async_graphql::{Context, Object, Result};
use cluster_graph_k8s_api as k8s;

/// The query root: entry points into the cluster's resource graph.
pub struct Query;

#[Object]
impl Query {
    /// A managed resource by kind and name.
    async fn managed_resource(
        &self,
        ctx: &Context<'_>,
        api_version: String,
        kind: String,
        name: String,
        namespace: Option<String>,
    ) -> Result<Option<model::ManagedResource>> {
        Ok(get_dynamic(ctx, &api_version, &kind, &name, namespace.as_deref())
            .await
            .as_ref()
            .map(model::ManagedResource::from))
    }

    /// A composite resource by kind and name.
    async fn composite_resource(
        &self,
        ctx: &Context<'_>,
        api_version: String,
        kind: String,
        name: String,
    ) -> Result<Option<model::CompositeResource>> {
        Ok(get_dynamic(ctx, &api_version, &kind, &name, None)
            .await
            .as_ref()
            .map(model::CompositeResource::from))
    }

    /// All CustomResourceDefinitions installed in the cluster.
    async fn custom_resource_definitions(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Option<Vec<model::CustomResourceDefinition>>> {
        let Some(client) = client_for(ctx).await else {
            return Ok(None);
        };

        let api = k8s::Api::<k8s::CustomResourceDefinition>::all(client);
        match api.list(&k8s::ListParams::default()).await {
            Ok(crds) => Ok(Some(
                crds.items
                    .iter()
                    .map(model::CustomResourceDefinition::from)
                    .collect(),
            )),
            Err(error) => {
                record(ctx, ERR_LIST_CRDS, error);
                Ok(None)
            }
        }
    }
}

/// Fetches an arbitrary custom resource by group-version-kind and name.
async fn get_dynamic(
    ctx: &Context<'_>,
    api_version: &str,
    kind: &str,
    name: &str,
    namespace: Option<&str>,
) -> Option<k8s::DynamicObject> {
    let Some(client) = client_for(ctx).await else {
        return None;
    };

    let (group, version) = match api_version.split_once('/') {
        Some((group, version)) => (group, version),
        None => ("", api_version),
    };
    let resource =
        k8s::ApiResource::from_gvk(&k8s::GroupVersionKind::gvk(group, version, kind));
    let api = match namespace {
        Some(ns) => k8s::Api::<k8s::DynamicObject>::namespaced_with(client, ns, &resource),
        None => k8s::Api::<k8s::DynamicObject>::all_with(client, &resource),
    };

    match api.get_opt(name).await {
        Ok(obj) => obj,
        Err(error) => {
            record(ctx, ERR_GET_RESOURCE, error);
            None
        }
    }
}
