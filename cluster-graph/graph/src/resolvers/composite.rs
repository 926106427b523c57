use super::{
    client_for, managed::events_for, record, ERR_GET_COMPOSITION, ERR_GET_SECRET, ERR_LIST_XRDS,
};
use crate::model::{self, CompositeResource, CompositeResourceSpec};
use async_graphql::{ComplexObject, Context, Result};
use cluster_graph_k8s_api as k8s;

#[ComplexObject]
impl CompositeResource {
    /// The CompositeResourceDefinition that defines this composite's kind.
    async fn definition(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Option<model::CompositeResourceDefinition>> {
        let Some(client) = client_for(ctx).await else {
            return Ok(None);
        };

        let api = k8s::Api::<k8s::CompositeResourceDefinition>::all(client);
        let xrds = match api.list(&k8s::ListParams::default()).await {
            Ok(xrds) => xrds,
            Err(error) => {
                record(ctx, ERR_LIST_XRDS, error);
                return Ok(None);
            }
        };

        let group = model::api_group(&self.api_version);
        Ok(xrds
            .items
            .iter()
            .find(|xrd| xrd.spec.group == group && xrd.spec.names.kind == self.kind)
            .map(model::CompositeResourceDefinition::from))
    }

    /// The composition this composite resource is rendered with, per its
    /// composition reference.
    async fn composition(&self, ctx: &Context<'_>) -> Result<Option<model::Composition>> {
        let Some(name) = self
            .spec
            .composition_ref
            .as_ref()
            .and_then(|r| r.name.as_deref())
        else {
            return Ok(None);
        };
        let Some(client) = client_for(ctx).await else {
            return Ok(None);
        };

        let api = k8s::Api::<k8s::Composition>::all(client);
        match api.get_opt(name).await {
            Ok(composition) => Ok(composition.as_ref().map(model::Composition::from)),
            Err(error) => {
                record(ctx, ERR_GET_COMPOSITION, error);
                Ok(None)
            }
        }
    }

    /// Events recorded against this composite resource.
    async fn events(&self, ctx: &Context<'_>) -> Result<Option<Vec<model::Event>>> {
        events_for(ctx, self.metadata.uid.as_deref(), self.metadata.namespace.as_deref()).await
    }
}

#[ComplexObject]
impl CompositeResourceSpec {
    /// The connection secret this composite writes, if it references one and
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
