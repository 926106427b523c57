use super::ObjectMeta;
use async_graphql::{Json, SimpleObject};
use base64::Engine;
use cluster_graph_k8s_api as k8s;
use std::collections::BTreeMap;

/// A Kubernetes secret, e.g. the connection details of a managed resource.
#[derive(Clone, Debug, SimpleObject)]
pub struct Secret {
    pub metadata: ObjectMeta,
    #[graphql(name = "type")]
    pub type_: Option<String>,
    /// Secret payload keyed by entry name, base64-encoded.
    pub data: Option<Json<BTreeMap<String, String>>>,
}

// === impl Secret ===

impl From<&k8s::Secret> for Secret {
    fn from(secret: &k8s::Secret) -> Self {
        Self {
            metadata: ObjectMeta::from(&secret.metadata),
            type_: secret.type_.clone(),
            data: secret.data.as_ref().filter(|d| !d.is_empty()).map(|data| {
                Json(
                    data.iter()
                        .map(|(key, value)| {
                            let encoded =
                                base64::engine::general_purpose::STANDARD.encode(&value.0);
                            (key.clone(), encoded)
                        })
                        .collect(),
                )
            }),
        }
    }
}
