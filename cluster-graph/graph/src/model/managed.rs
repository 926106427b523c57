use super::{Condition, ObjectMeta, ProviderConfigReference, SecretReference};
use async_graphql::{Enum, SimpleObject};
use cluster_graph_k8s_api as k8s;
use serde::Deserialize;

/// A resource managed by a Crossplane provider, e.g. a cloud database or a
/// bucket. Managed resources are arbitrary custom resources, so they are
/// modeled from their dynamic representation.
#[derive(Clone, Debug, SimpleObject)]
#[graphql(complex)]
pub struct ManagedResource {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ManagedResourceSpec,
    pub status: Option<ManagedResourceStatus>,
}

#[derive(Clone, Debug, Default, SimpleObject)]
#[graphql(complex)]
pub struct ManagedResourceSpec {
    pub provider_config_ref: Option<ProviderConfigReference>,
    pub deletion_policy: Option<DeletionPolicy>,
    pub writes_connection_secret_to_ref: Option<SecretReference>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ManagedResourceStatus {
    pub conditions: Option<Vec<Condition>>,
}

/// What happens to the external resource when the managed resource is
/// deleted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Enum)]
pub enum DeletionPolicy {
    Delete,
    Orphan,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawSpec {
    provider_config_ref: Option<RawNameReference>,
    deletion_policy: Option<String>,
    write_connection_secret_to_ref: Option<RawSecretReference>,
}

#[derive(Deserialize, Default)]
struct RawNameReference {
    name: String,
}

#[derive(Deserialize, Default)]
struct RawSecretReference {
    #[serde(default)]
    name: String,
    #[serde(default)]
    namespace: String,
}

// === impl ManagedResource ===

impl From<&k8s::DynamicObject> for ManagedResource {
    fn from(obj: &k8s::DynamicObject) -> Self {
        let (api_version, kind) = obj
            .types
            .as_ref()
            .map(|t| (t.api_version.clone(), t.kind.clone()))
            .unwrap_or_default();

        Self {
            api_version,
            kind,
            metadata: ObjectMeta::from(&obj.metadata),
            spec: ManagedResourceSpec::from_raw(obj.data.get("spec")),
            status: Condition::from_status(obj.data.get("status"))
                .map(|conditions| ManagedResourceStatus {
                    conditions: Some(conditions),
                }),
        }
    }
}

// === impl ManagedResourceSpec ===

impl ManagedResourceSpec {
    fn from_raw(spec: Option<&serde_json::Value>) -> Self {
        let raw: RawSpec = spec
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();

        Self {
            provider_config_ref: raw
                .provider_config_ref
                .map(|r| ProviderConfigReference { name: r.name }),
            deletion_policy: raw.deletion_policy.as_deref().and_then(|p| match p {
                "Delete" => Some(DeletionPolicy::Delete),
                "Orphan" => Some(DeletionPolicy::Orphan),
                _ => None,
            }),
            writes_connection_secret_to_ref: raw.write_connection_secret_to_ref.map(|r| {
                SecretReference {
                    name: r.name,
                    namespace: r.namespace,
                }
            }),
        }
    }
}
