use super::{Condition, LabelSelector, ObjectMeta, ObjectReference, SecretReference};
use async_graphql::{Json, SimpleObject};
use chrono::{DateTime, Utc};
use cluster_graph_k8s_api as k8s;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A composite resource: an instance of a kind defined by a
/// CompositeResourceDefinition and composed of managed resources according to
/// a Composition.
#[derive(Clone, Debug, SimpleObject)]
#[graphql(complex)]
pub struct CompositeResource {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: CompositeResourceSpec,
    pub status: Option<CompositeResourceStatus>,
}

#[derive(Clone, Debug, Default, SimpleObject)]
#[graphql(complex)]
pub struct CompositeResourceSpec {
    pub composition_selector: Option<LabelSelector>,
    pub composition_ref: Option<ObjectReference>,
    pub claim_ref: Option<ObjectReference>,
    /// The managed resources this composite is composed of.
    pub resource_refs: Option<Vec<ObjectReference>>,
    pub writes_connection_secret_to_ref: Option<SecretReference>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CompositeResourceStatus {
    pub conditions: Option<Vec<Condition>>,
    pub connection_details: Option<CompositeResourceConnectionDetails>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CompositeResourceConnectionDetails {
    pub last_published_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawSpec {
    composition_selector: Option<RawSelector>,
    composition_ref: Option<RawReference>,
    claim_ref: Option<RawReference>,
    resource_refs: Vec<RawReference>,
    write_connection_secret_to_ref: Option<RawSecretReference>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawSelector {
    match_labels: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawReference {
    api_version: Option<String>,
    kind: Option<String>,
    namespace: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSecretReference {
    name: String,
    namespace: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawConnectionDetails {
    last_published_time: Option<DateTime<Utc>>,
}

// === impl CompositeResource ===

impl From<&k8s::DynamicObject> for CompositeResource {
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
            spec: CompositeResourceSpec::from_raw(obj.data.get("spec")),
            status: CompositeResourceStatus::from_raw(obj.data.get("status")),
        }
    }
}

// === impl CompositeResourceSpec ===

impl CompositeResourceSpec {
    fn from_raw(spec: Option<&serde_json::Value>) -> Self {
        let raw: RawSpec = spec
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();

        Self {
            composition_selector: raw.composition_selector.map(|s| LabelSelector {
                match_labels: s.match_labels.map(Json),
            }),
            composition_ref: raw.composition_ref.map(Into::into),
            claim_ref: raw.claim_ref.map(Into::into),
            resource_refs: if raw.resource_refs.is_empty() {
                None
            } else {
                Some(raw.resource_refs.into_iter().map(Into::into).collect())
            },
            writes_connection_secret_to_ref: raw.write_connection_secret_to_ref.map(|r| {
                SecretReference {
                    name: r.name,
                    namespace: r.namespace,
                }
            }),
        }
    }
}

impl From<RawReference> for ObjectReference {
    fn from(raw: RawReference) -> Self {
        Self {
            api_version: raw.api_version,
            kind: raw.kind,
            namespace: raw.namespace,
            name: raw.name,
        }
    }
}

// === impl CompositeResourceStatus ===

impl CompositeResourceStatus {
    fn from_raw(status: Option<&serde_json::Value>) -> Option<Self> {
        let status = status?;
        let conditions = Condition::from_status(Some(status));
        let details: Option<RawConnectionDetails> = status
            .get("connectionDetails")
            .and_then(|v| serde_json::from_value(v.clone()).ok());

        if conditions.is_none() && details.is_none() {
            return None;
        }
        Some(Self {
            conditions,
            connection_details: details.map(|d| CompositeResourceConnectionDetails {
                last_published_time: d.last_published_time,
            }),
        })
    }
}
