use async_graphql::{Enum, Json, SimpleObject};
use chrono::{DateTime, Utc};
use cluster_graph_k8s_api as k8s;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Metadata common to all cluster objects.
#[derive(Clone, Debug, Default, SimpleObject)]
pub struct ObjectMeta {
    pub name: Option<String>,
    pub generate_name: Option<String>,
    pub namespace: Option<String>,
    pub uid: Option<String>,
    pub resource_version: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub labels: Option<Json<BTreeMap<String, String>>>,
    pub annotations: Option<Json<BTreeMap<String, String>>>,
}

/// A condition reported in an object's status.
#[derive(Clone, Debug, SimpleObject)]
pub struct Condition {
    #[graphql(name = "type")]
    pub type_: String,
    pub status: ConditionStatus,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub last_transition_time: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Enum)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

/// A reference to a secret in an arbitrary namespace.
#[derive(Clone, Debug, Default, SimpleObject)]
pub struct SecretReference {
    pub name: String,
    pub namespace: String,
}

/// A reference to a provider config by name.
#[derive(Clone, Debug, SimpleObject)]
pub struct ProviderConfigReference {
    pub name: String,
}

/// A reference to an arbitrary cluster object.
#[derive(Clone, Debug, Default, SimpleObject)]
pub struct ObjectReference {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    pub namespace: Option<String>,
    pub name: Option<String>,
}

/// Matches objects by label.
#[derive(Clone, Debug, SimpleObject)]
pub struct LabelSelector {
    pub match_labels: Option<Json<BTreeMap<String, String>>>,
}

// === impl ObjectMeta ===

impl From<&k8s::ObjectMeta> for ObjectMeta {
    fn from(meta: &k8s::ObjectMeta) -> Self {
        Self {
            name: meta.name.clone(),
            generate_name: meta.generate_name.clone(),
            namespace: meta.namespace.clone(),
            uid: meta.uid.clone(),
            resource_version: meta.resource_version.clone(),
            creation_time: meta.creation_timestamp.as_ref().map(|t| t.0),
            labels: non_empty(meta.labels.clone()),
            annotations: non_empty(meta.annotations.clone()),
        }
    }
}

fn non_empty(map: Option<BTreeMap<String, String>>) -> Option<Json<BTreeMap<String, String>>> {
    map.filter(|m| !m.is_empty()).map(Json)
}

// === impl Condition ===

/// The condition shape Crossplane embeds in arbitrary resource status.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCondition {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    last_transition_time: Option<DateTime<Utc>>,
}

impl Condition {
    /// Parses the `conditions` array of a raw status value. Malformed or
    /// absent conditions map to an absent list, never an error.
    pub(crate) fn from_status(status: Option<&serde_json::Value>) -> Option<Vec<Condition>> {
        let raw = status?.get("conditions")?.clone();
        let raw: Vec<RawCondition> = serde_json::from_value(raw).ok()?;
        Some(
            raw.into_iter()
                .map(|c| Condition {
                    type_: c.type_,
                    status: match c.status.as_str() {
                        "True" => ConditionStatus::True,
                        "False" => ConditionStatus::False,
                        _ => ConditionStatus::Unknown,
                    },
                    reason: c.reason,
                    message: c.message,
                    last_transition_time: c.last_transition_time,
                })
                .collect(),
        )
    }
}
