use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// References the composite resource type a composition is compatible with.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompositeTypeReference {
    pub api_version: String,
    pub kind: String,
}

/// Configures how a composite resource should be composed.
#[derive(Clone, Debug, PartialEq, CustomResource, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "apiextensions.crossplane.io",
    version = "v1",
    kind = "Composition"
)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSpec {
    pub composite_type_ref: CompositeTypeReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_connection_secrets_to_namespace: Option<String>,
}

/// The names a defined composite resource is served under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNames {
    pub kind: String,
    pub plural: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_kind: Option<String>,
}

/// The names a composite's namespaced claim is served under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimNames {
    pub kind: String,
    pub plural: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResourceDefinitionVersion {
    pub name: String,
    #[serde(default)]
    pub served: bool,
    #[serde(default)]
    pub referenceable: bool,
}

/// Defines a new kind of composite resource.
#[derive(Clone, Debug, PartialEq, CustomResource, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "apiextensions.crossplane.io",
    version = "v1",
    kind = "CompositeResourceDefinition"
)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResourceDefinitionSpec {
    pub group: String,
    pub names: ResourceNames,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_names: Option<ClaimNames>,
    #[serde(default)]
    pub versions: Vec<CompositeResourceDefinitionVersion>,
}
