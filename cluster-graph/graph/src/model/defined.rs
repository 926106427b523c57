use super::{Condition, ObjectMeta};
use async_graphql::SimpleObject;
use cluster_graph_k8s_api as k8s;

/// A Kubernetes CustomResourceDefinition, e.g. the definition of a managed
/// resource kind installed by a provider.
#[derive(Clone, Debug, SimpleObject)]
pub struct CustomResourceDefinition {
    pub metadata: ObjectMeta,
    pub spec: CustomResourceDefinitionSpec,
    pub status_conditions: Option<Vec<Condition>>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CustomResourceDefinitionSpec {
    pub group: String,
    pub names: CustomResourceDefinitionNames,
    pub versions: Option<Vec<CustomResourceDefinitionVersion>>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CustomResourceDefinitionNames {
    pub kind: String,
    pub plural: String,
    pub singular: Option<String>,
    pub list_kind: Option<String>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CustomResourceDefinitionVersion {
    pub name: String,
    pub served: bool,
    pub storage: bool,
}

/// A Crossplane CompositeResourceDefinition: defines a new composite resource
/// kind and, optionally, a namespaced claim kind for it.
#[derive(Clone, Debug, SimpleObject)]
pub struct CompositeResourceDefinition {
    pub metadata: ObjectMeta,
    pub spec: CompositeResourceDefinitionSpec,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CompositeResourceDefinitionSpec {
    pub group: String,
    pub names: CompositeResourceDefinitionNames,
    pub claim_names: Option<ClaimNames>,
    pub versions: Option<Vec<CompositeResourceDefinitionVersion>>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CompositeResourceDefinitionNames {
    pub kind: String,
    pub plural: String,
    pub singular: Option<String>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ClaimNames {
    pub kind: String,
    pub plural: String,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CompositeResourceDefinitionVersion {
    pub name: String,
    pub served: bool,
    pub referenceable: bool,
}

/// A Crossplane Composition.
#[derive(Clone, Debug, SimpleObject)]
pub struct Composition {
    pub metadata: ObjectMeta,
    pub spec: CompositionSpec,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CompositionSpec {
    pub composite_type_ref: CompositeTypeReference,
    pub write_connection_secrets_to_namespace: Option<String>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CompositeTypeReference {
    pub api_version: String,
    pub kind: String,
}

// === impl CustomResourceDefinition ===

impl From<&k8s::CustomResourceDefinition> for CustomResourceDefinition {
    fn from(crd: &k8s::CustomResourceDefinition) -> Self {
        Self {
            metadata: ObjectMeta::from(&crd.metadata),
            spec: CustomResourceDefinitionSpec {
                group: crd.spec.group.clone(),
                names: CustomResourceDefinitionNames {
                    kind: crd.spec.names.kind.clone(),
                    plural: crd.spec.names.plural.clone(),
                    singular: crd.spec.names.singular.clone(),
                    list_kind: crd.spec.names.list_kind.clone(),
                },
                versions: if crd.spec.versions.is_empty() {
                    None
                } else {
                    Some(
                        crd.spec
                            .versions
                            .iter()
                            .map(|v| CustomResourceDefinitionVersion {
                                name: v.name.clone(),
                                served: v.served,
                                storage: v.storage,
                            })
                            .collect(),
                    )
                },
            },
            status_conditions: crd.status.as_ref().and_then(|status| {
                let conditions = status.conditions.as_ref()?;
                Some(
                    conditions
                        .iter()
                        .map(|c| Condition {
                            type_: c.type_.clone(),
                            status: match c.status.as_str() {
                                "True" => super::ConditionStatus::True,
                                "False" => super::ConditionStatus::False,
                                _ => super::ConditionStatus::Unknown,
                            },
                            reason: c.reason.clone(),
                            message: c.message.clone(),
                            last_transition_time: c.last_transition_time.as_ref().map(|t| t.0),
                        })
                        .collect(),
                )
            }),
        }
    }
}

// === impl CompositeResourceDefinition ===

impl From<&k8s::CompositeResourceDefinition> for CompositeResourceDefinition {
    fn from(xrd: &k8s::CompositeResourceDefinition) -> Self {
        Self {
            metadata: ObjectMeta::from(&xrd.metadata),
            spec: CompositeResourceDefinitionSpec {
                group: xrd.spec.group.clone(),
                names: CompositeResourceDefinitionNames {
                    kind: xrd.spec.names.kind.clone(),
                    plural: xrd.spec.names.plural.clone(),
                    singular: xrd.spec.names.singular.clone(),
                },
                claim_names: xrd.spec.claim_names.as_ref().map(|names| ClaimNames {
                    kind: names.kind.clone(),
                    plural: names.plural.clone(),
                }),
                versions: if xrd.spec.versions.is_empty() {
                    None
                } else {
                    Some(
                        xrd.spec
                            .versions
                            .iter()
                            .map(|v| CompositeResourceDefinitionVersion {
                                name: v.name.clone(),
                                served: v.served,
                                referenceable: v.referenceable,
                            })
                            .collect(),
                    )
                },
            },
        }
    }
}

// === impl Composition ===

impl From<&k8s::Composition> for Composition {
    fn from(cmp: &k8s::Composition) -> Self {
        Self {
            metadata: ObjectMeta::from(&cmp.metadata),
            spec: CompositionSpec {
                composite_type_ref: CompositeTypeReference {
                    api_version: cmp.spec.composite_type_ref.api_version.clone(),
                    kind: cmp.spec.composite_type_ref.kind.clone(),
                },
                write_connection_secrets_to_namespace: cmp
                    .spec
                    .write_connection_secrets_to_namespace
                    .clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_a_custom_resource_definition() {
        let crd = k8s::CustomResourceDefinition {
            metadata: k8s::ObjectMeta {
                name: Some("examples.example.org".to_string()),
                ..Default::default()
            },
            spec: k8s::CustomResourceDefinitionSpec {
                group: "example.org".to_string(),
                names: k8s::CustomResourceDefinitionNames {
                    kind: "Example".to_string(),
                    plural: "examples".to_string(),
                    ..Default::default()
                },
                versions: vec![k8s::CustomResourceDefinitionVersion {
                    name: "v1".to_string(),
                    served: true,
                    storage: true,
                    ..Default::default()
                }],
                ..Default::default()
            },
            status: None,
        };

        let got = CustomResourceDefinition::from(&crd);
        assert_eq!(got.metadata.name.as_deref(), Some("examples.example.org"));
        assert_eq!(got.spec.group, "example.org");
        assert_eq!(got.spec.names.kind, "Example");
        let versions = got.spec.versions.expect("versions");
        assert_eq!(versions.len(), 1);
        assert!(versions[0].served && versions[0].storage);
        assert!(got.status_conditions.is_none());
    }

    #[test]
    fn maps_a_composition() {
        let cmp = k8s::Composition::new(
            "coolcmp",
            k8s::CompositionSpec {
                composite_type_ref: k8s::CompositeTypeReference {
                    api_version: "example.org/v1".to_string(),
                    kind: "CompositePostgres".to_string(),
                },
                write_connection_secrets_to_namespace: Some("crossplane-system".to_string()),
            },
        );

        let got = Composition::from(&cmp);
        assert_eq!(got.metadata.name.as_deref(), Some("coolcmp"));
        assert_eq!(got.spec.composite_type_ref.kind, "CompositePostgres");
        assert_eq!(
            got.spec.write_connection_secrets_to_namespace.as_deref(),
            Some("crossplane-system")
        );
    }
}
