#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod crossplane;

pub use self::crossplane::{
    ClaimNames, CompositeResourceDefinition, CompositeResourceDefinitionSpec,
    CompositeResourceDefinitionVersion, CompositeTypeReference, Composition, CompositionSpec,
    ResourceNames,
};
pub use k8s_openapi::{
    api::core::v1::{Event, Secret},
    apiextensions_apiserver::pkg::apis::apiextensions::v1::{
        CustomResourceDefinition, CustomResourceDefinitionNames, CustomResourceDefinitionSpec,
        CustomResourceDefinitionVersion,
    },
    apimachinery::pkg::apis::meta::v1::Time,
    ByteString,
};
pub use kube::{
    api::{Api, DynamicObject, ListParams, ObjectMeta},
    core::{ApiResource, GroupVersionKind, TypeMeta},
    Client, ResourceExt,
};
