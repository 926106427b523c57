//! Records exposed by the graph API and their mappings from raw cluster
//! objects.
//!
//! Mappings are pure: no I/O, total over well-formed input, with unset raw
//! fields surfacing as absent model fields.

mod composite;
mod defined;
mod event;
mod managed;
mod meta;
mod secret;

pub use self::{
    composite::{
        CompositeResource, CompositeResourceConnectionDetails, CompositeResourceSpec,
        CompositeResourceStatus,
    },
    defined::{
        ClaimNames, CompositeResourceDefinition, CompositeResourceDefinitionNames,
        CompositeResourceDefinitionSpec, CompositeResourceDefinitionVersion, CompositeTypeReference,
        Composition, CompositionSpec, CustomResourceDefinition, CustomResourceDefinitionNames,
        CustomResourceDefinitionSpec, CustomResourceDefinitionVersion,
    },
    event::Event,
    managed::{DeletionPolicy, ManagedResource, ManagedResourceSpec, ManagedResourceStatus},
    meta::{
        Condition, ConditionStatus, LabelSelector, ObjectMeta, ObjectReference,
        ProviderConfigReference, SecretReference,
    },
    secret::Secret,
};

/// The group half of an `apiVersion`; empty for the core group.
pub(crate) fn api_group(api_version: &str) -> &str {
    api_version.split_once('/').map_or("", |(group, _)| group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_group_splits_off_the_version() {
        assert_eq!(api_group("example.org/v1"), "example.org");
        assert_eq!(api_group("v1"), "");
    }
}
