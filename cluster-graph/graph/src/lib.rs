//! The graph surface over live cluster state.
//!
//! `model` holds the records the API exposes and the pure mappings from raw
//! cluster objects into them. `resolvers` fills requested fields on demand by
//! consulting the cluster with the caller's own client; a field's failure is
//! recorded in the query's [`ResponseContext`] rather than aborting its
//! siblings.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod model;
pub mod resolvers;

pub use self::resolvers::{
    response::{FieldError, ResponseContext},
    schema, ClusterGraphSchema, Query,
};
