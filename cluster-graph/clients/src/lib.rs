//! Per-caller Kubernetes clients.
//!
//! Every query runs against the cluster with the caller's own identity, so a
//! client must be constructed per set of credentials rather than shared
//! process-wide. Construction is expensive (TLS setup, config validation), so
//! constructed clients are cached keyed by `(Credentials, ClientOptions)` and
//! reused across queries. Concurrent misses on one key are coalesced into a
//! single construction.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod cache;
mod credentials;

pub use self::{
    cache::{CacheConfig, ClientCache, ClientOptions, Clients, ConfigMakeClient, MakeClient},
    credentials::Credentials,
};

use std::sync::Arc;

/// A `Clients` implementation shared across all query executions.
pub type SharedClients = Arc<dyn Clients>;

#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load kubernetes configuration: {0}")]
    Config(Arc<kube::config::InferConfigError>),

    #[error("invalid api server address: {0}")]
    ServerAddress(String),

    #[error("failed to construct kubernetes client: {0}")]
    Construct(Arc<kube::Error>),
}
