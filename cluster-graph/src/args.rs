use crate::server;
use anyhow::Result;
use clap::Parser;
use cluster_graph_clients::{CacheConfig, ClientCache, ClientOptions, SharedClients};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing::info;

#[derive(Debug, Parser)]
#[clap(name = "cluster-graph", about = "A graph query API over live cluster state")]
pub struct Args {
    #[clap(long, default_value = "cluster_graph=info,warn", env = "CLUSTER_GRAPH_LOG")]
    log_level: String,

    /// Address the GraphQL server listens on.
    #[clap(long, default_value = "0.0.0.0:8080")]
    graphql_addr: SocketAddr,

    /// How long a per-caller client may be reused, in seconds.
    #[clap(long, default_value = "300")]
    client_cache_ttl: u64,

    /// Maximum number of cached per-caller clients.
    #[clap(long, default_value = "100")]
    client_cache_capacity: usize,

    /// Connect timeout for cluster calls, in seconds.
    #[clap(long, default_value = "5")]
    connect_timeout: u64,

    /// Read timeout for cluster calls, in seconds.
    #[clap(long, default_value = "30")]
    read_timeout: u64,
}

// === impl Args ===

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            log_level,
            graphql_addr,
            client_cache_ttl,
            client_cache_capacity,
            connect_timeout,
            read_timeout,
        } = self;

        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::try_new(log_level)?)
            .init();

        // The client cache is process-wide state: every query execution
        // shares it for the lifetime of the server.
        let cache = ClientCache::infer(CacheConfig {
            ttl: Duration::from_secs(client_cache_ttl),
            capacity: client_cache_capacity,
        })
        .await?
        .with_default_options(ClientOptions {
            connect_timeout: Some(Duration::from_secs(connect_timeout)),
            read_timeout: Some(Duration::from_secs(read_timeout)),
            server_url: None,
        });
        let clients: SharedClients = Arc::new(cache);

        let schema = cluster_graph_graph::schema(clients);
        let app = server::router(schema);

        let listener = tokio::net::TcpListener::bind(graphql_addr).await?;
        info!(addr = %graphql_addr, "graphql server listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown())
            .await?;
        Ok(())
    }
}

async fn shutdown() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
}
