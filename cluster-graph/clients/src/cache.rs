use crate::{Credentials, Error};
use futures::{
    future::{BoxFuture, Shared},
    FutureExt,
};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

/// Client construction options.
///
/// Options are part of the cache key: two requests with the same credentials
/// but different options must not share a client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClientOptions {
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    /// Overrides the API server address from the base config.
    pub server_url: Option<String>,
}

/// Constructs a client for a set of credentials.
///
/// This is the cache's construction seam; tests count invocations through it.
#[async_trait::async_trait]
pub trait MakeClient: Send + Sync + 'static {
    async fn make(&self, creds: &Credentials, opts: &ClientOptions) -> Result<kube::Client, Error>;
}

/// The resolver-facing contract: a ready-to-use client for the caller's
/// credentials.
#[async_trait::async_trait]
pub trait Clients: Send + Sync + 'static {
    async fn get(&self, creds: &Credentials) -> anyhow::Result<kube::Client>;
}

/// Makes clients by rewriting a base `kube::Config` to the caller's identity.
pub struct ConfigMakeClient {
    base: kube::Config,
}

#[derive(Copy, Clone, Debug)]
pub struct CacheConfig {
    /// How long a constructed client may be reused before it is rebuilt.
    pub ttl: Duration,
    /// Maximum number of cached clients; the stalest entry is evicted first.
    pub capacity: usize,
}

/// A process-wide cache of constructed clients keyed by
/// `(Credentials, ClientOptions)`.
///
/// Hits never block other keys. A miss installs a shared construction future
/// under the map lock and awaits it outside the lock, so concurrent misses on
/// one key coalesce into a single construction while other keys proceed
/// untouched. Failed constructions are never cached.
pub struct ClientCache<M = ConfigMakeClient> {
    make: Arc<M>,
    config: CacheConfig,
    default_options: ClientOptions,
    entries: Arc<Mutex<HashMap<Key, Entry>>>,
}

type Key = (Credentials, ClientOptions);

type ConstructFuture = Shared<BoxFuture<'static, Result<kube::Client, Error>>>;

enum Entry {
    /// A construction in flight; concurrent misses await the same future.
    Pending(ConstructFuture),
    Ready {
        client: kube::Client,
        created_at: Instant,
    },
}

// === impl ConfigMakeClient ===

impl ConfigMakeClient {
    pub fn new(base: kube::Config) -> Self {
        Self { base }
    }

    /// Loads the base config from the environment, in-cluster or kubeconfig.
    pub async fn infer() -> Result<Self, Error> {
        let base = kube::Config::infer()
            .await
            .map_err(|e| Error::Config(Arc::new(e)))?;
        Ok(Self { base })
    }
}

#[async_trait::async_trait]
impl MakeClient for ConfigMakeClient {
    async fn make(&self, creds: &Credentials, opts: &ClientOptions) -> Result<kube::Client, Error> {
        let mut config = self.base.clone();
        if let Some(url) = &opts.server_url {
            config.cluster_url = url
                .parse()
                .map_err(|e: http::uri::InvalidUri| Error::ServerAddress(e.to_string()))?;
        }
        if let Some(timeout) = opts.connect_timeout {
            config.connect_timeout = Some(timeout);
        }
        if let Some(timeout) = opts.read_timeout {
            config.read_timeout = Some(timeout);
        }
        creds.apply(&mut config);

        kube::Client::try_from(config).map_err(|e| Error::Construct(Arc::new(e)))
    }
}

// === impl CacheConfig ===

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            capacity: 100,
        }
    }
}

// === impl ClientCache ===

impl<M> Clone for ClientCache<M> {
    fn clone(&self) -> Self {
        Self {
            make: self.make.clone(),
            config: self.config,
            default_options: self.default_options.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<M: MakeClient> ClientCache<M> {
    pub fn new(make: M, config: CacheConfig) -> Self {
        Self {
            make: Arc::new(make),
            config,
            default_options: ClientOptions::default(),
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Sets the options used when a caller does not supply any.
    pub fn with_default_options(mut self, options: ClientOptions) -> Self {
        self.default_options = options;
        self
    }

    /// Returns a client for the given credentials and options, constructing
    /// one only if no live cached client exists for the key.
    pub async fn get_with(
        &self,
        creds: &Credentials,
        opts: &ClientOptions,
    ) -> Result<kube::Client, Error> {
        let key = (creds.clone(), opts.clone());

        let pending = {
            let mut entries = self.entries.lock();
            match entries.get(&key) {
                Some(Entry::Ready { client, created_at })
                    if created_at.elapsed() < self.config.ttl =>
                {
                    return Ok(client.clone());
                }
                Some(Entry::Pending(fut)) => fut.clone(),
                _ => {
                    // Vacant or expired: install a new construction future
                    // before releasing the lock so concurrent misses join it.
                    let make = self.make.clone();
                    let (c, o) = (creds.clone(), opts.clone());
                    let fut = async move { make.make(&c, &o).await }.boxed().shared();
                    entries.insert(key.clone(), Entry::Pending(fut.clone()));
                    evict_excess(&mut entries, self.config.capacity);
                    fut
                }
            }
        };

        match pending.clone().await {
            Ok(client) => {
                let mut entries = self.entries.lock();
                // Promote only our own pending cell; a concurrent failure may
                // already have installed a newer one at this key.
                if let Some(entry) = entries.get_mut(&key) {
                    if matches!(entry, Entry::Pending(fut) if fut.ptr_eq(&pending)) {
                        *entry = Entry::Ready {
                            client: client.clone(),
                            created_at: Instant::now(),
                        };
                    }
                }
                Ok(client)
            }
            Err(error) => {
                tracing::debug!(%error, "client construction failed");
                let mut entries = self.entries.lock();
                if matches!(entries.get(&key), Some(Entry::Pending(fut)) if fut.ptr_eq(&pending)) {
                    entries.remove(&key);
                }
                Err(error)
            }
        }
    }
}

impl ClientCache<ConfigMakeClient> {
    /// A cache over the environment's base config.
    pub async fn infer(config: CacheConfig) -> Result<Self, Error> {
        Ok(Self::new(ConfigMakeClient::infer().await?, config))
    }
}

#[async_trait::async_trait]
impl<M: MakeClient> Clients for ClientCache<M> {
    async fn get(&self, creds: &Credentials) -> anyhow::Result<kube::Client> {
        Ok(self.get_with(creds, &self.default_options).await?)
    }
}

/// Drops the stalest ready entries until the map fits the capacity bound.
/// Pending constructions are never evicted.
fn evict_excess(entries: &mut HashMap<Key, Entry>, capacity: usize) {
    while entries.len() > capacity {
        let stalest = entries
            .iter()
            .filter_map(|(key, entry)| match entry {
                Entry::Ready { created_at, .. } => Some((key.clone(), *created_at)),
                Entry::Pending(_) => None,
            })
            .min_by_key(|(_, created_at)| *created_at);
        match stalest {
            Some((key, _)) => {
                entries.remove(&key);
            }
            None => return,
        }
    }
}
