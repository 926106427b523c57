use std::fmt;

/// The identity a query runs as.
///
/// Credentials are extracted once per inbound request and key the client
/// cache, so they are cheap to clone and comparable by value. An anonymous
/// credential maps to the server's own service-account identity.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Credentials {
    token: Option<String>,
    impersonate_user: Option<String>,
    impersonate_groups: Vec<String>,
}

// === impl Credentials ===

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Credentials that authenticate with the given bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Impersonates the given user, overriding any previous impersonation.
    pub fn impersonate_user(mut self, user: impl Into<String>) -> Self {
        self.impersonate_user = Some(user.into());
        self
    }

    /// Adds a group to the impersonated identity.
    pub fn impersonate_group(mut self, group: impl Into<String>) -> Self {
        self.impersonate_groups.push(group.into());
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.token.is_none() && self.impersonate_user.is_none() && self.impersonate_groups.is_empty()
    }

    /// Rewrites a base config's auth to this identity.
    ///
    /// A caller-provided token replaces the base auth entirely rather than
    /// augmenting it; the base identity must not leak into caller-scoped
    /// requests.
    pub(crate) fn apply(&self, config: &mut kube::Config) {
        if let Some(token) = &self.token {
            config.auth_info = kube::config::AuthInfo {
                token: Some(token.clone().into()),
                ..Default::default()
            };
        }
        if let Some(user) = &self.impersonate_user {
            config.auth_info.impersonate = Some(user.clone());
        }
        if !self.impersonate_groups.is_empty() {
            config.auth_info.impersonate_groups = Some(self.impersonate_groups.clone());
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("impersonate_user", &self.impersonate_user)
            .field("impersonate_groups", &self.impersonate_groups)
            .finish()
    }
}
