//! Supabase project client

use crate::{error::SupabaseError, query::TableQuery};
use reqwest::{Client, RequestBuilder, Url};

/// Connection settings for a Supabase project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub url: String,
    /// Public anonymous API key
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }
}

/// Client for a single Supabase project's REST API
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    anon_key: String,
    rest_url: String,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("rest_url", &self.rest_url)
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Create a new client for the project described by `config`
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::InvalidUrl` if the project URL is not an
    /// absolute http(s) URL.
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        let base = config.url.trim().trim_end_matches('/');
        let parsed = Url::parse(base).map_err(|e| SupabaseError::InvalidUrl(format!("{base}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SupabaseError::InvalidUrl(format!(
                "{base}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            client: Client::new(),
            anon_key: config.anon_key,
            rest_url: format!("{base}/rest/v1"),
        })
    }

    /// Start a query against `table`
    #[must_use]
    pub fn from(&self, table: impl Into<String>) -> TableQuery {
        TableQuery::new(self.clone(), table.into())
    }

    /// Base URL of the REST API, without trailing slash
    #[must_use]
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    /// Build an authenticated request for `path` under the REST API
    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{path}", self.rest_url))
            .header("apikey", &self.anon_key)
            .header("authorization", format!("Bearer {}", self.anon_key))
    }
}
