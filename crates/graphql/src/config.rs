use std::time::Duration;

/// Default upstream endpoint serving the Star Wars schema.
pub const DEFAULT_ENDPOINT: &str = "https://graphql.org/graphql";

/// Default ceiling on a single upstream request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upstream GraphQL configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GraphqlConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl GraphqlConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                       |
    /// |----------------------|-------------------------------|
    /// | `SWAPI_GRAPHQL_URL`  | `https://graphql.org/graphql` |
    /// | `SWAPI_TIMEOUT_SECS` | `30`                          |
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("SWAPI_GRAPHQL_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());

        let timeout_secs: u64 = std::env::var("SWAPI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("SWAPI_TIMEOUT_SECS must be a valid u64");

        Self {
            endpoint,
            timeout_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
