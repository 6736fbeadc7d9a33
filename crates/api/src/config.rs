use std::time::Duration;

use planetsync_graphql::GraphqlConfig;

/// Headroom the HTTP request timeout keeps above the upstream GraphQL
/// timeout, so a slow upstream surfaces as a sync failure instead of 408.
pub const UPSTREAM_TIMEOUT_MARGIN_SECS: u64 = 5;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    ///
    /// Raised at runtime when it does not exceed the GraphQL timeout; see
    /// [`ServerConfig::request_timeout`].
    pub request_timeout_secs: u64,
    /// Upstream GraphQL API settings.
    pub graphql: GraphqlConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// GraphQL settings come from [`GraphqlConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let config = Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            graphql: GraphqlConfig::from_env(),
        };

        let floor = config.graphql.timeout_secs + UPSTREAM_TIMEOUT_MARGIN_SECS;
        if config.request_timeout_secs < floor {
            tracing::warn!(
                request_timeout_secs = config.request_timeout_secs,
                graphql_timeout_secs = config.graphql.timeout_secs,
                effective_secs = config.request_timeout().as_secs(),
                "REQUEST_TIMEOUT_SECS does not exceed SWAPI_TIMEOUT_SECS; raising it",
            );
        }

        config
    }

    /// Effective HTTP request timeout.
    ///
    /// Never shorter than the upstream GraphQL timeout plus
    /// [`UPSTREAM_TIMEOUT_MARGIN_SECS`].
    pub fn request_timeout(&self) -> Duration {
        let floor = self.graphql.timeout_secs + UPSTREAM_TIMEOUT_MARGIN_SECS;
        Duration::from_secs(self.request_timeout_secs.max(floor))
    }
}
