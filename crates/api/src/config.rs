use todorank_core::types::DbId;

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
    pub request_timeout_secs: u64,
    /// Owner used when a request carries no `X-Owner-Id` header. `None`
    /// makes the header mandatory.
    pub default_owner_id: Option<DbId>,
    /// Create the built-in categories for the default owner at startup.
    pub seed_default_categories: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `DEFAULT_OWNER_ID`        | unset                   |
    /// | `SEED_DEFAULT_CATEGORIES` | `false`                 |
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

        let default_owner_id: Option<DbId> = std::env::var("DEFAULT_OWNER_ID").ok().map(|v| {
            v.parse()
                .expect("DEFAULT_OWNER_ID must be a valid integer id")
        });

        let seed_default_categories: bool = std::env::var("SEED_DEFAULT_CATEGORIES")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SEED_DEFAULT_CATEGORIES must be true or false");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_owner_id,
            seed_default_categories,
        }
    }
}
