/// Server configuration
///
/// # Environment variables
///
/// Every item can be overridden through an environment variable:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | STORE_URL | http://localhost:8090 | Document store base URL |
/// | STORE_BACKEND | http | `http` or `memory` |
/// | HOLD_APPLY_MINUTES | 120 | Hold activation lead time (minutes) |
/// | RESERVATION_BLOCK_MINUTES | 120 | Assumed reservation duration (minutes) |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | tracing filter level |
/// | LOG_DIR | (unset) | When set, also log to daily files there |
///
/// # Example
///
/// ```ignore
/// STORE_URL=http://10.0.0.5:8090 HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Document store base URL
    pub store_url: String,
    /// Store backend: `http` | `memory`
    pub store_backend: StoreBackend,
    /// How far before start a reservation hold activates
    pub hold_apply_minutes: i64,
    /// Assumed occupancy duration of a reservation
    pub reservation_block_minutes: i64,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// tracing filter level
    pub log_level: String,
    /// Optional directory for daily rolling log files
    pub log_dir: Option<String>,
}

/// Which document store implementation to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Http,
    Memory,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; unparseable numeric
    /// values do too.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store_url: std::env::var("STORE_URL")
                .unwrap_or_else(|_| "http://localhost:8090".into()),
            store_backend: match std::env::var("STORE_BACKEND").as_deref() {
                Ok("memory") => StoreBackend::Memory,
                _ => StoreBackend::Http,
            },
            hold_apply_minutes: std::env::var("HOLD_APPLY_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(120),
            reservation_block_minutes: std::env::var("RESERVATION_BLOCK_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(120),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Hold window parameters as one value
    pub fn hold_config(&self) -> crate::holds::HoldConfig {
        crate::holds::HoldConfig {
            hold_minutes: self.hold_apply_minutes,
            block_minutes: self.reservation_block_minutes,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
