use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database lives here) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | default tracing filter (RUST_LOG wins) |
/// | ENFORCE_SCOPES | false | require x-auth-scopes on privileged routes |
/// | POINTS_PER_DOLLAR | 10 | Unity Rewards earn rate |
/// | WELCOME_BONUS | 100 | one-time points grant on first order |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/unity HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database file
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
    /// Whether privileged routes require the matching scope header
    pub enforce_scopes: bool,
    /// Unity Rewards earn rate
    pub points_per_dollar: u32,
    /// One-time welcome grant
    pub welcome_bonus: i64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            enforce_scopes: std::env::var("ENFORCE_SCOPES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            points_per_dollar: std::env::var("POINTS_PER_DOLLAR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            welcome_bonus: std::env::var("WELCOME_BONUS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }

    /// Path of the redb database file under the working directory
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("unity.redb")
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
