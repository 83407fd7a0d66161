//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod lock;
pub mod logging;
pub mod server;
pub mod share;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use self::lock::LockConfig;
use self::logging::LoggingConfig;
use self::server::ServerConfig;
use self::share::ShareConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Page-lock lease settings.
    #[serde(default)]
    pub lock: LockConfig,
    /// Report-share settings.
    #[serde(default)]
    pub share: ShareConfig,
    /// Initial admin bootstrap settings.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            lock: LockConfig::default(),
            share: ShareConfig::default(),
            bootstrap: BootstrapConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Bootstrap configuration for the initial administrator.
///
/// Authentication is external to this service; the user directory starts
/// empty, so an admin entry is seeded at startup to make the user
/// management endpoints reachable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Whether to seed the initial admin on startup.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// User identifier of the initial admin.
    #[serde(default)]
    pub admin_id: Option<Uuid>,
    /// Display name of the initial admin.
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_id: None,
            admin_name: default_admin_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SITEREPORT`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SITEREPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

fn default_true() -> bool {
    true
}
