//! Page-lock lease configuration.

use serde::{Deserialize, Serialize};

/// Lease settings for the page-lock registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
    /// Default lease duration on acquire, in minutes.
    #[serde(default = "default_lease_minutes")]
    pub lease_minutes: i64,
    /// Default extension added to the current deadline, in minutes.
    #[serde(default = "default_extend_minutes")]
    pub extend_minutes: i64,
    /// Warning threshold: a live lock with at most this many minutes left
    /// is reported as expiring soon.
    #[serde(default = "default_expiring_soon_minutes")]
    pub expiring_soon_minutes: i64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            lease_minutes: default_lease_minutes(),
            extend_minutes: default_extend_minutes(),
            expiring_soon_minutes: default_expiring_soon_minutes(),
        }
    }
}

fn default_lease_minutes() -> i64 {
    30
}

fn default_extend_minutes() -> i64 {
    30
}

fn default_expiring_soon_minutes() -> i64 {
    5
}
