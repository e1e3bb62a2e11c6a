//! Environment-driven server configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Framed table protocol listener.
    pub table_addr: String,
    /// Registration HTTP listener.
    pub http_addr: String,
    /// Root of the persistent data directory (user registry).
    pub data_dir: PathBuf,
    /// Shared table password; empty disables the check.
    pub server_password: String,
    /// Per-read deadline during the connection handshake.
    pub handshake_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_addr: "127.0.0.1:2342".to_string(),
            http_addr: "127.0.0.1:8080".to_string(),
            data_dir: PathBuf::from("data"),
            server_password: String::new(),
            handshake_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            table_addr: env_or("SKAT_TABLE_ADDR", defaults.table_addr),
            http_addr: env_or("SKAT_HTTP_ADDR", defaults.http_addr),
            data_dir: PathBuf::from(env_or(
                "SKAT_DATA_DIR",
                defaults.data_dir.display().to_string(),
            )),
            server_password: env_or("SKAT_SERVER_PASSWORD", defaults.server_password),
            handshake_timeout: defaults.handshake_timeout,
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}
