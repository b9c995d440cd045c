//! Frontend configuration
//!
//! Defaults are overridden by environment variables prefixed with `SOCIAL__`:
//! - `SOCIAL__BACKEND_URL`: backend base URL (default: "http://localhost:8000")
//! - `SOCIAL__LISTEN_ADDR`: address the UI is served on (default: "0.0.0.0:8501")
//! - `SOCIAL__LOG_LEVEL`: log filter used when `RUST_LOG` is unset (default: "info")
//! - `SOCIAL__MAX_UPLOAD_MB`: largest accepted upload in megabytes (default: 200)
//! - `SOCIAL__SESSION_IDLE_MINUTES`: idle time after which a UI session is forgotten (default: 60)

use std::time::Duration;

use anyhow::Result;
use common::backend::{BackendConfig, DEFAULT_BACKEND_URL};
use config::{Config, Environment};
use serde::Deserialize;

/// Frontend settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub backend_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub max_upload_mb: usize,
    pub session_idle_minutes: u64,
}

impl Settings {
    /// Load settings from defaults and the environment
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .set_default("listen_addr", "0.0.0.0:8501")?
            .set_default("log_level", "info")?
            .set_default("max_upload_mb", 200)?
            .set_default("session_idle_minutes", 60)?
            .add_source(
                Environment::with_prefix("SOCIAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        if settings.max_upload_mb == 0 {
            anyhow::bail!("SOCIAL__MAX_UPLOAD_MB must be greater than zero");
        }
        if settings.session_idle_minutes == 0 {
            anyhow::bail!("SOCIAL__SESSION_IDLE_MINUTES must be greater than zero");
        }

        Ok(settings)
    }

    /// Backend connection settings
    pub fn backend(&self) -> BackendConfig {
        BackendConfig::new(self.backend_url.clone())
    }

    /// Largest accepted request body in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }

    /// Idle time after which a UI session is dropped
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes * 60)
    }
}
