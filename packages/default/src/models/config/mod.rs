mod api;
mod dashboard;
mod sync;

pub use api::*;
pub use dashboard::*;
pub use sync::*;

use anyhow::{Context, Result};
use config::Config;
use serde::Deserialize;
use std::env;
use tracing::debug;

pub const CONFIG_PATH_VAR: &str = "ENV_CONSOLE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "/etc/env-console/config.toml";
/// Prefix of the environment overlay, e.g. `ENV_CONSOLE__API__BASE_URL`.
pub const ENV_PREFIX: &str = "ENV_CONSOLE";

/// Top-level application configuration.
///
/// Groups the sections from the TOML file:
/// - `[api]`       → `ApiConfig`
/// - `[sync]`      → `SyncConfig`
/// - `[dashboard]` → `DashboardConfig`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsoleConfig {
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl ConsoleConfig {
    /// Loads configuration from `config.toml` and `ENV_CONSOLE__*` environment variables.
    ///
    /// The default path is `/etc/env-console/config.toml`, unless overridden
    /// by the `ENV_CONSOLE_CONFIG` environment variable. The file is optional.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        debug!("{} => {}", CONFIG_PATH_VAR, config_path);
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self> {
        Self::load_with_env(
            config_path,
            config::Environment::with_prefix(ENV_PREFIX).separator("__"),
        )
    }

    /// Loads the file at `config_path`, then applies `env` on top of it.
    pub fn load_with_env(config_path: &str, env: config::Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .build()
            .context("loading configuration")?;

        settings
            .try_deserialize::<Self>()
            .context("parsing configuration")
    }

    pub fn with_api(mut self, api: ApiConfig) -> Self {
        self.api = Some(api);
        self
    }

    /// Returns the `[api]` section, which every networked command needs.
    pub fn api_config(&self) -> Result<&ApiConfig> {
        self.api
            .as_ref()
            .context("missing [api] section in configuration")
    }
}

pub fn debug_print_config(cfg: &ConsoleConfig) {
    debug!("🔧 Loaded Configuration:");

    if let Some(api) = &cfg.api {
        debug!("  [api]");
        debug!("    base_url = {}", api.base_url);
    }

    debug!("  [sync]");
    debug!("    poll_interval = {:?}", cfg.sync.poll_interval);

    debug!("  [dashboard]");
    debug!("    host = {}", cfg.dashboard.host);
    debug!("    port = {}", cfg.dashboard.port);
}
