use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::shared::AppError;

const APP_DIR: &str = "whatshouldweplay";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub spinner: SpinnerConfig,
    pub flow: FlowConfig,
}

/// Remote catalog (BoardGameGeek XML API) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Retries after a "queued" (202) response before giving up.
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

/// Local persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override the default data file location.
    pub data_file: Option<PathBuf>,
}

/// Spin animation settings. None of these change the outcome of a spin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    pub duration_ms: u64,
    pub extra_rotations: u32,
    pub frame_interval_ms: u64,
    /// Fixed seed for reproducible draws.
    pub seed: Option<u64>,
}

/// Screen flow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub splash_delay_ms: u64,
    pub default_party_size: u32,
    pub max_party_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://boardgamegeek.com/xmlapi2".to_string(),
            max_retries: 5,
            retry_delay_ms: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            duration_ms: 5000,
            extra_rotations: 5,
            frame_interval_ms: 50,
            seed: None,
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            splash_delay_ms: 5000,
            default_party_size: 2,
            max_party_size: 10,
        }
    }
}

impl CatalogConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl SpinnerConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

impl StorageConfig {
    /// Resolved data file: the override, else `<data dir>/whatshouldweplay/store.json`.
    pub fn data_file_path(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("store.json")
        })
    }
}

impl AppConfig {
    /// Layers defaults, `<config dir>/whatshouldweplay/config.toml` and `WSWP_*` env vars.
    pub fn load() -> Result<Self, AppError> {
        let config_path = Self::config_path();
        debug!(path = %config_path.display(), "Loading configuration");
        Self::figment(Some(config_path))
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    fn figment(config_path: Option<PathBuf>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed("WSWP_").split("__"))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_catalog_contract() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.max_retries, 5);
        assert_eq!(config.catalog.retry_delay(), Duration::from_secs(3));
        assert_eq!(config.spinner.duration(), Duration::from_millis(5000));
        assert_eq!(config.spinner.extra_rotations, 5);
        assert_eq!(config.flow.default_party_size, 2);
        assert_eq!(config.flow.max_party_size, 10);
    }

    #[test]
    fn test_env_overrides_nested_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WSWP_SPINNER__DURATION_MS", "250");
            jail.set_env("WSWP_CATALOG__MAX_RETRIES", "2");

            let config: AppConfig = AppConfig::figment(None).extract()?;
            assert_eq!(config.spinner.duration_ms, 250);
            assert_eq!(config.catalog.max_retries, 2);
            assert_eq!(config.flow.splash_delay_ms, 5000);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_is_layered_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [flow]
                splash_delay_ms = 0

                [spinner]
                seed = 42
                frame_interval_ms = 10
                "#,
            )?;
            jail.set_env("WSWP_SPINNER__FRAME_INTERVAL_MS", "20");

            let config: AppConfig =
                AppConfig::figment(Some(PathBuf::from("config.toml"))).extract()?;
            assert_eq!(config.flow.splash_delay_ms, 0);
            assert_eq!(config.spinner.seed, Some(42));
            assert_eq!(config.spinner.frame_interval_ms, 20);
            Ok(())
        });
    }

    #[test]
    fn test_data_file_override() {
        let storage = StorageConfig {
            data_file: Some(PathBuf::from("/tmp/games.json")),
        };
        assert_eq!(storage.data_file_path(), PathBuf::from("/tmp/games.json"));
    }
}
