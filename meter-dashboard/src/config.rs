use std::path::PathBuf;

use serde::Deserialize;

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    pub metrics: Option<MetricsConfig>,
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from the TOML file named by `MONITOR_CONFIG`
    /// (default `monitor-config.toml`). A missing file yields the defaults;
    /// `MONITOR_API_URL` overrides the backend base URL either way.
    pub fn load() -> anyhow::Result<Self> {
        use std::{env, fs, io};

        let path = env::var("MONITOR_CONFIG").unwrap_or_else(|_| "monitor-config.toml".to_string());
        let mut cfg: AppConfig = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => AppConfig::default(),
            Err(e) => return Err(e.into()),
        };

        if let Ok(url) = env::var("MONITOR_API_URL") {
            if !url.is_empty() {
                cfg.backend.base_url = url;
            }
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.backend.base_url, "http://localhost:5000");
        assert_eq!(cfg.backend.request_timeout_secs, 30);
        assert!(cfg.metrics.is_none());
        assert_eq!(cfg.export.dir, PathBuf::from("."));
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [backend]
            base_url = "http://meters.internal:8080"

            [metrics]
            bind_addr = "127.0.0.1:9187"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.backend.base_url, "http://meters.internal:8080");
        assert_eq!(cfg.backend.request_timeout_secs, 30);
        assert_eq!(cfg.metrics.unwrap().bind_addr, "127.0.0.1:9187");
    }
}
