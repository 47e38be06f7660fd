use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Serve the built-in demo dataset instead of calling the device API
    pub fixture: bool,
    /// How often the terminal view is redrawn; devices poll on their own cadence
    pub refresh_secs: u64,
    pub file: String,
    pub save_to_file: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 5,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Atlas Scientific Dashboard".to_string(),
            fixture: false,
            refresh_secs: 1,
            file: "dashboard.html".to_string(),
            save_to_file: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(rename = "API", alias = "api")]
    pub api: ApiConfig,
    #[serde(rename = "DASHBOARD", alias = "dashboard")]
    pub dashboard: DashboardConfig,
    #[serde(rename = "LOGGING", alias = "logging")]
    pub logging: LoggingConfig,
}

// Backslash escapes are undone by the INI reader; `;` and `#` would otherwise start a comment
fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '\'' | ';' | '#') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_file("config.ini")
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        // A zero period would make tokio::time::interval panic
        Duration::from_secs(self.dashboard.refresh_secs.max(1))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Ini))
            .build()
            .context(format!("Failed to load config from {}", config_path.display()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        Ok(app_config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        let mut config_str = String::new();

        config_str.push_str(&format!(
            "[API]\nbase_url = {}\ntimeout_secs = {}\n\n",
            escape_value(&self.api.base_url),
            self.api.timeout_secs
        ));

        config_str.push_str(&format!(
            "[DASHBOARD]\ntitle = {}\nfixture = {}\nrefresh_secs = {}\nfile = {}\nsave_to_file = {}\n\n",
            escape_value(&self.dashboard.title),
            self.dashboard.fixture,
            self.dashboard.refresh_secs,
            escape_value(&self.dashboard.file),
            self.dashboard.save_to_file
        ));

        config_str.push_str(&format!(
            "[LOGGING]\nlevel = {}\n",
            escape_value(&self.logging.level)
        ));

        fs::write(config_path, config_str)
            .context(format!("Failed to save config to {}", config_path.display()))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}
