use crate::error::{Error, Result};
use crate::services::export_service::CsvDialect;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub token_file: PathBuf,
    pub export_dir: PathBuf,
    pub banner_ttl: Duration,
    pub audit_log_limit: u32,
    pub csv_dialect: CsvDialect,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_base_url = get_env_or("API_BASE_URL", DEFAULT_API_BASE_URL);
        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url)?,
            token_file: env::var("TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_token_file()),
            export_dir: PathBuf::from(get_env_or("EXPORT_DIR", ".")),
            banner_ttl: Duration::from_secs(get_env_parse_or("BANNER_TTL_SECS", 3)?),
            audit_log_limit: get_env_parse_or("AUDIT_LOG_LIMIT", 50)?,
            csv_dialect: get_env_parse_or("CSV_DIALECT", CsvDialect::Naive)?,
        })
    }

    /// Configuration pointing at `api_base_url` with every other setting at
    /// its default.
    pub fn with_base_url(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            token_file: default_token_file(),
            export_dir: PathBuf::from("."),
            banner_ttl: Duration::from_secs(3),
            audit_log_limit: 50,
            csv_dialect: CsvDialect::Naive,
        })
    }

    pub fn override_base_url(mut self, api_base_url: &str) -> Result<Self> {
        self.api_base_url = normalize_base_url(api_base_url)?;
        Ok(self)
    }
}

/// `<config dir>/candidate-console/session.json`, falling back to the
/// working directory when the platform has no config dir.
pub fn default_token_file() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("candidate-console").join("session.json")
    } else if let Some(home_dir) = dirs::home_dir() {
        home_dir
            .join(".config")
            .join("candidate-console")
            .join("session.json")
    } else {
        PathBuf::from(".candidate-console").join("session.json")
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid value for API_BASE_URL: {}", e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API_BASE_URL must use http or https, got {}",
            parsed.scheme()
        )));
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
