use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Kokoro inference sidecar
    pub kokoro_url: String,
    pub backend_timeout_secs: u64,
    pub preload_variants: Vec<String>,
    // Audio artifacts
    pub audio_dir: PathBuf,
    pub sample_rate: u32,
    pub artifact_ttl_secs: u32,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_setting("PORT", &env_or("PORT", "8000"))?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            kokoro_url: env_or("KOKORO_URL", "http://127.0.0.1:8880"),
            backend_timeout_secs: parse_setting(
                "BACKEND_TIMEOUT_SECS",
                &env_or("BACKEND_TIMEOUT_SECS", "120"),
            )?,
            preload_variants: parse_list(&env_or("PRELOAD_VARIANTS", "a")),
            audio_dir: env::var("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("kokoro-tts")),
            sample_rate: parse_setting("SAMPLE_RATE", &env_or("SAMPLE_RATE", "24000"))?,
            artifact_ttl_secs: parse_setting(
                "ARTIFACT_TTL_SECS",
                &env_or("ARTIFACT_TTL_SECS", "3600"),
            )?,
            sweep_interval_secs: parse_setting(
                "SWEEP_INTERVAL_SECS",
                &env_or("SWEEP_INTERVAL_SECS", "0"),
            )?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid value for {name}: {value:?}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse a numeric setting, naming the variable when it is out of range
fn parse_setting<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError {
        name,
        value: raw.to_string(),
    })
}

/// Split a comma separated env value, dropping blanks
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
