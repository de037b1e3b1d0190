use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub default_per_page: usize,
    pub seed_users: bool,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1:5000".to_string(),
            default_per_page: 6,
            seed_users: true,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Config::default();

        let config = Self {
            server_address: env::var("SERVER_ADDRESS").unwrap_or(defaults.server_address),
            default_per_page: get_env_parse_or("DEFAULT_PER_PAGE", defaults.default_per_page)?,
            seed_users: get_env_parse_or("SEED_USERS", defaults.seed_users)?,
            log_format: get_env_parse_or("LOG_FORMAT", defaults.log_format)?,
        };

        if config.default_per_page == 0 {
            return Err(Error::Config(
                "Invalid value for DEFAULT_PER_PAGE: must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
