use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub log_format: LogFormat,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let log_format = match env::var("LOG_FORMAT") {
            Ok(raw) => match LogFormat::from_str(&raw) {
                Some(format) => format,
                None => bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", raw),
            },
            Err(_) => LogFormat::Pretty,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            log_format,
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string()),
        })
    }
}
