use crate::error::{AppError, AppResult};
use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ICS_DOMAIN: &str = "ayc.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// Manifest to load instead of the built-in club data.
    pub site_data: Option<PathBuf>,
    pub ics_domain: String,
    pub display_offset: FixedOffset,
    pub templates_dir: PathBuf,
    pub assets_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            site_data: None,
            ics_domain: DEFAULT_ICS_DOMAIN.to_string(),
            display_offset: utc(),
            templates_dir: PathBuf::from("templates"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| {
                AppError::Config(format!("PORT must be a port number, got '{port}'"))
            })?;
        }
        config.site_data = lookup("SITE_DATA")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        if let Some(domain) = lookup("ICS_DOMAIN").filter(|d| !d.trim().is_empty()) {
            config.ics_domain = domain.trim().to_string();
        }
        if let Some(minutes) = lookup("DISPLAY_UTC_OFFSET_MINUTES") {
            config.display_offset = parse_offset_minutes(&minutes)?;
        }
        if let Some(dir) = lookup("TEMPLATES_DIR") {
            config.templates_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_offset_minutes(raw: &str) -> AppResult<FixedOffset> {
    let minutes: i32 = raw.trim().parse().map_err(|_| {
        AppError::Config(format!("DISPLAY_UTC_OFFSET_MINUTES must be an integer, got '{raw}'"))
    })?;
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| AppError::Config(format!("UTC offset out of range: {minutes} minutes")))
}
