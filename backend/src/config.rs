//! Runtime configuration read from the environment (and `.env`, if present).

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::ArchiveScope;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:expense_tracker.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_ARCHIVE_INTERVAL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub archive_interval: Duration,
    pub archive_scope: ArchiveScope,
    pub cors_origin: String,
}

impl AppConfig {
    /// Load from process environment after applying `.env`
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(anyhow!("failed to read .env: {e}"));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 127.0.0.1:3000")?;

        let interval_secs = match lookup("ARCHIVE_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("ARCHIVE_INTERVAL_SECS must be a whole number of seconds")?,
            None => DEFAULT_ARCHIVE_INTERVAL_SECS,
        };
        if interval_secs == 0 {
            return Err(anyhow!("ARCHIVE_INTERVAL_SECS must be greater than zero"));
        }

        let summarize_fund_only = match lookup("ARCHIVE_SUMMARIZE_FUND_ONLY") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| anyhow!("ARCHIVE_SUMMARIZE_FUND_ONLY must be true or false, got {raw:?}"))?,
            None => true,
        };

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Self {
            database_url,
            bind_addr,
            archive_interval: Duration::from_secs(interval_secs),
            archive_scope: ArchiveScope::from_summarize_fund_only(summarize_fund_only),
            cors_origin,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
