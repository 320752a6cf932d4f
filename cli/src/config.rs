//! Configuration loaded from environment variables (and `.env`, if present).

use std::env;

use anyhow::{bail, Context};
use posts_core::views::user_list::DEFAULT_PAGE_SIZE;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the users/posts REST API
    pub api_base_url: String,
    /// Users per page in the user table
    pub page_size: u32,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_base_url = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let page_size = match lookup("PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid PAGE_SIZE {raw:?}"))?,
            None => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            bail!("PAGE_SIZE must be at least 1");
        }

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            api_base_url,
            page_size,
            log_level,
        })
    }
}
