use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use hwbot_rust_core::clients::practicum;

#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,

    pub endpoint: String,
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let practicum_token =
            env::var("PRACTICUM_TOKEN").context("PRACTICUM_TOKEN must be set")?;
        let telegram_token = env::var("TELEGRAM_TOKEN").context("TELEGRAM_TOKEN must be set")?;
        let telegram_chat_id =
            env::var("TELEGRAM_CHAT_ID").context("TELEGRAM_CHAT_ID must be set")?;

        let endpoint = env::var("HOMEWORK_API_ENDPOINT")
            .unwrap_or_else(|_| practicum::DEFAULT_ENDPOINT.to_string());

        let poll_interval_secs =
            parse_u64_env("POLL_INTERVAL_SECS", 600).context("POLL_INTERVAL_SECS")?;

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse::<u64>()
        .with_context(|| format!("Invalid {key}: {raw} (expected integer seconds)"))
}
