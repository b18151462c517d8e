use anyhow::{Context, Result};
use std::env;

/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Chain id reported in Aptos ledger info
    pub chain_id: u16,
    /// Initia REST endpoint URL
    pub endpoint: String,
    /// Source chain id (logged and echoed, not validated)
    pub source_chain_id: String,
    /// Whether the response cache is enabled
    pub cache_enabled: bool,
    /// Cache TTL as a human duration string, e.g. "5 minutes"
    pub cache_duration: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Call dotenvy::dotenv() before calling this.
    pub fn from_env() -> Result<Self> {
        let port: u16 = env::var("BRIDGE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("BRIDGE_PORT must be a valid u16")?;

        let chain_id: u16 = env::var("BRIDGE_CHAIN_ID")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .context("BRIDGE_CHAIN_ID must be a valid u16")?;

        let endpoint = env::var("INITIA_ENDPOINT").unwrap_or_else(|_| {
            "https://archival-rest-echelon-1.anvil.asia-southeast.initia.xyz".to_string()
        });

        let source_chain_id =
            env::var("INITIA_CHAIN_ID").unwrap_or_else(|_| "echelon-1".to_string());

        let cache_enabled = env::var("CACHE_ENABLED")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let cache_duration =
            env::var("CACHE_DURATION").unwrap_or_else(|_| "5 minutes".to_string());

        Ok(Config {
            port,
            chain_id,
            endpoint,
            source_chain_id,
            cache_enabled,
            cache_duration,
        })
    }

    /// The configured cache TTL in milliseconds.
    pub fn cache_duration_ms(&self) -> u64 {
        parse_duration_ms(&self.cache_duration)
    }
}

/// Parse a human duration string ("5 minutes", "1 hour", "2 days") into
/// milliseconds. Unrecognized input parses to 0.
pub fn parse_duration_ms(duration: &str) -> u64 {
    let duration = duration.to_lowercase();
    let Some(amount) = duration
        .split_whitespace()
        .next()
        .and_then(|n| n.parse::<u64>().ok())
    else {
        return 0;
    };

    if duration.contains("minute") {
        amount * 60 * 1000
    } else if duration.contains("hour") {
        amount * 60 * 60 * 1000
    } else if duration.contains("day") {
        amount * 24 * 60 * 60 * 1000
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration_ms("5 minutes"), 5 * 60 * 1000);
        assert_eq!(parse_duration_ms("1 minute"), 60 * 1000);
    }

    #[test]
    fn test_parse_duration_hours_and_days() {
        assert_eq!(parse_duration_ms("1 hour"), 60 * 60 * 1000);
        assert_eq!(parse_duration_ms("2 Days"), 2 * 24 * 60 * 60 * 1000);
    }

    #[test]
    fn test_parse_duration_garbage_is_zero() {
        assert_eq!(parse_duration_ms("whenever"), 0);
        assert_eq!(parse_duration_ms("five minutes"), 0);
        assert_eq!(parse_duration_ms(""), 0);
        assert_eq!(parse_duration_ms("5 fortnights"), 0);
    }
}
