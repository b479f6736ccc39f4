use std::time::Duration;
use thiserror::Error;

const DEFAULT_PAYSTACK_BASE_URL: &str = "https://api.paystack.co";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_CHECKOUT_TIMEOUT_SECS: u64 = 900;
const DEFAULT_DONOR_EMAIL: &str = "donor@example.com";
const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{name} must be a positive whole number of seconds, got '{value}'")]
    InvalidDuration { name: &'static str, value: String },
}

/// Paystack credentials and checkout polling behaviour
#[derive(Debug, Clone)]
pub struct PaystackConfig {
    pub secret_key: String,
    pub base_url: String,
    pub poll_interval: Duration,
    pub checkout_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub paystack: PaystackConfig,
    /// Used when the donor does not give an email with `$donate`
    pub donor_email: String,
    pub asset_base_url: Option<String>,
    /// Page sessions unused for this long are dropped
    pub session_idle_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment (after `.env` is applied)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let seconds = |name: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match lookup(name) {
                None => Ok(Duration::from_secs(default)),
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                    _ => Err(ConfigError::InvalidDuration { name, value: raw }),
                },
            }
        };

        let paystack = PaystackConfig {
            secret_key: required("PAYSTACK_SECRET_KEY")?,
            base_url: lookup("PAYSTACK_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_PAYSTACK_BASE_URL.to_string()),
            poll_interval: seconds("PAYSTACK_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?,
            checkout_timeout: seconds("PAYSTACK_CHECKOUT_TIMEOUT_SECS", DEFAULT_CHECKOUT_TIMEOUT_SECS)?,
        };

        Ok(Config {
            discord_token: required("DISCORD_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            paystack,
            donor_email: lookup("DONOR_EMAIL").unwrap_or_else(|| DEFAULT_DONOR_EMAIL.to_string()),
            asset_base_url: lookup("ASSET_BASE_URL").map(|url| url.trim_end_matches('/').to_string()),
            session_idle_timeout: seconds("SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn base() -> HashMap<String, String> {
        env(&[
            ("DISCORD_TOKEN", "token"),
            ("DATABASE_URL", "mysql://localhost/sponsorship"),
            ("PAYSTACK_SECRET_KEY", "sk_test_123"),
        ])
    }

    #[test]
    fn test_defaults_applied() {
        let vars = base();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.paystack.base_url, "https://api.paystack.co");
        assert_eq!(config.paystack.poll_interval, Duration::from_secs(5));
        assert_eq!(config.paystack.checkout_timeout, Duration::from_secs(900));
        assert_eq!(config.donor_email, "donor@example.com");
        assert!(config.asset_base_url.is_none());
        assert_eq!(config.session_idle_timeout, Duration::from_secs(1800));
    }

    #[test]
    fn test_missing_secret_key() {
        let mut vars = base();
        vars.remove("PAYSTACK_SECRET_KEY");
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::Missing("PAYSTACK_SECRET_KEY"));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut vars = base();
        vars.insert("PAYSTACK_POLL_INTERVAL_SECS".to_string(), "0".to_string());
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration { name: "PAYSTACK_POLL_INTERVAL_SECS", .. }));
    }

    #[test]
    fn test_trailing_slashes_trimmed() {
        let mut vars = base();
        vars.insert("PAYSTACK_BASE_URL".to_string(), "http://localhost:9000/".to_string());
        vars.insert("ASSET_BASE_URL".to_string(), "https://cdn.example.org/assets/".to_string());
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.paystack.base_url, "http://localhost:9000");
        assert_eq!(config.asset_base_url.as_deref(), Some("https://cdn.example.org/assets"));
    }
}
