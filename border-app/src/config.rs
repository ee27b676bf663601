//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;
use border_hex::AggregationSettings;
use border_types::FailurePolicy;
use border_upstream::UpstreamConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIRECTORY_URL: &str = "https://restcountries.eu/rest/v2";
const DEFAULT_RATES_URL: &str = "https://api.exchangeratesapi.io";
const DEFAULT_CONCURRENCY: usize = 4;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream: UpstreamConfig,
    pub aggregation: AggregationSettings,
    pub log_format: LogFormat,
    /// OTLP collector; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        let concurrency = match lookup("BORDER_CONCURRENCY") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| {
                    anyhow::anyhow!("BORDER_CONCURRENCY must be a positive integer, got '{}'", raw)
                })?,
            None => DEFAULT_CONCURRENCY,
        };

        let failure_policy = match lookup("BORDER_FAILURE_POLICY") {
            Some(raw) => raw.parse::<FailurePolicy>().map_err(anyhow::Error::msg)?,
            None => FailurePolicy::default(),
        };

        let timeout = lookup("UPSTREAM_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).with_context(|| {
                    format!("UPSTREAM_TIMEOUT_SECS must be a number of seconds, got '{}'", raw)
                })
            })
            .transpose()?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            port,
            upstream: UpstreamConfig {
                directory_base_url: lookup("DIRECTORY_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_DIRECTORY_URL.to_string()),
                rates_base_url: lookup("RATES_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_RATES_URL.to_string()),
                timeout,
            },
            aggregation: AggregationSettings {
                concurrency,
                failure_policy,
            },
            log_format,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream.directory_base_url, DEFAULT_DIRECTORY_URL);
        assert_eq!(config.upstream.rates_base_url, DEFAULT_RATES_URL);
        assert_eq!(config.upstream.timeout, None);
        assert_eq!(config.aggregation, AggregationSettings::default());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("DIRECTORY_BASE_URL", "http://localhost:7001/rest/v2"),
            ("BORDER_CONCURRENCY", "8"),
            ("BORDER_FAILURE_POLICY", "fail-fast"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
            ("LOG_FORMAT", "json"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(
            config.upstream.directory_base_url,
            "http://localhost:7001/rest/v2"
        );
        assert_eq!(config.aggregation.concurrency, 8);
        assert_eq!(config.aggregation.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.upstream.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let err = load(&[("BORDER_CONCURRENCY", "0")]).unwrap_err();
        assert!(err.to_string().contains("BORDER_CONCURRENCY"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("BORDER_FAILURE_POLICY", "retry")]).is_err());
        assert!(load(&[("UPSTREAM_TIMEOUT_SECS", "soon")]).is_err());
    }
}
