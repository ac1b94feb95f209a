use std::str::FromStr;

use axum::http::HeaderValue;

use pdm_core::prediction::{MedianThreshold, DEFAULT_HIGH_RISK_PROBABILITY, DEFAULT_RISK_THRESHOLD};

/// Errors raised while reading [`ServerConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("HIGH_RISK_PROBABILITY must be within [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Database pool size (default: `20`).
    pub db_max_connections: u32,
    /// Median above which a prediction is high risk (default: `70.0`).
    pub risk_threshold: f64,
    /// Probability recorded above the threshold (default: `0.8`).
    pub high_risk_probability: f64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                              |
    /// |-------------------------|------------------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                            |
    /// | `PORT`                  | `8080`                                               |
    /// | `CORS_ORIGINS`          | `http://localhost:3000,http://localhost:3001,http://localhost:3002` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                                 |
    /// | `DB_MAX_CONNECTIONS`    | `20`                                                 |
    /// | `RISK_THRESHOLD`        | `70.0`                                               |
    /// | `HIGH_RISK_PROBABILITY` | `0.8`                                                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 8080_u16, "a valid u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| {
                "http://localhost:3000,http://localhost:3001,http://localhost:3002".into()
            })
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|origin| origin.parse::<HeaderValue>().is_err())
        {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                expected: "comma-separated header-safe origins",
                value: bad.clone(),
            });
        }

        let request_timeout_secs =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30_u64, "a valid u64")?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 20_u32, "a valid u32")?;

        let risk_threshold = parse_or(
            &lookup,
            "RISK_THRESHOLD",
            DEFAULT_RISK_THRESHOLD,
            "a finite number",
        )?;
        if !risk_threshold.is_finite() {
            return Err(ConfigError::Invalid {
                var: "RISK_THRESHOLD",
                expected: "a finite number",
                value: risk_threshold.to_string(),
            });
        }

        let high_risk_probability = parse_or(
            &lookup,
            "HIGH_RISK_PROBABILITY",
            DEFAULT_HIGH_RISK_PROBABILITY,
            "a number",
        )?;
        if !(0.0..=1.0).contains(&high_risk_probability) {
            return Err(ConfigError::ProbabilityOutOfRange(high_risk_probability));
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            risk_threshold,
            high_risk_probability,
        })
    }

    /// The risk strategy described by this configuration.
    pub fn risk_strategy(&self) -> MedianThreshold {
        MedianThreshold::new(self.risk_threshold, self.high_risk_probability)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_reproduce_fixed_rule() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.cors_origins.len(), 3);
        assert_eq!(config.risk_strategy(), MedianThreshold::default());
    }

    #[test]
    fn cors_origins_are_trimmed_and_blank_entries_dropped() {
        let config = config_from(&[("CORS_ORIGINS", " http://a.test , ,http://b.test")]).unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("RISK_THRESHOLD", "55.5"),
            ("HIGH_RISK_PROBABILITY", "0.65"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.risk_strategy(), MedianThreshold::new(55.5, 0.65));
    }

    #[test]
    fn origin_with_control_characters_is_rejected() {
        assert_matches!(
            config_from(&[("CORS_ORIGINS", "http://ok.test,http://bad\u{7}.test")]),
            Err(ConfigError::Invalid { var: "CORS_ORIGINS", .. })
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
    }

    #[test]
    fn probability_outside_unit_interval_is_rejected() {
        assert_matches!(
            config_from(&[("HIGH_RISK_PROBABILITY", "1.2")]),
            Err(ConfigError::ProbabilityOutOfRange(_))
        );
    }

    #[test]
    fn non_finite_threshold_is_rejected() {
        assert_matches!(
            config_from(&[("RISK_THRESHOLD", "NaN")]),
            Err(ConfigError::Invalid { var: "RISK_THRESHOLD", .. })
        );
    }
}
