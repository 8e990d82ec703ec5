use crate::stats::DEFAULT_QUOTA_PERCENT;
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/wfh-data.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub office_quota_percent: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            office_quota_percent: DEFAULT_QUOTA_PERCENT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let office_quota_percent = match lookup("OFFICE_QUOTA_PERCENT") {
            None => defaults.office_quota_percent,
            Some(raw) => match raw.trim().parse::<u8>() {
                Ok(percent) if (1..=100).contains(&percent) => percent,
                _ => {
                    warn!("ignoring OFFICE_QUOTA_PERCENT={raw}, using {DEFAULT_QUOTA_PERCENT}");
                    DEFAULT_QUOTA_PERCENT
                }
            },
        };

        Self {
            port,
            data_path,
            office_quota_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/wfh-data.json"));
        assert_eq!(config.office_quota_percent, 60);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("APP_DATA_PATH", "/tmp/office.json"),
            ("OFFICE_QUOTA_PERCENT", "40"),
        ]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/office.json"));
        assert_eq!(config.office_quota_percent, 40);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[("PORT", "http"), ("OFFICE_QUOTA_PERCENT", "250")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.office_quota_percent, 60);
        assert_eq!(
            config_from(&[("OFFICE_QUOTA_PERCENT", "0")]).office_quota_percent,
            60
        );
    }
}
