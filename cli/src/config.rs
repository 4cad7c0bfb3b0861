// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt::Display, path::PathBuf, str::FromStr};

use calfilter_ical::{FilterMode, Formatting, OutputFormat};
use serde::{Deserialize, Deserializer};
use tokio::fs;

use crate::cli::APP_NAME;

const CALFILTER_CONFIG_ENV: &str = "CALFILTER_CONFIG";

/// Load the configuration.
///
/// The file is taken from `path`, then `$CALFILTER_CONFIG`, then the user
/// configuration directory. Only a missing default file is tolerated.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(CALFILTER_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let Some(config) = get_config_dir().map(|dir| dir.join(format!("{APP_NAME}/config.toml")))
        else {
            tracing::debug!("no configuration directory, using defaults");
            return Ok(Config::default());
        };
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Defaults for the command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter mode
    #[serde(deserialize_with = "from_str_opt")]
    pub filter: Option<FilterMode>,

    /// Formatting of xCal and jCal output
    #[serde(deserialize_with = "from_str_opt")]
    pub format: Option<Formatting>,

    /// Output format
    #[serde(deserialize_with = "from_str_opt")]
    pub output: Option<OutputFormat>,

    /// Bytes read from the input at a time
    pub chunk_size: Option<usize>,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn from_str_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| s.parse().map_err(serde::de::Error::custom))
        .transpose()
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::OnceLock;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn parses_all_keys() {
        let config: Config = r#"
filter = "past"
format = "pretty"
output = "xcal"
chunk_size = 1024
"#
        .parse()
        .unwrap();

        assert_eq!(config.filter, Some(FilterMode::Past));
        assert_eq!(config.format, Some(Formatting::Pretty));
        assert_eq!(config.output, Some(OutputFormat::Xcal));
        assert_eq!(config.chunk_size, Some(1024));
    }

    #[test]
    fn missing_keys_stay_unset() {
        let config: Config = "filter = \"none\"".parse().unwrap();
        assert_eq!(config.filter, Some(FilterMode::None));
        assert_eq!(config.format, None);
        assert_eq!(config.output, None);
        assert_eq!(config.chunk_size, None);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = "filter = \"sometime\"".parse::<Config>().unwrap_err();
        assert!(err.to_string().contains("invalid filter 'sometime'"));
    }

    #[tokio::test]
    async fn cli_flag_overrides_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "filter = \"past\"\n").unwrap();

        let env_path = temp_dir.path().join("env_config.toml");
        fs::write(&env_path, "filter = \"future\"\n").unwrap();

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::set_var(CALFILTER_CONFIG_ENV, env_path.to_str().unwrap());
            }

            let config = parse_config(Some(config_path.clone())).await.unwrap();
            assert_eq!(config.filter, Some(FilterMode::Past));

            unsafe {
                std::env::remove_var(CALFILTER_CONFIG_ENV);
            }
        }
    }

    #[tokio::test]
    async fn env_var_overrides_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let env_path = temp_dir.path().join("env_config.toml");
        fs::write(&env_path, "output = \"jcal\"\n").unwrap();

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::set_var(CALFILTER_CONFIG_ENV, env_path.to_str().unwrap());
            }

            let config = parse_config(None).await.unwrap();
            assert_eq!(config.output, Some(OutputFormat::Jcal));

            unsafe {
                std::env::remove_var(CALFILTER_CONFIG_ENV);
            }
        }
    }

    #[tokio::test]
    async fn explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = parse_config(Some(path)).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
