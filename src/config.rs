use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::calendar::LeapRule;
use crate::error::{Error, Result};

const CONFIG_PATH_ENV_VAR: &str = "DATEPICK_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Some(path) = env::var(CONFIG_PATH_ENV_VAR).ok().filter(|path| !path.is_empty()) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = config_dir(env::var("XDG_CONFIG_HOME").ok()) {
        locations.push(dir.join("datepick").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".datepick.toml"));
    }

    locations
}

/// An empty `XDG_CONFIG_HOME` counts as unset.
fn config_dir(xdg_config_home: Option<String>) -> Option<PathBuf> {
    xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

/// Loads the config at `path`, or the first existing default location.
///
/// Without an explicit path and without any config file present the
/// defaults are used.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => Config::from_file(&location),
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub today_char: Option<char>,
    pub selected_char: Option<char>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            today_char: Some('*'),
            selected_char: None,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub tick_rate: Duration,
    pub leap_rule: LeapRule,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate: Duration::from_millis(500),
            leap_rule: LeapRule::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        log::info!("Loading config from '{}'", path.display());

        let content = fs::read_to_string(path)?;
        Config::from_str(&content).map_err(|err| {
            let msg = format!(
                "{} (in '{}')",
                err.message.as_deref().unwrap_or_default(),
                path.display()
            );
            err.with_msg(&msg)
        })
    }
}

impl FromStr for Config {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_rate, Duration::from_millis(500));
        assert_eq!(config.leap_rule, LeapRule::Quadrennial);
        assert_eq!(config.theme.today_char, Some('*'));
    }

    #[test]
    fn full_config() {
        let config = Config::from_str(
            r#"
            tick_rate = 1000
            leap_rule = "gregorian"

            [theme]
            today_char = "+"
            selected_char = ">"
            "#,
        )
        .unwrap();

        assert_eq!(config.tick_rate, Duration::from_secs(1));
        assert_eq!(config.leap_rule, LeapRule::Gregorian);
        assert_eq!(config.theme.today_char, Some('+'));
        assert_eq!(config.theme.selected_char, Some('>'));
    }

    #[test]
    fn partial_theme_keeps_other_defaults() {
        let config = Config::from_str("[theme]\nselected_char = \"#\"").unwrap();
        assert_eq!(config.theme.today_char, Some('*'));
        assert_eq!(config.theme.selected_char, Some('#'));
    }

    #[test]
    fn unknown_leap_rule_is_rejected() {
        let err = Config::from_str("leap_rule = \"lunar\"").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn load_from_explicit_file() {
        let path = env::temp_dir().join(format!("datepick-config-{}.toml", std::process::id()));
        fs::write(&path, "leap_rule = \"gregorian\"\n").unwrap();

        let config = load_suitable_config(Some(&path));
        fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().leap_rule, LeapRule::Gregorian);
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let path = env::temp_dir().join("datepick-config-does-not-exist.toml");
        let err = load_suitable_config(Some(&path)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }

    #[test]
    fn default_locations_end_with_home_config() {
        let locations = find_configfile_locations();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(locations.last(), Some(&home.join(".datepick.toml")));
        }
    }

    #[test]
    fn xdg_config_home_takes_precedence() {
        assert_eq!(
            config_dir(Some("/tmp/xdg".to_owned())),
            Some(PathBuf::from("/tmp/xdg"))
        );
    }

    #[test]
    fn empty_xdg_config_home_is_ignored() {
        assert_eq!(config_dir(Some(String::new())), dirs::config_dir());
        assert_eq!(config_dir(None), dirs::config_dir());
    }
}
