//! Configuration for the service adapter and the monitor.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which systemd instance to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The system manager (`systemctl ...`).
    #[default]
    System,
    /// The calling user's manager (`systemctl --user ...`).
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scope: Scope,

    /// Program used to reach systemd
    pub systemctl: String,

    /// Interval between automatic refreshes of the monitor (in seconds)
    pub refresh_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scope: Scope::System,
            systemctl: "systemctl".to_string(),
            refresh_interval_secs: 2,
        }
    }
}

impl Config {
    /// Loads `path` if given, otherwise the default location if it exists,
    /// otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

/// `$XDG_CONFIG_HOME/systemd-services/config.toml`, falling back to `~/.config`.
pub fn default_path() -> Option<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("systemd-services").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.scope, Scope::System);
        assert_eq!(config.systemctl, "systemctl");
        assert_eq!(config.refresh_interval(), Duration::from_secs(2));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("scope = \"user\"\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.scope, Scope::User);
        assert_eq!(config.systemctl, "systemctl");
        assert_eq!(config.refresh_interval_secs, 2);
    }

    #[test]
    fn full_file() {
        let file = write_config(
            "scope = \"system\"\nsystemctl = \"/usr/bin/systemctl\"\nrefresh_interval_secs = 10\n",
        );
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.systemctl, "/usr/bin/systemctl");
        assert_eq!(config.refresh_interval(), Duration::from_secs(10));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = Config {
            refresh_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let file = write_config("scope = \"galaxy\"\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    // The only test that touches XDG_CONFIG_HOME; the others pass explicit paths.
    #[test]
    fn load_without_path_reads_xdg_config_home() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("systemd-services");
        std::fs::create_dir(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), "refresh_interval_secs = 7\n").unwrap();

        unsafe { env::set_var("XDG_CONFIG_HOME", dir.path()) };
        let path = default_path();
        let config = Config::load(None);
        unsafe { env::remove_var("XDG_CONFIG_HOME") };

        assert_eq!(path, Some(app_dir.join("config.toml")));
        assert_eq!(config.unwrap().refresh_interval_secs, 7);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
