use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "installer-version";
const DEFAULTS: &str = include_str!("../../config/default.toml");

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub installer: InstallerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct InstallerConfig {
    /// Location of the installer's `InstallInfo.plist`.
    pub info_plist: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `installer_version=debug`.
    pub filter: String,
    pub file_name: String,
    /// Rotated log files kept before the oldest is deleted.
    pub max_log_files: usize,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let user_path = project_dirs().map(|d| d.config_dir().join("config.toml"));
        Self::load_from(user_path.as_deref())
    }

    /// Same as [`AppConfig::load`], with the user config file given explicitly.
    ///
    /// The user file may be partial: its tables are merged over the defaults
    /// key by key.
    pub fn load_from(user_path: Option<&Path>) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(DEFAULTS)?;

        if let Some(path) = user_path.filter(|p| p.exists()) {
            let user_str = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let user_table: toml::Table = toml::from_str(&user_str)
                .with_context(|| format!("invalid config {}", path.display()))?;
            tracing::debug!("merging user config from {}", path.display());
            merge_tables(&mut table, user_table);
        }

        let mut config = AppConfig::deserialize(toml::Value::Table(table))
            .context("config does not match the expected layout")?;

        // Expand ~ in info_plist
        if config.installer.info_plist.starts_with('~') {
            let home = dirs_home().ok_or_else(|| anyhow!("cannot determine home directory"))?;
            config.installer.info_plist =
                config
                    .installer
                    .info_plist
                    .replacen('~', &home.to_string_lossy(), 1);
        }

        Ok(config)
    }

    pub fn info_plist_path(&self) -> PathBuf {
        PathBuf::from(&self.installer.info_plist)
    }

    /// Directory the rolling log file is written to.
    pub fn log_dir(&self) -> Option<PathBuf> {
        project_dirs().map(|d| d.data_dir().to_path_buf())
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
