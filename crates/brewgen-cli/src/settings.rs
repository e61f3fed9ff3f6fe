use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use brewgen_generate::model::DEFAULT_SEED;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "brewgen.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("settings file {0} already exists")]
    AlreadyExists(PathBuf),
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Menu CSV; defaults to the menu in the assets directory.
    pub menu: Option<PathBuf>,
    /// Directory holding name pools (and the default menu).
    pub assets_dir: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub seed: u64,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            menu: None,
            assets_dir: None,
            out_dir: PathBuf::from("out"),
            seed: DEFAULT_SEED,
            log_json: false,
        }
    }
}

/// Load an explicit settings file, else `brewgen.toml` if present, else defaults.
pub fn load_settings(path: Option<&Path>) -> SettingsResult<Settings> {
    match path {
        Some(path) => read_settings(path),
        None => {
            let fallback = Path::new(DEFAULT_SETTINGS_FILE);
            if fallback.exists() {
                read_settings(fallback)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

pub fn read_settings(path: &Path) -> SettingsResult<Settings> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Write settings through a temp file so readers never see a partial file.
pub fn save_settings(path: &Path, settings: &Settings, overwrite: bool) -> SettingsResult<()> {
    if path.exists() && !overwrite {
        return Err(SettingsError::AlreadyExists(path.to_path_buf()));
    }

    let encoded = toml::to_string_pretty(settings)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(encoded.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let settings: Settings = toml::from_str("seed = 9\n").expect("parse settings");
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.out_dir, PathBuf::from("out"));
        assert!(settings.menu.is_none());
        assert!(!settings.log_json);
    }

    #[test]
    fn save_then_read_keeps_values() {
        let mut dir = std::env::temp_dir();
        dir.push(format!("brewgen_settings_{}", uuid::Uuid::new_v4()));
        let path = dir.join("brewgen.toml");

        let settings = Settings {
            menu: Some(PathBuf::from("data/menu.csv")),
            seed: 77,
            log_json: true,
            ..Settings::default()
        };
        save_settings(&path, &settings, false).expect("save settings");
        assert_eq!(read_settings(&path).expect("read settings"), settings);

        let again = save_settings(&path, &settings, false);
        assert!(matches!(again, Err(SettingsError::AlreadyExists(_))));
        save_settings(&path, &Settings::default(), true).expect("overwrite settings");
        assert_eq!(read_settings(&path).expect("read settings").seed, DEFAULT_SEED);
    }
}
