use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::GenerationError;

pub const MENU_ASSET: &str = "menu.csv";
pub const FIRST_NAMES_ASSET: &str = "first_names.txt";
pub const LAST_NAMES_ASSET: &str = "last_names.txt";

/// Reads plain-data assets (menu table, name pools) from a directory.
#[derive(Debug, Clone)]
pub struct AssetsLoader {
    root: PathBuf,
}

impl Default for AssetsLoader {
    fn default() -> Self {
        Self::new(default_assets_dir())
    }
}

impl AssetsLoader {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Non-empty, trimmed lines of a text asset.
    pub fn load_lines(&self, relative: &str) -> Result<Vec<String>, GenerationError> {
        let path = self.path(relative);
        let contents = fs::read_to_string(&path).map_err(|err| {
            GenerationError::Asset(format!("failed to read asset {}: {}", path.display(), err))
        })?;

        Ok(contents
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect())
    }
}

/// Assets shipped with this crate.
pub fn default_assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}
