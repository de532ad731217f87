//! Data directory and RON file loading.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::de::DeserializeOwned;

use super::error::ConfigError;

/// Root of the RON tuning files (`enemies/*.ron`, `player.ron`).
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DataDirectory(pub PathBuf);

impl Default for DataDirectory {
    fn default() -> Self {
        Self(PathBuf::from("assets/data"))
    }
}

impl DataDirectory {
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }
}

/// Parse a RON document. `origin` only names the source in errors.
pub fn parse_ron<T: DeserializeOwned>(origin: &str, contents: &str) -> Result<T, ConfigError> {
    ron::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: origin.to_string(),
        details: e.to_string(),
    })
}

/// Read and parse a RON file.
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    parse_ron(&path.display().to_string(), &contents)
}
