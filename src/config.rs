// src/config.rs

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Error de Ficheros en '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error al parsear TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Manifiesto opcional de la aplicación:
///
/// ```toml
/// [app]
/// name = "pizza"
/// version = "0.1.0"
/// long_version = "0.1.0 (pizzeria edition)"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppManifest {
    #[serde(default)]
    pub app: AppSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    pub name: Option<String>,
    pub version: Option<String>,
    pub long_version: Option<String>,
}

impl AppManifest {
    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }
}

/// Carga el manifiesto desde `path`.
pub fn load_manifest(path: &Path) -> Result<AppManifest, ManifestError> {
    log::debug!("Cargando manifiesto desde {:?}", path);
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    AppManifest::from_toml_str(&content)
}
