// src/system/app_info.rs

use std::env;
use std::path::Path;

use crate::config::AppManifest;
use crate::constants::FALLBACK_APP_NAME;

/// Información de la aplicación usada en la ayuda y en `--version`.
pub trait AppInfoProvider {
    /// Versión corta, derivada de los metadatos de compilación.
    fn short_version(&self) -> String;
    /// Versión larga; por defecto la corta.
    fn long_version(&self) -> String;
    /// Nombre de la aplicación; por defecto el del ejecutable.
    fn app_name(&self) -> String;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppInfo {
    short_version: String,
    long_version: Option<String>,
    app_name: Option<String>,
}

impl AppInfo {
    pub fn new(short_version: impl Into<String>) -> Self {
        Self {
            short_version: short_version.into(),
            ..Self::default()
        }
    }

    pub fn with_long_version(mut self, long_version: impl Into<String>) -> Self {
        self.long_version = Some(long_version.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Los valores presentes en el manifiesto tienen prioridad.
    pub fn apply_manifest(mut self, manifest: &AppManifest) -> Self {
        let app = &manifest.app;
        if let Some(version) = &app.version {
            self.short_version = version.clone();
        }
        if let Some(long_version) = &app.long_version {
            self.long_version = Some(long_version.clone());
        }
        if let Some(name) = &app.name {
            self.app_name = Some(name.clone());
        }
        self
    }
}

impl AppInfoProvider for AppInfo {
    fn short_version(&self) -> String {
        self.short_version.clone()
    }

    fn long_version(&self) -> String {
        self.long_version
            .clone()
            .unwrap_or_else(|| self.short_version())
    }

    fn app_name(&self) -> String {
        self.app_name.clone().unwrap_or_else(executable_name)
    }
}

/// Nombre del ejecutable en curso, sin extensión.
fn executable_name() -> String {
    env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_APP_NAME.to_string())
}

/// `AppInfo` con la versión del paquete que invoca la macro.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo::new(env!("CARGO_PKG_VERSION"))
    };
}
