// src/constants.rs

/// Plantilla por defecto de la opción de ayuda.
pub const DEFAULT_HELP_TEMPLATE: &str = "-h|--help";

/// Plantilla por defecto de la opción de versión (solo en el comando raíz).
pub const DEFAULT_VERSION_TEMPLATE: &str = "-v|--version";

/// Separador entre los alias de una plantilla de opción (`-s|--server`).
pub const TEMPLATE_SEPARATOR: char = '|';

/// Descripción de la opción de ayuda implícita.
pub const HELP_OPTION_DESCRIPTION: &str = "Show help information";

/// Descripción de la opción de versión implícita.
pub const VERSION_OPTION_DESCRIPTION: &str = "Show version information";

/// Marca añadida a la descripción de los argumentos obligatorios.
pub const REQUIRED_MARKER: &str = "[required]";

/// Sangría de cada fila en las tablas de ayuda.
pub const TABLE_INDENT: &str = "  ";

/// Espacios entre la clave más larga y su descripción.
pub const TABLE_PADDING: usize = 2;

/// Nombre de aplicación usado cuando no se puede averiguar el del ejecutable.
pub const FALLBACK_APP_NAME: &str = "app";

/// Código de salida para errores de enlace, validación o configuración.
pub const FAILURE_STATUS: i32 = 1;

/// Código de salida al mostrar ayuda o versión.
pub const SUCCESS_STATUS: i32 = 0;
