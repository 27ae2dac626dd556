// src/core/template.rs

use crate::constants::TEMPLATE_SEPARATOR;

/// Devuelve los alias de una plantilla (`-s|--server` -> `-s`, `--server`).
pub fn aliases(template: &str) -> impl Iterator<Item = &str> {
    template.split(TEMPLATE_SEPARATOR)
}

/// Indica si `token` es exactamente uno de los alias de `template`.
/// Sin coincidencias parciales ni plegado de mayúsculas.
pub fn matches(template: &str, token: &str) -> bool {
    aliases(template).any(|alias| alias == token)
}

/// Indica si algún token del flujo coincide con la plantilla.
pub fn matches_any(template: &str, tokens: &[String]) -> bool {
    tokens.iter().any(|token| matches(template, token))
}

/// Indica si dos plantillas comparten al menos un alias.
pub fn overlaps(left: &str, right: &str) -> bool {
    aliases(left).any(|alias| matches(right, alias))
}
