//! Configuración de runtime desde variables de entorno.
//! Usa convención `INTERACTOR_*` y carga `.env` una sola vez si existe.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración global (evaluada una vez, ver `CONFIG`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Registrar eventos de ejecución en el journal del contexto
    /// (`INTERACTOR_JOURNAL`, por defecto `true`).
    pub journal: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { journal: true }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        Self { journal: env_flag("INTERACTOR_JOURNAL").unwrap_or(defaults.journal) }
    }
}

/// Instancia global perezosa de configuración.
pub static CONFIG: Lazy<RuntimeConfig> = Lazy::new(RuntimeConfig::from_env);

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| parse_flag(&v))
}

/// Interpreta valores booleanos habituales (`1/0`, `true/false`, `yes/no`, `on/off`).
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("No"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn journal_is_enabled_by_default() {
        assert!(RuntimeConfig::default().journal);
    }
}
