//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! Los valores mal formados caen a los valores por defecto (con aviso); la
//! variante estricta `try_from_env` los reporta como `CoreError::Config`.
use std::env;

use dotenvy::dotenv;
use flow_core::constants::DEFAULT_TRANSITION_KEY;
use flow_core::TransitionerOptions;
use log::warn;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::errors::CoreError;

pub const TRANSITION_KEY_VAR: &str = "FORMFLOW_TRANSITION_KEY";
pub const ROLLBACK_VAR: &str = "FORMFLOW_ROLLBACK_ON_FAILURE";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Parámetros por defecto de los flujos y del motor.
    pub flow: FlowConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowConfig {
    /// Campo de la request que transporta la transición.
    pub transition_key: String,
    /// Restaurar el contexto si falla el evento posterior o el guardado.
    pub rollback_on_failure: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self { transition_key: DEFAULT_TRANSITION_KEY.to_string(),
               rollback_on_failure: false }
    }
}

impl AppConfig {
    /// Lee el entorno (tras cargar `.env`) con caída a valores por defecto.
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Igual que `from_env` pero falla ante valores mal formados.
    pub fn try_from_env() -> Result<Self, CoreError> {
        Lazy::force(&DOTENV_LOADED);
        Self::try_from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let defaults = FlowConfig::default();
        let transition_key = match parse_transition_key(lookup(TRANSITION_KEY_VAR)) {
            Ok(key) => key,
            Err(err) => {
                warn!("{err}; using default {:?}", defaults.transition_key);
                defaults.transition_key
            }
        };
        let rollback_on_failure = match parse_flag(ROLLBACK_VAR, lookup(ROLLBACK_VAR)) {
            Ok(flag) => flag,
            Err(err) => {
                warn!("{err}; using default {}", defaults.rollback_on_failure);
                defaults.rollback_on_failure
            }
        };
        Self { flow: FlowConfig { transition_key,
                                  rollback_on_failure } }
    }

    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        Ok(Self { flow: FlowConfig { transition_key: parse_transition_key(lookup(TRANSITION_KEY_VAR))?,
                                     rollback_on_failure: parse_flag(ROLLBACK_VAR, lookup(ROLLBACK_VAR))? } })
    }

    pub fn transitioner_options(&self) -> TransitionerOptions {
        TransitionerOptions::default().with_rollback(self.flow.rollback_on_failure)
    }
}

fn parse_transition_key(raw: Option<String>) -> Result<String, CoreError> {
    match raw {
        None => Ok(DEFAULT_TRANSITION_KEY.to_string()),
        Some(value) if value.trim().is_empty() => {
            Err(CoreError::Config(format!("{TRANSITION_KEY_VAR} is empty")))
        }
        Some(value) => Ok(value.trim().to_string()),
    }
}

fn parse_flag(name: &str, raw: Option<String>) -> Result<bool, CoreError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(CoreError::Config(format!("{name}: {other:?} is not a boolean"))),
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.flow.transition_key, "flow_transition");
        assert!(!cfg.transitioner_options().rollback_on_failure);
    }

    #[test]
    fn reads_both_keys() {
        let cfg = AppConfig::from_lookup(lookup(&[(TRANSITION_KEY_VAR, " _step "), (ROLLBACK_VAR, "Yes")]));
        assert_eq!(cfg.flow.transition_key, "_step");
        assert!(cfg.flow.rollback_on_failure);
        assert!(cfg.transitioner_options().rollback_on_failure);
    }

    #[test]
    fn malformed_values_fall_back() {
        let cfg = AppConfig::from_lookup(lookup(&[(TRANSITION_KEY_VAR, "  "), (ROLLBACK_VAR, "maybe")]));
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn strict_lookup_reports_malformed_values() {
        let err = AppConfig::try_from_lookup(lookup(&[(ROLLBACK_VAR, "maybe")])).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(err.to_string().contains(ROLLBACK_VAR));

        let err = AppConfig::try_from_lookup(lookup(&[(TRANSITION_KEY_VAR, "")])).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn global_config_reflects_the_environment() {
        assert_eq!(*CONFIG, AppConfig::from_env());
        // La variante estricta coincide cuando el entorno está bien formado.
        if let Ok(strict) = AppConfig::try_from_env() {
            assert_eq!(strict, *CONFIG);
        }
    }
}
