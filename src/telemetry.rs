//! Inicialización del logging.
//!
//! Las librerías emiten con la fachada `log`; aquí se instala un subscriber
//! de `tracing-subscriber` cuyo puente `tracing-log` recoge esos registros.
//! El filtro se toma de `RUST_LOG` (por defecto `info`).
use tracing_subscriber::EnvFilter;

use crate::errors::CoreError;

const DEFAULT_FILTER: &str = "info";

pub fn init_logging() -> Result<(), CoreError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| CoreError::Internal(format!("no se pudo inicializar el logging: {e}")))
}
