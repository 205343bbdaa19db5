use flow_core::FlowError;
use thiserror::Error;

use super::domain_error::DomainError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error del flujo: {0}")]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use flow_core::{StorageError, TransitionError};

    use super::*;

    #[test]
    fn test_internal_variant_format() {
        let err = CoreError::Internal("algo malo".into());
        assert_eq!(err.to_string(), "Error interno: algo malo");
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: CoreError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_config_variant_format() {
        let err = CoreError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
    }

    #[test]
    fn test_flow_variant_from() {
        let flow_err: FlowError = StorageError::Unavailable("sesión".into()).into();
        let err: CoreError = flow_err.into();
        assert!(matches!(err, CoreError::Flow(FlowError::Storage(_))));
        assert!(err.to_string().starts_with("Error del flujo: "));
    }

    #[test]
    fn test_domain_variant_is_transparent() {
        let flow_err: FlowError = TransitionError::OnLastStep { flow: "signup".into() }.into();
        let err: CoreError = DomainError::from(flow_err).into();
        assert!(err.to_string().starts_with("Validación fallida: "));
    }
}
