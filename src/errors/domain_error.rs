use flow_core::{FlowError, StepCollectionError};
use thiserror::Error;

/// Errores del dominio de la aplicación
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entidad no encontrada: {0}")]
    NotFound(String),
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Error genérico de dominio: {0}")]
    Generic(String),
}

/// Traduce los errores del motor a la vista de dominio: uso incorrecto de
/// una transición es una validación fallida, un step inexistente es
/// `NotFound` y el resto (listeners, persistencia) queda como genérico.
impl From<FlowError> for DomainError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Transition(e) => DomainError::Validation(e.to_string()),
            FlowError::Steps(StepCollectionError::NotFound(n)) => DomainError::NotFound(format!("step {n}")),
            other => DomainError::Generic(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use flow_core::{ListenerError, TransitionError};

    use super::*;

    #[test]
    fn test_not_found_variant_format() {
        let err = DomainError::NotFound("RecursoX".into());
        assert_eq!(err.to_string(), "Entidad no encontrada: RecursoX");
    }

    #[test]
    fn test_validation_variant_format() {
        let err = DomainError::Validation("inválido".into());
        assert_eq!(err.to_string(), "Validación fallida: inválido");
    }

    #[test]
    fn test_generic_variant_format() {
        let err = DomainError::Generic("error genérico".into());
        assert_eq!(err.to_string(), "Error genérico de dominio: error genérico");
    }

    #[test]
    fn test_from_flow_error() {
        let err = DomainError::from(FlowError::from(TransitionError::OnFirstStep { flow: "signup".into() }));
        assert!(matches!(err, DomainError::Validation(_)));

        let err = DomainError::from(FlowError::from(StepCollectionError::NotFound(7)));
        assert_eq!(err.to_string(), "Entidad no encontrada: step 7");

        let err = DomainError::from(FlowError::from(ListenerError::new("boom")));
        assert_eq!(err.to_string(), "Error genérico de dominio: listener failed: boom");
    }
}
