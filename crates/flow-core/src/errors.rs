//! Errores del motor de flujos.
//!
//! Los errores aquí representan fallos de integración (uso incorrecto del
//! motor, configuración de steps, listeners o persistencia). Los resultados
//! esperados de una transición (formulario inválido, veto de un listener) no
//! son errores: viajan como flags de `Status`.

use thiserror::Error;

use crate::step::StepNumber;

/// Uso incorrecto del `Transitioner`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TransitionError {
    #[error("unable to transition flow \"{flow}\": there is no transition request")]
    NoTransitionRequest { flow: String },
    #[error("flow \"{flow}\" is on the last step and can not transition forwards")]
    OnLastStep { flow: String },
    #[error("flow \"{flow}\" is on the first step and can not transition backwards")]
    OnFirstStep { flow: String },
    #[error("flow \"{flow}\" must be on the last step in order to be completed")]
    NotOnLastStep { flow: String },
    #[error("\"{requested}\" is an invalid requested step number for flow \"{flow}\" in the current context")]
    InvalidRequestedStep { flow: String, requested: StepNumber },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StepCollectionError {
    #[error("step {0} not found")]
    NotFound(StepNumber),
    #[error("step collection is empty")]
    Empty,
    #[error("step numbers must be contiguous starting at 1: expected {expected}, found {found}")]
    NonContiguous { expected: StepNumber, found: StepNumber },
}

/// Error devuelto por un listener; aborta la transición en curso.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("listener failed: {0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("context serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("context storage unavailable: {0}")]
    Unavailable(String),
}

/// Error agregado de cualquier operación del motor.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Steps(#[from] StepCollectionError),
    #[error(transparent)]
    Listener(#[from] ListenerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
