//! Contratos que el motor consume de un flujo y una implementación lista
//! para usar.
//!
//! - `FormFlow`: el agregado que el `Transitioner` recibe por referencia en
//!   cada llamada (steps, contexto, formulario actual, persistencia).
//! - `StepForm`: el formulario que enlaza la entrada de un step.
//! - `Flow` / `FlowBuilder`: implementación concreta respaldada por un
//!   `ContextStorage`.

mod builder;
mod form;
mod instance;

pub use builder::FlowBuilder;
pub use form::{FieldForm, FormData};
pub use instance::Flow;

use crate::context::FlowContext;
use crate::errors::{FlowError, StepCollectionError};
use crate::request::RequestInput;
use crate::step::{Step, StepCollection, StepNumber};

/// Formulario de un step.
pub trait StepForm {
    fn is_submitted(&self) -> bool;

    /// Sólo tiene sentido tras un envío.
    fn is_valid(&self) -> bool;

    /// Enlaza la request entrante. El motor sólo lo llama si el formulario
    /// aún no fue enviado.
    fn handle_request(&mut self, request: &RequestInput);

    /// Datos enviados, visibles para los listeners de la transición.
    fn data(&self) -> Option<&FormData> {
        None
    }

    /// Descarta el envío para poder enlazar la siguiente request.
    fn clear(&mut self) {}
}

/// Flujo multi-step tal como lo ve el `Transitioner`.
pub trait FormFlow {
    /// Nombre único del flujo; forma parte de los identificadores de evento.
    fn name(&self) -> &str;

    /// Campo de la request que transporta la transición pedida.
    fn transition_key(&self) -> &str;

    fn steps(&self) -> &StepCollection;

    fn context(&self) -> &FlowContext;

    fn context_mut(&mut self) -> &mut FlowContext;

    /// Formulario del step actual.
    fn current_step_form(&mut self) -> Result<&mut dyn StepForm, FlowError>;

    /// Persiste el contexto actual.
    fn save(&mut self) -> Result<(), FlowError>;

    /// Devuelve el contexto al estado inicial y lo persiste.
    fn reset(&mut self) -> Result<(), FlowError> {
        self.context_mut().reset();
        self.save()
    }

    fn current_step_number(&self) -> StepNumber {
        self.context().current_step_number()
    }

    fn current_step(&self) -> Result<&Step, StepCollectionError> {
        self.steps().get(self.current_step_number())
    }
}
