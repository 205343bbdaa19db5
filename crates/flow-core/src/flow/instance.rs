use std::fmt;

use super::{FlowBuilder, FormFlow, StepForm};
use crate::context::FlowContext;
use crate::engine::Transitioner;
use crate::errors::{FlowError, StepCollectionError};
use crate::request::RequestInput;
use crate::step::StepCollection;
use crate::storage::{storage_key, ContextStorage};

/// Flujo concreto: steps con su formulario, contexto y storage.
///
/// Se construye con `FlowBuilder`, que rehidrata el contexto guardado. Los
/// formularios son de una sola request: `Flow::transition` los limpia al
/// terminar.
pub struct Flow {
    pub(super) name: String,
    pub(super) transition_key: String,
    pub(super) steps: StepCollection,
    pub(super) forms: Vec<Box<dyn StepForm>>,
    pub(super) context: FlowContext,
    pub(super) storage: Box<dyn ContextStorage>,
}

impl Flow {
    pub fn builder(name: impl Into<String>) -> FlowBuilder {
        FlowBuilder::new(name)
    }

    /// Clave bajo la que se persiste el contexto de este flujo.
    pub fn storage_key(&self) -> String {
        storage_key(&self.name)
    }

    /// El formulario del step actual fue enviado y es válido.
    pub fn is_form_valid(&self) -> bool {
        self.form_index()
            .and_then(|index| self.forms.get(index))
            .is_some_and(|form| form.is_submitted() && form.is_valid())
    }

    /// Intenta la transición pedida en `request`.
    ///
    /// `Ok(false)` si no hay petición de transición o si el `Status`
    /// resultante no es exitoso; los errores de uso se propagan.
    pub fn transition(&mut self, engine: &Transitioner, request: &RequestInput) -> Result<bool, FlowError> {
        if !engine.has_transition_request(&*self, request) {
            return Ok(false);
        }
        let result = engine.transition(self, request);
        self.clear_forms();
        Ok(result?.is_successful())
    }

    /// Limpia el envío de todos los formularios.
    pub fn clear_forms(&mut self) {
        for form in self.forms.iter_mut() {
            form.clear();
        }
    }

    fn form_index(&self) -> Option<usize> {
        let number = self.context.current_step_number();
        self.steps.contains(number).then(|| number as usize - 1)
    }
}

impl FormFlow for Flow {
    fn name(&self) -> &str {
        &self.name
    }

    fn transition_key(&self) -> &str {
        &self.transition_key
    }

    fn steps(&self) -> &StepCollection {
        &self.steps
    }

    fn context(&self) -> &FlowContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut FlowContext {
        &mut self.context
    }

    fn current_step_form(&mut self) -> Result<&mut dyn StepForm, FlowError> {
        let number = self.context.current_step_number();
        let index = self.form_index().ok_or(StepCollectionError::NotFound(number))?;
        match self.forms.get_mut(index) {
            Some(form) => Ok(&mut **form),
            None => Err(StepCollectionError::NotFound(number).into()),
        }
    }

    fn save(&mut self) -> Result<(), FlowError> {
        let key = self.storage_key();
        self.storage.save(&key, &self.context)?;
        Ok(())
    }
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
         .field("name", &self.name)
         .field("transition_key", &self.transition_key)
         .field("steps", &self.steps)
         .field("context", &self.context)
         .finish_non_exhaustive()
    }
}
