//! Builder para `Flow`.
//!
//! Declara los steps en orden (etiqueta + formulario), el campo de
//! transición y el storage. `build` numera los steps desde 1 y rehidrata el
//! contexto guardado bajo `formflow.<nombre>`; si el step guardado queda
//! fuera de rango, lo borra del storage y empieza de cero.
//!
//! ```ignore
//! let flow = Flow::builder("signup")
//!     .step("account", FieldForm::required(["email"]))
//!     .step("profile", FieldForm::required(["name"]))
//!     .step("confirm", FieldForm::new(["accept"]))
//!     .storage(session.clone())
//!     .build()?;
//! ```

use log::{debug, warn};

use super::{Flow, StepForm};
use crate::constants::DEFAULT_TRANSITION_KEY;
use crate::context::FlowContext;
use crate::errors::{FlowError, StepCollectionError};
use crate::step::StepCollection;
use crate::storage::{storage_key, ContextStorage, InMemoryContextStorage};

pub struct FlowBuilder {
    name: String,
    transition_key: String,
    labels: Vec<String>,
    forms: Vec<Box<dyn StepForm>>,
    storage: Option<Box<dyn ContextStorage>>,
}

impl FlowBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               transition_key: DEFAULT_TRANSITION_KEY.to_string(),
               labels: Vec::new(),
               forms: Vec::new(),
               storage: None }
    }

    pub fn transition_key(mut self, key: impl Into<String>) -> Self {
        self.transition_key = key.into();
        self
    }

    /// Añade el siguiente step (número = posición de declaración).
    pub fn step<F>(mut self, label: impl Into<String>, form: F) -> Self
        where F: StepForm + 'static
    {
        self.labels.push(label.into());
        self.forms.push(Box::new(form));
        self
    }

    /// Sin storage explícito se usa un `InMemoryContextStorage` propio.
    pub fn storage<S>(mut self, storage: S) -> Self
        where S: ContextStorage + 'static
    {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn build(self) -> Result<Flow, FlowError> {
        if self.labels.is_empty() {
            return Err(StepCollectionError::Empty.into());
        }
        let steps = StepCollection::from_labels(self.labels);
        let mut storage = self.storage
                              .unwrap_or_else(|| Box::new(InMemoryContextStorage::new()));

        let key = storage_key(&self.name);
        let context = match storage.load(&key)? {
            Some(stored) if steps.contains(stored.current_step_number()) => {
                debug!("restored context for flow {} at step {}", self.name, stored.current_step_number());
                stored
            }
            Some(stale) => {
                warn!("discarding stored context for flow {}: step {} is out of range (1..={})",
                      self.name,
                      stale.current_step_number(),
                      steps.count());
                storage.remove(&key)?;
                FlowContext::new()
            }
            None => FlowContext::new(),
        };

        Ok(Flow { name: self.name,
                  transition_key: self.transition_key,
                  steps,
                  forms: self.forms,
                  context,
                  storage })
    }
}
