use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use super::ContextStorage;
use crate::context::FlowContext;
use crate::errors::StorageError;

/// Storage en memoria con forma de sesión: guarda cada contexto serializado
/// como JSON.
///
/// Los clones comparten el mismo mapa, de modo que varias instancias del
/// mismo flujo (una por request) ven el mismo estado.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContextStorage {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl InMemoryContextStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON crudo guardado bajo `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Escribe JSON crudo (útil para simular sesiones corruptas o antiguas).
    pub fn insert_raw(&self, key: impl Into<String>, raw: impl Into<String>) {
        self.inner.borrow_mut().insert(key.into(), raw.into());
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl ContextStorage for InMemoryContextStorage {
    fn load(&self, key: &str) -> Result<Option<FlowContext>, StorageError> {
        match self.inner.borrow().get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &str, context: &FlowContext) -> Result<(), StorageError> {
        let raw = serde_json::to_string(context)?;
        debug!("saving flow context under {key}: {raw}");
        self.inner.borrow_mut().insert(key.to_string(), raw);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}
