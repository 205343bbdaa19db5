//! Persistencia del `FlowContext` entre requests.

mod memory;

pub use memory::InMemoryContextStorage;

use crate::constants::STORAGE_KEY_PREFIX;
use crate::context::FlowContext;
use crate::errors::StorageError;

/// Almacenamiento de contextos por clave (típicamente, la sesión del usuario).
pub trait ContextStorage {
    /// Contexto guardado bajo `key`, si existe.
    fn load(&self, key: &str) -> Result<Option<FlowContext>, StorageError>;
    /// Sobrescribe el contexto guardado bajo `key`.
    fn save(&mut self, key: &str, context: &FlowContext) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Clave de storage para el flujo `flow_name`.
pub fn storage_key(flow_name: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}{flow_name}")
}
