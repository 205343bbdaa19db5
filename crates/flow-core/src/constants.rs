//! Constantes del motor de transiciones.
//!
//! Agrupa los marcadores que viajan en el campo de transición de cada
//! request y los valores por defecto compartidos por los flujos. Cambiar un
//! marcador rompe la compatibilidad con los formularios ya renderizados.

/// Nombre por defecto del campo que transporta la petición de transición.
pub const DEFAULT_TRANSITION_KEY: &str = "flow_transition";

/// Marcador de avance (`"1"`).
pub const FORWARDS_MARKER: &str = "1";

/// Marcador de retroceso; va seguido de `BACKWARDS_SEPARATOR` y el número
/// del step destino (`"0:2"`).
pub const BACKWARDS_MARKER: &str = "0";

pub const BACKWARDS_SEPARATOR: char = ':';

/// Marcador de finalización del flujo.
pub const COMPLETE_MARKER: &str = "2";

/// Marcador de reinicio del flujo.
pub const RESET_MARKER: &str = "3";

/// Prefijo de las claves bajo las que se guarda el `FlowContext` en storage.
pub const STORAGE_KEY_PREFIX: &str = "formflow.";
